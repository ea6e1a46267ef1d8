use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::error::{MsgTypeError, MsgTypeResult};

/// An `~attach` entry. Credential offers, requests and credentials all carry their format
/// specific payload this way.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct Attachment {
    #[builder(default, setter(strip_option))]
    #[serde(rename = "@id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "mime-type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: AttachmentData,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AttachmentData {
    #[serde(flatten)]
    pub content: AttachmentType,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    Base64(String),
    Json(Value),
}

impl Attachment {
    pub const JSON_MIME_TYPE: &'static str = "application/json";

    /// Builds a base64 encoded attachment out of a JSON value.
    pub fn from_json(id: &str, value: &Value) -> Self {
        let encoded = general_purpose::STANDARD.encode(value.to_string());
        Self::builder()
            .id(id.to_owned())
            .mime_type(Self::JSON_MIME_TYPE.to_owned())
            .data(AttachmentData {
                content: AttachmentType::Base64(encoded),
            })
            .build()
    }

    /// Reads the attachment content back as JSON, regardless of whether it was inlined or
    /// base64 encoded.
    pub fn content_as_json(&self) -> MsgTypeResult<Value> {
        match &self.data.content {
            AttachmentType::Json(value) => Ok(value.clone()),
            AttachmentType::Base64(encoded) => {
                let bytes = general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|err| MsgTypeError::InvalidAttachment(err.to_string()))?;
                serde_json::from_slice(&bytes)
                    .map_err(|err| MsgTypeError::InvalidAttachment(err.to_string()))
            }
        }
    }
}
