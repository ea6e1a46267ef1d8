use std::str::FromStr;

use messages::msg_types::MessageType;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{errors::error::prelude::*, protocols::issuance::record::CredentialRecord};

/// An unpacked inbound message together with the connection it arrived on and the slot a
/// handler publishes the resulting exchange record to.
#[derive(Clone, Debug)]
pub struct UnpackedMessageContext {
    payload: Value,
    connection_id: Option<String>,
    pub context_record: Option<CredentialRecord>,
}

impl UnpackedMessageContext {
    pub fn new(payload: Value, connection_id: Option<String>) -> Self {
        Self {
            payload,
            connection_id,
            context_record: None,
        }
    }

    pub fn from_json(payload: &str, connection_id: Option<String>) -> VcxResult<Self> {
        let payload = serde_json::from_str(payload).map_err(|err| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidJson,
                format!("Cannot parse unpacked message: {err}"),
            )
        })?;
        Ok(Self::new(payload, connection_id))
    }

    pub fn connection_id(&self) -> Option<&str> {
        self.connection_id.as_deref()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The `@type` field exactly as received.
    pub fn raw_message_type(&self) -> Option<&str> {
        self.payload.get("@type").and_then(Value::as_str)
    }

    /// Resolves `@type` to an `issue-credential/1.0` message type. Any other type is reported
    /// as `UnsupportedMessage`.
    pub fn message_type(&self) -> VcxResult<MessageType> {
        let raw = self.raw_message_type().ok_or_else(|| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidMessageFormat,
                "Message has no @type field",
            )
        })?;
        MessageType::from_str(raw).map_err(|err| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::UnsupportedMessage,
                format!("Unsupported message type {raw}: {err}"),
            )
        })
    }

    pub fn get_message<T>(&self) -> VcxResult<T>
    where
        T: DeserializeOwned,
    {
        T::deserialize(&self.payload).map_err(|err| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidMessageFormat,
                format!("Cannot deserialize {:?}: {err}", self.raw_message_type()),
            )
        })
    }
}
