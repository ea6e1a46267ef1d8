#![allow(clippy::module_inception)]
#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::large_enum_variant)]

pub mod decorators;
pub mod error;
pub mod misc;
pub mod msg_fields;
pub mod msg_parts;
pub mod msg_types;

use std::str::FromStr;

use derive_more::From;
use msg_fields::cred_issuance::{
    issue_credential::IssueCredentialV1, offer_credential::OfferCredentialV1,
    request_credential::RequestCredentialV1, CredentialIssuanceV1,
};
use msg_types::{CredentialIssuanceTypeV1_0, MessageType, Prefix};
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Enum that can represent any message of the implemented protocols.
///
/// It abstracts away the `@type` field and uses it to determine how
/// to deserialize the input into the correct message type. Both the legacy and the
/// `https://didcomm.org` spellings of a type are accepted.
///
/// It also automatically appends the correct `@type` field when serializing
/// a message, always using the `https://didcomm.org` prefix.
#[derive(Clone, Debug, From, PartialEq)]
pub enum AriesMessage {
    CredentialIssuance(CredentialIssuanceV1),
}

impl AriesMessage {
    pub fn id(&self) -> &str {
        match self {
            Self::CredentialIssuance(msg) => msg.id(),
        }
    }

    pub fn thread_id(&self) -> &str {
        match self {
            Self::CredentialIssuance(msg) => msg.thread_id(),
        }
    }

    pub fn msg_type(&self) -> MessageType {
        match self {
            Self::CredentialIssuance(msg) => MessageType::new(Prefix::default(), msg.kind()),
        }
    }

    /// Serializes the message with an explicitly chosen `@type` prefix.
    pub fn to_value_with_prefix(&self, prefix: Prefix) -> serde_json::Result<Value> {
        match self {
            Self::CredentialIssuance(msg) => {
                msg.serialize_with_prefix(prefix, serde_json::value::Serializer)
            }
        }
    }
}

impl From<OfferCredentialV1> for AriesMessage {
    fn from(value: OfferCredentialV1) -> Self {
        Self::CredentialIssuance(value.into())
    }
}

impl From<RequestCredentialV1> for AriesMessage {
    fn from(value: RequestCredentialV1) -> Self {
        Self::CredentialIssuance(value.into())
    }
}

impl From<IssueCredentialV1> for AriesMessage {
    fn from(value: IssueCredentialV1) -> Self {
        Self::CredentialIssuance(value.into())
    }
}

impl Serialize for AriesMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::CredentialIssuance(msg) => {
                msg.serialize_with_prefix(Prefix::default(), serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for AriesMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let msg_type_str = value
            .get("@type")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("@type"))?;
        let msg_type = MessageType::from_str(msg_type_str).map_err(D::Error::custom)?;

        let msg = match msg_type.kind {
            CredentialIssuanceTypeV1_0::OfferCredential => {
                serde_json::from_value::<OfferCredentialV1>(value).map(CredentialIssuanceV1::from)
            }
            CredentialIssuanceTypeV1_0::RequestCredential => {
                serde_json::from_value::<RequestCredentialV1>(value).map(CredentialIssuanceV1::from)
            }
            CredentialIssuanceTypeV1_0::IssueCredential => {
                serde_json::from_value::<IssueCredentialV1>(value).map(CredentialIssuanceV1::from)
            }
            kind => {
                return Err(D::Error::custom(format!(
                    "unsupported message kind: {}",
                    kind.as_ref()
                )))
            }
        };

        msg.map(Self::CredentialIssuance).map_err(D::Error::custom)
    }
}
