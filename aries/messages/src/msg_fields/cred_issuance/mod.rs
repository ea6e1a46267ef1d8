//! Messages of the `issue-credential/1.0` protocol (Aries RFC 0036) that take part in the
//! offer, request and issue steps of an exchange.

pub mod issue_credential;
pub mod offer_credential;
pub mod request_credential;

use derive_more::From;
use serde::{Deserialize, Serialize, Serializer};
use typed_builder::TypedBuilder;

use self::{
    issue_credential::IssueCredentialV1, offer_credential::OfferCredentialV1,
    request_credential::RequestCredentialV1,
};
use crate::msg_types::{CredentialIssuanceTypeV1_0, MessageType, Prefix};

#[derive(Clone, Debug, From, PartialEq)]
pub enum CredentialIssuanceV1 {
    OfferCredential(OfferCredentialV1),
    RequestCredential(RequestCredentialV1),
    IssueCredential(IssueCredentialV1),
}

impl CredentialIssuanceV1 {
    pub fn kind(&self) -> CredentialIssuanceTypeV1_0 {
        match self {
            Self::OfferCredential(_) => CredentialIssuanceTypeV1_0::OfferCredential,
            Self::RequestCredential(_) => CredentialIssuanceTypeV1_0::RequestCredential,
            Self::IssueCredential(_) => CredentialIssuanceTypeV1_0::IssueCredential,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::OfferCredential(msg) => &msg.id,
            Self::RequestCredential(msg) => &msg.id,
            Self::IssueCredential(msg) => &msg.id,
        }
    }

    pub fn thread_id(&self) -> &str {
        match self {
            Self::OfferCredential(msg) => msg.thread_id(),
            Self::RequestCredential(msg) => msg.thread_id(),
            Self::IssueCredential(msg) => msg.thread_id(),
        }
    }

    pub(crate) fn serialize_with_prefix<S>(
        &self,
        prefix: Prefix,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let msg_type = MessageType::new(prefix, self.kind());
        match self {
            Self::OfferCredential(msg) => MsgWithType::new(msg_type, msg).serialize(serializer),
            Self::RequestCredential(msg) => MsgWithType::new(msg_type, msg).serialize(serializer),
            Self::IssueCredential(msg) => MsgWithType::new(msg_type, msg).serialize(serializer),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct MsgWithType<'a, T> {
    #[serde(rename = "@type")]
    msg_type: MessageType,
    #[serde(flatten)]
    message: &'a T,
}

impl<'a, T> MsgWithType<'a, T> {
    pub fn new(msg_type: MessageType, message: &'a T) -> Self {
        Self { msg_type, message }
    }
}

/// The `credential_preview` inner object of an offer.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CredentialPreviewV1 {
    #[serde(rename = "@type")]
    msg_type: MessageType,
    pub attributes: Vec<CredentialAttr>,
}

impl CredentialPreviewV1 {
    pub fn new(attributes: Vec<CredentialAttr>) -> Self {
        Self {
            msg_type: MessageType::from(CredentialIssuanceTypeV1_0::CredentialPreview),
            attributes,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct CredentialAttr {
    pub name: String,
    pub value: String,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "mime-type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}
