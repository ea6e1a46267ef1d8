use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::error::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialExchangeRole {
    Issuer,
    Holder,
}

/// Phase of a single credential exchange.
///
/// Holder: `OfferReceived -> RequestSent -> CredentialReceived`.
/// Issuer: `OfferSent -> RequestReceived -> CredentialIssued`.
/// Any non-terminal phase may end in `Rejected`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialExchangeState {
    OfferSent,
    OfferReceived,
    RequestSent,
    RequestReceived,
    CredentialIssued,
    CredentialReceived,
    Rejected,
}

impl CredentialExchangeState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::CredentialIssued | Self::CredentialReceived | Self::Rejected
        )
    }

    /// The role a record in this phase is playing, `None` for phases shared by both roles.
    pub fn role(self) -> Option<CredentialExchangeRole> {
        match self {
            Self::OfferReceived | Self::RequestSent | Self::CredentialReceived => {
                Some(CredentialExchangeRole::Holder)
            }
            Self::OfferSent | Self::RequestReceived | Self::CredentialIssued => {
                Some(CredentialExchangeRole::Issuer)
            }
            Self::Rejected => None,
        }
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        use CredentialExchangeState::*;

        match (self, next) {
            (from, Rejected) => !from.is_terminal(),
            // A holder may be re-offered on the same thread before answering.
            (OfferReceived, OfferReceived | RequestSent) => true,
            (RequestSent, CredentialReceived) => true,
            (OfferSent, RequestReceived) => true,
            (RequestReceived, CredentialIssued) => true,
            _ => false,
        }
    }

    pub fn transition(self, next: Self) -> VcxResult<Self> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidState,
                format!("Invalid credential exchange transition from {self} to {next}"),
            ))
        }
    }
}

impl fmt::Display for CredentialExchangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OfferSent => "OfferSent",
            Self::OfferReceived => "OfferReceived",
            Self::RequestSent => "RequestSent",
            Self::RequestReceived => "RequestReceived",
            Self::CredentialIssued => "CredentialIssued",
            Self::CredentialReceived => "CredentialReceived",
            Self::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}
