use std::collections::HashMap;

use chrono::{DateTime, Utc};
use messages::{
    decorators::attachment::Attachment, msg_fields::cred_issuance::CredentialPreviewV1,
};
use serde::{Deserialize, Serialize};

use super::state::{CredentialExchangeRole, CredentialExchangeState};
use crate::{common::credentials::CredentialAttributeValue, errors::error::prelude::*};

/// The persisted state of one credential exchange. Records are created and advanced by a
/// [`crate::services::CredentialService`]; handlers only read them back.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CredentialRecord {
    pub id: String,
    pub thread_id: String,
    pub connection_id: Option<String>,
    pub role: CredentialExchangeRole,
    state: CredentialExchangeState,
    pub credential_preview: Option<CredentialPreviewV1>,
    #[serde(default)]
    pub offer_attach: Vec<Attachment>,
    #[serde(default)]
    pub request_attach: Vec<Attachment>,
    #[serde(default)]
    pub credential_attach: Vec<Attachment>,
    #[serde(default)]
    pub credential_values: HashMap<String, CredentialAttributeValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Opens a record in the first phase of `role`: `OfferSent` for an issuer and
    /// `OfferReceived` for a holder.
    pub fn new(
        thread_id: String,
        connection_id: Option<String>,
        role: CredentialExchangeRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            thread_id,
            connection_id,
            role,
            state: initial_state(role),
            credential_preview: None,
            offer_attach: Vec::new(),
            request_attach: Vec::new(),
            credential_attach: Vec::new(),
            credential_values: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> CredentialExchangeState {
        self.state
    }

    /// Moves the record to `next`, failing with `InvalidState` if the phase table forbids it.
    pub fn transition(&mut self, next: CredentialExchangeState) -> VcxResult<()> {
        self.state = self.state.transition(next).map_err(|err| {
            err.extend(format!("Credential record id: {}, thread id: {}", self.id, self.thread_id))
        })?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn ensure_state(&self, expected: CredentialExchangeState) -> VcxResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidState,
                format!(
                    "Credential record {} is in state {}, expected {expected}",
                    self.id, self.state
                ),
            ))
        }
    }
}

fn initial_state(role: CredentialExchangeRole) -> CredentialExchangeState {
    match role {
        CredentialExchangeRole::Issuer => CredentialExchangeState::OfferSent,
        CredentialExchangeRole::Holder => CredentialExchangeState::OfferReceived,
    }
}
