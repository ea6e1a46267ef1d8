//! The credential service is the collaborator that owns exchange records. Handlers decide *which*
//! transition to request; the service performs it, validates it against the record's phase and
//! persists the outcome.

pub mod credential_service_inmem;

use async_trait::async_trait;
use messages::msg_fields::cred_issuance::{
    issue_credential::IssueCredentialV1, offer_credential::OfferCredentialV1,
    request_credential::RequestCredentialV1, CredentialPreviewV1,
};

use crate::{
    context::AgentContext, errors::error::VcxResult,
    protocols::issuance::record::CredentialRecord,
};

/// Operations over credential exchange records.
///
/// Implementations must serialize transitions of the same record: two calls racing on one record
/// may not both observe the pre-transition state. Handlers rely on this and take no locks of
/// their own. Implementations must not deduplicate messages either; every call is a new attempt.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Stores a received offer, opening a holder record or refreshing the one on the same thread.
    async fn process_offer(
        &self,
        context: &AgentContext,
        offer: &OfferCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String>;

    /// Correlates a received request with the issuer record of the offer it answers.
    async fn process_credential_request(
        &self,
        context: &AgentContext,
        request: &RequestCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String>;

    /// Stores a received credential on the holder record that requested it.
    async fn process_credential(
        &self,
        context: &AgentContext,
        credential: &IssueCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String>;

    async fn create_request(
        &self,
        context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<(RequestCredentialV1, CredentialRecord)>;

    async fn create_credential(
        &self,
        context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<(IssueCredentialV1, CredentialRecord)>;

    async fn get(&self, context: &AgentContext, record_id: &str) -> VcxResult<CredentialRecord>;

    /// Opens an issuer record and builds the offer that starts the exchange.
    async fn create_offer(
        &self,
        context: &AgentContext,
        preview: CredentialPreviewV1,
        connection_id: Option<&str>,
    ) -> VcxResult<(OfferCredentialV1, CredentialRecord)>;

    /// Declines a received offer.
    async fn reject_offer(
        &self,
        context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<CredentialRecord>;
}
