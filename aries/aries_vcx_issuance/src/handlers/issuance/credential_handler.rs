use std::sync::Arc;

use async_trait::async_trait;
use messages::{
    msg_fields::cred_issuance::{
        issue_credential::IssueCredentialV1, offer_credential::OfferCredentialV1,
        request_credential::RequestCredentialV1,
    },
    msg_types::{CredentialIssuanceTypeV1_0, MessageType},
    AriesMessage,
};

use crate::{
    config::AutoRespondPolicy,
    context::AgentContext,
    errors::error::prelude::*,
    handlers::{message_context::UnpackedMessageContext, MessageHandler},
    services::CredentialService,
};

/// Dispatches the offer, request and issue steps of `issue-credential/1.0` to a
/// [`CredentialService`], answering automatically where the [`AutoRespondPolicy`] allows it.
///
/// The handler keeps no per-exchange state and takes no locks; it is the service's job to keep
/// concurrent transitions of one record apart.
#[derive(Debug)]
pub struct CredentialHandler<S> {
    service: Arc<S>,
    policy: AutoRespondPolicy,
}

impl<S> CredentialHandler<S>
where
    S: CredentialService,
{
    pub fn new(service: Arc<S>, policy: AutoRespondPolicy) -> Self {
        Self { service, policy }
    }

    pub fn policy(&self) -> AutoRespondPolicy {
        self.policy
    }

    async fn handle_offer(
        &self,
        agent_context: &AgentContext,
        message_context: &mut UnpackedMessageContext,
    ) -> VcxResult<Option<AriesMessage>> {
        let offer: OfferCredentialV1 = message_context.get_message()?;
        let record_id = self
            .service
            .process_offer(agent_context, &offer, message_context.connection_id())
            .await?;

        let record = self.service.get(agent_context, &record_id).await?;

        if self.policy.auto_respond_credential_offer {
            debug!("Auto-responding to credential offer {record_id} with a request");
            let (request, record) = self.service.create_request(agent_context, &record_id).await?;
            message_context.context_record = Some(record);
            return Ok(Some(request.into()));
        }

        message_context.context_record = Some(record);
        Ok(None)
    }

    async fn handle_request(
        &self,
        agent_context: &AgentContext,
        message_context: &mut UnpackedMessageContext,
    ) -> VcxResult<Option<AriesMessage>> {
        let request: RequestCredentialV1 = message_context.get_message()?;
        let record_id = self
            .service
            .process_credential_request(agent_context, &request, message_context.connection_id())
            .await?;

        // Without a connection the return route is the only way back to the requester.
        let inline_reply =
            request.return_routing_requested() && message_context.connection_id().is_none();

        if inline_reply || self.policy.auto_respond_credential_request {
            debug!("Issuing credential for request {record_id}; inline reply: {inline_reply}");
            let (credential, record) = self
                .service
                .create_credential(agent_context, &record_id)
                .await?;
            message_context.context_record = Some(record);
            return Ok(Some(credential.into()));
        }

        message_context.context_record = Some(self.service.get(agent_context, &record_id).await?);
        Ok(None)
    }

    async fn handle_credential(
        &self,
        agent_context: &AgentContext,
        message_context: &mut UnpackedMessageContext,
    ) -> VcxResult<Option<AriesMessage>> {
        let credential: IssueCredentialV1 = message_context.get_message()?;
        let record_id = self
            .service
            .process_credential(agent_context, &credential, message_context.connection_id())
            .await?;

        message_context.context_record = Some(self.service.get(agent_context, &record_id).await?);
        Ok(None)
    }
}

#[async_trait]
impl<S> MessageHandler for CredentialHandler<S>
where
    S: CredentialService,
{
    fn supported_message_types(&self) -> Vec<MessageType> {
        [
            CredentialIssuanceTypeV1_0::OfferCredential,
            CredentialIssuanceTypeV1_0::RequestCredential,
            CredentialIssuanceTypeV1_0::IssueCredential,
        ]
        .into_iter()
        .flat_map(MessageType::all_spellings)
        .collect()
    }

    async fn process(
        &self,
        agent_context: &AgentContext,
        message_context: &mut UnpackedMessageContext,
    ) -> VcxResult<Option<AriesMessage>> {
        message_context.context_record = None;

        let msg_type = message_context.message_type()?;
        info!(
            "Processing {} on connection {:?}",
            msg_type,
            message_context.connection_id()
        );

        match msg_type.kind {
            CredentialIssuanceTypeV1_0::OfferCredential => {
                self.handle_offer(agent_context, message_context).await
            }
            CredentialIssuanceTypeV1_0::RequestCredential => {
                self.handle_request(agent_context, message_context).await
            }
            CredentialIssuanceTypeV1_0::IssueCredential => {
                self.handle_credential(agent_context, message_context).await
            }
            _ => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::UnsupportedMessage,
                format!("Unsupported message type {msg_type}"),
            )),
        }
    }
}
