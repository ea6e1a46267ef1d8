pub mod issuance;
pub mod message_context;

use async_trait::async_trait;
use messages::{msg_types::MessageType, AriesMessage};

use self::message_context::UnpackedMessageContext;
use crate::{context::AgentContext, errors::error::VcxResult};

/// A protocol handler a router dispatches unpacked messages to.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Every message type this handler accepts. A router must only deliver messages whose type
    /// is listed here.
    fn supported_message_types(&self) -> Vec<MessageType>;

    /// Processes one inbound message, publishing the affected record on `message_context` and
    /// returning the message to send back, if any.
    ///
    /// On error the outputs of `message_context` are unset and must not be acted upon.
    async fn process(
        &self,
        agent_context: &AgentContext,
        message_context: &mut UnpackedMessageContext,
    ) -> VcxResult<Option<AriesMessage>>;
}
