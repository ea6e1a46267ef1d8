use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{
    decorators::{attachment::Attachment, thread::Thread, timing::Timing, transport::Transport},
    msg_parts::MsgParts,
};

pub type RequestCredentialV1 = MsgParts<RequestCredentialV1Content, RequestCredentialV1Decorators>;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct RequestCredentialV1Content {
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "requests~attach")]
    pub requests_attach: Vec<Attachment>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default, PartialEq, TypedBuilder)]
pub struct RequestCredentialV1Decorators {
    #[builder(default, setter(strip_option))]
    #[serde(rename = "~thread")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "~timing")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "~transport")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
}

impl RequestCredentialV1 {
    pub fn thread_id(&self) -> &str {
        self.decorators
            .thread
            .as_ref()
            .map_or(self.id.as_str(), |thread| thread.thid.as_str())
    }

    /// Whether the sender asked for the reply to come back over the inbound channel.
    pub fn return_routing_requested(&self) -> bool {
        self.decorators
            .transport
            .as_ref()
            .is_some_and(Transport::return_routing_requested)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        decorators::{
            attachment::tests::make_extended_attachment, thread::tests::make_extended_thread,
            transport::ReturnRoute,
        },
        misc::test_utils,
        msg_types::{CredentialIssuanceTypeV1_0, MessageType},
    };

    #[test]
    fn test_minimal_request_cred() {
        let content = RequestCredentialV1Content::builder()
            .requests_attach(vec![make_extended_attachment()])
            .build();

        let expected = json!({
            "requests~attach": content.requests_attach,
        });

        let msg = RequestCredentialV1::new("test_id".to_owned(), content);
        assert!(!msg.return_routing_requested());

        test_utils::test_msg(
            msg,
            MessageType::from(CredentialIssuanceTypeV1_0::RequestCredential),
            expected,
        );
    }

    #[test]
    fn test_extended_request_cred() {
        let content = RequestCredentialV1Content::builder()
            .requests_attach(vec![make_extended_attachment()])
            .comment("test_comment".to_owned())
            .build();

        let decorators = RequestCredentialV1Decorators::builder()
            .thread(make_extended_thread())
            .transport(Transport::builder().return_route(ReturnRoute::All).build())
            .build();

        let expected = json!({
            "requests~attach": content.requests_attach,
            "comment": content.comment,
            "~thread": decorators.thread,
            "~transport": { "return_route": "all" }
        });

        let msg = RequestCredentialV1::with_decorators("test_id".to_owned(), content, decorators);
        assert!(msg.return_routing_requested());
        assert_eq!(msg.thread_id(), "thid");

        test_utils::test_msg(
            msg,
            MessageType::from(CredentialIssuanceTypeV1_0::RequestCredential),
            expected,
        );
    }

    #[test]
    fn test_return_route_none_is_not_a_request() {
        let msg: RequestCredentialV1 = serde_json::from_value(json!({
            "@id": "test_id",
            "requests~attach": [],
            "~transport": { "return_route": "none" }
        }))
        .unwrap();

        assert!(!msg.return_routing_requested());
    }
}
