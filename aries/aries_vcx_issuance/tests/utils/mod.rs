#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use aries_vcx_issuance::{
    context::AgentContext,
    errors::error::prelude::*,
    protocols::issuance::{
        record::CredentialRecord,
        state::{CredentialExchangeRole, CredentialExchangeState},
    },
    services::CredentialService,
};
use async_trait::async_trait;
use messages::{
    decorators::{
        attachment::Attachment,
        thread::Thread,
        transport::{ReturnRoute, Transport},
    },
    msg_fields::cred_issuance::{
        issue_credential::{IssueCredentialV1, IssueCredentialV1Content, IssueCredentialV1Decorators},
        offer_credential::{OfferCredentialV1, OfferCredentialV1Content},
        request_credential::{
            RequestCredentialV1, RequestCredentialV1Content, RequestCredentialV1Decorators,
        },
        CredentialAttr, CredentialPreviewV1,
    },
    msg_types::Prefix,
    AriesMessage,
};
use serde_json::{json, Value};
use test_utils::constants::{AGENT_NAME, DEFAULT_CREDENTIAL_ATTRS, INSTITUTION_DID};

pub const MOCK_RECORD_ID: &str = "mock-record";
pub const THREAD_ID: &str = "mock-thread";

/// One operation invoked on [`MockCredentialService`], with the arguments worth asserting on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceCall {
    ProcessOffer { msg_id: String, connection_id: Option<String> },
    ProcessCredentialRequest { msg_id: String, connection_id: Option<String> },
    ProcessCredential { msg_id: String, connection_id: Option<String> },
    CreateRequest(String),
    CreateCredential(String),
    Get(String),
    CreateOffer,
    RejectOffer(String),
}

impl ServiceCall {
    fn name(&self) -> &'static str {
        match self {
            Self::ProcessOffer { .. } => "process_offer",
            Self::ProcessCredentialRequest { .. } => "process_credential_request",
            Self::ProcessCredential { .. } => "process_credential",
            Self::CreateRequest(_) => "create_request",
            Self::CreateCredential(_) => "create_credential",
            Self::Get(_) => "get",
            Self::CreateOffer => "create_offer",
            Self::RejectOffer(_) => "reject_offer",
        }
    }
}

/// A [`CredentialService`] that records every call and answers with canned records. Each
/// returned record carries a distinct phase, so tests can tell which operation produced it.
#[derive(Debug, Default)]
pub struct MockCredentialService {
    calls: Mutex<Vec<ServiceCall>>,
    failure: Option<(&'static str, AriesVcxErrorKind)>,
}

impl MockCredentialService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the operation called `operation` fail with an error of `kind`.
    pub fn failing(operation: &'static str, kind: AriesVcxErrorKind) -> Self {
        Self {
            calls: Mutex::default(),
            failure: Some((operation, kind)),
        }
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(ServiceCall::name).collect()
    }

    fn record_call(&self, call: ServiceCall) -> VcxResult<()> {
        let name = call.name();
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some((operation, kind)) if operation == name => Err(AriesVcxError::from_msg(
                kind,
                format!("Injected failure of {operation}"),
            )),
            _ => Ok(()),
        }
    }
}

/// The record `get` answers with.
pub fn stored_record() -> CredentialRecord {
    canned_record(CredentialExchangeRole::Holder, &[])
}

/// The record `create_request` answers with.
pub fn requested_record() -> CredentialRecord {
    canned_record(
        CredentialExchangeRole::Holder,
        &[CredentialExchangeState::RequestSent],
    )
}

/// The record `create_credential` answers with.
pub fn issued_record() -> CredentialRecord {
    canned_record(
        CredentialExchangeRole::Issuer,
        &[
            CredentialExchangeState::RequestReceived,
            CredentialExchangeState::CredentialIssued,
        ],
    )
}

fn canned_record(
    role: CredentialExchangeRole,
    transitions: &[CredentialExchangeState],
) -> CredentialRecord {
    let mut record = CredentialRecord::new(THREAD_ID.to_owned(), None, role);
    record.id = MOCK_RECORD_ID.to_owned();
    for state in transitions {
        record.transition(*state).unwrap();
    }
    record
}

#[async_trait]
impl CredentialService for MockCredentialService {
    async fn process_offer(
        &self,
        _context: &AgentContext,
        offer: &OfferCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String> {
        self.record_call(ServiceCall::ProcessOffer {
            msg_id: offer.id.clone(),
            connection_id: connection_id.map(ToOwned::to_owned),
        })?;
        Ok(MOCK_RECORD_ID.to_owned())
    }

    async fn process_credential_request(
        &self,
        _context: &AgentContext,
        request: &RequestCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String> {
        self.record_call(ServiceCall::ProcessCredentialRequest {
            msg_id: request.id.clone(),
            connection_id: connection_id.map(ToOwned::to_owned),
        })?;
        Ok(MOCK_RECORD_ID.to_owned())
    }

    async fn process_credential(
        &self,
        _context: &AgentContext,
        credential: &IssueCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String> {
        self.record_call(ServiceCall::ProcessCredential {
            msg_id: credential.id.clone(),
            connection_id: connection_id.map(ToOwned::to_owned),
        })?;
        Ok(MOCK_RECORD_ID.to_owned())
    }

    async fn create_request(
        &self,
        _context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<(RequestCredentialV1, CredentialRecord)> {
        self.record_call(ServiceCall::CreateRequest(record_id.to_owned()))?;
        Ok((make_request("mock-request", None), requested_record()))
    }

    async fn create_credential(
        &self,
        _context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<(IssueCredentialV1, CredentialRecord)> {
        self.record_call(ServiceCall::CreateCredential(record_id.to_owned()))?;
        Ok((make_credential("mock-credential"), issued_record()))
    }

    async fn get(&self, _context: &AgentContext, record_id: &str) -> VcxResult<CredentialRecord> {
        self.record_call(ServiceCall::Get(record_id.to_owned()))?;
        Ok(stored_record())
    }

    async fn create_offer(
        &self,
        _context: &AgentContext,
        preview: CredentialPreviewV1,
        _connection_id: Option<&str>,
    ) -> VcxResult<(OfferCredentialV1, CredentialRecord)> {
        self.record_call(ServiceCall::CreateOffer)?;
        let content = OfferCredentialV1Content::builder()
            .credential_preview(preview)
            .offers_attach(vec![make_attachment("offer")])
            .build();
        Ok((
            OfferCredentialV1::new(THREAD_ID.to_owned(), content),
            canned_record(CredentialExchangeRole::Issuer, &[]),
        ))
    }

    async fn reject_offer(
        &self,
        _context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<CredentialRecord> {
        self.record_call(ServiceCall::RejectOffer(record_id.to_owned()))?;
        Ok(canned_record(
            CredentialExchangeRole::Holder,
            &[CredentialExchangeState::Rejected],
        ))
    }
}

pub fn agent_context() -> AgentContext {
    AgentContext::builder()
        .agent_name(AGENT_NAME)
        .did(INSTITUTION_DID.to_owned())
        .build()
}

pub fn make_preview() -> CredentialPreviewV1 {
    CredentialPreviewV1::new(
        DEFAULT_CREDENTIAL_ATTRS
            .iter()
            .map(|(name, value)| {
                CredentialAttr::builder()
                    .name((*name).to_owned())
                    .value((*value).to_owned())
                    .build()
            })
            .collect(),
    )
}

fn make_attachment(id: &str) -> Attachment {
    Attachment::from_json(id, &json!({ "nonce": "1234" }))
}

pub fn make_offer(id: &str) -> OfferCredentialV1 {
    let content = OfferCredentialV1Content::builder()
        .credential_preview(make_preview())
        .offers_attach(vec![make_attachment("libindy-cred-offer-0")])
        .build();
    OfferCredentialV1::new(id.to_owned(), content)
}

pub fn make_request(id: &str, return_route: Option<ReturnRoute>) -> RequestCredentialV1 {
    let content = RequestCredentialV1Content::builder()
        .requests_attach(vec![make_attachment("libindy-cred-request-0")])
        .build();
    let decorators = match return_route {
        Some(return_route) => RequestCredentialV1Decorators::builder()
            .thread(Thread::new(THREAD_ID.to_owned()))
            .transport(Transport::builder().return_route(return_route).build())
            .build(),
        None => RequestCredentialV1Decorators::builder()
            .thread(Thread::new(THREAD_ID.to_owned()))
            .build(),
    };
    RequestCredentialV1::with_decorators(id.to_owned(), content, decorators)
}

pub fn make_credential(id: &str) -> IssueCredentialV1 {
    let content = IssueCredentialV1Content::builder()
        .credentials_attach(vec![Attachment::from_json(
            "libindy-cred-0",
            &json!({ "values": {} }),
        )])
        .build();
    let decorators = IssueCredentialV1Decorators::builder()
        .thread(Thread::new(THREAD_ID.to_owned()))
        .build();
    IssueCredentialV1::with_decorators(id.to_owned(), content, decorators)
}

/// Serializes `msg` the way it would arrive on the wire under `prefix`.
pub fn to_payload<T>(msg: T, prefix: Prefix) -> Value
where
    T: Into<AriesMessage>,
{
    msg.into().to_value_with_prefix(prefix).unwrap()
}
