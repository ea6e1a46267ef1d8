use std::collections::HashMap;

use async_trait::async_trait;
use messages::{
    decorators::{attachment::Attachment, thread::Thread, timing::Timing},
    msg_fields::cred_issuance::{
        issue_credential::{IssueCredentialV1, IssueCredentialV1Content, IssueCredentialV1Decorators},
        offer_credential::{OfferCredentialV1, OfferCredentialV1Content, OfferCredentialV1Decorators},
        request_credential::{
            RequestCredentialV1, RequestCredentialV1Content, RequestCredentialV1Decorators,
        },
        CredentialPreviewV1,
    },
};
use serde_json::json;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::CredentialService;
use crate::{
    common::credentials::{encode_preview, CredentialAttributeValue},
    context::AgentContext,
    errors::error::prelude::*,
    protocols::issuance::{
        record::CredentialRecord,
        state::{CredentialExchangeRole, CredentialExchangeState},
    },
    storage::{object_cache::ObjectCache, Storage},
};

const OFFER_ATTACH_ID: &str = "libindy-cred-offer-0";
const REQUEST_ATTACH_ID: &str = "libindy-cred-request-0";
const CREDENTIAL_ATTACH_ID: &str = "libindy-cred-0";

/// A [`CredentialService`] keeping records in process memory.
///
/// Every mutating operation runs under one async lock, so transitions never interleave. No
/// signing takes place: issued credentials carry the encoded attribute values as a plain JSON
/// attachment.
#[derive(Debug)]
pub struct InMemoryCredentialService {
    records: ObjectCache<CredentialRecord>,
    transition_lock: Mutex<()>,
}

impl Default for InMemoryCredentialService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCredentialService {
    pub fn new() -> Self {
        Self {
            records: ObjectCache::new("credential-records"),
            transition_lock: Mutex::new(()),
        }
    }

    fn find_by_thread(
        &self,
        thread_id: &str,
        role: CredentialExchangeRole,
    ) -> VcxResult<Option<CredentialRecord>> {
        let ids = self.records.find_by(|(id, record)| {
            let record = record.lock().ok()?;
            (record.thread_id == thread_id && record.role == role).then(|| id.to_owned())
        })?;
        ids.first().map(|id| self.records.get(id)).transpose()
    }

    fn get_by_thread(
        &self,
        thread_id: &str,
        role: CredentialExchangeRole,
    ) -> VcxResult<CredentialRecord> {
        self.find_by_thread(thread_id, role)?.ok_or_else(|| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::NotFound,
                format!("No {role:?} credential record found for thread id {thread_id}"),
            )
        })
    }

    fn get_with_role(
        &self,
        record_id: &str,
        role: CredentialExchangeRole,
    ) -> VcxResult<CredentialRecord> {
        let record = self.records.get(record_id)?;
        if record.role != role {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidState,
                format!("Credential record {record_id} is not a {role:?} record"),
            ));
        }
        Ok(record)
    }

    fn save(&self, record: &CredentialRecord) -> VcxResult<()> {
        self.records.insert(&record.id, record.clone())?;
        Ok(())
    }
}

/// Binds a connectionless record to the connection a follow-up arrived on, and refuses
/// follow-ups arriving on a different connection than the exchange started on.
fn check_connection(record: &mut CredentialRecord, connection_id: Option<&str>) -> VcxResult<()> {
    match (record.connection_id.as_deref(), connection_id) {
        (Some(expected), Some(actual)) if expected != actual => Err(AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidState,
            format!(
                "Credential record {} belongs to connection {expected}, message arrived on \
                 {actual}",
                record.id
            ),
        )),
        (None, Some(actual)) => {
            record.connection_id = Some(actual.to_owned());
            Ok(())
        }
        _ => Ok(()),
    }
}

fn decode_credential_values(
    attachments: &[Attachment],
) -> VcxResult<HashMap<String, CredentialAttributeValue>> {
    let attachment = attachments.first().ok_or_else(|| {
        AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidMessageFormat,
            "Credential message has no credential attachment",
        )
    })?;
    let content = attachment.content_as_json()?;
    let values = content.get("values").cloned().unwrap_or_else(|| json!({}));
    serde_json::from_value(values).map_err(|err| {
        AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidMessageFormat,
            format!("Cannot read credential values: {err}"),
        )
    })
}

#[async_trait]
impl CredentialService for InMemoryCredentialService {
    async fn process_offer(
        &self,
        _context: &AgentContext,
        offer: &OfferCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String> {
        let _guard = self.transition_lock.lock().await;
        let thread_id = offer.thread_id();

        let mut record = match self.find_by_thread(thread_id, CredentialExchangeRole::Holder)? {
            Some(mut record) => {
                check_connection(&mut record, connection_id)?;
                record.transition(CredentialExchangeState::OfferReceived)?;
                record
            }
            None => CredentialRecord::new(
                thread_id.to_owned(),
                connection_id.map(ToOwned::to_owned),
                CredentialExchangeRole::Holder,
            ),
        };
        record.credential_preview = Some(offer.content.credential_preview.clone());
        record.offer_attach = offer.content.offers_attach.clone();
        self.save(&record)?;

        info!(
            "Credential offer stored; record id: {}, thread id: {}",
            record.id, record.thread_id
        );
        Ok(record.id)
    }

    async fn process_credential_request(
        &self,
        _context: &AgentContext,
        request: &RequestCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String> {
        let _guard = self.transition_lock.lock().await;

        let mut record = self.get_by_thread(request.thread_id(), CredentialExchangeRole::Issuer)?;
        check_connection(&mut record, connection_id)?;
        record.transition(CredentialExchangeState::RequestReceived)?;
        record.request_attach = request.content.requests_attach.clone();
        self.save(&record)?;

        info!(
            "Credential request stored; record id: {}, thread id: {}",
            record.id, record.thread_id
        );
        Ok(record.id)
    }

    async fn process_credential(
        &self,
        _context: &AgentContext,
        credential: &IssueCredentialV1,
        connection_id: Option<&str>,
    ) -> VcxResult<String> {
        let _guard = self.transition_lock.lock().await;

        let mut record =
            self.get_by_thread(credential.thread_id(), CredentialExchangeRole::Holder)?;
        check_connection(&mut record, connection_id)?;
        let values = decode_credential_values(&credential.content.credentials_attach)?;
        record.transition(CredentialExchangeState::CredentialReceived)?;
        record.credential_attach = credential.content.credentials_attach.clone();
        record.credential_values = values;
        self.save(&record)?;

        info!(
            "Credential stored; record id: {}, thread id: {}",
            record.id, record.thread_id
        );
        Ok(record.id)
    }

    async fn create_request(
        &self,
        context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<(RequestCredentialV1, CredentialRecord)> {
        let _guard = self.transition_lock.lock().await;

        let mut record = self.get_with_role(record_id, CredentialExchangeRole::Holder)?;
        record.transition(CredentialExchangeState::RequestSent)?;

        let request_attach = Attachment::from_json(
            REQUEST_ATTACH_ID,
            &json!({
                "prover_did": context.did,
                "nonce": Uuid::new_v4().to_string(),
            }),
        );
        record.request_attach = vec![request_attach.clone()];

        let content = RequestCredentialV1Content::builder()
            .requests_attach(vec![request_attach])
            .build();
        let decorators = RequestCredentialV1Decorators::builder()
            .thread(Thread::new(record.thread_id.clone()))
            .timing(Timing::now())
            .build();
        let request = RequestCredentialV1::with_decorators(
            Uuid::new_v4().to_string(),
            content,
            decorators,
        );

        self.save(&record)?;
        debug!("Built credential request for record {}", record.id);
        Ok((request, record))
    }

    async fn create_credential(
        &self,
        context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<(IssueCredentialV1, CredentialRecord)> {
        let _guard = self.transition_lock.lock().await;

        let mut record = self.get_with_role(record_id, CredentialExchangeRole::Issuer)?;
        let preview = record.credential_preview.as_ref().ok_or_else(|| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidState,
                format!("Credential record {record_id} has no credential preview to issue"),
            )
        })?;
        let values = encode_preview(preview)?;
        record.transition(CredentialExchangeState::CredentialIssued)?;

        let credential_attach = Attachment::from_json(
            CREDENTIAL_ATTACH_ID,
            &json!({
                "issuer_did": context.did,
                "values": values,
            }),
        );
        record.credential_attach = vec![credential_attach.clone()];
        record.credential_values = values;

        let content = IssueCredentialV1Content::builder()
            .credentials_attach(vec![credential_attach])
            .build();
        let decorators = IssueCredentialV1Decorators::builder()
            .thread(Thread::new(record.thread_id.clone()))
            .timing(Timing::now())
            .build();
        let credential =
            IssueCredentialV1::with_decorators(Uuid::new_v4().to_string(), content, decorators);

        self.save(&record)?;
        debug!("Built credential for record {}", record.id);
        Ok((credential, record))
    }

    async fn get(&self, _context: &AgentContext, record_id: &str) -> VcxResult<CredentialRecord> {
        self.records.get(record_id)
    }

    async fn create_offer(
        &self,
        _context: &AgentContext,
        preview: CredentialPreviewV1,
        connection_id: Option<&str>,
    ) -> VcxResult<(OfferCredentialV1, CredentialRecord)> {
        encode_preview(&preview)?;
        let _guard = self.transition_lock.lock().await;

        let offer_id = Uuid::new_v4().to_string();
        let mut record = CredentialRecord::new(
            offer_id.clone(),
            connection_id.map(ToOwned::to_owned),
            CredentialExchangeRole::Issuer,
        );

        let offer_attach =
            Attachment::from_json(OFFER_ATTACH_ID, &json!({ "nonce": Uuid::new_v4().to_string() }));
        record.offer_attach = vec![offer_attach.clone()];
        record.credential_preview = Some(preview.clone());

        let content = OfferCredentialV1Content::builder()
            .credential_preview(preview)
            .offers_attach(vec![offer_attach])
            .build();
        let decorators = OfferCredentialV1Decorators::builder()
            .timing(Timing::now())
            .build();
        let offer = OfferCredentialV1::with_decorators(offer_id, content, decorators);

        self.save(&record)?;
        info!("Created credential offer; record id: {}", record.id);
        Ok((offer, record))
    }

    async fn reject_offer(
        &self,
        _context: &AgentContext,
        record_id: &str,
    ) -> VcxResult<CredentialRecord> {
        let _guard = self.transition_lock.lock().await;

        let mut record = self.get_with_role(record_id, CredentialExchangeRole::Holder)?;
        record.ensure_state(CredentialExchangeState::OfferReceived)?;
        record.transition(CredentialExchangeState::Rejected)?;
        self.save(&record)?;

        info!("Credential offer rejected; record id: {}", record.id);
        Ok(record)
    }
}
