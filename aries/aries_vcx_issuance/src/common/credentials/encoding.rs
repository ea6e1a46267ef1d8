use std::collections::HashMap;

use messages::msg_fields::cred_issuance::CredentialPreviewV1;
use openssl::{bn::BigNum, sha::sha256};
use serde::{Deserialize, Serialize};

use crate::errors::error::prelude::*;

/// A credential attribute as it travels inside an issued credential: the value the holder sees
/// and the integer encoding the signature is computed over.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CredentialAttributeValue {
    pub raw: String,
    pub encoded: String,
}

impl CredentialAttributeValue {
    pub fn new(raw: &str) -> VcxResult<Self> {
        Ok(Self {
            raw: raw.to_owned(),
            encoded: encode_attribute(raw)?,
        })
    }
}

/// Encodes a raw attribute value as a decimal integer string.
///
/// Values that parse as a 32-bit signed integer are their own encoding; anything else is the
/// SHA-256 digest of its UTF-8 bytes read as a big-endian unsigned integer.
pub fn encode_attribute(raw: &str) -> VcxResult<String> {
    if let Ok(number) = raw.parse::<i32>() {
        return Ok(number.to_string());
    }
    let digest = sha256(raw.as_bytes());
    BigNum::from_slice(&digest)
        .and_then(|bn| bn.to_dec_str())
        .map(|dec| dec.to_string())
        .map_err(|err| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::EncodeError,
                format!("Cannot encode attribute value {raw:?}: {err}"),
            )
        })
}

/// Maps every attribute of a credential preview to its raw and encoded value.
pub fn encode_preview(
    preview: &CredentialPreviewV1,
) -> VcxResult<HashMap<String, CredentialAttributeValue>> {
    let mut values = HashMap::with_capacity(preview.attributes.len());
    for attr in &preview.attributes {
        if attr.name.is_empty() {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidAttributesStructure,
                "Credential preview contains an attribute without a name",
            ));
        }
        if values
            .insert(attr.name.clone(), CredentialAttributeValue::new(&attr.value)?)
            .is_some()
        {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidAttributesStructure,
                format!("Duplicate attribute {:?} in credential preview", attr.name),
            ));
        }
    }
    Ok(values)
}
