//! Agent level switches deciding whether the next issue-credential message is produced
//! automatically or left for the application to trigger.

use std::env;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::errors::error::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoRespondPolicy {
    /// Reply to a received credential offer with a credential request.
    #[builder(default)]
    pub auto_respond_credential_offer: bool,
    /// Reply to a received credential request by issuing the credential.
    #[builder(default)]
    pub auto_respond_credential_request: bool,
}

impl AutoRespondPolicy {
    pub const ENV_AUTO_RESPOND_OFFER: &'static str = "AUTO_RESPOND_CREDENTIAL_OFFER";
    pub const ENV_AUTO_RESPOND_REQUEST: &'static str = "AUTO_RESPOND_CREDENTIAL_REQUEST";

    pub fn from_json(config: &str) -> VcxResult<Self> {
        serde_json::from_str(config).map_err(|err| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidConfiguration,
                format!("Cannot parse auto-respond policy: {err}"),
            )
        })
    }

    /// Reads the policy from the process environment. Unset variables leave the switch off.
    pub fn from_env() -> VcxResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> VcxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| -> VcxResult<bool> {
            match lookup(key).as_deref().map(str::trim) {
                None => Ok(false),
                Some("true" | "1") => Ok(true),
                Some("false" | "0") => Ok(false),
                Some(other) => Err(AriesVcxError::from_msg(
                    AriesVcxErrorKind::InvalidConfiguration,
                    format!("Invalid boolean value {other:?} for {key}"),
                )),
            }
        };

        Ok(Self {
            auto_respond_credential_offer: flag(Self::ENV_AUTO_RESPOND_OFFER)?,
            auto_respond_credential_request: flag(Self::ENV_AUTO_RESPOND_REQUEST)?,
        })
    }
}
