use messages::error::MsgTypeError;

use crate::errors::error::{AriesVcxError, AriesVcxErrorKind};

impl From<serde_json::Error> for AriesVcxError {
    fn from(err: serde_json::Error) -> Self {
        AriesVcxError::from_msg(AriesVcxErrorKind::InvalidJson, format!("Invalid json: {err}"))
    }
}

impl From<MsgTypeError> for AriesVcxError {
    fn from(err: MsgTypeError) -> Self {
        match err {
            MsgTypeError::InvalidAttachment(_) => {
                AriesVcxError::from_msg(AriesVcxErrorKind::InvalidMessageFormat, err.to_string())
            }
            _ => AriesVcxError::from_msg(AriesVcxErrorKind::UnsupportedMessage, err.to_string()),
        }
    }
}
