pub mod encoding;

pub use encoding::{encode_attribute, encode_preview, CredentialAttributeValue};
