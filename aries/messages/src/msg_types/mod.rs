//! Message type identifiers for the `issue-credential/1.0` protocol.
//!
//! A message type is written as `<prefix>/<protocol>/<major>.<minor>/<kind>`. Two prefixes are
//! in circulation for the same protocol: the current `https://didcomm.org` one and the legacy
//! `did:sov:BzCbsNYhMrjHiqZDTUASHg;spec` one. Both resolve to the same [`MessageType`] kind, so
//! code downstream of parsing never has to care which spelling arrived on the wire.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, EnumString};

use crate::error::{MsgTypeError, MsgTypeResult};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Prefix {
    #[default]
    DidCommOrg,
    DidSov,
}

impl Prefix {
    pub const DID_COM_ORG_PREFIX: &'static str = "https://didcomm.org";
    pub const DID_SOV_PREFIX: &'static str = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec";

    pub const ALL: [Prefix; 2] = [Prefix::DidSov, Prefix::DidCommOrg];

    /// Splits the prefix off a full message type string, returning the recognized prefix and the
    /// remainder (without the separating slash).
    fn split(s: &str) -> MsgTypeResult<(Self, &str)> {
        let (prefix, rest) = if let Some(rest) = s.strip_prefix(Self::DID_COM_ORG_PREFIX) {
            (Self::DidCommOrg, rest)
        } else if let Some(rest) = s.strip_prefix(Self::DID_SOV_PREFIX) {
            (Self::DidSov, rest)
        } else {
            return Err(MsgTypeError::unknown_prefix(s.to_owned()));
        };

        rest.strip_prefix('/')
            .map(|rest| (prefix, rest))
            .ok_or_else(|| MsgTypeError::not_found("protocol name"))
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        match self {
            Prefix::DidCommOrg => Prefix::DID_COM_ORG_PREFIX,
            Prefix::DidSov => Prefix::DID_SOV_PREFIX,
        }
    }
}

#[derive(Copy, Clone, Debug, AsRefStr, EnumString, PartialEq, Eq, Hash)]
#[strum(serialize_all = "kebab-case")]
pub enum CredentialIssuanceTypeV1_0 {
    OfferCredential,
    ProposeCredential,
    RequestCredential,
    IssueCredential,
    Ack,
    CredentialPreview,
}

impl CredentialIssuanceTypeV1_0 {
    pub const PROTOCOL: &'static str = "issue-credential";
    pub const MAJOR: u8 = 1;
    pub const MINOR: u8 = 0;
}

/// A fully resolved `issue-credential/1.0` message type.
///
/// Equality takes the prefix into account, so the legacy and current spellings of a kind are
/// distinct values that nonetheless share the same [`MessageType::kind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageType {
    pub prefix: Prefix,
    pub kind: CredentialIssuanceTypeV1_0,
}

impl MessageType {
    pub fn new(prefix: Prefix, kind: CredentialIssuanceTypeV1_0) -> Self {
        Self { prefix, kind }
    }

    /// Both spellings of the given kind, legacy first.
    pub fn all_spellings(kind: CredentialIssuanceTypeV1_0) -> [Self; 2] {
        Prefix::ALL.map(|prefix| Self::new(prefix, kind))
    }

    fn next_part<'a, I>(iter: &mut I, name: &'static str) -> MsgTypeResult<&'a str>
    where
        I: Iterator<Item = &'a str>,
    {
        iter.next().ok_or_else(|| MsgTypeError::not_found(name))
    }

    /// Parses one version number. Only the canonical decimal spelling is accepted, so `01` and
    /// `+1` are rejected.
    fn version_part<'a, I>(iter: &mut I, name: &'static str) -> MsgTypeResult<u8>
    where
        I: Iterator<Item = &'a str>,
    {
        let part = Self::next_part(iter, name)?;
        let number: u8 = part.parse()?;
        if number.to_string() != part {
            return Err(MsgTypeError::NonCanonicalVersion(part.to_owned()));
        }
        Ok(number)
    }
}

impl From<CredentialIssuanceTypeV1_0> for MessageType {
    fn from(kind: CredentialIssuanceTypeV1_0) -> Self {
        Self::new(Prefix::default(), kind)
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}.{}/{}",
            self.prefix.as_ref(),
            CredentialIssuanceTypeV1_0::PROTOCOL,
            CredentialIssuanceTypeV1_0::MAJOR,
            CredentialIssuanceTypeV1_0::MINOR,
            self.kind.as_ref()
        )
    }
}

impl FromStr for MessageType {
    type Err = MsgTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, rest) = Prefix::split(s)?;
        let mut iter = rest.split('/');

        let protocol = Self::next_part(&mut iter, "protocol name")?;
        let version = Self::next_part(&mut iter, "protocol version")?;
        let kind = Self::next_part(&mut iter, "message kind")?;

        if iter.next().is_some() {
            return Err(MsgTypeError::unknown_kind(rest.to_owned()));
        }

        if protocol != CredentialIssuanceTypeV1_0::PROTOCOL {
            return Err(MsgTypeError::unknown_protocol(protocol.to_owned()));
        }

        let mut version_iter = version.split('.');
        let major = Self::version_part(&mut version_iter, "protocol major version")?;
        let minor = Self::version_part(&mut version_iter, "protocol minor version")?;

        if version_iter.next().is_some()
            || major != CredentialIssuanceTypeV1_0::MAJOR
            || minor != CredentialIssuanceTypeV1_0::MINOR
        {
            return Err(MsgTypeError::unsupported_version(major, minor));
        }

        let kind = CredentialIssuanceTypeV1_0::from_str(kind)
            .map_err(|_| MsgTypeError::unknown_kind(kind.to_owned()))?;

        Ok(Self { prefix, kind })
    }
}

impl Serialize for MessageType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'_, str>>::deserialize(deserializer)?;
        Self::from_str(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_legacy_and_https_resolve_to_same_kind() {
        let legacy =
            MessageType::from_str("did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/offer-credential")
                .unwrap();
        let https =
            MessageType::from_str("https://didcomm.org/issue-credential/1.0/offer-credential").unwrap();

        assert_eq!(legacy.kind, CredentialIssuanceTypeV1_0::OfferCredential);
        assert_eq!(legacy.kind, https.kind);
        assert_eq!(legacy.prefix, Prefix::DidSov);
        assert_eq!(https.prefix, Prefix::DidCommOrg);
        assert_ne!(legacy, https);
    }

    #[test]
    fn test_display_reproduces_wire_string() {
        for raw in [
            "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/request-credential",
            "https://didcomm.org/issue-credential/1.0/issue-credential",
        ] {
            assert_eq!(MessageType::from_str(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_serde_msg_type() {
        let msg_type = MessageType::from(CredentialIssuanceTypeV1_0::RequestCredential);
        let value = serde_json::to_value(msg_type).unwrap();
        assert_eq!(value, json!("https://didcomm.org/issue-credential/1.0/request-credential"));

        let back: MessageType = serde_json::from_value(value).unwrap();
        assert_eq!(back, msg_type);
    }

    #[test]
    fn test_unknown_prefix() {
        let err = MessageType::from_str("https://example.org/issue-credential/1.0/offer-credential")
            .unwrap_err();
        assert!(matches!(err, MsgTypeError::UnknownPrefix(_)));
    }

    #[test]
    fn test_other_protocol_rejected() {
        let err = MessageType::from_str("https://didcomm.org/present-proof/1.0/request-presentation")
            .unwrap_err();
        assert!(matches!(err, MsgTypeError::UnknownProtocol(_)));
    }

    #[test]
    fn test_other_version_rejected() {
        let err = MessageType::from_str("https://didcomm.org/issue-credential/2.0/offer-credential")
            .unwrap_err();
        assert!(matches!(err, MsgTypeError::UnsupportedVersion(2, 0)));

        let err = MessageType::from_str("https://didcomm.org/issue-credential/1.1/offer-credential")
            .unwrap_err();
        assert!(matches!(err, MsgTypeError::UnsupportedVersion(1, 1)));

        for msg_type in [
            "https://didcomm.org/issue-credential/01.0/offer-credential",
            "https://didcomm.org/issue-credential/+1.00/offer-credential",
            "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.000/request-credential",
        ] {
            let err = MessageType::from_str(msg_type).unwrap_err();
            assert!(
                matches!(err, MsgTypeError::NonCanonicalVersion(_)),
                "{msg_type} parsed as {err:?}"
            );
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = MessageType::from_str("https://didcomm.org/issue-credential/1.0/revoke-credential")
            .unwrap_err();
        assert!(matches!(err, MsgTypeError::UnknownMsgKind(_)));
    }

    #[test]
    fn test_missing_kind() {
        let err = MessageType::from_str("https://didcomm.org/issue-credential/1.0").unwrap_err();
        assert!(matches!(err, MsgTypeError::PartNotFound(_)));
    }
}
