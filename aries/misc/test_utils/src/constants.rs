pub const AGENT_NAME: &str = "faber";
pub const INSTITUTION_DID: &str = "V4SGRU86Z58d6TV7PBUe6f";
pub const CONNECTION_ID: &str = "6a9a1f5c-3d0a-4b47-9b4f-2c8e7e0b8f11";

/// `(name, value)` pairs offered in test credential previews.
pub const DEFAULT_CREDENTIAL_ATTRS: &[(&str, &str)] = &[
    ("name", "Alice"),
    ("degree", "Maths"),
    ("age", "25"),
];
