use serde::{Deserialize, Serialize};

/// Struct representing a complete message (apart from the `@type` field) as defined in a protocol
/// RFC. The protocol specific fields and the decorators are kept as separate types so they can be
/// processed independently.
///
/// Note that there's no hard rule about what field goes where. Some decorators, such as
/// `~attach`, are part of the protocol itself and are instrumental to processing the message,
/// so they live in the content.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MsgParts<C, D> {
    /// All standalone messages have an `id` field.
    #[serde(rename = "@id")]
    pub id: String,
    /// The protocol specific fields provided as a standalone type.
    #[serde(flatten)]
    pub content: C,
    /// The decorators this message uses, provided as a standalone type.
    #[serde(flatten)]
    pub decorators: D,
}

impl<C, D> MsgParts<C, D> {
    pub fn with_decorators(id: String, content: C, decorators: D) -> Self {
        Self {
            id,
            content,
            decorators,
        }
    }
}

impl<C, D: Default> MsgParts<C, D> {
    pub fn new(id: String, content: C) -> Self {
        Self::with_decorators(id, content, D::default())
    }
}
