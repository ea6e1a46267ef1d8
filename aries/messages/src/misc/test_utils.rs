use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{msg_types::MessageType, AriesMessage};

pub fn test_serde<T>(value: T, expected: Value)
where
    for<'de> T: Serialize + Deserialize<'de> + Debug + PartialEq,
{
    let serialized = serde_json::to_value(&value).unwrap();
    assert_eq!(serialized, expected);

    let deserialized: T = serde_json::from_value(serialized).unwrap();
    assert_eq!(deserialized, value);
}

/// Serializes the message through [`AriesMessage`] and checks that the `@type` and `@id` fields
/// were added on top of the expected content.
pub fn test_msg<M>(msg: M, msg_type: MessageType, mut expected: Value)
where
    M: Into<AriesMessage>,
{
    let msg: AriesMessage = msg.into();
    let id = msg.id().to_owned();

    let obj = expected.as_object_mut().unwrap();
    obj.insert("@type".to_owned(), Value::String(msg_type.to_string()));
    obj.insert("@id".to_owned(), Value::String(id));

    test_serde(msg, expected);
}
