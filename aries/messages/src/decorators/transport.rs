use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::decorators::thread::Thread;

/// The `~transport` decorator. A sender uses it to ask that replies travel back over the
/// inbound channel instead of being delivered separately.
#[derive(Clone, Debug, Deserialize, Serialize, Default, PartialEq, TypedBuilder)]
pub struct Transport {
    pub return_route: ReturnRoute,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_route_thread: Option<Thread>,
}

impl Transport {
    pub fn return_routing_requested(&self) -> bool {
        self.return_route != ReturnRoute::None
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
pub enum ReturnRoute {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "all")]
    All,
    #[serde(rename = "thread")]
    Thread,
}
