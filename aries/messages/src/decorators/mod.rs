pub mod attachment;
pub mod thread;
pub mod timing;
pub mod transport;
