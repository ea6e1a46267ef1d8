#![allow(clippy::large_enum_variant)]
#![deny(clippy::unwrap_used)]

#[macro_use]
extern crate log;

pub extern crate messages;

pub mod common;
pub mod config;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod protocols;
pub mod services;
pub mod storage;
