//! Interface adapters exposing the application over transports

pub mod http;
