//! Transport layer (HTTP remoting).

pub mod http;
