//! Library surface of the Codepad server, shared by the binary and the
//! integration tests.

pub mod config;
pub mod handlers;
pub mod server;
pub mod startup;
