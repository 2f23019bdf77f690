//! In-process HTTP server used to exercise remote retrieval in tests.

mod server;

pub use server::{LocalTestServer, TestResource};
