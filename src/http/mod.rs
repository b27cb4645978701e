//! Thin HTTP plumbing over hyper: request/response wrappers, a pattern
//! router and the HTTP/1.1 accept loop.
//!
//! Handlers implement [`Handler`]; free functions and closures are adapted
//! through [`Router::route`]. This layer knows nothing about the domain —
//! it moves bytes and translates [`crate::error::Error`] into responses.

pub mod request;
pub mod response;
pub mod router;
pub mod server;

pub use request::Request;
pub use response::Response;
pub use router::{Handler, Router};
pub use server::HttpServer;
