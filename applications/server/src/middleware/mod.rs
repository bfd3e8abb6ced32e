//! Request extractors shared by handlers
pub mod request_base;

pub use request_base::RequestBase;
