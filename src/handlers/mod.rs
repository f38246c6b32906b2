//! HTTP handlers. Each one validates, calls its service and wraps the result in a keyed envelope.

pub mod articles;
pub mod comments;
pub mod endpoints;
pub mod topics;
pub mod users;
