//! Request handlers for the JSON API.
//!
//! Hard failures use the `{"error": …}` envelope with a mapped status code.
//! The two execution endpoints (`/api/run`, `/api/shell`) are the exception:
//! they always answer 200 and encode success/error/timeout in a `type` field,
//! so clients branch on the body, not the status.

pub mod error;
pub mod files;
pub mod projects;
pub mod run;
pub mod secrets;

pub use error::ApiError;
