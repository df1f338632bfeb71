//! HTTP client for the mock registration backend.
//!
//! Two operations: request a one-time passcode, and verify it while
//! registering the user. Every failure is classified into [`ApiError`];
//! no retries are attempted anywhere.

mod client;
mod error;
mod types;

pub use client::{RegistrationClient, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use types::*;
