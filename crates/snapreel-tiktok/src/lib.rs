//! Client for the TikTok content publishing API.
//!
//! Publishing is a fixed three-call sequence: initialize the upload, PUT the
//! video bytes to the short-lived URL the init call returns, then submit the
//! publish job. Any non-success response aborts the sequence and carries the
//! upstream status and body so the proxy route can relay them verbatim.

pub mod client;
pub mod error;
pub mod types;

pub use client::{TikTokClient, TikTokConfig};
pub use error::{PublishError, PublishResult};
pub use types::{PublishJob, PublishReceipt};
