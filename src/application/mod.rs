//! The submission flow for a single application.
//!
//! - build the canonical record
//! - sign it with the pre-shared secret
//! - post it with the signature header and interpret the response
//!
//! Nothing here holds state between runs.

mod client;
mod config;
mod signer;
mod types;

pub use client::{SIGNATURE_HEADER, Submitter};
pub use config::{DEFAULT_ENDPOINT, SubmitterConfig};
pub use signer::{SIGNATURE_PREFIX, Signature, sign};
pub use types::{
    Applicant, ApplicationRecord, PLACEHOLDER_RUN_LINK, Receipt, SubmissionResponse,
    format_timestamp,
};
