//! Signed job application submission.
//!
//! One run builds a canonical JSON application record, signs it with
//! HMAC-SHA256 and POSTs it once to the B12 apply endpoint:
//!
//! ```text
//! Applicant ─▶ ApplicationRecord ─▶ canonical JSON ─▶ sign ─▶ POST ─▶ Receipt
//! ```
//!
//! There are no retries. The record carries a fresh timestamp, so a second
//! attempt would be a different (and differently signed) submission.
//!
//! ```no_run
//! use b12_apply::application::{Applicant, Submitter, SubmitterConfig, DEFAULT_ENDPOINT};
//! use secrecy::SecretString;
//!
//! # async fn demo() -> b12_apply::Result<()> {
//! let config = SubmitterConfig::new(DEFAULT_ENDPOINT, SecretString::from("shared-secret"))?;
//! let submitter = Submitter::new(config)?;
//! let applicant = Applicant::builder()
//!     .name("Ada Lovelace")
//!     .email("ada@example.com")
//!     .resume_link("https://example.com/ada.pdf")
//!     .repository_link("https://github.com/ada")
//!     .build();
//!
//! let receipt = b12_apply::run(&submitter, &applicant, "https://ci.example.com/runs/1", None).await?;
//! # let _ = receipt;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod error;
pub mod output;
mod run;

pub use error::Error;
pub use run::{exit_code, run};

pub type Result<T> = std::result::Result<T, Error>;
