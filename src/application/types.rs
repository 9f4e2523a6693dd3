use std::fmt;

use bon::Builder;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::Result;

/// Run link used when the automation environment does not provide one.
pub const PLACEHOLDER_RUN_LINK: &str =
    "https://github.com/ioanzicu/b12-application/actions/runs/placeholder";

/// Who is applying. Links are passed through verbatim and not validated.
#[non_exhaustive]
#[derive(Clone, Debug, Builder, Eq, PartialEq)]
#[builder(on(String, into))]
pub struct Applicant {
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub repository_link: String,
}

/// The signed document.
///
/// Fields are declared in alphabetical order and serialized in declaration
/// order, so the compact JSON form is the canonical byte sequence the
/// signature covers.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ApplicationRecord {
    action_run_link: String,
    email: String,
    name: String,
    repository_link: String,
    resume_link: String,
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Builds a record stamped with the current instant.
    #[must_use]
    pub fn new(applicant: &Applicant, action_run_link: &str) -> Self {
        Self::with_timestamp(applicant, action_run_link, Utc::now())
    }

    #[must_use]
    pub fn with_timestamp(
        applicant: &Applicant,
        action_run_link: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            action_run_link: action_run_link.to_owned(),
            email: applicant.email.clone(),
            name: applicant.name.clone(),
            repository_link: applicant.repository_link.clone(),
            resume_link: applicant.resume_link.clone(),
            timestamp,
        }
    }

    /// Compact JSON, keys in alphabetical order, non-ASCII left as UTF-8.
    pub fn to_canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn action_run_link(&self) -> &str {
        &self.action_run_link
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn repository_link(&self) -> &str {
        &self.repository_link
    }

    #[must_use]
    pub fn resume_link(&self) -> &str {
        &self.resume_link
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`; sub-millisecond digits are truncated.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(timestamp))
}

/// Body returned by the submission endpoint.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default)]
    pub receipt: Option<String>,
}

/// Opaque acceptance identifier issued by the endpoint.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Receipt(String);

impl Receipt {
    #[must_use]
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
