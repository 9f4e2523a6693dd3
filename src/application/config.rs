use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::error::Error;

pub const DEFAULT_ENDPOINT: &str = "https://b12.io/apply/submission";

/// Everything the submitter needs, supplied by the caller.
#[derive(Clone, Debug)]
pub struct SubmitterConfig {
    pub endpoint: Url,
    pub secret: SecretString,
    /// `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
}

impl SubmitterConfig {
    pub fn new(endpoint: &str, secret: SecretString) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::validation(format!(
                "endpoint must be http(s), got scheme `{}`",
                endpoint.scheme()
            )));
        }

        Ok(Self {
            endpoint,
            secret,
            timeout: None,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
