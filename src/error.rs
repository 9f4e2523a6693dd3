use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use reqwest::{Method, StatusCode};

/// Broad category of a failed submission.
///
/// Every failure collapses into "no receipt", but the kind tells callers
/// which stage gave up: the network, the HTTP layer, or the endpoint itself.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// Connection, timeout or body read failure.
    Transport,
    /// Non-success HTTP status.
    Status,
    /// Success status, but the endpoint did not hand back a receipt.
    Rejected,
    /// Invalid configuration or input.
    Validation,
    /// Failed to record the receipt in the output file.
    Io,
    /// Request construction and other unexpected failures.
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    pub fn validation<S: Into<String>>(reason: S) -> Self {
        Validation {
            reason: reason.into(),
        }
        .into()
    }

    pub fn status<S: Into<String>>(
        status_code: StatusCode,
        method: Method,
        path: String,
        body: S,
    ) -> Self {
        Status {
            status_code,
            method,
            path,
            body: body.into(),
        }
        .into()
    }

    pub fn rejected<R: Into<String>, B: Into<String>>(reason: R, body: B) -> Self {
        Rejection {
            reason: reason.into(),
            body: body.into(),
        }
        .into()
    }

    pub(crate) fn transport(source: reqwest::Error) -> Self {
        Self::with_source(Kind::Transport, source)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Non-success HTTP response from the submission endpoint.
#[non_exhaustive]
#[derive(Debug)]
pub struct Status {
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    pub body: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error({}) making {} call to {} with {}",
            self.status_code, self.method, self.path, self.body
        )
    }
}

impl StdError for Status {}

/// The endpoint answered with a success status but refused the submission,
/// or answered with something that is not a submission response at all.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rejection {
    pub reason: String,
    pub body: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submission rejected ({}): {}", self.reason, self.body)
    }
}

impl StdError for Rejection {}

#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

impl From<Status> for Error {
    fn from(e: Status) -> Self {
        Error::with_source(Kind::Status, e)
    }
}

impl From<Rejection> for Error {
    fn from(e: Rejection) -> Self {
        Error::with_source(Kind::Rejected, e)
    }
}

impl From<Validation> for Error {
    fn from(e: Validation) -> Self {
        Error::with_source(Kind::Validation, e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Validation, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<hmac::digest::InvalidLength> for Error {
    fn from(e: hmac::digest::InvalidLength) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::with_source(Kind::Io, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_detail() {
        let err = Error::status(
            StatusCode::INTERNAL_SERVER_ERROR,
            Method::POST,
            "/apply/submission".to_owned(),
            "boom",
        );

        assert_eq!(err.kind(), Kind::Status, "kind should be Status");
        let status = err.downcast_ref::<Status>().expect("status detail");
        assert_eq!(status.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status.body, "boom");
        assert_eq!(
            err.to_string(),
            "Status: error(500 Internal Server Error) making POST call to /apply/submission with boom"
        );
    }

    #[test]
    fn rejection_keeps_raw_body() {
        let err = Error::rejected("success flag was false", r#"{"success":false}"#);

        assert_eq!(err.kind(), Kind::Rejected, "kind should be Rejected");
        let rejection = err.downcast_ref::<Rejection>().expect("rejection detail");
        assert_eq!(rejection.body, r#"{"success":false}"#);
        assert!(err.downcast_ref::<Status>().is_none(), "not a status error");
    }

    #[test]
    fn io_errors_map_to_io_kind() {
        let err: Error = std::io::Error::other("disk full").into();
        assert_eq!(err.kind(), Kind::Io, "kind should be Io");
    }
}
