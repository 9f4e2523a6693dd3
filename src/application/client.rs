use reqwest::Client as ReqwestClient;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::Result;
use crate::application::{
    ApplicationRecord, Receipt, Signature, SubmissionResponse, SubmitterConfig, sign,
};
use crate::error::Error;

/// Carries the `sha256=<hex>` tag. Header names are case-insensitive on the wire.
pub const SIGNATURE_HEADER: &str = "x-signature-256";

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Posts signed application records to the configured endpoint.
///
/// Each call performs exactly one request. Failures are never retried.
#[derive(Clone, Debug)]
pub struct Submitter {
    config: SubmitterConfig,
    client: ReqwestClient,
}

impl Submitter {
    pub fn new(config: SubmitterConfig) -> Result<Self> {
        Ok(Self::with_client(config, ReqwestClient::builder().build()?))
    }

    /// Uses a caller-supplied HTTP client. `config.timeout` is applied per
    /// request and takes precedence over the client's own timeout.
    #[must_use]
    pub fn with_client(config: SubmitterConfig, client: ReqwestClient) -> Self {
        Self { config, client }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.config.endpoint
    }

    /// Serializes, signs and posts `record`.
    pub async fn submit(&self, record: &ApplicationRecord) -> Result<Receipt> {
        let payload = record.to_canonical_json()?;
        let signature = self.sign(payload.as_bytes())?;

        self.post_signed(payload, &signature).await
    }

    /// Tags `payload` with the configured secret.
    pub fn sign(&self, payload: &[u8]) -> Result<Signature> {
        sign(payload, &self.config.secret)
    }

    /// Posts already-signed canonical bytes.
    pub async fn post_signed(&self, payload: String, signature: &Signature) -> Result<Receipt> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
        headers.insert(
            HeaderName::from_static(SIGNATURE_HEADER),
            HeaderValue::from_str(&signature.to_string())?,
        );

        let mut builder = self
            .client
            .request(Method::POST, self.config.endpoint.clone())
            .headers(headers)
            .body(payload);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();

        let response = self
            .client
            .execute(request)
            .await
            .map_err(Error::transport)?;
        let status_code = response.status();

        if !status_code.is_success() {
            let body = response.text().await.unwrap_or_default();
            #[cfg(feature = "tracing")]
            tracing::warn!(
                status = %status_code,
                method = %method,
                path = %path,
                body = %body,
                "submission request failed"
            );
            return Err(Error::status(status_code, method, path, body));
        }

        let body = response.text().await.map_err(Error::transport)?;
        interpret(&body)
    }
}

fn interpret(body: &str) -> Result<Receipt> {
    let response: SubmissionResponse = serde_json::from_str(body)
        .map_err(|e| Error::rejected(format!("malformed response: {e}"), body))?;

    match response {
        SubmissionResponse {
            success: true,
            receipt: Some(receipt),
        } => {
            #[cfg(feature = "tracing")]
            tracing::info!(receipt = %receipt, "submission accepted");
            Ok(Receipt::new(receipt))
        }
        SubmissionResponse { success: true, .. } => {
            Err(Error::rejected("success without receipt", body))
        }
        SubmissionResponse { success: false, .. } => {
            Err(Error::rejected("success flag was false", body))
        }
    }
}
