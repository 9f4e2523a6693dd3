use std::path::Path;

use crate::Result;
use crate::application::{Applicant, ApplicationRecord, Receipt, Submitter};

/// One complete submission: build, sign, post, record the receipt.
///
/// When `output` is set the receipt is appended to it as `receipt=<value>`.
/// A receipt that cannot be written still counts as a failed run.
pub async fn run(
    submitter: &Submitter,
    applicant: &Applicant,
    action_run_link: &str,
    output: Option<&Path>,
) -> Result<Receipt> {
    let result = submit_once(submitter, applicant, action_run_link, output).await;

    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        tracing::error!(kind = ?err.kind(), error = %err, "submission failed");
    }

    result
}

async fn submit_once(
    submitter: &Submitter,
    applicant: &Applicant,
    action_run_link: &str,
    output: Option<&Path>,
) -> Result<Receipt> {
    let record = ApplicationRecord::new(applicant, action_run_link);
    let payload = record.to_canonical_json()?;
    let signature = submitter.sign(payload.as_bytes())?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        endpoint = %submitter.endpoint(),
        payload = %payload,
        signature = %signature,
        "created signed payload"
    );

    let receipt = submitter.post_signed(payload, &signature).await?;

    if let Some(path) = output {
        crate::output::append_receipt(path, &receipt)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "receipt written to output file");
    }

    Ok(receipt)
}

/// Process exit status for a run: `0` with a receipt, `1` without.
#[must_use]
pub fn exit_code(result: &Result<Receipt>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
