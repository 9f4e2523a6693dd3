//! Step outputs for the invoking automation.
//!
//! The runner exposes a file path; each `key=value` line appended to it
//! becomes an output of the step.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use crate::Result;
use crate::application::Receipt;

/// Appends `receipt=<value>` to `path`, creating the file if needed.
pub fn append_receipt(path: &Path, receipt: &Receipt) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "receipt={receipt}")?;
    Ok(())
}
