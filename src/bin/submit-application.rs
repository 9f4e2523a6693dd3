use std::io::IsTerminal as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use b12_apply::application::{
    Applicant, DEFAULT_ENDPOINT, PLACEHOLDER_RUN_LINK, Submitter, SubmitterConfig,
};
use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

/// Signs and submits a job application to the B12 apply endpoint.
#[derive(Parser)]
#[command(name = "submit-application", version, about, long_about = None)]
struct Cli {
    #[arg(long, env = "B12_NAME")]
    name: String,

    #[arg(long, env = "B12_EMAIL")]
    email: String,

    #[arg(long, env = "B12_RESUME_LINK")]
    resume_link: String,

    #[arg(long, env = "B12_REPOSITORY_LINK")]
    repository_link: String,

    /// Pre-shared HMAC key.
    #[arg(long, env = "B12_SIGNING_SECRET", hide_env_values = true)]
    signing_secret: String,

    #[arg(long, env = "B12_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout; the HTTP client default applies when omitted.
    #[arg(long, env = "B12_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Link to the automation run performing this submission.
    #[arg(long, env = "GITHUB_RUN_URL", default_value = PLACEHOLDER_RUN_LINK)]
    run_link: String,

    /// File that receives a `receipt=<value>` line on success.
    #[arg(long, env = "GITHUB_OUTPUT")]
    output: Option<PathBuf>,
}

/// Everything one run needs, resolved from arguments and environment.
struct Invocation {
    submitter: Submitter,
    applicant: Applicant,
    run_link: String,
    output: Option<PathBuf>,
}

impl Cli {
    fn into_invocation(self) -> b12_apply::Result<Invocation> {
        let mut config =
            SubmitterConfig::new(&self.endpoint, SecretString::from(self.signing_secret))?;
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        let submitter = Submitter::new(config)?;

        let applicant = Applicant::builder()
            .name(self.name)
            .email(self.email)
            .resume_link(self.resume_link)
            .repository_link(self.repository_link)
            .build();

        Ok(Invocation {
            submitter,
            applicant,
            run_link: self.run_link,
            output: self.output,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "b12_apply=info".into()),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(std::io::stdout)
        .init();

    // Help and version requests are the only parse outcomes that succeed.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _: std::io::Result<()> = err.print();
            return code;
        }
    };

    let invocation = match cli.into_invocation() {
        Ok(invocation) => invocation,
        Err(err) => {
            tracing::error!(kind = ?err.kind(), error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let result = b12_apply::run(
        &invocation.submitter,
        &invocation.applicant,
        &invocation.run_link,
        invocation.output.as_deref(),
    )
    .await;
    if let Ok(receipt) = &result {
        tracing::info!(receipt = %receipt, "submission successful");
    }

    ExitCode::from(b12_apply::exit_code(&result))
}
