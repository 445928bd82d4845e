//! leadform - submit contact/lead forms from the command line
//!
//! ## Commands
//!
//! - `submit`: validate a lead and hand it to the backend
//! - `validate`: check a lead without sending it
//! - `solutions`: list the product solutions a lead can pick

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use leadform_core::{
    serialize, validate, Clock, FieldName, HttpSender, HttpSenderConfig, LeadSender, LogFormat,
    Notification, NotificationKind, NotificationTemplates, Notifier, ProductSolution,
    RawFieldSet, SimulatedSender, SubmissionController, SubmitOutcome, SystemClock,
    ValidationError, METRICS,
};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "leadform")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate and submit lead contact forms", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a lead and send it to the backend
    Submit {
        #[command(flatten)]
        form: FormArgs,

        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Validate a lead and print the record that would be sent
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },

    /// List selectable product solutions
    Solutions,
}

/// Form values; flags override values loaded with `--from-file`.
#[derive(Args, Debug, Default)]
struct FormArgs {
    /// JSON file with form values keyed by field name (e.g. `firstName`)
    #[arg(long)]
    from_file: Option<PathBuf>,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    company: Option<String>,

    #[arg(long)]
    position: Option<String>,

    #[arg(long)]
    business_type: Option<String>,

    #[arg(long)]
    message: Option<String>,

    /// One of the values printed by `leadform solutions`
    #[arg(long)]
    solution: Option<String>,
}

#[derive(Args, Debug)]
struct BackendArgs {
    /// Backend URL; when unset, a simulated backend accepts the lead
    #[arg(long, env = "LEADFORM_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer token for the backend
    #[arg(long, env = "LEADFORM_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Backend request timeout in milliseconds
    #[arg(long, env = "LEADFORM_TIMEOUT_MS", default_value_t = 10_000)]
    timeout_ms: u64,

    /// Delay of the simulated backend in milliseconds
    #[arg(long, env = "LEADFORM_SIMULATED_DELAY_MS", default_value_t = 2_000)]
    delay_ms: u64,

    /// Backend failure reasons that may be shown verbatim (comma-separated)
    #[arg(long = "show-reason", env = "LEADFORM_SHOWN_REASONS", value_delimiter = ',')]
    shown_reasons: Vec<String>,
}

impl FormArgs {
    fn into_fields(self) -> Result<RawFieldSet> {
        let mut fields = match &self.from_file {
            Some(path) => load_fields(path)?,
            None => RawFieldSet::new(),
        };

        let overrides = [
            (FieldName::FirstName, self.first_name),
            (FieldName::LastName, self.last_name),
            (FieldName::Email, self.email),
            (FieldName::Phone, self.phone),
            (FieldName::Company, self.company),
            (FieldName::Position, self.position),
            (FieldName::BusinessType, self.business_type),
            (FieldName::Message, self.message),
            (FieldName::SelectedSolution, self.solution),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                fields.set(field, value);
            }
        }

        Ok(fields)
    }
}

fn load_fields(path: &Path) -> Result<RawFieldSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid form file {:?}", path))
}

/// Prints notifications to stdout, like a toast in a terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let mark = match notification.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
        };
        println!("{} {}", mark, notification.title);
        println!("  {}", notification.description);
    }
}

fn build_sender(backend: &BackendArgs) -> Result<Arc<dyn LeadSender>> {
    match &backend.endpoint {
        Some(endpoint) => {
            let mut config = HttpSenderConfig::new(endpoint)
                .with_timeout(Duration::from_millis(backend.timeout_ms));
            if let Some(token) = &backend.token {
                config = config.with_token(token);
            }
            info!(endpoint = %endpoint, "using HTTP backend");
            Ok(Arc::new(
                HttpSender::new(config).context("Failed to create HTTP backend")?,
            ))
        }
        None => {
            info!(delay_ms = backend.delay_ms, "using simulated backend");
            Ok(Arc::new(SimulatedSender::new(Duration::from_millis(
                backend.delay_ms,
            ))))
        }
    }
}

fn print_validation_errors(errors: &[ValidationError]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(errors)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    leadform_core::init_tracing(LogFormat::from_json_flag(cli.json), level);

    let result = match cli.command {
        Commands::Submit { form, backend } => cmd_submit(form, &backend).await,
        Commands::Validate { form } => cmd_validate(form),
        Commands::Solutions => cmd_solutions(cli.json),
    };

    METRICS.flush();
    result
}

async fn cmd_submit(form: FormArgs, backend: &BackendArgs) -> Result<()> {
    let fields = form.into_fields()?;
    let sender = build_sender(backend)?;

    let templates = backend
        .shown_reasons
        .iter()
        .filter(|r| !r.trim().is_empty())
        .fold(NotificationTemplates::default(), |t, r| {
            t.with_shown_reason(r.trim())
        });
    let controller =
        SubmissionController::new(sender, Arc::new(ConsoleNotifier)).with_templates(templates);

    println!("Submitting...");
    match controller.submit(fields).await {
        SubmitOutcome::Succeeded => Ok(()),
        SubmitOutcome::Rejected(errors) => {
            println!("✗ Please fix the following fields:");
            print_validation_errors(&errors)?;
            anyhow::bail!("{} field(s) failed validation", errors.len())
        }
        SubmitOutcome::Failed(_) => anyhow::bail!("Submission failed"),
        SubmitOutcome::Ignored => anyhow::bail!("A submission is already in progress"),
    }
}

fn cmd_validate(form: FormArgs) -> Result<()> {
    let fields = form.into_fields()?;

    match validate(&fields) {
        Ok(validated) => {
            let record = serialize(&validated, SystemClock.now());
            println!("✓ Valid");
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Err(errors) => {
            print_validation_errors(&errors)?;
            anyhow::bail!("{} field(s) failed validation", errors.len())
        }
    }
}

fn cmd_solutions(json: bool) -> Result<()> {
    if json {
        let list: Vec<_> = ProductSolution::ALL
            .iter()
            .map(|s| serde_json::json!({"value": s.as_str(), "label": s.label()}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for solution in ProductSolution::ALL {
            println!("{:<24} {}", solution.as_str(), solution.label());
        }
    }
    Ok(())
}
