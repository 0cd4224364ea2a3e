use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trialscout::config::{self, BrowserSettings, ChatSettings};
use trialscout::narrate::ChatCompletionsClient;
use trialscout::pipeline::MatchPipeline;
use trialscout::registry::ChromeTrialSource;

/// Match one patient record against recruiting clinical trials and explain
/// each match.
#[derive(Parser)]
#[command(name = "trialscout", version, about)]
struct Cli {
    /// Path to the patient's clinical-document XML file
    record: PathBuf,

    /// Condition term to search the trial registry for
    #[arg(long, default_value = config::DEFAULT_CONDITION)]
    condition: String,

    /// Directory the JSON and spreadsheet artifacts are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Chat-completion model for explanations and the summary
    #[arg(long, default_value = config::DEFAULT_CHAT_MODEL)]
    model: String,

    /// Base URL of the chat-completion service
    #[arg(long, default_value = config::DEFAULT_CHAT_BASE_URL)]
    chat_base_url: String,

    /// Results page of the trial registry
    #[arg(long, default_value = config::DEFAULT_REGISTRY_URL)]
    registry_url: String,

    /// Seconds to wait for the listing table to render
    #[arg(long, default_value_t = config::DEFAULT_ROWS_TIMEOUT_SECS)]
    rows_timeout: u64,

    /// Show the browser window while scraping
    #[arg(long)]
    headed: bool,
}

fn main() -> anyhow::Result<()> {
    // .env is optional; the credential may come from the real environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(
        record = %cli.record.display(),
        condition = %cli.condition,
        "trialscout starting"
    );

    let Some(api_key) = config::api_key_from_env() else {
        bail!(
            "No chat-service credential found; set {} in the environment or a .env file",
            config::API_KEY_VAR
        );
    };

    let chat_client = ChatCompletionsClient::new(&ChatSettings {
        base_url: cli.chat_base_url,
        api_key,
        model: cli.model,
        timeout_secs: config::DEFAULT_CHAT_TIMEOUT_SECS,
    })
    .context("Failed to build the chat client")?;

    let trial_source = ChromeTrialSource::new(BrowserSettings {
        headless: !cli.headed,
        registry_url: cli.registry_url,
        rows_timeout_secs: cli.rows_timeout,
    });

    let pipeline = MatchPipeline::new(Box::new(trial_source), Box::new(chat_client));
    let outcome = pipeline.run(&cli.record, &cli.condition, &cli.out_dir)?;

    if let Some(summary) = &outcome.history_summary {
        println!("Patient Summary:\n{summary}");
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&outcome.report.eligible_trials)?
    );

    tracing::info!(
        reviewed = outcome.trials_reviewed,
        matched = outcome.report.eligible_trials.len(),
        json = %outcome.json_path.display(),
        workbook = %outcome.workbook_path.display(),
        "Artifacts written"
    );
    Ok(())
}
