//! certbot manual-hook entry point
//!
//! Use as `--manual-auth-hook "certbot-dns-nicru perform"` and
//! `--manual-cleanup-hook "certbot-dns-nicru cleanup"`; the domain and token
//! are read from `CERTBOT_DOMAIN` / `CERTBOT_VALIDATION`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use certbot_dns_nicru::{
    Authenticator, CredentialLoader, DEFAULT_PROPAGATION_SECONDS, DESCRIPTION, MORE_INFO,
    NicruAuthenticator, PluginError, TTL, validation_name_for,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "certbot-dns-nicru", version, about = DESCRIPTION, long_about = MORE_INFO)]
struct Cli {
    /// nic.ru credentials INI file (falls back to NICRU_* variables)
    #[arg(long, global = true, env = "NICRU_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Seconds to wait for DNS to propagate after perform
    #[arg(
        long,
        global = true,
        env = "NICRU_PROPAGATION_SECONDS",
        default_value_t = DEFAULT_PROPAGATION_SECONDS
    )]
    propagation_seconds: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the challenge TXT record and wait for propagation
    Perform(ChallengeArgs),
    /// Delete the challenge TXT records
    Cleanup(ChallengeArgs),
    /// Print the record name derived for a validation name
    RecordName {
        #[arg(long)]
        validation_name: String,
    },
    /// Describe this authenticator
    Info,
}

#[derive(Args)]
struct ChallengeArgs {
    /// Domain being validated
    #[arg(long, env = "CERTBOT_DOMAIN")]
    domain: String,

    /// Validation token
    #[arg(long, env = "CERTBOT_VALIDATION")]
    validation: String,

    /// Full challenge name (default: _acme-challenge.<domain>)
    #[arg(long)]
    validation_name: Option<String>,
}

impl ChallengeArgs {
    fn validation_name(&self) -> String {
        self.validation_name
            .clone()
            .unwrap_or_else(|| validation_name_for(&self.domain))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (certbot captures hook stdout)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let expected = e
                .downcast_ref::<PluginError>()
                .is_some_and(PluginError::is_expected);
            if expected {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Info => {
            println!("{DESCRIPTION}");
            println!("{MORE_INFO}");
            println!("Record TTL: {TTL}s, default propagation wait: {DEFAULT_PROPAGATION_SECONDS}s");
            Ok(())
        }
        Command::RecordName { validation_name } => {
            let authenticator = authenticator(cli.credentials.as_deref())?;
            println!("{}", authenticator.record_name(&validation_name));
            Ok(())
        }
        Command::Perform(args) => {
            let authenticator = authenticator(cli.credentials.as_deref())?;
            let validation_name = args.validation_name();
            authenticator
                .perform(&args.domain, &validation_name, &args.validation)
                .await
                .with_context(|| format!("perform failed for {validation_name}"))?;

            if cli.propagation_seconds > 0 {
                tracing::info!(
                    "Waiting {} seconds for DNS changes to propagate",
                    cli.propagation_seconds
                );
                tokio::time::sleep(Duration::from_secs(cli.propagation_seconds)).await;
            }
            Ok(())
        }
        Command::Cleanup(args) => {
            let authenticator = authenticator(cli.credentials.as_deref())?;
            let validation_name = args.validation_name();
            authenticator
                .cleanup(&args.domain, &validation_name, &args.validation)
                .await
                .with_context(|| format!("cleanup failed for {validation_name}"))?;
            Ok(())
        }
    }
}

fn authenticator(credentials: Option<&std::path::Path>) -> anyhow::Result<NicruAuthenticator> {
    let credentials = CredentialLoader::load(credentials)?;
    tracing::debug!("Using service {} / zone {}", credentials.service, credentials.zone);
    Ok(NicruAuthenticator::new(credentials))
}
