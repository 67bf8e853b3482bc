//! menor-preco - Multi-store price comparison CLI for EAN product codes
//!
//! Compares prices across Brazilian online stores, with TLS fingerprint
//! emulation for reliable scraping.

use anyhow::Result;
use clap::{Parser, Subcommand};
use menor_preco::commands::{CompareCommand, StoresCommand};
use menor_preco::config::{Config, OutputFormat};
use menor_preco::ean::Ean;
use menor_preco::input;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "menor-preco",
    version,
    about = "Multi-store price comparison CLI for EAN product codes",
    long_about = "Looks up EAN-8/EAN-13 product codes across Brazilian online stores and reports the lowest price per code."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, markdown, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true, env = "PRECO_DELAY")]
    delay: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Maximum number of codes per run
    #[arg(long, global = true)]
    max_codes: Option<usize>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PRECO_PROXY")]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare prices for EAN codes across all stores
    #[command(alias = "c")]
    Compare {
        /// EAN codes to compare (omit to read them interactively)
        codes: Vec<String>,

        /// CSV file with codes in the first column
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List registered stores
    Stores,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    // Logs go to stderr so piped report output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let config = Config::load(cli.config.as_deref())?.with_env();
    let config = apply_cli_overrides(config, &cli);

    match cli.command {
        Commands::Compare { codes, file } => {
            let eans = gather_codes(&codes, file.as_deref(), &config)?;

            let cmd = CompareCommand::new(config);
            let output = cmd.execute(&eans).await?;
            println!("{}", output);
        }

        Commands::Stores => {
            let cmd = StoresCommand::new(config);
            println!("{}", cmd.execute());
        }
    }

    Ok(())
}

/// Applies CLI overrides on top of file and environment settings. Only
/// flags that were actually given replace a value, so an absent flag never
/// clobbers a configured one.
fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(max_codes) = cli.max_codes {
        config.max_codes = max_codes;
    }
    if let Some(proxy) = &cli.proxy {
        config.proxy = Some(proxy.clone());
    }
    config
}

/// Collects codes from the CSV file, the inline arguments, or the
/// interactive prompt, in that order of precedence.
fn gather_codes(inline: &[String], file: Option<&Path>, config: &Config) -> Result<Vec<Ean>> {
    let mut eans = if let Some(path) = file {
        input::codes_from_csv(path, config.max_codes)?
    } else if !inline.is_empty() {
        input::codes_from_args(inline)
    } else {
        input::read_codes_interactive(std::io::stdin().lock(), config.max_codes)
    };

    eans.truncate(config.max_codes);
    Ok(eans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_config() -> Config {
        Config {
            timeout_secs: 30,
            delay_ms: 800,
            delay_jitter_ms: 200,
            max_codes: 40,
            format: OutputFormat::Csv,
            proxy: Some("socks5://config:1080".to_string()),
        }
    }

    #[test]
    fn test_cli_flags_override_loaded_values() {
        let cli = Cli::try_parse_from([
            "menor-preco",
            "--format",
            "json",
            "--delay",
            "50",
            "--timeout",
            "3",
            "--max-codes",
            "7",
            "--proxy",
            "socks5://flag:9050",
            "stores",
        ])
        .unwrap();

        let config = apply_cli_overrides(loaded_config(), &cli);

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.delay_ms, 50);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.max_codes, 7);
        assert_eq!(config.proxy.as_deref(), Some("socks5://flag:9050"));
        // No jitter flag exists, so the loaded value always survives
        assert_eq!(config.delay_jitter_ms, 200);
    }

    #[test]
    fn test_absent_flags_preserve_loaded_values() {
        // The delay and proxy flags also read these variables when absent
        std::env::remove_var("PRECO_DELAY");
        std::env::remove_var("PRECO_PROXY");

        let cli = Cli::try_parse_from(["menor-preco", "stores"]).unwrap();

        let config = apply_cli_overrides(loaded_config(), &cli);

        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.delay_ms, 800);
        assert_eq!(config.delay_jitter_ms, 200);
        assert_eq!(config.max_codes, 40);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.proxy.as_deref(), Some("socks5://config:1080"));
    }

    #[test]
    fn test_compare_accepts_inline_codes_and_file_flag() {
        std::env::remove_var("PRECO_DELAY");
        std::env::remove_var("PRECO_PROXY");

        let cli = Cli::try_parse_from([
            "menor-preco",
            "compare",
            "7891234567895",
            "12345670",
            "--file",
            "codes.csv",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare { codes, file } => {
                assert_eq!(codes, vec!["7891234567895", "12345670"]);
                assert_eq!(file.as_deref(), Some(Path::new("codes.csv")));
            }
            _ => panic!("expected compare subcommand"),
        }
    }
}
