use std::process::ExitCode;

use asin_core::AppConfig;
use asin_scraper::{ProductRecord, ProductScraper};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "asin-cli")]
#[command(about = "Scrape one Amazon product page and print it as JSON")]
struct Cli {
    /// Bare ASIN or any Amazon product URL containing one.
    #[arg(value_name = "ASIN_OR_URL")]
    asin_or_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version go to stdout with exit code 0.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return fail(&argument_error(&e)),
    };
    let Some(input) = cli.asin_or_url else {
        return fail("Missing ASIN or URL");
    };

    let config = match asin_core::load_app_config() {
        Ok(config) => config,
        Err(e) => return fail(&e.to_string()),
    };
    if let Err(e) = init_tracing(&config) {
        return fail(&e.to_string());
    }

    match run(&config, &input).await {
        Ok(record) => match serde_json::to_string_pretty(&record) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => fail(&e.to_string()),
        },
        Err(e) => {
            tracing::debug!(error = ?e, "scrape failed");
            fail(&e.to_string())
        }
    }
}

/// Logs go to stderr; stdout carries the JSON result only.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(config: &AppConfig, input: &str) -> anyhow::Result<ProductRecord> {
    let scraper = ProductScraper::from_config(config);
    Ok(scraper.scrape(input).await?)
}

/// First line of clap's report, without its `error: ` label.
fn argument_error(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).trim().to_owned()
}

fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}

fn fail(message: &str) -> ExitCode {
    println!("{}", error_json(message));
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            env: asin_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_owned(),
            product_base_url: "http://127.0.0.1:9".to_owned(),
            request_timeout_secs: 1,
            browser_timeout_secs: 1,
            browser_max_scrolls: 1,
            proxy: None,
            user_agents: vec!["asin-test/0.1".to_owned()],
        }
    }

    #[test]
    fn positional_argument_is_optional() {
        let cli = Cli::try_parse_from(["asin-cli"]).expect("parses without input");
        assert!(cli.asin_or_url.is_none());
    }

    #[test]
    fn positional_argument_accepts_url() {
        let cli = Cli::try_parse_from(["asin-cli", "https://www.amazon.com/dp/B000000000"])
            .expect("parses url");
        assert_eq!(
            cli.asin_or_url.as_deref(),
            Some("https://www.amazon.com/dp/B000000000")
        );
    }

    #[test]
    fn extra_argument_becomes_json_error() {
        let err = Cli::try_parse_from(["asin-cli", "B000000000", "extra"]).unwrap_err();
        assert!(err.use_stderr());

        let message = argument_error(&err);
        assert!(message.contains("extra"), "unexpected message: {message}");
        assert!(!message.starts_with("error:"));

        let value: serde_json::Value = serde_json::from_str(&error_json(&message)).unwrap();
        assert_eq!(value, json!({ "error": message }));
    }

    #[test]
    fn unknown_flag_becomes_json_error() {
        let err = Cli::try_parse_from(["asin-cli", "--bogus"]).unwrap_err();
        assert!(err.use_stderr());
        assert!(argument_error(&err).contains("--bogus"));
    }

    #[test]
    fn help_is_not_treated_as_failure() {
        let err = Cli::try_parse_from(["asin-cli", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[tokio::test]
    async fn invalid_input_reports_identifier_error() {
        let err = run(&test_config(), "definitely not a product")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid ASIN or URL");
    }
}
