use anyhow::Context;
use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::{env, fs};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, Default, serde::Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to Settings.toml file holding the rest of the cli options
    #[arg(short, long, env = "CONFIG_PATH")]
    pub config: Option<String>,

    /// Set the log level (default: info)
    #[arg(short, long, env = "LOG_LEVEL")]
    pub level: Option<String>,

    /// Host to listen at (default: 0.0.0.0)
    #[arg(short, long, env = "HOST")]
    pub domain: Option<String>,

    /// Port to listen on (default: 8080)
    #[arg(short, long, env = "PORT")]
    pub port: Option<String>,

    /// Comma separated origins allowed to call the api (default: *)
    #[arg(long, env = "CORS_ORIGINS")]
    pub cors_origins: Option<String>,

    /// Base url of the TMD NWP api, ex: https://data.tmd.go.th/nwpapi/v1
    #[arg(long, env = "TMD_URL")]
    pub tmd_url: Option<String>,

    /// Bearer token issued by TMD
    #[arg(long, env = "TMD_ACCESS_TOKEN", hide_env_values = true)]
    pub tmd_access_token: Option<String>,
}

impl Cli {
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or("*")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }
}

pub fn get_config_info() -> Result<Cli, anyhow::Error> {
    let cli = Cli::parse();
    match cli.config.clone() {
        Some(config_path) => read_config_file(&config_path),
        None => Ok(cli),
    }
}

/// Settings file values replace everything passed on the command line
pub fn read_config_file(config_path: &str) -> Result<Cli, anyhow::Error> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {}", config_path))?;
    let mut cli: Cli = toml::from_str(&content).context("Failed to deserialize config")?;
    cli.config = Some(config_path.to_owned());
    Ok(cli)
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    match cli.level.as_ref() {
        Some(level) => parse_level(level),
        None => parse_level(&env::var("RUST_LOG").unwrap_or_default()),
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        // keep dependency chatter out of the request logs
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stdout())
}
