use crate::config::toml_config::{PricerConfig, SessionConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "device-pricer")]
#[command(about = "Device catalog suggestions and price quotes from the calculator endpoint")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override calculator endpoint URL")]
    pub endpoint: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the device types known to the catalog
    Types,
    /// Show brand/model suggestions and component fields for a selection
    Suggest {
        #[arg(long)]
        device_type: String,
        #[arg(long)]
        brand: Option<String>,
    },
    /// Submit a price calculation and print the rendered result
    Quote(QuoteArgs),
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    #[arg(long)]
    pub device_type: String,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, help = "Value of the selected model option")]
    pub model_id: Option<String>,

    #[arg(long)]
    pub base_price: Option<String>,

    #[arg(long)]
    pub release_year: Option<String>,

    #[arg(long = "field", value_parser = parse_key_value, help = "Extra form field as key=value")]
    pub fields: Vec<(String, String)>,

    #[arg(long, help = "Session cookies, e.g. 'csrftoken=abc; sessionid=xyz'")]
    pub cookies: Option<String>,
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

impl CliConfig {
    /// 載入設定檔 (若有)，再套用命令列覆寫並驗證
    pub fn resolve(&self) -> Result<PricerConfig> {
        let mut config = match &self.config {
            Some(path) => PricerConfig::from_file(path)?,
            None => PricerConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.calculator.endpoint = endpoint.clone();
        }
        if let Some(seconds) = self.timeout_seconds {
            config.calculator.timeout_seconds = Some(seconds);
        }
        if let Command::Quote(QuoteArgs {
            cookies: Some(cookies),
            ..
        }) = &self.command
        {
            config.session = Some(SessionConfig {
                cookies: Some(cookies.clone()),
            });
        }

        config.validate()?;
        Ok(config)
    }
}
