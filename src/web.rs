#![cfg(not(tarpaulin_include))]

use log::error;
use sheet_autoreply::app;
use sheet_autoreply::config::Config;
use sheet_autoreply::mailer::SmtpMailer;
use sheet_autoreply::sheets::GoogleSheets;

/// Main entry point for the auto-reply dashboard
///
/// Loads `.env` if present, reads configuration from the environment,
/// connects the spreadsheet and mail backends and serves the dashboard.
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let sheets = GoogleSheets::new(&config)?;
    let mailer = SmtpMailer::new(&config)?;

    app::run(config, sheets, mailer).await
}
