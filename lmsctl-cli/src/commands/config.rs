//! Config command - show and change client settings

use anyhow::Result;
use clap::Subcommand;

use lmsctl_core::config::{Config, API_URL_ENV};

use super::{get_lmsctl_dir, warn_rejected_url};
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the API base URL, e.g. https://lms.example.com/api
    SetApiUrl {
        url: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let lmsctl_dir = get_lmsctl_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&lmsctl_dir)?;
            warn_rejected_url(&config);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "api_base_url": config.api_base_url,
                        "update_user_url": config.update_user_url(),
                        "delete_account_url": config.delete_account_url(),
                        "request_timeout_secs": config.request_timeout.as_secs(),
                    }))?
                );
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Setting", "Value"]);
            table.add_row(vec!["API base URL".to_string(), config.api_base_url.clone()]);
            table.add_row(vec!["Update endpoint".to_string(), config.update_user_url()]);
            table.add_row(vec!["Delete endpoint".to_string(), config.delete_account_url()]);
            table.add_row(vec![
                "Request timeout".to_string(),
                format!("{}s", config.request_timeout.as_secs()),
            ]);
            println!("{}", table);

            if std::env::var(API_URL_ENV).is_ok() {
                output::info(&format!("API base URL taken from {}", API_URL_ENV));
            }
        }
        ConfigCommands::SetApiUrl { url } => {
            std::fs::create_dir_all(&lmsctl_dir)?;
            let mut config = Config::load(&lmsctl_dir)?;
            config.set_api_base_url(&url)?;
            config.save(&lmsctl_dir)?;
            output::success(&format!("API base URL set to {}", config.api_base_url));

            if std::env::var(API_URL_ENV).is_ok() {
                output::warning(&format!("{} is set and still takes precedence", API_URL_ENV));
            }
        }
    }

    Ok(())
}
