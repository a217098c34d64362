pub mod api;
pub mod config;
pub mod core;
pub mod providers;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::providers::frankfurter::FrankfurterProvider;
use crate::service::RateService;

pub enum AppCommand {
    Serve,
    Convert {
        from: String,
        to: String,
        amount: f64,
    },
    History {
        base: String,
        target: String,
        range: String,
    },
    Currencies,
}

fn load_config(config_path: Option<&str>) -> Result<config::AppConfig> {
    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("xrate starting...");

    if let AppCommand::Serve = command {
        let config = load_config(config_path)?;
        return api::serve(&config).await;
    }

    println!("{}", run_query(command, config_path).await?);
    Ok(())
}

/// Runs a one-shot lookup and returns its JSON result.
pub async fn run_query(command: AppCommand, config_path: Option<&str>) -> Result<String> {
    let config = load_config(config_path)?;
    let provider = FrankfurterProvider::new(config.frankfurter_base_url());
    let service = RateService::new(Arc::new(provider));

    match command {
        AppCommand::Convert { from, to, amount } => {
            to_json(&service.convert(&from, &to, amount).await?)
        }
        AppCommand::History {
            base,
            target,
            range,
        } => to_json(&service.history(&base, &target, &range).await?),
        AppCommand::Currencies => to_json(&service.currencies().await?),
        AppCommand::Serve => anyhow::bail!("serve does not produce a query result"),
    }
}
