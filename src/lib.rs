pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::terminal::TerminalRenderer;
use crate::core::config::AppConfig;
use crate::core::{Converter, CurrencyCode, FormState, Renderer};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
        swap: bool,
    },
    Currencies,
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            let from = parse_currency(from)?.unwrap_or(config.defaults.from);
            let to = parse_currency(to)?.unwrap_or(config.defaults.to);
            let converter = build_converter(
                &config,
                Arc::new(TerminalRenderer::new()),
                FormState::new(amount, from, to),
            )?;
            cli::convert::run(&converter, swap).await.map(|_| ())
        }
        AppCommand::Currencies => {
            cli::currencies::run();
            Ok(())
        }
        AppCommand::Interactive => {
            let form = FormState::new("", config.defaults.from, config.defaults.to);
            let converter = build_converter(&config, Arc::new(TerminalRenderer::new()), form)?;
            cli::interactive::run(&converter).await
        }
    }
}

fn parse_currency(code: Option<String>) -> Result<Option<CurrencyCode>> {
    code.map(|c| c.parse()).transpose()
}

/// Wires the configured provider to `renderer`.
pub fn build_converter(
    config: &AppConfig,
    renderer: Arc<dyn Renderer>,
    form: FormState,
) -> Result<Converter> {
    let provider_config = &config.providers.open_er_api;
    let provider = providers::open_er_api::OpenErApiProvider::new(
        &provider_config.base_url,
        provider_config.timeout(),
    )?;

    Ok(Converter::new(Arc::new(provider), renderer, form))
}
