mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use lectern::Lectern;
use lectern::domain::config::{LecternConfig, LogFormat};
use lectern::kernel::SystemClock;
use lectern::kernel::config::load_config;
use lectern_logger::{FileFormat, Logger};
use std::sync::Arc;

#[lectern_runtime::main(interactive)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config: LecternConfig = load_config(cli.config.as_deref())?;
    let _logger = init_logger(&config)?;

    let app = Lectern::init(&config, Arc::new(SystemClock)).await?;
    commands::run(&app, cli.command).await
}

/// Console output is off by default so logs never mix with command output.
fn init_logger(config: &LecternConfig) -> anyhow::Result<Option<Logger>> {
    let log = &config.log;
    let builder =
        Logger::builder().name("lectern").env_filter(log.level.as_str()).console(log.console);

    let logger = match &log.dir {
        Some(dir) => {
            let format = match log.format {
                LogFormat::Text => FileFormat::Text,
                LogFormat::Json => FileFormat::Json,
            };
            Some(builder.path(dir).format(format).init()?)
        },
        None if log.console => Some(builder.init()?),
        None => None,
    };
    Ok(logger)
}
