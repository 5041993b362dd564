use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, Config, ConfigError};
use crate::contract::{ExtensionHandler, HostResponse};
use crate::core_service::{CoreService, ServiceError};
use crate::transport;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "chrome-profiles", version)]
#[command(about = "Launcher plugin that opens Chrome with a chosen user profile")]
pub struct CliOptions {
    /// Path to config.toml (defaults to the per-user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print discovered profiles as JSON and exit
    #[arg(long, conflicts_with = "query")]
    pub list: bool,

    /// Print the result list for one query and exit
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,
}

pub fn parse_cli_args<I, T>(args: I) -> Result<CliOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliOptions::try_parse_from(std::iter::once(OsString::from("chrome-profiles")).chain(
        args.into_iter().map(Into::into),
    ))
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    if let Err(error) = crate::logging::init() {
        eprintln!("[chrome-profiles] logging disabled: {error}");
    }

    let config = load_config(options.config.as_deref())?;
    log::info!(
        "startup profiles_dir={} browser_command={} config_path={}",
        config.profiles_dir.display(),
        config.browser_command,
        config.config_path.display(),
    );

    let service = CoreService::new(config)?;
    log::info!(
        "startup profiles={} browser_path={}",
        service.profiles().len(),
        service.browser_path().display()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if options.list {
        serde_json::to_writer_pretty(&mut out, service.profiles())?;
        writeln!(out)?;
        return Ok(());
    }

    if let Some(query) = options.query {
        let response = HostResponse::RenderResultList(service.render(&query));
        serde_json::to_writer_pretty(&mut out, &response)?;
        writeln!(out)?;
        return Ok(());
    }

    let stdin = std::io::stdin();
    let handled = serve(&service, stdin.lock(), out)?;
    log::info!("host closed input after {handled} requests");
    Ok(())
}

/// Answers one JSON request per input line until EOF. Returns how many requests were handled.
pub fn serve<R: BufRead, W: Write>(
    handler: &dyn ExtensionHandler,
    reader: R,
    mut writer: W,
) -> Result<usize, std::io::Error> {
    let mut handled = 0;
    for line in reader.lines() {
        let line = line?;
        let payload = line.trim();
        if payload.is_empty() {
            continue;
        }

        let reply = transport::handle_json(handler, payload);
        writeln!(writer, "{reply}")?;
        writer.flush()?;
        handled += 1;
    }
    Ok(handled)
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config, RuntimeError> {
    let config = config::load(path)?;
    if !config.config_path.exists() {
        match config::save(&config) {
            Ok(()) => log::info!(
                "wrote default config to {}",
                config.config_path.display()
            ),
            Err(error) => log::warn!("could not write default config: {error}"),
        }
    }
    Ok(config)
}
