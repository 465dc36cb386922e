//! `rcsnitch`: sniff, send and block 433 MHz switch codes through a
//! serial RF bridge.

#[cfg(not(unix))]
compile_error!("the rcsnitch CLI needs a unix serial device");

mod cmd;
mod logging;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rcsnitch::config::HostConfig;

use crate::cmd::Command;
use crate::logging::{LogLevel, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "rcsnitch",
    version,
    about = "Sniff and transmit 433MHz switch codes through a serial RF bridge"
)]
struct Cli {
    /// Serial port the bridge is attached to [default: /dev/ttyACM0].
    #[arg(short = 'p', long, value_name = "PORT")]
    port: Option<String>,

    /// Baud rate of the bridge [default: 9600].
    #[arg(short = 'b', long, value_name = "BAUDRATE")]
    baud_rate: Option<u32>,

    /// Read timeout in seconds [default: 5].
    #[arg(short = 't', long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// JSON host config; command-line options take precedence.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Config file (or defaults) overlaid with command-line options.
    fn host_config(&self) -> anyhow::Result<HostConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                HostConfig::from_json(&text)
                    .with_context(|| format!("loading {}", path.display()))?
            }
            None => HostConfig::default(),
        };
        if let Some(port) = &self.port {
            config.port.clone_from(port);
        }
        if let Some(baud_rate) = self.baud_rate {
            config.baud_rate = baud_rate;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let result = cli
        .host_config()
        .and_then(|config| cmd::run(cli.command, &config));

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
