use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use clap::{ArgGroup, Args, Subcommand};
use log::info;
use rcsnitch::adapters::tty::TtyPort;
use rcsnitch::codes::{BinaryCode, TriState, TriStatePair};
use rcsnitch::config::HostConfig;
use rcsnitch::host::link::HostLink;

pub mod block;
pub mod profile;
pub mod send;
pub mod sniff;

/// Pause between repeated transmissions.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a binary, tri-state or decimal code.
    Send(SendArgs),
    /// Print received codes until interrupted.
    Sniff(SniffArgs),
    /// Jam a switch, reactively or continuously.
    Block(BlockArgs),
    /// Summarise a capture file written by `sniff --out`.
    Profile(ProfileArgs),
}

pub fn run(command: Command, config: &HostConfig) -> anyhow::Result<()> {
    match command {
        Command::Send(args) => send::run(args, config),
        Command::Sniff(args) => sniff::run(args, config),
        Command::Block(args) => block::run(args, config),
        Command::Profile(args) => profile::run(&args),
    }
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("code")
        .required(true)
        .args(["binary", "tri_state", "decimal"])
))]
pub struct SendArgs {
    /// Binary code, e.g. 010100010101.
    #[arg(short = 'b', long, value_name = "BINARY")]
    pub binary: Option<BinaryCode>,
    /// Tri-state code, e.g. 0FFF0FFFFFFF.
    #[arg(short = 't', long, value_name = "TRISTATE")]
    pub tri_state: Option<TriState>,
    /// Decimal value and bit length; the length defaults to the
    /// configured bit length.
    #[arg(short = 'd', long, num_args = 1..=2, value_names = ["VALUE", "LENGTH"])]
    pub decimal: Option<Vec<u32>>,
}

#[derive(Args, Debug)]
pub struct SniffArgs {
    /// Append received codes to a capture file.
    #[arg(short = 'o', long, value_name = "OUTFILE")]
    pub out: Option<PathBuf>,
    /// Only report these tri-state codes.
    #[arg(short = 'a', long, value_name = "CODE", num_args = 1..)]
    pub allowed: Option<Vec<TriState>>,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["reactive", "aggressive"])
))]
pub struct BlockArgs {
    /// When ON is received, transmit SEND.
    #[arg(short = 'r', long, value_name = "ON:SEND", num_args = 1..)]
    pub reactive: Option<Vec<TriStatePair>>,
    /// Transmit these codes continuously.
    #[arg(short = 'a', long, value_name = "CODE", num_args = 1..)]
    pub aggressive: Option<Vec<TriState>>,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Capture file created by `sniff --out`.
    #[arg(value_name = "CSVFILE")]
    pub data: PathBuf,
}

/// Open the bridge and wait for it to come out of reset.
pub fn open_link(config: &HostConfig) -> anyhow::Result<HostLink<TtyPort>> {
    let port = TtyPort::open(
        &config.port,
        config.baud_rate,
        Duration::from_secs(config.timeout_secs),
    )
    .with_context(|| format!("opening {}", config.port))?;

    // Opening the port resets the microcontroller.
    std::thread::sleep(Duration::from_millis(config.settle_ms));
    info!("Connected to {} at {} baud", config.port, config.baud_rate);
    Ok(HostLink::new(port))
}

/// Flag cleared on Ctrl-C / SIGTERM.
pub fn install_ctrlc_handler() -> anyhow::Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
    })
    .context("signal handler setup failed")?;
    Ok(running)
}
