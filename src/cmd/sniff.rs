use std::fs::OpenOptions;
use std::path::Path;
use std::sync::atomic::Ordering;

use anyhow::Context;
use chrono::Local;
use log::info;
use rcsnitch::codes::TriState;
use rcsnitch::config::HostConfig;
use rcsnitch::host::capture::{CaptureRecord, CaptureWriter};

use crate::cmd::{SniffArgs, install_ctrlc_handler, open_link};

pub fn run(args: SniffArgs, config: &HostConfig) -> anyhow::Result<()> {
    info!("Starting sniffer...");
    let running = install_ctrlc_handler()?;
    let mut link = open_link(config)?;
    link.enable_receiver().context("enabling receiver")?;

    let mut capture = match &args.out {
        Some(path) => Some(open_capture(path)?),
        None => None,
    };

    while running.load(Ordering::SeqCst) {
        let values = link.sniff_multiple().context("reading reports")?;
        let now = Local::now().naive_local();

        for value in select_codes(&values, args.allowed.as_deref()) {
            let record = CaptureRecord::new(now, value);
            if let Some(writer) = capture.as_mut() {
                writer
                    .append(&record)
                    .context("writing capture file")?;
            }
            println!("{}", record.describe());
        }
    }

    info!("Stopping...");
    Ok(())
}

fn open_capture(path: &Path) -> anyhow::Result<CaptureWriter<std::fs::File>> {
    let is_new = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    CaptureWriter::new(file, is_new).with_context(|| format!("writing {}", path.display()))
}

/// Distinct values of one read window, in arrival order, restricted to
/// the allowed tri-state codes when a list is given.
fn select_codes(values: &[u32], allowed: Option<&[TriState]>) -> Vec<u32> {
    let mut selected: Vec<u32> = Vec::with_capacity(values.len());
    for &value in values {
        if selected.contains(&value) {
            continue;
        }
        if let Some(allowed) = allowed {
            if !allowed.contains(&TriState::from_value(value)) {
                continue;
            }
        }
        selected.push(value);
    }
    selected
}
