use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::Context;
use log::{info, warn};
use rcsnitch::codes::{TriState, TriStatePair};
use rcsnitch::config::HostConfig;
use rcsnitch::host::link::HostLink;

use crate::cmd::{BlockArgs, REPEAT_INTERVAL, install_ctrlc_handler, open_link};

/// Transmissions per detected trigger in reactive mode.
const REACTIVE_REPEATS: usize = 5;

pub fn run(args: BlockArgs, config: &HostConfig) -> anyhow::Result<()> {
    info!("Starting blocker...");
    let running = install_ctrlc_handler()?;
    let mut link = open_link(config)?;

    if let Some(codes) = &args.aggressive {
        info!("Blocking the following switches continuously: {}", join(codes));
        block_aggressive(&mut link, codes, &running)?;
    } else if let Some(pairs) = &args.reactive {
        link.enable_receiver().context("enabling receiver")?;
        block_reactive(&mut link, pairs, &running)?;
    }

    info!("Stopping...");
    Ok(())
}

fn block_aggressive<P: Read + Write>(
    link: &mut HostLink<P>,
    codes: &[TriState],
    running: &AtomicBool,
) -> anyhow::Result<()> {
    while running.load(Ordering::SeqCst) {
        for code in codes {
            link.send_tri_state(code).context("sending block code")?;
            thread::sleep(REPEAT_INTERVAL);
        }
    }
    Ok(())
}

fn block_reactive<P: Read + Write>(
    link: &mut HostLink<P>,
    pairs: &[TriStatePair],
    running: &AtomicBool,
) -> anyhow::Result<()> {
    while running.load(Ordering::SeqCst) {
        let Some(value) = link.sniff_single().context("reading reports")? else {
            continue;
        };
        let Some(response) = response_for(pairs, &TriState::from_value(value)) else {
            continue;
        };

        warn!(
            "Switch {} detected, blocking {}...",
            TriState::from_value(value),
            response
        );
        for _ in 0..REACTIVE_REPEATS {
            link.send_tri_state(response).context("sending block code")?;
            thread::sleep(REPEAT_INTERVAL);
        }
    }
    Ok(())
}

/// The code to transmit when `received` matches a trigger.
fn response_for<'a>(pairs: &'a [TriStatePair], received: &TriState) -> Option<&'a TriState> {
    pairs
        .iter()
        .find(|pair| pair.trigger == *received)
        .map(|pair| &pair.response)
}

fn join(codes: &[TriState]) -> String {
    codes
        .iter()
        .map(TriState::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
