use anyhow::{Context, bail};
use log::info;
use rcsnitch::config::HostConfig;

use crate::cmd::{SendArgs, open_link};

pub fn run(args: SendArgs, config: &HostConfig) -> anyhow::Result<()> {
    if let Some(code) = &args.binary {
        let mut link = open_link(config)?;
        info!("Sending binary code \"{}\"...", code);
        link.send_binary(code).context("sending binary code")?;
    } else if let Some(code) = &args.tri_state {
        let mut link = open_link(config)?;
        info!("Sending tri-state code \"{}\"...", code);
        link.send_tri_state(code).context("sending tri-state code")?;
    } else if let Some(decimal) = &args.decimal {
        let (value, bit_length) = decimal_code(decimal, config.default_bit_length)?;
        let mut link = open_link(config)?;
        info!("Sending decimal value {} with length {}...", value, bit_length);
        link.send_decimal(value, bit_length)
            .context("sending decimal code")?;
    }
    Ok(())
}

fn decimal_code(values: &[u32], default_bit_length: u16) -> anyhow::Result<(u32, u16)> {
    let (value, bit_length) = match *values {
        [value] => (value, u32::from(default_bit_length)),
        [value, bit_length] => (value, bit_length),
        _ => bail!("--decimal takes VALUE [LENGTH]"),
    };
    if bit_length == 0 || bit_length > 32 {
        bail!("bit length {bit_length} outside 1..=32");
    }
    Ok((value, bit_length as u16))
}
