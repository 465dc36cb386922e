use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use log::warn;
use rcsnitch::host::capture::Profile;

use crate::cmd::ProfileArgs;

pub fn run(args: &ProfileArgs) -> anyhow::Result<()> {
    let file = File::open(&args.data)
        .with_context(|| format!("opening {}", args.data.display()))?;
    let profile = Profile::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a valid capture file", args.data.display()))?;

    if profile.is_empty() {
        warn!("{} holds no switch events", args.data.display());
        return Ok(());
    }
    print!("{}", profile.render());
    Ok(())
}
