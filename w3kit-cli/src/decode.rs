//! The decode flow: compiled table back to text.

use std::fs;

use tracing::info;
use w3kit::{Encoder, Result};

use crate::Args;

pub fn run(args: &Args, encoder: &Encoder) -> Result<()> {
    let produced = encoder.decode(&args.input)?;

    let final_path = match (&args.output, produced.file_name()) {
        (Some(dir), Some(name)) => {
            fs::create_dir_all(dir)?;
            let target = dir.join(name);
            fs::rename(&produced, &target)?;
            target
        }
        _ => produced,
    };
    info!(path = %final_path.display(), "decoded");
    Ok(())
}
