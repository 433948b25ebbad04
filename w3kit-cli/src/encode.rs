//! The encode flow: working table in, compiled tables out.

use std::fs;
use std::path::PathBuf;

use tracing::info;
use w3kit::csv::{InputDocument, OutputDocument};
use w3kit::traits::{Parser, Serializer};
use w3kit::{Encoder, Error, Result, lang};

use crate::Args;

pub fn run(args: &Args, encoder: &Encoder) -> Result<()> {
    let input = InputDocument::read_from(&args.input)?;
    let base = OutputDocument::try_from(input)?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&base)?);
        return Ok(());
    }

    let out_dir = output_dir(args)?;
    for code in target_langs(args, &base)? {
        let doc = base.clone().with_language(&code);
        // Named like a decoded table, so it never collides with the input.
        let csv_path = out_dir.join(format!("{code}.w3strings.csv"));
        doc.write_to(&csv_path)?;

        let compiled = encoder.encode(&csv_path, doc.space)?;
        let final_path = out_dir.join(format!("{code}.w3strings"));
        fs::rename(&compiled, &final_path)?;
        if !args.keep_csv {
            fs::remove_file(&csv_path)?;
        }
        info!(path = %final_path.display(), "encoded");
    }
    Ok(())
}

/// Encoded files land next to the input unless `-o` says otherwise.
fn output_dir(args: &Args) -> Result<PathBuf> {
    let dir = match &args.output {
        Some(dir) => dir.clone(),
        None => args
            .input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn target_langs(args: &Args, base: &OutputDocument) -> Result<Vec<String>> {
    match args.lang.as_deref() {
        Some("all") => Ok(lang::ALL_LANGS.iter().map(|s| s.to_string()).collect()),
        Some(code) if lang::is_supported(code) => Ok(vec![code.to_string()]),
        Some(code) => Err(Error::UnknownLanguage(code.to_string())),
        None => Ok(vec![base.lang.clone()]),
    }
}
