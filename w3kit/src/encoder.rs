//! Child-process wrapper for the external `w3strings` encoder.
//!
//! The encoder is a black box: it takes a file path and flags, produces an
//! output file next to the input, and reports through its exit status and
//! stdout. Its log lines are prefixed `INFO`/`WARN`/`ERROR` and get relayed
//! through our own logger at the matching level; stderr carries nothing
//! useful and is discarded.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};

/// Flag disabling the encoder's id-range check.
pub const FORCE_IGNORE_FLAG: &str = "--force-ignore-id-space-check-i-know-what-i-am-doing";

/// Handle to the external encoder executable.
#[derive(Debug, Clone)]
pub struct Encoder {
    exe: PathBuf,
}

impl Encoder {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Encoder { exe: exe.into() }
    }

    /// Finds the encoder next to the current executable, falling back to a
    /// plain `w3strings` PATH lookup.
    pub fn locate() -> Self {
        if let Ok(me) = std::env::current_exe()
            && let Some(dir) = me.parent()
        {
            for name in ["w3strings", "w3strings.exe"] {
                let candidate = dir.join(name);
                if candidate.exists() {
                    return Encoder::new(candidate);
                }
            }
        }
        Encoder::new("w3strings")
    }

    /// Decodes a compiled table into text form, producing `<path>.csv`.
    pub fn decode(&self, path: &Path) -> Result<PathBuf> {
        self.run(|cmd| {
            cmd.arg("-d").arg(path);
        })?;
        Ok(sibling(path, "csv"))
    }

    /// Encodes a text table, producing `<path>.w3strings`. With no id space
    /// to enforce, the range check is disabled instead.
    pub fn encode(&self, csv: &Path, space: Option<u32>) -> Result<PathBuf> {
        self.run(|cmd| {
            cmd.arg("-e").arg(csv);
            match space {
                Some(space) => {
                    cmd.arg("-i").arg(space.to_string());
                }
                None => {
                    warn!("no id space to enforce, disabling the encoder's range check");
                    cmd.arg(FORCE_IGNORE_FLAG);
                }
            }
        })?;
        Ok(sibling(csv, "w3strings"))
    }

    /// Blocking invocation; relays stdout, fails on non-zero exit.
    fn run(&self, configure: impl FnOnce(&mut Command)) -> Result<()> {
        let mut cmd = Command::new(&self.exe);
        configure(&mut cmd);
        cmd.stdout(Stdio::piped()).stderr(Stdio::null());
        debug!(exe = %self.exe.display(), "invoking encoder");

        let output = cmd.output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::EncoderNotFound(self.exe.clone())
            } else {
                Error::Io(e)
            }
        })?;

        relay(&String::from_utf8_lossy(&output.stdout));

        if !output.status.success() {
            return Err(Error::EncoderFailed(output.status.code().unwrap_or(-1)));
        }
        Ok(())
    }
}

/// Routes the encoder's leveled stdout lines through our logger.
fn relay(stdout: &str) {
    for line in stdout.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("ERROR") {
            error!(target: "w3strings", "{}", rest.trim_start());
        } else if let Some(rest) = line.strip_prefix("WARN") {
            warn!(target: "w3strings", "{}", rest.trim_start());
        } else if let Some(rest) = line.strip_prefix("INFO") {
            info!(target: "w3strings", "{}", rest.trim_start());
        } else {
            debug!(target: "w3strings", "{line}");
        }
    }
}

/// Output path the encoder produces: the input path with `ext` appended.
fn sibling(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
