//! Progress sink: console always, sidecar log file in mail modes

use crate::error::Result;
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Human-readable progress for one run.
///
/// Lines always go to stdout; in mail modes they are mirrored to a
/// timestamped sidecar file so a long unattended send leaves a record.
/// Single-character ticks are console-only.
pub struct RunLog {
    sidecar: Option<(PathBuf, File)>,
    ticked: bool,
}

impl RunLog {
    pub fn console_only() -> Self {
        Self {
            sidecar: None,
            ticked: false,
        }
    }

    /// Mirror lines to `marksheet-<timestamp>.log` under `dir`
    pub fn with_sidecar(dir: &Path) -> Result<Self> {
        let name = format!("marksheet-{}.log", Local::now().format("%Y%m%d-%H%M%S"));
        let path = dir.join(name);
        let file = File::create(&path)?;
        log::info!("Run log: {}", path.display());

        Ok(Self {
            sidecar: Some((path, file)),
            ticked: false,
        })
    }

    pub fn sidecar_path(&self) -> Option<&Path> {
        self.sidecar.as_ref().map(|(path, _)| path.as_path())
    }

    /// One full progress line
    pub fn line(&mut self, message: &str) {
        if self.ticked {
            println!();
            self.ticked = false;
        }
        println!("{}", message);

        if let Some((path, file)) = self.sidecar.as_mut() {
            if let Err(e) = writeln!(file, "{}", message) {
                log::warn!("Failed to write to {}: {}", path.display(), e);
            }
        }
    }

    /// Single progress character, no newline
    pub fn tick(&mut self, c: char) {
        print!("{}", c);
        let _ = std::io::stdout().flush();
        self.ticked = true;
    }
}
