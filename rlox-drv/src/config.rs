//! Run configuration: CLI flags layered over an optional `rlox.toml`.

use std::path::Path;

use rlox_util::error::RloxError;
use serde::Deserialize;

/// Bytecode-dump and execution-trace toggles, plus an ANSI color
/// toggle. Loaded from an optional config file first, then overridden
/// by whichever flags the user actually passed on the command line.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub trace_execution: bool,
    pub print_code: bool,
    pub no_color: bool,
}

impl RunConfig {
    /// Read and parse a `rlox.toml`-shaped file. Absence of the file is
    /// the caller's concern (only called when `--config` or a default
    /// path was found to exist).
    pub fn from_file(path: &Path) -> Result<Self, RloxError> {
        let text = std::fs::read_to_string(path).map_err(|source| RloxError::ReadConfig {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|err| RloxError::ReadConfig {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        })
    }

    /// Flags passed on the command line always win over the file.
    pub fn merge_flags(mut self, trace_execution: bool, print_code: bool, no_color: bool) -> Self {
        self.trace_execution |= trace_execution;
        self.print_code |= print_code;
        self.no_color |= no_color;
        self
    }
}
