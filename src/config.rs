//! Editor configuration.

use crate::error::{Error, Result};
use std::time::Duration;

/// Environment variable overriding the tab stop.
pub const ENV_TAB_STOP: &str = "KILT_TAB_STOP";

/// Environment variable overriding the number of confirmations needed to quit.
pub const ENV_QUIT_TIMES: &str = "KILT_QUIT_TIMES";

/// Tunables shared by the row store, the renderer and the input loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Width of a tab cell in render columns.
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses required to quit with unsaved changes.
    pub quit_times: u32,
    /// How long a status message stays on the message bar.
    pub message_timeout: Duration,
    /// Raw-mode read timeout in deciseconds (termios `VTIME`).
    pub read_timeout_ds: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: 8,
            quit_times: 3,
            message_timeout: Duration::from_secs(5),
            read_timeout_ds: 1,
        }
    }
}

impl EditorConfig {
    /// Default configuration with `KILT_TAB_STOP` / `KILT_QUIT_TIMES` applied.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_TAB_STOP) {
            config.set_tab_stop(&value)?;
        }
        if let Some(value) = lookup(ENV_QUIT_TIMES) {
            config.set_quit_times(&value)?;
        }
        Ok(config)
    }

    /// Parse and apply a tab stop value.
    pub fn set_tab_stop(&mut self, value: &str) -> Result<()> {
        match value.trim().parse::<usize>() {
            Ok(n) if (1..=64).contains(&n) => {
                self.tab_stop = n;
                Ok(())
            }
            _ => Err(Error::InvalidConfig(format!(
                "tab stop {value:?} (must be an integer in 1..=64)"
            ))),
        }
    }

    /// Parse and apply a quit confirmation count.
    pub fn set_quit_times(&mut self, value: &str) -> Result<()> {
        match value.trim().parse::<u32>() {
            Ok(n) => {
                self.quit_times = n;
                Ok(())
            }
            Err(_) => Err(Error::InvalidConfig(format!(
                "quit times {value:?} (must be a non-negative integer)"
            ))),
        }
    }
}
