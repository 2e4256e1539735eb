//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with its
//! source (`default`, `file` or `env`).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "limit": {
//!     "value": 1000,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "limit": {
            "value": config.limit,
            "source": sources.limit,
        },
        "action_timeout_secs": {
            "value": config.action_timeout_secs,
            "source": sources.action_timeout_secs,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
