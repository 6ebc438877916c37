//! Entry point for the **niri-kin** daemon.
//!
//! Builds the compositor and process-table backends, seeds the tracker
//! from snapshot queries, and then blocks on niri's event stream.  The
//! daemon's lifetime is the stream's lifetime: when niri goes away the
//! process exits, and whether it comes back is the session supervisor's
//! decision.

use log::{error, info};
use niri_kin::config::Config;
use niri_kin::daemon::Daemon;
use niri_kin::niri::msg::NiriMsg;
use niri_kin::process::Procfs;

/// Resolve the config directory (`$XDG_CONFIG_HOME/niri-kin`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("niri-kin")
}

/// Resolve the config file path: `--config <path>` wins, otherwise
/// `$XDG_CONFIG_HOME/niri-kin/config.json`.
fn config_path() -> std::path::PathBuf {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return std::path::PathBuf::from(path);
            }
        }
    }
    config_dir().join("config.json")
}

/// Try to load the config file, falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_path();
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();

    let compositor = NiriMsg::new(config.niri.command.clone(), config.placement.focus_on_move);
    let mut daemon = Daemon::new(compositor, Procfs::new());
    daemon.set_match_output(config.placement.match_output);

    daemon.load_snapshot();

    match daemon.run() {
        Ok(()) => info!("event stream closed, exiting"),
        Err(e) => {
            error!("could not subscribe to the event stream: {}", e);
            std::process::exit(1);
        }
    }
}
