//! [`Compositor`] implementation backed by the `niri msg` CLI.
//!
//! Queries and actions each spawn a short-lived `niri msg` child process
//! and wait for it to exit; the event subscription holds a long-lived
//! `niri msg --json event-stream` child whose stdout is read one line at
//! a time.  All of these calls block, which is fine for a daemon whose
//! whole job is to wait on the compositor.

use crate::event::{Event, Window, Workspace};
use crate::traits::Compositor;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::io::{BufRead, BufReader, Lines};
use std::process::{Child, ChildStdout, Command, Stdio};

/// niri-backed compositor handle.
///
/// Each method call spawns its own `niri msg` invocation; no connection
/// state is kept between calls.
pub struct NiriMsg {
    /// Binary to invoke, normally `"niri"`.
    command: String,
    /// Value of the `--focus` flag on workspace moves.
    focus_on_move: bool,
}

/// Errors that can occur when talking to niri.
#[derive(Debug, thiserror::Error)]
#[error("niri msg error: {0}")]
pub struct NiriMsgError(String);

impl NiriMsg {
    /// Create a handle that invokes `command`.
    ///
    /// `focus_on_move` decides whether a relocated window also takes the
    /// focus with it; the daemon runs with this off so background spawns
    /// stay in the background.
    pub fn new(command: impl Into<String>, focus_on_move: bool) -> Self {
        Self {
            command: command.into(),
            focus_on_move,
        }
    }

    //  niri msg helpers

    /// Run `niri msg --json <query>` and parse its stdout.
    fn query<T: DeserializeOwned>(&self, query: &str) -> Result<T, NiriMsgError> {
        let output = Command::new(&self.command)
            .args(["msg", "--json", query])
            .output()
            .map_err(|e| NiriMsgError(format!("spawn {}: {}", self.command, e)))?;
        if !output.status.success() {
            return Err(NiriMsgError(format!(
                "msg {} exited with {}",
                query, output.status
            )));
        }
        serde_json::from_slice(&output.stdout)
            .map_err(|e| NiriMsgError(format!("parse {} response: {}", query, e)))
    }

    /// Run `niri msg action <args>` and check the exit status.
    fn action(&self, args: &[&str]) -> Result<(), NiriMsgError> {
        let output = Command::new(&self.command)
            .arg("msg")
            .arg("action")
            .args(args)
            .output()
            .map_err(|e| NiriMsgError(format!("spawn {}: {}", self.command, e)))?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(NiriMsgError(format!(
                "action {:?} exited with {}: {}",
                args,
                output.status,
                stderr.trim()
            )))
        }
    }
}

impl Compositor for NiriMsg {
    type Error = NiriMsgError;
    type Events = EventStream;

    fn workspaces(&self) -> Result<Vec<Workspace>, NiriMsgError> {
        self.query("workspaces")
    }

    fn windows(&self) -> Result<Vec<Window>, NiriMsgError> {
        self.query("windows")
    }

    fn move_window_to_workspace(&self, window_id: u64, idx: u8) -> Result<(), NiriMsgError> {
        let id = window_id.to_string();
        let idx = idx.to_string();
        let focus = if self.focus_on_move { "true" } else { "false" };
        self.action(&[
            "move-window-to-workspace",
            "--window-id",
            &id,
            "--focus",
            focus,
            &idx,
        ])
    }

    fn move_window_to_monitor(&self, window_id: u64, output: &str) -> Result<(), NiriMsgError> {
        let id = window_id.to_string();
        self.action(&["move-window-to-monitor", "--id", &id, output])
    }

    fn subscribe(&self) -> Result<EventStream, NiriMsgError> {
        let mut child = Command::new(&self.command)
            .args(["msg", "--json", "event-stream"])
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| NiriMsgError(format!("spawn {} msg event-stream: {}", self.command, e)))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| NiriMsgError("event-stream child has no stdout".into()))?;
        info!("event stream opened via {}", self.command);
        Ok(EventStream {
            lines: BufReader::new(stdout).lines(),
            _child: child,
        })
    }
}

/// The blocking event subscription.
///
/// Iterates until the `niri msg event-stream` child closes its stdout,
/// which only happens when niri itself goes away.  Blank lines and lines
/// that do not decode into a handled [`Event`] are skipped; niri emits
/// several event kinds this daemon does not care about.
pub struct EventStream {
    lines: Lines<BufReader<ChildStdout>>,
    /// Kept so the child is owned for the lifetime of the stream.
    _child: Child,
}

/// Decode one stream line, or `None` if it should be skipped.
fn parse_event_line(line: &str) -> Option<Event> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<Event>(line) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!("skipping event line: {}", e);
            None
        }
    }
}

impl Iterator for EventStream {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    if let Some(event) = parse_event_line(&line) {
                        return Some(event);
                    }
                }
                Err(e) => {
                    warn!("event stream read error: {}", e);
                    return None;
                }
            }
        }
    }
}

//  Tests
