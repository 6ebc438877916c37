//! The main orchestrator that ties the tracker, the placement engine, and
//! the compositor backend together.
//!
//! [`Daemon`] seeds its [`Tracker`] from snapshot queries, then consumes
//! the event subscription strictly sequentially: each event is fully
//! handled (state update plus any relocation commands) before the next
//! one is read.  Everything runs on the calling thread; there is no
//! shared state and no locking.

use crate::event::{Event, Window};
use crate::placement;
use crate::state::Tracker;
use crate::traits::{Compositor, ProcessTree};
use log::{debug, info, warn};

/// Orchestrates event handling and relocation.
///
/// The daemon is generic over any [`Compositor`] and [`ProcessTree`]
/// implementation, making it completely independent of niri or procfs.
///
/// # Typical usage
///
/// ```ignore
/// let mut daemon = Daemon::new(NiriMsg::new("niri", false), Procfs::new());
/// daemon.load_snapshot();
/// daemon.run()?;
/// ```
pub struct Daemon<C: Compositor, P: ProcessTree> {
    compositor: C,
    proc: P,
    tracker: Tracker,
    match_output: bool,
}

impl<C: Compositor, P: ProcessTree> Daemon<C, P> {
    /// Create a daemon with an empty tracker.
    pub fn new(compositor: C, proc: P) -> Self {
        Self {
            compositor,
            proc,
            tracker: Tracker::new(),
            match_output: true,
        }
    }

    /// Enable or disable the monitor-move step for ancestors on another
    /// output.  On by default.
    pub fn set_match_output(&mut self, on: bool) {
        self.match_output = on;
    }

    /// Seed the tracker from snapshot queries.
    ///
    /// A failed query is logged and skipped; the corresponding state fills
    /// in once the first full-replace event arrives.
    pub fn load_snapshot(&mut self) {
        match self.compositor.workspaces() {
            Ok(workspaces) => {
                debug!("snapshot: {} workspaces", workspaces.len());
                self.tracker.replace_all_workspaces(&workspaces);
            }
            Err(e) => warn!("workspace snapshot unavailable: {}", e),
        }
        match self.compositor.windows() {
            Ok(windows) => {
                debug!("snapshot: {} windows", windows.len());
                self.tracker.replace_all_windows(&windows);
            }
            Err(e) => warn!("window snapshot unavailable: {}", e),
        }
    }

    /// Subscribe and consume the event stream until it ends.
    ///
    /// Returns `Err` only if the subscription itself cannot be opened.
    /// The stream running dry is the daemon's normal way to finish: it
    /// means the compositor has gone away, and restarting is the session
    /// supervisor's concern, not ours.
    pub fn run(&mut self) -> Result<(), C::Error> {
        let events = self.compositor.subscribe()?;
        info!("tracking {} windows", self.tracker.window_count());
        for event in events {
            self.handle_event(event);
        }
        Ok(())
    }

    /// Apply one event to the tracker and act on it.
    ///
    /// Every failure mode in here is handled locally: missing data means
    /// no relocation, and rejected actions are logged.  One bad event
    /// must never take the loop down.
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::WindowsChanged { windows } => {
                debug!("windows changed: {} windows", windows.len());
                self.tracker.replace_all_windows(&windows);
            }
            Event::WorkspacesChanged { workspaces } => {
                debug!("workspaces changed: {} workspaces", workspaces.len());
                self.tracker.replace_all_workspaces(&workspaces);
            }
            Event::WindowOpenedOrChanged { window } => {
                let known = self.tracker.upsert_window(&window);
                if known {
                    return;
                }
                info!(
                    "new window {} (pid {:?}) on workspace {:?}",
                    window.id, window.pid, window.workspace_id
                );
                self.place(&window);
            }
            Event::WindowClosed { id } => {
                debug!("window {} closed", id);
                self.tracker.remove_window(id);
            }
        }
    }

    /// Move a freshly created window next to its nearest tracked ancestor.
    ///
    /// The monitor move, when needed, goes first: moving across monitors
    /// and across workspaces are independent niri operations, and only
    /// this order lands the window on the right physical screen.  Both
    /// commands are best-effort; a failed monitor move does not suppress
    /// the workspace move.
    fn place(&self, window: &Window) {
        let relocation = match placement::plan(&self.proc, &self.tracker, window) {
            Some(r) => r,
            None => {
                debug!("window {}: leaving in place", window.id);
                return;
            }
        };

        if self.match_output {
            if let Some(output) = &relocation.output {
                info!("moving window {} to output {}", relocation.window_id, output);
                if let Err(e) = self
                    .compositor
                    .move_window_to_monitor(relocation.window_id, output)
                {
                    warn!("move to output {} failed: {}", output, e);
                }
            }
        }

        info!(
            "moving window {} to workspace index {}",
            relocation.window_id, relocation.target_idx
        );
        if let Err(e) = self
            .compositor
            .move_window_to_workspace(relocation.window_id, relocation.target_idx)
        {
            warn!("move to workspace {} failed: {}", relocation.target_idx, e);
        }
    }
}
