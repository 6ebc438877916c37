//! In-memory tracking state.
//!
//! [`Tracker`] owns every mapping the daemon keeps about the compositor:
//! which windows exist, which process owns which window, and where each
//! workspace lives.  It is mutated only by the event loop, one event at a
//! time, and never performs I/O itself.
//!
//! The tracked window set always mirrors the most recent information from
//! the compositor: full-list events rebuild it wholesale, everything else
//! updates it incrementally.

use crate::event::{Pid, Window, Workspace};
use std::collections::HashMap;

/// What the tracker remembers about one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    /// Owning process id, if niri reported one.
    pub pid: Option<Pid>,
    /// Workspace the window sits on, if known.
    pub workspace_id: Option<u64>,
}

/// What the tracker remembers about one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRecord {
    /// Index used by move actions.
    pub idx: u8,
    /// Output the workspace lives on.
    pub output: Option<String>,
}

/// The daemon's complete in-memory state.
#[derive(Debug, Default)]
pub struct Tracker {
    /// `window id -> record`.  The key set is exactly the windows known
    /// to exist.
    windows: HashMap<u64, WindowRecord>,
    /// `pid -> window id`.  At most one window per pid; the most recent
    /// observation wins.
    by_pid: HashMap<Pid, u64>,
    /// `workspace id -> record`, rebuilt wholesale on every workspace
    /// event so index/output lookups are never stale.
    workspaces: HashMap<u64, WorkspaceRecord>,
}

impl Tracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    //  Bulk replacement

    /// Rebuild all window state from a full listing.
    ///
    /// Used for the startup snapshot and for `WindowsChanged` events, both
    /// of which supersede everything previously tracked.
    pub fn replace_all_windows(&mut self, windows: &[Window]) {
        self.windows.clear();
        self.by_pid.clear();
        for window in windows {
            self.insert_window(window);
        }
    }

    /// Rebuild the workspace mapping from a full listing.
    pub fn replace_all_workspaces(&mut self, workspaces: &[Workspace]) {
        self.workspaces.clear();
        for ws in workspaces {
            self.workspaces.insert(
                ws.id,
                WorkspaceRecord {
                    idx: ws.idx,
                    output: ws.output.clone(),
                },
            );
        }
    }

    //  Incremental updates

    /// Record a window observed via an open-or-changed event.
    ///
    /// Returns `true` if the id was already known.  The caller uses this
    /// to tell a brand-new window from a property change on an existing
    /// one; only brand-new windows are candidates for relocation.
    pub fn upsert_window(&mut self, window: &Window) -> bool {
        let known = self.windows.contains_key(&window.id);
        if let Some(old) = self.windows.get(&window.id) {
            if let Some(old_pid) = old.pid {
                self.by_pid.remove(&old_pid);
            }
        }
        self.insert_window(window);
        known
    }

    /// Forget a closed window.
    ///
    /// The pid mapping is only dropped if it still points at this window;
    /// the pid may already have been claimed by a newer window.
    pub fn remove_window(&mut self, id: u64) {
        if let Some(old) = self.windows.remove(&id) {
            if let Some(pid) = old.pid {
                if self.by_pid.get(&pid) == Some(&id) {
                    self.by_pid.remove(&pid);
                }
            }
        }
    }

    //  Lookups

    /// The window owned by `pid`, if any.
    pub fn window_by_pid(&self, pid: Pid) -> Option<u64> {
        self.by_pid.get(&pid).copied()
    }

    /// The tracked record for a window id.
    pub fn window(&self, id: u64) -> Option<&WindowRecord> {
        self.windows.get(&id)
    }

    /// The tracked record for a workspace id.
    pub fn workspace(&self, id: u64) -> Option<&WorkspaceRecord> {
        self.workspaces.get(&id)
    }

    /// Number of tracked windows.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn insert_window(&mut self, window: &Window) {
        self.windows.insert(
            window.id,
            WindowRecord {
                pid: window.pid,
                workspace_id: window.workspace_id,
            },
        );
        if let Some(pid) = window.pid {
            self.by_pid.insert(pid, window.id);
        }
    }
}
