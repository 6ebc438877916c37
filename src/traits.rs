//! Core traits that decouple niri-kin from any specific compositor or
//! process table.
//!
//! Every concrete backend (the `niri msg` CLI, procfs, a test harness, ...)
//! implements one of these traits.  The [`Daemon`](crate::daemon::Daemon)
//! and the [`placement`](crate::placement) engine only depend on these
//! abstractions.

use crate::event::{Event, Pid, Window, Workspace};

/// Abstraction over a compositor that can be queried, commanded, and
/// subscribed to.
///
/// An implementation might shell out to `niri msg`, or it might be a
/// canned-event stub used in tests.
///
/// # Contract
///
/// * The query methods return the complete current set of their kind.
///   Callers treat a failed query as "no data available" and skip the
///   corresponding initialization step.
/// * The move actions are best-effort.  Callers log failures and move on;
///   a rejected move leaves the window where it is.
/// * [`subscribe`](Compositor::subscribe) opens the long-lived event
///   sequence.  The returned iterator blocks on every `next()` and ends
///   only when the compositor closes the stream.  It is not restartable;
///   the daemon's lifetime is the stream's lifetime.
pub trait Compositor {
    /// The error type produced by this compositor.
    type Error: std::error::Error + Send + 'static;

    /// The blocking event sequence returned by [`subscribe`](Compositor::subscribe).
    type Events: Iterator<Item = Event>;

    /// Snapshot of the current workspace set.
    fn workspaces(&self) -> Result<Vec<Workspace>, Self::Error>;

    /// Snapshot of the current window set.
    fn windows(&self) -> Result<Vec<Window>, Self::Error>;

    /// Move a window to the workspace at `idx`.
    ///
    /// Whether the move also focuses the window is an implementation
    /// property (for niri it is the `--focus` flag, off by default so a
    /// relocated window does not steal focus).
    fn move_window_to_workspace(&self, window_id: u64, idx: u8) -> Result<(), Self::Error>;

    /// Move a window to the given output.
    ///
    /// Moving across monitors and moving across workspaces are separate
    /// operations in niri's command surface; to land a window on a
    /// workspace of another monitor, this must be issued first.
    fn move_window_to_monitor(&self, window_id: u64, output: &str) -> Result<(), Self::Error>;

    /// Open the event subscription.
    fn subscribe(&self) -> Result<Self::Events, Self::Error>;
}

/// Abstraction over the operating system's process table.
///
/// The table is read fresh on every lookup.  Processes are short-lived
/// compared to the daemon, so a cached parent edge would go stale; the OS
/// is the source of truth.
pub trait ProcessTree {
    /// Parent process id of `pid`.
    ///
    /// Returns `None` when the process no longer exists, is inaccessible,
    /// or its metadata cannot be parsed.  All of these are expected races
    /// (the process may simply have exited) and never errors.
    fn parent_of(&self, pid: Pid) -> Option<Pid>;
}
