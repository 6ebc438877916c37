//! **niri-kin** — keeps child windows with their kin.
//!
//! niri places a new window on the currently focused workspace.  When the
//! window was spawned by something living elsewhere (say, a GUI app launched
//! from a terminal three workspaces away), that is rarely where it belongs.
//! This daemon watches niri's event stream and, for every newly created
//! window, walks the process-parent chain until it reaches a process that
//! owns a tracked window, then moves the new window to that ancestor's
//! workspace (and output, when they differ).
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::Compositor`] — abstracts snapshot queries, relocation actions,
//!   and the event subscription so the daemon logic is not coupled to any
//!   specific compositor transport.
//! * [`traits::ProcessTree`] — abstracts parent-pid lookups so ancestry
//!   walks can run against a fake process table in tests.
//!
//! Concrete implementations live in [`niri`] (the `niri msg` CLI) and
//! [`process`] (procfs).

pub mod config;
pub mod daemon;
pub mod event;
pub mod niri;
pub mod placement;
pub mod process;
pub mod state;
pub mod traits;
