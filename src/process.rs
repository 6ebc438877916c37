//! [`ProcessTree`] implementation backed by procfs.
//!
//! Parent lookups read `/proc/<pid>/status` and extract the `PPid:` field.
//! The file is re-read on every call; nothing is cached.

use crate::event::Pid;
use crate::traits::ProcessTree;

/// The live process table of the running system.
#[derive(Debug, Default)]
pub struct Procfs;

impl Procfs {
    /// Create a new handle.  Lookups open `/proc` lazily per call.
    pub fn new() -> Self {
        Self
    }
}

/// Extract the `PPid:` value from the contents of a status file.
///
/// The kernel writes one `Name:\tvalue` pair per line; `PPid` is the
/// parent's pid, or `0` for init itself.
fn parse_ppid(status: &str) -> Option<Pid> {
    let line = status.lines().find(|line| line.starts_with("PPid:"))?;
    line.split_whitespace().nth(1)?.parse().ok()
}

impl ProcessTree for Procfs {
    fn parent_of(&self, pid: Pid) -> Option<Pid> {
        // The process may exit between being reported by the compositor
        // and the read; every failure is "no parent".
        let status = std::fs::read_to_string(format!("/proc/{}/status", pid)).ok()?;
        parse_ppid(&status)
    }
}
