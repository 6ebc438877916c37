//! Ancestor lookup and relocation decisions.
//!
//! When a new window appears, the daemon walks the window's process-parent
//! chain until it reaches a pid that owns a tracked window.  That window's
//! workspace is where the new window belongs: a terminal on workspace 3
//! spawning a GUI app should see the app open on workspace 3, not on
//! whatever workspace happens to be focused.
//!
//! Everything here is a pure decision over the [`Tracker`] and a
//! [`ProcessTree`]; issuing the actual move commands is the daemon's job.
//! Absent data at any step (process gone, untracked workspace, no ancestor)
//! means "leave the window where it is", never an error.

use crate::event::{Pid, Window};
use crate::state::Tracker;
use crate::traits::ProcessTree;
use std::collections::HashSet;

/// A relocation the daemon should carry out for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Window to move.
    pub window_id: u64,
    /// Target workspace index.
    pub target_idx: u8,
    /// Output to move to first, when the ancestor sits on a different
    /// monitor than the window currently does.
    pub output: Option<String>,
}

/// Find the nearest ancestor of `pid` that owns a tracked window.
///
/// The walk starts at `pid`'s parent and ends at init (pid 1), when the
/// chain runs out, or when a pid repeats.  The kernel recycles pids, so
/// the visited set is what bounds the walk.
pub fn find_ancestor_window<P: ProcessTree>(
    proc: &P,
    tracker: &Tracker,
    pid: Pid,
) -> Option<u64> {
    let mut visited = HashSet::new();
    let mut current = proc.parent_of(pid)?;
    while current > 1 && visited.insert(current) {
        if let Some(window_id) = tracker.window_by_pid(current) {
            return Some(window_id);
        }
        current = proc.parent_of(current)?;
    }
    None
}

/// Decide whether a freshly created window should be relocated.
///
/// The caller has already classified `window` as new; this only checks
/// where it should go.  The nearest tracked ancestor is found first and
/// its workspace compared afterwards: an ancestor that already shares the
/// window's workspace ends the decision with no move, it does not send
/// the walk further up the chain.
pub fn plan<P: ProcessTree>(proc: &P, tracker: &Tracker, window: &Window) -> Option<Relocation> {
    let pid = window.pid?;
    let current_ws = window.workspace_id?;

    let ancestor = find_ancestor_window(proc, tracker, pid)?;
    let ancestor_ws = tracker.window(ancestor)?.workspace_id?;
    if ancestor_ws == current_ws {
        return None;
    }

    let target = tracker.workspace(ancestor_ws)?;

    // A monitor move needs both outputs known; with either side missing
    // the workspace move alone is still issued.
    let current_output = tracker
        .workspace(current_ws)
        .and_then(|ws| ws.output.as_deref());
    let output = match (target.output.as_deref(), current_output) {
        (Some(to), Some(from)) if to != from => Some(to.to_string()),
        _ => None,
    };

    Some(Relocation {
        window_id: window.id,
        target_idx: target.idx,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Workspace;
    use std::collections::HashMap;

    /// A process table defined by fixed parent edges.
    struct FakeTree {
        parents: HashMap<Pid, Pid>,
    }

    impl FakeTree {
        fn new(edges: &[(Pid, Pid)]) -> Self {
            Self {
                parents: edges.iter().copied().collect(),
            }
        }
    }

    impl ProcessTree for FakeTree {
        fn parent_of(&self, pid: Pid) -> Option<Pid> {
            self.parents.get(&pid).copied()
        }
    }

    fn tracker_with(windows: &[(u64, Pid, u64)], workspaces: &[(u64, u8, Option<&str>)]) -> Tracker {
        let mut tracker = Tracker::new();
        let windows: Vec<Window> = windows
            .iter()
            .map(|&(id, pid, ws)| Window {
                id,
                pid: Some(pid),
                workspace_id: Some(ws),
            })
            .collect();
        tracker.replace_all_windows(&windows);
        let workspaces: Vec<Workspace> = workspaces
            .iter()
            .map(|&(id, idx, output)| Workspace {
                id,
                idx,
                output: output.map(String::from),
            })
            .collect();
        tracker.replace_all_workspaces(&workspaces);
        tracker
    }

    fn new_window(id: u64, pid: Pid, workspace_id: u64) -> Window {
        Window {
            id,
            pid: Some(pid),
            workspace_id: Some(workspace_id),
        }
    }

    //  Ancestry walk

    #[test]
    fn finds_nearest_ancestor_first() {
        // 777 -> 600 -> 500 -> 400; both 600 and 400 own windows.
        let tree = FakeTree::new(&[(777, 600), (600, 500), (500, 400), (400, 300)]);
        let tracker = tracker_with(&[(20, 600, 1), (40, 400, 2)], &[]);
        assert_eq!(find_ancestor_window(&tree, &tracker, 777), Some(20));
    }

    #[test]
    fn walk_skips_untracked_intermediate_pids() {
        let tree = FakeTree::new(&[(777, 600), (600, 500)]);
        let tracker = tracker_with(&[(10, 500, 1)], &[]);
        assert_eq!(find_ancestor_window(&tree, &tracker, 777), Some(10));
    }

    #[test]
    fn walk_stops_at_init() {
        let tree = FakeTree::new(&[(777, 1), (1, 0)]);
        let tracker = tracker_with(&[(10, 1, 1)], &[]);
        assert_eq!(find_ancestor_window(&tree, &tracker, 777), None);
    }

    #[test]
    fn walk_stops_when_chain_runs_out() {
        let tree = FakeTree::new(&[(777, 600)]);
        let tracker = tracker_with(&[(10, 999, 1)], &[]);
        assert_eq!(find_ancestor_window(&tree, &tracker, 777), None);
    }

    #[test]
    fn walk_terminates_on_a_pid_cycle() {
        // Recycled pids can produce a loop in the observed chain.
        let tree = FakeTree::new(&[(777, 600), (600, 500), (500, 600)]);
        let tracker = tracker_with(&[(10, 42, 1)], &[]);
        assert_eq!(find_ancestor_window(&tree, &tracker, 777), None);
    }

    #[test]
    fn own_pid_is_not_an_ancestor() {
        // The walk starts at the parent; a window's own pid never matches.
        let tree = FakeTree::new(&[(777, 600)]);
        let tracker = tracker_with(&[(10, 777, 1)], &[]);
        assert_eq!(find_ancestor_window(&tree, &tracker, 777), None);
    }

    //  Relocation decisions

    #[test]
    fn plans_a_move_to_the_ancestor_workspace() {
        let tree = FakeTree::new(&[(777, 600), (600, 500)]);
        let tracker = tracker_with(
            &[(10, 500, 1)],
            &[(1, 0, Some("DP-1")), (2, 1, Some("DP-1"))],
        );
        let relocation = plan(&tree, &tracker, &new_window(11, 777, 2)).unwrap();
        assert_eq!(
            relocation,
            Relocation {
                window_id: 11,
                target_idx: 0,
                output: None,
            }
        );
    }

    #[test]
    fn plans_a_monitor_move_when_outputs_differ() {
        let tree = FakeTree::new(&[(777, 600), (600, 500)]);
        let tracker = tracker_with(
            &[(10, 500, 1)],
            &[(1, 0, Some("DP-2")), (2, 1, Some("DP-1"))],
        );
        let relocation = plan(&tree, &tracker, &new_window(11, 777, 2)).unwrap();
        assert_eq!(relocation.output.as_deref(), Some("DP-2"));
        assert_eq!(relocation.target_idx, 0);
    }

    #[test]
    fn no_plan_without_an_ancestor() {
        let tree = FakeTree::new(&[(777, 600)]);
        let tracker = tracker_with(&[(10, 12345, 1)], &[(1, 0, None), (2, 1, None)]);
        assert_eq!(plan(&tree, &tracker, &new_window(11, 777, 2)), None);
    }

    #[test]
    fn no_plan_when_ancestor_shares_the_workspace() {
        let tree = FakeTree::new(&[(777, 500)]);
        let tracker = tracker_with(&[(10, 500, 2)], &[(2, 1, Some("DP-1"))]);
        assert_eq!(plan(&tree, &tracker, &new_window(11, 777, 2)), None);
    }

    #[test]
    fn no_plan_without_pid_or_workspace() {
        let tree = FakeTree::new(&[(777, 500)]);
        let tracker = tracker_with(&[(10, 500, 1)], &[(1, 0, None)]);
        let no_pid = Window {
            id: 11,
            pid: None,
            workspace_id: Some(2),
        };
        let no_ws = Window {
            id: 11,
            pid: Some(777),
            workspace_id: None,
        };
        assert_eq!(plan(&tree, &tracker, &no_pid), None);
        assert_eq!(plan(&tree, &tracker, &no_ws), None);
    }

    #[test]
    fn no_plan_when_target_workspace_is_untracked() {
        let tree = FakeTree::new(&[(777, 500)]);
        // The ancestor's workspace id 1 has no record, so there is no
        // index to address the move with.
        let tracker = tracker_with(&[(10, 500, 1)], &[(2, 1, Some("DP-1"))]);
        assert_eq!(plan(&tree, &tracker, &new_window(11, 777, 2)), None);
    }

    #[test]
    fn no_monitor_move_when_an_output_is_unknown() {
        let tree = FakeTree::new(&[(777, 500)]);
        let tracker = tracker_with(&[(10, 500, 1)], &[(1, 0, Some("DP-2")), (2, 1, None)]);
        let relocation = plan(&tree, &tracker, &new_window(11, 777, 2)).unwrap();
        assert_eq!(relocation.output, None);
    }

    #[test]
    fn no_plan_when_ancestor_workspace_is_unknown() {
        let tree = FakeTree::new(&[(777, 500)]);
        let mut tracker = tracker_with(&[], &[(1, 0, None), (2, 1, None)]);
        tracker.upsert_window(&Window {
            id: 10,
            pid: Some(500),
            workspace_id: None,
        });
        assert_eq!(plan(&tree, &tracker, &new_window(11, 777, 2)), None);
    }
}
