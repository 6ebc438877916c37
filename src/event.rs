//! Events and types used throughout niri-kin.
//!
//! This module defines the vocabulary that all components share:
//! [`Event`] describes every event-stream notification the daemon reacts
//! to, and [`Window`] / [`Workspace`] carry the slice of compositor state
//! we track.
//!
//! Events arrive from `niri msg --json event-stream` as externally tagged
//! JSON, one object per line:
//!
//! ```json
//! {"WindowOpenedOrChanged":{"window":{"id":7,"pid":4321,"workspace_id":2}}}
//! {"WindowClosed":{"id":7}}
//! ```
//!
//! niri reports far more fields per window and workspace (title, app id,
//! layout, focus state, ...) than the daemon needs; anything not listed
//! here is ignored during deserialization.  niri also emits event kinds
//! beyond these four; the subscription reader skips them.

use serde::Deserialize;

/// Process id as niri reports it (the `pid` field of a window).
pub type Pid = i32;

/// A window as reported by niri.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Window {
    /// Unique id, stable for the window's lifetime.
    pub id: u64,
    /// Owning process id.  Absent when niri could not determine the
    /// backing process of the surface.
    #[serde(default)]
    pub pid: Option<Pid>,
    /// Workspace the window currently sits on.
    #[serde(default)]
    pub workspace_id: Option<u64>,
}

/// A workspace as reported by niri.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workspace {
    /// Unique id.
    pub id: u64,
    /// Index of the workspace on its output.  Move actions address
    /// workspaces by this index, not by id.
    pub idx: u8,
    /// Name of the output the workspace lives on (e.g. `"DP-1"`).
    #[serde(default)]
    pub output: Option<String>,
}

/// Every event-stream notification the daemon handles.
///
/// The full-set variants supersede all previously tracked state of their
/// kind; the single-window variants update incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum Event {
    /// The complete window set changed.
    WindowsChanged { windows: Vec<Window> },
    /// The complete workspace set changed.
    WorkspacesChanged { workspaces: Vec<Workspace> },
    /// A window appeared, or a property of an existing window changed.
    WindowOpenedOrChanged { window: Window },
    /// A window was closed.
    WindowClosed { id: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_window_opened_or_changed() {
        let json = r#"{"WindowOpenedOrChanged":{"window":{"id":7,"pid":4321,"workspace_id":2}}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            Event::WindowOpenedOrChanged {
                window: Window {
                    id: 7,
                    pid: Some(4321),
                    workspace_id: Some(2),
                }
            }
        );
    }

    #[test]
    fn parse_window_closed() {
        let json = r#"{"WindowClosed":{"id":7}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event, Event::WindowClosed { id: 7 });
    }

    #[test]
    fn parse_windows_changed() {
        let json = r#"{"WindowsChanged":{"windows":[
            {"id":1,"pid":100,"workspace_id":1},
            {"id":2,"workspace_id":1}
        ]}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        match event {
            Event::WindowsChanged { windows } => {
                assert_eq!(windows.len(), 2);
                assert_eq!(windows[1].pid, None);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn parse_workspaces_changed() {
        let json = r#"{"WorkspacesChanged":{"workspaces":[
            {"id":1,"idx":0,"output":"DP-1"},
            {"id":2,"idx":1}
        ]}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        match event {
            Event::WorkspacesChanged { workspaces } => {
                assert_eq!(workspaces[0].output.as_deref(), Some("DP-1"));
                assert_eq!(workspaces[1].output, None);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn extra_fields_are_ignored() {
        // niri sends the full window object; we only track a subset.
        let json = r#"{"WindowOpenedOrChanged":{"window":{
            "id":3,
            "title":"Alacritty",
            "app_id":"Alacritty",
            "pid":999,
            "workspace_id":5,
            "is_focused":true,
            "layout":{"pos_in_scrolling_layout":[1,1]}
        }}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            Event::WindowOpenedOrChanged {
                window: Window {
                    id: 3,
                    pid: Some(999),
                    workspace_id: Some(5),
                }
            }
        );
    }

    #[test]
    fn null_pid_parses_as_none() {
        let json = r#"{"WindowOpenedOrChanged":{"window":{"id":4,"pid":null,"workspace_id":null}}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        match event {
            Event::WindowOpenedOrChanged { window } => {
                assert_eq!(window.pid, None);
                assert_eq!(window.workspace_id, None);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn unhandled_event_kind_fails_to_parse() {
        let json = r#"{"KeyboardLayoutsChanged":{"keyboard_layouts":{}}}"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }
}
