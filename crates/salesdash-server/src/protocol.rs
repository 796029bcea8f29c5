//! WebSocket protocol messages for the salesdash server.
//!
//! Defines the message types exchanged between client and server.

use salesdash_core::{Chart, DisplaySelection, KpiCard, RenderInstruction, ViewId};
use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request the full dashboard state.
    GetState,

    /// A named UI event (`show-all`, `pick-1`..`pick-5`, `help-open`, `help-close`).
    Trigger {
        /// Event name.
        id: String,
    },
}

/// Messages sent from server to client.
///
/// Charts are only serialised, never deserialised, so this type is
/// `Serialize`-only.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage<'a> {
    /// Full dashboard state (sent on connection and on request).
    DashboardState {
        /// Identifier of this connection's session.
        session_id: SessionId,
        /// Page heading.
        title: &'static str,
        /// Page sub-heading.
        subtitle: &'static str,
        /// KPI cards in display order.
        kpis: Vec<KpiCard>,
        /// Buttons of the navigation bar.
        buttons: Vec<ButtonInfo>,
        /// Every chart, in canonical order.
        charts: Vec<&'a Chart>,
        /// Views currently shown.
        views: DisplaySelection,
        /// Whether the help dialog is open.
        help_open: bool,
    },

    /// Display state after a trigger.
    ViewState {
        /// Views to show, in order.
        views: DisplaySelection,
        /// Whether the help dialog is open.
        help_open: bool,
    },

    /// Generic error message.
    Error {
        /// Error description.
        message: String,
    },
}

impl From<RenderInstruction> for ServerMessage<'_> {
    fn from(render: RenderInstruction) -> Self {
        ServerMessage::ViewState {
            views: render.views,
            help_open: render.help_open,
        }
    }
}

/// A navigation button and the trigger it sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonInfo {
    /// Trigger name sent when pressed.
    pub trigger: String,
    /// Button caption.
    pub label: String,
}

/// The navigation bar: "All", one button per view, then "Instructions".
pub fn navigation_buttons() -> Vec<ButtonInfo> {
    let mut buttons = vec![ButtonInfo {
        trigger: "show-all".to_string(),
        label: "All".to_string(),
    }];
    buttons.extend(ViewId::ALL.into_iter().map(|view| ButtonInfo {
        trigger: format!("pick-{}", view.position()),
        label: view.button_label().to_string(),
    }));
    buttons.push(ButtonInfo {
        trigger: "help-open".to_string(),
        label: "Instructions".to_string(),
    });
    buttons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_serialization() {
        let msg = ClientMessage::Trigger {
            id: "pick-1".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"trigger\""));

        let parsed: ClientMessage = serde_json::from_str(&json).unwrap();
        match parsed {
            ClientMessage::Trigger { id } => assert_eq!(id, "pick-1"),
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_server_message_serialization() {
        let msg = ServerMessage::ViewState {
            views: DisplaySelection::single(ViewId::ByCity),
            help_open: false,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "view_state");
        assert_eq!(json["views"], serde_json::json!(["by-city"]));
    }

    #[test]
    fn test_navigation_buttons() {
        let buttons = navigation_buttons();
        assert_eq!(buttons.len(), 7);
        assert_eq!(buttons[0].label, "All");
        assert_eq!(buttons[2].trigger, "pick-2");
        assert_eq!(buttons[2].label, "Total Sales by Product Line");
        assert_eq!(buttons[6].trigger, "help-open");
    }
}
