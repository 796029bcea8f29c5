//! Dashboard session management.
//!
//! One session per WebSocket connection. A session owns the controller
//! state (display selection and help dialog) so that two browser tabs never
//! see each other's button presses. The dashboard data itself is shared
//! read-only through [`DashboardContext`].

use std::fmt;
use std::sync::Arc;

use salesdash_core::{ControllerState, DashboardContext, Event, RenderInstruction, transition};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::protocol::{ServerMessage, navigation_buttons};

/// Unique identifier of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A dashboard session.
pub struct DashboardSession {
    /// Session identifier.
    id: SessionId,

    /// Shared, immutable dashboard data.
    context: Arc<DashboardContext>,

    /// Controller state of this session only.
    state: ControllerState,
}

impl DashboardSession {
    /// Create a session showing every chart with the help dialog closed.
    pub fn new(context: Arc<DashboardContext>) -> Self {
        let id = SessionId::new();
        let (state, _) = transition(ControllerState::default(), Event::Initial);
        tracing::debug!("Session {} started", id);
        Self { id, context, state }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn context(&self) -> &DashboardContext {
        &self.context
    }

    pub fn controller(&self) -> &ControllerState {
        &self.state
    }

    /// Apply a named UI event.
    ///
    /// Unknown names are logged and leave the display unchanged.
    pub fn dispatch(&mut self, name: &str) -> RenderInstruction {
        let event = Event::parse(name);
        if let Event::Unknown(ref unknown) = event {
            tracing::warn!(
                "Session {}: ignoring unknown trigger '{}'",
                self.id,
                unknown
            );
        }

        let (next, render) = transition(self.state.clone(), event);
        self.state = next;
        tracing::debug!(
            "Session {}: {} -> {} view(s), help_open={}",
            self.id,
            name,
            render.views.len(),
            render.help_open
        );
        render
    }

    /// Full state message for this session.
    pub fn get_state(&self) -> ServerMessage<'_> {
        ServerMessage::DashboardState {
            session_id: self.id,
            title: "Sales Dashboard",
            subtitle: "Analyze Your Sales Performance",
            kpis: self.context.metrics().kpi_cards(),
            buttons: navigation_buttons(),
            charts: self.context.catalog().charts().iter().collect(),
            views: self.state.selection().clone(),
            help_open: self.state.help_open(),
        }
    }
}
