//! View-state controller.
//!
//! Maps UI triggers to the set of charts on screen and to the visibility of
//! the help dialog. Everything here is a pure function of its inputs, so the
//! dispatcher only has to feed events in and render what comes out:
//!
//! ```text
//! (ControllerState, Event) ──transition──► (ControllerState, RenderInstruction)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::view::{DisplaySelection, ViewId};

/// A named UI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// "All" button.
    ShowAll,
    /// One of the five view buttons.
    Pick(ViewId),
    /// "Instructions" button.
    HelpOpen,
    /// "Close" button of the help dialog.
    HelpClose,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::ShowAll => f.write_str("show-all"),
            Trigger::Pick(view) => write!(f, "pick-{}", view.position()),
            Trigger::HelpOpen => f.write_str("help-open"),
            Trigger::HelpClose => f.write_str("help-close"),
        }
    }
}

impl FromStr for Trigger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show-all" => Ok(Trigger::ShowAll),
            "help-open" => Ok(Trigger::HelpOpen),
            "help-close" => Ok(Trigger::HelpClose),
            _ => s
                .strip_prefix("pick-")
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(ViewId::from_position)
                .map(Trigger::Pick)
                .ok_or_else(|| Error::UnknownTrigger(s.to_string())),
        }
    }
}

/// Next display selection for `trigger`.
///
/// `None` is the initial render. Help triggers do not touch the selection.
pub fn select(previous: &DisplaySelection, trigger: Option<Trigger>) -> DisplaySelection {
    match trigger {
        None | Some(Trigger::ShowAll) => DisplaySelection::all(),
        Some(Trigger::Pick(view)) => DisplaySelection::single(view),
        Some(Trigger::HelpOpen | Trigger::HelpClose) => previous.clone(),
    }
}

/// Cumulative press counts of the two help-dialog buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickCounts {
    pub open: u64,
    pub close: u64,
}

/// New dialog visibility given the current and last-seen press counts.
///
/// Any newly observed press, from either button, inverts the flag once.
pub fn toggle_help(counts: ClickCounts, last_seen: ClickCounts, previous_open: bool) -> bool {
    if counts.open > last_seen.open || counts.close > last_seen.close {
        !previous_open
    } else {
        previous_open
    }
}

/// Help dialog flag plus the press counts it has already reacted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpDialog {
    open: bool,
    seen: ClickCounts,
}

impl HelpDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Feed the latest counts; returns the new visibility.
    pub fn observe(&mut self, counts: ClickCounts) -> bool {
        self.open = toggle_help(counts, self.seen, self.open);
        self.seen = ClickCounts {
            open: self.seen.open.max(counts.open),
            close: self.seen.close.max(counts.close),
        };
        self.open
    }
}

/// Input to [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// First render, before any button press.
    Initial,
    /// A recognised trigger.
    Trigger(Trigger),
    /// An event name that is not a trigger; leaves the state unchanged.
    Unknown(String),
}

impl Event {
    /// Turn an event name into an [`Event`], keeping unknown names.
    pub fn parse(name: &str) -> Self {
        match name.parse::<Trigger>() {
            Ok(trigger) => Event::Trigger(trigger),
            Err(_) => Event::Unknown(name.to_string()),
        }
    }
}

/// What the dispatcher should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    pub views: DisplaySelection,
    pub help_open: bool,
}

/// Controller state of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    selection: DisplaySelection,
    clicks: ClickCounts,
    help: HelpDialog,
}

impl ControllerState {
    pub fn selection(&self) -> &DisplaySelection {
        &self.selection
    }

    pub fn help_open(&self) -> bool {
        self.help.is_open()
    }

    /// Help button presses seen so far.
    pub fn clicks(&self) -> ClickCounts {
        self.clicks
    }

    pub fn render(&self) -> RenderInstruction {
        RenderInstruction {
            views: self.selection.clone(),
            help_open: self.help.is_open(),
        }
    }
}

/// Advance the controller by one event.
pub fn transition(state: ControllerState, event: Event) -> (ControllerState, RenderInstruction) {
    let mut next = state;
    match event {
        Event::Initial => {
            next.selection = select(&next.selection, None);
        }
        Event::Trigger(trigger) => {
            next.selection = select(&next.selection, Some(trigger));
            match trigger {
                Trigger::HelpOpen => next.clicks.open += 1,
                Trigger::HelpClose => next.clicks.close += 1,
                Trigger::ShowAll | Trigger::Pick(_) => {}
            }
            next.help.observe(next.clicks);
        }
        Event::Unknown(_) => {}
    }
    let render = next.render();
    (next, render)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: &[&str]) -> ControllerState {
        events.iter().fold(ControllerState::default(), |state, name| {
            transition(state, Event::parse(name)).0
        })
    }

    #[test]
    fn test_trigger_parsing() {
        assert_eq!("show-all".parse::<Trigger>().unwrap(), Trigger::ShowAll);
        assert_eq!(
            "pick-3".parse::<Trigger>().unwrap(),
            Trigger::Pick(ViewId::ByCity)
        );
        assert_eq!("help-close".parse::<Trigger>().unwrap(), Trigger::HelpClose);
        for bad in ["pick-0", "pick-6", "pick-x", "tab1", "", "SHOW-ALL"] {
            let err = bad.parse::<Trigger>().unwrap_err();
            assert!(matches!(err, Error::UnknownTrigger(ref s) if s == bad));
        }
    }

    #[test]
    fn test_trigger_display_roundtrip() {
        let mut triggers = vec![Trigger::ShowAll, Trigger::HelpOpen, Trigger::HelpClose];
        triggers.extend(ViewId::ALL.map(Trigger::Pick));
        for trigger in triggers {
            assert_eq!(trigger.to_string().parse::<Trigger>().unwrap(), trigger);
        }
    }

    #[test]
    fn test_select_all_and_initial_identical() {
        let previous = DisplaySelection::single(ViewId::ByCity);
        let all = select(&previous, Some(Trigger::ShowAll));
        assert_eq!(all, select(&previous, None));
        assert_eq!(all.views(), &ViewId::ALL);
    }

    #[test]
    fn test_select_pick_is_singleton() {
        let previous = DisplaySelection::all();
        for i in 1..=5 {
            let view = ViewId::from_position(i).unwrap();
            let selection = select(&previous, Some(Trigger::Pick(view)));
            assert_eq!(selection.views(), &[ViewId::ALL[i - 1]]);
        }
    }

    #[test]
    fn test_select_help_keeps_selection() {
        let previous = DisplaySelection::single(ViewId::ByPaymentMethod);
        assert_eq!(select(&previous, Some(Trigger::HelpOpen)), previous);
    }

    #[test]
    fn test_toggle_help_idempotent_without_events() {
        let counts = ClickCounts { open: 2, close: 1 };
        let mut open = true;
        for _ in 0..4 {
            open = toggle_help(counts, counts, open);
        }
        assert!(open);
        assert!(!toggle_help(ClickCounts::default(), ClickCounts::default(), false));
    }

    #[test]
    fn test_toggle_help_flips_for_either_source() {
        let seen = ClickCounts { open: 1, close: 1 };
        assert!(toggle_help(ClickCounts { open: 2, close: 1 }, seen, false));
        assert!(toggle_help(ClickCounts { open: 1, close: 2 }, seen, false));
        assert!(!toggle_help(ClickCounts { open: 2, close: 1 }, seen, true));
    }

    #[test]
    fn test_help_dialog_flips_once_per_observation() {
        let mut dialog = HelpDialog::default();
        assert!(dialog.observe(ClickCounts { open: 1, close: 0 }));
        assert!(dialog.observe(ClickCounts { open: 1, close: 0 }));
        assert!(!dialog.observe(ClickCounts { open: 1, close: 1 }));
        // Both sources increased in one observation: still one inversion.
        assert!(dialog.observe(ClickCounts { open: 2, close: 2 }));
    }

    #[test]
    fn test_transition_sequence() {
        let state = run(&["pick-2"]);
        assert_eq!(state.selection().views(), &[ViewId::ByProductLine]);
        assert!(!state.help_open());

        let state = run(&["pick-2", "help-open"]);
        assert_eq!(state.selection().views(), &[ViewId::ByProductLine]);
        assert!(state.help_open());

        let state = run(&["pick-2", "help-open", "help-close", "show-all"]);
        assert_eq!(state.selection(), &DisplaySelection::all());
        assert!(!state.help_open());
        assert_eq!(state.clicks(), ClickCounts { open: 1, close: 1 });
    }

    #[test]
    fn test_unknown_event_is_noop() {
        let before = run(&["pick-4", "help-open"]);
        let (after, render) = transition(before.clone(), Event::parse("tab9"));
        assert_eq!(after, before);
        assert_eq!(render.views.views(), &[ViewId::ByCustomerType]);
        assert!(render.help_open);
    }

    #[test]
    fn test_initial_event_shows_everything() {
        let (state, render) = transition(run(&["pick-5"]), Event::Initial);
        assert_eq!(render.views, DisplaySelection::all());
        assert_eq!(state.selection(), &DisplaySelection::all());
    }

    #[test]
    fn test_help_reopens_after_close() {
        let state = run(&["help-open", "help-close", "help-open"]);
        assert!(state.help_open());
        assert_eq!(state.clicks(), ClickCounts { open: 2, close: 1 });

        // Every further press still flips the dialog exactly once.
        let (state, render) = transition(state, Event::parse("help-close"));
        assert!(!render.help_open);
        let (_, render) = transition(state, Event::parse("help-open"));
        assert!(render.help_open);
    }
}
