//! Button level-to-edge tracking.
//!
//! The host control loop polls every button once per tick and feeds
//! the levels through a [`ButtonTracker`] per button. The tracker
//! remembers the previous level and reports an event only on the tick
//! where the level changes, so an action bound to a press fires once
//! per press no matter how long the button is held.
//!
//! Events are returned to the caller rather than dispatched through
//! registered handlers: the caller matches on them and calls whatever
//! it wants, which keeps the set of actions a closed, visible list at
//! the call site.

/// An edge observed on a button between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// The button went from released to held.
    Pressed,
    /// The button went from held to released.
    Released,
}

/// Per-button edge detector.
///
/// Feed it the button's level once per tick; it reports the edge, if
/// any, that occurred since the previous tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonTracker {
    held: bool,
}

impl ButtonTracker {
    /// A tracker that assumes the button starts released.
    pub const fn new() -> Self { ButtonTracker { held: false } }

    /// Records this tick's level and returns the edge it produced.
    pub fn update(&mut self, pressed: bool) -> Option<ButtonEvent> {
        let event = match (self.held, pressed) {
            (false, true) => Some(ButtonEvent::Pressed),
            (true, false) => Some(ButtonEvent::Released),
            _ => None,
        };
        self.held = pressed;
        event
    }

    /// The level recorded on the most recent tick.
    pub fn is_held(&self) -> bool { self.held }
}
