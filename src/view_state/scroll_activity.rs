//! Scroll activity - debounced "is the user scrolling right now"
//!
//! # State machine
//!
//! ```text
//!            scroll                 scroll (timer reset)
//!   Idle ───────────────► Scrolling ◄──────┐
//!    ▲                        │  └─────────┘
//!    └──── rest_delay elapsed ┘
//! ```
//!
//! Every transition is reported through `on_is_scrolling_change`. Time is passed in by the
//! host event loop (`handle_scroll(.., now)`, `poll(now)`), which keeps the detector
//! single-threaded and testable without sleeping. `next_deadline()` tells the loop how long it
//! may block before the rest timer is due.
//!
//! The listener on the observed element and its pending rest timer form one
//! [`ScrollAttachment`]. Replacing or clearing the element, or dropping the detector,
//! releases both together.

use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Quiet period after the last scroll event before activity reverts to idle.
pub const DEFAULT_REST_DELAY: Duration = Duration::from_millis(350);

/// Scroll activity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// No scroll event within the rest delay.
    #[default]
    Idle,
    /// A scroll event arrived and the rest timer is pending.
    Scrolling,
}

impl ScrollState {
    /// `true` for [`ScrollState::Scrolling`].
    pub fn is_scrolling(&self) -> bool {
        matches!(self, ScrollState::Scrolling)
    }
}

/// Callback invoked with the new `is_scrolling` value on every transition.
pub type ScrollChangeCallback = Box<dyn FnMut(bool)>;

/// Options for [`use_is_scrolling`].
pub struct IsScrollingOptions {
    /// Called with the new state on every transition.
    pub on_is_scrolling_change: Option<ScrollChangeCallback>,
    /// Quiet period after the last scroll event before returning to idle.
    pub rest_delay: Duration,
}

impl Default for IsScrollingOptions {
    fn default() -> Self {
        Self {
            on_is_scrolling_change: None,
            rest_delay: DEFAULT_REST_DELAY,
        }
    }
}

impl fmt::Debug for IsScrollingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsScrollingOptions")
            .field("on_is_scrolling_change", &self.on_is_scrolling_change.is_some())
            .field("rest_delay", &self.rest_delay)
            .finish()
    }
}

/// Listener registration on one element plus its pending rest timer.
///
/// Dropping the attachment is the only way to release the listener, and it always clears
/// the timer with it, so no timer can fire for an element that is no longer observed.
#[derive(Debug)]
pub struct ScrollAttachment<E: fmt::Debug> {
    element: E,
    rest_deadline: Option<Instant>,
}

impl<E: fmt::Debug> ScrollAttachment<E> {
    fn new(element: E) -> Self {
        trace!(?element, "scroll listener attached");
        Self {
            element,
            rest_deadline: None,
        }
    }

    /// The observed element.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// When the pending rest timer fires, if one is armed.
    pub fn rest_deadline(&self) -> Option<Instant> {
        self.rest_deadline
    }
}

impl<E: fmt::Debug> Drop for ScrollAttachment<E> {
    fn drop(&mut self) {
        trace!(
            element = ?self.element,
            timer_pending = self.rest_deadline.is_some(),
            "scroll listener detached, rest timer cleared"
        );
        self.rest_deadline = None;
    }
}

/// Debounced scroll activity detector for one scroll container.
///
/// `E` identifies the observed element (a pane id, a widget key); events from any other
/// element are ignored.
pub struct ScrollActivity<E: PartialEq + fmt::Debug> {
    state: ScrollState,
    rest_delay: Duration,
    attachment: Option<ScrollAttachment<E>>,
    on_change: Option<ScrollChangeCallback>,
}

impl<E: PartialEq + fmt::Debug> ScrollActivity<E> {
    /// Detector with no element attached and no callback.
    pub fn new(rest_delay: Duration) -> Self {
        Self {
            state: ScrollState::Idle,
            rest_delay,
            attachment: None,
            on_change: None,
        }
    }

    /// Register the transition callback.
    pub fn with_on_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Current state.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Shorthand for `state().is_scrolling()`.
    pub fn is_scrolling(&self) -> bool {
        self.state.is_scrolling()
    }

    /// Configured rest delay.
    pub fn rest_delay(&self) -> Duration {
        self.rest_delay
    }

    /// Element currently observed, if any.
    pub fn attached_element(&self) -> Option<&E> {
        self.attachment.as_ref().map(ScrollAttachment::element)
    }

    /// Observe `element`, or nothing.
    ///
    /// Same element as before: no-op. Different element or `None`: the old attachment (and
    /// its timer) is released first. If that interrupts an active scroll, the detector
    /// reports idle right away rather than staying stuck in `Scrolling` with no timer.
    pub fn observe(&mut self, element: Option<E>) {
        let unchanged = match (&self.attachment, &element) {
            (Some(current), Some(next)) => current.element == *next,
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        self.attachment = None;
        if self.state.is_scrolling() {
            self.transition(ScrollState::Idle);
        }
        self.attachment = element.map(ScrollAttachment::new);
    }

    /// A scroll event arrived from `source` at `now`.
    ///
    /// # Returns
    /// `true` if this event started a scroll (`Idle -> Scrolling`).
    pub fn handle_scroll(&mut self, source: &E, now: Instant) -> bool {
        let rest_delay = self.rest_delay;
        let Some(attachment) = self.attachment.as_mut() else {
            return false;
        };
        if attachment.element != *source {
            return false;
        }

        attachment.rest_deadline = Some(now + rest_delay);
        if self.state.is_scrolling() {
            return false;
        }
        self.transition(ScrollState::Scrolling);
        true
    }

    /// Fire the rest timer if it is due at `now`.
    ///
    /// # Returns
    /// `true` if the detector went back to idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = self
            .attachment
            .as_ref()
            .and_then(ScrollAttachment::rest_deadline)
            .is_some_and(|deadline| deadline <= now);
        if !due {
            return false;
        }

        if let Some(attachment) = self.attachment.as_mut() {
            attachment.rest_deadline = None;
        }
        self.transition(ScrollState::Idle);
        true
    }

    /// When the pending rest timer is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.attachment.as_ref().and_then(ScrollAttachment::rest_deadline)
    }

    fn transition(&mut self, next: ScrollState) {
        if self.state == next {
            return;
        }
        debug!(from = ?self.state, to = ?next, "scroll activity changed");
        self.state = next;
        if let Some(callback) = self.on_change.as_mut() {
            callback(next.is_scrolling());
        }
    }
}

impl<E: PartialEq + fmt::Debug> fmt::Debug for ScrollActivity<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollActivity")
            .field("state", &self.state)
            .field("rest_delay", &self.rest_delay)
            .field("attachment", &self.attachment)
            .finish()
    }
}

/// Attach a detector to `element` with the given options.
pub fn use_is_scrolling<E: PartialEq + fmt::Debug>(
    element: Option<E>,
    options: IsScrollingOptions,
) -> ScrollActivity<E> {
    let mut activity = ScrollActivity::new(options.rest_delay);
    activity.on_change = options.on_is_scrolling_change;
    activity.observe(element);
    activity
}
