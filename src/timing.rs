//! Event timing policy: trailing-edge debounce and per-frame coalescing.
//!
//! Pure bookkeeping with no clock or timer of its own. The event layer owns
//! the actual timers and animation-frame callbacks and asks these types
//! whether a callback is still current.

/// Trailing-edge debounce policy.
///
/// Only the last trigger of a burst fires, once `delay_ms` has passed
/// without another trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DebouncePolicy {
    /// Quiet period in milliseconds.
    pub delay_ms: u32,
}

impl DebouncePolicy {
    /// Default resize quiet period.
    pub const DEFAULT_DELAY_MS: u32 = 10;

    /// Trailing-edge debounce with the given quiet period.
    pub const fn trailing(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self::trailing(Self::DEFAULT_DELAY_MS)
    }
}

/// Handle for one scheduled debounce callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Tracks which scheduled callback in a burst is allowed to fire.
///
/// Each [`schedule`](Self::schedule) supersedes every earlier ticket.
#[derive(Debug, Default)]
pub struct Debouncer {
    policy: DebouncePolicy,
    generation: u64,
    armed: bool,
}

impl Debouncer {
    /// New debouncer with nothing scheduled.
    pub fn new(policy: DebouncePolicy) -> Self {
        Self {
            policy,
            generation: 0,
            armed: false,
        }
    }

    /// The policy this debouncer was built with.
    pub fn policy(&self) -> DebouncePolicy {
        self.policy
    }

    /// Record a trigger. The returned ticket should fire after `policy().delay_ms`.
    pub fn schedule(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        Ticket(self.generation)
    }

    /// Called when a ticket's delay elapses. True only for the latest
    /// ticket, and only once.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if self.armed && ticket.0 == self.generation {
            self.armed = false;
            true
        } else {
            false
        }
    }

    /// Drop whatever is scheduled.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Whether a callback is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.armed
    }
}

/// Coalesces a stream of values to at most one per animation frame.
///
/// The latest submitted value wins.
#[derive(Debug)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    scheduled: bool,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            scheduled: false,
        }
    }
}

impl<T> FrameCoalescer<T> {
    /// Empty coalescer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`. Returns true when the caller must request a frame,
    /// false when a frame is already on its way.
    pub fn submit(&mut self, value: T) -> bool {
        self.pending = Some(value);
        if self.scheduled {
            false
        } else {
            self.scheduled = true;
            true
        }
    }

    /// Called from the frame callback: take the latest value and reopen
    /// for scheduling.
    pub fn take(&mut self) -> Option<T> {
        self.scheduled = false;
        self.pending.take()
    }

    /// Whether a frame has been requested and not yet run.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}
