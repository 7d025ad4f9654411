//! Remote-resource state machine shared by every data view.
//!
//! One type replaces the per-view loading/error/data flag triplets, and a
//! request generation guards each slot: a response belonging to a
//! superseded request can never clobber the result of a newer one.

use std::fmt;

/// Lifecycle of one remotely fetched value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Remote<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight; any previous value is gone.
    Loading,
    Success(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Remote::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle tying an in-flight request to the slot generation that started
/// it. Tokens are only comparable against the slot that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A `Remote` plus the generation counter that guards it.
#[derive(Clone, Debug)]
pub struct Slot<T> {
    state: Remote<T>,
    generation: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            state: Remote::Idle,
            generation: 0,
        }
    }
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Remote<T> {
        &self.state
    }

    pub fn value(&self) -> Option<&T> {
        self.state.value()
    }

    /// Moves to `Loading` and invalidates every earlier token.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.state = Remote::Loading;
        RequestToken(self.generation)
    }

    /// Applies a finished request. Returns false, leaving the slot
    /// untouched, when a newer request has started since `token` was
    /// issued.
    pub fn complete<E: fmt::Display>(&mut self, token: RequestToken, result: Result<T, E>) -> bool {
        if token.0 != self.generation {
            tracing::debug!(
                stale = token.0,
                current = self.generation,
                "dropping result of superseded request"
            );
            return false;
        }
        self.state = match result {
            Ok(value) => Remote::Success(value),
            Err(err) => Remote::Failed(err.to_string()),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut slot: Slot<u32> = Slot::new();
        assert_eq!(*slot.state(), Remote::Idle);

        let token = slot.begin();
        assert!(slot.state().is_loading());

        assert!(slot.complete::<&str>(token, Ok(7)));
        assert_eq!(slot.value(), Some(&7));

        let token = slot.begin();
        assert!(slot.complete(token, Err::<u32, _>("boom")));
        assert_eq!(slot.state().error(), Some("boom"));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut slot: Slot<&str> = Slot::new();

        let first = slot.begin();
        let second = slot.begin();

        // The late response from the superseded request loses, whatever
        // order the two complete in.
        assert!(slot.complete::<&str>(second, Ok("new")));
        assert!(!slot.complete::<&str>(first, Ok("old")));
        assert_eq!(slot.value(), Some(&"new"));
    }

    #[test]
    fn test_stale_failure_cannot_mask_newer_success() {
        let mut slot: Slot<&str> = Slot::new();

        let first = slot.begin();
        let second = slot.begin();
        assert!(slot.complete::<&str>(second, Ok("fresh")));
        assert!(!slot.complete(first, Err::<&str, _>("timeout")));
        assert_eq!(slot.value(), Some(&"fresh"));
    }

    #[test]
    fn test_begin_discards_previous_value() {
        let mut slot: Slot<u32> = Slot::new();
        let token = slot.begin();
        slot.complete::<&str>(token, Ok(1));

        slot.begin();
        assert!(slot.state().is_loading());
        assert_eq!(slot.value(), None);
    }
}
