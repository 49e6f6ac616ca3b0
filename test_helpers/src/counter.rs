//! Shared call counter for closures handed to code under test.
//!
//! # Examples
//!
//! ```
//! use test_helpers::counter::CallCounter;
//!
//! let calls = CallCounter::default();
//! let counter = calls.clone();
//! let bump = move || counter.bump();
//! bump();
//! bump();
//! assert_eq!(calls.count(), 2);
//! ```

use std::{cell::Cell, rc::Rc};

/// Clonable counter; every clone observes the same total.
#[derive(Clone, Debug, Default)]
pub struct CallCounter(Rc<Cell<u32>>);

impl CallCounter {
    /// Record one call.
    pub fn bump(&self) {
        self.0.set(self.0.get().saturating_add(1));
    }

    /// Calls recorded so far.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::CallCounter;

    #[test]
    fn clones_share_the_total() {
        let counter = CallCounter::default();
        let other = counter.clone();
        other.bump();
        counter.bump();
        assert_eq!(counter.count(), 2);
        assert_eq!(other.count(), 2);
    }
}
