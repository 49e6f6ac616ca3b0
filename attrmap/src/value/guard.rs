//! Re-entry guards for walks over mappings that may contain themselves.

use std::cell::RefCell;

/// What a walk is doing, so unrelated walks of one table never collide.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Walk {
    Render,
    Compare,
    Encode,
}

type Visit = (Walk, usize, usize);

thread_local! {
    static ACTIVE: RefCell<Vec<Visit>> = const { RefCell::new(Vec::new()) };
}

/// Marks a table, or a pair of tables, as being walked on this thread.
///
/// Dropping the guard leaves the table.
pub(super) struct Guard(Visit);

impl Guard {
    /// Enter the visit, or `None` when it is already in progress further up
    /// the stack.
    pub(super) fn enter(walk: Walk, table: usize, other: usize) -> Option<Self> {
        let visit = (walk, table, other);
        ACTIVE.with_borrow_mut(|active| {
            if active.contains(&visit) {
                None
            } else {
                active.push(visit);
                Some(Self(visit))
            }
        })
    }
}

impl Drop for Guard {
    fn drop(&mut self) {
        ACTIVE.with_borrow_mut(|active| {
            if let Some(index) = active.iter().rposition(|visit| *visit == self.0) {
                active.remove(index);
            }
        });
    }
}
