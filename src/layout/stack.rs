//! Placeholder slots of one role, in consumption order.

use super::Role;
use crate::common::{Error, Result};
use smallvec::SmallVec;

/// The placeholder slot indices of one role on one layout.
///
/// Slots are pushed in layout order and handed out last-registered first.
/// Templates rely on this order (the last picture placeholder receives the
/// first exhibit), so it must not change without a migration of the
/// templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderStack {
    role: Role,
    slots: SmallVec<[u32; 4]>,
}

impl PlaceholderStack {
    /// Create an empty stack for a role.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            slots: SmallVec::new(),
        }
    }

    /// Register a slot; later registrations are consumed first.
    #[inline]
    pub fn push(&mut self, slot: u32) {
        self.slots.push(slot);
    }

    /// Take the next slot to fill (the most recently registered one).
    #[inline]
    pub fn take_next(&mut self) -> Option<u32> {
        self.slots.pop()
    }

    /// Take the next slot, failing with a render error naming the layout
    /// when the role is exhausted.
    pub fn take_required(&mut self, layout: usize) -> Result<u32> {
        self.take_next().ok_or_else(|| {
            Error::Render(format!(
                "layout {} has no free {} placeholder",
                layout, self.role
            ))
        })
    }

    /// The role these slots belong to.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Slots not yet taken, in registration order.
    #[inline]
    pub fn remaining(&self) -> &[u32] {
        &self.slots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_registered_first() {
        let mut stack = PlaceholderStack::new(Role::Picture);
        stack.push(13);
        stack.push(14);
        stack.push(15);
        assert_eq!(stack.remaining(), &[13, 14, 15]);
        assert_eq!(stack.take_next(), Some(15));
        assert_eq!(stack.take_next(), Some(14));
        assert_eq!(stack.take_next(), Some(13));
        assert_eq!(stack.take_next(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_take_required_exhausted() {
        let mut stack = PlaceholderStack::new(Role::Footer);
        stack.push(2);
        assert_eq!(stack.take_required(4).expect("one slot"), 2);
        match stack.take_required(4) {
            Err(Error::Render(msg)) => {
                assert!(msg.contains("layout 4"));
                assert!(msg.contains("footer"));
            },
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
