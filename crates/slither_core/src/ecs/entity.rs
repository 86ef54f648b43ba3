//! Entity handles
//!
//! Entities are plain ids. The allocator only ever counts up: an id is never
//! handed out twice, even after its entity is removed.

use super::error::EcsError;
use std::fmt;

/// Opaque entity handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// Rebuild a handle from a raw id (tests, logs, debugging tools).
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Strictly monotonic id source.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume counting at `next`, e.g. after restoring saved entities.
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Next unused id. Fails instead of wrapping once the id space is spent;
    /// `u32::MAX` itself is never handed out.
    pub fn allocate(&mut self) -> Result<Entity, EcsError> {
        let next = self.next.checked_add(1).ok_or(EcsError::IdsExhausted)?;
        let entity = Entity(self.next);
        self.next = next;
        Ok(entity)
    }

    /// Id the next allocation will return.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_count_up_from_zero() {
        let mut alloc = EntityAllocator::new();
        assert_eq!(alloc.allocate(), Ok(Entity::from_raw(0)));
        assert_eq!(alloc.allocate(), Ok(Entity::from_raw(1)));
        assert_eq!(alloc.peek(), 2);
    }

    #[test]
    fn exhausted_id_space_is_an_error_not_a_wrap() {
        let mut alloc = EntityAllocator::starting_at(u32::MAX - 1);
        assert_eq!(alloc.allocate(), Ok(Entity::from_raw(u32::MAX - 1)));
        assert_eq!(alloc.allocate(), Err(EcsError::IdsExhausted));
        assert_eq!(alloc.allocate(), Err(EcsError::IdsExhausted));
        assert_eq!(alloc.peek(), u32::MAX);
    }

    #[test]
    fn display_shows_raw_id() {
        assert_eq!(Entity::from_raw(7).to_string(), "Entity(7)");
    }
}
