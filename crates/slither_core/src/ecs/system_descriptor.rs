use crate::ecs::{ComponentKind, ComponentMask};

/// Metadata describing how a system interacts with the ECS world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemDescriptor {
    name: String,
    reads: ComponentMask,
    writes: ComponentMask,
}

impl SystemDescriptor {
    /// Create a new descriptor with the provided name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reads: ComponentMask::EMPTY,
            writes: ComponentMask::EMPTY,
        }
    }

    /// Replace the read-only component set for this system.
    pub fn reads(mut self, kinds: &[ComponentKind]) -> Self {
        self.reads = ComponentMask::of(kinds);
        self
    }

    /// Replace the write component set for this system.
    pub fn writes(mut self, kinds: &[ComponentKind]) -> Self {
        self.writes = ComponentMask::of(kinds);
        self
    }

    /// Unique system name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read_mask(&self) -> ComponentMask {
        self.reads
    }

    pub fn write_mask(&self) -> ComponentMask {
        self.writes
    }

    /// Union of read and write kinds.
    pub fn access_mask(&self) -> ComponentMask {
        self.reads | self.writes
    }

    /// Whether the descriptor touches any components at all.
    pub fn is_empty(&self) -> bool {
        self.access_mask().is_empty()
    }

    /// Whether the two systems write a kind the other one reads or writes.
    pub fn conflicts_with(&self, other: &SystemDescriptor) -> bool {
        self.writes.bits() & other.access_mask().bits() != 0
            || other.writes.bits() & self.access_mask().bits() != 0
    }
}
