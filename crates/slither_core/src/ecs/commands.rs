//! Deferred structural changes
//!
//! Systems iterate archetype columns by borrow, so they cannot move rows
//! between archetypes mid-pass. They record what should change here instead,
//! and the world applies the buffer in recording order once the pass is done.

use super::component::{ComponentKind, ComponentSet};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a fresh entity from the values.
    Spawn { values: ComponentSet },
    /// Remove the entity and all of its components.
    Despawn { entity: Entity },
    /// Merge the values into the entity, migrating it if its mask changes.
    Insert { entity: Entity, values: ComponentSet },
    /// Strip one component kind from the entity.
    Remove { entity: Entity, kind: ComponentKind },
}

/// Ordered queue of [`Command`]s.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, values: ComponentSet) {
        self.commands.push(Command::Spawn { values });
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.commands.push(Command::Despawn { entity });
    }

    pub fn insert(&mut self, entity: Entity, values: ComponentSet) {
        self.commands.push(Command::Insert { entity, values });
    }

    pub fn remove(&mut self, entity: Entity, kind: ComponentKind) {
        self.commands.push(Command::Remove { entity, kind });
    }

    /// Whether a despawn of `entity` is already queued.
    pub fn despawns(&self, entity: Entity) -> bool {
        self.commands
            .iter()
            .any(|command| {
                matches!(command, Command::Despawn { entity: queued } if *queued == entity)
            })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }
}
