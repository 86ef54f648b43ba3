// world.rs - ECS World with entity lifecycle, migration and queries

use super::archetype::Archetype;
use super::commands::{Command, CommandBuffer};
use super::component::{Component, ComponentKind, ComponentMask, ComponentSet};
use super::entity::{Entity, EntityAllocator};
use super::error::EcsError;
use crate::state::{GameState, RunState};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Owns every archetype, the entity → mask map and the shared game state.
///
/// Each entity lives in exactly one archetype, the one keyed by its current
/// mask. Structural changes move the row between archetypes but never change
/// the entity id.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityAllocator,
    archetypes: HashMap<ComponentMask, Archetype>,
    entity_mask: HashMap<Entity, ComponentMask>,
    game_state: GameState,
    run_state: RunState,
    unknown_kind_skips: u32,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game_state(game_state: GameState) -> Self {
        Self {
            game_state,
            ..Self::default()
        }
    }

    /// Create an entity holding exactly `values`.
    pub fn create_entity(&mut self, values: ComponentSet) -> Result<Entity, EcsError> {
        let entity = self.entities.allocate()?;
        let mask = values.mask();
        self.place(entity, mask, values)?;
        trace!(%entity, %mask, "created entity");
        Ok(entity)
    }

    /// Merge `values` into `entity`, moving it to the archetype of the merged
    /// mask. New values replace existing ones of the same kind.
    ///
    /// An unknown entity is created fresh; the returned handle is the one to
    /// keep using in both cases.
    pub fn add_component(
        &mut self,
        entity: Entity,
        values: ComponentSet,
    ) -> Result<Entity, EcsError> {
        let Some(&mask) = self.entity_mask.get(&entity) else {
            debug!(%entity, "add_component on unknown entity, creating a new one");
            return self.create_entity(values);
        };

        let mut row = self.take_row(entity, mask)?;
        row.merge(values);
        let merged = row.mask();
        self.place(entity, merged, row)?;
        trace!(%entity, from = %mask, to = %merged, "migrated entity");
        Ok(entity)
    }

    /// Strip `kind` from `entity`. `Ok(false)` when the entity never had it.
    pub fn remove_component(
        &mut self,
        entity: Entity,
        kind: ComponentKind,
    ) -> Result<bool, EcsError> {
        let mask = self.mask_of(entity).ok_or(EcsError::NotFound { entity })?;
        if !mask.contains(kind) {
            return Ok(false);
        }

        let mut row = self.take_row(entity, mask)?;
        row.remove(kind);
        let reduced = mask.toggle(kind);
        self.place(entity, reduced, row)?;
        trace!(%entity, from = %mask, to = %reduced, "migrated entity");
        Ok(true)
    }

    /// Remove `entity` entirely and return its last component values.
    pub fn remove_entity(&mut self, entity: Entity) -> Result<ComponentSet, EcsError> {
        let mask = self.mask_of(entity).ok_or(EcsError::NotFound { entity })?;
        let row = self.take_row(entity, mask)?;
        trace!(%entity, "removed entity");
        Ok(row)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_mask.contains_key(&entity)
    }

    pub fn mask_of(&self, entity: Entity) -> Option<ComponentMask> {
        self.entity_mask.get(&entity).copied()
    }

    /// `false` for unknown entities.
    pub fn has_component(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.mask_of(entity).is_some_and(|mask| mask.contains(kind))
    }

    pub fn has_components(&self, entity: Entity, required: ComponentMask) -> bool {
        self.mask_of(entity).is_some_and(|mask| mask.has_all(required))
    }

    /// Archetypes holding at least `kinds`, ascending by mask.
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<&Archetype> {
        self.query_mask(ComponentMask::of(kinds))
    }

    pub fn query_mask(&self, required: ComponentMask) -> Vec<&Archetype> {
        let mut matches: Vec<&Archetype> = self
            .archetypes
            .values()
            .filter(|archetype| archetype.mask().has_all(required))
            .collect();
        matches.sort_by_key(|archetype| archetype.mask());
        matches
    }

    /// Mutable form of [`World::query_mask`].
    pub fn query_mut(&mut self, required: ComponentMask) -> Vec<&mut Archetype> {
        let mut matches: Vec<&mut Archetype> = self
            .archetypes
            .values_mut()
            .filter(|archetype| archetype.mask().has_all(required))
            .collect();
        matches.sort_by_key(|archetype| archetype.mask());
        matches
    }

    /// Find or create the archetype for `mask`.
    pub fn ensure_archetype(&mut self, mask: ComponentMask) -> &mut Archetype {
        let skips = &mut self.unknown_kind_skips;
        self.archetypes.entry(mask).or_insert_with(|| {
            *skips += mask.unknown_bits().count_ones();
            debug!(%mask, "created archetype");
            Archetype::new(mask)
        })
    }

    pub fn archetype(&self, mask: ComponentMask) -> Option<&Archetype> {
        self.archetypes.get(&mask)
    }

    pub fn archetype_mut(&mut self, mask: ComponentMask) -> Option<&mut Archetype> {
        self.archetypes.get_mut(&mask)
    }

    pub fn archetypes(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.values()
    }

    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entity_mask.len()
    }

    /// Id the next created entity will get.
    pub fn next_entity_id(&self) -> u32 {
        self.entities.peek()
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        let mask = self.mask_of(entity)?;
        self.archetypes.get(&mask)?.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let mask = self.mask_of(entity)?;
        self.archetypes.get_mut(&mask)?.get_mut(entity)
    }

    /// Copy of every component value `entity` holds.
    pub fn values_of(&self, entity: Entity) -> Option<ComponentSet> {
        let mask = self.mask_of(entity)?;
        self.archetypes.get(&mask)?.values_of(entity)
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn game_state_mut(&mut self) -> &mut GameState {
        &mut self.game_state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn set_run_state(&mut self, run_state: RunState) {
        self.run_state = run_state;
    }

    pub fn toggle_pause(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        self.run_state
    }

    /// Mask bits skipped so far because no component kind owns them.
    pub fn unknown_kind_skips(&self) -> u32 {
        self.unknown_kind_skips
    }

    /// Apply every queued command in order and return how many went through.
    ///
    /// Commands naming entities that are already gone are skipped. Any other
    /// failure is logged and the remaining commands still run; the first such
    /// error is returned once the buffer is empty.
    pub fn apply(&mut self, commands: &mut CommandBuffer) -> Result<usize, EcsError> {
        let mut applied = 0;
        let mut first_error = None;
        for command in commands.drain() {
            let result = match command {
                Command::Spawn { values } => self.create_entity(values).map(drop),
                Command::Despawn { entity } => self.remove_entity(entity).map(drop),
                Command::Insert { entity, values } => {
                    self.add_component(entity, values).map(drop)
                }
                Command::Remove { entity, kind } => {
                    self.remove_component(entity, kind).map(drop)
                }
            };
            match result {
                Ok(()) => applied += 1,
                Err(EcsError::NotFound { entity }) => {
                    debug!(%entity, "skipping command for missing entity");
                }
                Err(err) => {
                    warn!(%err, "deferred command failed");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(applied),
        }
    }

    fn take_row(
        &mut self,
        entity: Entity,
        mask: ComponentMask,
    ) -> Result<ComponentSet, EcsError> {
        let row = self
            .archetypes
            .get_mut(&mask)
            .and_then(|archetype| archetype.remove_entity(entity))
            .ok_or(EcsError::NotFound { entity })?;
        self.entity_mask.remove(&entity);
        Ok(row)
    }

    fn place(
        &mut self,
        entity: Entity,
        mask: ComponentMask,
        values: ComponentSet,
    ) -> Result<(), EcsError> {
        self.ensure_archetype(mask).add_entity(entity, values)?;
        self.entity_mask.insert(entity, mask);
        Ok(())
    }
}
