//! Archetype row storage
//!
//! An archetype stores every entity whose component mask equals its own.
//! Rows are dense: entity `entities[i]` owns element `i` of every column, and
//! removal swaps the last row into the hole so nothing is ever left sparse.

use super::component::{Columns, ColumnsMut, Component, ComponentKind, ComponentMask, ComponentSet};
use super::entity::Entity;
use super::error::EcsError;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Archetype {
    mask: ComponentMask,
    entities: Vec<Entity>,
    index: HashMap<Entity, usize>,
    columns: Columns,
}

impl Archetype {
    /// Empty archetype with one column per registered kind of `mask`.
    ///
    /// Bits with no registered kind get no column; they are logged and
    /// otherwise ignored.
    pub fn new(mask: ComponentMask) -> Self {
        let mut columns = Columns::default();
        for shift in 0..u32::BITS {
            let bit = 1u32 << shift;
            if mask.bits() & bit == 0 {
                continue;
            }
            match ComponentKind::from_bit(bit) {
                Some(kind) => columns.insert_empty(kind),
                None => {
                    let error = EcsError::UnknownComponentKind { bit };
                    warn!(%mask, %error, "skipping column");
                }
            }
        }

        Self {
            mask,
            entities: Vec::new(),
            index: HashMap::new(),
            columns,
        }
    }

    pub fn mask(&self) -> ComponentMask {
        self.mask
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    pub fn row_of(&self, entity: Entity) -> Option<usize> {
        self.index.get(&entity).copied()
    }

    /// Append `entity` with one value per kind of the mask and return its row.
    ///
    /// Values for kinds outside the mask are dropped. A set missing any kind
    /// of the mask is refused before any column is touched.
    pub fn add_entity(
        &mut self,
        entity: Entity,
        mut values: ComponentSet,
    ) -> Result<usize, EcsError> {
        debug_assert!(!self.contains(entity), "{entity} already stored in {}", self.mask);

        let kinds = self.mask.kinds();
        let missing = kinds
            .iter()
            .filter(|kind| !values.contains(**kind))
            .fold(ComponentMask::EMPTY, |mask, kind| mask.with(*kind));
        if !missing.is_empty() {
            return Err(EcsError::InvalidComponentSet {
                mask: self.mask,
                missing,
            });
        }

        let row = self.entities.len();
        for kind in kinds {
            if let Some(value) = values.remove(kind) {
                self.columns.push(value);
            }
        }
        self.entities.push(entity);
        self.index.insert(entity, row);
        Ok(row)
    }

    /// Swap-remove `entity`'s row and hand back its values.
    ///
    /// `None` when the entity is not stored here; nothing changes then.
    pub fn remove_entity(&mut self, entity: Entity) -> Option<ComponentSet> {
        let row = self.index.remove(&entity)?;
        let values = self.columns.swap_remove(row);
        self.entities.swap_remove(row);
        // The former last row now sits in the hole (unless it was the hole).
        if let Some(moved) = self.entities.get(row) {
            self.index.insert(*moved, row);
        }
        Some(values.into_iter().collect())
    }

    /// Copy of `entity`'s current row.
    pub fn values_of(&self, entity: Entity) -> Option<ComponentSet> {
        let row = self.row_of(entity)?;
        Some(
            self.mask
                .kinds()
                .into_iter()
                .filter_map(|kind| self.columns.value_at(kind, row))
                .collect(),
        )
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        let row = self.row_of(entity)?;
        T::column(&self.columns)?.get(row)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let row = self.row_of(entity)?;
        T::column_mut(&mut self.columns)?.get_mut(row)
    }

    pub fn column<T: Component>(&self) -> Option<&[T]> {
        T::column(&self.columns)
    }

    pub fn column_mut<T: Component>(&mut self) -> Option<&mut [T]> {
        T::column_mut(&mut self.columns)
    }

    /// Entity list alongside mutable access to every column.
    pub fn split_mut(&mut self) -> (&[Entity], ColumnsMut<'_>) {
        (&self.entities, self.columns.view_mut())
    }

    /// Row invariant: the entity list, every column and the index agree.
    pub fn is_consistent(&self) -> bool {
        let len = self.entities.len();
        self.index.len() == len
            && self
                .mask
                .kinds()
                .into_iter()
                .all(|kind| self.columns.len_of(kind) == Some(len))
            && self
                .entities
                .iter()
                .enumerate()
                .all(|(row, entity)| self.index.get(entity) == Some(&row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Candy, Collides, Position, Sprite};
    use crate::ecs::ComponentValue;
    use proptest::prelude::*;

    fn candy_mask() -> ComponentMask {
        ComponentMask::of(&[ComponentKind::Position, ComponentKind::Candy])
    }

    fn candy_at(x: f32) -> ComponentSet {
        ComponentSet::new().with(Position::new(x, 0.0)).with(Candy)
    }

    #[test]
    fn new_archetype_materializes_columns() {
        let arch = Archetype::new(candy_mask());
        assert_eq!(arch.column::<Position>(), Some(&[][..]));
        assert_eq!(arch.column::<Candy>(), Some(&[][..]));
        assert!(arch.column::<Sprite>().is_none());
    }

    #[test]
    fn unknown_bits_get_no_column() {
        let mask = ComponentMask::from_bits(ComponentKind::Position.bit() | 1 << 30);
        let mut arch = Archetype::new(mask);
        let row = arch
            .add_entity(Entity::from_raw(0), ComponentSet::new().with(Position::default()))
            .unwrap();
        assert_eq!(row, 0);
        assert!(arch.is_consistent());
    }

    #[test]
    fn add_entity_ignores_extra_kinds() {
        let mut arch = Archetype::new(candy_mask());
        let values = candy_at(1.0).with(Collides::new(0.0, 0.0, 5.0, 5.0));
        arch.add_entity(Entity::from_raw(3), values).unwrap();

        assert!(arch.column::<Collides>().is_none());
        assert_eq!(arch.values_of(Entity::from_raw(3)), Some(candy_at(1.0)));
    }

    #[test]
    fn add_entity_rejects_missing_kind_without_mutating() {
        let mut arch = Archetype::new(candy_mask());
        let err = arch
            .add_entity(Entity::from_raw(0), ComponentSet::new().with(Candy))
            .unwrap_err();

        assert_eq!(
            err,
            EcsError::InvalidComponentSet {
                mask: candy_mask(),
                missing: ComponentKind::Position.into(),
            }
        );
        assert!(arch.is_empty());
        assert_eq!(arch.column::<Candy>().map(<[Candy]>::len), Some(0));
    }

    #[test]
    fn swap_remove_moves_last_row_into_hole() {
        let mut arch = Archetype::new(candy_mask());
        for id in 0..3 {
            arch.add_entity(Entity::from_raw(id), candy_at(id as f32)).unwrap();
        }

        let removed = arch.remove_entity(Entity::from_raw(0)).unwrap();
        assert_eq!(removed.get::<Position>(), Some(&Position::new(0.0, 0.0)));

        assert_eq!(arch.entities(), &[Entity::from_raw(2), Entity::from_raw(1)]);
        assert_eq!(arch.row_of(Entity::from_raw(2)), Some(0));
        assert_eq!(
            arch.get::<Position>(Entity::from_raw(2)),
            Some(&Position::new(2.0, 0.0))
        );
        assert!(arch.is_consistent());
    }

    #[test]
    fn removing_last_row_skips_swap() {
        let mut arch = Archetype::new(candy_mask());
        arch.add_entity(Entity::from_raw(0), candy_at(0.0)).unwrap();
        arch.add_entity(Entity::from_raw(1), candy_at(1.0)).unwrap();

        arch.remove_entity(Entity::from_raw(1)).unwrap();
        assert_eq!(arch.entities(), &[Entity::from_raw(0)]);
        assert_eq!(arch.row_of(Entity::from_raw(0)), Some(0));
        assert!(arch.is_consistent());
    }

    #[test]
    fn removing_unknown_entity_is_noop() {
        let mut arch = Archetype::new(candy_mask());
        arch.add_entity(Entity::from_raw(0), candy_at(0.0)).unwrap();
        assert!(arch.remove_entity(Entity::from_raw(9)).is_none());
        assert_eq!(arch.len(), 1);
    }

    #[test]
    fn split_mut_writes_through() {
        let mut arch = Archetype::new(candy_mask());
        arch.add_entity(Entity::from_raw(4), candy_at(0.0)).unwrap();
        {
            let (entities, columns) = arch.split_mut();
            assert_eq!(entities, &[Entity::from_raw(4)]);
            let positions = columns.position.unwrap();
            positions[0].y = 8.0;
        }
        assert_eq!(
            arch.values_of(Entity::from_raw(4)).unwrap().iter().next(),
            Some(&ComponentValue::Position(Position::new(0.0, 8.0)))
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Add), any::<usize>().prop_map(Op::Remove)]
    }

    proptest! {
        #[test]
        fn row_invariant_survives_any_sequence(ops in prop::collection::vec(op(), 0..64)) {
            let mut arch = Archetype::new(candy_mask());
            let mut live: Vec<Entity> = Vec::new();
            let mut next = 0u32;

            for op in ops {
                match op {
                    Op::Add => {
                        let entity = Entity::from_raw(next);
                        arch.add_entity(entity, candy_at(next as f32)).unwrap();
                        live.push(entity);
                        next += 1;
                    }
                    Op::Remove(pick) if !live.is_empty() => {
                        let entity = live.swap_remove(pick % live.len());
                        let removed = arch.remove_entity(entity).unwrap();
                        prop_assert_eq!(
                            removed.get::<Position>(),
                            Some(&Position::new(entity.id() as f32, 0.0))
                        );
                    }
                    Op::Remove(_) => {}
                }
                prop_assert!(arch.is_consistent());
                prop_assert_eq!(arch.len(), live.len());
            }

            for entity in live {
                prop_assert_eq!(
                    arch.get::<Position>(entity),
                    Some(&Position::new(entity.id() as f32, 0.0))
                );
            }
        }
    }
}
