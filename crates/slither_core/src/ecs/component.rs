// component.rs - Closed component registry and bitmask algebra
//
// Every component kind owns exactly one bit of a u32 mask. The registry macro
// below generates the kind enum, the tagged value union and the typed column
// table from a single list, so adding a component is a one-line change.

use super::error::EcsError;
use crate::components::{
    AiControlled, Alive, Animation, Candy, Collides, Enemy, Health, Movement, PlayerControlled,
    Position, Sprite,
};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::BitOr;

/// Types that can live in an archetype column.
///
/// Implemented by `component_registry!` for every registered component; it
/// maps a Rust type onto its kind bit and its slot in [`Columns`].
pub trait Component: Clone + Sized + 'static {
    const KIND: ComponentKind;

    fn column(columns: &Columns) -> Option<&[Self]>;
    fn column_mut(columns: &mut Columns) -> Option<&mut [Self]>;
    fn from_value(value: ComponentValue) -> Option<Self>;
    fn from_value_ref(value: &ComponentValue) -> Option<&Self>;
}

macro_rules! component_registry {
    ($( $variant:ident($ty:ty) => $field:ident = $index:literal ),* $(,)?) => {
        /// Registered component kinds. The discriminant is the bit index.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum ComponentKind {
            $( $variant = $index ),*
        }

        impl ComponentKind {
            /// Every kind, in ascending bit order.
            pub const ALL: &'static [ComponentKind] = &[$( ComponentKind::$variant ),*];

            pub const fn bit(self) -> u32 {
                1 << (self as u32)
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $( ComponentKind::$variant => stringify!($variant) ),*
                }
            }

            /// Kind owning `bit`, or `None` for a bit nobody registered.
            pub fn from_bit(bit: u32) -> Option<Self> {
                Self::ALL.iter().copied().find(|kind| kind.bit() == bit)
            }
        }

        /// One component value of any registered kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum ComponentValue {
            $( $variant($ty) ),*
        }

        impl ComponentValue {
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $( ComponentValue::$variant(_) => ComponentKind::$variant ),*
                }
            }
        }

        $(
            impl From<$ty> for ComponentValue {
                fn from(value: $ty) -> Self {
                    ComponentValue::$variant(value)
                }
            }

            impl Component for $ty {
                const KIND: ComponentKind = ComponentKind::$variant;

                fn column(columns: &Columns) -> Option<&[Self]> {
                    columns.$field.as_deref()
                }

                fn column_mut(columns: &mut Columns) -> Option<&mut [Self]> {
                    columns.$field.as_deref_mut()
                }

                fn from_value(value: ComponentValue) -> Option<Self> {
                    match value {
                        ComponentValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_value_ref(value: &ComponentValue) -> Option<&Self> {
                    match value {
                        ComponentValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*

        /// Typed column table of one archetype.
        ///
        /// A column is `Some` exactly when the archetype's mask holds its
        /// kind. Lengths are kept equal by [`Archetype`](super::Archetype).
        #[derive(Debug, Clone, Default)]
        pub struct Columns {
            $( $field: Option<Vec<$ty>> ),*
        }

        /// Disjoint mutable borrows of every column, for systems that write
        /// several components of the same row at once.
        pub struct ColumnsMut<'a> {
            $( pub $field: Option<&'a mut [$ty]> ),*
        }

        impl Columns {
            /// Materialize an empty column for `kind`. Existing data is kept.
            pub fn insert_empty(&mut self, kind: ComponentKind) {
                match kind {
                    $( ComponentKind::$variant => {
                        self.$field.get_or_insert_with(Vec::new);
                    } ),*
                }
            }

            pub fn has(&self, kind: ComponentKind) -> bool {
                match kind {
                    $( ComponentKind::$variant => self.$field.is_some() ),*
                }
            }

            pub fn len_of(&self, kind: ComponentKind) -> Option<usize> {
                match kind {
                    $( ComponentKind::$variant => self.$field.as_ref().map(Vec::len) ),*
                }
            }

            /// Append `value` to its column. Returns `false` when the column
            /// is absent and the value was dropped.
            pub fn push(&mut self, value: ComponentValue) -> bool {
                match value {
                    $( ComponentValue::$variant(inner) => match self.$field.as_mut() {
                        Some(column) => {
                            column.push(inner);
                            true
                        }
                        None => false,
                    } ),*
                }
            }

            /// Swap-remove `row` from every present column, returning the
            /// removed values in ascending kind order.
            ///
            /// `row` must be in bounds for every present column.
            pub fn swap_remove(&mut self, row: usize) -> Vec<ComponentValue> {
                let mut removed = Vec::new();
                $(
                    if let Some(column) = self.$field.as_mut() {
                        removed.push(ComponentValue::$variant(column.swap_remove(row)));
                    }
                )*
                removed
            }

            pub fn value_at(&self, kind: ComponentKind, row: usize) -> Option<ComponentValue> {
                match kind {
                    $( ComponentKind::$variant => self
                        .$field
                        .as_ref()
                        .and_then(|column| column.get(row))
                        .cloned()
                        .map(ComponentValue::$variant) ),*
                }
            }

            pub fn view_mut(&mut self) -> ColumnsMut<'_> {
                ColumnsMut {
                    $( $field: self.$field.as_deref_mut() ),*
                }
            }
        }
    };
}

component_registry! {
    Position(Position) => position = 0,
    Sprite(Sprite) => sprite = 1,
    Movement(Movement) => movement = 2,
    Health(Health) => health = 3,
    Alive(Alive) => alive = 4,
    Animation(Animation) => animation = 5,
    PlayerControlled(PlayerControlled) => player_controlled = 6,
    AiControlled(AiControlled) => ai_controlled = 7,
    Collides(Collides) => collides = 8,
    Enemy(Enemy) => enemy = 9,
    Candy(Candy) => candy = 10,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of component kinds as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ComponentMask(u32);

impl ComponentMask {
    pub const EMPTY: ComponentMask = ComponentMask(0);

    /// OR of the kinds' bits.
    pub fn of(kinds: &[ComponentKind]) -> Self {
        kinds.iter().fold(Self::EMPTY, |mask, kind| mask.with(*kind))
    }

    /// Raw bits, registered or not.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Subset test: every bit of `required` is set in `self`.
    pub const fn has_all(self, required: ComponentMask) -> bool {
        self.0 & required.0 == required.0
    }

    pub const fn contains(self, kind: ComponentKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[must_use]
    pub const fn with(self, kind: ComponentKind) -> Self {
        Self(self.0 | kind.bit())
    }

    #[must_use]
    pub const fn without(self, kind: ComponentKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    #[must_use]
    pub const fn toggle(self, kind: ComponentKind) -> Self {
        Self(self.0 ^ kind.bit())
    }

    /// Registered kinds in the mask, ascending by bit.
    pub fn kinds(self) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    /// Bits set in the mask that no registered kind owns.
    pub fn unknown_bits(self) -> u32 {
        let known = ComponentKind::ALL.iter().fold(0, |acc, kind| acc | kind.bit());
        self.0 & !known
    }

    /// Fails on the lowest unregistered bit, if any.
    pub fn validate(self) -> Result<(), EcsError> {
        match self.unknown_bits() {
            0 => Ok(()),
            unknown => Err(EcsError::UnknownComponentKind {
                bit: 1 << unknown.trailing_zeros(),
            }),
        }
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<ComponentKind> for ComponentMask {
    fn from(kind: ComponentKind) -> Self {
        Self(kind.bit())
    }
}

impl BitOr for ComponentMask {
    type Output = ComponentMask;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<ComponentKind> for ComponentMask {
    type Output = ComponentMask;

    fn bitor(self, rhs: ComponentKind) -> Self {
        self.with(rhs)
    }
}

impl fmt::Display for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, kind) in self.kinds().into_iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(kind.name())?;
        }
        if self.unknown_bits() != 0 {
            write!(f, "|?{:#x}", self.unknown_bits())?;
        }
        f.write_str("}")
    }
}

/// One value per kind: the payload handed to entity creation and migration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSet {
    values: BTreeMap<ComponentKind, ComponentValue>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, value: impl Into<ComponentValue>) -> Self {
        self.insert(value);
        self
    }

    /// Insert or replace the value of its kind, returning the previous one.
    pub fn insert(&mut self, value: impl Into<ComponentValue>) -> Option<ComponentValue> {
        let value = value.into();
        self.values.insert(value.kind(), value)
    }

    pub fn get<T: Component>(&self) -> Option<&T> {
        self.values.get(&T::KIND).and_then(T::from_value_ref)
    }

    pub fn remove(&mut self, kind: ComponentKind) -> Option<ComponentValue> {
        self.values.remove(&kind)
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.values.contains_key(&kind)
    }

    pub fn mask(&self) -> ComponentMask {
        self.values
            .keys()
            .fold(ComponentMask::EMPTY, |mask, kind| mask.with(*kind))
    }

    /// Merge `other` into `self`; values from `other` win.
    pub fn merge(&mut self, other: ComponentSet) {
        self.values.extend(other.values);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentValue> {
        self.values.values()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<ComponentValue> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = ComponentValue>>(iter: I) -> Self {
        let mut set = ComponentSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl IntoIterator for ComponentSet {
    type Item = ComponentValue;
    type IntoIter = std::collections::btree_map::IntoValues<ComponentKind, ComponentValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn kinds_own_distinct_bits() {
        let mut seen = 0u32;
        for kind in ComponentKind::ALL {
            assert_eq!(kind.bit().count_ones(), 1);
            assert_eq!(seen & kind.bit(), 0, "{kind} shares a bit");
            seen |= kind.bit();
            assert_eq!(ComponentKind::from_bit(kind.bit()), Some(*kind));
        }
    }

    #[test]
    fn unknown_bit_has_no_kind() {
        assert_eq!(ComponentKind::from_bit(1 << 31), None);
        let mask = ComponentMask::from_bits(ComponentKind::Position.bit() | 1 << 31);
        assert_eq!(mask.kinds(), vec![ComponentKind::Position]);
        assert_eq!(mask.unknown_bits(), 1 << 31);
        assert!(matches!(
            mask.validate(),
            Err(EcsError::UnknownComponentKind { bit }) if bit == 1 << 31
        ));
    }

    #[test]
    fn mask_of_lists_kinds_in_bit_order() {
        let mask = ComponentMask::of(&[
            ComponentKind::Collides,
            ComponentKind::Position,
            ComponentKind::Candy,
        ]);
        assert_eq!(
            mask.kinds(),
            vec![
                ComponentKind::Position,
                ComponentKind::Collides,
                ComponentKind::Candy
            ]
        );
        assert_eq!(mask.to_string(), "{Position|Collides|Candy}");
    }

    #[test]
    fn toggle_removes_present_kind() {
        let mask = ComponentMask::of(&[ComponentKind::Position, ComponentKind::Sprite]);
        let reduced = mask.toggle(ComponentKind::Sprite);
        assert_eq!(reduced, ComponentMask::from(ComponentKind::Position));
        assert_eq!(reduced, mask.without(ComponentKind::Sprite));
    }

    #[test]
    fn new_columns_are_empty_and_typed() {
        let mut columns = Columns::default();
        for kind in ComponentKind::ALL {
            assert!(!columns.has(*kind));
            columns.insert_empty(*kind);
            assert_eq!(columns.len_of(*kind), Some(0));
        }
        assert_eq!(Position::column(&columns), Some(&[][..]));
    }

    #[test]
    fn push_skips_absent_columns() {
        let mut columns = Columns::default();
        columns.insert_empty(ComponentKind::Position);
        assert!(columns.push(Position::new(1.0, 2.0).into()));
        assert!(!columns.push(Candy.into()));
        assert_eq!(
            columns.value_at(ComponentKind::Position, 0),
            Some(ComponentValue::Position(Position::new(1.0, 2.0)))
        );
    }

    #[test]
    fn set_merge_prefers_new_values() {
        let mut set = ComponentSet::new()
            .with(Position::new(0.0, 0.0))
            .with(Candy);
        set.merge(ComponentSet::new().with(Position::new(5.0, 5.0)).with(Enemy));

        assert_eq!(set.len(), 3);
        assert_eq!(set.get::<Position>(), Some(&Position::new(5.0, 5.0)));
        assert_eq!(
            set.mask(),
            ComponentMask::of(&[
                ComponentKind::Position,
                ComponentKind::Enemy,
                ComponentKind::Candy
            ])
        );
    }

    fn any_kinds() -> impl Strategy<Value = Vec<ComponentKind>> {
        prop::collection::vec(prop::sample::select(ComponentKind::ALL.to_vec()), 0..8)
    }

    proptest! {
        #[test]
        fn has_all_is_subset_test(a in any_kinds(), b in any_kinds()) {
            let mask = ComponentMask::of(&a);
            let required = ComponentMask::of(&b);
            let subset = b.iter().all(|kind| a.contains(kind));
            prop_assert_eq!(mask.has_all(required), subset);
            prop_assert!(mask.has_all(ComponentMask::EMPTY));
            prop_assert!((mask | required).has_all(mask));
        }

        #[test]
        fn kinds_round_trip_through_mask(a in any_kinds()) {
            let mask = ComponentMask::of(&a);
            prop_assert_eq!(ComponentMask::of(&mask.kinds()), mask);
            prop_assert_eq!(mask.len() as usize, mask.kinds().len());
        }
    }
}
