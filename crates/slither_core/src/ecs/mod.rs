//! Entity Component System core types.
//!
//! Entities with an identical component set share one [`Archetype`]: a dense
//! table with a typed column per component kind. The [`World`] keys
//! archetypes by [`ComponentMask`] and moves rows between them whenever an
//! entity gains or loses a component.

mod archetype;
mod commands;
mod component;
mod entity;
mod error;
mod system_descriptor;
mod world;

pub use archetype::Archetype;
pub use commands::{Command, CommandBuffer};
pub use component::{
    Columns, ColumnsMut, Component, ComponentKind, ComponentMask, ComponentSet, ComponentValue,
};
pub use entity::{Entity, EntityAllocator};
pub use error::EcsError;
pub use system_descriptor::SystemDescriptor;
pub use world::World;

/// Build a [`ComponentSet`] from component values.
///
/// ```ignore
/// let set = component_set![Position::new(0.0, 0.0), Candy];
/// ```
#[macro_export]
macro_rules! component_set {
    ($($component:expr),* $(,)?) => {{
        let set = $crate::ecs::ComponentSet::new();
        $( let set = set.with($component); )*
        set
    }};
}
