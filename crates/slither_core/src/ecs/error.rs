use crate::ecs::{ComponentMask, Entity};
use thiserror::Error;

/// Outcomes of world and archetype operations that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    #[error("{entity} does not exist")]
    NotFound { entity: Entity },

    #[error("component set for archetype {mask} is missing {missing}")]
    InvalidComponentSet {
        mask: ComponentMask,
        missing: ComponentMask,
    },

    #[error("mask bit {bit:#x} has no registered component kind")]
    UnknownComponentKind { bit: u32 },

    #[error("entity ids exhausted")]
    IdsExhausted,
}
