use super::{System, TickContext};
use crate::ecs::{ComponentMask, EcsError, World};
use slither_metrics::{time_scope, SystemProfiler};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("system '{name}' is already scheduled")]
    DuplicateName { name: String },

    #[error("system '{name}' declares no component access")]
    NoComponentAccess { name: String },

    #[error("system '{name}' failed")]
    System {
        name: String,
        #[source]
        source: EcsError,
    },
}

/// Ordered list of systems run once per simulation tick.
#[derive(Default)]
pub struct Schedule {
    systems: Vec<Box<dyn System>>,
    profiler: SystemProfiler,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `system`; it runs after everything added before it.
    ///
    /// Systems must declare at least one component they read or write.
    /// Overlapping access with earlier systems is allowed since everything
    /// runs sequentially; it is logged so ordering dependencies stay visible.
    pub fn add_system(&mut self, system: impl System + 'static) -> Result<(), ScheduleError> {
        let descriptor = system.descriptor();
        let name = descriptor.name().to_owned();
        if descriptor.is_empty() {
            return Err(ScheduleError::NoComponentAccess { name });
        }
        if self.names().any(|existing| existing == name) {
            return Err(ScheduleError::DuplicateName { name });
        }

        for earlier in self.systems.iter().map(|system| system.descriptor()) {
            if descriptor.conflicts_with(&earlier) {
                let shared = descriptor.access_mask().bits() & earlier.access_mask().bits();
                debug!(
                    system = %name,
                    after = earlier.name(),
                    shared = %ComponentMask::from_bits(shared),
                    writes = %descriptor.write_mask(),
                    earlier_writes = %earlier.write_mask(),
                    "system access overlaps an earlier system"
                );
            }
        }

        self.systems.push(Box::new(system));
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.systems
            .iter()
            .map(|system| system.descriptor().name().to_owned())
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Run every system in order. Returns `false` without touching the world
    /// while it is paused.
    pub fn run(
        &mut self,
        world: &mut World,
        ctx: &TickContext<'_>,
    ) -> Result<bool, ScheduleError> {
        if world.run_state().is_paused() {
            return Ok(false);
        }

        for system in self.systems.iter_mut() {
            let descriptor = system.descriptor();
            let name = descriptor.name();
            trace!(system = name, dt = ctx.dt, "running system");
            time_scope!(self.profiler, name, { system.run(world, ctx) }).map_err(|source| {
                ScheduleError::System {
                    name: name.to_owned(),
                    source,
                }
            })?;
        }
        Ok(true)
    }

    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }
}
