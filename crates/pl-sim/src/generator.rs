//! Named system generators and their registry.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::system::System;

/// Produces a fully wired [`System`] with default parameters.
///
/// Generators are cheap descriptors: every call builds a fresh, unstepped
/// system. An error means a built-in invariant was violated, not bad input.
pub trait SystemGenerator: Send + Sync {
    /// Registry key, unique per registry.
    fn name(&self) -> &str;

    /// One-line human description.
    fn description(&self) -> &str {
        ""
    }

    fn generate_system(&self) -> SimResult<System>;
}

/// Explicit generator registry, keyed and iterated by name.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Box<dyn SystemGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in loops (see [`crate::presets`]).
    pub fn with_builtins() -> SimResult<Self> {
        let mut registry = Self::new();
        crate::presets::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Add a generator. Names must be unique.
    pub fn register(&mut self, generator: Box<dyn SystemGenerator>) -> SimResult<()> {
        let name = generator.name().to_string();
        if self.generators.contains_key(&name) {
            return Err(SimError::DuplicateGenerator { name });
        }
        debug!(generator = %name, "registered generator");
        self.generators.insert(name, generator);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn SystemGenerator> {
        self.generators.get(name).map(|g| g.as_ref())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn SystemGenerator> {
        self.generators.values().map(|g| g.as_ref())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Build a fresh system from the generator called `name`.
    pub fn generate(&self, name: &str) -> SimResult<System> {
        let generator = self.get(name).ok_or_else(|| SimError::UnknownGenerator {
            name: name.to_string(),
        })?;
        debug!(generator = name, "generating system");
        generator.generate_system()
    }
}
