//! Positions inside a named world.

use std::fmt;

use tracing::debug;

use crate::host::{World, WorldHandle, WorldRegistry};

/// A point in a named world.
///
/// The world is kept by name. The live handle is optional: it is absent when the
/// location was decoded while the world was not loaded, and can be looked up
/// again later with [`Location::resolve_world`].
#[derive(Clone)]
pub struct Location {
    world_name: String,
    world: Option<WorldHandle>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    /// Creates a location that only knows the world's name.
    pub fn new(world_name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world_name: world_name.into(),
            world: None,
            x,
            y,
            z,
        }
    }

    /// Creates a location inside a live world.
    pub fn in_world(world: WorldHandle, x: f64, y: f64, z: f64) -> Self {
        Self {
            world_name: world.name().to_string(),
            world: Some(world),
            x,
            y,
            z,
        }
    }

    pub fn world_name(&self) -> &str {
        &self.world_name
    }

    /// Live world handle, if the world was resolvable when this location was built.
    pub fn world(&self) -> Option<&WorldHandle> {
        self.world.as_ref()
    }

    /// Looks the world up by name and attaches the handle.
    ///
    /// Lookup failures leave the handle unset; the coordinates are kept either way.
    pub fn resolve_world(&mut self, registry: &dyn WorldRegistry) -> Option<&WorldHandle> {
        self.world = match registry.find_world(&self.world_name) {
            Ok(Some(world)) => Some(world),
            Ok(None) => {
                debug!(world = %self.world_name, "world not loaded, keeping coordinates only");
                None
            }
            Err(err) => {
                debug!(world = %self.world_name, %err, "world lookup unavailable, keeping coordinates only");
                None
            }
        };
        self.world.as_ref()
    }
}

// Handles are compared by the world they name, never by identity.
impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.world_name == other.world_name
            && self.world.is_some() == other.world.is_some()
            && self.x == other.x
            && self.y == other.y
            && self.z == other.z
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("world_name", &self.world_name)
            .field("resolved", &self.world.is_some())
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}
