//! Narrow interfaces to the live host.
//!
//! The host owns the real worlds and the online players. This crate only ever
//! asks it two questions: "which world has this name?" while decoding a bed
//! location, and "is a player with this exact name online?" when a caller wants
//! the live player back. Everything else stays on the host side.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{error::HostError, player::Player};

/// A live world owned by the host.
pub trait World: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

pub type WorldHandle = Arc<dyn World>;

/// Resolves world names to live worlds.
pub trait WorldRegistry {
    fn find_world(&self, name: &str) -> Result<Option<WorldHandle>, HostError>;
}

/// Resolves player names to online players.
pub trait PlayerDirectory {
    fn find_exact(&self, name: &str) -> Result<Option<Arc<dyn Player>>, HostError>;
}

/// A world that is nothing but its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedWorld {
    name: String,
}

impl NamedWorld {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl World for NamedWorld {
    fn name(&self) -> &str {
        &self.name
    }
}

/// In-process world registry.
#[derive(Debug, Default)]
pub struct InMemoryWorlds {
    worlds: RwLock<HashMap<String, WorldHandle>>,
}

impl InMemoryWorlds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, world: WorldHandle) {
        let name = world.name().to_string();
        self.worlds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, world);
    }

    /// Unloads a world; locations decoded afterwards keep only its name.
    pub fn remove(&self, name: &str) -> Option<WorldHandle> {
        self.worlds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }
}

impl WorldRegistry for InMemoryWorlds {
    fn find_world(&self, name: &str) -> Result<Option<WorldHandle>, HostError> {
        let worlds = self.worlds.read().unwrap_or_else(PoisonError::into_inner);
        Ok(worlds.get(name).cloned())
    }
}

/// In-process directory of online players.
#[derive(Default)]
pub struct InMemoryPlayers {
    players: RwLock<HashMap<String, Arc<dyn Player>>>,
}

impl InMemoryPlayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: impl Into<String>, player: Arc<dyn Player>) {
        self.players
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), player);
    }

    pub fn remove(&self, name: &str) -> Option<Arc<dyn Player>> {
        self.players
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }
}

impl PlayerDirectory for InMemoryPlayers {
    fn find_exact(&self, name: &str) -> Result<Option<Arc<dyn Player>>, HostError> {
        let players = self.players.read().unwrap_or_else(PoisonError::into_inner);
        Ok(players.get(name).cloned())
    }
}
