//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use offline_player::{
    HostError, Location, NamedWorld, Player, PlayerError, PlayerOperation, PlayerResult,
    WorldHandle, WorldRegistry,
};

#[derive(Debug, Clone)]
pub struct LiveState {
    pub name: String,
    pub first_played: i64,
    pub last_played: i64,
    pub operator: bool,
    pub banned: bool,
    pub played_before: bool,
    pub online: bool,
    pub whitelisted: bool,
    pub bed_spawn: Option<Location>,
    pub display_name: String,
    pub location: Location,
    pub health: f64,
    pub sneaking: bool,
    pub level: i64,
    pub kicked: Option<String>,
    pub messages: Vec<String>,
}

/// Stand-in for a host's online player.
pub struct MockLivePlayer {
    pub state: Mutex<LiveState>,
    world: WorldHandle,
    failing: Option<PlayerOperation>,
}

impl MockLivePlayer {
    /// "Steve", online, bed in the overworld at (10, 64, -3).
    pub fn steve() -> Self {
        let world: WorldHandle = Arc::new(NamedWorld::new("overworld"));
        Self {
            state: Mutex::new(LiveState {
                name: "Steve".into(),
                first_played: 1_577_836_800_000,
                last_played: 1_704_067_200_000,
                operator: false,
                banned: false,
                played_before: true,
                online: true,
                whitelisted: true,
                bed_spawn: Some(Location::in_world(Arc::clone(&world), 10.0, 64.0, -3.0)),
                display_name: "Steve the Builder".into(),
                location: Location::in_world(Arc::clone(&world), 0.5, 70.0, 0.5),
                health: 20.0,
                sneaking: false,
                level: 7,
                kicked: None,
                messages: Vec::new(),
            }),
            world,
            failing: None,
        }
    }

    /// A player whose `operation` query fails on the host side.
    pub fn failing_on(mut self, operation: PlayerOperation) -> Self {
        self.failing = Some(operation);
        self
    }

    pub fn without_bed(self) -> Self {
        self.state.lock().unwrap().bed_spawn = None;
        self
    }

    pub fn snapshot_of_state(&self) -> LiveState {
        self.state.lock().unwrap().clone()
    }

    fn read<T>(&self, operation: PlayerOperation, f: impl FnOnce(&mut LiveState) -> T) -> PlayerResult<T> {
        if self.failing == Some(operation) {
            return Err(HostError::new(format!("{} unavailable", operation.name())).into());
        }
        Ok(f(&mut self.state.lock().unwrap()))
    }
}

impl Player for MockLivePlayer {
    fn name(&self) -> PlayerResult<String> {
        self.read(PlayerOperation::Name, |s| s.name.clone())
    }

    fn first_played(&self) -> PlayerResult<i64> {
        self.read(PlayerOperation::FirstPlayed, |s| s.first_played)
    }

    fn last_played(&self) -> PlayerResult<i64> {
        self.read(PlayerOperation::LastPlayed, |s| s.last_played)
    }

    fn is_op(&self) -> PlayerResult<bool> {
        self.read(PlayerOperation::IsOp, |s| s.operator)
    }

    fn set_op(&self, operator: bool) -> PlayerResult<()> {
        self.read(PlayerOperation::SetOp, |s| s.operator = operator)
    }

    fn is_banned(&self) -> PlayerResult<bool> {
        self.read(PlayerOperation::IsBanned, |s| s.banned)
    }

    fn set_banned(&self, banned: bool) -> PlayerResult<()> {
        self.read(PlayerOperation::SetBanned, |s| s.banned = banned)
    }

    fn has_played_before(&self) -> PlayerResult<bool> {
        self.read(PlayerOperation::HasPlayedBefore, |s| s.played_before)
    }

    fn is_online(&self) -> PlayerResult<bool> {
        self.read(PlayerOperation::IsOnline, |s| s.online)
    }

    fn is_whitelisted(&self) -> PlayerResult<bool> {
        self.read(PlayerOperation::IsWhitelisted, |s| s.whitelisted)
    }

    fn set_whitelisted(&self, whitelisted: bool) -> PlayerResult<()> {
        self.read(PlayerOperation::SetWhitelisted, |s| s.whitelisted = whitelisted)
    }

    fn bed_spawn_location(&self) -> PlayerResult<Option<Location>> {
        self.read(PlayerOperation::BedSpawnLocation, |s| s.bed_spawn.clone())
    }

    fn display_name(&self) -> PlayerResult<String> {
        self.read(PlayerOperation::DisplayName, |s| s.display_name.clone())
    }

    fn set_display_name(&self, display_name: &str) -> PlayerResult<()> {
        self.read(PlayerOperation::SetDisplayName, |s| s.display_name = display_name.to_string())
    }

    fn kick(&self, reason: &str) -> PlayerResult<()> {
        self.read(PlayerOperation::Kick, |s| {
            s.kicked = Some(reason.to_string());
            s.online = false;
        })
    }

    fn send_message(&self, message: &str) -> PlayerResult<()> {
        self.read(PlayerOperation::SendMessage, |s| s.messages.push(message.to_string()))
    }

    fn chat(&self, message: &str) -> PlayerResult<()> {
        self.read(PlayerOperation::Chat, |s| s.messages.push(format!("<{}> {message}", s.name)))
    }

    fn perform_command(&self, command: &str) -> PlayerResult<bool> {
        self.read(PlayerOperation::PerformCommand, |_| command == "spawn")
    }

    fn location(&self) -> PlayerResult<Location> {
        self.read(PlayerOperation::Location, |s| s.location.clone())
    }

    fn teleport(&self, destination: Location) -> PlayerResult<bool> {
        self.read(PlayerOperation::Teleport, |s| {
            s.location = destination;
            true
        })
    }

    fn world(&self) -> PlayerResult<WorldHandle> {
        self.read(PlayerOperation::World, |_| Arc::clone(&self.world))
    }

    fn health(&self) -> PlayerResult<f64> {
        self.read(PlayerOperation::Health, |s| s.health)
    }

    fn set_health(&self, health: f64) -> PlayerResult<()> {
        self.read(PlayerOperation::SetHealth, |s| s.health = health)
    }

    fn is_sneaking(&self) -> PlayerResult<bool> {
        self.read(PlayerOperation::IsSneaking, |s| s.sneaking)
    }

    fn set_sneaking(&self, sneaking: bool) -> PlayerResult<()> {
        self.read(PlayerOperation::SetSneaking, |s| s.sneaking = sneaking)
    }

    fn level(&self) -> PlayerResult<i64> {
        self.read(PlayerOperation::Level, |s| s.level)
    }

    fn set_level(&self, level: i64) -> PlayerResult<()> {
        self.read(PlayerOperation::SetLevel, |s| s.level = level)
    }
}

/// Registry that knows every world name it is asked about.
pub struct EveryWorld;

impl WorldRegistry for EveryWorld {
    fn find_world(&self, name: &str) -> Result<Option<WorldHandle>, HostError> {
        Ok(Some(Arc::new(NamedWorld::new(name))))
    }
}

/// Registry that cannot answer at all.
pub struct UnavailableWorlds;

impl WorldRegistry for UnavailableWorlds {
    fn find_world(&self, _name: &str) -> Result<Option<WorldHandle>, HostError> {
        Err(HostError::new("world registry not ready"))
    }
}

pub fn not_supported(name: &str) -> PlayerError {
    PlayerError::CapabilityNotSupported(name.to_string())
}
