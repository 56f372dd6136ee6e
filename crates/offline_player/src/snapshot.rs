//! Point-in-time copy of a player's offline state.

use std::sync::{Arc, RwLock};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    codec,
    error::{PlayerError, PlayerResult},
    host::{PlayerDirectory, WorldRegistry},
    location::Location,
    player::{OfflinePlayer, Player},
    proxy::{ProxyPlayer, SharedSnapshot},
    settings::SnapshotSettings,
};

/// Serializable snapshot of a player.
///
/// Every flag is copied when the snapshot is captured and goes stale right
/// after; nothing here refers back to the live player. Only `operator`,
/// `banned` and `whitelisted` can be changed afterwards, and only on this copy.
///
/// The bed spawn location is not part of the serde representation. The codec
/// writes it separately because its world has to be looked up again by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub(crate) name: String,
    pub(crate) first_played: i64,
    pub(crate) last_played: i64,
    pub(crate) operator: bool,
    pub(crate) banned: bool,
    pub(crate) played_before: bool,
    pub(crate) online: bool,
    pub(crate) whitelisted: bool,
    #[serde(skip)]
    pub(crate) bed_spawn: Option<Location>,
}

impl PlayerSnapshot {
    /// Copies the offline state out of a live player.
    ///
    /// Either every field is read or nothing is returned: the first failing
    /// query aborts the capture with [`PlayerError::CaptureFailed`].
    pub fn capture<P>(live: &P) -> PlayerResult<Self>
    where
        P: Player + ?Sized,
    {
        Ok(Self {
            name: captured("name", live.name())?,
            first_played: captured("first_played", live.first_played())?,
            last_played: captured("last_played", live.last_played())?,
            operator: captured("is_op", live.is_op())?,
            banned: captured("is_banned", live.is_banned())?,
            played_before: captured("has_played_before", live.has_played_before())?,
            online: captured("is_online", live.is_online())?,
            whitelisted: captured("is_whitelisted", live.is_whitelisted())?,
            bed_spawn: captured("bed_spawn_location", live.bed_spawn_location())?,
        })
    }

    /// Encodes the snapshot into its wire format.
    pub fn to_bytes(&self) -> PlayerResult<Bytes> {
        codec::encode(self)
    }

    /// Decodes a snapshot, looking the bed spawn world up in `worlds`.
    pub fn from_bytes(bytes: &[u8], worlds: &dyn WorldRegistry) -> PlayerResult<Self> {
        codec::decode(bytes, worlds)
    }

    /// Wraps the snapshot into a full [`Player`] that answers the offline subset.
    pub fn as_proxy(self) -> ProxyPlayer {
        ProxyPlayer::new(self)
    }

    /// Moves the snapshot behind a lock so several proxies can share it.
    pub fn into_shared(self) -> SharedSnapshot {
        Arc::new(RwLock::new(self))
    }

    /// Looks for the live player with this snapshot's name.
    ///
    /// Returns the online player if the directory has one and `None` if the
    /// player is not online. When the directory itself fails, the snapshot's own
    /// proxy is returned instead if `settings.fallback_to_proxy` is set.
    pub fn resolve_player(
        &self,
        directory: &dyn PlayerDirectory,
        settings: &SnapshotSettings,
    ) -> Option<Arc<dyn Player>> {
        match directory.find_exact(&self.name) {
            Ok(found) => found,
            Err(err) if settings.fallback_to_proxy => {
                warn!(player = %self.name, %err, "player lookup failed, answering from snapshot");
                Some(Arc::new(self.clone().as_proxy()))
            }
            Err(err) => {
                warn!(player = %self.name, %err, "player lookup failed");
                None
            }
        }
    }
}

fn captured<T>(field: &'static str, result: PlayerResult<T>) -> PlayerResult<T> {
    result.map_err(|err| PlayerError::CaptureFailed {
        field,
        reason: err.to_string(),
    })
}

impl OfflinePlayer for PlayerSnapshot {
    fn name(&self) -> &str {
        &self.name
    }

    fn first_played(&self) -> i64 {
        self.first_played
    }

    fn last_played(&self) -> i64 {
        self.last_played
    }

    fn is_op(&self) -> bool {
        self.operator
    }

    fn set_op(&mut self, operator: bool) {
        self.operator = operator;
    }

    fn is_banned(&self) -> bool {
        self.banned
    }

    fn set_banned(&mut self, banned: bool) {
        self.banned = banned;
    }

    fn has_played_before(&self) -> bool {
        self.played_before
    }

    fn is_online(&self) -> bool {
        self.online
    }

    fn is_whitelisted(&self) -> bool {
        self.whitelisted
    }

    fn set_whitelisted(&mut self, whitelisted: bool) {
        self.whitelisted = whitelisted;
    }

    fn bed_spawn_location(&self) -> Option<Location> {
        self.bed_spawn.clone()
    }
}
