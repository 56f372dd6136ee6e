//! Player interfaces.
//!
//! [`OfflinePlayer`] is the narrow interface: the part of a player that still
//! means something when nobody is connected. [`Player`] is the wide interface a
//! live host exposes for an online player; it is a strict superset.

use crate::{error::PlayerResult, host::WorldHandle, location::Location};

/// State of a player that survives disconnecting.
pub trait OfflinePlayer {
    fn name(&self) -> &str;

    /// Milliseconds since the epoch at which the player first joined.
    fn first_played(&self) -> i64;

    /// Milliseconds since the epoch at which the player was last seen.
    fn last_played(&self) -> i64;

    fn is_op(&self) -> bool;

    fn set_op(&mut self, operator: bool);

    fn is_banned(&self) -> bool;

    fn set_banned(&mut self, banned: bool);

    fn has_played_before(&self) -> bool;

    fn is_online(&self) -> bool;

    fn is_whitelisted(&self) -> bool;

    fn set_whitelisted(&mut self, whitelisted: bool);

    fn bed_spawn_location(&self) -> Option<Location>;
}

/// Full player interface.
///
/// Every operation is fallible: a live host may lose the player between calls,
/// and a [`ProxyPlayer`](crate::ProxyPlayer) rejects everything outside the
/// offline capability set.
pub trait Player: Send + Sync {
    // ------------------------------------------------------------------------
    // Offline state
    // ------------------------------------------------------------------------

    fn name(&self) -> PlayerResult<String>;

    fn first_played(&self) -> PlayerResult<i64>;

    fn last_played(&self) -> PlayerResult<i64>;

    fn is_op(&self) -> PlayerResult<bool>;

    fn set_op(&self, operator: bool) -> PlayerResult<()>;

    fn is_banned(&self) -> PlayerResult<bool>;

    fn set_banned(&self, banned: bool) -> PlayerResult<()>;

    fn has_played_before(&self) -> PlayerResult<bool>;

    fn is_online(&self) -> PlayerResult<bool>;

    fn is_whitelisted(&self) -> PlayerResult<bool>;

    fn set_whitelisted(&self, whitelisted: bool) -> PlayerResult<()>;

    fn bed_spawn_location(&self) -> PlayerResult<Option<Location>>;

    // ------------------------------------------------------------------------
    // Live only
    // ------------------------------------------------------------------------

    fn display_name(&self) -> PlayerResult<String>;

    fn set_display_name(&self, display_name: &str) -> PlayerResult<()>;

    /// Disconnects the player with the given reason.
    fn kick(&self, reason: &str) -> PlayerResult<()>;

    fn send_message(&self, message: &str) -> PlayerResult<()>;

    /// Makes the player say something in chat.
    fn chat(&self, message: &str) -> PlayerResult<()>;

    /// Runs a command as this player. Returns whether the command was found.
    fn perform_command(&self, command: &str) -> PlayerResult<bool>;

    fn location(&self) -> PlayerResult<Location>;

    fn teleport(&self, destination: Location) -> PlayerResult<bool>;

    fn world(&self) -> PlayerResult<WorldHandle>;

    fn health(&self) -> PlayerResult<f64>;

    fn set_health(&self, health: f64) -> PlayerResult<()>;

    fn is_sneaking(&self) -> PlayerResult<bool>;

    fn set_sneaking(&self, sneaking: bool) -> PlayerResult<()>;

    fn level(&self) -> PlayerResult<i64>;

    fn set_level(&self, level: i64) -> PlayerResult<()>;
}
