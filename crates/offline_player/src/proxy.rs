//! A full [`Player`] backed by nothing but a snapshot.
//!
//! [`ProxyPlayer`] implements every operation of the wide interface, but each
//! method body does the same thing: look its own name up in the offline
//! [`DispatchTable`](crate::DispatchTable) and either forward to the snapshot or
//! fail with [`PlayerError::CapabilityNotSupported`]. Callers written against a
//! live player keep working for the offline subset and fail loudly for the rest.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::{
    error::{PlayerError, PlayerResult},
    host::WorldHandle,
    location::Location,
    operation::{dispatch_table, OfflineOperation, OperationValue, PlayerOperation},
    player::{OfflinePlayer, Player},
    snapshot::PlayerSnapshot,
};

/// Snapshot shared between proxies; setters take the write lock.
pub type SharedSnapshot = Arc<RwLock<PlayerSnapshot>>;

/// Wide-interface stand-in for an offline player.
#[derive(Debug, Clone)]
pub struct ProxyPlayer {
    snapshot: SharedSnapshot,
}

impl ProxyPlayer {
    pub fn new(snapshot: PlayerSnapshot) -> Self {
        Self::from_shared(Arc::new(RwLock::new(snapshot)))
    }

    /// Proxy over a snapshot other proxies may also hold.
    pub fn from_shared(snapshot: SharedSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn shared(&self) -> &SharedSnapshot {
        &self.snapshot
    }

    /// Copy of the snapshot as it is now, including writes made through proxies.
    pub fn snapshot(&self) -> PlayerSnapshot {
        read(&self.snapshot).clone()
    }

    /// Routes a call by operation name.
    ///
    /// Names outside the offline capability set fail with
    /// [`PlayerError::CapabilityNotSupported`] before the arguments are looked at.
    pub fn invoke(&self, operation: &str, args: &[OperationValue]) -> PlayerResult<OperationValue> {
        let table = dispatch_table()?;
        match table.get(operation) {
            Some(offline) if offline.is_setter() => {
                debug!(operation, "updating snapshot copy only, live player untouched");
                forward(&self.snapshot, offline, args)
            }
            Some(offline) => forward(&self.snapshot, offline, args),
            None => Err(PlayerError::CapabilityNotSupported(operation.to_string())),
        }
    }

    fn call<T>(&self, operation: PlayerOperation, args: &[OperationValue]) -> PlayerResult<T>
    where
        T: TryFrom<OperationValue, Error = OperationValue>,
    {
        let value = self.invoke(operation.name(), args)?;
        T::try_from(value).map_err(|found| PlayerError::InvalidArguments {
            operation: operation.name().to_string(),
            reason: format!("unexpected {} result", found.kind()),
        })
    }
}

impl From<PlayerSnapshot> for ProxyPlayer {
    fn from(snapshot: PlayerSnapshot) -> Self {
        Self::new(snapshot)
    }
}

fn read(snapshot: &RwLock<PlayerSnapshot>) -> RwLockReadGuard<'_, PlayerSnapshot> {
    snapshot.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(snapshot: &RwLock<PlayerSnapshot>) -> RwLockWriteGuard<'_, PlayerSnapshot> {
    snapshot.write().unwrap_or_else(PoisonError::into_inner)
}

/// Runs a supported operation against the snapshot.
fn forward(
    snapshot: &RwLock<PlayerSnapshot>,
    operation: OfflineOperation,
    args: &[OperationValue],
) -> PlayerResult<OperationValue> {
    use OfflineOperation as Op;

    let value: OperationValue = match operation {
        Op::Name => {
            no_args(operation, args)?;
            read(snapshot).name().to_string().into()
        }
        Op::FirstPlayed => {
            no_args(operation, args)?;
            read(snapshot).first_played().into()
        }
        Op::LastPlayed => {
            no_args(operation, args)?;
            read(snapshot).last_played().into()
        }
        Op::IsOp => {
            no_args(operation, args)?;
            read(snapshot).is_op().into()
        }
        Op::SetOp => {
            let operator = bool_arg(operation, args)?;
            write(snapshot).set_op(operator);
            OperationValue::Unit
        }
        Op::IsBanned => {
            no_args(operation, args)?;
            read(snapshot).is_banned().into()
        }
        Op::SetBanned => {
            let banned = bool_arg(operation, args)?;
            write(snapshot).set_banned(banned);
            OperationValue::Unit
        }
        Op::HasPlayedBefore => {
            no_args(operation, args)?;
            read(snapshot).has_played_before().into()
        }
        Op::IsOnline => {
            no_args(operation, args)?;
            read(snapshot).is_online().into()
        }
        Op::IsWhitelisted => {
            no_args(operation, args)?;
            read(snapshot).is_whitelisted().into()
        }
        Op::SetWhitelisted => {
            let whitelisted = bool_arg(operation, args)?;
            write(snapshot).set_whitelisted(whitelisted);
            OperationValue::Unit
        }
        Op::BedSpawnLocation => {
            no_args(operation, args)?;
            read(snapshot).bed_spawn_location().into()
        }
    };
    Ok(value)
}

fn no_args(operation: OfflineOperation, args: &[OperationValue]) -> PlayerResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(PlayerError::InvalidArguments {
            operation: operation.name().to_string(),
            reason: format!("expected no arguments, got {}", args.len()),
        })
    }
}

fn bool_arg(operation: OfflineOperation, args: &[OperationValue]) -> PlayerResult<bool> {
    match args {
        [OperationValue::Bool(value)] => Ok(*value),
        [other] => Err(PlayerError::InvalidArguments {
            operation: operation.name().to_string(),
            reason: format!("expected a bool, got {}", other.kind()),
        }),
        _ => Err(PlayerError::InvalidArguments {
            operation: operation.name().to_string(),
            reason: format!("expected one argument, got {}", args.len()),
        }),
    }
}

impl Player for ProxyPlayer {
    fn name(&self) -> PlayerResult<String> {
        self.call(PlayerOperation::Name, &[])
    }

    fn first_played(&self) -> PlayerResult<i64> {
        self.call(PlayerOperation::FirstPlayed, &[])
    }

    fn last_played(&self) -> PlayerResult<i64> {
        self.call(PlayerOperation::LastPlayed, &[])
    }

    fn is_op(&self) -> PlayerResult<bool> {
        self.call(PlayerOperation::IsOp, &[])
    }

    fn set_op(&self, operator: bool) -> PlayerResult<()> {
        self.call(PlayerOperation::SetOp, &[operator.into()])
    }

    fn is_banned(&self) -> PlayerResult<bool> {
        self.call(PlayerOperation::IsBanned, &[])
    }

    fn set_banned(&self, banned: bool) -> PlayerResult<()> {
        self.call(PlayerOperation::SetBanned, &[banned.into()])
    }

    fn has_played_before(&self) -> PlayerResult<bool> {
        self.call(PlayerOperation::HasPlayedBefore, &[])
    }

    fn is_online(&self) -> PlayerResult<bool> {
        self.call(PlayerOperation::IsOnline, &[])
    }

    fn is_whitelisted(&self) -> PlayerResult<bool> {
        self.call(PlayerOperation::IsWhitelisted, &[])
    }

    fn set_whitelisted(&self, whitelisted: bool) -> PlayerResult<()> {
        self.call(PlayerOperation::SetWhitelisted, &[whitelisted.into()])
    }

    fn bed_spawn_location(&self) -> PlayerResult<Option<Location>> {
        self.call(PlayerOperation::BedSpawnLocation, &[])
    }

    fn display_name(&self) -> PlayerResult<String> {
        self.call(PlayerOperation::DisplayName, &[])
    }

    fn set_display_name(&self, display_name: &str) -> PlayerResult<()> {
        self.call(PlayerOperation::SetDisplayName, &[display_name.into()])
    }

    fn kick(&self, reason: &str) -> PlayerResult<()> {
        self.call(PlayerOperation::Kick, &[reason.into()])
    }

    fn send_message(&self, message: &str) -> PlayerResult<()> {
        self.call(PlayerOperation::SendMessage, &[message.into()])
    }

    fn chat(&self, message: &str) -> PlayerResult<()> {
        self.call(PlayerOperation::Chat, &[message.into()])
    }

    fn perform_command(&self, command: &str) -> PlayerResult<bool> {
        self.call(PlayerOperation::PerformCommand, &[command.into()])
    }

    fn location(&self) -> PlayerResult<Location> {
        self.call(PlayerOperation::Location, &[])
    }

    fn teleport(&self, destination: Location) -> PlayerResult<bool> {
        self.call(PlayerOperation::Teleport, &[destination.into()])
    }

    fn world(&self) -> PlayerResult<WorldHandle> {
        self.call(PlayerOperation::World, &[])
    }

    fn health(&self) -> PlayerResult<f64> {
        self.call(PlayerOperation::Health, &[])
    }

    fn set_health(&self, health: f64) -> PlayerResult<()> {
        self.call(PlayerOperation::SetHealth, &[health.into()])
    }

    fn is_sneaking(&self) -> PlayerResult<bool> {
        self.call(PlayerOperation::IsSneaking, &[])
    }

    fn set_sneaking(&self, sneaking: bool) -> PlayerResult<()> {
        self.call(PlayerOperation::SetSneaking, &[sneaking.into()])
    }

    fn level(&self) -> PlayerResult<i64> {
        self.call(PlayerOperation::Level, &[])
    }

    fn set_level(&self, level: i64) -> PlayerResult<()> {
        self.call(PlayerOperation::SetLevel, &[level.into()])
    }
}
