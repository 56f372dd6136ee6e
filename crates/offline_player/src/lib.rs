//! Offline player snapshots and capability-limited player proxies.
//!
//! A live player only exists while the host is running. This crate keeps the
//! part of it that still makes sense afterwards:
//!
//! - [`PlayerSnapshot::capture`] copies the offline state out of a live
//!   [`Player`] (all fields or nothing).
//! - [`PlayerSnapshot::to_bytes`] / [`PlayerSnapshot::from_bytes`] move it over
//!   the wire or onto disk. The bed spawn location travels as a world *name*;
//!   if that world is gone when decoding, the location keeps its coordinates and
//!   simply has no world handle.
//! - [`PlayerSnapshot::as_proxy`] turns it back into a full [`Player`]. Calls in
//!   the offline capability set are answered from the snapshot, every other call
//!   fails with [`PlayerError::CapabilityNotSupported`].
//!
//! # Example
//! ```
//! use offline_player::{InMemoryWorlds, Player, PlayerError, PlayerSnapshot};
//!
//! # fn demo(live: &dyn Player) -> Result<(), PlayerError> {
//! let snapshot = PlayerSnapshot::capture(live)?;
//! let bytes = snapshot.to_bytes()?;
//!
//! let restored = PlayerSnapshot::from_bytes(&bytes, &InMemoryWorlds::new())?;
//! let proxy = restored.as_proxy();
//! println!("{} is offline", proxy.name()?);
//! assert!(proxy.kick("bye").is_err());
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod host;
pub mod location;
pub mod operation;
pub mod player;
pub mod proxy;
pub mod settings;
pub mod snapshot;
pub mod store;

pub use error::{HostError, PlayerError, PlayerResult};
pub use host::{
    InMemoryPlayers, InMemoryWorlds, NamedWorld, PlayerDirectory, World, WorldHandle,
    WorldRegistry,
};
pub use location::Location;
pub use operation::{
    dispatch_table, DispatchTable, OfflineOperation, OperationValue, PlayerOperation,
};
pub use player::{OfflinePlayer, Player};
pub use proxy::{ProxyPlayer, SharedSnapshot};
pub use settings::{Settings, SnapshotSettings};
pub use snapshot::PlayerSnapshot;
pub use store::SnapshotStore;
