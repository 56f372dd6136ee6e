//! Operation names, call values and the offline dispatch table.
//!
//! A proxy routes every call by name. The names come from two inventories:
//! [`PlayerOperation`] lists every operation of the wide [`Player`](crate::Player)
//! interface, and [`OfflineOperation`] lists the operations an offline snapshot
//! can answer. The [`DispatchTable`] indexes the latter by name and is the only
//! thing a proxy consults to decide whether a call is supported.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    sync::OnceLock,
};

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::debug;

use crate::{
    error::{PlayerError, PlayerResult},
    host::{World, WorldHandle},
    location::Location,
};

// ============================================================================
// Operation inventories
// ============================================================================

/// Every operation of the wide player interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PlayerOperation {
    Name,
    FirstPlayed,
    LastPlayed,
    IsOp,
    SetOp,
    IsBanned,
    SetBanned,
    HasPlayedBefore,
    IsOnline,
    IsWhitelisted,
    SetWhitelisted,
    BedSpawnLocation,
    DisplayName,
    SetDisplayName,
    Kick,
    SendMessage,
    Chat,
    PerformCommand,
    Location,
    Teleport,
    World,
    Health,
    SetHealth,
    IsSneaking,
    SetSneaking,
    Level,
    SetLevel,
}

impl PlayerOperation {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Operations an offline snapshot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum OfflineOperation {
    Name,
    FirstPlayed,
    LastPlayed,
    IsOp,
    SetOp,
    IsBanned,
    SetBanned,
    HasPlayedBefore,
    IsOnline,
    IsWhitelisted,
    SetWhitelisted,
    BedSpawnLocation,
}

impl OfflineOperation {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The same operation in the wide interface.
    pub fn as_player_operation(self) -> PlayerOperation {
        match self {
            Self::Name => PlayerOperation::Name,
            Self::FirstPlayed => PlayerOperation::FirstPlayed,
            Self::LastPlayed => PlayerOperation::LastPlayed,
            Self::IsOp => PlayerOperation::IsOp,
            Self::SetOp => PlayerOperation::SetOp,
            Self::IsBanned => PlayerOperation::IsBanned,
            Self::SetBanned => PlayerOperation::SetBanned,
            Self::HasPlayedBefore => PlayerOperation::HasPlayedBefore,
            Self::IsOnline => PlayerOperation::IsOnline,
            Self::IsWhitelisted => PlayerOperation::IsWhitelisted,
            Self::SetWhitelisted => PlayerOperation::SetWhitelisted,
            Self::BedSpawnLocation => PlayerOperation::BedSpawnLocation,
        }
    }

    /// Whether the operation writes to the snapshot.
    pub fn is_setter(self) -> bool {
        matches!(self, Self::SetOp | Self::SetBanned | Self::SetWhitelisted)
    }
}

// ============================================================================
// Call values
// ============================================================================

/// Argument or return value of a call routed by name.
#[derive(Debug, Clone)]
pub enum OperationValue {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Location(Location),
    World(WorldHandle),
    /// An optional value that is not there.
    Absent,
}

impl OperationValue {
    /// Short type label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Location(_) => "location",
            Self::World(_) => "world",
            Self::Absent => "absent",
        }
    }
}

impl PartialEq for OperationValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unit, Self::Unit) | (Self::Absent, Self::Absent) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Location(a), Self::Location(b)) => a == b,
            (Self::World(a), Self::World(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl From<()> for OperationValue {
    fn from(_: ()) -> Self {
        Self::Unit
    }
}

impl From<bool> for OperationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OperationValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for OperationValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for OperationValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for OperationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Location> for OperationValue {
    fn from(value: Location) -> Self {
        Self::Location(value)
    }
}

impl From<Option<Location>> for OperationValue {
    fn from(value: Option<Location>) -> Self {
        value.map_or(Self::Absent, Self::Location)
    }
}

impl From<WorldHandle> for OperationValue {
    fn from(value: WorldHandle) -> Self {
        Self::World(value)
    }
}

// Conversions back hand the value over unchanged on mismatch so the caller can
// report what it actually got.

impl TryFrom<OperationValue> for () {
    type Error = OperationValue;

    fn try_from(value: OperationValue) -> Result<Self, Self::Error> {
        match value {
            OperationValue::Unit => Ok(()),
            other => Err(other),
        }
    }
}

impl TryFrom<OperationValue> for bool {
    type Error = OperationValue;

    fn try_from(value: OperationValue) -> Result<Self, Self::Error> {
        match value {
            OperationValue::Bool(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl TryFrom<OperationValue> for i64 {
    type Error = OperationValue;

    fn try_from(value: OperationValue) -> Result<Self, Self::Error> {
        match value {
            OperationValue::Int(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl TryFrom<OperationValue> for f64 {
    type Error = OperationValue;

    fn try_from(value: OperationValue) -> Result<Self, Self::Error> {
        match value {
            OperationValue::Float(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl TryFrom<OperationValue> for String {
    type Error = OperationValue;

    fn try_from(value: OperationValue) -> Result<Self, Self::Error> {
        match value {
            OperationValue::Text(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl TryFrom<OperationValue> for Location {
    type Error = OperationValue;

    fn try_from(value: OperationValue) -> Result<Self, Self::Error> {
        match value {
            OperationValue::Location(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl TryFrom<OperationValue> for Option<Location> {
    type Error = OperationValue;

    fn try_from(value: OperationValue) -> Result<Self, Self::Error> {
        match value {
            OperationValue::Location(value) => Ok(Some(value)),
            OperationValue::Absent => Ok(None),
            other => Err(other),
        }
    }
}

impl TryFrom<OperationValue> for WorldHandle {
    type Error = OperationValue;

    fn try_from(value: OperationValue) -> Result<Self, Self::Error> {
        match value {
            OperationValue::World(value) => Ok(value),
            other => Err(other),
        }
    }
}

// ============================================================================
// Dispatch table
// ============================================================================

/// Name-indexed set of offline capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTable {
    operations: BTreeMap<&'static str, OfflineOperation>,
}

impl DispatchTable {
    /// Builds the table from the full offline operation inventory, keyed by
    /// the name each operation has in the wide interface.
    pub fn build() -> PlayerResult<Self> {
        Self::from_operations(
            OfflineOperation::iter().map(|op| (op.as_player_operation().name(), op)),
        )
    }

    /// Builds a table from explicit `(name, operation)` pairs.
    ///
    /// Dispatch only sees names, so two entries sharing a name cannot be told
    /// apart. That is rejected here instead of letting the later entry win.
    pub fn from_operations<I>(operations: I) -> PlayerResult<Self>
    where
        I: IntoIterator<Item = (&'static str, OfflineOperation)>,
    {
        let mut table = BTreeMap::new();
        for (name, operation) in operations {
            match table.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(operation);
                }
                Entry::Occupied(_) => return Err(PlayerError::AmbiguousOperation(name.to_string())),
            }
        }
        Ok(Self { operations: table })
    }

    pub fn get(&self, name: &str) -> Option<OfflineOperation> {
        self.operations.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Supported operation names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

static DISPATCH_TABLE: OnceLock<PlayerResult<DispatchTable>> = OnceLock::new();

/// Process-wide dispatch table, built on first use.
pub fn dispatch_table() -> PlayerResult<&'static DispatchTable> {
    DISPATCH_TABLE
        .get_or_init(|| {
            let table = DispatchTable::build();
            if let Ok(table) = &table {
                debug!(operations = table.len(), "offline dispatch table initialised");
            }
            table
        })
        .as_ref()
        .map_err(Clone::clone)
}
