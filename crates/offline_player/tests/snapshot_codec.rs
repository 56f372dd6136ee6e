//! Capture and wire format of player snapshots.

mod common;

use std::sync::Arc;

use common::{EveryWorld, MockLivePlayer, UnavailableWorlds};
use offline_player::{
    InMemoryWorlds, Location, NamedWorld, OfflinePlayer, Player, PlayerError, PlayerOperation,
    PlayerSnapshot,
};

#[test]
fn test_capture_copies_every_field() {
    let live = MockLivePlayer::steve();
    let snapshot = PlayerSnapshot::capture(&live).unwrap();

    assert_eq!(snapshot.name(), "Steve");
    assert_eq!(snapshot.first_played(), 1_577_836_800_000);
    assert_eq!(snapshot.last_played(), 1_704_067_200_000);
    assert!(!snapshot.is_op());
    assert!(!snapshot.is_banned());
    assert!(snapshot.has_played_before());
    assert!(snapshot.is_online());
    assert!(snapshot.is_whitelisted());

    let bed = snapshot.bed_spawn_location().unwrap();
    assert_eq!(bed.world_name(), "overworld");
    assert!(bed.world().is_some());
    assert_eq!((bed.x, bed.y, bed.z), (10.0, 64.0, -3.0));
}

#[test]
fn test_capture_is_all_or_nothing() {
    let live = MockLivePlayer::steve().failing_on(PlayerOperation::IsWhitelisted);
    let err = PlayerSnapshot::capture(&live).unwrap_err();

    match err {
        PlayerError::CaptureFailed { field, reason } => {
            assert_eq!(field, "is_whitelisted");
            assert!(reason.contains("is_whitelisted unavailable"), "{reason}");
        }
        other => panic!("expected CaptureFailed, got {other:?}"),
    }
}

#[test]
fn test_capture_fails_when_location_is_unreadable() {
    let live = MockLivePlayer::steve().failing_on(PlayerOperation::BedSpawnLocation);
    assert!(matches!(
        PlayerSnapshot::capture(&live),
        Err(PlayerError::CaptureFailed { field: "bed_spawn_location", .. })
    ));
}

#[test]
fn test_round_trip_with_every_world_loaded_is_exact() {
    let snapshot = PlayerSnapshot::capture(&MockLivePlayer::steve()).unwrap();
    let bytes = snapshot.to_bytes().unwrap();
    let decoded = PlayerSnapshot::from_bytes(&bytes, &EveryWorld).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn test_round_trip_without_bed_location() {
    let snapshot = PlayerSnapshot::capture(&MockLivePlayer::steve().without_bed()).unwrap();
    let decoded = PlayerSnapshot::from_bytes(&snapshot.to_bytes().unwrap(), &UnavailableWorlds).unwrap();
    assert_eq!(decoded, snapshot);
    assert!(decoded.bed_spawn_location().is_none());
}

#[test]
fn test_missing_world_degrades_to_unresolved_location() {
    let live = MockLivePlayer::steve();
    let bytes = PlayerSnapshot::capture(&live).unwrap().to_bytes().unwrap();

    // "overworld" is not loaded on the receiving side.
    let worlds = InMemoryWorlds::new();
    worlds.insert(Arc::new(NamedWorld::new("nether")));
    let decoded = PlayerSnapshot::from_bytes(&bytes, &worlds).unwrap();

    assert_eq!(decoded.name(), "Steve");
    assert!(decoded.is_online());
    let bed = decoded.bed_spawn_location().unwrap();
    assert!(bed.world().is_none());
    assert_eq!(bed.world_name(), "overworld");
    assert_eq!((bed.x, bed.y, bed.z), (10.0, 64.0, -3.0));

    let proxy = decoded.as_proxy();
    assert_eq!(proxy.name().unwrap(), "Steve");
    assert_eq!(
        proxy.kick("server restart"),
        Err(PlayerError::CapabilityNotSupported("kick".into()))
    );
}

#[test]
fn test_failing_registry_degrades_instead_of_failing() {
    let bytes = PlayerSnapshot::capture(&MockLivePlayer::steve())
        .unwrap()
        .to_bytes()
        .unwrap();
    let decoded = PlayerSnapshot::from_bytes(&bytes, &UnavailableWorlds).unwrap();

    let bed = decoded.bed_spawn_location().unwrap();
    assert!(bed.world().is_none());
    assert_eq!((bed.x, bed.y, bed.z), (10.0, 64.0, -3.0));
}

#[test]
fn test_world_can_be_resolved_again_later() {
    let bytes = PlayerSnapshot::capture(&MockLivePlayer::steve())
        .unwrap()
        .to_bytes()
        .unwrap();
    let worlds = InMemoryWorlds::new();
    let decoded = PlayerSnapshot::from_bytes(&bytes, &worlds).unwrap();

    worlds.insert(Arc::new(NamedWorld::new("overworld")));
    let mut bed = decoded.bed_spawn_location().unwrap();
    assert!(bed.resolve_world(&worlds).is_some());
    assert_eq!(bed, Location::in_world(Arc::new(NamedWorld::new("overworld")), 10.0, 64.0, -3.0));
}

#[test]
fn test_malformed_input_is_rejected() {
    let bytes = PlayerSnapshot::capture(&MockLivePlayer::steve())
        .unwrap()
        .to_bytes()
        .unwrap();

    let empty = PlayerSnapshot::from_bytes(&[], &EveryWorld);
    assert!(matches!(empty, Err(PlayerError::DeserializeStructureFailed(_))));

    let truncated_fields = PlayerSnapshot::from_bytes(&bytes[..3], &EveryWorld);
    assert!(matches!(truncated_fields, Err(PlayerError::DeserializeStructureFailed(_))));

    let mut trailing = bytes.to_vec();
    trailing.push(0);
    let result = PlayerSnapshot::from_bytes(&trailing, &EveryWorld);
    assert!(matches!(result, Err(PlayerError::DeserializeStructureFailed(_))));
}

#[test]
fn test_invalid_utf8_world_name_is_rejected() {
    let snapshot = PlayerSnapshot::capture(&MockLivePlayer::steve()).unwrap();
    let mut bytes = snapshot.to_bytes().unwrap().to_vec();

    // Trailer: presence, u16 length, "overworld", 24 bytes of coordinates.
    let name_start = bytes.len() - 24 - "overworld".len();
    bytes[name_start] = 0xff;

    let result = PlayerSnapshot::from_bytes(&bytes, &EveryWorld);
    assert!(matches!(result, Err(PlayerError::DeserializeStructureFailed(_))));
}

#[test]
fn test_snapshot_never_writes_back_to_live_player() {
    let live = MockLivePlayer::steve();
    let mut snapshot = PlayerSnapshot::capture(&live).unwrap();
    snapshot.set_banned(true);
    snapshot.set_op(true);

    let proxy = PlayerSnapshot::capture(&live).unwrap().as_proxy();
    proxy.set_banned(true).unwrap();
    proxy.set_whitelisted(false).unwrap();

    let state = live.snapshot_of_state();
    assert!(!state.banned);
    assert!(!state.operator);
    assert!(state.whitelisted);
    assert!(live.is_banned().map(|banned| !banned).unwrap());
}
