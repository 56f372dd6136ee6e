//! Wire format for [`PlayerSnapshot`].
//!
//! ```text
//! +------------------------------+----------+-----------------------------------------+
//! | bincode (standard config)    | presence | if presence != 0:                       |
//! | name, first_played, ...,     | u8       |   u16 BE name length, UTF-8 world name, |
//! | whitelisted                  |          |   f64 BE x, f64 BE y, f64 BE z          |
//! +------------------------------+----------+-----------------------------------------+
//! ```
//!
//! The scalar block goes through serde. The bed spawn location is written by
//! hand because only its world *name* can travel; the live world is looked up
//! again while decoding, and a world that cannot be found leaves the location
//! unresolved instead of failing the decode.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{
    error::{PlayerError, PlayerResult},
    host::WorldRegistry,
    location::Location,
    snapshot::PlayerSnapshot,
};

const LOCATION_ABSENT: u8 = 0;
const LOCATION_PRESENT: u8 = 1;

/// presence + name length + x/y/z, without the name itself.
const LOCATION_FIXED_LEN: usize = 1 + 2 + 3 * 8;

fn bincode_config() -> bincode::config::Configuration {
    bincode::config::standard()
}

/// Serialize a snapshot to bytes.
pub fn encode(snapshot: &PlayerSnapshot) -> PlayerResult<Bytes> {
    let fields = bincode::serde::encode_to_vec(snapshot, bincode_config())
        .map_err(|e| PlayerError::SerializeStructureFailed(e.to_string()))?;

    let location_len = snapshot
        .bed_spawn
        .as_ref()
        .map_or(1, |location| LOCATION_FIXED_LEN + location.world_name().len());

    let mut out = BytesMut::with_capacity(fields.len() + location_len);
    out.put_slice(&fields);
    put_location(&mut out, snapshot.bed_spawn.as_ref())?;
    Ok(out.freeze())
}

/// Deserialize a snapshot and re-attach its bed spawn world.
///
/// Only malformed input fails. An unknown world, or a registry that cannot
/// answer, yields a location with coordinates but no world handle.
pub fn decode(bytes: &[u8], worlds: &dyn WorldRegistry) -> PlayerResult<PlayerSnapshot> {
    let (mut snapshot, consumed): (PlayerSnapshot, usize) =
        bincode::serde::decode_from_slice(bytes, bincode_config())
            .map_err(|e| PlayerError::DeserializeStructureFailed(e.to_string()))?;

    let mut rest = &bytes[consumed..];
    let mut bed_spawn = take_location(&mut rest)?;
    if rest.has_remaining() {
        return Err(PlayerError::DeserializeStructureFailed(format!(
            "{} unexpected trailing bytes",
            rest.remaining()
        )));
    }

    if let Some(location) = bed_spawn.as_mut() {
        location.resolve_world(worlds);
    }
    snapshot.bed_spawn = bed_spawn;
    Ok(snapshot)
}

fn put_location(out: &mut BytesMut, location: Option<&Location>) -> PlayerResult<()> {
    let Some(location) = location else {
        out.put_u8(LOCATION_ABSENT);
        return Ok(());
    };

    let name = location.world_name().as_bytes();
    let name_len = u16::try_from(name.len()).map_err(|_| {
        PlayerError::SerializeStructureFailed(format!(
            "world name is {} bytes long, at most {} fit",
            name.len(),
            u16::MAX
        ))
    })?;

    out.put_u8(LOCATION_PRESENT);
    out.put_u16(name_len);
    out.put_slice(name);
    out.put_f64(location.x);
    out.put_f64(location.y);
    out.put_f64(location.z);
    Ok(())
}

fn take_location(input: &mut &[u8]) -> PlayerResult<Option<Location>> {
    ensure_remaining(input, 1, "location presence flag")?;
    if input.get_u8() == LOCATION_ABSENT {
        return Ok(None);
    }

    ensure_remaining(input, 2, "world name length")?;
    let name_len = usize::from(input.get_u16());
    ensure_remaining(input, name_len, "world name")?;
    let world_name = std::str::from_utf8(&input[..name_len])
        .map_err(|e| PlayerError::DeserializeStructureFailed(format!("world name: {e}")))?
        .to_string();
    input.advance(name_len);

    ensure_remaining(input, 3 * 8, "location coordinates")?;
    let x = input.get_f64();
    let y = input.get_f64();
    let z = input.get_f64();

    Ok(Some(Location::new(world_name, x, y, z)))
}

fn ensure_remaining(input: &[u8], needed: usize, what: &str) -> PlayerResult<()> {
    if input.len() < needed {
        return Err(PlayerError::DeserializeStructureFailed(format!(
            "truncated {what}: need {needed} bytes, {} left",
            input.len()
        )));
    }
    Ok(())
}
