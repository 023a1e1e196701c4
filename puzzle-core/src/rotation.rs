use log::debug;

use crate::error::ErrorKind;
use crate::ids::TileId;
use crate::model::{Layout, Rotation};

pub type RotationResult = Result<Rotation, ErrorKind>;

/// Turns an unlocked tile a quarter turn and returns its new orientation.
/// Orientation is cosmetic: it plays no part in whether a tile locks.
pub(crate) fn apply(layout: &mut Layout, tile: Option<TileId>) -> RotationResult {
    let tile = tile
        .and_then(|id| layout.tile_mut(id))
        .ok_or(ErrorKind::UnknownTile)?;
    if tile.locked() {
        return Err(ErrorKind::TileLocked);
    }
    let rotation = tile.rotation().next();
    tile.set_rotation(rotation);
    debug!("rotated {} to {}deg", tile.id(), rotation.degrees());
    Ok(rotation)
}
