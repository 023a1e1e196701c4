//! Moving a tile from one slot to another.

use log::debug;

use crate::error::ErrorKind;
use crate::ids::{SlotId, TileId};
use crate::model::Layout;

/// What a successful transfer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub tile: TileId,
    pub from: SlotId,
    pub to: SlotId,
    /// The tile landed on its own board slot and is now locked.
    pub locked: bool,
    /// This transfer completed the puzzle.
    pub solved: bool,
}

pub type TransferResult = Result<Transfer, ErrorKind>;

/// Validates and applies one move. Checks run in a fixed order and the first
/// failure wins; nothing is written until every check has passed.
///
/// `None` ids stand for text that did not name a slot at all.
pub(crate) fn apply(
    layout: &mut Layout,
    source: Option<SlotId>,
    dest: Option<SlotId>,
) -> TransferResult {
    let (source, tile_id) = source
        .and_then(|id| Some((id, layout.slot(id)?.occupant()?)))
        .ok_or(ErrorKind::EmptySource)?;
    let dest_slot = dest
        .and_then(|id| layout.slot(id))
        .ok_or(ErrorKind::UnknownSlot)?;
    if !dest_slot.is_empty() {
        return Err(ErrorKind::OccupiedDestination);
    }
    let dest = dest_slot.id();
    let seats = dest_slot.target_tile_id() == Some(tile_id);
    // A slot naming a tile outside the set would be a bookkeeping bug.
    let tile = layout.tile(tile_id).ok_or(ErrorKind::EmptySource)?;
    if tile.locked() {
        return Err(ErrorKind::SourceLocked);
    }

    if let Some(slot) = layout.slot_mut(source) {
        slot.take();
    }
    if let Some(slot) = layout.slot_mut(dest) {
        slot.put(tile_id);
    }
    if seats && let Some(tile) = layout.tile_mut(tile_id) {
        tile.lock();
    }
    debug!("moved {tile_id} from {source} to {dest}{}", if seats { " (locked)" } else { "" });

    Ok(Transfer {
        tile: tile_id,
        from: source,
        to: dest,
        locked: seats,
        solved: false,
    })
}
