use serde::{Serialize, Serializer};

use crate::config::PuzzleConfig;
use crate::ids::{SlotId, TileId, Zone};

/// Quarter-turn orientation of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const STEP_DEGREES: u16 = 90;

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// One step clockwise, 270 wraps to 0.
    pub fn next(self) -> Self {
        Self::from_degrees((self.degrees() + Self::STEP_DEGREES) % 360).unwrap_or_default()
    }
}

impl Serialize for Rotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.degrees())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tile {
    id: TileId,
    image_ref: String,
    rotation: Rotation,
    locked: bool,
}

impl Tile {
    pub(crate) fn new(id: TileId, image_ref: String) -> Self {
        Self {
            id,
            image_ref,
            rotation: Rotation::Deg0,
            locked: false,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    // Locks are permanent; there is no unlock.
    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Slot {
    id: SlotId,
    zone: Zone,
    occupant: Option<TileId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_tile_id: Option<TileId>,
}

impl Slot {
    fn board(id: SlotId, target: TileId) -> Self {
        Self {
            id,
            zone: Zone::Board,
            occupant: None,
            target_tile_id: Some(target),
        }
    }

    fn tray(id: SlotId, occupant: TileId) -> Self {
        Self {
            id,
            zone: Zone::Tray,
            occupant: Some(occupant),
            target_tile_id: None,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn occupant(&self) -> Option<TileId> {
        self.occupant
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// The tile this slot expects. Always `None` for tray slots.
    pub fn target_tile_id(&self) -> Option<TileId> {
        self.target_tile_id
    }

    pub(crate) fn take(&mut self) -> Option<TileId> {
        self.occupant.take()
    }

    pub(crate) fn put(&mut self, tile: TileId) {
        self.occupant = Some(tile);
    }
}

/// Owned tile and slot storage. Tiles, board slots and tray slots are each
/// indexed by `number - 1`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Layout {
    pub(crate) tiles: Vec<Tile>,
    pub(crate) board: Vec<Slot>,
    pub(crate) tray: Vec<Slot>,
}

impl Layout {
    /// `order[i]` is the number of the tile placed in `tray<i+1>`. The caller
    /// has already checked that `order` is a permutation of `1..=order.len()`.
    pub(crate) fn build(order: &[u32], config: &PuzzleConfig) -> Self {
        let ids = (1..=order.len() as u32).filter_map(TileId::new);
        let tiles = ids
            .clone()
            .map(|id| Tile::new(id, config.image_ref(id)))
            .collect();
        let board = ids
            .filter_map(|id| Some(Slot::board(SlotId::board(id.number())?, id)))
            .collect();
        let tray = order
            .iter()
            .zip(1..)
            .filter_map(|(&tile, n)| Some(Slot::tray(SlotId::tray(n)?, TileId::new(tile)?)))
            .collect();
        Self { tiles, board, tray }
    }

    fn zone(&self, zone: Zone) -> &[Slot] {
        match zone {
            Zone::Board => &self.board,
            Zone::Tray => &self.tray,
        }
    }

    pub(crate) fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.zone(id.zone()).get(id.index())
    }

    pub(crate) fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        match id.zone() {
            Zone::Board => self.board.get_mut(id.index()),
            Zone::Tray => self.tray.get_mut(id.index()),
        }
    }

    pub(crate) fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.board.iter().chain(self.tray.iter())
    }
}

/// Read-only copy of the whole puzzle, for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PuzzleSnapshot {
    pub tiles: Vec<Tile>,
    pub slots: Vec<Slot>,
    pub solved: bool,
}

impl PuzzleSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id() == id)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_after_four_steps() {
        let mut rotation = Rotation::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            rotation = rotation.next();
            seen.push(rotation.degrees());
        }
        assert_eq!(seen, vec![90, 180, 270, 0]);
        assert_eq!(Rotation::from_degrees(180), Some(Rotation::Deg180));
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn build_fills_tray_and_targets_board() {
        let layout = Layout::build(&[3, 1, 4, 2], &PuzzleConfig::default());
        assert_eq!(layout.tiles.len(), 4);
        assert!(layout.board.iter().all(Slot::is_empty));
        assert_eq!(
            layout.board[2].target_tile_id(),
            Some(TileId::new(3).unwrap())
        );
        let tray: Vec<_> = layout
            .tray
            .iter()
            .filter_map(|slot| slot.occupant().map(TileId::number))
            .collect();
        assert_eq!(tray, vec![3, 1, 4, 2]);
        assert_eq!(layout.tiles[0].image_ref(), "img/pieza1.png");
    }

    #[test]
    fn snapshot_json_shape() {
        let layout = Layout::build(&[1], &PuzzleConfig::default());
        let snapshot = PuzzleSnapshot {
            tiles: layout.tiles.clone(),
            slots: layout.slots().cloned().collect(),
            solved: false,
        };
        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["tiles"][0]["id"], "tile1");
        assert_eq!(json["tiles"][0]["rotation"], 0);
        assert_eq!(json["slots"][0]["zone"], "BOARD");
        assert_eq!(json["slots"][0]["occupant"], serde_json::Value::Null);
        assert_eq!(json["slots"][0]["target_tile_id"], "tile1");
        assert_eq!(json["slots"][1]["occupant"], "tile1");
        assert!(json["slots"][1].get("target_tile_id").is_none());
    }
}
