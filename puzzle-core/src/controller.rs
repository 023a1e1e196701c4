use std::collections::HashMap;
use std::fmt;

use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::completion::{CompletionMonitor, board_solved};
use crate::config::{PuzzleConfig, grid_side};
use crate::error::{InvariantViolation, SetupError};
use crate::ids::{SlotId, TileId};
use crate::model::{Layout, PuzzleSnapshot, Slot, Tile};
use crate::rotation::{self, RotationResult};
use crate::transfer::{self, TransferResult};

type SolvedListener = Box<dyn FnMut()>;

/// Sole owner of the puzzle state. Every change goes through
/// [`attempt_transfer`](Self::attempt_transfer) or [`rotate`](Self::rotate).
pub struct PuzzleController {
    config: PuzzleConfig,
    layout: Layout,
    monitor: CompletionMonitor,
    solved_listeners: Vec<SolvedListener>,
}

impl PuzzleController {
    /// An empty controller; call one of the `initialize` methods before play.
    pub fn new(config: PuzzleConfig) -> Self {
        Self {
            config,
            layout: Layout::default(),
            monitor: CompletionMonitor::default(),
            solved_listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Starts a new session: tiles shuffled uniformly over the tray, board
    /// empty, everything unrotated and unlocked.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        tile_count: usize,
        rng: &mut R,
    ) -> Result<(), SetupError> {
        grid_side(tile_count)?;
        let mut order: Vec<u32> = (1..=tile_count as u32).collect();
        order.shuffle(rng);
        self.initialize_in_order(&order)
    }

    /// Starts a new session with a fixed tray layout: `order[i]` is the number
    /// of the tile placed in `tray<i+1>`. On error the current state is kept.
    pub fn initialize_in_order(&mut self, order: &[u32]) -> Result<(), SetupError> {
        let count = order.len();
        grid_side(count)?;
        let mut seen = vec![false; count];
        for &number in order {
            let Some(flag) = (number as usize)
                .checked_sub(1)
                .and_then(|i| seen.get_mut(i))
                .filter(|flag| !**flag)
            else {
                return Err(SetupError::InvalidOrder { count });
            };
            *flag = true;
        }

        self.layout = Layout::build(order, &self.config);
        self.monitor.reset();
        info!("puzzle initialized with {count} tiles");
        Ok(())
    }

    /// Moves the tile in `source` to the empty slot `dest`. Ids that do not
    /// parse are treated like slots that do not exist.
    pub fn attempt_transfer(&mut self, source: &str, dest: &str) -> TransferResult {
        self.run_transfer(source.parse().ok(), dest.parse().ok())
    }

    pub fn transfer(&mut self, source: SlotId, dest: SlotId) -> TransferResult {
        self.run_transfer(Some(source), Some(dest))
    }

    fn run_transfer(&mut self, source: Option<SlotId>, dest: Option<SlotId>) -> TransferResult {
        let mut result = transfer::apply(&mut self.layout, source, dest);
        match result.as_mut() {
            Ok(done) => done.solved = self.check_completion(),
            Err(err) => debug!(
                "transfer {} -> {} refused: {err}",
                DisplayOpt(source),
                DisplayOpt(dest)
            ),
        }
        result
    }

    pub fn rotate(&mut self, tile: &str) -> RotationResult {
        self.rotate_tile_id(tile.parse().ok())
    }

    pub fn rotate_tile(&mut self, tile: TileId) -> RotationResult {
        self.rotate_tile_id(Some(tile))
    }

    fn rotate_tile_id(&mut self, tile: Option<TileId>) -> RotationResult {
        let result = rotation::apply(&mut self.layout, tile);
        if let Err(err) = result {
            debug!("rotate {} refused: {err}", DisplayOpt(tile));
        }
        result
    }

    pub fn is_solved(&self) -> bool {
        board_solved(&self.layout)
    }

    // Runs after the move is committed so listeners see the final state.
    fn check_completion(&mut self) -> bool {
        let solved = self.is_solved();
        let edge = self.monitor.observe(solved);
        if edge {
            info!("puzzle solved");
            for listener in &mut self.solved_listeners {
                listener();
            }
        }
        edge
    }

    /// Registers a callback for the moment the puzzle first becomes solved.
    /// Listeners survive re-initialization.
    pub fn on_solved<F: FnMut() + 'static>(&mut self, listener: F) {
        self.solved_listeners.push(Box::new(listener));
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            tiles: self.layout.tiles.clone(),
            slots: self.layout.slots().cloned().collect(),
            solved: self.is_solved(),
        }
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.layout.tile(id)
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.layout.slot(id)
    }

    /// The slot currently holding `tile`.
    pub fn locate(&self, tile: TileId) -> Option<SlotId> {
        self.layout
            .slots()
            .find(|slot| slot.occupant() == Some(tile))
            .map(Slot::id)
    }

    pub fn tile_count(&self) -> usize {
        self.layout.tiles.len()
    }

    /// Number of tiles locked on their board slot.
    pub fn placed_count(&self) -> usize {
        self.layout.tiles.iter().filter(|tile| tile.locked()).count()
    }

    pub fn grid_side(&self) -> usize {
        self.tile_count().isqrt()
    }

    /// Walks every slot and checks that each tile is held exactly once and
    /// that locked tiles sit on their own board slot.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut holders: HashMap<TileId, SlotId> = HashMap::new();
        for slot in self.layout.slots() {
            let Some(tile) = slot.occupant() else {
                continue;
            };
            if self.layout.tile(tile).is_none() {
                return Err(InvariantViolation::Foreign {
                    slot: slot.id(),
                    tile,
                });
            }
            if let Some(&first) = holders.get(&tile) {
                return Err(InvariantViolation::Duplicated {
                    tile,
                    first,
                    second: slot.id(),
                });
            }
            holders.insert(tile, slot.id());
        }
        for tile in &self.layout.tiles {
            let Some(&holder) = holders.get(&tile.id()) else {
                return Err(InvariantViolation::Missing { tile: tile.id() });
            };
            let seated = self
                .layout
                .slot(holder)
                .and_then(Slot::target_tile_id)
                .is_some_and(|target| target == tile.id());
            if tile.locked() && !seated {
                return Err(InvariantViolation::MisplacedLock { tile: tile.id() });
            }
        }
        Ok(())
    }
}

impl Default for PuzzleController {
    fn default() -> Self {
        Self::new(PuzzleConfig::default())
    }
}

impl fmt::Debug for PuzzleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleController")
            .field("tiles", &self.tile_count())
            .field("placed", &self.placed_count())
            .field("solved_listeners", &self.solved_listeners.len())
            .finish()
    }
}

struct DisplayOpt<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for DisplayOpt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("?"),
        }
    }
}
