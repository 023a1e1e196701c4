use crate::model::Layout;

/// True when every board slot holds its own tile and that tile is locked.
pub(crate) fn board_solved(layout: &Layout) -> bool {
    !layout.board.is_empty()
        && layout.board.iter().all(|slot| {
            slot.occupant().is_some_and(|id| {
                slot.target_tile_id() == Some(id) && layout.tile(id).is_some_and(|t| t.locked())
            })
        })
}

/// Turns the level "is solved" into a one-shot edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompletionMonitor {
    announced: bool,
}

impl CompletionMonitor {
    /// Returns true only the first time it sees `solved == true`.
    pub fn observe(&mut self, solved: bool) -> bool {
        if solved && !self.announced {
            self.announced = true;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.announced = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PuzzleConfig;
    use crate::ids::TileId;

    #[test]
    fn fires_once() {
        let mut monitor = CompletionMonitor::default();
        assert!(!monitor.observe(false));
        assert!(monitor.observe(true));
        assert!(!monitor.observe(true));
        assert!(!monitor.observe(false));
        monitor.reset();
        assert!(monitor.observe(true));
    }

    #[test]
    fn full_but_wrong_board_is_not_solved() {
        let mut layout = Layout::build(&[1, 2], &PuzzleConfig::default());
        assert!(!board_solved(&layout));
        // Swap the tiles straight onto the wrong board slots.
        for (slot, tile) in layout.board.iter_mut().zip([2, 1]) {
            slot.put(TileId::new(tile).unwrap());
        }
        assert!(!board_solved(&layout));
    }

    #[test]
    fn seated_and_locked_is_solved() {
        let mut layout = Layout::build(&[1], &PuzzleConfig::default());
        layout.board[0].put(TileId::new(1).unwrap());
        assert!(!board_solved(&layout), "unlocked tile does not count");
        layout.tiles[0].lock();
        assert!(board_solved(&layout));
    }
}
