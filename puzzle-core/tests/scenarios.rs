use std::cell::Cell;
use std::rc::Rc;

use puzzle_core::{ErrorKind, PuzzleController, SlotId, TileId};

// Tray N holds tile N.
fn ordered_puzzle() -> PuzzleController {
    let mut puzzle = PuzzleController::default();
    let order: Vec<u32> = (1..=16).collect();
    puzzle.initialize_in_order(&order).unwrap();
    puzzle
}

fn occupant(puzzle: &PuzzleController, slot: &str) -> Option<String> {
    let id: SlotId = slot.parse().unwrap();
    puzzle
        .slot(id)
        .and_then(|s| s.occupant())
        .map(|t| t.to_string())
}

fn tile(puzzle: &PuzzleController, id: &str) -> puzzle_core::Tile {
    let id: TileId = id.parse().unwrap();
    puzzle.tile(id).unwrap().clone()
}

#[test]
fn correct_placement_locks_the_tile() {
    let mut puzzle = ordered_puzzle();
    let transfer = puzzle.attempt_transfer("tray5", "board5").unwrap();
    assert!(transfer.locked);
    assert!(!transfer.solved);
    assert!(tile(&puzzle, "tile5").locked());
    assert_eq!(occupant(&puzzle, "board5").as_deref(), Some("tile5"));
    assert_eq!(occupant(&puzzle, "tray5"), None);
}

#[test]
fn repeating_a_move_finds_the_source_empty() {
    let mut puzzle = ordered_puzzle();
    puzzle.attempt_transfer("tray5", "board5").unwrap();
    assert_eq!(
        puzzle.attempt_transfer("tray5", "board5"),
        Err(ErrorKind::EmptySource)
    );
}

#[test]
fn locked_tile_cannot_go_back_to_the_tray() {
    let mut puzzle = ordered_puzzle();
    puzzle.attempt_transfer("tray5", "board5").unwrap();
    assert_eq!(
        puzzle.attempt_transfer("board5", "tray5"),
        Err(ErrorKind::SourceLocked)
    );
    assert_eq!(puzzle.rotate("tile5"), Err(ErrorKind::TileLocked));
}

#[test]
fn misplaced_tile_stays_mobile() {
    let mut puzzle = ordered_puzzle();
    let transfer = puzzle.attempt_transfer("tray3", "board5").unwrap();
    assert!(!transfer.locked);
    assert!(!tile(&puzzle, "tile3").locked());
    assert_eq!(occupant(&puzzle, "board5").as_deref(), Some("tile3"));

    puzzle.attempt_transfer("board5", "tray3").unwrap();
    assert_eq!(occupant(&puzzle, "tray3").as_deref(), Some("tile3"));
    assert_eq!(occupant(&puzzle, "board5"), None);
}

#[test]
fn misplaced_tile_can_move_between_board_slots() {
    let mut puzzle = ordered_puzzle();
    puzzle.attempt_transfer("tray3", "board5").unwrap();
    let transfer = puzzle.attempt_transfer("board5", "board3").unwrap();
    assert!(transfer.locked);
    assert!(tile(&puzzle, "tile3").locked());
}

#[test]
fn occupied_destination_is_never_overwritten() {
    let mut puzzle = ordered_puzzle();
    puzzle.attempt_transfer("tray3", "board5").unwrap();
    assert_eq!(
        puzzle.attempt_transfer("tray4", "board5"),
        Err(ErrorKind::OccupiedDestination)
    );
    assert_eq!(occupant(&puzzle, "board5").as_deref(), Some("tile3"));
    assert_eq!(occupant(&puzzle, "tray4").as_deref(), Some("tile4"));
}

#[test]
fn unknown_ids_are_refused() {
    let mut puzzle = ordered_puzzle();
    assert_eq!(
        puzzle.attempt_transfer("tray1", "board17"),
        Err(ErrorKind::UnknownSlot)
    );
    assert_eq!(
        puzzle.attempt_transfer("tray1", "shelf1"),
        Err(ErrorKind::UnknownSlot)
    );
    assert_eq!(
        puzzle.attempt_transfer("nowhere", "board1"),
        Err(ErrorKind::EmptySource)
    );
    assert_eq!(puzzle.rotate("tile17"), Err(ErrorKind::UnknownTile));
}

#[test]
fn rotation_survives_a_move_and_does_not_block_locking() {
    let mut puzzle = ordered_puzzle();
    assert_eq!(puzzle.rotate("tile2").map(|r| r.degrees()), Ok(90));
    let transfer = puzzle.attempt_transfer("tray2", "board2").unwrap();
    assert!(transfer.locked);
    assert_eq!(tile(&puzzle, "tile2").rotation().degrees(), 90);
}

#[test]
fn solving_fires_once_on_the_last_placement() {
    let mut puzzle = ordered_puzzle();
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    puzzle.on_solved(move || counter.set(counter.get() + 1));

    // Any order works; go backwards.
    for n in (1..=16).rev() {
        assert!(!puzzle.is_solved());
        let transfer = puzzle
            .attempt_transfer(&format!("tray{n}"), &format!("board{n}"))
            .unwrap();
        assert_eq!(transfer.solved, n == 1);
    }
    assert!(puzzle.is_solved());
    assert_eq!(fired.get(), 1);
    assert_eq!(puzzle.placed_count(), 16);

    // Later attempts are refused and never re-announce.
    assert!(puzzle.attempt_transfer("board1", "tray1").is_err());
    assert!(puzzle.rotate("tile1").is_err());
    assert!(puzzle.is_solved());
    assert_eq!(fired.get(), 1);
}

#[test]
fn snapshot_reports_solved_with_the_listener() {
    let mut puzzle = PuzzleController::default();
    puzzle.initialize_in_order(&[2, 1, 4, 3]).unwrap();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    puzzle.on_solved(move || flag.set(true));

    for (from, to) in [("tray1", "board2"), ("tray2", "board1"), ("tray3", "board4")] {
        puzzle.attempt_transfer(from, to).unwrap();
    }
    assert!(!fired.get());
    let snapshot = puzzle.snapshot();
    assert!(!snapshot.solved);
    puzzle.attempt_transfer("tray4", "board3").unwrap();
    assert!(fired.get());
    assert!(puzzle.snapshot().solved);
}

#[test]
fn typed_transfer_matches_the_text_form() {
    let mut puzzle = ordered_puzzle();
    let from = SlotId::tray(6).unwrap();
    let to = SlotId::board(6).unwrap();
    let transfer = puzzle.transfer(from, to).unwrap();
    assert_eq!((transfer.from, transfer.to), (from, to));
    assert!(transfer.locked);
    assert_eq!(puzzle.transfer(from, to), Err(ErrorKind::EmptySource));
}

#[test]
fn snapshot_lookups_agree_with_the_controller() {
    let mut puzzle = ordered_puzzle();
    puzzle.attempt_transfer("tray7", "board7").unwrap();
    puzzle.rotate("tile8").unwrap();
    let snapshot = puzzle.snapshot();

    let board7: SlotId = "board7".parse().unwrap();
    assert_eq!(snapshot.slot(board7), puzzle.slot(board7));
    assert_eq!(snapshot.slot(board7).and_then(|s| s.occupant()), TileId::new(7));
    let tray7: SlotId = "tray7".parse().unwrap();
    assert!(snapshot.slot(tray7).unwrap().is_empty());
    assert_eq!(snapshot.slot("board17".parse().unwrap()), None);
    let tile8: TileId = "tile8".parse().unwrap();
    assert_eq!(snapshot.tile(tile8).map(|t| t.rotation().degrees()), Some(90));
}
