// Host-side tests for the invader board.

use invaders_core::Board;

#[test]
fn new_board_is_fully_alive() {
    let board = Board::new(5, 11);
    assert_eq!(board.rows(), 5);
    assert_eq!(board.columns(), 11);
    assert_eq!(board.alive_count(), 55);
    assert_eq!(board.dead_count(), 0);
    assert!(!board.is_all_dead());
    assert!(board.row(2).iter().all(|&alive| alive));
}

#[test]
fn hits_are_one_way_and_idempotent() {
    let mut board = Board::new(5, 11);
    assert!(board.mark_hit(1, 4));
    assert!(!board.is_alive(1, 4));
    assert!(!board.mark_hit(1, 4), "second hit on a dead cell");
    assert_eq!(board.dead_count(), 1);
    assert!(!board.row(1)[4]);
}

#[test]
fn out_of_range_cells_are_dead_and_ignored() {
    let mut board = Board::new(5, 11);
    assert!(!board.is_alive(5, 0));
    assert!(!board.is_alive(0, 11));
    assert!(!board.mark_hit(9, 9));
    assert_eq!(board.alive_count(), 55);
    assert!(board.row(7).is_empty());
}

#[test]
fn lowest_alive_row_searches_from_bottom() {
    let mut board = Board::new(5, 11);
    assert_eq!(board.lowest_alive_row(3), Some(4));
    board.mark_hit(4, 3);
    board.mark_hit(3, 3);
    assert_eq!(board.lowest_alive_row(3), Some(2));
    for row in 0..3 {
        board.mark_hit(row, 3);
    }
    assert_eq!(board.lowest_alive_row(3), None);
    assert_eq!(board.lowest_alive_row_index(), Some(4));
}

#[test]
fn lowest_alive_row_index_rises_as_rows_clear() {
    let mut board = Board::new(3, 2);
    for column in 0..2 {
        board.mark_hit(2, column);
    }
    assert_eq!(board.lowest_alive_row_index(), Some(1));
    for row in 0..2 {
        for column in 0..2 {
            board.mark_hit(row, column);
        }
    }
    assert!(board.is_all_dead());
    assert_eq!(board.lowest_alive_row_index(), None);
}

#[test]
fn alive_cells_are_row_major() {
    let mut board = Board::new(2, 3);
    board.mark_hit(0, 1);
    let cells: Vec<_> = board.alive_cells().collect();
    assert_eq!(cells, vec![(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]);
}

#[test]
fn reset_restores_every_cell() {
    let mut board = Board::new(5, 11);
    for column in 0..11 {
        board.mark_hit(0, column);
    }
    board.reset();
    assert_eq!(board, Board::new(5, 11));
}
