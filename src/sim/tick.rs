//! One simulation tick
//!
//! Steering first (every bird turns using where everything is now), then
//! motion (every bird moves along its new heading).

use glam::IVec2;

use super::board::{Board, Slot, wrap_index};
use super::geometry::toroidal_offsets;

/// Advance the board by one tick
pub fn tick(board: &mut Board) {
    steering_phase(board);
    position_phase(board);
    board.ticks += 1;
    log::debug!("tick {} complete", board.ticks);
}

/// Turn every bird toward the sum of its offsets to all other occupants
///
/// Blocks feed the offsets but are never steered themselves.
pub fn steering_phase(board: &mut Board) {
    let (rows, cols) = (board.rows() as i32, board.cols() as i32);
    let steering = board.steering;

    // Birds occupy indices 0..birds.len(), blocks follow
    let cells: Vec<(i32, i32)> = board
        .birds
        .iter()
        .map(|p| (p.row as i32, p.col as i32))
        .chain(board.blocks.iter().map(|p| (p.row as i32, p.col as i32)))
        .collect();

    let mut offsets: Vec<IVec2> = Vec::with_capacity(cells.len().saturating_sub(1) * 4);
    for (i, placed) in board.birds.iter_mut().enumerate() {
        let (row, col) = cells[i];
        offsets.clear();
        offsets.extend(
            cells
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .flat_map(|(_, &(orow, ocol))| toroidal_offsets(row, col, orow, ocol, rows, cols)),
        );
        placed.occupant.steer(&offsets, steering);
    }
}

/// Move every bird one step and rebuild the grid from scratch
///
/// Blocks keep their cells. When two occupants land on one cell the later
/// write wins the grid; the overwritten bird keeps its list entry.
pub fn position_phase(board: &mut Board) {
    let (rows, cols) = (board.rows(), board.cols());
    let mut grid: Vec<Option<Slot>> = vec![None; rows * cols];

    for (i, placed) in board.blocks.iter().enumerate() {
        let (row, col) = placed.occupant.step(placed.row as i64, placed.col as i64);
        let (row, col) = (wrap_index(row, rows), wrap_index(col, cols));
        grid[row * cols + col] = Some(Slot::Block(i));
    }

    let speed = board.speed;
    for (i, placed) in board.birds.iter_mut().enumerate() {
        let (row, col) = placed
            .occupant
            .step(placed.row as i64, placed.col as i64, speed, &mut board.rng);
        let (row, col) = (wrap_index(row, rows), wrap_index(col, cols));

        let cell = &mut grid[row * cols + col];
        if let Some(previous) = cell.replace(Slot::Bird(i)) {
            log::warn!(
                "bird {} landed on ({row},{col}) and displaced {previous:?}",
                placed.occupant.id.0
            );
        }
        placed.row = row;
        placed.col = col;
    }

    board.grid = grid;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Isolation, Steering};
    use crate::sim::{Bird, BirdId, Occupant};
    use std::f64::consts::PI;

    #[test]
    fn test_lone_bird_moves_along_heading() {
        let mut board = Board::new(5, 10).unwrap().with_speed(4.0);
        board.add_bird(0, 0, 0.0).unwrap();
        tick(&mut board);
        let bird = &board.birds()[0];
        assert_eq!((bird.row, bird.col), (0, 4));
        assert_eq!(bird.occupant.heading(), 0.0);
        assert!(matches!(board.get(0, 4), Some(Occupant::Bird(_))));
        assert!(board.get(0, 0).is_none());
        assert_eq!(board.tick_count(), 1);
    }

    #[test]
    fn test_lone_bird_wraps_around() {
        let mut board = Board::new(5, 10).unwrap().with_speed(4.0);
        board.add_bird(3, 8, 0.0).unwrap();
        board.tick();
        let bird = &board.birds()[0];
        assert_eq!((bird.row, bird.col), (3, 2));

        let mut board = Board::new(5, 10).unwrap().with_speed(4.0);
        board.add_bird(3, 8, PI / 2.0).unwrap();
        board.tick();
        let bird = &board.birds()[0];
        assert_eq!((bird.row, bird.col), (2, 8));
    }

    #[test]
    fn test_lone_bird_reset_policy_turns_down() {
        let steering = Steering {
            isolation: Isolation::Reset,
            ..Default::default()
        };
        let mut board = Board::new(10, 10).unwrap().with_speed(4.0).with_steering(steering);
        board.add_bird(0, 0, 0.0).unwrap();
        board.tick();
        let bird = &board.birds()[0];
        assert_eq!(bird.occupant.heading(), PI / 2.0);
        assert_eq!((bird.row, bird.col), (4, 0));
    }

    #[test]
    fn test_steering_uses_all_wrap_paths() {
        // Same layout as the 3x5 offset example: (1,1) seen from (0,0)
        let mut board = Board::new(3, 5).unwrap();
        board.add_bird(0, 0, 0.0).unwrap();
        board.add_block(1, 1).unwrap();
        steering_phase(&mut board);

        // Offsets sum to (-2, -6)
        let mut expected = Bird::new(BirdId(99), 0.0);
        expected.steer(&[IVec2::new(-2, -6)], Steering::default());
        let heading = board.birds()[0].occupant.heading();
        assert!((heading - expected.heading()).abs() < 1e-12);
    }

    #[test]
    fn test_blocks_never_move() {
        let mut board = Board::with_seed(8, 8, 5).unwrap();
        board.add_block(2, 2).unwrap();
        board.add_block(5, 6).unwrap();
        for _ in 0..3 {
            board.add_random_bird();
        }
        for _ in 0..20 {
            board.tick();
        }
        let cells: Vec<(usize, usize)> = board.blocks().iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(cells, vec![(2, 2), (5, 6)]);
    }

    #[test]
    fn test_grid_matches_lists_after_tick() {
        let mut board = Board::with_seed(40, 40, 9).unwrap();
        board.add_bird(0, 0, 0.0).unwrap();
        board.add_bird(20, 20, PI).unwrap();
        board.add_block(10, 30).unwrap();
        board.tick();

        for placed in board.birds() {
            match board.get(placed.row as i64, placed.col as i64) {
                Some(Occupant::Bird(bird)) => assert_eq!(bird.id, placed.occupant.id),
                other => panic!("expected bird at ({}, {}), got {other:?}", placed.row, placed.col),
            }
        }
        let occupied = (0..40)
            .flat_map(|r| (0..40).map(move |c| (r, c)))
            .filter(|&(r, c)| board.get(r, c).is_some())
            .count();
        assert_eq!(occupied, 3);
    }

    #[test]
    fn test_collision_later_bird_wins_grid() {
        let mut board = Board::new(1, 4).unwrap().with_speed(0.0);
        board.add_bird(0, 0, 0.0).unwrap();
        board.add_bird(0, 1, 0.0).unwrap();
        // Force the second bird onto the first bird's cell
        board.birds[1].col = 0;
        position_phase(&mut board);
        assert_eq!(board.birds().len(), 2);
        match board.get(0, 0) {
            Some(Occupant::Bird(bird)) => assert_eq!(bird.id, BirdId(1)),
            other => panic!("expected bird 1, got {other:?}"),
        }
        assert!(board.get(0, 1).is_none());
    }
}
