//! Transport records for the board
//!
//! Flat, sorted occupant records for whatever serves the board over the
//! wire. Serialized with serde; nothing here is read back.

use serde::{Deserialize, Serialize};

use crate::sim::Board;

/// One occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantRecord {
    /// Row
    pub x: usize,
    /// Column
    pub y: usize,
    /// Sort key, `x * rows + y`
    pub linear_index: usize,
    /// 1 for a bird, 2 for a block
    pub kind: u8,
}

/// Board state as served by the create and step endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub tick: u64,
    pub records: Vec<OccupantRecord>,
}

impl Board {
    /// Every visible occupant, ordered by linear index
    ///
    /// Reads the grid, so a bird hidden by a collision is not listed.
    pub fn to_records(&self) -> Vec<OccupantRecord> {
        let mut records: Vec<OccupantRecord> = (0..self.rows())
            .flat_map(|row| (0..self.cols()).map(move |col| (row, col)))
            .filter_map(|(row, col)| {
                self.get(row as i64, col as i64).map(|occupant| OccupantRecord {
                    x: row,
                    y: col,
                    linear_index: row * self.rows() + col,
                    kind: occupant.kind().discriminant(),
                })
            })
            .collect();
        // Stable: equal keys keep row-major order
        records.sort_by_key(|r| r.linear_index);
        records
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.rows(),
            cols: self.cols(),
            tick: self.tick_count(),
            records: self.to_records(),
        }
    }

    /// Records as a JSON array
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_has_no_records() {
        let board = Board::new(2, 5).unwrap();
        assert!(board.to_records().is_empty());
        assert_eq!(board.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_records_sorted_by_linear_index() {
        let mut board = Board::new(4, 4).unwrap();
        board.add_bird(2, 1, 0.0).unwrap();
        board.add_bird(1, 2, 0.0).unwrap();
        let records = board.to_records();
        assert_eq!(
            records,
            vec![
                OccupantRecord { x: 1, y: 2, linear_index: 6, kind: 1 },
                OccupantRecord { x: 2, y: 1, linear_index: 9, kind: 1 },
            ]
        );
    }

    #[test]
    fn test_record_kinds_and_json_shape() {
        let mut board = Board::new(3, 3).unwrap();
        board.add_block(0, 1).unwrap();
        board.add_bird(2, 2, 0.0).unwrap();
        let json: serde_json::Value = serde_json::from_str(&board.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"x": 0, "y": 1, "linear_index": 1, "kind": 2},
                {"x": 2, "y": 2, "linear_index": 8, "kind": 1},
            ])
        );
    }

    #[test]
    fn test_snapshot_tracks_ticks() {
        let mut board = Board::new(3, 3).unwrap();
        board.add_bird(0, 0, 0.0).unwrap();
        board.tick();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!((snapshot.rows, snapshot.cols), (3, 3));
        assert_eq!(snapshot.records.len(), 1);
    }
}
