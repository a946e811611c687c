//! Console rendering
//!
//! A bordered box with one glyph per cell: blank, `#` for a block, or an
//! arrow showing a bird's heading.

use std::fmt;

use crate::sim::Board;
use crate::sim::occupant::EMPTY_GLYPH;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}+", "-".repeat(self.cols()));
        writeln!(f, "{border}")?;
        for row in 0..self.rows() {
            f.write_str("|")?;
            for col in 0..self.cols() {
                let glyph = self
                    .get(row as i64, col as i64)
                    .map_or(EMPTY_GLYPH, |occupant| occupant.glyph());
                write!(f, "{glyph}")?;
            }
            f.write_str("|\n")?;
        }
        f.write_str(&border)
    }
}

impl Board {
    /// The board as a bordered text grid
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_empty_board() {
        let board = Board::new(2, 5).unwrap();
        let text = board.render_text();
        assert_eq!(text, "+-----+\n|     |\n|     |\n+-----+");
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_occupants_drawn() {
        let mut board = Board::new(2, 3).unwrap();
        board.add_block(0, 0).unwrap();
        board.add_bird(0, 2, 0.0).unwrap();
        board.add_bird(1, 1, PI / 2.0).unwrap();
        assert_eq!(board.render_text(), "+---+\n|# →|\n| ↓ |\n+---+");
    }
}
