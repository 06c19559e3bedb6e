use serde::{Deserialize, Serialize};
use std::path::Path;

pub use crate::error::LayoutError;

/// Rectangular-ish grid of seat positions: `true` is a seat, `false` a gap.
/// Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    rows: Vec<Vec<bool>>,
}

impl Layout {
    pub fn new(rows: Vec<Vec<bool>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn seat_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| **cell).count())
            .sum()
    }

    /// Parses text art: one line per row, `#`, `x`, `X` or `1` for a seat,
    /// `.`, `_`, `0` or a space for a gap.
    pub fn parse_text(text: &str) -> Result<Self, LayoutError> {
        let mut rows = Vec::new();
        for (row, line) in text.lines().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, ch) in line.trim_end_matches('\r').chars().enumerate() {
                let cell = match ch {
                    '#' | 'x' | 'X' | '1' => true,
                    '.' | '_' | '0' | ' ' => false,
                    _ => return Err(LayoutError::InvalidCell { row, col, ch }),
                };
                cells.push(cell);
            }
            rows.push(cells);
        }
        Ok(Self { rows })
    }

    pub fn parse_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    // Формат выбирается по расширению файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_text(&content)
        }
    }

    /// Small auditorium used when no layout file is configured.
    pub fn demo() -> Self {
        let art = "\
##.######.##
##.######.##
##.######.##
##.######.##
............
############";
        // Схема статическая, разбор не может упасть
        Self::parse_text(art).unwrap_or_default()
    }
}

impl From<Vec<Vec<bool>>> for Layout {
    fn from(rows: Vec<Vec<bool>>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_count_skips_gaps() {
        let layout = Layout::new(vec![vec![true, false, true], vec![true, true, false]]);
        assert_eq!(layout.row_count(), 2);
        assert_eq!(layout.seat_count(), 4);
    }

    #[test]
    fn test_parse_text_keeps_blank_rows() {
        let layout = Layout::parse_text("#.#\n\n.##").unwrap();
        assert_eq!(
            layout.rows(),
            &[vec![true, false, true], vec![], vec![false, true, true]]
        );
    }

    #[test]
    fn test_parse_text_rejects_unknown_cells() {
        let err = Layout::parse_text("##\n#?").unwrap_err();
        match err {
            LayoutError::InvalidCell { row, col, ch } => {
                assert_eq!((row, col, ch), (1, 1, '?'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_json() {
        let layout = Layout::parse_json("[[true,false],[true]]").unwrap();
        assert_eq!(layout.seat_count(), 2);
        assert!(Layout::parse_json("[[1,0]]").is_err());
    }

    #[test]
    fn test_demo_layout_is_not_empty() {
        let layout = Layout::demo();
        assert_eq!(layout.row_count(), 6);
        assert_eq!(layout.seat_count(), 52);
    }
}
