//! Level loading and validation
//!
//! Levels live in a plain text file:
//!
//! ```text
//! ##delay=240
//! 0,0,0,0
//! 0,1,1,0
//! 0,1,1,0
//! 0,0,0,0
//! ```
//!
//! A `##` header opens a level and carries its step interval; rows of `0`/`1`
//! follow, one per grid row. Invalid levels are reported and dropped; if none
//! survive the game still gets a 1×1 dead grid to run on.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_DELAY, MIN_DELAY};

/// Offset of the delay value in a header line (`##delay=`)
const HEADER_PREFIX_LEN: usize = 8;

/// Why a level was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level has no rows")]
    NoRows,
    #[error("levels must have a square shape (NxN), found {rows} rows and {columns} columns")]
    NotSquare { rows: usize, columns: usize },
    #[error("value {value:?} at row {row}, column {column} is not 0 or 1")]
    NonBinaryValue {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("levels must have at least 1 alive cell")]
    NoLiveCells,
    #[error("row on line {line} appears before any ##delay= header")]
    RowWithoutHeader { line: usize },
}

/// A level that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLevel {
    /// Position of the level in the file (0-based, counting headers).
    /// `None` for rows found before the first header.
    pub index: Option<usize>,
    pub error: LevelError,
}

/// A validated level: a square column-major matrix and its step interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// `matrix[x][y]`, true where a cell starts alive
    pub matrix: Vec<Vec<bool>>,
    /// Ticks between automaton generations
    pub delay: u32,
}

impl Level {
    /// Minimal valid level: one dead cell
    pub fn fallback() -> Self {
        Self {
            matrix: vec![vec![false]],
            delay: DEFAULT_DELAY,
        }
    }

    pub fn size(&self) -> usize {
        self.matrix.len()
    }

    pub fn count_alive(&self) -> usize {
        self.matrix.iter().flatten().filter(|&&alive| alive).count()
    }
}

/// Level under construction while parsing
#[derive(Debug, Default)]
struct RawLevel {
    delay: u32,
    /// Row-major as read from the file
    rows: Vec<Vec<bool>>,
    error: Option<LevelError>,
}

impl RawLevel {
    /// Check shape and contents, producing a column-major level
    fn validate(self) -> Result<Level, LevelError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let rows = self.rows.len();
        if rows == 0 {
            return Err(LevelError::NoRows);
        }
        if let Some(bad) = self.rows.iter().find(|r| r.len() != rows) {
            return Err(LevelError::NotSquare {
                rows,
                columns: bad.len(),
            });
        }
        if !self.rows.iter().flatten().any(|&alive| alive) {
            return Err(LevelError::NoLiveCells);
        }

        let matrix = (0..rows)
            .map(|x| self.rows.iter().map(|row| row[x]).collect::<Vec<bool>>())
            .collect();
        Ok(Level {
            matrix,
            delay: self.delay,
        })
    }
}

/// Parse the delay out of a `##delay=N` header, clamped to the minimum
fn parse_delay(line: &str) -> Option<u32> {
    let value = line.get(HEADER_PREFIX_LEN..)?.trim();
    let delay: i64 = value.parse().ok()?;
    Some(delay.clamp(MIN_DELAY as i64, u32::MAX as i64) as u32)
}

/// Parse one `0,1,0` row
fn parse_row(line: &str, row: usize) -> Result<Vec<bool>, LevelError> {
    line.split(',')
        .enumerate()
        .map(|(column, value)| match value.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(LevelError::NonBinaryValue {
                row,
                column,
                value: other.to_string(),
            }),
        })
        .collect()
}

/// The playable levels plus everything that was rejected
#[derive(Debug, Clone)]
pub struct LevelSet {
    levels: Vec<Level>,
    rejected: Vec<RejectedLevel>,
}

impl LevelSet {
    /// Parse and validate a levels file's contents
    pub fn parse(text: &str) -> Self {
        Self::parse_with_delay(text, DEFAULT_DELAY)
    }

    /// Parse, using `default_delay` for headers whose delay doesn't parse
    pub fn parse_with_delay(text: &str, default_delay: u32) -> Self {
        let default_delay = default_delay.max(MIN_DELAY);
        let mut raw: Vec<RawLevel> = Vec::new();
        let mut rejected = Vec::new();
        let mut orphan_reported = false;

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.starts_with("##") {
                let delay = parse_delay(line).unwrap_or_else(|| {
                    log::error!(
                        "Wrong syntax in level header on line {}, expected ##delay=240; using {}",
                        line_no + 1,
                        default_delay
                    );
                    default_delay
                });
                raw.push(RawLevel {
                    delay,
                    ..Default::default()
                });
            } else if line.starts_with('0') || line.starts_with('1') {
                let Some(level) = raw.last_mut() else {
                    if !orphan_reported {
                        let error = LevelError::RowWithoutHeader { line: line_no + 1 };
                        log::error!("{}", error);
                        rejected.push(RejectedLevel { index: None, error });
                        orphan_reported = true;
                    }
                    continue;
                };
                let row = level.rows.len();
                match parse_row(line, row) {
                    Ok(cells) => level.rows.push(cells),
                    Err(error) => {
                        level.error.get_or_insert(error);
                    }
                }
            }
        }

        let mut levels = Vec::new();
        for (index, level) in raw.into_iter().enumerate() {
            match level.validate() {
                Ok(level) => levels.push(level),
                Err(error) => {
                    log::error!("{} (level index: {})", error, index);
                    rejected.push(RejectedLevel {
                        index: Some(index),
                        error,
                    });
                }
            }
        }

        if levels.is_empty() {
            log::error!("No valid levels, falling back to a 1x1 grid");
        } else {
            log::info!("Loaded {} levels ({} rejected)", levels.len(), rejected.len());
        }
        Self::from_levels(levels, rejected)
    }

    /// Load a levels file, falling back to the 1×1 level if it can't be read
    pub fn from_file(path: impl AsRef<Path>, default_delay: u32) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse_with_delay(&text, default_delay),
            Err(e) => {
                log::error!("Could not read levels file {}: {}", path.display(), e);
                Self::from_levels(Vec::new(), Vec::new())
            }
        }
    }

    /// Build from already-validated levels; empty input gets the fallback level
    pub fn from_levels(mut levels: Vec<Level>, rejected: Vec<RejectedLevel>) -> Self {
        if levels.is_empty() {
            levels.push(Level::fallback());
        }
        Self { levels, rejected }
    }

    /// Always at least one level
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn rejected(&self) -> &[RejectedLevel] {
        &self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LEVELS: &str = "\
##delay=120
0,0,0
1,1,1
0,0,0

##delay=300
0,1
1,0
";

    #[test]
    fn test_parse_two_levels() {
        let set = LevelSet::parse(TWO_LEVELS);
        assert_eq!(set.len(), 2);
        assert!(set.rejected().is_empty());

        let first = &set.levels()[0];
        assert_eq!(first.delay, 120);
        assert_eq!(first.size(), 3);
        // row 1 is the live line, so every column has y=1 alive
        assert_eq!(first.matrix[0], vec![false, true, false]);
        assert_eq!(first.matrix[2], vec![false, true, false]);

        let second = &set.levels()[1];
        assert_eq!(second.delay, 300);
        assert_eq!(second.matrix, vec![vec![false, true], vec![true, false]]);
    }

    #[test]
    fn test_matrix_is_column_major() {
        let set = LevelSet::parse("##delay=60\n1,1\n0,0\n");
        // row 0 = [1,1] -> (0,0) and (1,0) alive
        assert_eq!(set.levels()[0].matrix, vec![vec![true, false], vec![true, false]]);
    }

    #[test]
    fn test_delay_clamped_and_defaulted() {
        let set = LevelSet::parse("##delay=10\n1\n##delay=fast\n1\n##\n1\n");
        let delays: Vec<_> = set.levels().iter().map(|l| l.delay).collect();
        assert_eq!(delays, vec![MIN_DELAY, DEFAULT_DELAY, DEFAULT_DELAY]);
    }

    #[test]
    fn test_invalid_levels_dropped_with_speeds_paired() {
        let text = "\
##delay=100
1,0
##delay=200
0,0
0,0
##delay=300
0,1
1,2
##delay=400
1,1
1,1
";
        let set = LevelSet::parse(text);
        assert_eq!(set.len(), 1);
        assert_eq!(set.levels()[0].delay, 400);

        let errors: Vec<_> = set.rejected().iter().map(|r| (r.index, r.error.clone())).collect();
        assert_eq!(
            errors,
            vec![
                (Some(0), LevelError::NotSquare { rows: 1, columns: 2 }),
                (Some(1), LevelError::NoLiveCells),
                (
                    Some(2),
                    LevelError::NonBinaryValue {
                        row: 1,
                        column: 1,
                        value: "2".to_string()
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_custom_default_delay() {
        let set = LevelSet::parse_with_delay("##delay=?\n1\n", 90);
        assert_eq!(set.levels()[0].delay, 90);
    }

    #[test]
    fn test_empty_header_has_no_rows() {
        let set = LevelSet::parse("##delay=100\n\n##delay=100\n1\n");
        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected()[0].error, LevelError::NoRows);
    }

    #[test]
    fn test_rows_before_header_reported_once() {
        let set = LevelSet::parse("1,0\n0,1\n##delay=90\n1\n");
        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected().len(), 1);
        assert_eq!(set.rejected()[0].index, None);
        assert_eq!(set.rejected()[0].error, LevelError::RowWithoutHeader { line: 1 });
    }

    #[test]
    fn test_orphan_rows_distinct_from_first_level() {
        let set = LevelSet::parse("1\n##delay=90\n0\n##delay=90\n1\n");
        let indices: Vec<_> = set.rejected().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![None, Some(0)]);
        assert_eq!(set.rejected()[1].error, LevelError::NoLiveCells);
    }

    #[test]
    fn test_all_invalid_falls_back() {
        let set = LevelSet::parse("##delay=100\n0,0\n0,0\n");
        assert_eq!(set.len(), 1);
        assert_eq!(set.levels()[0], Level::fallback());
        assert_eq!(set.rejected().len(), 1);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let set = LevelSet::from_file("/definitely/not/here/levels.txt", DEFAULT_DELAY);
        assert_eq!(set.levels(), &[Level::fallback()]);
        assert!(set.rejected().is_empty());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LevelError::NoLiveCells.to_string(),
            "levels must have at least 1 alive cell"
        );
        assert_eq!(
            LevelError::NotSquare { rows: 3, columns: 2 }.to_string(),
            "levels must have a square shape (NxN), found 3 rows and 2 columns"
        );
    }
}
