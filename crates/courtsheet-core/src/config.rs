//! Parser configuration shared by the library and the CLI.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ROW_PRECISION: f32 = 1.0;
pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

/// Tunables for one report parser.
///
/// Built once by the host application and passed in explicitly; nothing in
/// the parser reads global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Height of a row bucket in PDF points. Fragments whose baselines fall
    /// in the same bucket join one line. `1.0` is plain integer rounding;
    /// larger values merge more aggressively.
    pub row_precision: f32,
    /// Fewer extracted characters than this means an image-only or broken PDF.
    pub min_text_chars: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            row_precision: DEFAULT_ROW_PRECISION,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }
}

impl ParserConfig {
    /// Row bucket for a baseline at `y`.
    pub fn row_key(&self, y: f32) -> i64 {
        let precision = if self.row_precision > 0.0 {
            self.row_precision
        } else {
            DEFAULT_ROW_PRECISION
        };
        (y / precision).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rounds_to_whole_points() {
        let config = ParserConfig::default();
        assert_eq!(config.row_key(700.4), 700);
        assert_eq!(config.row_key(699.6), 700);
        assert_ne!(config.row_key(700.4), config.row_key(701.6));
    }

    #[test]
    fn coarser_precision_merges_nearby_baselines() {
        let config = ParserConfig {
            row_precision: 4.0,
            ..ParserConfig::default()
        };
        assert_eq!(config.row_key(700.0), config.row_key(701.5));
    }

    #[test]
    fn non_positive_precision_falls_back() {
        let config = ParserConfig {
            row_precision: 0.0,
            ..ParserConfig::default()
        };
        assert_eq!(config.row_key(12.3), 12);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"row_precision": 2.0}"#).unwrap();
        assert_eq!(config.row_precision, 2.0);
        assert_eq!(config.min_text_chars, DEFAULT_MIN_TEXT_CHARS);
    }
}
