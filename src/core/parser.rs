//! Delimited text -> typed records.
//!
//! Parsing is best effort: ragged rows are accepted (short rows simply lack
//! the trailing fields, extra cells are dropped) and a row the reader cannot
//! decode is skipped. Nothing here returns an error to the caller.
//!
//! Cell inference rule, applied to the raw cell text:
//!
//! - empty cell -> `Null`
//! - exactly `true`/`TRUE` or `false`/`FALSE` -> `Boolean`
//! - matches `^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$` and the value
//!   lies within ±2^53 -> `Number` (so `007` is `7`; `1,000` and `+5` are not numbers)
//! - anything else -> `String`, verbatim

use crate::domain::model::{CellValue, Record, MAX_SAFE_INTEGER};
use csv::{ReaderBuilder, StringRecord};
use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").unwrap()
});

/// Delimiters tried by auto-detection, in preference order.
pub const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b'|', b';'];

const DETECTION_PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// `None` = auto-detect from the first rows.
    pub delimiter: Option<u8>,
    /// When off every cell stays a string.
    pub dynamic_typing: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            dynamic_typing: true,
        }
    }
}

/// Parses `raw_text` with default options (auto delimiter, type inference on).
pub fn parse(raw_text: &str) -> Vec<Record> {
    parse_with(raw_text, &ParseOptions::default())
}

pub fn parse_with(raw_text: &str, options: &ParseOptions) -> Vec<Record> {
    if raw_text.trim().is_empty() {
        return Vec::new();
    }

    let delimiter = options
        .delimiter
        .unwrap_or_else(|| detect_delimiter(raw_text));
    tracing::debug!("Parsing with delimiter {:?}", delimiter as char);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(raw_text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(e) => {
            tracing::warn!("Header row could not be read, no records produced: {}", e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for result in reader.records() {
        match result {
            Ok(cells) => records.push(build_record(&headers, &cells, options.dynamic_typing)),
            Err(e) => {
                // 單列錯誤不中斷整體解析
                tracing::warn!("Skipping unreadable row: {}", e);
            }
        }
    }

    tracing::debug!(
        "Parsed {} records across {} columns",
        records.len(),
        headers.len()
    );
    records
}

fn build_record(headers: &[String], cells: &StringRecord, dynamic_typing: bool) -> Record {
    if cells.len() > headers.len() {
        let line = cells.position().map(|p| p.line()).unwrap_or_default();
        tracing::debug!(
            "Line {}: dropping {} cells beyond the header width",
            line,
            cells.len() - headers.len()
        );
    }

    // zip 會在較短的一方結束：短列缺少的欄位不會出現在 Record 中
    headers
        .iter()
        .zip(cells.iter())
        .map(|(name, cell)| {
            let value = if dynamic_typing {
                infer_cell(cell)
            } else {
                CellValue::String(cell.to_string())
            };
            (name.clone(), value)
        })
        .collect()
}

/// Infers the scalar type of one raw cell.
pub fn infer_cell(raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }

    match raw {
        "true" | "TRUE" => return CellValue::Boolean(true),
        "false" | "FALSE" => return CellValue::Boolean(false),
        _ => {}
    }

    if NUMERIC_LITERAL.is_match(raw) {
        if let Ok(number) = raw.trim().parse::<f64>() {
            if number.abs() <= MAX_SAFE_INTEGER {
                return CellValue::Number(number);
            }
        }
    }

    CellValue::String(raw.to_string())
}

/// Picks the candidate delimiter whose field count is most consistent over
/// the first rows. Falls back to `,` when no candidate yields ~2+ fields.
pub fn detect_delimiter(raw_text: &str) -> u8 {
    let mut best: Option<(u8, usize, f64)> = None;

    for &candidate in &DELIMITER_CANDIDATES {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(candidate)
            .flexible(true)
            .from_reader(raw_text.as_bytes());

        let counts: Vec<usize> = reader
            .records()
            .take(DETECTION_PREVIEW_ROWS)
            .filter_map(|row| row.ok())
            .map(|row| row.len())
            .collect();
        if counts.is_empty() {
            continue;
        }

        let delta: usize = counts.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
        let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if average <= 1.99 {
            continue;
        }

        let better = match best {
            None => true,
            Some((_, best_delta, best_average)) => {
                delta < best_delta || (delta == best_delta && average > best_average)
            }
        };
        if better {
            best = Some((candidate, delta, average));
        }
    }

    best.map(|(delimiter, _, _)| delimiter).unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEADS: &str = "industry,companySize,location,status\n\
                         Tech,50,NYC,Contacted\n\
                         Tech,20,LA,New\n\
                         Finance,100,NYC,Contacted\n";

    #[test]
    fn test_parse_builds_one_record_per_row() {
        let records = parse(LEADS);

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].get("industry"),
            Some(&CellValue::String("Tech".to_string()))
        );
        assert_eq!(records[0].get("companySize"), Some(&CellValue::Number(50.0)));
        assert_eq!(
            records[2].get("status"),
            Some(&CellValue::String("Contacted".to_string()))
        );
    }

    #[test]
    fn test_parse_header_only_and_blank_input() {
        assert!(parse("industry,companySize,location,status\n").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("   \n\t\n  ").is_empty());
    }

    #[test]
    fn test_parse_skips_trailing_blank_lines() {
        let text = format!("{}\n\n\n", LEADS);
        assert_eq!(parse(&text).len(), 3);
    }

    #[test]
    fn test_short_row_omits_missing_fields() {
        let records = parse("industry,companySize,location,status\nTech,50\n");

        assert_eq!(records.len(), 1);
        assert!(records[0].get("location").is_none());
        assert!(records[0].get("status").is_none());
        assert_eq!(records[0].get("companySize"), Some(&CellValue::Number(50.0)));
    }

    #[test]
    fn test_long_row_drops_extra_cells() {
        let records = parse("industry,location\nTech,NYC,extra,more\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data.len(), 2);
    }

    #[test]
    fn test_empty_cell_becomes_null() {
        let records = parse("industry,location\n,NYC\n");
        assert_eq!(records[0].get("industry"), Some(&CellValue::Null));
    }

    #[test]
    fn test_quoted_cells_keep_delimiters() {
        let records = parse("industry,location\n\"Media, Arts\",\"New York, NY\"\n");

        assert_eq!(
            records[0].get("location"),
            Some(&CellValue::String("New York, NY".to_string()))
        );
        assert_eq!(
            records[0].get("industry"),
            Some(&CellValue::String("Media, Arts".to_string()))
        );
    }

    #[test]
    fn test_duplicate_header_keeps_rightmost_value() {
        let records = parse("industry,industry\nTech,Finance\n");
        assert_eq!(
            records[0].get("industry"),
            Some(&CellValue::String("Finance".to_string()))
        );
    }

    #[test]
    fn test_infer_cell_rules() {
        assert_eq!(infer_cell(""), CellValue::Null);
        assert_eq!(infer_cell("true"), CellValue::Boolean(true));
        assert_eq!(infer_cell("FALSE"), CellValue::Boolean(false));
        assert_eq!(infer_cell("True"), CellValue::String("True".to_string()));
        assert_eq!(infer_cell("007"), CellValue::Number(7.0));
        assert_eq!(infer_cell("-2.5"), CellValue::Number(-2.5));
        assert_eq!(infer_cell(".5"), CellValue::Number(0.5));
        assert_eq!(infer_cell("1e3"), CellValue::Number(1000.0));
        assert_eq!(infer_cell(" 42 "), CellValue::Number(42.0));
        assert_eq!(infer_cell("+5"), CellValue::String("+5".to_string()));
        assert_eq!(infer_cell("1,000"), CellValue::String("1,000".to_string()));
        assert_eq!(infer_cell("50-200"), CellValue::String("50-200".to_string()));
        assert_eq!(infer_cell("   "), CellValue::String("   ".to_string()));
    }

    #[test]
    fn test_infer_cell_rejects_unsafe_magnitudes() {
        assert_eq!(
            infer_cell("99999999999999999999"),
            CellValue::String("99999999999999999999".to_string())
        );
        assert_eq!(infer_cell("1e400"), CellValue::String("1e400".to_string()));
    }

    #[test]
    fn test_dynamic_typing_disabled_keeps_strings() {
        let options = ParseOptions {
            delimiter: Some(b','),
            dynamic_typing: false,
        };
        let records = parse_with("companySize,location\n50,\n", &options);

        assert_eq!(
            records[0].get("companySize"),
            Some(&CellValue::String("50".to_string()))
        );
        assert_eq!(
            records[0].get("location"),
            Some(&CellValue::String(String::new()))
        );
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter(LEADS), b',');
        assert_eq!(detect_delimiter("industry\tlocation\nTech\tNYC\n"), b'\t');
        assert_eq!(detect_delimiter("industry;location\nTech;NYC\n"), b';');
        assert_eq!(detect_delimiter("industry|location\nTech|NYC\n"), b'|');
        assert_eq!(detect_delimiter("industry\nTech\n"), b',');
    }

    #[test]
    fn test_parse_autodetects_tab_separated_input() {
        let records = parse("industry\tlocation\nTech\tNYC\nFinance\tLA\n");

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1].get("location"),
            Some(&CellValue::String("LA".to_string()))
        );
    }

    #[test]
    fn test_parse_is_restartable() {
        assert_eq!(parse(LEADS), parse(LEADS));
    }
}
