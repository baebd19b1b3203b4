//! Seam to the external per-cell symbol classifier.
//!
//! The classifier itself lives outside this crate. What lives here is the
//! label vocabulary, the tolerant reply parser, a classifier that shells
//! out to a program, and the bounded fan-out over independent cells.

use crate::{Error, Result};
use cellsplit_core::CellRecord;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// Symbols a cell may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    /// ▲
    Triangle,
    /// ✚
    Plus,
    /// ★
    Star,
}

impl Symbol {
    /// All symbols, in sanitizer priority order.
    pub const ALL: [Symbol; 3] = [Symbol::Triangle, Symbol::Plus, Symbol::Star];

    /// Canonical lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Triangle => "triangle",
            Symbol::Plus => "plus",
            Symbol::Star => "star",
        }
    }

    /// Parses a label, ignoring ASCII case.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|symbol| label.eq_ignore_ascii_case(symbol.as_str()))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier verdict for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellLabel {
    /// The cell shows this symbol.
    Symbol(Symbol),
    /// The cell is empty or shows nothing from the vocabulary.
    Empty,
    /// The reply could not be interpreted; `raw` keeps it for inspection.
    Uncertain { raw: String },
}

impl CellLabel {
    /// The symbol, if one was recognized.
    #[must_use]
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            CellLabel::Symbol(symbol) => Some(*symbol),
            CellLabel::Empty | CellLabel::Uncertain { .. } => None,
        }
    }

    /// Returns true for an uninterpretable reply.
    #[must_use]
    pub fn is_uncertain(&self) -> bool {
        matches!(self, CellLabel::Uncertain { .. })
    }
}

/// Interprets a classifier reply.
///
/// A strict `{"symbol": "<label>"}` or `{"symbol": null}` object wins.
/// Otherwise the lowercased text is scanned for `triangle`, `plus` and
/// `star` in that order, then for `null` or `empty`. Anything else is
/// [`CellLabel::Uncertain`].
#[must_use]
pub fn parse_label(reply: &str) -> CellLabel {
    if let Some(label) = parse_strict(reply.trim()) {
        return label;
    }

    let lower = reply.to_lowercase();
    if let Some(symbol) = Symbol::ALL
        .into_iter()
        .find(|symbol| lower.contains(symbol.as_str()))
    {
        return CellLabel::Symbol(symbol);
    }
    if lower.contains("null") || lower.contains("empty") {
        return CellLabel::Empty;
    }
    CellLabel::Uncertain {
        raw: reply.to_string(),
    }
}

fn parse_strict(reply: &str) -> Option<CellLabel> {
    let value: serde_json::Value = serde_json::from_str(reply).ok()?;
    match value.as_object()?.get("symbol")? {
        serde_json::Value::Null => Some(CellLabel::Empty),
        serde_json::Value::String(label) => Symbol::from_label(label).map(CellLabel::Symbol),
        _ => None,
    }
}

/// Something that labels a single cropped cell.
///
/// Calls for different cells are independent and may run concurrently.
pub trait SymbolClassifier: Send + Sync {
    /// Labels the crop referenced by `cell`.
    fn classify(&self, cell: &CellRecord) -> Result<CellLabel>;
}

/// Classifies by running a program with the crop path as last argument and
/// parsing its standard output with [`parse_label`].
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandClassifier {
    /// Creates a classifier running `program`.
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds fixed arguments placed before the crop path.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl SymbolClassifier for CommandClassifier {
    fn classify(&self, cell: &CellRecord) -> Result<CellLabel> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&cell.path)
            .output()?;

        if !output.status.success() {
            return Err(Error::Classifier(format!(
                "{} failed on cell r{}c{} ({}): {}",
                self.program.display(),
                cell.row,
                cell.col,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(parse_label(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// A cell together with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCell {
    /// The exported cell.
    pub cell: CellRecord,
    /// Classifier verdict.
    pub label: CellLabel,
}

/// Labels every cell, running at most `concurrency` calls at once.
///
/// Output order matches `cells`. The first classifier error fails the batch.
pub fn classify_cells<C>(
    cells: &[CellRecord],
    classifier: &C,
    concurrency: usize,
) -> Result<Vec<ClassifiedCell>>
where
    C: SymbolClassifier + ?Sized,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency.max(1))
        .build()?;

    let classified: Vec<ClassifiedCell> = pool.install(|| {
        cells
            .par_iter()
            .map(|cell| {
                let label = classifier.classify(cell)?;
                Ok(ClassifiedCell {
                    cell: cell.clone(),
                    label,
                })
            })
            .collect::<Result<Vec<_>>>()
    })?;

    for item in classified.iter().filter(|item| item.label.is_uncertain()) {
        warn!(
            "cell r{}c{}: uncertain classifier reply",
            item.cell.row, item.cell.col
        );
    }
    info!("classified {} cell(s)", classified.len());
    Ok(classified)
}

/// One entry of the merged result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// 1-based row.
    pub row: usize,
    /// 1-based column.
    pub col: usize,
    /// Recognized symbol; `null` for empty or uncertain cells.
    pub symbol: Option<Symbol>,
}

/// Flattens labels into `{row, col, symbol}` entries sorted by position.
#[must_use]
pub fn merge_table(classified: &[ClassifiedCell]) -> Vec<TableEntry> {
    let mut table: Vec<TableEntry> = classified
        .iter()
        .map(|item| TableEntry {
            row: item.cell.row,
            col: item.cell.col,
            symbol: item.label.symbol(),
        })
        .collect();
    table.sort_by_key(|entry| (entry.row, entry.col));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellsplit_core::CellBox;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cell(row: usize, col: usize) -> CellRecord {
        CellRecord {
            row,
            col,
            path: PathBuf::from(crate::sink::cell_file_name(row, col)),
            bbox: CellBox {
                x: 0,
                y: 0,
                w: 1,
                h: 1,
            },
        }
    }

    #[test]
    fn test_parse_strict_json() {
        assert_eq!(
            parse_label(r#"{"symbol":"triangle"}"#),
            CellLabel::Symbol(Symbol::Triangle)
        );
        assert_eq!(
            parse_label(" {\"symbol\": \"STAR\"}\n"),
            CellLabel::Symbol(Symbol::Star)
        );
        assert_eq!(parse_label(r#"{"symbol":null}"#), CellLabel::Empty);
    }

    #[test]
    fn test_parse_falls_back_to_sanitizer() {
        assert_eq!(
            parse_label("```json\n{\"symbol\": \"plus\"}\n```"),
            CellLabel::Symbol(Symbol::Plus)
        );
        // Unknown label in valid JSON goes through the text scan.
        assert_eq!(parse_label(r#"{"symbol":"circle"}"#), CellLabel::Uncertain {
            raw: r#"{"symbol":"circle"}"#.to_string()
        });
        assert_eq!(parse_label("It looks like a Star."), CellLabel::Symbol(Symbol::Star));
        assert_eq!(parse_label("the cell is empty"), CellLabel::Empty);
    }

    #[test]
    fn test_sanitizer_priority() {
        assert_eq!(
            parse_label("a star or maybe a triangle"),
            CellLabel::Symbol(Symbol::Triangle)
        );
    }

    #[test]
    fn test_uncertain_keeps_raw_reply() {
        let label = parse_label("I cannot tell");
        assert!(label.is_uncertain());
        assert_eq!(label.symbol(), None);
        assert_eq!(
            label,
            CellLabel::Uncertain {
                raw: "I cannot tell".to_string()
            }
        );
    }

    #[test]
    fn test_symbol_labels() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::from_label(symbol.as_str()), Some(symbol));
            assert_eq!(symbol.to_string(), symbol.as_str());
        }
        assert_eq!(Symbol::from_label("Plus"), Some(Symbol::Plus));
        assert_eq!(Symbol::from_label("circle"), None);
        assert_eq!(serde_json::to_string(&Symbol::Star).unwrap(), "\"star\"");
    }

    struct ColumnClassifier {
        calls: AtomicUsize,
    }

    impl SymbolClassifier for ColumnClassifier {
        fn classify(&self, cell: &CellRecord) -> Result<CellLabel> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(match cell.col {
                1 => CellLabel::Symbol(Symbol::Triangle),
                2 => CellLabel::Empty,
                _ => CellLabel::Uncertain {
                    raw: "?".to_string(),
                },
            })
        }
    }

    #[test]
    fn test_classify_cells_preserves_order() {
        let cells: Vec<CellRecord> = (1..=4)
            .flat_map(|row| (1..=3).map(move |col| cell(row, col)))
            .collect();
        let classifier = ColumnClassifier {
            calls: AtomicUsize::new(0),
        };

        let classified = classify_cells(&cells, &classifier, 3).unwrap();

        assert_eq!(classifier.calls.load(Ordering::SeqCst), 12);
        let order: Vec<&CellRecord> = classified.iter().map(|c| &c.cell).collect();
        assert_eq!(order, cells.iter().collect::<Vec<_>>());
        assert_eq!(classified[0].label, CellLabel::Symbol(Symbol::Triangle));
        assert!(classified[2].label.is_uncertain());
    }

    struct FailingClassifier;

    impl SymbolClassifier for FailingClassifier {
        fn classify(&self, cell: &CellRecord) -> Result<CellLabel> {
            if cell.row == 2 {
                return Err(Error::Classifier("timeout".to_string()));
            }
            Ok(CellLabel::Empty)
        }
    }

    #[test]
    fn test_classifier_error_fails_batch() {
        let cells = vec![cell(1, 1), cell(2, 1), cell(3, 1)];
        let result = classify_cells(&cells, &FailingClassifier, 2);
        assert!(matches!(result, Err(Error::Classifier(_))));
    }

    #[test]
    fn test_merge_table_sorted_with_nulls() {
        let classified = vec![
            ClassifiedCell {
                cell: cell(2, 1),
                label: CellLabel::Symbol(Symbol::Star),
            },
            ClassifiedCell {
                cell: cell(1, 2),
                label: CellLabel::Uncertain {
                    raw: String::new(),
                },
            },
            ClassifiedCell {
                cell: cell(1, 1),
                label: CellLabel::Empty,
            },
        ];

        let table = merge_table(&classified);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"row": 1, "col": 1, "symbol": null},
                {"row": 1, "col": 2, "symbol": null},
                {"row": 2, "col": 1, "symbol": "star"},
            ])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_command_classifier_reads_stdout() {
        let classifier = CommandClassifier::new("sh")
            .with_args(["-c", "echo '{\"symbol\": \"plus\"}'"]);
        let label = classifier.classify(&cell(1, 1)).unwrap();
        assert_eq!(label, CellLabel::Symbol(Symbol::Plus));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_classifier_nonzero_exit() {
        let classifier = CommandClassifier::new("sh").with_args(["-c", "echo boom >&2; exit 3"]);
        let err = classifier.classify(&cell(4, 2)).unwrap_err();
        match err {
            Error::Classifier(msg) => {
                assert!(msg.contains("r4c2"), "{msg}");
                assert!(msg.contains("boom"), "{msg}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
