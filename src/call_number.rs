//! Call number parsing and hierarchical label grading.
//!
//! Call numbers arrive from holdings and bibliographic fields with no
//! declared scheme, and are sometimes filed under the wrong field for their
//! type, so [`CallNumber::parse`] sniffs the scheme from the value itself:
//! Library of Congress shapes first, then Dewey, then an unclassified
//! catch-all. Parsing is total; there is no invalid call number, only an
//! unclassified one.
//!
//! [`CallNumber::labels`] expands one parsed value into coarse-to-fine
//! prefix labels (`QA76.73` yields `QA`, `QA76`, `QA76.73`) for drill-down
//! facets. [`CallNumberLabeler`] runs the whole pipeline over a record's
//! configured source fields and de-duplicates the union.
//!
//! # Examples
//!
//! ```
//! use marc_facets::CallNumber;
//!
//! let parsed = CallNumber::parse("QA76.73 .C153 2020");
//! assert_eq!(parsed.labels(), vec!["QA", "QA76", "QA76.73"]);
//!
//! let parsed = CallNumber::parse("025.431");
//! assert_eq!(parsed.labels(), vec!["025", "025.4", "025.43", "025.431"]);
//! ```

use crate::error::Result;
use crate::field_spec::{FieldSelector, FieldSpec};
use crate::record::Record;
use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    // LC class: 1-3 letters (I, O, W, X, Y never start a class), digits,
    // optional decimal. Cutters and years fall outside the class portion.
    // ASCII digit classes only: `\d` would also match Unicode digits such
    // as U+0664, and label grading byte-slices the decimal capture.
    static ref LC_CLASS: Regex = Regex::new(r"^([A-HJ-NP-VZ][A-Z]{0,2})\s*([0-9]+)(\.[0-9]+)?").unwrap();
    static ref DEWEY_CLASS: Regex = Regex::new(r"^([0-9]+)(\.[0-9]+)?").unwrap();
}

// ============================================================================
// CallNumber
// ============================================================================

/// One call number with its sniffed classification scheme.
///
/// Decimal components keep their leading dot, so labels concatenate without
/// further formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallNumber {
    /// Library of Congress classification.
    Lc {
        /// Class letters, e.g. `QA`.
        class_letters: String,
        /// Class digits, e.g. `76`.
        class_digits: String,
        /// Decimal extension including the dot, e.g. `.73`.
        class_decimal: Option<String>,
    },
    /// Dewey decimal classification.
    Dewey {
        /// Class digits, e.g. `025`.
        class_digits: String,
        /// Decimal extension including the dot, e.g. `.431`.
        class_decimal: Option<String>,
    },
    /// Anything else: local schemes, shelving notes, free text.
    Unclassified {
        /// The value up to the first dot, trimmed; empty when the value
        /// starts with a dot.
        prefix: String,
    },
}

impl CallNumber {
    /// Parse a raw call number value. Total: never fails.
    ///
    /// The value is uppercased and trimmed first. Values containing `:`,
    /// or longer than ten characters with no `.`, are free text and skip
    /// the LC/Dewey shape checks entirely.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase();

        let free_text = normalized.contains(':')
            || (normalized.chars().count() > 10 && !normalized.contains('.'));

        if !free_text {
            if let Some(caps) = LC_CLASS.captures(&normalized) {
                return CallNumber::Lc {
                    class_letters: caps[1].to_string(),
                    class_digits: caps[2].to_string(),
                    class_decimal: caps.get(3).map(|m| m.as_str().to_string()),
                };
            }
            if let Some(caps) = DEWEY_CLASS.captures(&normalized) {
                return CallNumber::Dewey {
                    class_digits: caps[1].to_string(),
                    class_decimal: caps.get(2).map(|m| m.as_str().to_string()),
                };
            }
        }

        let prefix = match normalized.find('.') {
            None => normalized,
            Some(0) => String::new(),
            Some(pos) => normalized[..pos].trim().to_string(),
        };
        CallNumber::Unclassified { prefix }
    }

    /// True for values that matched a recognized classification scheme.
    #[must_use]
    pub fn is_classified(&self) -> bool {
        !matches!(self, CallNumber::Unclassified { .. })
    }

    /// Coarse-to-fine prefix labels for drill-down faceting.
    ///
    /// LC grades by class letters, then digits, then the full decimal.
    /// Dewey grades the decimal one digit at a time up to four places.
    /// Unclassified values yield their prefix, or nothing when the prefix
    /// is empty.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        match self {
            CallNumber::Lc {
                class_letters,
                class_digits,
                class_decimal,
            } => {
                let mut labels = vec![
                    class_letters.clone(),
                    format!("{class_letters}{class_digits}"),
                ];
                if let Some(decimal) = class_decimal {
                    labels.push(format!("{class_letters}{class_digits}{decimal}"));
                }
                labels
            }
            CallNumber::Dewey {
                class_digits,
                class_decimal,
            } => {
                let mut labels = vec![class_digits.clone()];
                if let Some(decimal) = class_decimal {
                    // decimal is a dot then `[0-9]+`, so byte indexing holds
                    for end in 1..5 {
                        if decimal.len() > end {
                            labels.push(format!("{class_digits}{}", &decimal[..=end]));
                        }
                    }
                }
                labels
            }
            CallNumber::Unclassified { prefix } => {
                if prefix.is_empty() {
                    Vec::new()
                } else {
                    vec![prefix.clone()]
                }
            }
        }
    }
}

// ============================================================================
// CallNumberLabeler
// ============================================================================

/// Extracts graded call number labels from a record's source fields.
///
/// Sources run in priority order; every value each selector produces is
/// parsed and expanded, and the union of labels keeps first-seen order with
/// duplicates removed.
///
/// # Examples
///
/// ```
/// use marc_facets::{CallNumberLabeler, Field, Leader, Record};
///
/// let mut record = Record::new(Leader::default());
/// record.add_field(
///     Field::builder("050".to_string(), '0', '0')
///         .subfield_str('a', "QA76.73")
///         .subfield_str('b', ".C153 2020")
///         .build(),
/// );
///
/// let labeler = CallNumberLabeler::new();
/// assert_eq!(labeler.labels(&record), vec!["QA", "QA76", "QA76.73"]);
/// ```
#[derive(Debug, Clone)]
pub struct CallNumberLabeler {
    sources: Vec<FieldSelector>,
}

impl Default for CallNumberLabeler {
    fn default() -> Self {
        Self::new()
    }
}

impl CallNumberLabeler {
    /// Labeler with the default sources: holdings item call number
    /// (952 `$e`), then the bibliographic LC call number (050 `$a` `$b`).
    #[must_use]
    pub fn new() -> Self {
        CallNumberLabeler {
            sources: vec![
                FieldSelector::new("952", &['e']),
                FieldSelector::new("050", &['a', 'b']),
            ],
        }
    }

    /// Labeler reading the given source selectors in order.
    #[must_use]
    pub fn with_sources(sources: Vec<FieldSelector>) -> Self {
        CallNumberLabeler { sources }
    }

    /// Labeler configured from a compact spec such as `"952e:050ab"`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FacetError::InvalidFieldSpec`] when the spec does
    /// not parse.
    pub fn from_spec(spec: &str) -> Result<Self> {
        let spec: FieldSpec = spec.parse()?;
        Ok(Self::with_sources(spec.selectors))
    }

    /// The configured source selectors, in priority order.
    #[must_use]
    pub fn sources(&self) -> &[FieldSelector] {
        &self.sources
    }

    /// All graded labels for a record, de-duplicated, first-seen order.
    #[must_use]
    pub fn labels(&self, record: &Record) -> Vec<String> {
        let mut labels: IndexSet<String> = IndexSet::new();
        for selector in &self.sources {
            for value in selector.values(record) {
                labels.extend(CallNumber::parse(&value).labels());
            }
        }
        labels.into_iter().collect()
    }
}
