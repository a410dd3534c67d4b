//! Parameterized field selectors for value extraction.
//!
//! Call-number sources (and similar per-record value lists) are configured as
//! explicit [`FieldSelector`] query objects rather than ad hoc strings. A
//! selector names one tag plus the subfield codes to read; the selected
//! subfields of each field instance join with a single space, producing one
//! value per instance. [`FieldSpec`] holds an ordered list of selectors and
//! also parses the compact `"952e:050ab"` form.
//!
//! # Examples
//!
//! ```
//! use marc_facets::FieldSpec;
//!
//! let spec: FieldSpec = "952e:050ab".parse().unwrap();
//! assert_eq!(spec.selectors.len(), 2);
//! assert_eq!(spec.selectors[0].tag, "952");
//! assert_eq!(spec.selectors[1].subfields, vec!['a', 'b']);
//! ```

use crate::error::{FacetError, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A query object selecting subfield values from one field tag.
///
/// An empty `subfields` list selects every subfield of the field. Control
/// field tags (001-009) yield their payload as a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    /// Field tag (3 characters)
    pub tag: String,
    /// Subfield codes to read, in the order values should join
    pub subfields: Vec<char>,
}

impl FieldSelector {
    /// Create a selector for a tag and set of subfield codes.
    #[must_use]
    pub fn new(tag: impl Into<String>, subfields: &[char]) -> Self {
        FieldSelector {
            tag: tag.into(),
            subfields: subfields.to_vec(),
        }
    }

    /// Extract one value per matching field instance.
    ///
    /// The selected subfields of a field join with a single space, in the
    /// order they appear in the field. Field instances with none of the
    /// selected subfields contribute nothing. A missing tag yields an empty
    /// vector.
    #[must_use]
    pub fn values(&self, record: &Record) -> Vec<String> {
        if is_control_tag(&self.tag) {
            return record
                .control_fields_by_tag(&self.tag)
                .map(ToString::to_string)
                .collect();
        }

        record
            .fields_by_tag(&self.tag)
            .filter_map(|field| {
                let parts: Vec<&str> = if self.subfields.is_empty() {
                    field.subfields().map(|sf| sf.value.as_str()).collect()
                } else {
                    field.get_subfields(&self.subfields)
                };
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" "))
                }
            })
            .collect()
    }
}

/// An ordered list of field selectors.
///
/// Values extract in selector order, then field order within each selector.
/// Parse the compact colon-separated form with [`str::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Selectors in priority order
    pub selectors: Vec<FieldSelector>,
}

impl FieldSpec {
    /// Create a spec from selectors.
    #[must_use]
    pub fn new(selectors: Vec<FieldSelector>) -> Self {
        FieldSpec { selectors }
    }

    /// Extract values from every selector, concatenated in selector order.
    #[must_use]
    pub fn values(&self, record: &Record) -> Vec<String> {
        self.selectors
            .iter()
            .flat_map(|selector| selector.values(record))
            .collect()
    }
}

impl FromStr for FieldSpec {
    type Err = FacetError;

    /// Parse the compact form: colon-separated entries of a 3-character tag
    /// followed by zero or more subfield codes, e.g. `"952e:050ab"`.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(FacetError::InvalidFieldSpec(
                "spec must not be empty".to_string(),
            ));
        }

        let mut selectors = Vec::new();
        for entry in s.split(':') {
            // ASCII-only up front: the split below is a byte split
            if !entry.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(FacetError::InvalidFieldSpec(format!(
                    "entry '{entry}' contains non-alphanumeric characters"
                )));
            }
            if entry.len() < 3 {
                return Err(FacetError::InvalidFieldSpec(format!(
                    "entry '{entry}' is shorter than a 3-character tag"
                )));
            }
            let (tag, codes) = entry.split_at(3);
            selectors.push(FieldSelector {
                tag: tag.to_string(),
                subfields: codes.chars().collect(),
            });
        }

        Ok(FieldSpec { selectors })
    }
}

/// Control fields carry tags 001-009.
fn is_control_tag(tag: &str) -> bool {
    tag.len() == 3 && tag.starts_with("00") && tag != "000"
}
