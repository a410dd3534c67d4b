//! One-pass facet classification for a whole record.
//!
//! [`RecordClassifier`] bundles format determination, material-type
//! mapping, and call number labeling, and runs them in their required
//! order: the material-type rules consume the format set the format stage
//! produced. [`RecordFacets`] carries the combined result and serializes
//! with serde for indexing pipelines.
//!
//! # Examples
//!
//! ```
//! use marc_facets::{Leader, Record, RecordClassifier};
//!
//! let classifier = RecordClassifier::new();
//! let facets = classifier.classify(&Record::new(Leader::default()));
//!
//! assert_eq!(facets.formats.len(), 1);
//! assert_eq!(facets.material_types[0], "1/At the Libraries/Print Book/");
//! assert!(facets.call_number_labels.is_empty());
//! ```

use crate::call_number::CallNumberLabeler;
use crate::format_calculator::FormatCalculator;
use crate::format_tag::FormatTag;
use crate::material_types::{FacetPath, MaterialTypeClassifier};
use crate::record::Record;
use serde::{Deserialize, Serialize};

/// The complete facet output for one record.
///
/// Collections keep the order their engines emitted; consumers index them
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFacets {
    /// Format tags in stage order.
    pub formats: Vec<FormatTag>,
    /// Hierarchical material-type paths, leaves first, parents last.
    pub material_types: Vec<FacetPath>,
    /// Graded call number labels, de-duplicated.
    pub call_number_labels: Vec<String>,
}

/// Bundle of the three classification engines.
///
/// Owns its engines by value; construct non-default engines with the
/// `with_` builders. The classifier is `Send + Sync` and safe to share
/// across worker threads.
#[derive(Debug, Clone, Default)]
pub struct RecordClassifier {
    formats: FormatCalculator,
    material_types: MaterialTypeClassifier,
    call_numbers: CallNumberLabeler,
}

impl RecordClassifier {
    /// Classifier with the standard engine configurations.
    #[must_use]
    pub fn new() -> Self {
        RecordClassifier {
            formats: FormatCalculator::new(),
            material_types: MaterialTypeClassifier::new(),
            call_numbers: CallNumberLabeler::new(),
        }
    }

    /// Replace the format calculator.
    #[must_use]
    pub fn with_format_calculator(mut self, formats: FormatCalculator) -> Self {
        self.formats = formats;
        self
    }

    /// Replace the call number labeler.
    #[must_use]
    pub fn with_call_number_labeler(mut self, call_numbers: CallNumberLabeler) -> Self {
        self.call_numbers = call_numbers;
        self
    }

    /// Classify one record. Total: every record gets an answer.
    #[must_use]
    pub fn classify(&self, record: &Record) -> RecordFacets {
        let formats = self.formats.determine(record);
        let material_types = self.material_types.classify(record, &formats);
        let call_number_labels = self.call_numbers.labels(record);

        RecordFacets {
            formats: formats.iter().collect(),
            material_types,
            call_number_labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::Leader;
    use crate::record::Field;

    #[test]
    fn test_classify_plain_book() {
        let facets = RecordClassifier::new().classify(&Record::new(Leader::default()));

        assert_eq!(facets.formats, vec![FormatTag::Book]);
        assert_eq!(
            facets.material_types,
            vec![
                FacetPath::new("1/At the Libraries/Print Book/"),
                FacetPath::new("0/At the Libraries/"),
            ]
        );
        assert!(facets.call_number_labels.is_empty());
    }

    #[test]
    fn test_classify_dvd_with_holdings() {
        let mut record = Record::new(Leader {
            record_type: 'g',
            ..Leader::default()
        });
        record.add_control_field_str("007", "vd cvaizu");
        record.add_field(
            Field::builder("952".to_string(), ' ', ' ')
                .subfield_str('e', "PN1997.2 .P37 2020")
                .build(),
        );

        let facets = RecordClassifier::new().classify(&record);

        assert!(facets.formats.contains(&FormatTag::Video));
        assert!(facets.formats.contains(&FormatTag::VideoDisc));
        assert!(facets
            .material_types
            .contains(&FacetPath::new("1/At the Libraries/Physical Video (DVD, Blu-ray, etc.)/")));
        assert_eq!(facets.call_number_labels, vec!["PN", "PN1997", "PN1997.2"]);
    }

    #[test]
    fn test_material_stage_sees_format_stage_output() {
        // No 33x fields at all: the eBook leaf can only come from formats
        let record = Record::new(Leader {
            record_type: 'm',
            ..Leader::default()
        });

        let facets = RecordClassifier::new().classify(&record);
        assert_eq!(facets.formats, vec![FormatTag::EBook]);
        assert_eq!(facets.material_types[0], "1/Available Online/Electronic Book/");
    }

    #[test]
    fn test_custom_format_calculator() {
        let record = Record::new(Leader {
            record_type: 'c',
            ..Leader::default()
        });

        let stock = RecordClassifier::new().classify(&record);
        assert_eq!(stock.formats, vec![FormatTag::MusicalScore]);

        let relaxed = RecordClassifier::new().with_format_calculator(FormatCalculator::base());
        let facets = relaxed.classify(&record);
        assert_eq!(facets.formats, vec![FormatTag::MusicalScore, FormatTag::Book]);
    }

    #[test]
    fn test_custom_call_number_sources() {
        let mut record = Record::new(Leader::default());
        record.add_field(
            Field::builder("090".to_string(), ' ', ' ')
                .subfield_str('a', "QA76.73")
                .build(),
        );

        let stock = RecordClassifier::new().classify(&record);
        assert!(stock.call_number_labels.is_empty());

        let labeler = CallNumberLabeler::from_spec("090a").unwrap();
        let custom = RecordClassifier::new().with_call_number_labeler(labeler);
        assert_eq!(
            custom.classify(&record).call_number_labels,
            vec!["QA", "QA76", "QA76.73"]
        );
    }

    #[test]
    fn test_facets_serialize_shape() {
        let mut record = Record::new(Leader::default());
        record.add_field(
            Field::builder("952".to_string(), ' ', ' ')
                .subfield_str('e', "QA76.73")
                .build(),
        );

        let facets = RecordClassifier::new().classify(&record);
        let json = serde_json::to_value(&facets).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "formats": ["Book"],
                "material_types": [
                    "1/At the Libraries/Print Book/",
                    "0/At the Libraries/",
                ],
                "call_number_labels": ["QA", "QA76", "QA76.73"],
            })
        );
    }

    #[test]
    fn test_facets_roundtrip() {
        let facets = RecordClassifier::new().classify(&Record::new(Leader::default()));
        let json = serde_json::to_string(&facets).unwrap();
        let back: RecordFacets = serde_json::from_str(&json).unwrap();
        assert_eq!(back, facets);
    }
}
