#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # marc-facets
//!
//! A Rust library that turns MARC bibliographic records into the search
//! facets a discovery layer indexes: format tags, hierarchical
//! material-type paths, and graded call number labels.
//!
//! ## Quick Start
//!
//! ### Classifying a record
//!
//! ```
//! use marc_facets::{Field, Leader, Record, RecordClassifier};
//!
//! // A DVD: leader type 'g', an 007 videodisc, and a holdings call number
//! let mut record = Record::new(Leader {
//!     record_type: 'g',
//!     ..Leader::default()
//! });
//! record.add_control_field_str("007", "vd cvaizu");
//! record.add_field(
//!     Field::builder("952".to_string(), ' ', ' ')
//!         .subfield_str('e', "PN1997.2 .P37 2020")
//!         .build(),
//! );
//!
//! let facets = RecordClassifier::new().classify(&record);
//!
//! assert_eq!(facets.formats[0].as_str(), "Video");
//! assert_eq!(
//!     facets.material_types[0].as_str(),
//!     "1/At the Libraries/Physical Video (DVD, Blu-ray, etc.)/"
//! );
//! assert_eq!(facets.call_number_labels, vec!["PN", "PN1997", "PN1997.2"]);
//! ```
//!
//! ### Running one engine on its own
//!
//! ```
//! use marc_facets::{CallNumber, FormatCalculator, Leader, Record};
//!
//! let formats = FormatCalculator::new().determine(&Record::new(Leader::default()));
//! assert_eq!(formats.as_strings(), vec!["Book"]);
//!
//! let labels = CallNumber::parse("025.431").labels();
//! assert_eq!(labels, vec!["025", "025.4", "025.43", "025.431"]);
//! ```
//!
//! ### Classifying in parallel
//!
//! ```
//! use marc_facets::rayon_classifier_pool::classify_batch_parallel;
//! use marc_facets::{Leader, Record, RecordClassifier};
//!
//! let records = vec![Record::new(Leader::default()); 100];
//! let facets = classify_batch_parallel(&records, &RecordClassifier::new());
//! assert_eq!(facets.len(), 100);
//! ```
//!
//! ## Modules
//!
//! - [`record`] — Core MARC record structures (`Record`, `Field`, `Subfield`)
//! - [`leader`] — MARC record leader (24-byte header)
//! - [`format_tag`] — The format vocabulary (`FormatTag`, `FormatSet`)
//! - [`format_calculator`] — Format determination from leader/007/008/33x
//! - [`material_types`] — Hierarchical material-type facet paths
//! - [`call_number`] — Call number parsing and label grading
//! - [`field_spec`] — Parameterized field/subfield selectors
//! - [`classifier`] — The one-pass bundle producing `RecordFacets`
//! - [`rayon_classifier_pool`] — Batch classification on Rayon
//! - [`error`] — Error types and result type

pub mod call_number;
pub mod classifier;
pub mod error;
pub mod field_spec;
pub mod format_calculator;
pub mod format_tag;
pub mod leader;
pub mod material_types;
pub mod rayon_classifier_pool;
/// Core MARC record structures (`Record`, `Field`, `Subfield`)
pub mod record;

pub use call_number::{CallNumber, CallNumberLabeler};
pub use classifier::{RecordClassifier, RecordFacets};
pub use error::{FacetError, Result};
pub use field_spec::{FieldSelector, FieldSpec};
pub use format_calculator::{FormatCalculator, NotBookRule};
pub use format_tag::{FormatSet, FormatTag};
pub use leader::Leader;
pub use material_types::{FacetPath, MaterialTypeClassifier, AT_THE_LIBRARIES, AVAILABLE_ONLINE};
pub use record::{Field, FieldBuilder, Record, RecordBuilder, Subfield};
