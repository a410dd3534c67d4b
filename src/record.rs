//! MARC bibliographic record structures and operations.
//!
//! This module provides the core record types the classification engines
//! consume:
//! - [`Record`] — Main bibliographic record structure
//! - [`Field`] — Variable data fields (010+)
//! - [`Subfield`] — Named data elements within fields
//!
//! The engines only read; the mutation surface is limited to construction.
//!
//! # Examples
//!
//! Create a record with the builder API:
//!
//! ```
//! use marc_facets::{Field, Leader, Record};
//!
//! let record = Record::builder(Leader::default())
//!     .control_field_str("001", "12345")
//!     .field(
//!         Field::builder("245".to_string(), '1', '0')
//!             .subfield_str('a', "Title")
//!             .build(),
//!     )
//!     .build();
//!
//! assert!(record.has_field("245"));
//! ```
//!
//! Iterate over fields:
//!
//! ```ignore
//! for field in record.fields_by_tag("336") {
//!     for value in field.subfields_by_code('a') {
//!         println!("Content type: {}", value);
//!     }
//! }
//! ```

use crate::leader::Leader;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Index;

/// A MARC bibliographic record
///
/// Fields are stored in insertion order using `IndexMap`, preserving the order
/// in which fields were added to the record. Field order is semantically
/// significant to classification; emitted facet values follow it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Record leader (24 bytes)
    pub leader: Leader,
    /// Control fields (000-009) - tag -> values, preserves insertion order.
    /// 006 and 007 are repeatable, so each tag maps to a list.
    pub control_fields: IndexMap<String, Vec<String>>,
    /// Data fields (010+) - tag -> fields, preserves insertion order
    pub fields: IndexMap<String, Vec<Field>>,
}

/// A data field in a MARC record (fields 010 and higher)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 digits)
    pub tag: String,
    /// First indicator
    pub indicator1: char,
    /// Second indicator
    pub indicator2: char,
    /// Subfields (stored in `SmallVec` to avoid allocation for typical fields with 4 or fewer subfields)
    pub subfields: SmallVec<[Subfield; 4]>,
}

/// A subfield within a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

impl Record {
    /// Create a new MARC record with the given leader
    #[must_use]
    pub fn new(leader: Leader) -> Self {
        Record {
            leader,
            control_fields: IndexMap::new(),
            fields: IndexMap::new(),
        }
    }

    /// Create a builder for fluently constructing MARC records
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_facets::{Field, Leader, Record};
    ///
    /// let record = Record::builder(Leader::default())
    ///     .control_field_str("001", "12345")
    ///     .field(Field::builder("245".to_string(), '1', '0')
    ///         .subfield_str('a', "Title")
    ///         .build())
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(leader: Leader) -> RecordBuilder {
        RecordBuilder {
            record: Record {
                leader,
                control_fields: IndexMap::new(),
                fields: IndexMap::new(),
            },
        }
    }

    /// Add a control field (000-009)
    ///
    /// Repeated tags accumulate in insertion order.
    pub fn add_control_field(&mut self, tag: String, value: String) {
        self.control_fields.entry(tag).or_default().push(value);
    }

    /// Add a control field using string slices
    ///
    /// Convenience method that converts &str arguments to String automatically.
    pub fn add_control_field_str(&mut self, tag: &str, value: &str) {
        self.add_control_field(tag.to_string(), value.to_string());
    }

    /// Get the first control field value for a tag
    #[must_use]
    pub fn get_control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields
            .get(tag)
            .and_then(|values| values.first())
            .map(std::string::String::as_str)
    }

    /// Get all control field values for a tag
    #[must_use]
    pub fn get_control_fields(&self, tag: &str) -> Option<&[String]> {
        self.control_fields.get(tag).map(std::vec::Vec::as_slice)
    }

    /// Iterate over control field values matching a specific tag
    ///
    /// 007 in particular commonly repeats, one value per physical carrier.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// for value in record.control_fields_by_tag("007") {
    ///     println!("Physical description: {}", value);
    /// }
    /// ```
    pub fn control_fields_by_tag(&self, tag: &str) -> impl Iterator<Item = &str> {
        self.control_fields
            .get(tag)
            .map(|values| values.iter())
            .into_iter()
            .flatten()
            .map(std::string::String::as_str)
    }

    /// Add a data field
    pub fn add_field(&mut self, field: Field) {
        self.fields
            .entry(field.tag.clone())
            .or_default()
            .push(field);
    }

    /// Get all fields with a given tag
    #[must_use]
    pub fn get_fields(&self, tag: &str) -> Option<&[Field]> {
        self.fields.get(tag).map(std::vec::Vec::as_slice)
    }

    /// Get first field with a given tag
    #[must_use]
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.fields.get(tag).and_then(|v| v.first())
    }

    /// Check whether at least one data field with the given tag is present
    ///
    /// Mere presence of a tag is a classification signal for several fields
    /// (086 government document, 502 thesis, 111/711 conference).
    #[must_use]
    pub fn has_field(&self, tag: &str) -> bool {
        self.fields.get(tag).is_some_and(|v| !v.is_empty())
    }

    /// Iterate over all fields in tag order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values().flat_map(|v| v.iter())
    }

    /// Iterate over fields matching a specific tag
    ///
    /// Returns an iterator over all fields with the given tag.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// for field in record.fields_by_tag("338") {
    ///     if let Some(carrier) = field.get_subfield('a') {
    ///         println!("Carrier: {}", carrier);
    ///     }
    /// }
    /// ```
    pub fn fields_by_tag(&self, tag: &str) -> impl Iterator<Item = &Field> {
        self.fields.get(tag).map(|v| v.iter()).into_iter().flatten()
    }

    /// Iterate over all control fields
    ///
    /// Returns an iterator of (tag, value) tuples; repeated tags yield one
    /// tuple per value.
    pub fn control_fields_iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.control_fields.iter().flat_map(|(tag, values)| {
            values.iter().map(move |value| (tag.as_str(), value.as_str()))
        })
    }

    /// Collect every value of one subfield code across all fields with a tag
    ///
    /// Values appear in field order, then subfield order within each field.
    /// A missing tag yields an empty vector.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let link_text = record.subfield_values("856", 'y');
    /// ```
    #[must_use]
    pub fn subfield_values(&self, tag: &str, code: char) -> Vec<&str> {
        self.fields_by_tag(tag)
            .flat_map(|field| field.subfields_by_code(code))
            .collect()
    }
}

/// Enable dictionary-like access to Record fields using `record["245"]`.
///
/// Returns the first field with the given tag, or panics if not found.
/// For fallible access, use `Record::get_field()` instead.
///
/// # Examples
///
/// ```ignore
/// let field = &record["245"];
/// ```
impl Index<&str> for Record {
    type Output = Field;

    fn index(&self, tag: &str) -> &Self::Output {
        self.get_field(tag).expect("field not found")
    }
}

/// Builder for fluently constructing MARC records
///
/// # Examples
///
/// ```
/// use marc_facets::{Field, Leader, Record};
///
/// let record = Record::builder(Leader::default())
///     .control_field_str("001", "12345")
///     .field(Field::builder("245".to_string(), '1', '0')
///         .subfield_str('a', "The Great Gatsby")
///         .subfield_str('c', "F. Scott Fitzgerald")
///         .build())
///     .build();
/// ```
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Add a control field to the record being built
    #[must_use]
    pub fn control_field(mut self, tag: String, value: String) -> Self {
        self.record.add_control_field(tag, value);
        self
    }

    /// Add a control field using string slices
    #[must_use]
    pub fn control_field_str(mut self, tag: &str, value: &str) -> Self {
        self.record.add_control_field_str(tag, value);
        self
    }

    /// Add a data field to the record being built
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.record.add_field(field);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

impl Field {
    /// Create a new data field
    #[must_use]
    pub fn new(tag: String, indicator1: char, indicator2: char) -> Self {
        Field {
            tag,
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// Create a builder for constructing fields fluently
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_facets::Field;
    ///
    /// let field = Field::builder("245".to_string(), '1', '0')
    ///     .subfield('a', "The Great Gatsby".to_string())
    ///     .subfield('c', "F. Scott Fitzgerald".to_string())
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(tag: String, indicator1: char, indicator2: char) -> FieldBuilder {
        FieldBuilder {
            field: Field {
                tag,
                indicator1,
                indicator2,
                subfields: SmallVec::new(),
            },
        }
    }

    /// Add a subfield
    pub fn add_subfield(&mut self, code: char, value: String) {
        self.subfields.push(Subfield { code, value });
    }

    /// Add a subfield using a string slice
    ///
    /// Convenience method that converts &str to String automatically.
    pub fn add_subfield_str(&mut self, code: char, value: &str) {
        self.add_subfield(code, value.to_string());
    }

    /// Get all values for a subfield code
    #[must_use]
    pub fn get_subfield_values(&self, code: char) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
            .collect()
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Iterate over all subfields
    ///
    /// # Examples
    ///
    /// ```ignore
    /// for subfield in field.subfields() {
    ///     println!("Code: {}, Value: {}", subfield.code, subfield.value);
    /// }
    /// ```
    pub fn subfields(&self) -> impl Iterator<Item = &Subfield> {
        self.subfields.iter()
    }

    /// Iterate over subfields with a specific code
    ///
    /// # Examples
    ///
    /// ```ignore
    /// for value in field.subfields_by_code('a') {
    ///     println!("Content type: {}", value);
    /// }
    /// ```
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Get all subfield values matching any of the given codes
    ///
    /// Returns a list of subfield values in the order they appear in the field.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let values = field.get_subfields(&['a', 'b']);
    /// ```
    #[must_use]
    pub fn get_subfields(&self, codes: &[char]) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|sf| codes.contains(&sf.code))
            .map(|sf| sf.value.as_str())
            .collect()
    }

    /// Get the field's content as a formatted string
    ///
    /// Concatenates all subfield values with spaces.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let value_str = field.value();
    /// ```
    #[must_use]
    pub fn value(&self) -> String {
        self.subfields
            .iter()
            .map(|sf| sf.value.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Enable dictionary-like access to Field subfields using `field['a']`.
///
/// Returns the first subfield with the given code, or panics if not found.
/// For fallible access, use `Field::get_subfield()` instead.
///
/// # Examples
///
/// ```ignore
/// let title = &field['a'];
/// ```
impl Index<char> for Field {
    type Output = str;

    fn index(&self, code: char) -> &Self::Output {
        self.get_subfield(code).expect("subfield not found")
    }
}

/// Builder for fluently constructing MARC fields
///
/// # Examples
///
/// ```
/// use marc_facets::Field;
///
/// let field = Field::builder("245".to_string(), '1', '0')
///     .subfield('a', "Title".to_string())
///     .subfield('b', "Subtitle".to_string())
///     .build();
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Add a subfield to the field being built
    #[must_use]
    pub fn subfield(mut self, code: char, value: String) -> Self {
        self.field.add_subfield(code, value);
        self
    }

    /// Add a subfield using a string slice
    #[must_use]
    pub fn subfield_str(mut self, code: char, value: &str) -> Self {
        self.field.add_subfield_str(code, value);
        self
    }

    /// Build the field
    #[must_use]
    pub fn build(self) -> Field {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::Leader;

    #[test]
    fn test_record_creation() {
        let leader = Leader::default();
        let record = Record::new(leader.clone());
        assert_eq!(record.leader, leader);
        assert!(record.control_fields.is_empty());
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_add_control_field() {
        let mut record = Record::new(Leader::default());

        record.add_control_field("001".to_string(), "12345".to_string());
        assert_eq!(record.get_control_field("001"), Some("12345"));
        assert_eq!(record.get_control_field("008"), None);
    }

    #[test]
    fn test_repeated_control_fields_accumulate() {
        let mut record = Record::new(Leader::default());

        record.add_control_field_str("007", "vd cvaizg");
        record.add_control_field_str("007", "sd fsngnnmmned");

        assert_eq!(record.get_control_field("007"), Some("vd cvaizg"));
        let values: Vec<&str> = record.control_fields_by_tag("007").collect();
        assert_eq!(values, vec!["vd cvaizg", "sd fsngnnmmned"]);
        assert_eq!(record.get_control_fields("007").unwrap().len(), 2);
        assert!(record.control_fields_by_tag("006").next().is_none());
    }

    #[test]
    fn test_field_subfields() {
        let mut field = Field::new("245".to_string(), '1', '0');
        field.add_subfield('a', "Title".to_string());
        field.add_subfield('c', "Author".to_string());
        field.add_subfield('a', "Title continued".to_string());

        assert_eq!(field.get_subfield('a'), Some("Title"));
        let a_values = field.get_subfield_values('a');
        assert_eq!(a_values.len(), 2);
    }

    #[test]
    fn test_add_and_retrieve_fields() {
        let mut record = Record::new(Leader::default());

        let mut field = Field::new("245".to_string(), '1', '0');
        field.add_subfield('a', "Test Title".to_string());
        record.add_field(field);

        let fields = record.get_fields("245");
        assert!(fields.is_some());
        assert_eq!(fields.unwrap().len(), 1);
        assert!(record.has_field("245"));
        assert!(!record.has_field("260"));
    }

    #[test]
    fn test_multiple_fields_same_tag() {
        let mut record = Record::new(Leader::default());

        for i in 0..3 {
            let mut field = Field::new("650".to_string(), ' ', '0');
            field.add_subfield('a', format!("Subject {i}"));
            record.add_field(field);
        }

        let fields = record.get_fields("650");
        assert_eq!(fields.unwrap().len(), 3);
    }

    #[test]
    fn test_subfield_values_across_fields() {
        let record = Record::builder(Leader::default())
            .field(
                Field::builder("856".to_string(), '4', '0')
                    .subfield_str('u', "http://example.com/a")
                    .subfield_str('y', "Streaming video one")
                    .build(),
            )
            .field(
                Field::builder("856".to_string(), '4', '0')
                    .subfield_str('y', "Streaming video two")
                    .build(),
            )
            .build();

        let values = record.subfield_values("856", 'y');
        assert_eq!(values, vec!["Streaming video one", "Streaming video two"]);
        assert!(record.subfield_values("956", 'y').is_empty());
    }

    #[test]
    fn test_field_get_subfields_multiple_codes() {
        let mut field = Field::new("245".to_string(), '1', '0');
        field.add_subfield_str('a', "Title");
        field.add_subfield_str('b', "Subtitle");
        field.add_subfield_str('c', "Author");

        let values = field.get_subfields(&['a', 'c']);
        assert_eq!(values, vec!["Title", "Author"]);
    }

    #[test]
    fn test_field_get_subfields_preserves_order() {
        let mut field = Field::new("650".to_string(), ' ', '0');
        field.add_subfield_str('a', "Subject");
        field.add_subfield_str('x', "Subdivision 1");
        field.add_subfield_str('y', "Subdivision 2");
        field.add_subfield_str('z', "Geographic");

        let values = field.get_subfields(&['z', 'a', 'y']);
        assert_eq!(values.len(), 3);
        // Field order wins, not the order of codes requested
        assert_eq!(values, vec!["Subject", "Subdivision 2", "Geographic"]);
    }

    #[test]
    fn test_field_value_simple() {
        let mut field = Field::new("050".to_string(), ' ', '0');
        field.add_subfield_str('a', "QA76.73");
        field.add_subfield_str('b', ".C153 2020");

        assert_eq!(field.value(), "QA76.73 .C153 2020");
    }

    #[test]
    fn test_field_value_empty_field() {
        let field = Field::new("245".to_string(), '1', '0');
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_field_builder() {
        let field = Field::builder("245".to_string(), '1', '0')
            .subfield('a', "The Great Gatsby".to_string())
            .subfield('c', "F. Scott Fitzgerald".to_string())
            .build();

        assert_eq!(field.tag, "245");
        assert_eq!(field.indicator1, '1');
        assert_eq!(field.indicator2, '0');
        assert_eq!(field.get_subfield('a'), Some("The Great Gatsby"));
        assert_eq!(field.get_subfield('c'), Some("F. Scott Fitzgerald"));
    }

    #[test]
    fn test_record_builder() {
        let record = Record::builder(Leader::default())
            .control_field_str("001", "12345")
            .field(
                Field::builder("245".to_string(), '1', '0')
                    .subfield_str('a', "Test Title")
                    .build(),
            )
            .build();

        assert_eq!(record.get_control_field("001"), Some("12345"));
        assert_eq!(record["245"].get_subfield('a'), Some("Test Title"));
    }

    #[test]
    fn test_field_subfields_by_code_iterator() {
        let mut field = Field::new("650".to_string(), ' ', '0');
        field.add_subfield_str('a', "Primary Subject");
        field.add_subfield_str('x', "Subdivision 1");
        field.add_subfield_str('x', "Subdivision 2");

        let x_values: Vec<&str> = field.subfields_by_code('x').collect();
        assert_eq!(x_values, vec!["Subdivision 1", "Subdivision 2"]);
    }

    #[test]
    fn test_record_index_field_by_tag() {
        let mut record = Record::new(Leader::default());
        let mut field = Field::new("245".to_string(), '1', '0');
        field.add_subfield_str('a', "Test Title");
        record.add_field(field);

        let indexed_field = &record["245"];
        assert_eq!(indexed_field.tag, "245");
        assert_eq!(&record["245"]['a'], "Test Title");
    }

    #[test]
    #[should_panic(expected = "field not found")]
    fn test_record_index_missing_field() {
        let record = Record::new(Leader::default());
        let _ = &record["999"];
    }

    #[test]
    #[should_panic(expected = "subfield not found")]
    fn test_field_index_missing_subfield() {
        let field = Field::new("245".to_string(), '1', '0');
        let _ = &field['a'];
    }

    #[test]
    fn test_field_insertion_order_preserved() {
        let mut record = Record::new(Leader::default());

        record.add_field(Field::new("650".to_string(), ' ', '0'));
        record.add_field(Field::new("245".to_string(), '1', '0'));
        record.add_field(Field::new("650".to_string(), ' ', '1'));

        let tags: Vec<&str> = record.fields().map(|f| f.tag.as_str()).collect();

        assert_eq!(tags, vec!["650", "650", "245"]);
    }

    #[test]
    fn test_control_field_insertion_order_preserved() {
        let mut record = Record::new(Leader::default());

        record.add_control_field_str("008", "Fixed length data");
        record.add_control_field_str("001", "Control number");
        record.add_control_field_str("005", "Date time");

        let tags: Vec<&str> = record.control_fields_iter().map(|(tag, _)| tag).collect();

        assert_eq!(tags, vec!["008", "001", "005"]);
    }
}
