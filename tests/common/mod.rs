//! Common test helpers and record constructors shared across the test suite.

use marc_facets::{Field, Leader, Record};

/// Creates a default leader for test records: language material, monograph.
pub fn create_test_leader() -> Leader {
    Leader {
        record_type: 'a',
        bibliographic_level: 'm',
        ..Leader::default()
    }
}

/// Creates an empty record with the given leader type bytes.
pub fn record_with_types(record_type: char, bibliographic_level: char) -> Record {
    Record::new(Leader {
        record_type,
        bibliographic_level,
        ..Leader::default()
    })
}

/// Creates a plain print book record with a title and an LC call number.
pub fn book_record() -> Record {
    let mut record = Record::new(create_test_leader());
    record.add_control_field_str("001", "991234567890");

    let mut field_245 = Field::new("245".to_string(), '1', '0');
    field_245.add_subfield_str('a', "The annotated Turing :");
    field_245.add_subfield_str(
        'b',
        "a guided tour through Alan Turing's historic paper /",
    );
    record.add_field(field_245);

    let mut field_050 = Field::new("050".to_string(), '0', '0');
    field_050.add_subfield_str('a', "QA267");
    field_050.add_subfield_str('b', ".P48 2008");
    record.add_field(field_050);

    record
}

/// Creates a DVD record: leader type `g`, an 007 videodisc, a holdings
/// call number.
pub fn dvd_record() -> Record {
    let mut record = record_with_types('g', 'm');
    record.add_control_field_str("007", "vd cvaizu");

    let mut field_245 = Field::new("245".to_string(), '0', '0');
    field_245.add_subfield_str('a', "Seven samurai");
    field_245.add_subfield_str('h', "[videorecording] /");
    record.add_field(field_245);

    let mut field_952 = Field::new("952".to_string(), ' ', ' ');
    field_952.add_subfield_str('e', "PN1997 .S513 2006");
    record.add_field(field_952);

    record
}

/// Creates an audiobook on CD: nonmusical sound leader plus a sound disc 007.
pub fn audiobook_record() -> Record {
    let mut record = record_with_types('i', 'm');
    record.add_control_field_str("007", "sd fsngnnmmned");

    let mut field_245 = Field::new("245".to_string(), '1', '0');
    field_245.add_subfield_str('a', "Born a crime");
    field_245.add_subfield_str('h', "[sound recording] /");
    record.add_field(field_245);

    record
}

/// Creates an electronic journal: serial bib level, 008/21 `p`, and the
/// `[electronic resource]` general material designation.
pub fn electronic_journal_record() -> Record {
    let mut record = record_with_types('a', 's');
    record.add_control_field_str("008", "200101c20209999mdumr p       0    0eng d");

    let mut field_245 = Field::new("245".to_string(), '0', '0');
    field_245.add_subfield_str('a', "Journal of open source software");
    field_245.add_subfield_str('h', "[electronic resource].");
    record.add_field(field_245);

    record
}

/// Creates an RDA streaming video record: 336/337/338 triplet plus an 856
/// with vendor link text.
pub fn streaming_video_record() -> Record {
    let mut record = record_with_types('g', 'm');
    record.add_field(rda_field("336", "two-dimensional moving image", "rdacontent"));
    record.add_field(rda_field("337", "computer", "rdamedia"));
    record.add_field(rda_field("338", "online resource", "rdacarrier"));

    let mut field_856 = Field::new("856".to_string(), '4', '0');
    field_856.add_subfield_str('u', "https://example.com/watch/42");
    field_856.add_subfield_str('y', "Streaming video (Films on Demand)");
    record.add_field(field_856);

    record
}

/// Creates an RDA field with `$a` content and a `$2` vocabulary source.
pub fn rda_field(tag: &str, value: &str, source: &str) -> Field {
    Field::builder(tag.to_string(), ' ', ' ')
        .subfield_str('a', value)
        .subfield_str('2', source)
        .build()
}

/// Creates a 952 holdings field with an item call number in `$e`.
pub fn holdings_field(call_number: &str) -> Field {
    Field::builder("952".to_string(), ' ', ' ')
        .subfield_str('e', call_number)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_leader_valid() {
        let leader = create_test_leader();
        assert_eq!(leader.record_type, 'a');
        assert_eq!(leader.bibliographic_level, 'm');
        assert_eq!(leader.indicator_count, 2);
    }

    #[test]
    fn test_book_record_has_expected_fields() {
        let record = book_record();
        assert!(record.has_field("245"));
        assert!(record.has_field("050"));
        assert_eq!(record.get_control_field("001"), Some("991234567890"));
    }

    #[test]
    fn test_dvd_record_shape() {
        let record = dvd_record();
        assert_eq!(record.leader.record_type, 'g');
        assert_eq!(record.get_control_field("007"), Some("vd cvaizu"));
    }

    #[test]
    fn test_audiobook_record_shape() {
        let record = audiobook_record();
        assert_eq!(record.leader.record_type, 'i');
        assert!(record.get_control_field("007").is_some());
    }

    #[test]
    fn test_electronic_journal_record_shape() {
        let record = electronic_journal_record();
        assert_eq!(record.leader.bibliographic_level, 's');
        let marc_008 = record.get_control_field("008").unwrap();
        assert_eq!(marc_008.chars().nth(21), Some('p'));
    }

    #[test]
    fn test_streaming_video_record_shape() {
        let record = streaming_video_record();
        assert!(record.has_field("336"));
        assert!(record.has_field("856"));
    }

    #[test]
    fn test_field_constructors() {
        let field = rda_field("338", "volume", "rdacarrier");
        assert_eq!(field.get_subfield('a'), Some("volume"));
        assert_eq!(field.get_subfield('2'), Some("rdacarrier"));

        let field = holdings_field("QA76.73");
        assert_eq!(field.get_subfield('e'), Some("QA76.73"));
    }

    #[test]
    fn test_record_with_types() {
        let record = record_with_types('c', 's');
        assert_eq!(record.leader.record_type, 'c');
        assert_eq!(record.leader.bibliographic_level, 's');
    }
}
