//! Format determination from a record's structural fields.
//!
//! [`FormatCalculator::determine`] derives an ordered set of [`FormatTag`]s
//! from the leader, the 007/008 fixed fields, and the RDA 336/338 fields.
//! Stages run in strict precedence order and only ever add tags:
//!
//! 1. Record-type-independent special cases (government document, thesis,
//!    electronic resource, conference proceeding)
//! 2. RDA content types (336, source `rdacontent`)
//! 3. Physical description fixed fields (007, repeatable)
//! 4. Leader record type (byte 6), guarded by the layered not-a-book rules
//! 5. Leader bibliographic level (byte 7)
//! 6. A pure fallback when everything else came up empty
//!
//! The calculator is pure and total: a record with no usable evidence still
//! yields `{Unknown}`.
//!
//! # Examples
//!
//! ```
//! use marc_facets::{FormatCalculator, Leader, Record};
//!
//! let record = Record::new(Leader::default());
//! let formats = FormatCalculator::new().determine(&record);
//! assert_eq!(formats.as_strings(), vec!["Book"]);
//! ```

use crate::format_tag::{FormatSet, FormatTag};
use crate::record::Record;
use smallvec::SmallVec;

/// A layered override consulted before the built-in not-a-book rules.
///
/// Rules are evaluated in insertion order; the first rule whose predicate
/// matches decides, skipping both the remaining rules and the built-in
/// table. This replaces subclass method overriding with plain data.
#[derive(Debug, Clone)]
pub struct NotBookRule {
    /// Label for rule listings and debug output.
    pub name: &'static str,
    /// Predicate over (record type, 008 control field).
    pub predicate: fn(char, Option<&str>) -> bool,
    /// Verdict when the predicate matches: true means never a book.
    pub not_book: bool,
}

/// Derives format tags for bibliographic records.
///
/// [`FormatCalculator::new`] installs the local policy layer (notated music
/// is never a book); [`FormatCalculator::base`] gives the stock rules only.
#[derive(Debug, Clone)]
pub struct FormatCalculator {
    not_book_overrides: Vec<NotBookRule>,
}

impl Default for FormatCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatCalculator {
    /// Calculator with the local policy layers installed.
    ///
    /// One override ships by default: records with type `c` (notated music)
    /// never classify as books, so a score with a monographic bib level gets
    /// `MusicalScore` without a trailing `Book`.
    #[must_use]
    pub fn new() -> Self {
        FormatCalculator {
            not_book_overrides: vec![NotBookRule {
                name: "notated-music",
                predicate: |record_type, _| record_type == 'c',
                not_book: true,
            }],
        }
    }

    /// Calculator with only the built-in rules, no override layers.
    #[must_use]
    pub fn base() -> Self {
        FormatCalculator {
            not_book_overrides: Vec::new(),
        }
    }

    /// Append an override layer; earlier layers win.
    #[must_use]
    pub fn with_not_book_rule(mut self, rule: NotBookRule) -> Self {
        self.not_book_overrides.push(rule);
        self
    }

    /// Determine the format tags for a record.
    ///
    /// Later stages only fill gaps; nothing removes a tag added earlier, so
    /// the emitted order follows stage order.
    #[must_use]
    pub fn determine(&self, record: &Record) -> FormatSet {
        let mut formats = FormatSet::new();

        let record_type = record.leader.record_type.to_ascii_lowercase();
        let bib_level = record.leader.bibliographic_level.to_ascii_lowercase();
        let marc_008 = record.get_control_field("008");

        // This record could be a book... until we prove otherwise.
        let mut could_be_book = true;

        if Self::is_government_document(record) {
            formats.insert(FormatTag::GovernmentDocument);
        }
        if Self::is_thesis(record) {
            formats.insert(FormatTag::Thesis);
        }
        if Self::is_electronic(record) {
            formats.insert(FormatTag::Electronic);
        }
        if Self::is_conference_proceeding(record) {
            formats.insert(FormatTag::ConferenceProceeding);
        }

        // RDA content types are the most reliable evidence when present.
        let formats_from_33x = Self::formats_from_33x(record);
        if !formats_from_33x.is_empty() {
            could_be_book = false;
            formats.extend(formats_from_33x.iter().copied());
        }

        // 007 is repeatable, one value per physical carrier.
        let mut codes_007: SmallVec<[char; 4]> = SmallVec::new();
        for raw in record.control_fields_by_tag("007") {
            let value = raw.to_lowercase();
            let code = char_at(&value, 0);
            codes_007.push(code);
            if Self::definitely_not_book_from_007(code) {
                could_be_book = false;
            }
            if code == 'v' {
                // Every video carrier gets the base tag; the decode below
                // adds the specific one.
                formats.insert(FormatTag::Video);
            }
            if let Some(tag) = Self::format_from_007(code, &value) {
                formats.insert(tag);
            }
        }

        if self.definitely_not_book(record_type, marc_008) {
            could_be_book = false;
        }
        // The record type stage yields to non-empty RDA content evidence.
        if formats_from_33x.is_empty() {
            if let Some(tag) = Self::format_from_record_type(record_type, bib_level, marc_008) {
                formats.insert(tag);
            }
        }

        if let Some(tag) = Self::format_from_bib_level(
            record,
            record_type,
            bib_level,
            marc_008,
            could_be_book,
            &codes_007,
        ) {
            formats.insert(tag);
        }

        if formats.is_empty() {
            formats.insert(Self::fallback_format(record_type, bib_level));
        }

        formats
    }

    // ========================================================================
    // Special cases independent of record type
    // ========================================================================

    fn is_government_document(record: &Record) -> bool {
        record.has_field("086")
    }

    fn is_thesis(record: &Record) -> bool {
        record.has_field("502")
    }

    fn is_conference_proceeding(record: &Record) -> bool {
        record.has_field("111") || record.has_field("711")
    }

    fn is_electronic(record: &Record) -> bool {
        record
            .get_field("245")
            .and_then(|field| field.get_subfield('h'))
            .is_some_and(|medium| medium.to_lowercase().contains("[electronic resource]"))
    }

    fn has_serial_host(record: &Record) -> bool {
        record
            .fields_by_tag("773")
            .any(|field| field.get_subfield('q').is_some())
    }

    // ========================================================================
    // RDA 336/338 evidence
    // ========================================================================

    /// Collect format tags from 336 content types under source `rdacontent`.
    ///
    /// A "computer program" content type empties the whole pass, deferring
    /// to the record type rules; tags added by other stages are unaffected.
    fn formats_from_33x(record: &Record) -> Vec<FormatTag> {
        let is_online = Self::is_online_according_to_338(record);
        let mut formats = Vec::new();

        for field in record.fields_by_tag("336") {
            let source_ok = field
                .get_subfield('2')
                .is_some_and(|source| source.trim().eq_ignore_ascii_case("rdacontent"));
            if !source_ok {
                continue;
            }
            for value in field.get_subfields(&['a', 'b']) {
                match value.trim().to_lowercase().as_str() {
                    "two-dimensional moving image" | "tdi" => {
                        formats.push(FormatTag::Video);
                        if is_online {
                            formats.push(FormatTag::VideoOnline);
                        }
                    }
                    "computer dataset" | "cod" => formats.push(FormatTag::DataSet),
                    "computer program" | "cop" => return Vec::new(),
                    _ => {}
                }
            }
        }

        formats
    }

    /// True when a 338 carrier under source `rdacarrier` marks the record
    /// as an online resource.
    fn is_online_according_to_338(record: &Record) -> bool {
        for field in record.fields_by_tag("338") {
            let source_ok = field
                .get_subfield('2')
                .is_some_and(|source| source.trim().eq_ignore_ascii_case("rdacarrier"));
            if !source_ok {
                continue;
            }
            for value in field.get_subfields(&['a', 'b']) {
                let value = value.trim().to_lowercase();
                if value == "online resource" || value == "cr" {
                    return true;
                }
            }
        }
        false
    }

    // ========================================================================
    // 007 physical description decode
    // ========================================================================

    /// Carrier categories that rule out a book.
    fn definitely_not_book_from_007(code: char) -> bool {
        matches!(code, 'g' | 'k' | 'm' | 'v')
    }

    /// Decode one lowercased 007 value into a specific carrier tag.
    ///
    /// The category code sits at offset 0, the specific material designation
    /// at offset 1; sound discs and videodiscs refine further on fixed
    /// offsets (speed at 3, videorecording format at 4).
    fn format_from_007(code: char, value: &str) -> Option<FormatTag> {
        let designation = char_at(value, 1);
        let tag = match code {
            'a' => {
                if designation == 'd' {
                    FormatTag::Atlas
                } else {
                    FormatTag::Map
                }
            }
            'c' => match designation {
                'a' => FormatTag::TapeCartridge,
                'b' => FormatTag::ChipCartridge,
                'c' => FormatTag::DiscCartridge,
                'f' => FormatTag::TapeCassette,
                'h' => FormatTag::TapeReel,
                'j' => FormatTag::FloppyDisk,
                'm' | 'o' => FormatTag::CdRom,
                // 'cr' is a remote resource; online-ness is decided at the
                // bib level stage, not here.
                'r' => return None,
                _ => FormatTag::Software,
            },
            'd' => FormatTag::Globe,
            'f' => FormatTag::Braille,
            'g' => match designation {
                'c' | 'd' | 'f' | 'o' => FormatTag::Filmstrip,
                't' => FormatTag::Transparency,
                _ => FormatTag::Slide,
            },
            'h' => FormatTag::Microfilm,
            'k' => match designation {
                'c' => FormatTag::Collage,
                'd' | 'l' => FormatTag::Drawing,
                'e' => FormatTag::Painting,
                'f' | 'j' | 's' => FormatTag::Print,
                'g' => FormatTag::Photonegative,
                'k' => FormatTag::Poster,
                'n' => FormatTag::Chart,
                'o' => FormatTag::FlashCard,
                'p' => FormatTag::PostCard,
                _ => FormatTag::Photo,
            },
            'm' => match designation {
                'f' => FormatTag::VideoCassette,
                'r' => FormatTag::Filmstrip,
                _ => FormatTag::MotionPicture,
            },
            'o' => FormatTag::Kit,
            'q' => FormatTag::MusicalScore,
            'r' => FormatTag::SensorImage,
            's' => match designation {
                'd' => match char_at(value, 3) {
                    // 78 rpm
                    'd' => FormatTag::ShellacRecord,
                    'a' | 'b' | 'c' | 'e' => FormatTag::VinylRecord,
                    _ => FormatTag::SoundDisc,
                },
                's' => FormatTag::SoundCassette,
                _ => FormatTag::SoundRecording,
            },
            'v' => match designation {
                'c' => FormatTag::VideoCartridge,
                'd' => match char_at(value, 4) {
                    's' => FormatTag::BrDisc,
                    'g' => FormatTag::LaserDisc,
                    _ => FormatTag::VideoDisc,
                },
                'f' => FormatTag::VideoCassette,
                'r' => FormatTag::VideoReel,
                _ => FormatTag::VideoOnline,
            },
            _ => return None,
        };
        Some(tag)
    }

    // ========================================================================
    // Leader record type (byte 6)
    // ========================================================================

    /// Consult the override layers, then the built-in table.
    fn definitely_not_book(&self, record_type: char, marc_008: Option<&str>) -> bool {
        for rule in &self.not_book_overrides {
            if (rule.predicate)(record_type, marc_008) {
                return rule.not_book;
            }
        }
        Self::built_in_not_book(record_type, marc_008)
    }

    fn built_in_not_book(record_type: char, marc_008: Option<&str>) -> bool {
        match record_type {
            // Computer files only when 008/26 marks a numeric dataset
            'm' => fixed_field_char(marc_008, 26) == 'a',
            'e' | 'f' | 'g' | 'j' => true,
            _ => false,
        }
    }

    fn format_from_record_type(
        record_type: char,
        bib_level: char,
        marc_008: Option<&str>,
    ) -> Option<FormatTag> {
        let tag = match record_type {
            'c' | 'd' => FormatTag::MusicalScore,
            'e' | 'f' => FormatTag::Map,
            'g' => FormatTag::ProjectedMedium,
            'i' => FormatTag::SoundRecording,
            'j' => FormatTag::MusicRecording,
            'k' => FormatTag::Photo,
            // 008/26 names the type of computer file; plain computer files
            // fall through to the bib level stage.
            'm' => match fixed_field_char(marc_008, 26) {
                'a' => FormatTag::DataSet,
                'b' => FormatTag::Software,
                'f' => FormatTag::Font,
                'g' => FormatTag::VideoGame,
                _ => return None,
            },
            'o' => FormatTag::Kit,
            'p' => return (bib_level == 'c').then_some(FormatTag::Collection),
            'r' => FormatTag::PhysicalObject,
            't' => FormatTag::Manuscript,
            _ => return None,
        };
        Some(tag)
    }

    // ========================================================================
    // Leader bibliographic level (byte 7)
    // ========================================================================

    fn format_from_bib_level(
        record: &Record,
        record_type: char,
        bib_level: char,
        marc_008: Option<&str>,
        could_be_book: bool,
        codes_007: &[char],
    ) -> Option<FormatTag> {
        let tag = match bib_level {
            // Monographic component part
            'a' => {
                if Self::has_serial_host(record) {
                    FormatTag::Article
                } else {
                    FormatTag::BookComponentPart
                }
            }
            'b' => FormatTag::SerialComponentPart,
            // Integrating resources: language material with an electronic
            // carrier is online; 008/21 separates web sites from databases.
            'i' => {
                if record_type == 'a' && codes_007.contains(&'c') {
                    match fixed_field_char(marc_008, 21) {
                        'h' | 'w' => FormatTag::Website,
                        _ => FormatTag::OnlineIntegratingResource,
                    }
                } else {
                    FormatTag::PhysicalIntegratingResource
                }
            }
            'm' => {
                if could_be_book {
                    if codes_007.contains(&'c') || record_type == 'm' {
                        FormatTag::EBook
                    } else {
                        FormatTag::Book
                    }
                } else {
                    return None;
                }
            }
            // 008/21 names the type of continuing resource
            's' => match fixed_field_char(marc_008, 21) {
                'n' => FormatTag::Newspaper,
                'p' => FormatTag::Journal,
                _ => FormatTag::Serial,
            },
            _ => return None,
        };
        Some(tag)
    }

    // ========================================================================
    // Fallback
    // ========================================================================

    /// Value of last resort, applied only when every other stage came up
    /// empty. Pure function of the two leader bytes.
    fn fallback_format(record_type: char, bib_level: char) -> FormatTag {
        match bib_level {
            'c' | 'd' => FormatTag::Collection,
            _ if record_type == 'a' => FormatTag::Text,
            _ => FormatTag::Unknown,
        }
    }
}

/// Character at a fixed offset, space when the value is too short.
fn char_at(value: &str, index: usize) -> char {
    value.chars().nth(index).unwrap_or(' ')
}

/// Character at a fixed offset of an optional fixed field.
fn fixed_field_char(value: Option<&str>, index: usize) -> char {
    value.map_or(' ', |v| char_at(v, index))
}
