//! Material-type facet paths for hierarchical search navigation.
//!
//! [`MaterialTypeClassifier::classify`] maps a record's format tags plus its
//! raw RDA content/media/carrier values (336/337/338 `$a`) and electronic
//! location link text (856 `$y`) onto fixed facet-path strings such as
//! `1/At the Libraries/Print Book/`. Paths nest by a leading depth digit;
//! after the leaf rules run, the matching top-level parents (`0/...`) are
//! appended so the nested facet hierarchy stays navigable.
//!
//! Leaf rules are declared in a fixed table and evaluated in declaration
//! order; each appends its path at most once. The emitted strings are a
//! persisted contract and must not drift.
//!
//! # Examples
//!
//! ```
//! use marc_facets::{FormatCalculator, Leader, MaterialTypeClassifier, Record};
//!
//! let record = Record::new(Leader::default());
//! let formats = FormatCalculator::new().determine(&record);
//! let paths = MaterialTypeClassifier::new().classify(&record, &formats);
//!
//! assert_eq!(paths[0], "1/At the Libraries/Print Book/");
//! assert_eq!(paths[1], "0/At the Libraries/");
//! ```

use crate::format_tag::{FormatSet, FormatTag};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level parent path for physically held materials.
pub const AT_THE_LIBRARIES: &str = "0/At the Libraries/";

/// Top-level parent path for online materials.
pub const AVAILABLE_ONLINE: &str = "0/Available Online/";

// ============================================================================
// FacetPath
// ============================================================================

/// One slash-delimited facet path: a depth digit, then the segments, with a
/// trailing slash (`1/At the Libraries/Print Book/`).
///
/// The wrapped string is emitted bit-exactly; serde serializes it
/// transparently as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetPath(String);

impl FacetPath {
    /// Wrap a path string.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        FacetPath(path.into())
    }

    /// The raw path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading depth digit, when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_facets::FacetPath;
    ///
    /// assert_eq!(FacetPath::new("1/At the Libraries/Microfilm/").depth(), Some(1));
    /// assert_eq!(FacetPath::new("At the Libraries").depth(), None);
    /// ```
    #[must_use]
    pub fn depth(&self) -> Option<u8> {
        self.0.split('/').next()?.parse().ok()
    }
}

impl fmt::Display for FacetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FacetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FacetPath {
    fn from(path: &str) -> Self {
        FacetPath::new(path)
    }
}

impl From<String> for FacetPath {
    fn from(path: String) -> Self {
        FacetPath(path)
    }
}

impl PartialEq<&str> for FacetPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<FacetPath> for &str {
    fn eq(&self, other: &FacetPath) -> bool {
        *self == other.0
    }
}

// ============================================================================
// Format groups shared by the leaf rules
// ============================================================================

const PHYSICAL_VIDEO_FORMATS: &[FormatTag] = &[
    FormatTag::VideoReel,
    FormatTag::VideoCartridge,
    FormatTag::VideoCassette,
    FormatTag::VideoDisc,
    FormatTag::Filmstrip,
    FormatTag::BrDisc,
    FormatTag::LaserDisc,
    FormatTag::MotionPicture,
];

const PHYSICAL_MAP_FORMATS: &[FormatTag] = &[FormatTag::Atlas, FormatTag::Map, FormatTag::Globe];

const ELECTRONIC_MAP_FORMATS: &[FormatTag] = &[FormatTag::Atlas, FormatTag::Map];

const PHYSICAL_COMPUTER_MEDIA_FORMATS: &[FormatTag] = &[
    FormatTag::DataSet,
    FormatTag::ElectronicResource,
    FormatTag::Software,
    FormatTag::VideoGame,
    FormatTag::CdRom,
    FormatTag::FloppyDisk,
    FormatTag::TapeCartridge,
    FormatTag::TapeCassette,
    FormatTag::TapeReel,
];

const JOURNAL_FORMATS: &[FormatTag] = &[
    FormatTag::Serial,
    FormatTag::Article,
    FormatTag::SerialComponentPart,
    FormatTag::Journal,
    FormatTag::Newspaper,
];

const PHYSICAL_MATERIAL_FORMATS: &[FormatTag] = &[
    FormatTag::PhysicalIntegratingResource,
    FormatTag::ProjectedMedium,
    FormatTag::Slide,
    FormatTag::Transparency,
    FormatTag::MusicalScore,
    FormatTag::SensorImage,
    FormatTag::PostCard,
    FormatTag::Poster,
    FormatTag::PhysicalObject,
    FormatTag::FlashCard,
    FormatTag::Chart,
    FormatTag::Drawing,
    FormatTag::Print,
    FormatTag::Painting,
    FormatTag::Photo,
    FormatTag::Photonegative,
    FormatTag::Collage,
];

const ELECTRONIC_MATERIAL_FORMATS: &[FormatTag] = &[
    FormatTag::DataSet,
    FormatTag::PhysicalIntegratingResource,
    FormatTag::MusicalScore,
    FormatTag::SensorImage,
    FormatTag::PostCard,
    FormatTag::Poster,
    FormatTag::Font,
    FormatTag::FlashCard,
    FormatTag::Chart,
    FormatTag::Drawing,
    FormatTag::Print,
    FormatTag::Painting,
    FormatTag::Photo,
    FormatTag::Photonegative,
    FormatTag::Collage,
];

// ============================================================================
// Leaf rules
// ============================================================================

/// Evidence one record presents to the leaf rules. Content, media, carrier,
/// and link text values arrive lowercased.
#[derive(Debug)]
struct RuleInput<'a> {
    formats: &'a FormatSet,
    content_types: &'a [String],
    media_types: &'a [String],
    carrier_types: &'a [String],
    link_text: &'a [String],
}

impl RuleInput<'_> {
    fn has(&self, tag: FormatTag) -> bool {
        self.formats.contains(tag)
    }

    fn has_any(&self, group: &[FormatTag]) -> bool {
        self.formats.contains_any(group)
    }

    fn content(&self, term: &str) -> bool {
        self.content_types.iter().any(|value| value == term)
    }

    fn media(&self, term: &str) -> bool {
        self.media_types.iter().any(|value| value == term)
    }

    fn carrier(&self, term: &str) -> bool {
        self.carrier_types.iter().any(|value| value == term)
    }

    fn link_text_contains(&self, needle: &str) -> bool {
        self.link_text.iter().any(|value| value.contains(needle))
    }
}

struct LeafRule {
    path: &'static str,
    applies: fn(&RuleInput) -> bool,
}

impl fmt::Debug for LeafRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafRule").field("path", &self.path).finish()
    }
}

/// Declaration order is emission order.
static LEAF_RULES: &[LeafRule] = &[
    LeafRule {
        path: "1/At the Libraries/Print Book/",
        applies: |input| {
            (input.has(FormatTag::Atlas) && !input.has(FormatTag::Electronic))
                || (input.has(FormatTag::Book) && !input.has(FormatTag::Electronic))
                || (input.content("text")
                    && input.media("unmediated")
                    && input.carrier("volume"))
        },
    },
    LeafRule {
        path: "1/Available Online/Electronic Book/",
        applies: |input| {
            input.has(FormatTag::EBook)
                || (input.has(FormatTag::Atlas) && input.has(FormatTag::Electronic))
                || (input.has(FormatTag::Book) && input.has(FormatTag::Electronic))
                || (input.has(FormatTag::BookComponentPart) && input.has(FormatTag::Electronic))
        },
    },
    LeafRule {
        path: "1/At the Libraries/Physical Video (DVD, Blu-ray, etc.)/",
        applies: |input| {
            input.has_any(PHYSICAL_VIDEO_FORMATS)
                || (input.content("two-dimensional moving image")
                    && input.media("video")
                    && (input.carrier("videodisc") || input.carrier("computer disc")))
        },
    },
    // Link text is scanned because a fair number of streaming video records
    // carry no usable fixed fields, only an 856 with vendor boilerplate.
    LeafRule {
        path: "1/Available Online/Streaming Video/",
        applies: |input| {
            input.has(FormatTag::VideoOnline)
                || (input.has(FormatTag::Electronic) && input.has(FormatTag::Slide))
                || input.link_text_contains("streaming video")
                || (input.content("two-dimensional moving image")
                    && input.media("computer")
                    && input.carrier("online resource"))
        },
    },
    LeafRule {
        path: "1/At the Libraries/Physical Music (CD, etc.)/",
        applies: |input| {
            input.has(FormatTag::MusicRecording)
                || (input.content("performed music")
                    && input.media("audio")
                    && input.carrier("audio disc"))
        },
    },
    LeafRule {
        path: "1/Available Online/Streaming Music/",
        applies: |input| {
            input.content("performed music")
                && input.media("computer")
                && input.carrier("online resource")
        },
    },
    LeafRule {
        path: "1/At the Libraries/Physical Non-Musical Audio (audiobook)/",
        applies: |input| {
            input.has(FormatTag::SoundRecording)
                || (input.content("spoken word")
                    && input.media("audio")
                    && input.carrier("audio disc"))
        },
    },
    LeafRule {
        path: "1/Available Online/Streaming Non-Musical Audio/",
        applies: |input| {
            input.content("spoken word")
                && input.media("computer")
                && input.carrier("online resource")
        },
    },
    LeafRule {
        path: "1/At the Libraries/Physical Map/",
        applies: |input| {
            input.has_any(PHYSICAL_MAP_FORMATS) && !input.has(FormatTag::Electronic)
        },
    },
    LeafRule {
        path: "1/Available Online/Electronic Map/",
        applies: |input| {
            input.has_any(ELECTRONIC_MAP_FORMATS) && input.has(FormatTag::Electronic)
        },
    },
    LeafRule {
        path: "1/At the Libraries/Microfilm/",
        applies: |input| input.has(FormatTag::Microfilm),
    },
    LeafRule {
        path: "1/At the Libraries/Physical Computer Media (CDROM, etc.)/",
        applies: |input| {
            input.has_any(PHYSICAL_COMPUTER_MEDIA_FORMATS)
                || (input.has(FormatTag::DataSet) && !input.has(FormatTag::Electronic))
        },
    },
    LeafRule {
        path: "1/Available Online/Electronic Journals and Newspapers/",
        applies: |input| {
            input.has_any(JOURNAL_FORMATS) && input.has(FormatTag::Electronic)
        },
    },
    LeafRule {
        path: "1/At the Libraries/Print Journals and Newspapers/",
        applies: |input| {
            input.has_any(JOURNAL_FORMATS) && !input.has(FormatTag::Electronic)
        },
    },
    LeafRule {
        path: "1/At the Libraries/Physical Materials (Other)/",
        applies: |input| {
            input.has_any(PHYSICAL_MATERIAL_FORMATS) && !input.has(FormatTag::Electronic)
        },
    },
    LeafRule {
        path: "1/Available Online/Electronic Materials (Other)/",
        applies: |input| {
            (input.has_any(ELECTRONIC_MATERIAL_FORMATS) && input.has(FormatTag::Electronic))
                || input.has(FormatTag::Website)
                || input.has(FormatTag::OnlineIntegratingResource)
        },
    },
];

// ============================================================================
// MaterialTypeClassifier
// ============================================================================

/// Maps format tags and RDA field values onto hierarchical facet paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialTypeClassifier;

impl MaterialTypeClassifier {
    /// Classifier with the standard rule table.
    #[must_use]
    pub fn new() -> Self {
        MaterialTypeClassifier
    }

    /// Facet paths for one record, leaves first, parents last.
    ///
    /// A record can legitimately land in several leaves (an electronic
    /// dataset is both physical computer media and an electronic material);
    /// every emitted leaf contributes its top-level parent exactly once.
    /// Records without matching evidence yield an empty list.
    #[must_use]
    pub fn classify(&self, record: &Record, formats: &FormatSet) -> Vec<FacetPath> {
        let content_types = lowercased_subfield_values(record, "336", 'a');
        let media_types = lowercased_subfield_values(record, "337", 'a');
        let carrier_types = lowercased_subfield_values(record, "338", 'a');
        let link_text = lowercased_subfield_values(record, "856", 'y');

        let input = RuleInput {
            formats,
            content_types: &content_types,
            media_types: &media_types,
            carrier_types: &carrier_types,
            link_text: &link_text,
        };

        let mut paths: Vec<FacetPath> = LEAF_RULES
            .iter()
            .filter(|rule| (rule.applies)(&input))
            .map(|rule| FacetPath::new(rule.path))
            .collect();

        // Top-level parents keep the nested facet navigable.
        let lowercased: Vec<String> = paths.iter().map(|p| p.as_str().to_lowercase()).collect();
        if lowercased.iter().any(|p| p.contains("/at the libraries/")) {
            paths.push(FacetPath::new(AT_THE_LIBRARIES));
        }
        if lowercased.iter().any(|p| p.contains("/available online/")) {
            paths.push(FacetPath::new(AVAILABLE_ONLINE));
        }

        paths
    }
}

fn lowercased_subfield_values(record: &Record, tag: &str, code: char) -> Vec<String> {
    record
        .subfield_values(tag, code)
        .into_iter()
        .map(str::to_lowercase)
        .collect()
}
