//! Format tag vocabulary and format sets.
//!
//! [`FormatTag`] enumerates every format identifier the determination engine
//! can emit, with [`FormatTag::as_str`] giving the exact persisted string.
//! [`FormatSet`] collects tags per record: insertion order preserved,
//! duplicates suppressed, cheap membership tests.
//!
//! # Examples
//!
//! ```
//! use marc_facets::{FormatSet, FormatTag};
//!
//! let mut formats = FormatSet::new();
//! formats.insert(FormatTag::Electronic);
//! formats.insert(FormatTag::EBook);
//! formats.insert(FormatTag::Electronic);
//!
//! assert_eq!(formats.len(), 2);
//! assert_eq!(formats.as_strings(), vec!["Electronic", "eBook"]);
//! ```

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A format identifier derived from a record's structural fields.
///
/// The `as_str` form of each tag is a persisted identifier consumed by
/// downstream search indexes; spellings are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatTag {
    // Books and text
    /// Printed or otherwise physical book
    Book,
    /// Electronic book
    #[serde(rename = "eBook")]
    EBook,
    /// Component part of a book (chapter, essay)
    BookComponentPart,
    /// Plain language material with no more specific format
    Text,
    /// Manuscript language material
    Manuscript,
    /// Braille carrier
    Braille,

    // Serials
    /// Continuing resource with no more specific type
    Serial,
    /// Periodical
    Journal,
    /// Newspaper
    Newspaper,
    /// Component part of a serial with a known host
    Article,
    /// Component part of a serial
    SerialComponentPart,

    // Integrating resources
    /// Physical integrating resource (loose-leaf binder)
    PhysicalIntegratingResource,
    /// Online integrating resource (database)
    OnlineIntegratingResource,
    /// Updating web site or blog
    Website,

    // Cartographic
    /// Map
    Map,
    /// Atlas
    Atlas,
    /// Globe
    Globe,

    // Audio
    /// Nonmusical sound recording
    SoundRecording,
    /// Musical sound recording
    MusicRecording,
    /// Sound disc with unspecified groove or speed
    SoundDisc,
    /// Sound cassette
    SoundCassette,
    /// Vinyl sound disc
    VinylRecord,
    /// 78 rpm shellac disc
    ShellacRecord,

    // Video
    /// Moving-image content with no more specific carrier
    Video,
    /// Streaming or otherwise online video
    VideoOnline,
    /// Open reel videotape
    VideoReel,
    /// Videocartridge
    VideoCartridge,
    /// Videocassette (VHS and kin)
    VideoCassette,
    /// Videodisc with unspecified format
    VideoDisc,
    /// Blu-ray disc
    #[serde(rename = "BRDisc")]
    BrDisc,
    /// Laserdisc
    LaserDisc,
    /// Motion picture film
    MotionPicture,
    /// Filmstrip
    Filmstrip,

    // Still images and other visual materials
    /// Projected medium with no more specific carrier
    ProjectedMedium,
    /// Slide
    Slide,
    /// Transparency
    Transparency,
    /// Photograph or other picture
    Photo,
    /// Photographic negative
    Photonegative,
    /// Print (engraving, lithograph, study print)
    Print,
    /// Painting
    Painting,
    /// Drawing (including technical drawings)
    Drawing,
    /// Collage
    Collage,
    /// Chart
    Chart,
    /// Flash card
    FlashCard,
    /// Postcard
    PostCard,
    /// Poster
    Poster,
    /// Remote-sensing image
    SensorImage,

    // Computer media
    /// Computer dataset
    DataSet,
    /// Computer program
    Software,
    /// Video game
    VideoGame,
    /// Computer font
    Font,
    /// Generic electronic resource (legacy vocabulary member)
    ElectronicResource,
    /// CD-ROM or other optical disc
    #[serde(rename = "CDROM")]
    CdRom,
    /// Floppy disk
    FloppyDisk,
    /// Computer tape cartridge
    TapeCartridge,
    /// Computer chip cartridge
    ChipCartridge,
    /// Computer disc cartridge
    DiscCartridge,
    /// Computer tape cassette
    TapeCassette,
    /// Computer tape reel
    TapeReel,

    // Microforms
    /// Microfilm or other microform
    Microfilm,

    // Notated music
    /// Musical score
    MusicalScore,

    // Record-wide flags from the special cases
    /// Record describes an electronic resource
    Electronic,
    /// Government document (086 present)
    GovernmentDocument,
    /// Thesis or dissertation (502 present)
    Thesis,
    /// Conference proceeding (111/711 present)
    ConferenceProceeding,

    // Everything else
    /// Kit of mixed components
    Kit,
    /// Collection-level record
    Collection,
    /// Three-dimensional artifact or realia
    PhysicalObject,
    /// No format could be determined
    Unknown,
}

impl FormatTag {
    /// The exact persisted identifier for this tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Book => "Book",
            FormatTag::EBook => "eBook",
            FormatTag::BookComponentPart => "BookComponentPart",
            FormatTag::Text => "Text",
            FormatTag::Manuscript => "Manuscript",
            FormatTag::Braille => "Braille",
            FormatTag::Serial => "Serial",
            FormatTag::Journal => "Journal",
            FormatTag::Newspaper => "Newspaper",
            FormatTag::Article => "Article",
            FormatTag::SerialComponentPart => "SerialComponentPart",
            FormatTag::PhysicalIntegratingResource => "PhysicalIntegratingResource",
            FormatTag::OnlineIntegratingResource => "OnlineIntegratingResource",
            FormatTag::Website => "Website",
            FormatTag::Map => "Map",
            FormatTag::Atlas => "Atlas",
            FormatTag::Globe => "Globe",
            FormatTag::SoundRecording => "SoundRecording",
            FormatTag::MusicRecording => "MusicRecording",
            FormatTag::SoundDisc => "SoundDisc",
            FormatTag::SoundCassette => "SoundCassette",
            FormatTag::VinylRecord => "VinylRecord",
            FormatTag::ShellacRecord => "ShellacRecord",
            FormatTag::Video => "Video",
            FormatTag::VideoOnline => "VideoOnline",
            FormatTag::VideoReel => "VideoReel",
            FormatTag::VideoCartridge => "VideoCartridge",
            FormatTag::VideoCassette => "VideoCassette",
            FormatTag::VideoDisc => "VideoDisc",
            FormatTag::BrDisc => "BRDisc",
            FormatTag::LaserDisc => "LaserDisc",
            FormatTag::MotionPicture => "MotionPicture",
            FormatTag::Filmstrip => "Filmstrip",
            FormatTag::ProjectedMedium => "ProjectedMedium",
            FormatTag::Slide => "Slide",
            FormatTag::Transparency => "Transparency",
            FormatTag::Photo => "Photo",
            FormatTag::Photonegative => "Photonegative",
            FormatTag::Print => "Print",
            FormatTag::Painting => "Painting",
            FormatTag::Drawing => "Drawing",
            FormatTag::Collage => "Collage",
            FormatTag::Chart => "Chart",
            FormatTag::FlashCard => "FlashCard",
            FormatTag::PostCard => "PostCard",
            FormatTag::Poster => "Poster",
            FormatTag::SensorImage => "SensorImage",
            FormatTag::DataSet => "DataSet",
            FormatTag::Software => "Software",
            FormatTag::VideoGame => "VideoGame",
            FormatTag::Font => "Font",
            FormatTag::ElectronicResource => "ElectronicResource",
            FormatTag::CdRom => "CDROM",
            FormatTag::FloppyDisk => "FloppyDisk",
            FormatTag::TapeCartridge => "TapeCartridge",
            FormatTag::ChipCartridge => "ChipCartridge",
            FormatTag::DiscCartridge => "DiscCartridge",
            FormatTag::TapeCassette => "TapeCassette",
            FormatTag::TapeReel => "TapeReel",
            FormatTag::Microfilm => "Microfilm",
            FormatTag::MusicalScore => "MusicalScore",
            FormatTag::Electronic => "Electronic",
            FormatTag::GovernmentDocument => "GovernmentDocument",
            FormatTag::Thesis => "Thesis",
            FormatTag::ConferenceProceeding => "ConferenceProceeding",
            FormatTag::Kit => "Kit",
            FormatTag::Collection => "Collection",
            FormatTag::PhysicalObject => "PhysicalObject",
            FormatTag::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The format tags accumulated for one record.
///
/// Backed by an `IndexSet`: membership tests are O(1), iteration follows
/// insertion order, and inserting a tag twice is a no-op. The emitted
/// sequence order is part of the output contract, so the determination
/// engine relies on insertion order surviving here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatSet {
    tags: IndexSet<FormatTag>,
}

impl FormatSet {
    /// Create an empty format set
    #[must_use]
    pub fn new() -> Self {
        FormatSet {
            tags: IndexSet::new(),
        }
    }

    /// Add a tag, keeping the first insertion position on repeats
    ///
    /// Returns true if the tag was not already present.
    pub fn insert(&mut self, tag: FormatTag) -> bool {
        self.tags.insert(tag)
    }

    /// Check whether a tag is present
    #[must_use]
    pub fn contains(&self, tag: FormatTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Check whether any tag from a group is present
    ///
    /// This is the membership test the material-type rules use against their
    /// named format groups.
    #[must_use]
    pub fn contains_any(&self, group: &[FormatTag]) -> bool {
        group.iter().any(|tag| self.tags.contains(tag))
    }

    /// Number of distinct tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when no tag has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over tags in insertion order
    pub fn iter(&self) -> impl Iterator<Item = FormatTag> + '_ {
        self.tags.iter().copied()
    }

    /// The persisted identifiers, in insertion order
    #[must_use]
    pub fn as_strings(&self) -> Vec<&'static str> {
        self.tags.iter().map(|tag| tag.as_str()).collect()
    }
}

impl FromIterator<FormatTag> for FormatSet {
    fn from_iter<I: IntoIterator<Item = FormatTag>>(iter: I) -> Self {
        FormatSet {
            tags: iter.into_iter().collect(),
        }
    }
}

impl Extend<FormatTag> for FormatSet {
    fn extend<I: IntoIterator<Item = FormatTag>>(&mut self, iter: I) {
        self.tags.extend(iter);
    }
}
