//! Artwork record

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Placeholder shown for empty display fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Stable identifier of an artwork in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(pub u64);

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ArtworkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One record of the art collection.
///
/// Every display field is independently nullable; only `id` is guaranteed.
/// Records are never edited locally, they are replaced by the next fetch.
///
/// # Example
///
/// ```
/// use artic_lib::model::Artwork;
///
/// let artwork = Artwork::new(27992).with_title("A Sunday on La Grande Jatte");
/// assert_eq!(artwork.display_title(), "A Sunday on La Grande Jatte");
/// assert_eq!(artwork.display_place_of_origin(), "N/A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

impl Artwork {
    /// Creates an artwork with only its identifier set.
    pub fn new(id: u64) -> Self {
        Self {
            id: ArtworkId(id),
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_place_of_origin(mut self, place: impl Into<String>) -> Self {
        self.place_of_origin = Some(place.into());
        self
    }

    pub fn with_artist_display(mut self, artist: impl Into<String>) -> Self {
        self.artist_display = Some(artist.into());
        self
    }

    pub fn with_inscriptions(mut self, inscriptions: impl Into<String>) -> Self {
        self.inscriptions = Some(inscriptions.into());
        self
    }

    pub fn with_dates(mut self, start: i64, end: i64) -> Self {
        self.date_start = Some(start);
        self.date_end = Some(end);
        self
    }

    // =========================================================================
    // Display helpers
    // =========================================================================

    pub fn display_title(&self) -> &str {
        display_text(self.title.as_deref())
    }

    pub fn display_place_of_origin(&self) -> &str {
        display_text(self.place_of_origin.as_deref())
    }

    pub fn display_artist(&self) -> &str {
        display_text(self.artist_display.as_deref())
    }

    pub fn display_inscriptions(&self) -> &str {
        display_text(self.inscriptions.as_deref())
    }

    pub fn display_date_start(&self) -> String {
        display_year(self.date_start)
    }

    pub fn display_date_end(&self) -> String {
        display_year(self.date_end)
    }
}

/// Formats an optional text field, using [`NOT_AVAILABLE`] for null or empty values.
pub fn display_text(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => NOT_AVAILABLE,
    }
}

/// Formats an optional year. Zero counts as missing, matching the API's placeholder dates.
pub fn display_year(value: Option<i64>) -> String {
    match value {
        Some(year) if year != 0 => year.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
