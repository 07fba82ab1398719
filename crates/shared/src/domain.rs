use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(ArtworkId);

const MISSING_FIELD: &str = "-";

/// One row of the artworks listing. Absent or `null` fields come through as `None`.
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
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: ArtworkId(id),
            title: Some(title.into()),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    pub fn display_place_of_origin(&self) -> &str {
        self.place_of_origin.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn display_artist(&self) -> &str {
        self.artist_display.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn display_inscriptions(&self) -> &str {
        self.inscriptions.as_deref().unwrap_or(MISSING_FIELD)
    }

    /// `start — end`, with `-` standing in for an unknown start year.
    pub fn display_dates(&self) -> String {
        let start = self
            .date_start
            .map(|year| year.to_string())
            .unwrap_or_else(|| MISSING_FIELD.to_string());
        match self.date_end {
            Some(end) => format!("{start} — {end}"),
            None => start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_none() {
        let artwork: Artwork =
            serde_json::from_str(r#"{"id": 7, "title": null}"#).expect("artwork");
        assert_eq!(artwork.id, ArtworkId(7));
        assert_eq!(artwork.title, None);
        assert_eq!(artwork.artist_display, None);
        assert_eq!(artwork.date_end, None);
        assert_eq!(artwork.display_title(), "Untitled");
        assert_eq!(artwork.display_artist(), "-");
    }

    #[test]
    fn formats_date_range() {
        let mut artwork = Artwork::new(1, "Nighthawks");
        assert_eq!(artwork.display_dates(), "-");

        artwork.date_start = Some(1942);
        assert_eq!(artwork.display_dates(), "1942");

        artwork.date_end = Some(1943);
        assert_eq!(artwork.display_dates(), "1942 — 1943");
    }

    #[test]
    fn artwork_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&ArtworkId(27992)).expect("serialize");
        assert_eq!(json, "27992");
        assert_eq!(format!("{:>7}", ArtworkId(27992)), "  27992");
    }
}
