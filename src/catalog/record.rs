use std::fmt;

use crate::error::CatalogError;

/// Genre used when none was given or the stored line predates genres.
pub const UNKNOWN_GENRE: &str = "Unknown";

const FIELD_SEPARATOR: char = '|';

/// One catalog entry. Immutable once built; the only way to "edit" a
/// record is to remove it and add a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    title: String,
    genre: String,
    year: i32,
}

/// Collapse internal whitespace runs to a single space and trim the ends.
pub fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-case the first character, leaving the rest as written.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Record {
    /// Build a record, normalizing whitespace in `title` and `genre`.
    ///
    /// A blank genre becomes [`UNKNOWN_GENRE`]. Fails with
    /// [`CatalogError::EmptyTitle`] when nothing is left of the title, and
    /// with [`CatalogError::Separator`] when either field contains `|`.
    pub fn new(title: &str, genre: &str, year: i32) -> Result<Self, CatalogError> {
        let title = normalize_spaces(title);
        if title.is_empty() {
            return Err(CatalogError::EmptyTitle);
        }

        let genre = normalize_spaces(genre);
        if title.contains(FIELD_SEPARATOR) || genre.contains(FIELD_SEPARATOR) {
            return Err(CatalogError::Separator);
        }
        let genre = if genre.is_empty() {
            UNKNOWN_GENRE.to_string()
        } else {
            capitalize(&genre)
        };

        Ok(Self { title, genre, year })
    }

    /// Title-only record, as produced by the legacy single-field format.
    pub fn titled(title: &str) -> Result<Self, CatalogError> {
        Self::new(title, UNKNOWN_GENRE, 0)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Release year; 0 means unspecified.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Year as table text, empty when unspecified.
    pub fn year_label(&self) -> String {
        if self.year > 0 {
            self.year.to_string()
        } else {
            String::new()
        }
    }

    /// Lowercased title used for dedup and ordering.
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }

    /// Serialize as `<title> | <genre> | <year>`.
    pub fn to_line(&self) -> String {
        format!("{} | {} | {}", self.title, self.genre, self.year)
    }

    /// Parse a stored line.
    ///
    /// Three or more `|`-separated parts are read as title, genre and year
    /// (an unparseable year becomes 0). Any other part count is treated as
    /// the legacy title-only format and only the first part is kept.
    pub fn from_line(line: &str) -> Result<Self, CatalogError> {
        let parts: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();

        if parts.len() >= 3 {
            let year = parts[2].parse::<i32>().unwrap_or(0);
            Self::new(parts[0], parts[1], year)
        } else {
            Self::titled(parts[0])
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year > 0 {
            write!(f, "{} ({}, {})", self.title, self.genre, self.year)
        } else {
            write!(f, "{} ({})", self.title, self.genre)
        }
    }
}
