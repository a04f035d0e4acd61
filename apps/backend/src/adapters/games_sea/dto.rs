//! DTOs for games_sea adapter.

use time::Date;

use crate::entities::games::{Genres, Platform};

/// DTO for creating a new game. Aggregates always start at zero.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub title: String,
    pub platform: Platform,
    pub genres: Vec<String>,
    pub release_date: Date,
    pub publisher: String,
}

/// Descriptive-field update; `None` leaves a column untouched.
///
/// Aggregate columns are deliberately absent: only the rating recalculation
/// writes them.
#[derive(Debug, Clone, Default)]
pub struct GameUpdate {
    pub title: Option<String>,
    pub platform: Option<Platform>,
    pub genres: Option<Vec<String>>,
    pub release_date: Option<Date>,
    pub publisher: Option<String>,
}

impl GameUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.platform.is_none()
            && self.genres.is_none()
            && self.release_date.is_none()
            && self.publisher.is_none()
    }
}

/// Ordering for game listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameSort {
    /// Highest average rating first
    Rating,
    /// Most recent release first
    Newest,
    Oldest,
    #[default]
    Title,
}

impl GameSort {
    /// Unknown values fall back to the title ordering.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("rating") => Self::Rating,
            Some("newest") => Self::Newest,
            Some("oldest") => Self::Oldest,
            _ => Self::Title,
        }
    }
}

pub(super) fn genres(list: Vec<String>) -> Genres {
    Genres(list)
}
