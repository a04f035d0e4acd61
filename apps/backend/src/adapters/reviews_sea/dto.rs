//! DTOs for reviews_sea adapter.

/// DTO for inserting a review. Text fields arrive trimmed and validated.
#[derive(Debug, Clone)]
pub struct ReviewCreate {
    pub user_id: i64,
    pub game_id: i64,
    pub rating: i16,
    pub title: String,
    pub body: String,
}

/// Replacement values for a review's editable fields.
#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub id: i64,
    pub rating: i16,
    pub title: String,
    pub body: String,
}

/// Ordering for a game's reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    RatingHigh,
    RatingLow,
    Oldest,
    #[default]
    Newest,
}

impl ReviewSort {
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("rating_high") => Self::RatingHigh,
            Some("rating_low") => Self::RatingLow,
            Some("oldest") => Self::Oldest,
            _ => Self::Newest,
        }
    }
}

/// Review count and rating sum for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingStats {
    pub count: i64,
    pub sum: i64,
}
