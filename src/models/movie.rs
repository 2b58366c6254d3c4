use serde::Deserialize;

use crate::constants::limits::{MAX_TITLE_CHARS, YEAR_CHARS};
use crate::entities::movies;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: String,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year: model.year,
        }
    }
}

/// Title and year as submitted by the create and edit forms.
/// Missing fields deserialize to empty strings and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
}

impl MovieInput {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        let title_len = self.title.chars().count();
        (1..=MAX_TITLE_CHARS).contains(&title_len) && self.year.chars().count() == YEAR_CHARS
    }
}
