use crate::constants::limits::MAX_NAME_CHARS;
use crate::entities::users;

/// User data returned from the store (without the password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[must_use]
pub fn is_valid_display_name(name: &str) -> bool {
    (1..=MAX_NAME_CHARS).contains(&name.chars().count())
}
