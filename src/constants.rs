pub mod limits {

    pub const MAX_TITLE_CHARS: usize = 60;

    pub const YEAR_CHARS: usize = 4;

    pub const MAX_NAME_CHARS: usize = 20;
}

pub mod session {

    pub const USER_ID_KEY: &str = "user_id";

    pub const FLASH_KEY: &str = "_flashes";
}

pub mod flash {

    pub const INVALID_INPUT: &str = "Invalid input.";

    pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

    pub const LOGIN_SUCCESS: &str = "Login success.";

    pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";

    pub const GOODBYE: &str = "Goodbye.";

    pub const SETTINGS_UPDATED: &str = "Settings updated successfully.";

    pub const ITEM_CREATED: &str = "Item created successfully.";

    pub const ITEM_UPDATED: &str = "Item updated successfully.";

    pub const ITEM_DELETED: &str = "Item deleted successfully.";
}

pub mod seed {

    pub const ADMIN_DISPLAY_NAME: &str = "Admin";

    pub const FORGE_DISPLAY_NAME: &str = "Naive";

    pub const FORGE_MOVIES: &[(&str, &str)] = &[
        ("My Neighbor Totoro", "1988"),
        ("Dead Poets Society", "1989"),
        ("A Perfect World", "1993"),
        ("Leon", "1994"),
        ("Mahjong", "1996"),
        ("Swallowtail Butterfly", "1996"),
        ("King of Comedy", "1999"),
        ("Devils on the Doorstep", "1999"),
        ("WALL-E", "2008"),
        ("The Pork of Music", "2012"),
    ];
}
