//! Server-rendered HTML for the watchlist pages.
//!
//! Every user-supplied string goes through `html_escape` before it is written.

use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::models::movie::Movie;

/// Per-request data shared by every page: who owns the list, whether the
/// caller is logged in, and the flash messages drained from the session.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub owner_name: Option<String>,
    pub authenticated: bool,
    pub flashes: Vec<String>,
}

impl PageContext {
    fn heading(&self) -> String {
        self.owner_name.as_deref().map_or_else(
            || "Watchlist".to_string(),
            |name| format!("{}'s Watchlist", text(name)),
        )
    }
}

fn layout(ctx: &PageContext, body: &str) -> String {
    let heading = ctx.heading();

    let mut nav = String::from(r#"<li><a href="/">Home</a></li>"#);
    if ctx.authenticated {
        nav.push_str(r#"<li><a href="/settings">Settings</a></li>"#);
        nav.push_str(r#"<li><a href="/logout">Logout</a></li>"#);
    } else {
        nav.push_str(r#"<li><a href="/login">Login</a></li>"#);
    }

    let flashes = ctx.flashes.iter().fold(String::new(), |mut acc, message| {
        let _ = write!(acc, r#"<div class="alert">{}</div>"#, text(message));
        acc
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{heading}</title>
</head>
<body>
<h2>{heading}</h2>
<nav><ul>{nav}</ul></nav>
{flashes}
{body}
</body>
</html>
"#
    )
}

#[must_use]
pub fn index(ctx: &PageContext, movies: &[Movie]) -> String {
    let mut body = format!("<p>{} Titles</p>\n", movies.len());

    if ctx.authenticated {
        body.push_str(concat!(
            r#"<form method="post">"#,
            r#"Name <input type="text" name="title" autocomplete="off" required> "#,
            r#"Year <input type="text" name="year" autocomplete="off" required> "#,
            r#"<input class="btn" type="submit" name="submit" value="Add">"#,
            "</form>\n",
        ));
    }

    body.push_str(r#"<ul class="movie-list">"#);
    for movie in movies {
        let _ = write!(body, "<li>{} - {}", text(&movie.title), text(&movie.year));
        if ctx.authenticated {
            let _ = write!(
                body,
                concat!(
                    r#"<span class="float-right">"#,
                    r#"<a class="btn" href="/movie/edit/{id}">Edit</a>"#,
                    r#"<form class="inline-form" method="post" action="/movie/delete/{id}">"#,
                    r#"<input class="btn" type="submit" name="delete" value="Delete">"#,
                    "</form></span>",
                ),
                id = movie.id
            );
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>");

    layout(ctx, &body)
}

#[must_use]
pub fn login(ctx: &PageContext) -> String {
    let body = concat!(
        "<h3>Login</h3>\n",
        r#"<form method="post">"#,
        r#"Username<br><input type="text" name="username" required><br><br>"#,
        r#"Password<br><input type="password" name="password" required><br><br>"#,
        r#"<input class="btn" type="submit" name="submit" value="Submit">"#,
        "</form>",
    );

    layout(ctx, body)
}

#[must_use]
pub fn settings(ctx: &PageContext, current_name: &str) -> String {
    let body = format!(
        concat!(
            "<h3>User settings</h3>\n",
            r#"<form method="post">"#,
            r#"Name <input type="text" name="name" autocomplete="off" required value="{}">"#,
            r#"<input class="btn" type="submit" name="submit" value="Save">"#,
            "</form>",
        ),
        attr(current_name)
    );

    layout(ctx, &body)
}

#[must_use]
pub fn edit(ctx: &PageContext, movie: &Movie) -> String {
    let body = format!(
        concat!(
            "<h3>Edit item</h3>\n",
            r#"<form method="post">"#,
            r#"Name <input type="text" name="title" autocomplete="off" required value="{}"> "#,
            r#"Year <input type="text" name="year" autocomplete="off" required value="{}"> "#,
            r#"<input class="btn" type="submit" name="submit" value="Update">"#,
            "</form>",
        ),
        attr(&movie.title),
        attr(&movie.year)
    );

    layout(ctx, &body)
}

/// Static page for 400, 404 and 500 responses
#[must_use]
pub fn error_page(status: StatusCode) -> String {
    let title = match status {
        StatusCode::BAD_REQUEST => "Bad Request - 400",
        StatusCode::NOT_FOUND => "Page Not Found - 404",
        _ => "Internal Server Error - 500",
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h2>{title}</h2>
<p><a href="/">Go Back</a></p>
</body>
</html>
"#
    )
}
