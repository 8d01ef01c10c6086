//! Display helpers shared by post and profile views.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

pub const DEFAULT_AVATAR: &str = "/assets/default-avatar.png";

/// Calendar date of an RFC 3339 timestamp; anything else is shown as is.
pub fn publication_date(raw: &str) -> &str {
    raw.split_once('T').map_or(raw, |(date, _)| date)
}

pub fn likes_label(count: u64) -> String {
    match count {
        1 => "1 like".to_owned(),
        n => format!("{n} likes"),
    }
}

pub fn comments_label(count: u64) -> String {
    match count {
        1 => "1 comment".to_owned(),
        n => format!("{n} comments"),
    }
}

pub fn avatar(pfp: Option<&str>) -> String {
    pfp.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_AVATAR).to_owned()
}

/// Display name, falling back to the username.
pub fn display_name<'a>(full_name: &'a str, username: &'a str) -> &'a str {
    if full_name.trim().is_empty() { username } else { full_name }
}
