//! File name generation for new prompts

/// Highest numeric suffix tried before giving up on a unique name
const MAX_SUFFIX: u32 = 999;

/// Fallback stem when a title has no usable characters
const DEFAULT_STEM: &str = "prompt";

/// Turn a title into a file stem: lowercase, spaces become hyphens, anything
/// that is not a letter, digit or hyphen is dropped, runs of hyphens collapse.
fn slugify_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '-' => Some('-'),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Generate a `.md` file name for `title` that does not collide
/// (case-insensitively) with any of `existing`.
///
/// Collisions are resolved with `-2`, `-3`, ... up to `-999`. If every suffix
/// is taken the unsuffixed name is returned and the caller's
/// no-clobber write reports the collision.
pub fn generate_filename<S: AsRef<str>>(title: &str, existing: &[S]) -> String {
    let mut stem = slugify_title(title);
    if stem.is_empty() {
        stem = DEFAULT_STEM.to_string();
    }

    let taken = |candidate: &str| {
        existing
            .iter()
            .any(|name| name.as_ref().to_lowercase() == candidate.to_lowercase())
    };

    let base = format!("{stem}.md");
    if !taken(&base) {
        return base;
    }

    (2..=MAX_SUFFIX)
        .map(|n| format!("{stem}-{n}.md"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}
