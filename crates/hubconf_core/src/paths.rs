//! Building API paths for organizations, teams and repositories.

use url::form_urlencoded;

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;

/// Joins segments into an absolute API path.
///
/// Each segment is percent-encoded on its own, so a `/` or `%` inside a name
/// stays part of that segment. Empty segments are dropped so that the result
/// never has a trailing slash.
///
/// ```rust
/// use hubconf_core::paths::join;
///
/// assert_eq!(join(["repos", "acme", "", "widgets"]), "/repos/acme/widgets");
/// assert_eq!(join(["labels", "area/ui"]), "/labels/area%2Fui");
/// ```
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = segments
        .into_iter()
        .filter(|s| !s.as_ref().is_empty())
        .map(|s| encode_segment(s.as_ref()))
        .collect();

    format!("/{}", parts.join("/"))
}

/// Percent-encodes one path segment.
///
/// `byte_serialize` writes a space as `+` and a literal `+` as `%2B`, so every
/// `+` left in its output stands for a space.
pub fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `/repos/{owner}/{repo}/...`
pub fn repository<S: AsRef<str>>(owner: &str, repo: &str, rest: &[S]) -> String {
    let head = ["repos", owner, repo];
    join(head.iter().copied().chain(rest.iter().map(|s| s.as_ref())))
}

/// `/orgs/{org}/...`
pub fn organization<S: AsRef<str>>(org: &str, rest: &[S]) -> String {
    let head = ["orgs", org];
    join(head.iter().copied().chain(rest.iter().map(|s| s.as_ref())))
}

/// `/teams/{id}/...`
pub fn team<S: AsRef<str>>(team_id: u64, rest: &[S]) -> String {
    let id = team_id.to_string();
    let head = ["teams", id.as_str()];
    join(head.iter().copied().chain(rest.iter().map(|s| s.as_ref())))
}
