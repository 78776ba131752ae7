//! Repository file contents.
//!
//! The contents endpoint returns files base64-encoded, wrapped at 60
//! characters. [`fetch_file_text`] undoes both and hands back UTF-8 text.

use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, GitHubApi};

#[cfg(test)]
#[path = "contents_tests.rs"]
mod tests;

/// Fields of the contents response that are needed to decode a file.
pub const FILE_FIELDS: &[&str] = &["type", "encoding", "content"];

/// A file as returned by `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileContent {
    /// Entry type, `file` for regular files.
    #[serde(rename = "type")]
    pub entry_type: String,

    /// Encoding of `content`, `base64` in practice.
    pub encoding: String,

    /// Encoded file content, possibly with embedded newlines.
    pub content: String,
}

impl FileContent {
    /// Decodes the content into UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decoding` if the entry is not a file, the encoding is
    /// not base64, or the bytes are not valid UTF-8.
    pub fn decode(&self) -> Result<String, Error> {
        if self.entry_type != "file" {
            return Err(Error::Decoding(format!(
                "expected a file, found a {}",
                self.entry_type
            )));
        }
        if self.encoding != "base64" {
            return Err(Error::Decoding(format!(
                "unsupported encoding '{}'",
                self.encoding
            )));
        }

        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| Error::Decoding(e.to_string()))?;

        String::from_utf8(bytes).map_err(|e| Error::Decoding(e.to_string()))
    }
}

/// Reads the file at `path` on the default branch of `owner/repo`.
///
/// # Errors
///
/// Returns `Error::NotFound` if the file does not exist, `Error::Decoding`
/// if it cannot be turned into text, or any transport error of the call.
pub async fn fetch_file_text(
    api: &dyn GitHubApi,
    owner: &str,
    repo: &str,
    path: &str,
) -> Result<String, Error> {
    let route = format!(
        "/repos/{}/{}/contents/{}",
        owner,
        repo,
        path.trim_start_matches('/')
    );
    debug!(owner = owner, repo = repo, path = path, "Fetching file contents");

    let value = api.get(&route, FILE_FIELDS).await?;
    let file: FileContent = serde_json::from_value(value)?;
    file.decode()
}
