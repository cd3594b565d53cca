//! Ownership marker for generated service scripts.
//!
//! Every script we render carries [`MARKER`]. Before overwriting an existing
//! script, its contents are checked for the marker: no marker, no overwrite.
//! Scripts from the earlier `github-service-wrapper` tool contain it too, so
//! they can be taken over.

/// Literal substring embedded in every generated script.
pub const MARKER: &str = "service-wrapper";

/// Returns true if `contents` were produced by this tool.
pub fn is_owned(contents: &str) -> bool {
    contents.contains(MARKER)
}
