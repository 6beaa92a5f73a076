//! Shared file utility functions
//!
//! Extension checks and the identifier naming convention used by the
//! rename pipeline.

use std::path::Path;

/// Video file extensions the rename pipeline recognizes (lowercase)
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "flv"];

/// Length of a generated video identifier
pub const ID_LENGTH: usize = 11;

/// Alphabet the identifiers are drawn from (64 symbols)
pub const ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Check if a path has a recognized video extension
///
/// # Example
/// ```
/// use mediavault::services::file_utils::is_video_file;
/// use std::path::Path;
/// assert!(is_video_file(Path::new("/path/to/video.MP4")));
/// assert!(!is_video_file(Path::new("notes.txt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a filename already follows the identifier naming convention:
/// the stem is exactly [ID_LENGTH] characters, all drawn from [ID_ALPHABET].
/// Such files are considered already processed and are never re-renamed.
pub fn is_already_renamed(filename: &str) -> bool {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    stem.len() == ID_LENGTH && stem.bytes().all(|b| ID_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_extension_check_is_case_insensitive() {
        assert!(is_video_file(Path::new("clip.mp4")));
        assert!(is_video_file(Path::new("clip.MKV")));
        assert!(is_video_file(Path::new("/abs/dir/clip.WebM")));
        assert!(!is_video_file(Path::new("clip.mp3")));
        assert!(!is_video_file(Path::new("clip")));
        assert!(!is_video_file(Path::new(".mp4")));
    }

    #[test]
    fn already_renamed_requires_exact_stem_shape() {
        assert!(is_already_renamed("AbC-12_xYz9.mp4"));
        assert!(is_already_renamed("AAAAAAAAAAA.mkv"));
        // Wrong length
        assert!(!is_already_renamed("short.mp4"));
        assert!(!is_already_renamed("twelve-chars.mp4"));
        // Character outside the alphabet
        assert!(!is_already_renamed("AbC 12_xYz9.mp4"));
        assert!(!is_already_renamed("AbC.12_xYz9.mp4"));
        // Human names of incidental length 11 but with spaces
        assert!(!is_already_renamed("my clip 001.mp4"));
    }
}
