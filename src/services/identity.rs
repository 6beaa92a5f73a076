//! Video identifier generation
//!
//! Produces the opaque 11-character identifiers that become both the
//! registry key and the renamed filename stem.

use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

use super::file_utils::{ID_ALPHABET, ID_LENGTH};

/// Upper bound on collision retries. With 64^11 possible identifiers a
/// single retry is already vanishingly unlikely; hitting this cap means
/// something is wrong with the directory being scanned.
const MAX_ATTEMPTS: u32 = 100;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("could not find a free identifier in {dir} after {attempts} attempts")]
    Exhausted { dir: String, attempts: u32 },
}

/// Draw one identifier, uniform per character over the 64-symbol alphabet
fn random_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Generate an identifier whose candidate path `directory/id + extension`
/// does not exist yet. Only checks existence; the caller creates the file
/// by moving the original onto the returned path.
///
/// `extension` is the full suffix including the dot (e.g. `.mp4`).
pub fn generate_unique_id(
    directory: &Path,
    extension: &str,
) -> Result<(String, PathBuf), IdentityError> {
    for _ in 0..MAX_ATTEMPTS {
        let id = random_id();
        let candidate = directory.join(format!("{id}{extension}"));
        if !candidate.exists() {
            return Ok((id, candidate));
        }
    }

    Err(IdentityError::Exhausted {
        dir: directory.display().to_string(),
        attempts: MAX_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::file_utils::is_already_renamed;

    #[test]
    fn generated_ids_have_expected_shape() {
        for _ in 0..200 {
            let id = random_id();
            assert_eq!(id.len(), ID_LENGTH);
            assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)), "bad id: {id}");
            assert!(is_already_renamed(&format!("{id}.mp4")));
        }
    }

    #[test]
    fn candidate_path_never_collides_with_existing_file() {
        let dir = tempfile::tempdir().unwrap();

        // Pre-create a file, then verify generated candidates avoid every
        // existing name across repeated draws.
        let (first_id, first_path) = generate_unique_id(dir.path(), ".mp4").unwrap();
        std::fs::write(&first_path, b"x").unwrap();

        for _ in 0..50 {
            let (id, path) = generate_unique_id(dir.path(), ".mp4").unwrap();
            assert_ne!(id, first_id);
            assert!(!path.exists());
            assert_eq!(path.parent().unwrap(), dir.path());
            assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("{id}.mp4"));
        }
    }
}
