//! Character image stored as a data URL under `characterImage`.
//!
//! The character picture shown behind the timer is stored as a
//! `data:image/...;base64,` URL.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Result, ValidationError};
use crate::store::{keys, KeyValueStore};

/// Encode an image file as a data URL and persist it.
///
/// # Errors
/// Returns an error for an unrecognized image extension, an unreadable
/// file, or a store failure.
pub fn set_image(store: &impl KeyValueStore, path: &Path) -> Result<String> {
    let mime = mime_for(path)?;
    let bytes = std::fs::read(path)?;
    let url = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
    store.set(keys::CHARACTER_IMAGE, &url)?;
    Ok(url)
}

/// The stored data URL, if any.
///
/// # Errors
/// Returns an error if the store read fails.
pub fn image(store: &impl KeyValueStore) -> Result<Option<String>> {
    Ok(store.get(keys::CHARACTER_IMAGE)?)
}

/// # Errors
/// Returns an error if the store cannot remove the key.
pub fn clear(store: &impl KeyValueStore) -> Result<()> {
    store.remove(keys::CHARACTER_IMAGE)?;
    Ok(())
}

fn mime_for(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        _ => Err(ValidationError::InvalidValue {
            field: "image".to_string(),
            message: format!("unsupported image extension: '{ext}'"),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn set_builds_data_url_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.png");
        std::fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let store = MemoryStore::new();
        let url = set_image(&store, &path).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(image(&store).unwrap().as_deref(), Some(url.as_str()));
    }

    #[test]
    fn unsupported_extension_rejected() {
        let store = MemoryStore::new();
        assert!(set_image(&store, Path::new("notes.txt")).is_err());
        assert!(image(&store).unwrap().is_none());
    }

    #[test]
    fn clear_removes_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.jpg");
        std::fs::write(&path, [0xff, 0xd8]).unwrap();

        let store = MemoryStore::new();
        set_image(&store, &path).unwrap();
        clear(&store).unwrap();
        assert!(image(&store).unwrap().is_none());
    }
}
