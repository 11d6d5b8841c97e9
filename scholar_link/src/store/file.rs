//! File-backed token store.

use super::TokenStore;
use crate::auth::SessionTokens;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Token store persisted as a single JSON document on disk.
///
/// This is the shared medium other client processes of the same user
/// observe, the analogue of origin-scoped browser storage: the document
/// holds both tokens under the stable `access_token` / `refresh_token`
/// keys, and the file's absence is the canonical logged-out signal.
///
/// Writes go to a sibling temp file and are renamed into place, so a
/// concurrent reader sees either the old pair or the new pair, never a
/// torn write. Consistency across processes is eventual, not
/// synchronous; [`crate::session::sync`] polls for it.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_pair(&self) -> Option<SessionTokens> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                log::error!("failed to read token file {}: {err}", self.path.display());
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(pair) => Some(pair),
            Err(err) => {
                // a corrupt file is treated as signed out rather than fatal
                log::error!(
                    "token file {} is not valid JSON, treating as signed out: {err}",
                    self.path.display()
                );
                None
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn set_tokens(&self, access: &str, refresh: &str) {
        let pair = SessionTokens {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        };
        let json = match serde_json::to_vec_pretty(&pair) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to serialize token pair: {err}");
                return;
            }
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(err) = fs::create_dir_all(parent)
        {
            log::error!("failed to create token directory {}: {err}", parent.display());
            return;
        }
        // write-then-rename keeps the pair atomic for concurrent readers
        let tmp = self.path.with_extension("tmp");
        if let Err(err) = fs::write(&tmp, &json) {
            log::error!("failed to write token file {}: {err}", tmp.display());
            return;
        }
        if let Err(err) = fs::rename(&tmp, &self.path) {
            log::error!("failed to move token file into place: {err}");
        }
    }

    fn access_token(&self) -> Option<String> {
        self.read_pair().map(|pair| pair.access_token)
    }

    fn refresh_token(&self) -> Option<String> {
        self.read_pair().map(|pair| pair.refresh_token)
    }

    fn clear_tokens(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            // already signed out
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                log::error!("failed to remove token file {}: {err}", self.path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(prefix: &str) -> FileTokenStore {
        let rand_id: u32 = rand::random();
        let path = std::env::temp_dir().join(format!("{prefix}_{rand_id}_tokens.json"));
        FileTokenStore::new(path)
    }

    #[test]
    fn test_missing_file_is_anonymous() {
        let store = temp_store("missing");
        assert!(!store.is_authenticated());
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn test_pair_round_trips_through_disk() {
        let store = temp_store("roundtrip");
        store.set_tokens("access-1", "refresh-1");
        assert!(store.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        store.clear_tokens();
    }

    #[test]
    fn test_second_store_on_same_path_sees_the_pair() {
        // two handles on one path model two tabs of the same origin
        let store = temp_store("shared");
        let other = FileTokenStore::new(store.path().to_path_buf());
        store.set_tokens("access-1", "refresh-1");
        assert!(other.is_authenticated());
        other.clear_tokens();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clear_tokens_is_idempotent() {
        let store = temp_store("clear");
        store.set_tokens("access-1", "refresh-1");
        store.clear_tokens();
        store.clear_tokens();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_corrupt_file_reads_as_signed_out() {
        let store = temp_store("corrupt");
        fs::write(store.path(), b"not json at all").unwrap();
        assert_eq!(store.access_token(), None);
        assert!(!store.is_authenticated());
        store.clear_tokens();
    }

    #[test]
    fn test_set_tokens_overwrites_corrupt_file() {
        let store = temp_store("recover");
        fs::write(store.path(), b"{\"truncated").unwrap();
        store.set_tokens("access-2", "refresh-2");
        assert_eq!(store.access_token().as_deref(), Some("access-2"));
        store.clear_tokens();
    }
}
