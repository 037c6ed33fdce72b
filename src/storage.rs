//! Object store collaborator: retrieval of the uploaded image.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{PpeError, Result};

/// An object fetched from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub key: String,
    pub bytes: Vec<u8>,
}

pub trait ObjectStore {
    /// Fetch an object. Fails with `NotFound` or `Access`.
    fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject>;
}

/// Object store rooted at a local directory; buckets are subdirectories.
pub struct FilesystemObjectStore {
    root: PathBuf,
}

impl FilesystemObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let relative = Path::new(bucket).join(key);
        let contained = !bucket.is_empty()
            && !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !contained {
            return Err(PpeError::Access {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: "object path escapes the store root".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for FilesystemObjectStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        let path = self.object_path(bucket, key)?;
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PpeError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => PpeError::Access {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            },
        })?;
        Ok(StoredObject {
            content_type: content_type_for_key(key).to_string(),
            key: key.to_string(),
            bytes,
        })
    }
}

/// In-memory object store for tests and fixtures.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: HashMap<(String, String), StoredObject>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bucket: &str, key: &str, content_type: &str, bytes: Vec<u8>) {
        self.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                content_type: content_type.to_string(),
                key: key.to_string(),
                bytes,
            },
        );
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| PpeError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}

/// Content type inferred from the key's extension.
pub fn content_type_for_key(key: &str) -> &'static str {
    let ext = Path::new(key)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_object_with_content_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("uploads/site")).unwrap();
        std::fs::write(dir.path().join("uploads/site/crew.JPG"), b"jpeg-bytes").unwrap();

        let store = FilesystemObjectStore::new(dir.path());
        let object = store.get_object("uploads", "site/crew.JPG").unwrap();
        assert_eq!(object.content_type, "image/jpeg");
        assert_eq!(object.key, "site/crew.JPG");
        assert_eq!(object.bytes, b"jpeg-bytes");
    }

    #[test]
    fn missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemObjectStore::new(dir.path());
        let err = store.get_object("uploads", "nope.png").unwrap_err();
        assert!(matches!(err, PpeError::NotFound { .. }));
    }

    #[test]
    fn traversal_is_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemObjectStore::new(dir.path());
        for (bucket, key) in [("uploads", "../secret.jpg"), ("..", "x.jpg"), ("uploads", "/etc/passwd")] {
            let err = store.get_object(bucket, key).unwrap_err();
            assert!(matches!(err, PpeError::Access { .. }), "{}/{}", bucket, key);
        }
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(content_type_for_key("scan.tiff"), "application/octet-stream");
        assert_eq!(content_type_for_key("noext"), "application/octet-stream");
        assert_eq!(content_type_for_key("a.png"), "image/png");
    }

    #[test]
    fn in_memory_store_round_trips() {
        let mut store = InMemoryObjectStore::new();
        store.insert("b", "k.png", "image/png", vec![1, 2, 3]);
        assert_eq!(store.get_object("b", "k.png").unwrap().bytes, vec![1, 2, 3]);
        assert!(matches!(
            store.get_object("b", "other.png"),
            Err(PpeError::NotFound { .. })
        ));
    }
}
