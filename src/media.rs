// ABOUTME: Local file storage for uploaded profile images under fixed path prefixes
// ABOUTME: Only the returned relative reference is persisted on the profile rows

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use uuid::Uuid;

use crate::error::Result;

pub const AVATAR_UPLOAD_TO: &str = "users_avatar/";
pub const COMPANY_LOGO_UPLOAD_TO: &str = "company_logo/";

/// URL prefix the media root is served under.
pub const MEDIA_URL: &str = "/media/";

/// An image part held in memory until the rest of the form has been checked.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` under `upload_to` with a generated name keeping the
    /// original extension, returning the reference to store.
    pub async fn save(&self, upload_to: &str, original_name: &str, bytes: &[u8]) -> Result<String> {
        let reference = format!("{}{}", upload_to, stored_file_name(original_name));
        let path = self.root.join(&reference);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::info!(reference = %reference, size = bytes.len(), "Stored uploaded file");
        Ok(reference)
    }

    pub async fn save_upload(
        &self,
        upload_to: &str,
        upload: Option<Upload>,
    ) -> Result<Option<String>> {
        match upload {
            Some(upload) => {
                let reference = self.save(upload_to, &upload.file_name, &upload.bytes).await?;
                Ok(Some(reference))
            }
            None => Ok(None),
        }
    }

    /// Removes a stored file whose reference was never persisted.
    pub async fn discard(&self, reference: &str) {
        if let Err(err) = tokio::fs::remove_file(self.root.join(reference)).await {
            tracing::warn!(
                reference = %reference,
                error = %err,
                "Failed to remove unreferenced upload"
            );
        }
    }
}

fn stored_file_name(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4().simple(), ext),
        None => Uuid::new_v4().simple().to_string(),
    }
}

/// Public URL of a stored reference, `None` for an unset image.
pub fn media_url(reference: &str) -> Option<String> {
    if reference.is_empty() {
        None
    } else {
        Some(format!("{}{}", MEDIA_URL, reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_writes_under_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let store = MediaStore::new(temp_dir.path());

        let reference = store
            .save(AVATAR_UPLOAD_TO, "me.PNG", b"not really a png")
            .await
            .unwrap();

        assert!(reference.starts_with("users_avatar/"));
        assert!(reference.ends_with(".png"));
        let written = tokio::fs::read(temp_dir.path().join(&reference)).await.unwrap();
        assert_eq!(written, b"not really a png");
    }

    #[tokio::test]
    async fn test_discard_removes_saved_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = MediaStore::new(temp_dir.path());

        let reference = store
            .save_upload(
                COMPANY_LOGO_UPLOAD_TO,
                Some(Upload {
                    file_name: "logo.png".to_string(),
                    bytes: Bytes::from_static(b"logo"),
                }),
            )
            .await
            .unwrap()
            .unwrap();
        assert!(temp_dir.path().join(&reference).exists());

        store.discard(&reference).await;
        assert!(!temp_dir.path().join(&reference).exists());

        assert_eq!(store.save_upload(AVATAR_UPLOAD_TO, None).await.unwrap(), None);
    }

    #[test]
    fn test_suspicious_extension_is_dropped() {
        let name = stored_file_name("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains('.'));

        let name = stored_file_name("logo.sv g");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_media_url() {
        assert_eq!(media_url(""), None);
        assert_eq!(
            media_url("company_logo/a.png").as_deref(),
            Some("/media/company_logo/a.png")
        );
    }
}
