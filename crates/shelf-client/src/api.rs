//! # Catalog API
//!
//! The backend calls the admin screens depend on, behind a trait so the
//! sessions can be driven by the HTTP client in production and by an
//! in-memory fake in tests.
//!
//! ```text
//! fetch_categories()     GET  {base}/api/categories     -> { "items": [Category] }
//! fetch_manufacturers()  GET  {base}/api/manufacturers  -> [Manufacturer]
//! upload_image_file(f)   POST {base}/api/upload (multipart "image")
//!                                                      -> { imageUrl, fullSizeImageUrl }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shelf_core::{Category, Manufacturer};
use std::path::Path;

use crate::error::ClientResult;

// =============================================================================
// Wire Types
// =============================================================================

/// Category listing envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPage {
    #[serde(default)]
    pub items: Vec<Category>,
}

/// Paths of the stored thumbnail and full-size image, relative to the
/// backend base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub image_url: String,
    pub full_size_image_url: String,
}

/// An image file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        ImageFile {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Reads an image from disk.
    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(ImageFile::new(file_name, bytes))
    }
}

/// MIME type from the file extension; the backend resizes whatever it gets.
fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// Trait
// =============================================================================

/// Read-only lookups and image upload offered by the backend.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_categories(&self) -> ClientResult<CategoryPage>;

    async fn fetch_manufacturers(&self) -> ClientResult<Vec<Manufacturer>>;

    async fn upload_image_file(&self, file: ImageFile) -> ClientResult<UploadedImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(ImageFile::new("shirt.JPG", vec![]).content_type, "image/jpeg");
        assert_eq!(ImageFile::new("shirt.png", vec![]).content_type, "image/png");
        assert_eq!(
            ImageFile::new("shirt", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_wire_types_decode() {
        let page: CategoryPage =
            serde_json::from_str(r#"{"items":[{"id":"c1","name":"Shirts"}],"total":1}"#).unwrap();
        assert_eq!(page.items.len(), 1);

        let up: UploadedImage = serde_json::from_str(
            r#"{"imageUrl":"/uploads/t.jpg","fullSizeImageUrl":"/uploads/f.jpg"}"#,
        )
        .unwrap();
        assert_eq!(up.full_size_image_url, "/uploads/f.jpg");
    }

    #[tokio::test]
    async fn test_image_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cap.webp");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let file = ImageFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "cap.webp");
        assert_eq!(file.content_type, "image/webp");
        assert_eq!(file.bytes, vec![1, 2, 3]);
    }
}
