//! # Product Form Session
//!
//! Live state of the create/edit product dialog.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Form Session                                 │
//! │                                                                         │
//! │  open(api, config, product)                                             │
//! │     │   categories ║ manufacturers  (fetched concurrently)              │
//! │     ├── ok:   draft = from_product | new_with_defaults, errors cleared  │
//! │     └── err:  notice = DROPDOWN_LOAD_FAILED, empty option lists         │
//! │                                                                         │
//! │  update(FieldUpdate) ──► draft field set, that field's error cleared    │
//! │  add_size / remove_size / set_size_* ──► size list + draft.sizes JSON   │
//! │                                                                         │
//! │  select_image_file(f) ──► upload_image()                                │
//! │     ├── ok:   image, fullSizeImage = base_url + returned paths          │
//! │     │         selected file cleared                                     │
//! │     └── err:  file kept, notice = UPLOAD_FAILED                         │
//! │                                                                         │
//! │  submit() ──► validate ──► Ok(ProductPayload) | Err(FormErrors)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use shelf_client::{CatalogApi, ClientConfig, ImageFile};
use shelf_core::{
    finalize, Category, CoreError, CoreResult, FieldUpdate, FormErrors,
    Manufacturer, Product, ProductFormData, ProductPayload, SelectOption, SizeList,
};
use tracing::{debug, info, warn};

use crate::error::{Notice, NoticeCode};

pub struct ProductFormSession {
    api: Arc<dyn CatalogApi>,
    config: ClientConfig,
    categories: Vec<Category>,
    manufacturers: Vec<Manufacturer>,
    form: ProductFormData,
    sizes: SizeList,
    errors: FormErrors,
    image_file: Option<ImageFile>,
    notice: Option<Notice>,
}

impl ProductFormSession {
    /// Opens the form for `product`, or for a new product when `None`.
    ///
    /// A failed lookup does not fail the session: the selects stay empty
    /// and a notice tells the operator.
    pub async fn open(
        api: Arc<dyn CatalogApi>,
        config: ClientConfig,
        product: Option<&Product>,
    ) -> Self {
        let mut session = ProductFormSession {
            api,
            config,
            categories: Vec::new(),
            manufacturers: Vec::new(),
            form: ProductFormData::default(),
            sizes: SizeList::new(),
            errors: FormErrors::new(),
            image_file: None,
            notice: None,
        };

        let loaded = tokio::try_join!(
            session.api.fetch_categories(),
            session.api.fetch_manufacturers()
        );

        match loaded {
            Ok((page, manufacturers)) => {
                session.categories = page.items;
                session.manufacturers = manufacturers;
                info!(
                    product_id = product.map(|p| p.id.as_str()),
                    categories = session.categories.len(),
                    manufacturers = session.manufacturers.len(),
                    "Product form opened"
                );
            }
            Err(err) => {
                session.notice = Some(Notice::dropdown_load_failed(&err));
            }
        }

        let prepared = match product {
            Some(product) => ProductFormData::from_product(product)
                .map(|form| (form, SizeList::from_vec(product.sizes.clone()))),
            None => Ok((
                ProductFormData::new_with_defaults(&session.categories, &session.manufacturers),
                SizeList::new(),
            )),
        };

        match prepared {
            Ok((form, sizes)) => {
                session.form = form;
                session.sizes = sizes;
            }
            Err(err) => session.notice = Some(Notice::internal(&err)),
        }

        session
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn form(&self) -> &ProductFormData {
        &self.form
    }

    pub fn sizes(&self) -> &SizeList {
        &self.sizes
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn image_file(&self) -> Option<&ImageFile> {
        self.image_file.as_ref()
    }

    pub fn category_options(&self) -> Vec<SelectOption> {
        self.categories.iter().map(SelectOption::from).collect()
    }

    pub fn manufacturer_options(&self) -> Vec<SelectOption> {
        self.manufacturers.iter().map(SelectOption::from).collect()
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Applies one input change, clearing the error shown for that field.
    pub fn update(&mut self, update: FieldUpdate) {
        if let Some(field) = self.form.apply(update) {
            self.errors.clear(field);
        }
    }

    pub fn add_size(&mut self) -> CoreResult<()> {
        self.sizes.add();
        self.form.sync_sizes(&self.sizes)
    }

    pub fn remove_size(&mut self, index: usize) -> CoreResult<()> {
        self.sizes.remove(index)?;
        self.form.sync_sizes(&self.sizes)
    }

    pub fn set_size_name(&mut self, index: usize, name: impl Into<String>) -> CoreResult<()> {
        self.sizes.set_name(index, name)?;
        self.form.sync_sizes(&self.sizes)
    }

    /// Sets a size's stock from the raw text of its input.
    pub fn set_size_stock(&mut self, index: usize, raw: &str) -> CoreResult<()> {
        self.sizes.set_stock_input(index, raw)?;
        self.form.sync_sizes(&self.sizes)
    }

    // =========================================================================
    // Image Upload
    // =========================================================================

    /// Selects (or with `None`, deselects) the file to upload.
    pub fn select_image_file(&mut self, file: Option<ImageFile>) {
        self.image_file = file;
    }

    /// Uploads the selected file and points both image fields at the result.
    ///
    /// Returns `true` when an upload happened and succeeded. Without a
    /// selected file this does nothing.
    pub async fn upload_image(&mut self) -> bool {
        let Some(file) = self.image_file.clone() else {
            return false;
        };

        debug!(file_name = %file.file_name, "Uploading product image");
        match self.api.upload_image_file(file).await {
            Ok(uploaded) => {
                let image = self.config.asset_url(&uploaded.image_url);
                let full_size_image = self.config.asset_url(&uploaded.full_size_image_url);
                info!(image = %image, "Product image uploaded");
                self.form.set_uploaded_images(image, full_size_image);
                self.image_file = None;
                if self.notice.as_ref().map(|n| n.code) == Some(NoticeCode::UploadFailed) {
                    self.notice = None;
                }
                true
            }
            Err(err) => {
                self.notice = Some(Notice::upload_failed(&err));
                false
            }
        }
    }

    // =========================================================================
    // Submit
    // =========================================================================

    /// Validates the draft. On success returns the record to save; otherwise
    /// the errors are kept for display and returned.
    pub fn submit(&mut self) -> Result<ProductPayload, FormErrors> {
        let has_file = self.image_file.is_some();
        match finalize(&self.form, &self.sizes, has_file) {
            Ok(payload) => {
                self.errors = FormErrors::new();
                info!(product_id = payload.id.as_deref(), "Product form submitted");
                Ok(payload)
            }
            Err(CoreError::InvalidForm(errors)) => {
                warn!(invalid_fields = errors.len(), "Product form rejected");
                self.errors = errors.clone();
                Err(errors)
            }
            Err(other) => {
                self.notice = Some(Notice::internal(&other));
                Err(self.errors.clone())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shelf_client::{CategoryPage, ClientError, ClientResult, UploadedImage};
    use shelf_core::{FormField, Money, SizeStock, ValidationError};
    use std::sync::Mutex;


    #[derive(Default)]
    struct FakeCatalog {
        fail_lookups: bool,
        fail_upload: bool,
        uploads: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CatalogApi for FakeCatalog {
        async fn fetch_categories(&self) -> ClientResult<CategoryPage> {
            if self.fail_lookups {
                return Err(ClientError::UnexpectedStatus {
                    endpoint: "/api/categories".to_string(),
                    status: 500,
                });
            }
            Ok(CategoryPage {
                items: vec![
                    Category {
                        id: "c1".to_string(),
                        name: "Shirts".to_string(),
                    },
                    Category {
                        id: "c2".to_string(),
                        name: "Caps".to_string(),
                    },
                ],
            })
        }

        async fn fetch_manufacturers(&self) -> ClientResult<Vec<Manufacturer>> {
            Ok(vec![Manufacturer {
                id: "m1".to_string(),
                name: "Acme".to_string(),
            }])
        }

        async fn upload_image_file(&self, file: ImageFile) -> ClientResult<UploadedImage> {
            self.uploads.lock().unwrap().push(file.file_name.clone());
            if self.fail_upload {
                return Err(ClientError::UnexpectedStatus {
                    endpoint: "/api/upload".to_string(),
                    status: 500,
                });
            }
            Ok(UploadedImage {
                image_url: "/uploads/t_1.jpg".to_string(),
                full_size_image_url: "/uploads/f_1.jpg".to_string(),
            })
        }
    }

    fn product() -> Product {
        Product {
            id: "p-1".to_string(),
            title: "Tee".to_string(),
            code: "TEE-1".to_string(),
            category_id: "c2".to_string(),
            manufacturer_id: "m1".to_string(),
            price: Money::from_cents(1999),
            sizes: vec![SizeStock {
                size: "M".to_string(),
                stock: 4,
            }],
            image: "http://x/t.jpg".to_string(),
            full_size_image: None,
            is_visible: false,
        }
    }

    async fn open_new(api: FakeCatalog) -> ProductFormSession {
        ProductFormSession::open(Arc::new(api), ClientConfig::default(), None).await
    }

    #[tokio::test]
    async fn test_open_new_preselects_first_options() {
        let session = open_new(FakeCatalog::default()).await;

        assert!(session.notice().is_none());
        assert_eq!(session.form().category_id, "c1");
        assert_eq!(session.form().manufacturer_id, "m1");
        assert_eq!(session.form().price, "0");
        assert!(session.form().is_visible);
        assert_eq!(session.category_options().len(), 2);
        assert_eq!(session.manufacturer_options()[0].label, "Acme");
    }

    #[tokio::test]
    async fn test_open_existing_prefills_draft() {
        let p = product();
        let session =
            ProductFormSession::open(Arc::new(FakeCatalog::default()), ClientConfig::default(), Some(&p))
                .await;

        assert_eq!(session.form().id.as_deref(), Some("p-1"));
        assert_eq!(session.form().category_id, "c2");
        assert_eq!(session.form().full_size_image, "");
        assert_eq!(session.sizes().len(), 1);
        assert!(!session.form().is_visible);
    }

    #[tokio::test]
    async fn test_open_lookup_failure_sets_generic_notice() {
        let session = open_new(FakeCatalog {
            fail_lookups: true,
            ..Default::default()
        })
        .await;

        let notice = session.notice().unwrap();
        assert_eq!(notice.code, NoticeCode::DropdownLoadFailed);
        assert!(session.category_options().is_empty());
        assert!(session.manufacturer_options().is_empty());
        assert_eq!(session.form().category_id, "");
    }

    #[tokio::test]
    async fn test_update_clears_that_fields_error() {
        let mut session = open_new(FakeCatalog::default()).await;

        let errors = session.submit().unwrap_err();
        assert!(errors.contains(FormField::Title));
        assert!(errors.contains(FormField::Code));

        session.update(FieldUpdate::Title("Hoodie".to_string()));
        assert!(!session.errors().contains(FormField::Title));
        assert!(session.errors().contains(FormField::Code));
    }

    #[tokio::test]
    async fn test_size_edits_keep_json_in_sync() {
        let mut session = open_new(FakeCatalog::default()).await;

        session.add_size().unwrap();
        session.set_size_name(0, "XL").unwrap();
        session.set_size_stock(0, "7abc").unwrap();
        assert_eq!(session.form().sizes, r#"[{"size":"XL","stock":7}]"#);

        session.remove_size(0).unwrap();
        assert_eq!(session.form().sizes, "[]");
        assert!(session.remove_size(0).is_err());
    }

    #[tokio::test]
    async fn test_upload_sets_both_urls_and_clears_file() {
        let mut session = open_new(FakeCatalog::default()).await;
        session.select_image_file(Some(ImageFile::new("tee.jpg", vec![1, 2])));

        assert!(session.upload_image().await);
        assert_eq!(session.form().image, "http://localhost:3001/uploads/t_1.jpg");
        assert_eq!(
            session.form().full_size_image,
            "http://localhost:3001/uploads/f_1.jpg"
        );
        assert!(session.image_file().is_none());
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_file_and_sets_notice() {
        let mut session = open_new(FakeCatalog {
            fail_upload: true,
            ..Default::default()
        })
        .await;
        session.select_image_file(Some(ImageFile::new("tee.jpg", vec![1])));

        assert!(!session.upload_image().await);
        assert!(session.image_file().is_some());
        assert_eq!(session.form().image, "");
        assert_eq!(session.notice().unwrap().code, NoticeCode::UploadFailed);
    }

    #[tokio::test]
    async fn test_retry_after_failed_upload_clears_upload_notice() {
        let api = Arc::new(FakeCatalog {
            fail_upload: true,
            ..Default::default()
        });
        let mut session =
            ProductFormSession::open(api, ClientConfig::default(), None).await;
        session.select_image_file(Some(ImageFile::new("tee.jpg", vec![1])));
        assert!(!session.upload_image().await);
        assert_eq!(session.notice().unwrap().code, NoticeCode::UploadFailed);

        session.api = Arc::new(FakeCatalog::default());
        assert!(session.upload_image().await);
        assert!(session.notice().is_none());
    }

    #[tokio::test]
    async fn test_successful_upload_keeps_dropdown_notice() {
        let mut session = open_new(FakeCatalog {
            fail_lookups: true,
            ..Default::default()
        })
        .await;
        session.select_image_file(Some(ImageFile::new("tee.jpg", vec![1])));

        assert!(session.upload_image().await);
        assert_eq!(
            session.notice().unwrap().code,
            NoticeCode::DropdownLoadFailed
        );
    }

    #[tokio::test]
    async fn test_upload_without_file_is_a_no_op() {
        let api = Arc::new(FakeCatalog::default());
        let mut session =
            ProductFormSession::open(api.clone(), ClientConfig::default(), None).await;

        assert!(!session.upload_image().await);
        assert!(api.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_valid_draft_returns_payload() {
        let mut session = open_new(FakeCatalog::default()).await;
        session.update(FieldUpdate::Title("Hoodie".to_string()));
        session.update(FieldUpdate::Code("H-01".to_string()));
        session.update(FieldUpdate::Price("25.5".to_string()));
        session.update(FieldUpdate::Image("https://cdn.example.com/h.jpg".to_string()));
        session.update(FieldUpdate::FullSizeImage(
            "https://cdn.example.com/h_full.jpg".to_string(),
        ));

        let payload = session.submit().unwrap();
        assert_eq!(payload.price, Money::from_cents(2550));
        assert_eq!(payload.category_id, "c1");
        assert!(session.errors().is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_url_and_pending_file_conflicts() {
        let mut session = open_new(FakeCatalog::default()).await;
        session.update(FieldUpdate::Image("https://cdn.example.com/h.jpg".to_string()));
        session.select_image_file(Some(ImageFile::new("h.jpg", vec![1])));

        let errors = session.submit().unwrap_err();
        assert_eq!(
            errors.get(FormField::Image),
            Some(&ValidationError::ConflictingImageSource)
        );
        assert_eq!(session.errors(), &errors);
    }
}
