//! # HTTP Catalog API
//!
//! `reqwest` implementation of [`CatalogApi`].
//!
//! Every call is a single request: no retries, no caching. A non-2xx
//! answer becomes `ClientError::UnexpectedStatus`; the caller decides what
//! the operator sees.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shelf_core::Manufacturer;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::api::{CatalogApi, CategoryPage, ImageFile, UploadedImage};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Multipart field name the upload endpoint reads.
const UPLOAD_FIELD: &str = "image";

pub struct HttpCatalogApi {
    client: Client,
    categories_url: Url,
    manufacturers_url: Url,
    upload_url: Url,
}

impl HttpCatalogApi {
    /// Builds the client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(HttpCatalogApi {
            client,
            categories_url: config.endpoint(&config.api.categories_path)?,
            manufacturers_url: config.endpoint(&config.api.manufacturers_path)?,
            upload_url: config.endpoint(&config.api.upload_path)?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> ClientResult<T> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: &Url, response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                endpoint: url.path().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_categories(&self) -> ClientResult<CategoryPage> {
        let page: CategoryPage = self.get_json(&self.categories_url).await?;
        debug!(count = page.items.len(), "Categories fetched");
        Ok(page)
    }

    async fn fetch_manufacturers(&self) -> ClientResult<Vec<Manufacturer>> {
        let manufacturers: Vec<Manufacturer> = self.get_json(&self.manufacturers_url).await?;
        debug!(count = manufacturers.len(), "Manufacturers fetched");
        Ok(manufacturers)
    }

    async fn upload_image_file(&self, file: ImageFile) -> ClientResult<UploadedImage> {
        debug!(
            url = %self.upload_url,
            file_name = %file.file_name,
            bytes = file.bytes.len(),
            "Uploading image"
        );

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;
        Self::decode(&self.upload_url, response).await
    }
}
