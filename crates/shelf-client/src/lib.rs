//! # shelf-client: Backend Collaborators
//!
//! Typed access to the REST backend the admin screens read from.
//!
//! ## Module Organization
//! ```text
//! shelf_client/
//! ├── lib.rs      ◄─── You are here
//! ├── api.rs      ◄─── CatalogApi trait + wire types
//! ├── http.rs     ◄─── reqwest implementation
//! ├── config.rs   ◄─── ClientConfig (TOML + environment)
//! └── error.rs    ◄─── ClientError
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use shelf_client::{CatalogApi, ClientConfig, HttpCatalogApi};
//!
//! # async fn demo() -> shelf_client::ClientResult<()> {
//! let config = ClientConfig::load_or_default(None);
//! let api = HttpCatalogApi::new(&config)?;
//! let categories = api.fetch_categories().await?.items;
//! println!("{} categories", categories.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{CatalogApi, CategoryPage, ImageFile, UploadedImage};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpCatalogApi;
