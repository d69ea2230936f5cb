//! # Product Form
//!
//! The editable draft behind the "add / edit product" form, its size/stock
//! rows, and the conversion of a validated draft into the record the caller
//! saves.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  new product ──► ProductFormData::new_with_defaults(categories, mans)   │
//! │  edit product ─► ProductFormData::from_product(&product)                │
//! │                        │                                                │
//! │                        ▼                                                │
//! │        apply(FieldUpdate) / SizeList::{add, remove, set_*}              │
//! │                        │      (sync_sizes keeps draft.sizes current)    │
//! │                        ▼                                                │
//! │        finalize(&draft, sizes, has_uploaded_file)                       │
//! │             ├── errors ──► CoreError::InvalidForm(FormErrors)           │
//! │             └── valid ───► ProductPayload (handed to onSave)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is global: the caller owns the draft and the size list and
//! passes them in.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Manufacturer, Product, SizeStock};
use crate::validation::{validate_price, validate_product_form, FormField};

// =============================================================================
// Draft
// =============================================================================

/// Draft of a product as typed into the form.
///
/// `price` is the raw text of the price input; it is parsed at submit time.
/// `sizes` is the JSON text of the size list, kept in step with the live
/// [`SizeList`] through [`ProductFormData::sync_sizes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormData {
    /// Set when editing an existing product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub code: String,
    pub price: String,
    pub category_id: String,
    pub manufacturer_id: String,
    pub sizes: String,
    pub image: String,
    pub full_size_image: String,
    pub is_visible: bool,
}

impl Default for ProductFormData {
    /// Blank form: price `0`, no sizes, visible.
    fn default() -> Self {
        ProductFormData {
            id: None,
            title: String::new(),
            code: String::new(),
            price: "0".to_string(),
            category_id: String::new(),
            manufacturer_id: String::new(),
            sizes: "[]".to_string(),
            image: String::new(),
            full_size_image: String::new(),
            is_visible: true,
        }
    }
}

impl ProductFormData {
    /// Blank form for a new product with the first category and
    /// manufacturer preselected, when there are any.
    pub fn new_with_defaults(categories: &[Category], manufacturers: &[Manufacturer]) -> Self {
        ProductFormData {
            category_id: categories.first().map(|c| c.id.clone()).unwrap_or_default(),
            manufacturer_id: manufacturers
                .first()
                .map(|m| m.id.clone())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Form prefilled from an existing product.
    pub fn from_product(product: &Product) -> CoreResult<Self> {
        Ok(ProductFormData {
            id: Some(product.id.clone()),
            title: product.title.clone(),
            code: product.code.clone(),
            price: product.price.to_string(),
            category_id: product.category_id.clone(),
            manufacturer_id: product.manufacturer_id.clone(),
            sizes: serde_json::to_string(&product.sizes)?,
            image: product.image.clone(),
            full_size_image: product.full_size_image.clone().unwrap_or_default(),
            is_visible: product.is_visible,
        })
    }

    /// Applies one input change and returns the field whose error should be
    /// cleared.
    pub fn apply(&mut self, update: FieldUpdate) -> Option<FormField> {
        let field = update.field();
        match update {
            FieldUpdate::Title(v) => self.title = v,
            FieldUpdate::Code(v) => self.code = v,
            FieldUpdate::Price(v) => self.price = v,
            FieldUpdate::CategoryId(v) => self.category_id = v,
            FieldUpdate::ManufacturerId(v) => self.manufacturer_id = v,
            FieldUpdate::Image(v) => self.image = v,
            FieldUpdate::FullSizeImage(v) => self.full_size_image = v,
            FieldUpdate::IsVisible(v) => self.is_visible = v,
        }
        field
    }

    /// Rewrites `sizes` from the live size list.
    pub fn sync_sizes(&mut self, sizes: &SizeList) -> CoreResult<()> {
        self.sizes = sizes.to_json()?;
        Ok(())
    }

    /// Stores the URLs an image upload produced, replacing both images.
    pub fn set_uploaded_images(&mut self, image: String, full_size_image: String) {
        self.image = image;
        self.full_size_image = full_size_image;
    }
}

/// One edit of one form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Code(String),
    Price(String),
    CategoryId(String),
    ManufacturerId(String),
    Image(String),
    FullSizeImage(String),
    IsVisible(bool),
}

impl FieldUpdate {
    /// The validated field this input feeds, if any.
    pub fn field(&self) -> Option<FormField> {
        match self {
            FieldUpdate::Title(_) => Some(FormField::Title),
            FieldUpdate::Code(_) => Some(FormField::Code),
            FieldUpdate::Price(_) => Some(FormField::Price),
            FieldUpdate::CategoryId(_) => Some(FormField::CategoryId),
            FieldUpdate::ManufacturerId(_) => Some(FormField::ManufacturerId),
            FieldUpdate::Image(_) => Some(FormField::Image),
            FieldUpdate::FullSizeImage(_) => Some(FormField::FullSizeImage),
            FieldUpdate::IsVisible(_) => None,
        }
    }
}

// =============================================================================
// Size List
// =============================================================================

/// The size/stock rows of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeList(Vec<SizeStock>);

impl SizeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(rows: Vec<SizeStock>) -> Self {
        SizeList(rows)
    }

    /// Parses the JSON text stored in [`ProductFormData::sizes`].
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(SizeList(serde_json::from_str(json)?))
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    pub fn as_slice(&self) -> &[SizeStock] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a blank row (empty name, stock 0).
    pub fn add(&mut self) {
        self.0.push(SizeStock::blank());
    }

    pub fn remove(&mut self, index: usize) -> CoreResult<SizeStock> {
        self.check_index(index)?;
        Ok(self.0.remove(index))
    }

    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> CoreResult<()> {
        self.row_mut(index)?.size = name.into();
        Ok(())
    }

    pub fn set_stock(&mut self, index: usize, stock: i64) -> CoreResult<()> {
        self.row_mut(index)?.stock = stock;
        Ok(())
    }

    /// Sets the stock from the raw text of the stock input.
    ///
    /// Reads an optional sign and the leading digits; anything unreadable
    /// becomes 0. Negative values pass through so the validator can
    /// reject them.
    pub fn set_stock_input(&mut self, index: usize, raw: &str) -> CoreResult<()> {
        self.set_stock(index, parse_stock_input(raw))
    }

    fn row_mut(&mut self, index: usize) -> CoreResult<&mut SizeStock> {
        self.check_index(index)?;
        Ok(&mut self.0[index])
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.0.len() {
            return Err(CoreError::IndexOutOfRange {
                collection: "size",
                index,
                len: self.0.len(),
            });
        }
        Ok(())
    }
}

/// `"12"` -> 12, `" -3"` -> -3, `"7pcs"` -> 7, `"4.9"` -> 4, `"x"` -> 0.
fn parse_stock_input(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (sign_len, rest) = match s.as_bytes().first() {
        Some(b'-') | Some(b'+') => (1, &s[1..]),
        _ => (0, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return 0;
    }
    s[..sign_len + digits].parse().unwrap_or(0)
}

// =============================================================================
// Finalized Record
// =============================================================================

/// The product record handed to the caller's save handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub code: String,
    #[ts(as = "f64")]
    pub price: Money,
    pub category_id: String,
    pub manufacturer_id: String,
    /// JSON text of the size list, as the backend stores it.
    pub sizes: String,
    pub image: String,
    pub full_size_image: String,
    pub is_visible: bool,
}

/// Validates the draft and, when it passes, builds the record to save.
///
/// ## Errors
/// - `CoreError::InvalidForm` carrying every failing field
pub fn finalize(
    draft: &ProductFormData,
    sizes: &SizeList,
    has_uploaded_file: bool,
) -> CoreResult<ProductPayload> {
    let errors = validate_product_form(draft, sizes.as_slice(), has_uploaded_file);
    if !errors.is_empty() {
        return Err(CoreError::InvalidForm(errors));
    }

    Ok(ProductPayload {
        id: draft.id.clone(),
        title: draft.title.clone(),
        code: draft.code.clone(),
        price: validate_price(&draft.price)?,
        category_id: draft.category_id.clone(),
        manufacturer_id: draft.manufacturer_id.clone(),
        sizes: sizes.to_json()?,
        image: draft.image.clone(),
        full_size_image: draft.full_size_image.clone(),
        is_visible: draft.is_visible,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
