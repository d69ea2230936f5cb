//! # Validation Module
//!
//! Submit-time validation of the product form.
//!
//! ## Check Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_product_form(draft, sizes, has_uploaded_file)                 │
//! │                                                                         │
//! │  1. Required      title, code, categoryId, manufacturerId               │
//! │                   └── blank ───────────────► MissingField               │
//! │  2. Price         not a number, or <= 0 ───► InvalidNumber              │
//! │  3. Image source  no URL and no file ──────► MissingImageSource         │
//! │                   URL and file ────────────► ConflictingImageSource     │
//! │  4. URLs          image unparsable ────────► InvalidUrl                 │
//! │                   URL path only:                                        │
//! │                     fullSizeImage blank ───► MissingField               │
//! │                     fullSizeImage bad ─────► InvalidUrl                 │
//! │  5. Sizes         blank name / stock < 0 ──► InvalidSizeEntry           │
//! │                   else duplicate name ─────► DuplicateSizeName          │
//! │                                                                         │
//! │  Groups never short-circuit each other: every failing field is          │
//! │  reported in one pass. Inside group 5 the duplicate check only runs     │
//! │  when every row is well-formed.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::product_form::ProductFormData;
//! use shelf_core::validation::{validate_product_form, FormField};
//! use shelf_core::ValidationError;
//!
//! let mut draft = ProductFormData::default();
//! draft.code = "TS-01".into();
//! draft.category_id = "c1".into();
//! draft.manufacturer_id = "m1".into();
//! draft.price = "10".into();
//! draft.image = "https://cdn.example.com/t.jpg".into();
//! draft.full_size_image = "https://cdn.example.com/f.jpg".into();
//!
//! let errors = validate_product_form(&draft, &[], false);
//! assert_eq!(errors.len(), 1);
//! assert_eq!(
//!     errors.get(FormField::Title),
//!     Some(&ValidationError::MissingField { field: FormField::Title })
//! );
//! ```

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::product_form::ProductFormData;
use crate::types::SizeStock;

/// Result type for single-field checks.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Form Fields
// =============================================================================

/// The product form inputs that can carry an error.
///
/// Serialized with the same names the form inputs use (`categoryId`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Title,
    Code,
    CategoryId,
    ManufacturerId,
    Price,
    Image,
    FullSizeImage,
    Sizes,
}

impl FormField {
    /// Input name, as used for error keys.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Code => "code",
            FormField::CategoryId => "categoryId",
            FormField::ManufacturerId => "manufacturerId",
            FormField::Price => "price",
            FormField::Image => "image",
            FormField::FullSizeImage => "fullSizeImage",
            FormField::Sizes => "sizes",
        }
    }

    /// Human label used in messages.
    pub const fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Code => "Code",
            FormField::CategoryId => "Category",
            FormField::ManufacturerId => "Manufacturer",
            FormField::Price => "Price",
            FormField::Image => "Image URL (Thumbnail)",
            FormField::FullSizeImage => "Image URL (Full Size)",
            FormField::Sizes => "Sizes",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Form Errors
// =============================================================================

/// Field-keyed validation result. Empty means the form is valid.
///
/// Serializes as `{ "title": "Title is required", ... }` for the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, ValidationError>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: FormField, error: ValidationError) {
        self.0.insert(field, error);
    }

    /// Records the error of a failed check, if any.
    pub fn record(&mut self, field: FormField, check: ValidationResult<()>) {
        if let Err(error) = check {
            self.insert(field, error);
        }
    }

    pub fn get(&self, field: FormField) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drops the error of a field the operator just edited.
    pub fn clear(&mut self, field: FormField) -> Option<ValidationError> {
        self.0.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &ValidationError)> {
        self.0.iter().map(|(field, err)| (*field, err))
    }
}

impl Serialize for FormErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, error) in &self.0 {
            map.serialize_entry(field.as_str(), &error.to_string())?;
        }
        map.end()
    }
}

// =============================================================================
// Single-Field Checks
// =============================================================================

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Fails with `MissingField` when the value is blank or whitespace-only.
pub fn validate_required(field: FormField, value: &str) -> ValidationResult<()> {
    if is_blank(value) {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

/// Parses the price input and requires it to be greater than zero.
///
/// Amounts are rounded to the cent first, so `"0.001"` is rejected.
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_price;
///
/// assert_eq!(validate_price("12.50").unwrap().cents(), 1250);
/// assert!(validate_price("0").is_err());
/// assert!(validate_price("-3").is_err());
/// assert!(validate_price("twelve").is_err());
/// ```
pub fn validate_price(input: &str) -> ValidationResult<Money> {
    match Money::parse_major(input) {
        Some(price) if price.is_positive() => Ok(price),
        _ => Err(ValidationError::InvalidNumber {
            field: FormField::Price,
        }),
    }
}

/// Fails with `InvalidUrl` unless the value parses as an absolute URL.
pub fn validate_url(field: FormField, value: &str) -> ValidationResult<()> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidUrl { field })
}

/// Checks the size/stock rows.
///
/// The duplicate check only runs when every row is well-formed, so a list
/// that has both problems reports `InvalidSizeEntry` alone.
pub fn validate_sizes(sizes: &[SizeStock]) -> ValidationResult<()> {
    if sizes.iter().any(|s| is_blank(&s.size) || s.stock < 0) {
        return Err(ValidationError::InvalidSizeEntry);
    }

    let mut seen = HashSet::with_capacity(sizes.len());
    for s in sizes {
        if !seen.insert(s.size.trim().to_lowercase()) {
            return Err(ValidationError::DuplicateSizeName);
        }
    }

    Ok(())
}

/// Image-source exclusivity plus URL well-formedness.
///
/// ```text
///                 has_uploaded_file
///                  no          yes
/// image URL  no    Missing     ok (the upload fills both URLs)
///            yes   URL path    Conflicting
/// ```
fn validate_images(draft: &ProductFormData, has_uploaded_file: bool, errors: &mut FormErrors) {
    let has_url = !is_blank(&draft.image);

    match (has_url, has_uploaded_file) {
        (false, false) => errors.insert(FormField::Image, ValidationError::MissingImageSource),
        (true, true) => errors.insert(FormField::Image, ValidationError::ConflictingImageSource),
        (false, true) => {}
        (true, false) => {
            errors.record(FormField::Image, validate_url(FormField::Image, &draft.image));
            errors.record(
                FormField::FullSizeImage,
                validate_required(FormField::FullSizeImage, &draft.full_size_image)
                    .and_then(|_| validate_url(FormField::FullSizeImage, &draft.full_size_image)),
            );
        }
    }
}

// =============================================================================
// Product Form Validator
// =============================================================================

/// Validates a product draft at submit time.
///
/// `sizes` is the live size list (the draft's `sizes` text is only its
/// serialized copy). `has_uploaded_file` is true while an image file is
/// selected but not yet uploaded.
///
/// Returns every failing field; an empty map means the draft may be saved.
pub fn validate_product_form(
    draft: &ProductFormData,
    sizes: &[SizeStock],
    has_uploaded_file: bool,
) -> FormErrors {
    let mut errors = FormErrors::new();

    for (field, value) in [
        (FormField::Title, &draft.title),
        (FormField::Code, &draft.code),
        (FormField::CategoryId, &draft.category_id),
        (FormField::ManufacturerId, &draft.manufacturer_id),
    ] {
        errors.record(field, validate_required(field, value));
    }

    errors.record(FormField::Price, validate_price(&draft.price).map(|_| ()));

    validate_images(draft, has_uploaded_file, &mut errors);

    errors.record(FormField::Sizes, validate_sizes(sizes));

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn size(name: &str, stock: i64) -> SizeStock {
        SizeStock {
            size: name.to_string(),
            stock,
        }
    }

    fn valid_draft() -> ProductFormData {
        ProductFormData {
            title: "Linen Shirt".to_string(),
            code: "LS-01".to_string(),
            category_id: "cat_shirts".to_string(),
            manufacturer_id: "man_acme".to_string(),
            price: "10".to_string(),
            image: "https://cdn.example.com/ls-01.jpg".to_string(),
            full_size_image: "https://cdn.example.com/ls-01-full.jpg".to_string(),
            ..Default::default()
        }
    }

    fn valid_sizes() -> Vec<SizeStock> {
        vec![size("M", 4)]
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        let errors = validate_product_form(&valid_draft(), &valid_sizes(), false);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_empty_size_list_is_valid() {
        assert!(validate_product_form(&valid_draft(), &[], false).is_empty());
    }

    #[test]
    fn test_blank_title_reports_only_title() {
        let mut draft = valid_draft();
        draft.title = String::new();

        let errors = validate_product_form(&draft, &valid_sizes(), false);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::Title),
            Some(&ValidationError::MissingField {
                field: FormField::Title
            })
        );
    }

    #[test]
    fn test_whitespace_only_required_fields() {
        let mut draft = valid_draft();
        draft.code = "   ".to_string();
        draft.category_id = " ".to_string();
        draft.manufacturer_id = "\t".to_string();

        let errors = validate_product_form(&draft, &valid_sizes(), false);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(FormField::Code));
        assert!(errors.contains(FormField::CategoryId));
        assert!(errors.contains(FormField::ManufacturerId));
    }

    #[test]
    fn test_price_must_be_positive_number() {
        for bad in ["", "0", "-1", "abc", "0.001", "NaN"] {
            let mut draft = valid_draft();
            draft.price = bad.to_string();

            let errors = validate_product_form(&draft, &valid_sizes(), false);
            assert_eq!(errors.len(), 1, "price {bad:?}");
            assert_eq!(
                errors.get(FormField::Price),
                Some(&ValidationError::InvalidNumber {
                    field: FormField::Price
                })
            );
        }

        assert_eq!(validate_price(" 0.01 ").map(|m| m.cents()), Ok(1));
    }

    #[test]
    fn test_url_and_file_conflict() {
        let errors = validate_product_form(&valid_draft(), &valid_sizes(), true);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::Image),
            Some(&ValidationError::ConflictingImageSource)
        );
    }

    #[test]
    fn test_missing_image_source() {
        let mut draft = valid_draft();
        draft.image = "  ".to_string();
        draft.full_size_image = String::new();

        let errors = validate_product_form(&draft, &valid_sizes(), false);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::Image),
            Some(&ValidationError::MissingImageSource)
        );
    }

    #[test]
    fn test_file_only_skips_url_checks() {
        let mut draft = valid_draft();
        draft.image = String::new();
        draft.full_size_image = "not a url".to_string();

        assert!(validate_product_form(&draft, &valid_sizes(), true).is_empty());
    }

    #[test]
    fn test_invalid_thumbnail_url() {
        let mut draft = valid_draft();
        draft.image = "cdn.example.com/ls-01.jpg".to_string();

        let errors = validate_product_form(&draft, &valid_sizes(), false);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::Image),
            Some(&ValidationError::InvalidUrl {
                field: FormField::Image
            })
        );
    }

    #[test]
    fn test_full_size_required_on_url_path() {
        let mut draft = valid_draft();
        draft.full_size_image = " ".to_string();

        let errors = validate_product_form(&draft, &valid_sizes(), false);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::FullSizeImage),
            Some(&ValidationError::MissingField {
                field: FormField::FullSizeImage
            })
        );

        draft.full_size_image = "::::".to_string();
        let errors = validate_product_form(&draft, &valid_sizes(), false);
        assert_eq!(
            errors.get(FormField::FullSizeImage),
            Some(&ValidationError::InvalidUrl {
                field: FormField::FullSizeImage
            })
        );
    }

    #[test]
    fn test_duplicate_sizes_ignore_case_and_spaces() {
        let sizes = vec![size("S", 5), size(" s ", 3)];
        let errors = validate_product_form(&valid_draft(), &sizes, false);
        assert_eq!(
            errors.get(FormField::Sizes),
            Some(&ValidationError::DuplicateSizeName)
        );
    }

    #[test]
    fn test_invalid_size_entry_hides_duplicates() {
        let sizes = vec![size("", 5), size("M", 1), size("m", 2)];
        assert_eq!(validate_sizes(&sizes), Err(ValidationError::InvalidSizeEntry));

        let sizes = vec![size("L", -1), size("L", 1)];
        assert_eq!(validate_sizes(&sizes), Err(ValidationError::InvalidSizeEntry));
    }

    #[test]
    fn test_groups_are_reported_together() {
        let draft = ProductFormData::default();
        let errors = validate_product_form(&draft, &[size("", 0)], false);

        let fields: Vec<FormField> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![
                FormField::Title,
                FormField::Code,
                FormField::CategoryId,
                FormField::ManufacturerId,
                FormField::Price,
                FormField::Image,
                FormField::Sizes,
            ]
        );
    }

    #[test]
    fn test_form_errors_serialize_as_messages() {
        let mut errors = FormErrors::new();
        errors.insert(FormField::Sizes, ValidationError::DuplicateSizeName);
        errors.insert(
            FormField::CategoryId,
            ValidationError::MissingField {
                field: FormField::CategoryId,
            },
        );

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["sizes"], "Size names must be unique");
        assert_eq!(json["categoryId"], "Category is required");

        assert!(errors.clear(FormField::Sizes).is_some());
        assert_eq!(errors.len(), 1);
    }
}
