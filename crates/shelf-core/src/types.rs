//! # Domain Types
//!
//! Records exchanged with the backend and edited by the admin screens.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐             │
//! │  │   SubmittedSale      │ 1      * │   SaleItemRecord     │             │
//! │  │  ──────────────────  │─────────►│  ──────────────────  │             │
//! │  │  id                  │          │  unit_price?         │             │
//! │  │  payment_method      │          │  quantity?           │             │
//! │  │  total_amount  ◄─────┼── Σ ─────│  discount?           │             │
//! │  └──────────────────────┘          └──────────────────────┘             │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐             │
//! │  │      Product         │ 1      * │     SizeStock        │             │
//! │  │  ──────────────────  │─────────►│  ──────────────────  │             │
//! │  │  category_id ────────┼──► Category                     │             │
//! │  │  manufacturer_id ────┼──► Manufacturer                 │             │
//! │  └──────────────────────┘          └──────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records use camelCase on the wire, matching the backend's JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::serde_helpers::{lenient_count, lenient_money};

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    /// Every selectable method, in the order the editor lists them.
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Cash, PaymentMethod::Card];

    /// Wire value, also used as the translation key suffix
    /// (`paymentMethods.Cash`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// One line of a sale.
///
/// The descriptive fields are snapshots taken when the sale was rung up.
/// The numeric fields are optional because the edit table may hand back
/// blanks; a missing number counts as zero in every calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Price of one unit at the time of sale.
    #[serde(default, with = "lenient_money")]
    #[ts(as = "Option<f64>")]
    pub unit_price: Option<Money>,

    /// Units sold.
    #[serde(default, with = "lenient_count")]
    #[ts(as = "Option<f64>")]
    pub quantity: Option<i64>,

    /// Absolute discount on the whole line (not per unit).
    #[serde(default, with = "lenient_money")]
    #[ts(as = "Option<f64>")]
    pub discount: Option<Money>,
}

impl SaleItemRecord {
    /// Creates a bare line with the three numbers set.
    pub fn new(unit_price: Money, quantity: i64, discount: Money) -> Self {
        SaleItemRecord {
            unit_price: Some(unit_price),
            quantity: Some(quantity),
            discount: Some(discount),
            ..Default::default()
        }
    }

    /// `unit_price × quantity − discount`, with missing numbers as zero.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::{Money, SaleItemRecord};
    ///
    /// let line = SaleItemRecord::new(Money::from_cents(1999), 3, Money::from_cents(10));
    /// assert_eq!(line.line_total(), Money::from_cents(5987));
    ///
    /// let blank = SaleItemRecord::default();
    /// assert_eq!(blank.line_total(), Money::zero());
    /// ```
    pub fn line_total(&self) -> Money {
        let unit_price = self.unit_price.unwrap_or_default();
        let quantity = self.quantity.unwrap_or(0);
        let discount = self.discount.unwrap_or_default();
        unit_price.multiply_quantity(quantity) - discount
    }
}

// =============================================================================
// Submitted Sale
// =============================================================================

/// A recorded sale as stored by the backend.
///
/// ## Invariant
/// `total_amount == Σ items[i].line_total()`. Only [`crate::sale::SaleDraft`]
/// mutates a sale, and it restores the invariant after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedSale {
    pub id: String,

    #[ts(as = "String")]
    pub submission_date: DateTime<Utc>,

    /// The backend sends this one in snake_case.
    #[serde(rename = "submitted_by_username", default)]
    pub submitted_by_username: Option<String>,

    pub payment_method: PaymentMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub items: Vec<SaleItemRecord>,

    #[ts(as = "f64")]
    pub total_amount: Money,
}

impl SubmittedSale {
    /// First eight characters of the id, as shown in the editor title.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }

    /// Username of the cashier, or `"N/A"` when the backend has none.
    pub fn submitted_by(&self) -> &str {
        self.submitted_by_username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("N/A")
    }
}

// =============================================================================
// Catalog Lookups
// =============================================================================

/// A product category, as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A product manufacturer, as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
}

/// `{ value, label }` entry for a select input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl From<&Category> for SelectOption {
    fn from(c: &Category) -> Self {
        SelectOption {
            value: c.id.clone(),
            label: c.name.clone(),
        }
    }
}

impl From<&Manufacturer> for SelectOption {
    fn from(m: &Manufacturer) -> Self {
        SelectOption {
            value: m.id.clone(),
            label: m.name.clone(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// Stock held for one size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizeStock {
    pub size: String,
    pub stock: i64,
}

impl SizeStock {
    /// A fresh row as added by the "Add size" button.
    pub fn blank() -> Self {
        SizeStock {
            size: String::new(),
            stock: 0,
        }
    }
}

/// A catalog product as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub code: String,
    pub category_id: String,
    pub manufacturer_id: String,

    #[ts(as = "f64")]
    pub price: Money,

    #[serde(default)]
    pub sizes: Vec<SizeStock>,

    /// Thumbnail URL.
    pub image: String,

    #[serde(default)]
    pub full_size_image: Option<String>,

    pub is_visible: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cash).unwrap(), "\"Cash\"");
        let card: PaymentMethod = serde_json::from_str("\"Card\"").unwrap();
        assert_eq!(card, PaymentMethod::Card);
        assert_eq!(PaymentMethod::ALL.len(), 2);
    }

    #[test]
    fn test_line_total_with_missing_fields() {
        let item = SaleItemRecord {
            unit_price: Some(Money::from_cents(500)),
            quantity: None,
            discount: Some(Money::from_cents(100)),
            ..Default::default()
        };
        assert_eq!(item.line_total().cents(), -100);
    }

    #[test]
    fn test_sale_decodes_backend_json() {
        let json = r#"{
            "id": "3f2a9c10-aaaa-bbbb-cccc-000000000001",
            "submissionDate": "2024-05-01T10:15:00Z",
            "submitted_by_username": "eva",
            "paymentMethod": "Card",
            "items": [
                { "productId": "p1", "title": "Tee", "unitPrice": 12.5, "quantity": 2, "discount": 1 },
                { "productId": "p2", "unitPrice": "3.10", "quantity": "" }
            ],
            "totalAmount": 24
        }"#;

        let sale: SubmittedSale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.short_id(), "3f2a9c10");
        assert_eq!(sale.submitted_by(), "eva");
        assert_eq!(sale.notes, None);
        assert_eq!(sale.items[0].line_total(), Money::from_cents(2400));
        assert_eq!(sale.items[1].quantity, None);
        assert_eq!(sale.total_amount, Money::from_cents(2400));
    }

    #[test]
    fn test_short_id_and_submitted_by_fallbacks() {
        let sale = SubmittedSale {
            id: "abc".to_string(),
            submission_date: Utc::now(),
            submitted_by_username: Some(String::new()),
            payment_method: PaymentMethod::Cash,
            notes: None,
            items: vec![],
            total_amount: Money::zero(),
        };
        assert_eq!(sale.short_id(), "abc");
        assert_eq!(sale.submitted_by(), "N/A");
    }

    #[test]
    fn test_select_option_from_lookups() {
        let cat = Category {
            id: "c1".to_string(),
            name: "Shirts".to_string(),
        };
        let opt = SelectOption::from(&cat);
        assert_eq!(opt.value, "c1");
        assert_eq!(opt.label, "Shirts");
    }
}
