//! # shelf-core: Pure Business Logic for the Shelf POS admin
//!
//! Everything the admin screens compute lives here as plain functions over
//! owned data: no I/O, no global state, no async.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shelf POS Admin Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Admin UI (forms, modals, tables)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            apps/admin: sessions, notices, CLI                   │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────┐  ┌────────────▼────────────────┐  │
//! │  │   ★ shelf-core (THIS CRATE) ★   │  │  shelf-client (REST, I/O)   │  │
//! │  │                                 │  │  categories, manufacturers, │  │
//! │  │  types   money   sale           │  │  image upload               │  │
//! │  │  validation      product_form   │  └─────────────────────────────┘  │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records exchanged with the backend (sale, product, lookups)
//! - [`money`] - Integer-cent `Money`
//! - [`sale`] - Sale total recalculation and the sale edit draft
//! - [`product_form`] - Product draft, size rows, finalization
//! - [`validation`] - Product form validator and field-keyed errors
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::sale::SaleDraft;
//! use shelf_core::{Money, PaymentMethod, SaleItemRecord, SubmittedSale};
//!
//! let sale = SubmittedSale {
//!     id: "9b1c7e22-0d5f".into(),
//!     submission_date: chrono::Utc::now(),
//!     submitted_by_username: None,
//!     payment_method: PaymentMethod::Cash,
//!     notes: None,
//!     items: vec![
//!         SaleItemRecord::new(Money::from_cents(1250), 2, Money::from_cents(100)),
//!         SaleItemRecord::new(Money::from_cents(300), 1, Money::zero()),
//!     ],
//!     total_amount: Money::zero(),
//! };
//!
//! let mut draft = SaleDraft::new(sale);
//! assert_eq!(draft.total(), Money::from_cents(2700));
//!
//! draft.remove_item(1).unwrap();
//! assert_eq!(draft.total(), Money::from_cents(2400));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product_form;
pub mod sale;
pub mod serde_helpers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product_form::{finalize, FieldUpdate, ProductFormData, ProductPayload, SizeList};
pub use sale::{recompute, SaleDraft};
pub use types::*;
pub use validation::{validate_product_form, FormErrors, FormField};
