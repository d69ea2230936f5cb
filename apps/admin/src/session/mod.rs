//! # Sessions
//!
//! Stateful editors that sit between the UI and the pure drafts in
//! `shelf-core`, adding the backend calls a draft cannot make itself.
//!
//! Sale editing needs no backend lookups, so it uses
//! [`shelf_core::SaleDraft`] directly.

pub mod product_form;

pub use product_form::ProductFormSession;
