//! # Sale Editing
//!
//! Total recalculation and the in-memory draft used to edit a recorded
//! sale.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Editing a Sale                                   │
//! │                                                                         │
//! │  backend sale ──► SaleDraft::new(sale) ──► recompute() ──► total       │
//! │                          │                                              │
//! │       update_item(i, item) ──┐                                          │
//! │       remove_item(i) ────────┼──► recompute() ──► total                 │
//! │                              │                                          │
//! │       set_payment_method ────┤    (no effect on the total)              │
//! │       set_notes ─────────────┘                                          │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                 into_sale() ──► onSave(sale)                            │
//! │                                                                         │
//! │  INVARIANT: after every call above,                                    │
//! │    sale.total_amount == Σ (unit_price × quantity − discount)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, SaleItemRecord, SubmittedSale};

// =============================================================================
// Recalculation
// =============================================================================

/// Sums `unit_price × quantity − discount` over the items.
///
/// Missing numbers count as zero. An empty list totals zero.
///
/// ## Example
/// ```rust
/// use shelf_core::sale::recompute;
/// use shelf_core::{Money, SaleItemRecord};
///
/// let items = vec![
///     SaleItemRecord::new(Money::from_cents(1250), 2, Money::from_cents(100)),
///     SaleItemRecord::new(Money::from_cents(300), 1, Money::zero()),
/// ];
/// assert_eq!(recompute(&items), Money::from_cents(2700));
/// assert_eq!(recompute(&[]), Money::zero());
/// ```
pub fn recompute(items: &[SaleItemRecord]) -> Money {
    items.iter().map(SaleItemRecord::line_total).sum()
}

// =============================================================================
// Sale Draft
// =============================================================================

/// An edited copy of a recorded sale.
///
/// The draft owns its copy; the source record is untouched until the caller
/// saves the result of [`SaleDraft::into_sale`]. Closing the editor just
/// drops the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    sale: SubmittedSale,
}

impl SaleDraft {
    /// Opens a draft. The stored total is recomputed right away, so a
    /// stale total from the backend never reaches the editor.
    pub fn new(sale: SubmittedSale) -> Self {
        let mut draft = SaleDraft { sale };
        draft.refresh_total();
        draft
    }

    /// Current state of the edited sale.
    pub fn sale(&self) -> &SubmittedSale {
        &self.sale
    }

    pub fn items(&self) -> &[SaleItemRecord] {
        &self.sale.items
    }

    pub fn total(&self) -> Money {
        self.sale.total_amount
    }

    /// Replaces the line at `index`.
    pub fn update_item(&mut self, index: usize, item: SaleItemRecord) -> CoreResult<()> {
        self.check_index(index)?;
        self.sale.items[index] = item;
        self.refresh_total();
        Ok(())
    }

    /// Removes the line at `index` and returns it.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<SaleItemRecord> {
        self.check_index(index)?;
        let removed = self.sale.items.remove(index);
        self.refresh_total();
        Ok(removed)
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.sale.payment_method = method;
    }

    /// Sets the notes; an empty string clears them.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.sale.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    /// Finishes editing and yields the whole replacement sale.
    pub fn into_sale(self) -> SubmittedSale {
        self.sale
    }

    fn refresh_total(&mut self) {
        self.sale.total_amount = recompute(&self.sale.items);
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        let len = self.sale.items.len();
        if index >= len {
            return Err(CoreError::IndexOutOfRange {
                collection: "sale item",
                index,
                len,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
