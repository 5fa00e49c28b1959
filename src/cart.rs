//! Cart
//!
//! The pure domain layer: an ordered sequence of cart lines with
//! quantity-merge and stock-clamping semantics and totals derived on read.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::ProductId;

/// Errors related to positional cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No line exists at the given position.
    #[error("Cart line {0} not found")]
    LineNotFound(usize),
}

/// One product's presence in the cart.
///
/// Everything except `quantity` is a snapshot copied from the candidate at
/// add-time; the cart never re-fetches or revalidates it against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    product_id: ProductId,
    name: String,
    unit_price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_ref: Option<String>,
    quantity: u32,
    available_stock: u32,
}

impl CartLine {
    /// Returns the product identifier of the line.
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the product name captured when the line was added.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price in minor units captured when the line was added.
    #[must_use]
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Returns the display image reference, if the product carried one.
    #[must_use]
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    /// Returns the quantity of the line.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the stock snapshot captured when the line was added.
    ///
    /// This is the clamp ceiling for every later quantity change on the
    /// line; it is never re-synced with the catalog.
    #[must_use]
    pub fn available_stock(&self) -> u32 {
        self.available_stock
    }

    /// Returns the line total (`unit_price * quantity`) in minor units.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// A candidate line supplied by the product catalog.
///
/// The cart trusts this shape beyond clamping: out-of-range quantities are
/// substituted, never rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
    /// Opaque catalog identifier; the merge key within the cart.
    pub product_id: ProductId,

    /// Product name at selection time.
    pub name: String,

    /// Unit price in minor units at selection time.
    pub unit_price: u64,

    /// Optional display image reference.
    pub image_ref: Option<String>,

    /// Requested quantity (catalog pages typically send 1).
    pub quantity: u32,

    /// Catalog stock at selection time; the clamp ceiling for a new line.
    pub available_stock: u32,
}

/// The quantity a mutation actually applied, plus whether the request was
/// adjusted to fit `[1, available_stock]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedQuantity {
    /// The line's resulting quantity; 0 when no line was created.
    pub quantity: u32,

    /// Whether the requested quantity was substituted.
    pub clamped: bool,
}

/// An ordered sequence of cart lines, one per product.
///
/// Insertion order is first-add order and is stable: merging more of an
/// existing product never moves its line. Totals are computed from the lines
/// on every read, so they cannot drift from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from previously stored lines.
    ///
    /// Each line is folded back in through [`Cart::add`]: duplicate product
    /// ids merge and out-of-range quantities re-clamp, exactly as they would
    /// in a live session. A stale or hand-edited record rehydrates to a cart
    /// that satisfies the same invariants as a freshly built one.
    #[must_use]
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines {
            cart.add(NewCartLine {
                product_id: line.product_id,
                name: line.name,
                unit_price: line.unit_price,
                image_ref: line.image_ref,
                quantity: line.quantity,
                available_stock: line.available_stock,
            });
        }

        cart
    }

    /// Add a candidate line, merging quantities when the product is already
    /// in the cart.
    ///
    /// A new product appends a line with its quantity clamped to
    /// `[1, available_stock]`; in-range quantities pass through unchanged.
    /// An existing product keeps its position and snapshot fields (name,
    /// price, image, stock) and has the candidate quantity added on top,
    /// capped at the stored stock snapshot rather than the incoming
    /// candidate's.
    ///
    /// A candidate whose stock snapshot is 0 adds nothing: no quantity can
    /// satisfy both the floor of 1 and a ceiling of 0. The returned
    /// [`AppliedQuantity`] reports 0 in that case.
    pub fn add(&mut self, candidate: NewCartLine) -> AppliedQuantity {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == candidate.product_id)
        {
            let requested = line.quantity.saturating_add(candidate.quantity);
            let quantity = requested.min(line.available_stock);
            line.quantity = quantity;

            return AppliedQuantity {
                quantity,
                clamped: quantity != requested,
            };
        }

        if candidate.available_stock == 0 {
            return AppliedQuantity {
                quantity: 0,
                clamped: true,
            };
        }

        let quantity = candidate.quantity.clamp(1, candidate.available_stock);
        let clamped = quantity != candidate.quantity;

        self.lines.push(CartLine {
            product_id: candidate.product_id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            image_ref: candidate.image_ref,
            quantity,
            available_stock: candidate.available_stock,
        });

        AppliedQuantity { quantity, clamped }
    }

    /// Remove and return the line at the given position; later lines shift
    /// down by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists at the index.
    /// The sequence is left untouched in that case.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound(index));
        }

        Ok(self.lines.remove(index))
    }

    /// Set the quantity of the line at the given position, clamped to
    /// `[1, available_stock]`.
    ///
    /// The floor means a quantity can never be driven to 0 here; deleting a
    /// line is [`Cart::remove`]'s job.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists at the index.
    pub fn set_quantity(
        &mut self,
        index: usize,
        requested: u32,
    ) -> Result<AppliedQuantity, CartError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound(index))?;

        // Lines never enter the cart with zero stock, so the bounds are ordered.
        let quantity = requested.clamp(1, line.available_stock);
        line.quantity = quantity;

        Ok(AppliedQuantity {
            quantity,
            clamped: quantity != requested,
        })
    }

    /// Empty the cart. Clearing an already-empty cart is a no-op.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get the line at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists at the index.
    pub fn get_line(&self, index: usize) -> Result<&CartLine, CartError> {
        self.lines.get(index).ok_or(CartError::LineNotFound(index))
    }

    /// View the lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Total amount across all lines in minor units.
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
