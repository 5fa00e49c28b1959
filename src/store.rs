//! Cart Store
//!
//! The session-facing service around a [`Cart`] and its repository. The
//! store loads whatever snapshot the repository holds when it opens and
//! saves after every mutation. Persistence failures never interrupt the
//! session: a cart that cannot be loaded starts empty, and a cart that
//! cannot be saved stays live in memory.

use tracing::{debug, warn};

use crate::{
    cart::{AppliedQuantity, Cart, CartError, CartLine, NewCartLine},
    repository::{CartRecord, CartRepository},
};

/// A cart bound to a persistence backend for the life of a session.
#[derive(Debug)]
pub struct CartStore<R> {
    cart: Cart,
    repository: R,
}

impl<R: CartRepository> CartStore<R> {
    /// Open a store, rehydrating the cart from the repository.
    ///
    /// A stored snapshot is rebuilt line by line through the normal add
    /// path, so whatever is on disk comes back merged and clamped. A
    /// missing or unreadable snapshot yields an empty cart; the store is
    /// usable either way.
    #[must_use]
    #[tracing::instrument(name = "cart.store.open", skip(repository))]
    pub fn open(repository: R) -> Self {
        let cart = match repository.load() {
            Ok(Some(record)) => {
                let cart = Cart::with_lines(record.items);

                debug!(lines = cart.len(), "rehydrated cart");

                cart
            }
            Ok(None) => {
                debug!("no stored cart; starting empty");

                Cart::new()
            }
            Err(err) => {
                warn!(error = %err, "failed to load stored cart; starting empty");

                Cart::new()
            }
        };

        Self { cart, repository }
    }

    /// Add an item to the cart and save the result.
    ///
    /// Quantities merge and clamp as described on [`Cart::add`]; the
    /// request is never rejected, only adjusted.
    #[tracing::instrument(
        name = "cart.store.add_item",
        skip(self, item),
        fields(product_id = %item.product_id, requested = item.quantity)
    )]
    pub fn add_item(&mut self, item: NewCartLine) -> AppliedQuantity {
        let applied = self.cart.add(item);

        debug!(
            quantity = applied.quantity,
            clamped = applied.clamped,
            "added item"
        );

        self.persist();

        applied
    }

    /// Remove the line at the given position and save the result.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists at the index.
    /// Nothing is mutated or saved in that case.
    #[tracing::instrument(name = "cart.store.remove_item", skip(self), err)]
    pub fn remove_item(&mut self, index: usize) -> Result<CartLine, CartError> {
        let removed = self.cart.remove(index)?;

        debug!(product_id = %removed.product_id(), "removed item");

        self.persist();

        Ok(removed)
    }

    /// Set the quantity of the line at the given position and save the
    /// result.
    ///
    /// The request clamps to `[1, available_stock]` as described on
    /// [`Cart::set_quantity`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists at the index.
    /// Nothing is mutated or saved in that case.
    #[tracing::instrument(name = "cart.store.update_quantity", skip(self), err)]
    pub fn update_quantity(
        &mut self,
        index: usize,
        quantity: u32,
    ) -> Result<AppliedQuantity, CartError> {
        let applied = self.cart.set_quantity(index, quantity)?;

        debug!(
            quantity = applied.quantity,
            clamped = applied.clamped,
            "updated quantity"
        );

        self.persist();

        Ok(applied)
    }

    /// Empty the cart and save the result.
    #[tracing::instrument(name = "cart.store.clear", skip(self))]
    pub fn clear(&mut self) {
        self.cart.clear();

        debug!("cleared cart");

        self.persist();
    }

    /// View the current cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// View the repository backing the store.
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn persist(&mut self) {
        let record = CartRecord::from(&self.cart);

        if let Err(err) = self.repository.save(&record) {
            warn!(error = %err, "failed to save cart; keeping in-memory state");
        }
    }
}
