//! Cart
//!
//! The cart is a plain value: every operation is a synchronous state transition that leaves the
//! lines and the derived totals consistent before it returns. Persistence lives elsewhere (see
//! [`crate::store`]).

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{
        line::{CartLine, LineKey, LineSelection},
        totals::CartTotals,
    },
    pricing::{PricingError, PricingPolicy},
    products::{Product, ProductId, ProductSnapshot, ProductVariant},
};

pub mod line;
pub mod totals;

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Items are added one or more at a time.
    #[error("quantity to add must be at least 1")]
    ZeroQuantity,

    /// A line quantity would not fit in a `u32`.
    #[error("line quantity overflowed")]
    QuantityOverflow,

    /// The item is priced in a different currency to the cart.
    #[error("item {key} is priced in {found}, but the cart is in {expected}")]
    CurrencyMismatch {
        /// Line the item would have been added to
        key: LineKey,
        /// Cart currency
        expected: &'static str,
        /// Item currency
        found: &'static str,
    },

    /// Unit prices are never negative.
    #[error("item {key} has a negative unit price")]
    NegativePrice {
        /// Line the item would have been added to
        key: LineKey,
    },

    /// Two lines share the same key.
    #[error("duplicate cart line {0}")]
    DuplicateLine(LineKey),

    /// Discounts never add to the amount owed.
    #[error("discount must not be negative")]
    NegativeDiscount,

    /// Totals could not be derived.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount: Money<'static, Currency>,
    policy: PricingPolicy,
    totals: CartTotals,
}

impl Cart {
    /// Create an empty cart priced under `policy`.
    pub fn new(policy: PricingPolicy) -> Self {
        Cart {
            lines: Vec::new(),
            discount: policy.zero(),
            policy,
            totals: CartTotals::zero(policy.currency()),
        }
    }

    /// Rebuild a cart from previously stored lines and discount.
    ///
    /// Totals are always derived again under `policy`; stored totals are never trusted.
    ///
    /// # Errors
    ///
    /// - [`CartError::DuplicateLine`]: two lines share a key.
    /// - [`CartError::CurrencyMismatch`]: a line is not priced in the policy currency.
    /// - [`CartError::NegativePrice`]: a line has a negative unit price.
    /// - [`CartError::NegativeDiscount`]: the discount is negative.
    /// - [`CartError::Pricing`]: totals could not be derived.
    pub fn with_lines(
        lines: impl Into<Vec<CartLine>>,
        discount: Money<'static, Currency>,
        policy: PricingPolicy,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        {
            let mut seen = FxHashSet::default();

            for line in &lines {
                ensure_priceable(line.key(), line.snapshot(), &policy)?;

                if !seen.insert(line.key()) {
                    return Err(CartError::DuplicateLine(line.key().clone()));
                }
            }
        }

        let mut cart = Cart::new(policy);
        let discount = cart.validate_discount(discount)?;

        cart.commit(lines, discount)?;

        Ok(cart)
    }

    /// Add `quantity` units of a product, optionally for a specific catalog variant.
    ///
    /// Merges into the existing line when one matches, otherwise appends a new line with a fresh
    /// snapshot of the catalog data. Returns the key of the affected line.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: `quantity` is zero.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit in a `u32`.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::NegativePrice`]: the product or variant has a negative price.
    /// - [`CartError::Pricing`]: totals could not be derived.
    pub fn add_item(
        &mut self,
        product: &Product,
        variant: Option<&ProductVariant>,
        quantity: u32,
    ) -> Result<LineKey, CartError> {
        self.add_snapshot(
            LineKey::for_product(product, variant),
            ProductSnapshot::capture(product, variant),
            quantity,
        )
    }

    /// Add `quantity` units of a product picked by free-form attributes (size, colour, ...).
    ///
    /// # Errors
    ///
    /// See [`Cart::add_item`].
    pub fn add_selection(
        &mut self,
        product: &Product,
        selection: LineSelection,
        quantity: u32,
    ) -> Result<LineKey, CartError> {
        self.add_snapshot(
            LineKey::new(product.id.clone(), selection),
            ProductSnapshot::capture(product, None),
            quantity,
        )
    }

    /// Add `quantity` units under `key`, using `snapshot` if a new line is needed.
    ///
    /// The snapshot is ignored when the line already exists so its unit price never changes.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_item`].
    pub fn add_snapshot(
        &mut self,
        key: LineKey,
        snapshot: ProductSnapshot,
        quantity: u32,
    ) -> Result<LineKey, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::ZeroQuantity)?;
        let mut lines = self.lines.clone();

        if let Some(line) = lines.iter_mut().find(|line| line.key() == &key) {
            line.increment(quantity)?;

            debug!(%key, quantity = line.quantity().get(), "merged into cart line");
        } else {
            ensure_priceable(&key, &snapshot, &self.policy)?;

            debug!(%key, quantity = quantity.get(), "added cart line");

            lines.push(CartLine::new(key.clone(), snapshot, quantity));
        }

        self.commit(lines, self.discount)?;

        Ok(key)
    }

    /// Remove the line with the given key. Unknown keys are a no-op.
    ///
    /// Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if totals could not be derived; the line stays in the cart.
    pub fn remove_item(&mut self, key: &LineKey) -> Result<bool, CartError> {
        let Some(position) = self.position(key) else {
            return Ok(false);
        };

        let mut lines = self.lines.clone();
        lines.remove(position);

        self.commit(lines, self.discount)?;

        debug!(%key, "removed cart line");

        Ok(true)
    }

    /// Set the quantity of a line exactly. A quantity of zero or less removes the line, and
    /// unknown keys are a no-op.
    ///
    /// Returns whether a line was changed.
    ///
    /// # Errors
    ///
    /// - [`CartError::QuantityOverflow`]: `quantity` does not fit in a `u32`.
    /// - [`CartError::Pricing`]: totals could not be derived.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<bool, CartError> {
        if quantity <= 0 {
            return self.remove_item(key);
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(CartError::QuantityOverflow)?;

        let Some(position) = self.position(key) else {
            return Ok(false);
        };

        let mut lines = self.lines.clone();

        if let Some(line) = lines.get_mut(position) {
            line.set_quantity(quantity);
        }

        self.commit(lines, self.discount)?;

        debug!(%key, quantity = quantity.get(), "updated cart line quantity");

        Ok(true)
    }

    /// Remove every line and reset the discount. All totals become zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if totals could not be derived.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new(), self.policy.zero())?;

        debug!("cleared cart");

        Ok(())
    }

    /// Set the discount granted by a promotion.
    ///
    /// The total is clamped at zero if the discount exceeds everything else.
    ///
    /// # Errors
    ///
    /// - [`CartError::NegativeDiscount`]: `discount` is negative.
    /// - [`CartError::Pricing`]: `discount` is in another currency.
    pub fn apply_discount(&mut self, discount: Money<'static, Currency>) -> Result<(), CartError> {
        let discount = self.validate_discount(discount)?;

        self.commit(self.lines.clone(), discount)?;

        debug!(discount = %discount, "applied cart discount");

        Ok(())
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find a line by key
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key() == key)
    }

    /// Find the line for a product and selection
    pub fn find_line(&self, product_id: &ProductId, selection: &LineSelection) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.key().product_id() == product_id && line.key().selection() == selection)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity().get()))
            .sum()
    }

    /// Number of lines in the cart
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Derived totals
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Discount currently applied
    pub fn discount(&self) -> Money<'static, Currency> {
        self.discount
    }

    /// Pricing policy used for totals
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Currency of the cart
    pub fn currency(&self) -> &'static Currency {
        self.policy.currency()
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|line| line.key() == key)
    }

    fn validate_discount(
        &self,
        discount: Money<'static, Currency>,
    ) -> Result<Money<'static, Currency>, CartError> {
        let discount = self.policy.zero().add(discount).map_err(PricingError::from)?;

        if discount.to_minor_units() < 0 {
            return Err(CartError::NegativeDiscount);
        }

        Ok(discount)
    }

    /// Swap in new lines and discount only once their totals have been derived.
    fn commit(
        &mut self,
        lines: Vec<CartLine>,
        discount: Money<'static, Currency>,
    ) -> Result<(), CartError> {
        let totals = CartTotals::compute(&lines, discount, &self.policy)?;

        self.lines = lines;
        self.discount = discount;
        self.totals = totals;

        Ok(())
    }
}

/// A new line must be priced in the cart currency and never below zero.
fn ensure_priceable(
    key: &LineKey,
    snapshot: &ProductSnapshot,
    policy: &PricingPolicy,
) -> Result<(), CartError> {
    let unit_price = snapshot.unit_price();
    let currency = unit_price.currency();

    if currency != policy.currency() {
        return Err(CartError::CurrencyMismatch {
            key: key.clone(),
            expected: policy.currency().iso_alpha_code,
            found: currency.iso_alpha_code,
        });
    }

    if unit_price.to_minor_units() < 0 {
        return Err(CartError::NegativePrice { key: key.clone() });
    }

    Ok(())
}
