//! Cart
//!
//! The session cart: an ordered set of line items keyed by product. Totals are derived on every
//! query rather than cached, so they can never drift from the lines they are computed from.

use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    money::{self, Amount, AmountError},
    products::ProductId,
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Adding zero of a product is rejected rather than stored as a placeholder.
    #[error("cannot add zero units of product {0}")]
    ZeroQuantity(ProductId),

    /// An item's price currency differs from the cart currency.
    #[error("product {product} is priced in {item_currency}, but the cart is in {cart_currency}")]
    CurrencyMismatch {
        /// Product whose price was rejected.
        product: ProductId,

        /// ISO code of the item price.
        item_currency: &'static str,

        /// ISO code of the cart.
        cart_currency: &'static str,
    },

    /// The merged quantity no longer fits in a `u32`.
    #[error("quantity of product {0} overflowed")]
    QuantityOverflow(ProductId),
}

/// A product, its captured price and how many units are wanted.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Catalog identifier.
    pub product_id: ProductId,

    /// Display name captured with the price.
    pub name: String,

    /// Price per unit, fixed at the moment the product was first added.
    pub unit_price: Amount,

    /// Number of units.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Amount,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the total leaves the minor-unit range.
    pub fn line_total(&self) -> Result<Amount, AmountError> {
        money::line_total(&self.unit_price, self.quantity)
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    items: SmallVec<[LineItem; 8]>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: SmallVec::new(),
            currency,
        }
    }

    /// Create a cart holding `items`, merging repeated products.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] for the first item that [`Cart::add_item`] would reject.
    pub fn with_items(
        items: impl IntoIterator<Item = LineItem>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let mut cart = Self::new(currency);

        items
            .into_iter()
            .try_for_each(|item| cart.add_item(item))?;

        Ok(cart)
    }

    /// Add an item to the cart.
    ///
    /// When the product is already in the cart its quantity is increased and the existing price
    /// and name are kept; a later add never reprices a line.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: the item has a quantity of zero.
    /// - [`CartError::CurrencyMismatch`]: the price is not in the cart currency.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::ZeroQuantity(item.product_id));
        }

        let item_currency = item.unit_price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                product: item.product_id,
                item_currency: item_currency.iso_alpha_code,
                cart_currency: self.currency.iso_alpha_code,
            });
        }

        match self.line_mut(&item.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or(CartError::QuantityOverflow(item.product_id))?;
            }
            None => self.items.push(item),
        }

        Ok(())
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// A quantity of zero removes the line. Setting a quantity for a product that is not in the
    /// cart does nothing, since there is no price to give it. Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;

                true
            }
            Some(_) | None => false,
        }
    }

    /// Remove a product from the cart. Removing an absent product is not an error.
    ///
    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();

        self.items.retain(|line| line.product_id != *product_id);

        self.items.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the whole contents of the cart, as a reorder does.
    ///
    /// Zero-quantity items are skipped and repeated products are merged. The cart is left
    /// untouched if any item is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] for the first item that [`Cart::add_item`] would reject.
    pub fn replace_items(
        &mut self,
        items: impl IntoIterator<Item = LineItem>,
    ) -> Result<(), CartError> {
        let replacement = Self::with_items(
            items.into_iter().filter(|item| item.quantity > 0),
            self.currency,
        )?;

        self.items = replacement.items;

        Ok(())
    }

    /// Total number of units across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over every line, computed fresh on each call.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the total leaves the minor-unit range.
    pub fn total_price(&self) -> Result<Amount, AmountError> {
        let line_totals = self
            .items
            .iter()
            .map(LineItem::line_total)
            .collect::<Result<SmallVec<[Amount; 8]>, _>>()?;

        money::sum(&line_totals, self.currency)
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.product_id == *product_id)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The currency every price in the cart is in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|line| line.product_id == *product_id)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn product(id: &str) -> ProductId {
        ProductId::new(id).unwrap_or_else(|_| unreachable!("test ids are never blank"))
    }

    fn line(id: &str, price_minor: i64, quantity: u32) -> LineItem {
        LineItem::new(
            product(id),
            id.to_uppercase(),
            Money::from_minor(price_minor, iso::USD),
            quantity,
        )
    }

    #[test]
    fn new_cart_is_empty() -> TestResult {
        let cart = Cart::new(iso::USD);

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price()?, Money::from_minor(0, iso::USD));
        assert_eq!(cart.currency(), iso::USD);

        Ok(())
    }

    #[test]
    fn adding_same_product_twice_merges_and_keeps_first_price() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(line("a", 250, 1))?;
        cart.add_item(line("a", 999, 1))?;

        assert_eq!(cart.len(), 1);

        let merged = cart.get(&product("a"));

        assert_eq!(merged.map(|l| l.quantity), Some(2));
        assert_eq!(
            merged.map(|l| l.unit_price),
            Some(Money::from_minor(250, iso::USD))
        );
        assert_eq!(cart.total_price()?, Money::from_minor(500, iso::USD));

        Ok(())
    }

    #[test]
    fn adding_zero_quantity_is_rejected() {
        let mut cart = Cart::new(iso::USD);

        assert_eq!(
            cart.add_item(line("a", 100, 0)),
            Err(CartError::ZeroQuantity(product("a")))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn adding_other_currency_is_rejected() {
        let mut cart = Cart::new(iso::USD);

        let item = LineItem::new(product("a"), "A", Money::from_minor(100, iso::GBP), 1);

        assert_eq!(
            cart.add_item(item),
            Err(CartError::CurrencyMismatch {
                product: product("a"),
                item_currency: iso::GBP.iso_alpha_code,
                cart_currency: iso::USD.iso_alpha_code,
            })
        );
    }

    #[test]
    fn quantity_overflow_is_rejected_and_leaves_line_alone() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(line("a", 100, u32::MAX))?;

        assert_eq!(
            cart.add_item(line("a", 100, 1)),
            Err(CartError::QuantityOverflow(product("a")))
        );
        assert_eq!(cart.get(&product("a")).map(|l| l.quantity), Some(u32::MAX));

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_line() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(line("a", 100, 3))?;

        assert!(cart.update_quantity(&product("a"), 0));
        assert!(cart.get(&product("a")).is_none());
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_on_absent_product_does_not_create_line() {
        let mut cart = Cart::new(iso::USD);

        assert!(!cart.update_quantity(&product("ghost"), 4));
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_sets_exact_value() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(line("a", 200, 1))?;

        assert!(cart.update_quantity(&product("a"), 5));
        assert!(!cart.update_quantity(&product("a"), 5));
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price()?, Money::from_minor(1000, iso::USD));

        Ok(())
    }

    #[test]
    fn remove_item_is_idempotent() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(line("a", 100, 1))?;

        assert!(cart.remove_item(&product("a")));
        assert!(!cart.remove_item(&product("a")));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn totals_follow_every_mutation() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_item(line("soy-milk", 200, 2))?;
        cart.add_item(line("egg-crepe", 350, 1))?;

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price()?, Money::from_minor(750, iso::USD));

        cart.add_item(line("radish-cake", 300, 1))?;
        cart.update_quantity(&product("soy-milk"), 1);

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price()?, Money::from_minor(850, iso::USD));

        cart.remove_item(&product("egg-crepe"));

        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price()?, Money::from_minor(500, iso::USD));

        let expected = cart
            .items()
            .iter()
            .map(|l| l.unit_price.to_minor_units() * i64::from(l.quantity))
            .sum::<i64>();

        assert_eq!(cart.total_price()?.to_minor_units(), expected);

        Ok(())
    }

    #[test]
    fn items_keep_insertion_order() -> TestResult {
        let cart = Cart::with_items([line("b", 1, 1), line("a", 1, 1), line("b", 1, 1)], iso::USD)?;

        let ids: Vec<&str> = cart.items().iter().map(|l| l.product_id.as_str()).collect();

        assert_eq!(ids, ["b", "a"]);

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::with_items([line("a", 100, 1), line("b", 100, 2)], iso::USD)?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);

        Ok(())
    }

    #[test]
    fn replace_items_discards_previous_contents() -> TestResult {
        let mut cart = Cart::with_items([line("a", 100, 1)], iso::USD)?;

        cart.replace_items([line("b", 200, 2), line("c", 300, 0)])?;

        assert!(cart.get(&product("a")).is_none());
        assert!(cart.get(&product("c")).is_none());
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price()?, Money::from_minor(400, iso::USD));

        Ok(())
    }

    #[test]
    fn failed_replace_leaves_cart_unchanged() -> TestResult {
        let mut cart = Cart::with_items([line("a", 100, 1)], iso::USD)?;

        let foreign = LineItem::new(product("b"), "B", Money::from_minor(100, iso::EUR), 1);

        assert!(cart.replace_items([line("c", 100, 1), foreign]).is_err());
        assert_eq!(cart.len(), 1);
        assert!(cart.get(&product("a")).is_some());

        Ok(())
    }
}
