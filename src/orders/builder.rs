//! Order Builder
//!
//! Turns a snapshot of cart lines into a [`NewOrder`] and writes it through an
//! [`OrdersRepository`].

use std::sync::Arc;

use rusty_money::iso::Currency;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, LineItem},
    money,
    orders::{
        Order, OrderError, OrderItemUuid, OrderStatus, OrderUuid, PaymentMethod, UserId,
        data::{NewOrder, NewOrderItem},
        estimates::{PrepTimeEstimator, RandomPrepTime},
        numbers::{OrderNumberGenerator, RandomOrderNumbers},
    },
    repository::OrdersRepository,
};

/// Builds orders priced in a single store currency.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    currency: &'static Currency,
    numbers: Arc<dyn OrderNumberGenerator>,
    estimator: Arc<dyn PrepTimeEstimator>,
}

impl OrderBuilder {
    /// A builder with random order numbers and random preparation estimates.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            numbers: Arc::new(RandomOrderNumbers),
            estimator: Arc::new(RandomPrepTime),
        }
    }

    /// Use a different order number source.
    #[must_use]
    pub fn with_numbers(mut self, numbers: impl OrderNumberGenerator + 'static) -> Self {
        self.numbers = Arc::new(numbers);
        self
    }

    /// Use a different preparation estimator.
    #[must_use]
    pub fn with_estimator(mut self, estimator: impl PrepTimeEstimator + 'static) -> Self {
        self.estimator = Arc::new(estimator);
        self
    }

    /// The store currency every order is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Compute everything about a new order without storing it.
    ///
    /// Zero-quantity lines are dropped and repeated products are merged with the cart rules, so
    /// the first price seen for a product wins.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyCart`]: no line has a positive quantity.
    /// - [`OrderError::InvalidPaymentMethod`]: the payment label is unknown.
    /// - [`OrderError::CurrencyMismatch`]: a price is not in the store currency.
    /// - [`OrderError::AmountOverflow`]: a total left the minor-unit range.
    pub fn draft(
        &self,
        items: impl IntoIterator<Item = LineItem>,
        payment_method: &str,
        user_id: Option<UserId>,
    ) -> Result<NewOrder, OrderError> {
        let lines: Vec<LineItem> = items.into_iter().filter(|line| line.quantity > 0).collect();

        if lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let payment_method: PaymentMethod = payment_method.parse()?;

        let merged = Cart::with_items(lines, self.currency)?;

        let items = merged
            .items()
            .iter()
            .map(|line| {
                Ok(NewOrderItem {
                    uuid: OrderItemUuid::new(),
                    product_id: line.product_id.clone(),
                    product_name: line.name.clone(),
                    quantity: line.quantity,
                    price: line.unit_price,
                    subtotal: line.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, OrderError>>()?;

        let subtotal = money::sum(items.iter().map(|item| &item.subtotal), self.currency)?;

        Ok(NewOrder {
            uuid: OrderUuid::new(),
            order_number: self.numbers.next_number(),
            items,
            subtotal,
            total: subtotal,
            status: OrderStatus::Pending,
            payment_method,
            estimated_time_minutes: self.estimator.estimate_minutes(),
            user_id,
        })
    }

    /// Build an order from `items` and store it.
    ///
    /// Nothing is written when validation fails.
    ///
    /// # Errors
    ///
    /// Any error from [`OrderBuilder::draft`], or [`OrderError::Persistence`] when the
    /// repository rejects the write.
    pub async fn create_order<R>(
        &self,
        repository: &R,
        items: impl IntoIterator<Item = LineItem>,
        payment_method: &str,
        user_id: Option<UserId>,
    ) -> Result<Order, OrderError>
    where
        R: OrdersRepository + ?Sized,
    {
        let draft = self.draft(items, payment_method, user_id)?;

        debug!(
            order = %draft.uuid,
            number = %draft.order_number,
            items = draft.items.len(),
            total = %money::format_amount(&draft.total),
            "writing new order"
        );

        repository.create_order(draft).await.map_err(|error| {
            warn!(%error, "failed to store order");

            OrderError::Persistence(error)
        })
    }

    /// Place an order for everything in `cart`.
    ///
    /// The cart is cleared only once the order has been stored; on any error it is left as it
    /// was.
    ///
    /// # Errors
    ///
    /// See [`OrderBuilder::create_order`].
    pub async fn checkout<R>(
        &self,
        repository: &R,
        cart: &mut Cart,
        payment_method: &str,
        user_id: Option<UserId>,
    ) -> Result<Order, OrderError>
    where
        R: OrdersRepository + ?Sized,
    {
        let snapshot = cart.items().to_vec();

        let order = self
            .create_order(repository, snapshot, payment_method, user_id)
            .await?;

        cart.clear();

        Ok(order)
    }
}
