//! Order History
//!
//! Reordering copies a past order's lines back into a cart at their historical prices. The
//! catalog is not consulted, so discontinued or repriced products come back as they were.

use crate::{
    cart::{Cart, CartError, LineItem},
    orders::Order,
};

/// The cart lines that reproduce `order`.
pub fn reorder(order: &Order) -> Vec<LineItem> {
    order
        .items
        .iter()
        .map(|item| {
            LineItem::new(
                item.product_id.clone(),
                item.product_name.clone(),
                item.price,
                item.quantity,
            )
        })
        .collect()
}

/// Replace the contents of `cart` with the lines of `order`.
///
/// # Errors
///
/// Returns a [`CartError`] if the order is priced in a different currency than the cart; the cart
/// is left untouched in that case.
pub fn reorder_into(order: &Order, cart: &mut Cart) -> Result<(), CartError> {
    cart.replace_items(reorder(order))
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use jiff::Timestamp;

    use crate::{
        orders::{
            OrderBuilder, OrderItem, OrderItemUuid, OrderNumber, OrderStatus, OrderUuid,
            PaymentMethod, estimates::FixedPrepTime,
        },
        products::ProductId,
        repository::InMemoryOrdersRepository,
    };

    use super::*;

    fn line(id: &str, price_minor: i64, quantity: u32) -> TestResult<LineItem> {
        Ok(LineItem::new(
            ProductId::new(id)?,
            id,
            Money::from_minor(price_minor, iso::USD),
            quantity,
        ))
    }

    #[tokio::test]
    async fn reorder_round_trip_reproduces_subtotal() -> TestResult {
        let repository = InMemoryOrdersRepository::new();
        let builder = OrderBuilder::new(iso::USD).with_estimator(FixedPrepTime(15));

        let order = builder
            .create_order(
                &repository,
                [line("soy-milk", 200, 2)?, line("egg-crepe", 350, 1)?],
                "VISA",
                None,
            )
            .await?;

        let mut cart = Cart::new(iso::USD);

        reorder_into(&order, &mut cart)?;

        assert_eq!(cart.total_price()?, order.subtotal);
        assert_eq!(cart.total_items(), order.total_items());

        Ok(())
    }

    #[tokio::test]
    async fn reorder_replaces_rather_than_merges() -> TestResult {
        let repository = InMemoryOrdersRepository::new();

        let order = OrderBuilder::new(iso::USD)
            .create_order(&repository, [line("a", 100, 1)?], "VISA", None)
            .await?;

        let mut cart = Cart::with_items([line("a", 100, 5)?, line("b", 100, 1)?], iso::USD)?;

        reorder_into(&order, &mut cart)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);

        Ok(())
    }

    #[test]
    fn reorder_keeps_historical_prices() -> TestResult {
        let now = Timestamp::now();

        let order = Order {
            uuid: OrderUuid::new(),
            order_number: OrderNumber::from_bits(3),
            items: vec![OrderItem {
                uuid: OrderItemUuid::new(),
                product_id: ProductId::new("radish-cake")?,
                product_name: "Radish Cake".to_string(),
                quantity: 3,
                price: Money::from_minor(325, iso::USD),
                subtotal: Money::from_minor(975, iso::USD),
                created_at: now,
            }],
            subtotal: Money::from_minor(975, iso::USD),
            total: Money::from_minor(975, iso::USD),
            status: OrderStatus::Delivered,
            payment_method: PaymentMethod::Visa,
            estimated_time_minutes: 20,
            user_id: None,
            created_at: now,
            updated_at: now,
        };

        let lines = reorder(&order);

        assert_eq!(
            lines,
            [LineItem::new(
                ProductId::new("radish-cake")?,
                "Radish Cake",
                Money::from_minor(325, iso::USD),
                3,
            )]
        );

        Ok(())
    }
}
