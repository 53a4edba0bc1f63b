use clap::{Parser, Subcommand};
use morsel::orders::Order;

mod db;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "morsel-app", about = "Morsel CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Orders(orders::OrdersCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Orders(command) => orders::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Print an order the way every order command shows it.
pub(crate) fn print_order(order: &Order) {
    println!("order_uuid: {}", order.uuid);
    println!("order_number: {}", order.order_number);
    println!("status: {}", order.status);
    println!("payment_method: {}", order.payment_method);
    println!(
        "total: {} {}",
        morsel::money::format_amount(&order.total),
        order.currency().iso_alpha_code
    );
    println!("estimated_time_minutes: {}", order.estimated_time_minutes);
    println!(
        "user_id: {}",
        order
            .user_id
            .as_ref()
            .map_or_else(|| "guest".to_string(), ToString::to_string)
    );
    println!("created_at: {}", order.created_at);
    println!("updated_at: {}", order.updated_at);

    for item in &order.items {
        println!(
            "  - {} x {} ({}) @ {} = {}",
            item.quantity,
            item.product_name,
            item.product_id,
            morsel::money::format_amount(&item.price),
            morsel::money::format_amount(&item.subtotal)
        );
    }
}
