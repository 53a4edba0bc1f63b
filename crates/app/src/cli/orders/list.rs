use clap::Args;
use morsel::orders::{OrdersService, UserId};

use crate::cli::print_order;

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    /// Maximum number of orders to list (1-50)
    #[arg(long, default_value_t = 20)]
    limit: u32,

    /// Only list orders placed by this user
    #[arg(long)]
    user: Option<String>,
}

pub(crate) async fn run(service: &impl OrdersService, args: ListOrdersArgs) -> Result<(), String> {
    let orders = match args.user {
        Some(user) => {
            let user = UserId::new(user).map_err(|error| error.to_string())?;

            service.list_user_orders(user).await
        }
        None => service.list_recent_orders(args.limit).await,
    }
    .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    for order in &orders {
        print_order(order);
        println!();
    }

    Ok(())
}
