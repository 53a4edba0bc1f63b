use clap::Args;
use morsel::orders::{OrderUuid, OrdersService};

use crate::cli::print_order;

#[derive(Debug, Args)]
pub(crate) struct UpdateStatusArgs {
    /// Order UUID
    order: OrderUuid,

    /// New status: CONFIRMED, PREPARING, READY, DELIVERED or CANCELLED
    status: String,
}

pub(crate) async fn run(
    service: &impl OrdersService,
    args: UpdateStatusArgs,
) -> Result<(), String> {
    let order = service
        .update_status(args.order, args.status)
        .await
        .map_err(|error| format!("failed to update order {}: {error}", args.order))?;

    print_order(&order);

    Ok(())
}
