use clap::Args;
use morsel::orders::{OrderNumber, OrderUuid, OrdersService};

use crate::cli::print_order;

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    /// Order UUID, or order number such as #0000000042
    order: String,
}

pub(crate) async fn run(service: &impl OrdersService, args: ShowOrderArgs) -> Result<(), String> {
    let order = if args.order.starts_with('#') {
        let number: OrderNumber = args.order.parse().map_err(|error| format!("{error}"))?;

        service.get_order_by_number(number).await
    } else {
        let uuid: OrderUuid = args
            .order
            .parse()
            .map_err(|error| format!("invalid order uuid: {error}"))?;

        service.get_order(uuid).await
    }
    .map_err(|error| format!("failed to load order {}: {error}", args.order))?;

    print_order(&order);

    Ok(())
}
