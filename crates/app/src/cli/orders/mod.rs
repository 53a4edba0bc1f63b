use clap::{Args, Subcommand};
use morsel::orders::{OrderBuilder, StoreOrdersService};
use morsel_app::{database, orders::PgOrdersRepository};
use rusty_money::iso;

mod list;
mod show;
mod status;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    List(list::ListOrdersArgs),
    Show(show::ShowOrderArgs),
    Status(status::UpdateStatusArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or_else(|| "DATABASE_URL or --database-url is required".to_string())?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    // Stored orders carry their own currency; the builder is never used by these commands.
    let service = StoreOrdersService::new(
        PgOrdersRepository::new(pool),
        OrderBuilder::new(iso::USD),
    );

    match command.command {
        OrdersSubcommand::List(args) => list::run(&service, args).await,
        OrdersSubcommand::Show(args) => show::run(&service, args).await,
        OrdersSubcommand::Status(args) => status::run(&service, args).await,
    }
}
