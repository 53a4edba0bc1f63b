//! Store Config

use clap::Args;
use rusty_money::iso::{self, Currency};

/// Storefront settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// ISO 4217 code every price and order total is expressed in
    #[arg(long, env = "STORE_CURRENCY", default_value = "USD", value_parser = parse_currency)]
    pub currency: &'static Currency,
}

fn parse_currency(code: &str) -> Result<&'static Currency, String> {
    iso::find(&code.trim().to_ascii_uppercase())
        .ok_or_else(|| format!("{code:?} is not an ISO 4217 currency code"))
}
