//! Products
//!
//! The catalog itself lives outside this crate; the cart and orders only ever refer to a product
//! by its identifier and the name and price captured when it was added.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// Errors raised when building a [`ProductId`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductIdError {
    /// Product identifiers cannot be blank.
    #[error("product id cannot be empty")]
    Empty,
}

/// Catalog identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ProductIdError::Empty`] for blank input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ProductIdError> {
        let id = id.as_ref().trim();

        if id.is_empty() {
            return Err(ProductIdError::Empty);
        }

        Ok(Self(id.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_trims_whitespace() -> TestResult {
        let id = ProductId::new("  soy-milk ")?;

        assert_eq!(id.as_str(), "soy-milk");
        assert_eq!(id.to_string(), "soy-milk");

        Ok(())
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert_eq!(ProductId::new(""), Err(ProductIdError::Empty));
        assert_eq!("   ".parse::<ProductId>(), Err(ProductIdError::Empty));
    }
}
