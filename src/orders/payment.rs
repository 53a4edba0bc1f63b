//! Payment Methods

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::orders::OrderError;

/// How the customer says they will pay. A label only; no payment is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Generic credit card.
    CreditCard,

    /// Mastercard.
    Mastercard,

    /// Visa.
    Visa,

    /// Apple Pay.
    ApplePay,
}

impl PaymentMethod {
    /// Every accepted payment method.
    pub const ALL: [Self; 4] = [
        Self::CreditCard,
        Self::Mastercard,
        Self::Visa,
        Self::ApplePay,
    ];

    /// Wire name, e.g. `"APPLE_PAY"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "CREDIT_CARD",
            Self::Mastercard => "MASTERCARD",
            Self::Visa => "VISA",
            Self::ApplePay => "APPLE_PAY",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == wanted)
            .ok_or_else(|| OrderError::InvalidPaymentMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().ok(), Some(method));
        }
    }

    #[test]
    fn rejects_unknown_methods() {
        assert!(matches!(
            "BITCOIN".parse::<PaymentMethod>(),
            Err(OrderError::InvalidPaymentMethod(method)) if method == "BITCOIN"
        ));
        assert!("".parse::<PaymentMethod>().is_err());
    }
}
