//! Order Numbers
//!
//! Order numbers are the short, human-facing reference printed on receipts: `#` followed by ten
//! Crockford base-32 symbols, carrying 50 bits.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use uuid::Uuid;

use crate::orders::OrderError;

/// Crockford base-32 alphabet: no `I`, `L`, `O` or `U`.
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Symbols after the `#` prefix.
const SYMBOLS: usize = 10;

const BITS_PER_SYMBOL: u32 = 5;

/// Bits carried by an order number.
pub const ORDER_NUMBER_BITS: u32 = 50;

const MASK: u64 = (1 << ORDER_NUMBER_BITS) - 1;

/// Human-facing order reference, e.g. `#0000000042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Render the low 50 bits of `value` as an order number. Higher bits are ignored.
    pub fn from_bits(value: u64) -> Self {
        let value = value & MASK;

        let mut number = String::with_capacity(SYMBOLS + 1);

        number.push('#');

        number.extend(
            (0..ORDER_NUMBER_BITS / BITS_PER_SYMBOL)
                .rev()
                .map(|position| symbol(value >> (position * BITS_PER_SYMBOL))),
        );

        Self(number)
    }

    /// The number including its `#` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "masked to five bits before narrowing"
)]
fn symbol(value: u64) -> char {
    let index = (value & 0x1f) as usize;

    ALPHABET.get(index).map_or('0', |&byte| char::from(byte))
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderNumber {
    type Err = OrderError;

    /// Accepts the canonical form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OrderError::InvalidOrderNumber(s.to_string());

        let symbols = s.trim().strip_prefix('#').ok_or_else(invalid)?;

        let symbols = symbols.to_ascii_uppercase();

        let well_formed = symbols.len() == SYMBOLS
            && symbols.bytes().all(|byte| ALPHABET.contains(&byte));

        if !well_formed {
            return Err(invalid());
        }

        Ok(Self(format!("#{symbols}")))
    }
}

/// Source of fresh order numbers.
pub trait OrderNumberGenerator: Debug + Send + Sync {
    /// Produce the next order number. Uniqueness is enforced by the repository, not here.
    fn next_number(&self) -> OrderNumber;
}

/// Order numbers drawn from the random bits of a v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrderNumbers;

impl OrderNumberGenerator for RandomOrderNumbers {
    fn next_number(&self) -> OrderNumber {
        // The low half of a v4 UUID is random apart from its two variant bits, which sit above
        // bit 50.
        let (_, low) = Uuid::new_v4().as_u64_pair();

        OrderNumber::from_bits(low)
    }
}

/// Deterministic, monotonically increasing order numbers.
#[derive(Debug, Default)]
pub struct SequentialOrderNumbers {
    next: AtomicU64,
}

impl SequentialOrderNumbers {
    /// Start counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl OrderNumberGenerator for SequentialOrderNumbers {
    fn next_number(&self) -> OrderNumber {
        OrderNumber::from_bits(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn renders_prefix_and_ten_symbols() {
        assert_eq!(OrderNumber::from_bits(0).as_str(), "#0000000000");
        assert_eq!(OrderNumber::from_bits(42).as_str(), "#000000001A");
        assert_eq!(OrderNumber::from_bits(MASK).as_str(), "#ZZZZZZZZZZ");
    }

    #[test]
    fn ignores_bits_above_fifty() {
        assert_eq!(OrderNumber::from_bits(MASK + 1), OrderNumber::from_bits(0));
    }

    #[test]
    fn parses_canonical_and_lowercase_forms() -> TestResult {
        let number: OrderNumber = "#000000001a".parse()?;

        assert_eq!(number, OrderNumber::from_bits(42));

        Ok(())
    }

    #[test]
    fn rejects_malformed_numbers() {
        for text in ["000000001A", "#12345", "#000000001U", "#00000000001A", ""] {
            assert!(
                matches!(text.parse::<OrderNumber>(), Err(OrderError::InvalidOrderNumber(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn sequential_numbers_increase() {
        let numbers = SequentialOrderNumbers::starting_at(7);

        assert_eq!(numbers.next_number(), OrderNumber::from_bits(7));
        assert_eq!(numbers.next_number(), OrderNumber::from_bits(8));
    }

    #[test]
    fn random_numbers_are_well_formed_and_distinct() -> TestResult {
        let mut seen = HashSet::new();

        for _ in 0..1_000 {
            let number = RandomOrderNumbers.next_number();

            let reparsed: OrderNumber = number.as_str().parse()?;

            assert_eq!(reparsed, number);
            assert!(seen.insert(number), "duplicate order number");
        }

        Ok(())
    }
}
