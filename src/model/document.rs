//! Human-readable document numbers printed on quotes and orders.

use rand::Rng;

/// Prefix for quote document numbers.
pub const QUOTE_PREFIX: &str = "ORC";
/// Prefix for order document numbers.
pub const ORDER_PREFIX: &str = "PED";

/// Generate `<prefix>-NNNN` with a random four digit suffix.
///
/// Collisions are not checked; the number is a display label, never a key.
pub fn generate_document_number(prefix: &str) -> String {
    let suffix: u16 = rand::rng().random_range(1000..10000);
    format!("{}-{}", prefix, suffix)
}
