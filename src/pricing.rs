//! Group pricing. Tax is applied per group, never on a grand total.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::FoodItem;

/// Sales tax applied to every group total (13%).
pub const TAX_RATE: Decimal = dec!(0.13);

/// Sum of prices, counting every repeated entry.
pub fn subtotal(items: &[FoodItem]) -> Decimal {
    items.iter().map(|i| i.price).sum()
}

pub fn tax_amount(subtotal: Decimal, tax_rate: Decimal) -> Decimal {
    subtotal * tax_rate
}

/// `subtotal * (1 + tax_rate)`, unrounded.
pub fn total_with_tax(subtotal: Decimal, tax_rate: Decimal) -> Decimal {
    subtotal * (Decimal::ONE + tax_rate)
}

/// Round to cents for display.
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}
