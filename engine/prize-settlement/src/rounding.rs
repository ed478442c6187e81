//! Payout rounding policy
//!
//! Every individual share is rounded to a whole multiple of the rounding unit
//! (100 currency units by default). The residue is folded back in by the
//! allocators, so the policy only decides how each share is cut.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::Amount;

/// Default rounding unit in whole currency units
pub const DEFAULT_ROUNDING_UNIT: Amount = 100;

/// How a raw share is cut to the rounding unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round toward negative infinity ("floored to the nearest hundred")
    #[default]
    Floor,
    /// Round half away from zero
    Nearest,
}

impl std::str::FromStr for RoundingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "floor" => Ok(RoundingPolicy::Floor),
            "nearest" | "round" => Ok(RoundingPolicy::Nearest),
            other => Err(format!("unknown rounding policy: {other}")),
        }
    }
}

/// Rounding policy paired with its unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rounder {
    pub policy: RoundingPolicy,
    pub unit: Amount,
}

impl Default for Rounder {
    fn default() -> Self {
        Self {
            policy: RoundingPolicy::Floor,
            unit: DEFAULT_ROUNDING_UNIT,
        }
    }
}

impl Rounder {
    pub fn new(policy: RoundingPolicy, unit: Amount) -> Self {
        Self { policy, unit }
    }

    /// Round a raw (possibly fractional) share to a multiple of the unit.
    ///
    /// A unit of zero or less disables rounding beyond whole currency units.
    pub fn round(&self, raw: Decimal) -> Amount {
        let unit = Decimal::from(self.unit.max(1));
        let units = raw / unit;
        let cut = match self.policy {
            RoundingPolicy::Floor => units.floor(),
            RoundingPolicy::Nearest => {
                units.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
        };
        // Anything too large to scale back is far outside the amount range anyway
        decimal_to_amount(cut.checked_mul(unit).unwrap_or(cut))
    }
}

/// Convert an integral decimal to an amount, saturating on overflow.
pub(crate) fn decimal_to_amount(value: Decimal) -> Amount {
    match value.trunc().to_i64() {
        Some(amount) => amount,
        None if value.is_sign_negative() => Amount::MIN,
        None => Amount::MAX,
    }
}

/// `amount * part / whole`, multiplying first so exact fractions stay exact.
///
/// Divides first when the product does not fit, and saturates when neither
/// order does. `whole` must be non-zero.
pub(crate) fn proportion(amount: Decimal, part: Decimal, whole: Decimal) -> Decimal {
    let negative = amount.is_sign_negative() != part.is_sign_negative();
    amount
        .checked_mul(part)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| part.checked_div(whole)?.checked_mul(amount))
        .unwrap_or(if negative { Decimal::MIN } else { Decimal::MAX })
}
