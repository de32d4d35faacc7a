//! Quantity price breaks.
//!
//! A line item may carry an ordered list of [`QuantityTier`]s. The tier that
//! applies to a given quantity is the first one whose inclusive range contains
//! it; a missing `min_qty` means 1 and a missing `max_qty` means unbounded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lower bound used when a tier omits `min_qty`.
pub const DEFAULT_MIN_QTY: u32 = 1;

/// A price break applicable when quantity falls within `[min_qty, max_qty]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityTier {
    /// Inclusive lower bound. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_qty: Option<u32>,
    /// Inclusive upper bound. `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_qty: Option<u32>,
    /// Unit price while this tier is active.
    pub price_per_item: Decimal,
    /// Fixed courier surcharge attached to the tier.
    ///
    /// Carried for display only; cart totals do not include it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier_charge: Option<Decimal>,
}

impl QuantityTier {
    /// Create a tier covering `min..=max` (`None` for unbounded).
    #[must_use]
    pub const fn new(min_qty: u32, max_qty: Option<u32>, price_per_item: Decimal) -> Self {
        Self {
            min_qty: Some(min_qty),
            max_qty,
            price_per_item,
            courier_charge: None,
        }
    }

    /// Attach a courier surcharge.
    #[must_use]
    pub const fn with_courier_charge(mut self, charge: Decimal) -> Self {
        self.courier_charge = Some(charge);
        self
    }

    /// Effective lower bound.
    #[must_use]
    pub fn min(&self) -> u32 {
        self.min_qty.unwrap_or(DEFAULT_MIN_QTY)
    }

    /// Whether `quantity` falls within this tier's inclusive range.
    #[must_use]
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min() && self.max_qty.is_none_or(|max| quantity <= max)
    }
}

/// Find the first tier whose range contains `quantity`.
#[must_use]
pub fn active_tier(tiers: &[QuantityTier], quantity: u32) -> Option<&QuantityTier> {
    tiers.iter().find(|tier| tier.contains(quantity))
}

/// Problems found in a tier list by [`validate_tiers`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TierError {
    /// A tier's upper bound is below its lower bound.
    #[error("tier {index} has max_qty {max} below min_qty {min}")]
    InvertedRange {
        /// Position of the tier in the list.
        index: usize,
        /// Effective lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },
    /// An unbounded tier is followed by more tiers.
    #[error("tier {index} is unbounded but is not the last tier")]
    UnboundedNotLast {
        /// Position of the unbounded tier.
        index: usize,
    },
    /// A tier starts at or before the previous tier's end.
    #[error("tier {index} starts at {min}, overlapping previous tier ending at {previous_max}")]
    Overlap {
        /// Position of the overlapping tier.
        index: usize,
        /// Its effective lower bound.
        min: u32,
        /// Upper bound of the tier before it.
        previous_max: u32,
    },
    /// A tier starts after the quantity following the previous tier's end.
    #[error("tier {index} starts at {min}, leaving a gap after previous tier ending at {previous_max}")]
    Gap {
        /// Position of the tier after the gap.
        index: usize,
        /// Its effective lower bound.
        min: u32,
        /// Upper bound of the tier before it.
        previous_max: u32,
    },
}

/// Check that tiers are ordered, non-overlapping and contiguous.
///
/// An empty list is valid.
///
/// # Errors
///
/// Returns the first [`TierError`] found, scanning in list order.
pub fn validate_tiers(tiers: &[QuantityTier]) -> Result<(), TierError> {
    let mut previous_max: Option<Option<u32>> = None;

    for (index, tier) in tiers.iter().enumerate() {
        let min = tier.min();

        if let Some(max) = tier.max_qty
            && max < min
        {
            return Err(TierError::InvertedRange { index, min, max });
        }

        match previous_max {
            None => {}
            Some(None) => return Err(TierError::UnboundedNotLast { index: index - 1 }),
            Some(Some(prev)) => {
                if min <= prev {
                    return Err(TierError::Overlap {
                        index,
                        min,
                        previous_max: prev,
                    });
                }
                if min > prev.saturating_add(1) {
                    return Err(TierError::Gap {
                        index,
                        min,
                        previous_max: prev,
                    });
                }
            }
        }

        previous_max = Some(tier.max_qty);
    }

    Ok(())
}
