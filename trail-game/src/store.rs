//! Settlement store pricing and purchases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::entity::{Inventory, SupplyKind};
use crate::numbers::format_cents;
use crate::policy::StorePolicy;

/// One line of a shopping list. Ammunition quantities are counted in boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLine {
    pub item: SupplyKind,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReceipt {
    pub total_cost_cents: u32,
    pub lines: Vec<StoreLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("the store does not sell {0}")]
    NotForSale(SupplyKind),
    #[error("you can only carry {remaining} more of {item} (asked for {requested})")]
    ExceedsCap {
        item: SupplyKind,
        requested: u32,
        remaining: u32,
    },
    #[error("that costs {required_cents} cents, but you only have {available_cents}")]
    InsufficientCash {
        required_cents: u32,
        available_cents: u32,
    },
}

/// Price multiplier (percent) for a settlement's pricing stage.
#[must_use]
pub fn price_multiplier_pct(policy: &StorePolicy, stage: u8) -> u16 {
    let table = &policy.price_mult_pct_by_stage;
    let idx = usize::from(stage).min(table.len().saturating_sub(1));
    table.get(idx).copied().unwrap_or(100)
}

/// Base price of one unit (one box for ammunition).
#[must_use]
pub const fn base_price_cents(policy: &StorePolicy, item: SupplyKind) -> Option<u32> {
    let prices = &policy.base_prices_cents;
    match item {
        SupplyKind::Oxen => Some(prices.ox),
        SupplyKind::Food => Some(prices.food_lb),
        SupplyKind::Clothing => Some(prices.clothing_set),
        SupplyKind::Ammunition => Some(prices.ammo_box),
        SupplyKind::Wheel => Some(prices.wheel),
        SupplyKind::Axle => Some(prices.axle),
        SupplyKind::Tongue => Some(prices.tongue),
        SupplyKind::Cash => None,
    }
}

#[must_use]
pub fn price_cents_at_stage(policy: &StorePolicy, item: SupplyKind, stage: u8) -> Option<u32> {
    let base = base_price_cents(policy, item)?;
    let multiplier = price_multiplier_pct(policy, stage);
    let scaled = u64::from(base).saturating_mul(u64::from(multiplier)) / 100_u64;
    Some(u32::try_from(scaled).unwrap_or(u32::MAX))
}

/// Units actually added to inventory per purchased unit.
#[must_use]
pub const fn units_per_purchase(policy: &StorePolicy, item: SupplyKind) -> u32 {
    match item {
        SupplyKind::Ammunition => {
            if policy.bullets_per_box == 0 {
                1
            } else {
                policy.bullets_per_box
            }
        }
        _ => 1,
    }
}

/// How many more purchase units fit under the carrying cap.
#[must_use]
pub fn remaining_capacity(policy: &StorePolicy, inventory: &Inventory, item: SupplyKind) -> u32 {
    let held = inventory.quantity(item);
    let room = policy.cap(item).saturating_sub(held);
    room / units_per_purchase(policy, item)
}

/// Quote a purchase without mutating state. Lines for the same item are
/// aggregated and zero-quantity lines are ignored.
///
/// # Errors
///
/// Returns an error when an item is not for sale or a line exceeds the
/// remaining capacity.
pub fn quote_purchase(
    policy: &StorePolicy,
    stage: u8,
    inventory: &Inventory,
    lines: &[StoreLine],
) -> Result<StoreReceipt, StoreError> {
    let mut aggregated: BTreeMap<SupplyKind, u32> = BTreeMap::new();
    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        let entry = aggregated.entry(line.item).or_insert(0);
        *entry = entry.saturating_add(line.quantity);
    }

    let mut total_cost: u64 = 0;
    let mut receipt_lines = Vec::with_capacity(aggregated.len());
    for (item, quantity) in aggregated {
        let Some(price) = price_cents_at_stage(policy, item, stage) else {
            return Err(StoreError::NotForSale(item));
        };
        let remaining = remaining_capacity(policy, inventory, item);
        if quantity > remaining {
            return Err(StoreError::ExceedsCap {
                item,
                requested: quantity,
                remaining,
            });
        }
        total_cost =
            total_cost.saturating_add(u64::from(price).saturating_mul(u64::from(quantity)));
        receipt_lines.push(StoreLine { item, quantity });
    }

    Ok(StoreReceipt {
        total_cost_cents: u32::try_from(total_cost).unwrap_or(u32::MAX),
        lines: receipt_lines,
    })
}

/// Charge for a purchase and add the goods to inventory.
///
/// # Errors
///
/// Returns an error when the quote fails or cash is insufficient; the
/// inventory is untouched in that case.
pub fn apply_purchase(
    policy: &StorePolicy,
    stage: u8,
    inventory: &mut Inventory,
    lines: &[StoreLine],
) -> Result<StoreReceipt, StoreError> {
    let receipt = quote_purchase(policy, stage, inventory, lines)?;
    let available = inventory.cash_cents;
    if receipt.total_cost_cents > available {
        return Err(StoreError::InsufficientCash {
            required_cents: receipt.total_cost_cents,
            available_cents: available,
        });
    }
    inventory.cash_cents = available - receipt.total_cost_cents;
    for line in &receipt.lines {
        let units = line.quantity.saturating_mul(units_per_purchase(policy, line.item));
        inventory.add_capped(line.item, units, policy.cap(line.item));
    }
    log::debug!(
        "store purchase at stage {stage}: {} lines for {}",
        receipt.lines.len(),
        format_cents(receipt.total_cost_cents)
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TrailPolicy;

    fn policy() -> StorePolicy {
        TrailPolicy::default().store
    }

    #[test]
    fn prices_scale_with_stage() {
        let policy = policy();
        assert_eq!(price_cents_at_stage(&policy, SupplyKind::Oxen, 0), Some(2_000));
        assert_eq!(price_cents_at_stage(&policy, SupplyKind::Oxen, 2), Some(3_000));
        assert_eq!(
            price_cents_at_stage(&policy, SupplyKind::Oxen, 99),
            Some(5_000),
            "stages past the table use the last multiplier"
        );
        assert_eq!(price_cents_at_stage(&policy, SupplyKind::Cash, 0), None);
    }

    #[test]
    fn quote_aggregates_and_skips_zero_lines() {
        let policy = policy();
        let inventory = Inventory::default();
        let lines = [
            StoreLine {
                item: SupplyKind::Food,
                quantity: 100,
            },
            StoreLine {
                item: SupplyKind::Wheel,
                quantity: 0,
            },
            StoreLine {
                item: SupplyKind::Food,
                quantity: 50,
            },
        ];
        let receipt = quote_purchase(&policy, 0, &inventory, &lines).expect("quote");
        assert_eq!(
            receipt.lines,
            vec![StoreLine {
                item: SupplyKind::Food,
                quantity: 150
            }]
        );
        assert_eq!(receipt.total_cost_cents, 3_000);
    }

    #[test]
    fn caps_and_cash_are_enforced() {
        let policy = policy();
        let mut inventory = Inventory {
            wheels: 2,
            cash_cents: 5_000,
            ..Inventory::default()
        };
        let err = apply_purchase(
            &policy,
            0,
            &mut inventory,
            &[StoreLine {
                item: SupplyKind::Wheel,
                quantity: 2,
            }],
        )
        .expect_err("only one more wheel fits");
        assert_eq!(
            err,
            StoreError::ExceedsCap {
                item: SupplyKind::Wheel,
                requested: 2,
                remaining: 1
            }
        );

        let err = apply_purchase(
            &policy,
            0,
            &mut inventory,
            &[StoreLine {
                item: SupplyKind::Oxen,
                quantity: 3,
            }],
        )
        .expect_err("three oxen cost more than $50");
        assert!(matches!(err, StoreError::InsufficientCash { .. }));
        assert_eq!(inventory.cash_cents, 5_000);
        assert_eq!(inventory.oxen, 0);
    }

    #[test]
    fn ammunition_is_sold_in_boxes() {
        let policy = policy();
        let mut inventory = Inventory {
            cash_cents: 1_000,
            ..Inventory::default()
        };
        let receipt = apply_purchase(
            &policy,
            0,
            &mut inventory,
            &[StoreLine {
                item: SupplyKind::Ammunition,
                quantity: 2,
            }],
        )
        .expect("purchase");
        assert_eq!(receipt.total_cost_cents, 400);
        assert_eq!(inventory.bullets, 40);
        assert_eq!(inventory.cash_cents, 600);
        assert_eq!(remaining_capacity(&policy, &inventory, SupplyKind::Ammunition), 98);
    }
}
