//! Trade offer generation and resolution.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::{Inventory, Item, SupplyKind};
use crate::policy::StorePolicy;

const TRADE_MAX_OXEN: u32 = 2;
const TRADE_MAX_CLOTHING: u32 = 5;
const TRADE_MAX_BULLETS: u32 = 80;
const TRADE_MAX_FOOD_LBS: u32 = 100;
const TRADE_MAX_CASH_CENTS: u32 = 2_000;

const TRADE_GOODS: [SupplyKind; 8] = SupplyKind::ALL;

/// A trader's proposal: the party gives `give` and receives `receive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub give: Item,
    pub receive: Item,
}

impl TradeOffer {
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "A trader offers {} in exchange for {}.",
            self.receive.kind.describe(self.receive.quantity),
            self.give.kind.describe(self.give.quantity)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeResolution {
    Accepted,
    Declined,
    NoOffer,
    Unaffordable,
}

/// Draw a trader who wants something the party holds.
pub fn generate_offer<R: Rng>(inventory: &Inventory, rng: &mut R) -> Option<TradeOffer> {
    let give_candidates: Vec<SupplyKind> = TRADE_GOODS
        .iter()
        .copied()
        .filter(|kind| inventory.quantity(*kind) > 0)
        .collect();
    if give_candidates.is_empty() {
        return None;
    }
    let give_kind = give_candidates[rng.gen_range(0..give_candidates.len())];

    let receive_candidates: Vec<SupplyKind> = TRADE_GOODS
        .iter()
        .copied()
        .filter(|kind| *kind != give_kind)
        .collect();
    let receive_kind = receive_candidates[rng.gen_range(0..receive_candidates.len())];

    let give_amount = sample_amount(rng, give_kind).min(inventory.quantity(give_kind));
    let receive_amount = sample_amount(rng, receive_kind);
    log::debug!(
        "trade offer: {give_amount} {} for {receive_amount} {}",
        give_kind.key(),
        receive_kind.key()
    );
    Some(TradeOffer {
        give: Item::new(give_kind, give_amount),
        receive: Item::new(receive_kind, receive_amount),
    })
}

/// Apply an accepted offer. Received goods are capped at carrying limits.
pub fn accept_offer(
    inventory: &mut Inventory,
    offer: &TradeOffer,
    policy: &StorePolicy,
) -> TradeResolution {
    let held = inventory.quantity(offer.give.kind);
    if offer.give.quantity == 0 || held < offer.give.quantity {
        return TradeResolution::Unaffordable;
    }
    inventory.take(offer.give.kind, offer.give.quantity);
    inventory.add_capped(
        offer.receive.kind,
        offer.receive.quantity,
        policy.cap(offer.receive.kind),
    );
    TradeResolution::Accepted
}

fn sample_amount<R: Rng>(rng: &mut R, kind: SupplyKind) -> u32 {
    let (min, max) = amount_bounds(kind);
    if min == max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

const fn amount_bounds(kind: SupplyKind) -> (u32, u32) {
    match kind {
        SupplyKind::Oxen => (1, TRADE_MAX_OXEN),
        SupplyKind::Clothing => (1, TRADE_MAX_CLOTHING),
        SupplyKind::Ammunition => (20, TRADE_MAX_BULLETS),
        SupplyKind::Wheel | SupplyKind::Axle | SupplyKind::Tongue => (1, 1),
        SupplyKind::Food => (25, TRADE_MAX_FOOD_LBS),
        SupplyKind::Cash => (500, TRADE_MAX_CASH_CENTS),
    }
}
