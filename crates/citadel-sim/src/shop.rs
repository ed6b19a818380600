//! Tower shop: rarity-weighted offers and the free-refresh budget.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::debug;

use citadel_core::balance::{rarity_weight, tower_archetype, TOWER_ARCHETYPES};
use citadel_core::constants::{SHOP_FREE_REFRESHES, SHOP_OFFER_COUNT};
use citadel_core::enums::TowerKind;
use citadel_core::state::{ShopOfferView, ShopView};

/// One offer slot. Bought offers stay in place, marked as purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopOffer {
    pub kind: TowerKind,
    pub purchased: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ShopState {
    offers: Vec<ShopOffer>,
    free_refreshes_left: u32,
    /// Last wave the refresh budget was synced to.
    last_wave: u32,
}

impl ShopState {
    /// A freshly rolled shop with a full refresh budget.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut shop = Self {
            offers: Vec::with_capacity(SHOP_OFFER_COUNT),
            free_refreshes_left: SHOP_FREE_REFRESHES,
            last_wave: 0,
        };
        shop.roll(rng);
        shop
    }

    /// Replace every offer. Draws with replacement, weighted by rarity.
    pub fn roll(&mut self, rng: &mut impl Rng) {
        self.offers.clear();
        let weights = TOWER_ARCHETYPES.iter().map(|a| rarity_weight(a.rarity));
        let Ok(dist) = WeightedIndex::new(weights) else {
            return;
        };
        for _ in 0..SHOP_OFFER_COUNT {
            let kind = TOWER_ARCHETYPES[dist.sample(rng)].kind;
            self.offers.push(ShopOffer {
                kind,
                purchased: false,
            });
        }
        debug!(offers = ?self.offers.iter().map(|o| o.kind).collect::<Vec<_>>(), "shop rolled");
    }

    /// Spend a free refresh. Returns false when none are left.
    pub fn refresh(&mut self, rng: &mut impl Rng) -> bool {
        if self.free_refreshes_left == 0 {
            return false;
        }
        self.free_refreshes_left -= 1;
        self.roll(rng);
        true
    }

    /// Reset the refresh budget when a new wave starts. Wave 1 shares the
    /// budget of the preparation phase.
    pub fn on_wave_started(&mut self, wave: u32) {
        if wave <= self.last_wave {
            return;
        }
        if wave > 1 {
            self.free_refreshes_left = SHOP_FREE_REFRESHES;
        }
        self.last_wave = wave;
    }

    pub fn offer(&self, slot: usize) -> Option<ShopOffer> {
        self.offers.get(slot).copied()
    }

    /// Mark `slot` bought. Returns false if it was missing or already bought.
    pub fn mark_purchased(&mut self, slot: usize) -> bool {
        match self.offers.get_mut(slot) {
            Some(offer) if !offer.purchased => {
                offer.purchased = true;
                true
            }
            _ => false,
        }
    }

    pub fn offers(&self) -> &[ShopOffer] {
        &self.offers
    }

    pub fn free_refreshes_left(&self) -> u32 {
        self.free_refreshes_left
    }

    pub fn view(&self) -> ShopView {
        ShopView {
            offers: self
                .offers
                .iter()
                .enumerate()
                .map(|(slot, offer)| {
                    let archetype = tower_archetype(offer.kind);
                    ShopOfferView {
                        slot,
                        kind: offer.kind,
                        cost: archetype.base_cost,
                        rarity: archetype.rarity,
                        purchased: offer.purchased,
                    }
                })
                .collect(),
            free_refreshes_left: self.free_refreshes_left,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use citadel_core::enums::Rarity;

    #[test]
    fn test_roll_fills_every_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let shop = ShopState::new(&mut rng);
        assert_eq!(shop.offers().len(), SHOP_OFFER_COUNT);
        assert!(shop.offers().iter().all(|o| !o.purchased));
    }

    #[test]
    fn test_rarity_weighting() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut shop = ShopState::default();
        let mut white = 0;
        let mut blue = 0;
        for _ in 0..500 {
            shop.roll(&mut rng);
            for offer in shop.offers() {
                match tower_archetype(offer.kind).rarity {
                    Rarity::White => white += 1,
                    Rarity::Blue => blue += 1,
                    Rarity::Green => {}
                }
            }
        }
        // Expected shares: white 9/14, blue 1/14.
        assert!(white > blue * 4, "white={white} blue={blue}");
        assert!(blue > 0);
    }

    #[test]
    fn test_free_refresh_budget() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut shop = ShopState::new(&mut rng);
        assert!(shop.refresh(&mut rng));
        assert!(shop.refresh(&mut rng));
        assert!(!shop.refresh(&mut rng));
        assert_eq!(shop.free_refreshes_left(), 0);

        // Wave 1 shares the preparation budget.
        shop.on_wave_started(1);
        assert_eq!(shop.free_refreshes_left(), 0);
        shop.on_wave_started(2);
        assert_eq!(shop.free_refreshes_left(), SHOP_FREE_REFRESHES);
        // Repeated notification for the same wave does not reset again.
        assert!(shop.refresh(&mut rng));
        shop.on_wave_started(2);
        assert_eq!(shop.free_refreshes_left(), SHOP_FREE_REFRESHES - 1);
    }

    #[test]
    fn test_mark_purchased_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut shop = ShopState::new(&mut rng);
        assert!(shop.mark_purchased(0));
        assert!(!shop.mark_purchased(0));
        assert!(!shop.mark_purchased(SHOP_OFFER_COUNT));
        assert!(shop.offer(0).map(|o| o.purchased).unwrap_or(false));
    }
}
