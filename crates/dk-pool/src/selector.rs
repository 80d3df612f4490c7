use dk_cards::Card;
use dk_core::Probability;
use rand::Rng;
use std::collections::HashMap;

/// Printed rarity of a card in a set's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    MythicRare,
}

/// A booster slot type, one per position in a set's booster template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Common,
    Uncommon,
    Rare,
    /// Resolves to Rare or MythicRare at selection time.
    RareOrMythicRare,
}

/// Mutable rarity-keyed card pool with reset. `select` draws a uniformly
/// random card of the rolled rarity and moves it out of the pool; `reset`
/// restores everything previously drawn, bit-identical to the starting
/// state.
pub struct CardPoolSelector<R: Rng> {
    mythic_rare_probability: Probability,
    pool: HashMap<Rarity, Vec<Card>>,
    removed: HashMap<Rarity, Vec<Card>>,
    rng: R,
}

impl<R: Rng> CardPoolSelector<R> {
    pub fn new(card_pool: Vec<(Rarity, Card)>, rng: R, mythic_rare_probability: Probability) -> Self {
        let mut pool: HashMap<Rarity, Vec<Card>> = HashMap::new();
        for (rarity, card) in card_pool {
            pool.entry(rarity).or_default().push(card);
        }
        Self {
            mythic_rare_probability,
            pool,
            removed: HashMap::new(),
            rng,
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool.values().map(|v| v.len()).sum()
    }

    /// Move every previously-selected card back into the pool.
    pub fn reset(&mut self) {
        for (rarity, mut cards) in self.removed.drain() {
            self.pool.entry(rarity).or_default().append(&mut cards);
        }
    }

    fn rarity_for_slot(&mut self, slot: Slot) -> Rarity {
        match slot {
            Slot::Common => Rarity::Common,
            Slot::Uncommon => Rarity::Uncommon,
            Slot::Rare => Rarity::Rare,
            Slot::RareOrMythicRare => {
                let roll: f64 = self.rng.random();
                if roll < self.mythic_rare_probability {
                    Rarity::MythicRare
                } else {
                    Rarity::Rare
                }
            }
        }
    }

    /// Select a random unselected card of the slot's rarity and remove it
    /// from the pool. Returns `None` if that rarity bucket is empty.
    pub fn select(&mut self, slot: Slot) -> Option<Card> {
        let rarity = self.rarity_for_slot(slot);
        let bucket = self.pool.get_mut(&rarity)?;
        if bucket.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..bucket.len());
        let card = bucket.remove(index);
        self.removed.entry(rarity).or_default().push(card.clone());
        Some(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn pool() -> Vec<(Rarity, Card)> {
        vec![
            (Rarity::Common, Card::unresolved("C1")),
            (Rarity::Common, Card::unresolved("C2")),
            (Rarity::Rare, Card::unresolved("R1")),
        ]
    }

    #[test]
    fn select_removes_from_pool() {
        let mut selector = CardPoolSelector::new(pool(), SmallRng::seed_from_u64(0), 0.125);
        assert_eq!(selector.pool_size(), 3);
        let drawn = selector.select(Slot::Rare).unwrap();
        assert_eq!(drawn.name, "R1");
        assert_eq!(selector.pool_size(), 2);
        assert!(selector.select(Slot::Rare).is_none());
    }

    #[test]
    fn reset_restores_pool_size() {
        let mut selector = CardPoolSelector::new(pool(), SmallRng::seed_from_u64(0), 0.125);
        selector.select(Slot::Common);
        selector.select(Slot::Rare);
        assert_eq!(selector.pool_size(), 1);
        selector.reset();
        assert_eq!(selector.pool_size(), 3);
    }

    #[test]
    fn empty_rarity_bucket_fails_select() {
        let mut selector = CardPoolSelector::new(pool(), SmallRng::seed_from_u64(0), 0.125);
        assert!(selector.select(Slot::Uncommon).is_none());
    }
}
