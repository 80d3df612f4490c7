use crate::selector::CardPoolSelector;
use crate::selector::Slot;
use dk_cards::Card;
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispenserError {
    EmptyRarityBucket,
    DispenseAllUnsupported,
}

impl fmt::Display for DispenserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRarityBucket => write!(f, "no cards left at the requested rarity"),
            Self::DispenseAllUnsupported => write!(f, "dispense_all is not supported by this dispenser"),
        }
    }
}

impl std::error::Error for DispenserError {}

/// Produces ordered lists of cards for a round's dispensations.
pub trait Dispenser {
    fn dispense(&mut self, quantity: usize) -> Result<Vec<Card>, DispenserError>;
    fn dispense_all(&mut self) -> Result<Vec<Card>, DispenserError>;
}

/// `BoosterDispenser::dispense` with `quantity > 1` concatenates `quantity`
/// independently-reset packs into one flat card list rather than producing
/// `quantity` separate packs; a caller that wraps the result in a single pack
/// gets one oversized pack. Configs that would hit this are rejected by the
/// room configuration validator, which requires `Quantity::Fixed(1)` for any
/// dispensation backed by a booster-method dispenser.

/// Dispenses one fresh, statistically independent pack per call. The
/// selector's removed-card mirror is reset after every pack, not once per
/// round, so packs never share state.
pub struct BoosterDispenser<R: Rng> {
    set_code: String,
    booster_slots: Vec<Slot>,
    selector: CardPoolSelector<R>,
}

impl<R: Rng> BoosterDispenser<R> {
    pub fn new(set_code: impl Into<String>, booster_slots: Vec<Slot>, selector: CardPoolSelector<R>) -> Self {
        Self {
            set_code: set_code.into(),
            booster_slots,
            selector,
        }
    }

    /// Build one pack: one card per configured slot, in slot order.
    fn dispense_one_pack(&mut self) -> Result<Vec<Card>, DispenserError> {
        let mut cards = Vec::with_capacity(self.booster_slots.len());
        for slot in &self.booster_slots {
            let card = self
                .selector
                .select(*slot)
                .ok_or(DispenserError::EmptyRarityBucket)?;
            cards.push(card);
        }
        self.selector.reset();
        Ok(cards)
    }
}

impl<R: Rng> Dispenser for BoosterDispenser<R> {
    fn dispense(&mut self, quantity: usize) -> Result<Vec<Card>, DispenserError> {
        let mut all = Vec::new();
        for _ in 0..quantity {
            all.extend(self.dispense_one_pack()?);
        }
        Ok(all)
    }

    fn dispense_all(&mut self) -> Result<Vec<Card>, DispenserError> {
        self.dispense_one_pack()
    }
}

impl<R: Rng> fmt::Debug for BoosterDispenser<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoosterDispenser")
            .field("set_code", &self.set_code)
            .field("booster_slots", &self.booster_slots.len())
            .finish()
    }
}

/// Draws without replacement from a quantity-expanded custom list. When the
/// available list is exhausted it is refilled by swapping the entire
/// dispensed list back in, matching the original underflow-refill behavior;
/// `dispense_all` is not supported.
pub struct CustomListDispenser<R: Rng> {
    available: Vec<Card>,
    dispensed: Vec<Card>,
    rng: R,
}

impl<R: Rng> CustomListDispenser<R> {
    pub fn new(card_quantities: Vec<(Card, u32)>, rng: R) -> Self {
        let mut available = Vec::new();
        for (card, quantity) in card_quantities {
            for _ in 0..quantity {
                available.push(card.clone());
            }
        }
        Self {
            available,
            dispensed: Vec::new(),
            rng,
        }
    }

    fn dispense_one(&mut self) -> Result<Card, DispenserError> {
        if self.available.is_empty() {
            std::mem::swap(&mut self.available, &mut self.dispensed);
        }
        if self.available.is_empty() {
            return Err(DispenserError::EmptyRarityBucket);
        }
        let index = self.rng.random_range(0..self.available.len());
        let card = self.available.remove(index);
        self.dispensed.push(card.clone());
        Ok(card)
    }
}

impl<R: Rng> Dispenser for CustomListDispenser<R> {
    fn dispense(&mut self, quantity: usize) -> Result<Vec<Card>, DispenserError> {
        let mut out = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            out.push(self.dispense_one()?);
        }
        Ok(out)
    }

    fn dispense_all(&mut self) -> Result<Vec<Card>, DispenserError> {
        Err(DispenserError::DispenseAllUnsupported)
    }
}

impl<R: Rng> fmt::Debug for CustomListDispenser<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomListDispenser")
            .field("available", &self.available.len())
            .field("dispensed", &self.dispensed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Rarity;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn booster_resets_between_packs() {
        let selector = CardPoolSelector::new(
            vec![(Rarity::Common, Card::unresolved("X"))],
            SmallRng::seed_from_u64(1),
            0.125,
        );
        let mut dispenser = BoosterDispenser::new("ICE", vec![Slot::Common], selector);
        let pack1 = dispenser.dispense(1).unwrap();
        let pack2 = dispenser.dispense(1).unwrap();
        assert_eq!(pack1.len(), 1);
        assert_eq!(pack2.len(), 1);
        assert_eq!(pack1[0].name, "X");
        assert_eq!(pack2[0].name, "X");
    }

    #[test]
    fn custom_list_refills_on_underflow() {
        let mut dispenser = CustomListDispenser::new(
            vec![(Card::unresolved("A"), 1), (Card::unresolved("B"), 1)],
            SmallRng::seed_from_u64(2),
        );
        let drawn: Vec<_> = (0..4).map(|_| dispenser.dispense(1).unwrap().remove(0)).collect();
        assert_eq!(drawn.len(), 4);
        assert!(dispenser.dispense_all().is_err());
    }
}
