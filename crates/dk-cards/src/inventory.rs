use crate::card::BasicLand;
use crate::card::Card;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A zone within a player's inventory. `Auto` holds cards the engine placed
/// on the player's behalf (auto-picks, sealed dispensations) without an
/// interactive choice; it is otherwise identical to `Main` for hashing and
/// counting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Main,
    Sideboard,
    Junk,
    Auto,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Zone::Main => "main",
            Zone::Sideboard => "sideboard",
            Zone::Junk => "junk",
            Zone::Auto => "auto",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    CardNotInZone { card: Card, zone: Zone },
    NegativeBasicCount { basic: BasicLand, zone: Zone },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardNotInZone { card, zone } => {
                write!(f, "card {card} not present in zone {zone}")
            }
            Self::NegativeBasicCount { basic, zone } => {
                write!(f, "basic land count for {basic} in zone {zone} would go negative")
            }
        }
    }
}

impl std::error::Error for InventoryError {}

/// Three-zone card container plus per-zone basic-land counters. Owned by a
/// Player Adapter; every confirmed selection and every client-initiated move
/// is applied here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    main: Vec<Card>,
    sideboard: Vec<Card>,
    junk: Vec<Card>,
    auto: Vec<Card>,
    basics: HashMap<(Zone, u8), u32>,
}

fn basic_key(basic: BasicLand) -> u8 {
    BasicLand::ALL.iter().position(|b| *b == basic).unwrap() as u8
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn zone_mut(&mut self, zone: Zone) -> &mut Vec<Card> {
        match zone {
            Zone::Main => &mut self.main,
            Zone::Sideboard => &mut self.sideboard,
            Zone::Junk => &mut self.junk,
            Zone::Auto => &mut self.auto,
        }
    }

    pub fn zone(&self, zone: Zone) -> &[Card] {
        match zone {
            Zone::Main => &self.main,
            Zone::Sideboard => &self.sideboard,
            Zone::Junk => &self.junk,
            Zone::Auto => &self.auto,
        }
    }

    /// Add a card to a zone directly, with no source-zone check. Used by
    /// confirmed selections and sealed dispensations.
    pub fn add(&mut self, zone: Zone, card: Card) {
        self.zone_mut(zone).push(card);
    }

    /// Move one instance of `card` from `from` to `to`. Fails if the card is
    /// not present in `from`.
    pub fn move_card(&mut self, from: Zone, to: Zone, card: &Card) -> Result<(), InventoryError> {
        let source = self.zone_mut(from);
        let position = source
            .iter()
            .position(|c| c == card)
            .ok_or_else(|| InventoryError::CardNotInZone {
                card: card.clone(),
                zone: from,
            })?;
        let removed = source.remove(position);
        self.zone_mut(to).push(removed);
        Ok(())
    }

    pub fn basic_count(&self, zone: Zone, basic: BasicLand) -> u32 {
        *self.basics.get(&(zone, basic_key(basic))).unwrap_or(&0)
    }

    /// Adjust a basic-land counter by `delta` (may be negative). Fails if the
    /// result would be negative.
    pub fn adjust_basic(&mut self, zone: Zone, basic: BasicLand, delta: i32) -> Result<(), InventoryError> {
        let current = self.basic_count(zone, basic) as i32;
        let updated = current + delta;
        if updated < 0 {
            return Err(InventoryError::NegativeBasicCount { basic, zone });
        }
        self.basics.insert((zone, basic_key(basic)), updated as u32);
        Ok(())
    }

    /// Total card count in a zone: non-basic cards plus expanded basics.
    pub fn size(&self, zone: Zone) -> usize {
        let basics: u32 = BasicLand::ALL
            .iter()
            .map(|b| self.basic_count(zone, *b))
            .sum();
        self.zone(zone).len() + basics as usize
    }

    pub fn all_basics(&self, zone: Zone) -> Vec<(BasicLand, u32)> {
        BasicLand::ALL
            .iter()
            .map(|b| (*b, self.basic_count(zone, *b)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_size() {
        let mut inv = Inventory::new();
        inv.add(Zone::Main, Card::new("Disenchant", "ICE"));
        assert_eq!(inv.size(Zone::Main), 1);
        assert_eq!(inv.size(Zone::Sideboard), 0);
    }

    #[test]
    fn move_card_requires_presence() {
        let mut inv = Inventory::new();
        let card = Card::new("Disenchant", "ICE");
        assert!(inv.move_card(Zone::Main, Zone::Sideboard, &card).is_err());
        inv.add(Zone::Main, card.clone());
        assert!(inv.move_card(Zone::Main, Zone::Sideboard, &card).is_ok());
        assert_eq!(inv.size(Zone::Main), 0);
        assert_eq!(inv.size(Zone::Sideboard), 1);
    }

    #[test]
    fn basic_counters_never_go_negative() {
        let mut inv = Inventory::new();
        assert!(inv.adjust_basic(Zone::Main, BasicLand::Plains, -1).is_err());
        inv.adjust_basic(Zone::Main, BasicLand::Plains, 3).unwrap();
        assert_eq!(inv.basic_count(Zone::Main, BasicLand::Plains), 3);
        inv.adjust_basic(Zone::Main, BasicLand::Plains, -3).unwrap();
        assert_eq!(inv.basic_count(Zone::Main, BasicLand::Plains), 0);
    }

    #[test]
    fn size_includes_basics() {
        let mut inv = Inventory::new();
        inv.add(Zone::Main, Card::new("Plains", ""));
        inv.adjust_basic(Zone::Main, BasicLand::Island, 4).unwrap();
        assert_eq!(inv.size(Zone::Main), 5);
    }
}
