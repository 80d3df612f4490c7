use crate::card::Card;
use dk_core::Chair;
use dk_core::PickIndex;
use dk_core::RoundIndex;
use dk_core::Unique;
use dk_core::ID;
use serde::Deserialize;
use serde::Serialize;

/// Marks who took a given card out of a Pack, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedBy {
    pub chair: Chair,
    pub round: RoundIndex,
    pub pick: PickIndex,
}

/// An ordered pack of cards moving through a booster or grid round. Once a
/// slot's `selected_by` marker is set it is never cleared; `Pack` only
/// tracks which of its original contents remain available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    id: ID<Pack>,
    slots: Vec<(Card, Option<SelectedBy>)>,
}

impl Pack {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            id: ID::default(),
            slots: cards.into_iter().map(|c| (c, None)).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn selected_count(&self) -> usize {
        self.slots.iter().filter(|(_, m)| m.is_some()).count()
    }

    pub fn unselected_count(&self) -> usize {
        self.size() - self.selected_count()
    }

    pub fn is_drained(&self) -> bool {
        self.unselected_count() == 0
    }

    pub fn unselected_cards(&self) -> Vec<&Card> {
        self.slots
            .iter()
            .filter(|(_, m)| m.is_none())
            .map(|(c, _)| c)
            .collect()
    }

    /// True if `card` is present and not yet selected.
    pub fn contains_unselected(&self, card: &Card) -> bool {
        self.slots.iter().any(|(c, m)| c == card && m.is_none())
    }

    /// Mark the first unselected slot matching `card` as taken. Fails
    /// (returns false) if no such slot exists.
    pub fn select(&mut self, card: &Card, marker: SelectedBy) -> bool {
        for (c, m) in self.slots.iter_mut() {
            if c == card && m.is_none() {
                *m = Some(marker);
                return true;
            }
        }
        false
    }
}

impl Unique<Pack> for Pack {
    fn id(&self) -> ID<Pack> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> SelectedBy {
        SelectedBy {
            chair: 0,
            round: 0,
            pick: 0,
        }
    }

    #[test]
    fn invariant_selected_plus_unselected_equals_size() {
        let mut pack = Pack::new(vec![Card::unresolved("A"), Card::unresolved("B")]);
        assert_eq!(pack.selected_count() + pack.unselected_count(), pack.size());
        pack.select(&Card::unresolved("A"), marker());
        assert_eq!(pack.selected_count() + pack.unselected_count(), pack.size());
        assert_eq!(pack.selected_count(), 1);
    }

    #[test]
    fn select_rejects_already_selected() {
        let mut pack = Pack::new(vec![Card::unresolved("A")]);
        assert!(pack.select(&Card::unresolved("A"), marker()));
        assert!(!pack.select(&Card::unresolved("A"), marker()));
    }

    #[test]
    fn select_rejects_absent_card() {
        let mut pack = Pack::new(vec![Card::unresolved("A")]);
        assert!(!pack.select(&Card::unresolved("Z"), marker()));
    }

    #[test]
    fn drained_when_all_selected() {
        let mut pack = Pack::new(vec![Card::unresolved("A")]);
        assert!(!pack.is_drained());
        pack.select(&Card::unresolved("A"), marker());
        assert!(pack.is_drained());
    }
}
