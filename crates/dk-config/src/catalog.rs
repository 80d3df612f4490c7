use dk_cards::Card;
use dk_pool::Rarity;
use dk_pool::Slot;

/// Read-only provider of per-set booster templates and rarity pools,
/// standing in for an on-disk card database. The validator and scheduler
/// only ever see this trait.
pub trait SetCatalog {
    fn has_set(&self, set_code: &str) -> bool;
    fn booster_slots(&self, set_code: &str) -> Option<&[Slot]>;
    fn card_pool(&self, set_code: &str) -> Option<&[(Rarity, Card)]>;
}

/// In-memory catalog for tests and for small deployments that ship their
/// set data alongside the binary.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    sets: std::collections::HashMap<String, SetEntry>,
}

#[derive(Debug, Clone)]
struct SetEntry {
    booster_slots: Vec<Slot>,
    card_pool: Vec<(Rarity, Card)>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a set with its booster template and rarity pool. An empty
    /// `booster_slots` marks a set as not offering boosters (sealed/grid-only
    /// sets, or single-card custom lists, don't need one).
    pub fn add_set(
        &mut self,
        set_code: impl Into<String>,
        booster_slots: Vec<Slot>,
        card_pool: Vec<(Rarity, Card)>,
    ) {
        self.sets.insert(
            set_code.into(),
            SetEntry {
                booster_slots,
                card_pool,
            },
        );
    }
}

impl SetCatalog for InMemoryCatalog {
    fn has_set(&self, set_code: &str) -> bool {
        self.sets.contains_key(set_code)
    }

    fn booster_slots(&self, set_code: &str) -> Option<&[Slot]> {
        self.sets.get(set_code).map(|e| e.booster_slots.as_slice())
    }

    fn card_pool(&self, set_code: &str) -> Option<&[(Rarity, Card)]> {
        self.sets.get(set_code).map(|e| e.card_pool.as_slice())
    }
}
