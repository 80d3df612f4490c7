use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// An opaque card reference: a name plus the set it was printed in. The
/// engine never interprets card text or rules; cards are compared purely by
/// this pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub set_code: String,
}

impl Card {
    pub fn new(name: impl Into<String>, set_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            set_code: set_code.into(),
        }
    }

    /// A card with no resolved set, used when a client reports a card by
    /// name only.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.set_code.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.set_code)
        }
    }
}

/// The five basic land types, tracked as per-zone counters on an Inventory
/// rather than as individual Card instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicLand {
    Plains,
    Island,
    Swamp,
    Mountain,
    Forest,
}

impl BasicLand {
    pub const ALL: [BasicLand; 5] = [
        BasicLand::Plains,
        BasicLand::Island,
        BasicLand::Swamp,
        BasicLand::Mountain,
        BasicLand::Forest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BasicLand::Plains => "Plains",
            BasicLand::Island => "Island",
            BasicLand::Swamp => "Swamp",
            BasicLand::Mountain => "Mountain",
            BasicLand::Forest => "Forest",
        }
    }
}

impl fmt::Display for BasicLand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_set_when_present() {
        let card = Card::new("Disenchant", "ICE");
        assert_eq!(card.to_string(), "Disenchant (ICE)");
    }

    #[test]
    fn display_omits_empty_set() {
        let card = Card::unresolved("Disenchant");
        assert_eq!(card.to_string(), "Disenchant");
    }

    #[test]
    fn equality_is_name_and_set() {
        assert_ne!(Card::new("Plains", "ICE"), Card::new("Plains", "4ED"));
        assert_eq!(Card::new("Plains", "ICE"), Card::new("Plains", "ICE"));
    }
}
