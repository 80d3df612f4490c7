use crate::card::BasicLand;
use crate::inventory::Inventory;
use crate::inventory::Zone;
use sha1::Digest;
use sha1::Sha1;

const BASE32_DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Normalize a card name the way Cockatrice does before hashing: fold the
/// `Æ` ligature, the typographic apostrophe, collapse slash-runs between
/// split-card halves to " // ", then lowercase.
fn normalize_name(name: &str) -> String {
    let folded = name.replace('Æ', "AE").replace('’', "'");
    let mut out = String::with_capacity(folded.len());
    let mut chars = folded.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '/' || c.is_whitespace() && matches!(chars.peek(), Some('/')) {
            // Skip through any run of whitespace/slashes and emit " // " once.
            let mut saw_slash = c == '/';
            while let Some(&next) = chars.peek() {
                if next == '/' || next.is_whitespace() {
                    saw_slash |= next == '/';
                    chars.next();
                } else {
                    break;
                }
            }
            if saw_slash {
                out.push_str(" // ");
            } else {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out.to_lowercase()
}

/// Canonical, cross-tool-compatible hash of a deck's Main + Sideboard
/// contents. Basic lands are expanded from their per-zone counters; the
/// engine's Junk/Auto zones are not part of a submitted deck and are not
/// hashed — a client moves auto-picked cards into Main/Sideboard before
/// submitting for verification.
pub fn deck_hash(inventory: &Inventory) -> String {
    let mut entries: Vec<String> = Vec::new();

    for zone in [Zone::Main, Zone::Sideboard] {
        let prefix = if zone == Zone::Sideboard { "SB:" } else { "" };

        for card in inventory.zone(zone) {
            entries.push(format!("{prefix}{}", normalize_name(&card.name)));
        }

        for (basic, count) in inventory.all_basics(zone) {
            let name = basic_name(basic);
            for _ in 0..count {
                entries.push(format!("{prefix}{name}"));
            }
        }
    }

    entries.sort();
    let joined = entries.join(";");

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    let digest = hasher.finalize();

    let number: u64 = ((digest[0] as u64) << 32)
        + ((digest[1] as u64) << 24)
        + ((digest[2] as u64) << 16)
        + ((digest[3] as u64) << 8)
        + (digest[4] as u64);

    to_base32_padded(number, 8)
}

fn basic_name(basic: BasicLand) -> String {
    basic.name().to_lowercase()
}

fn to_base32_padded(mut n: u64, width: usize) -> String {
    if n == 0 {
        return "0".repeat(width);
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE32_DIGITS[(n % 32) as usize]);
        n /= 32;
    }
    digits.reverse();
    let s = String::from_utf8(digits).expect("base32 alphabet is ascii");
    if s.len() >= width {
        s
    } else {
        format!("{}{}", "0".repeat(width - s.len()), s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    #[test]
    fn empty_inventory_hash() {
        let inv = Inventory::new();
        assert_eq!(deck_hash(&inv), "r8sq7riu");
    }

    #[test]
    fn single_card_hash() {
        let mut inv = Inventory::new();
        inv.add(Zone::Main, Card::unresolved("Disenchant"));
        assert_eq!(deck_hash(&inv), "68i24pc9");
    }

    #[test]
    fn ligature_and_ascii_variant_match() {
        let mut a = Inventory::new();
        a.add(Zone::Main, Card::unresolved("Æther Burst"));
        let mut b = Inventory::new();
        b.add(Zone::Main, Card::unresolved("AEther Burst"));
        assert_eq!(deck_hash(&a), deck_hash(&b));
        assert_eq!(deck_hash(&a), "hcroa9dk");
    }

    #[test]
    fn split_card_spelling_variants_match() {
        let variants = ["Fire/Ice", "Fire / Ice", "Fire//Ice", "Fire // Ice"];
        let mut inv = Inventory::new();
        for v in variants {
            inv.add(Zone::Main, Card::unresolved(v));
        }
        assert_eq!(deck_hash(&inv), "iq0uqup7");
    }

    #[test]
    fn sideboard_cards_are_prefixed_before_sorting() {
        let mut inv = Inventory::new();
        inv.add(Zone::Sideboard, Card::unresolved("Disenchant"));
        assert_ne!(deck_hash(&inv), "68i24pc9");
    }
}
