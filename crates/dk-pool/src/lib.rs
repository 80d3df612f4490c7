//! Card-pool selection and pack/card dispensing: the rarity-weighted draw
//! behind booster packs, and the two dispenser kinds (fresh booster, and
//! draw-without-replacement custom list).

mod dispenser;
mod selector;

pub use dispenser::BoosterDispenser;
pub use dispenser::CustomListDispenser;
pub use dispenser::Dispenser;
pub use dispenser::DispenserError;
pub use selector::CardPoolSelector;
pub use selector::Rarity;
pub use selector::Slot;
