use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassDirection {
    Cw,
    Ccw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispenseMethod {
    Booster,
    SingleRandom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Replacement {
    Always,
    UnderflowOnly,
    /// Never produced by the scheduler; accepted for config round-tripping
    /// but always rejected by the validator (see DESIGN.md Open Questions).
    StartOfRound,
}

/// A dispenser's source: either a known set code or an index into the
/// room's `custom_card_lists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispenserSource {
    Set(String),
    CustomList(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispenserSpec {
    pub source: DispenserSource,
    pub method: DispenseMethod,
    pub replacement: Replacement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardQuantity {
    pub name: String,
    pub set_code: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomCardList {
    pub card_quantities: Vec<CardQuantity>,
}

/// How many cards a dispensation draws: a fixed quantity, or "everything the
/// dispenser has" (booster dispensers only — custom-list dispensers reject
/// `dispense_all`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantity {
    Fixed(u32),
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispensation {
    pub dispenser_index: usize,
    pub chairs: Vec<usize>,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoosterRoundSpec {
    pub pass_direction: PassDirection,
    pub selection_seconds: u32,
    pub dispensations: Vec<Dispensation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedRoundSpec {
    pub dispensations: Vec<Dispensation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialChair {
    Zero,
    One,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRoundSpec {
    pub initial_chair: InitialChair,
    pub selection_seconds: u32,
    pub dispenser_index: usize,
    pub post_round_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundSpec {
    Booster(BoosterRoundSpec),
    Sealed(SealedRoundSpec),
    Grid(GridRoundSpec),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfiguration {
    pub name: String,
    pub password: Option<String>,
    pub bot_count: usize,
    pub chair_count: usize,
    pub dispensers: Vec<DispenserSpec>,
    pub custom_card_lists: Vec<CustomCardList>,
    pub rounds: Vec<RoundSpec>,
}
