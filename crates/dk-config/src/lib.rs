//! Room Configuration model, validation, and the scheduler that turns a
//! validated configuration into runtime dispensers.

mod catalog;
mod model;
mod scheduler;
mod validator;

pub use catalog::InMemoryCatalog;
pub use catalog::SetCatalog;
pub use model::BoosterRoundSpec;
pub use model::CardQuantity;
pub use model::CustomCardList;
pub use model::DispenseMethod;
pub use model::Dispensation;
pub use model::DispenserSource;
pub use model::DispenserSpec;
pub use model::GridRoundSpec;
pub use model::InitialChair;
pub use model::PassDirection;
pub use model::Quantity;
pub use model::Replacement;
pub use model::RoomConfiguration;
pub use model::RoundSpec;
pub use model::SealedRoundSpec;
pub use scheduler::build_dispensers;
pub use scheduler::default_grid_config;
pub use scheduler::default_sealed_config;
pub use scheduler::default_three_booster_config;
pub use validator::validate;
pub use validator::ConfigError;
