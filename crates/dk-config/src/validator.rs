use crate::catalog::SetCatalog;
use crate::model::DispenseMethod;
use crate::model::DispenserSource;
use crate::model::Quantity;
use crate::model::RoomConfiguration;
use crate::model::RoundSpec;
use dk_core::MIN_CHAIR_COUNT;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidChairCount,
    InvalidBotCount,
    InvalidRoundCount,
    InvalidDispenserCount,
    InvalidSetCode,
    InvalidDispenserConfig,
    InvalidDraftType,
    InvalidRoundConfig,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidChairCount => "invalid chair count",
            Self::InvalidBotCount => "invalid bot count",
            Self::InvalidRoundCount => "invalid round count",
            Self::InvalidDispenserCount => "invalid dispenser count",
            Self::InvalidSetCode => "invalid set code",
            Self::InvalidDispenserConfig => "invalid dispenser config",
            Self::InvalidDraftType => "invalid draft type",
            Self::InvalidRoundConfig => "invalid round config",
        };
        write!(f, "{s}")
    }
}

impl std::error::Error for ConfigError {}

/// Validate a RoomConfiguration against a card catalog, in the exact
/// ordered-checks-first-violation-wins sequence the source's room config
/// validator uses.
pub fn validate(config: &RoomConfiguration, catalog: &dyn SetCatalog) -> Result<(), ConfigError> {
    if config.chair_count < MIN_CHAIR_COUNT {
        return Err(ConfigError::InvalidChairCount);
    }
    if config.bot_count >= config.chair_count {
        return Err(ConfigError::InvalidBotCount);
    }
    if config.rounds.is_empty() {
        return Err(ConfigError::InvalidRoundCount);
    }
    if config.dispensers.is_empty() {
        return Err(ConfigError::InvalidDispenserCount);
    }

    for dispenser in &config.dispensers {
        if let DispenserSource::Set(set_code) = &dispenser.source {
            if !catalog.has_set(set_code) {
                return Err(ConfigError::InvalidSetCode);
            }
            if dispenser.method == DispenseMethod::Booster {
                let has_slots = catalog
                    .booster_slots(set_code)
                    .map(|slots| !slots.is_empty())
                    .unwrap_or(false);
                if !has_slots {
                    return Err(ConfigError::InvalidDispenserConfig);
                }
            }
        }
    }

    for round in &config.rounds {
        // Unlike the original implementation (which only ever validated
        // booster rounds), this accepts any of the three recognized round
        // kinds; an unrecognized kind cannot be constructed at all because
        // RoundSpec is a closed enum, so this branch only guards dispensation
        // shape, not kind recognition.
        match round {
            RoundSpec::Booster(booster) => {
                if booster.dispensations.is_empty() {
                    return Err(ConfigError::InvalidRoundConfig);
                }
                for d in &booster.dispensations {
                    if d.dispenser_index >= config.dispensers.len() {
                        return Err(ConfigError::InvalidRoundConfig);
                    }
                    let is_booster_method = config
                        .dispensers
                        .get(d.dispenser_index)
                        .map(|spec| spec.method == DispenseMethod::Booster)
                        .unwrap_or(false);
                    if is_booster_method && matches!(d.quantity, Quantity::Fixed(q) if q > 1) {
                        return Err(ConfigError::InvalidRoundConfig);
                    }
                }
            }
            RoundSpec::Sealed(sealed) => {
                if sealed.dispensations.is_empty() {
                    return Err(ConfigError::InvalidRoundConfig);
                }
                for d in &sealed.dispensations {
                    if d.dispenser_index >= config.dispensers.len() {
                        return Err(ConfigError::InvalidRoundConfig);
                    }
                    let is_booster_method = config
                        .dispensers
                        .get(d.dispenser_index)
                        .map(|spec| spec.method == DispenseMethod::Booster)
                        .unwrap_or(false);
                    if is_booster_method && matches!(d.quantity, Quantity::Fixed(q) if q > 1) {
                        return Err(ConfigError::InvalidRoundConfig);
                    }
                }
            }
            RoundSpec::Grid(grid) => {
                if grid.dispenser_index >= config.dispensers.len() {
                    return Err(ConfigError::InvalidRoundConfig);
                }
                if config.chair_count != dk_core::GRID_CHAIR_COUNT {
                    return Err(ConfigError::InvalidDraftType);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::model::BoosterRoundSpec;
    use crate::model::DispenserSpec;
    use crate::model::Dispensation;
    use crate::model::PassDirection;
    use crate::model::Quantity;
    use crate::model::Replacement;
    use dk_pool::Slot;

    fn base_config() -> RoomConfiguration {
        RoomConfiguration {
            name: "room".into(),
            password: None,
            bot_count: 0,
            chair_count: 2,
            dispensers: vec![DispenserSpec {
                source: DispenserSource::Set("ICE".into()),
                method: DispenseMethod::Booster,
                replacement: Replacement::Always,
            }],
            custom_card_lists: vec![],
            rounds: vec![RoundSpec::Booster(BoosterRoundSpec {
                pass_direction: PassDirection::Cw,
                selection_seconds: 60,
                dispensations: vec![Dispensation {
                    dispenser_index: 0,
                    chairs: vec![0, 1],
                    quantity: Quantity::Fixed(1),
                }],
            })],
        }
    }

    fn catalog_with_ice() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_set("ICE", vec![Slot::Common], vec![]);
        catalog
    }

    #[test]
    fn accepts_well_formed_config() {
        assert!(validate(&base_config(), &catalog_with_ice()).is_ok());
    }

    #[test]
    fn rejects_low_chair_count() {
        let mut config = base_config();
        config.chair_count = 1;
        assert_eq!(
            validate(&config, &catalog_with_ice()),
            Err(ConfigError::InvalidChairCount)
        );
    }

    #[test]
    fn rejects_bot_count_at_or_above_chairs() {
        let mut config = base_config();
        config.bot_count = 2;
        assert_eq!(
            validate(&config, &catalog_with_ice()),
            Err(ConfigError::InvalidBotCount)
        );
    }

    #[test]
    fn rejects_unknown_set_code() {
        let mut config = base_config();
        config.dispensers[0].source = DispenserSource::Set("UNKNOWN".into());
        assert_eq!(
            validate(&config, &catalog_with_ice()),
            Err(ConfigError::InvalidSetCode)
        );
    }

    #[test]
    fn rejects_booster_method_on_set_without_slots() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_set("ICE", vec![], vec![]);
        assert_eq!(
            validate(&base_config(), &catalog),
            Err(ConfigError::InvalidDispenserConfig)
        );
    }

    #[test]
    fn rejects_out_of_range_dispenser_index() {
        let mut config = base_config();
        if let RoundSpec::Booster(b) = &mut config.rounds[0] {
            b.dispensations[0].dispenser_index = 9;
        }
        assert_eq!(
            validate(&config, &catalog_with_ice()),
            Err(ConfigError::InvalidRoundConfig)
        );
    }

    #[test]
    fn rejects_fixed_quantity_above_one_for_booster_dispensation() {
        let mut config = base_config();
        if let RoundSpec::Booster(b) = &mut config.rounds[0] {
            b.dispensations[0].quantity = Quantity::Fixed(2);
        }
        assert_eq!(
            validate(&config, &catalog_with_ice()),
            Err(ConfigError::InvalidRoundConfig)
        );
    }

    #[test]
    fn check_order_chair_count_wins_over_bot_count() {
        let mut config = base_config();
        config.chair_count = 1;
        config.bot_count = 5;
        assert_eq!(
            validate(&config, &catalog_with_ice()),
            Err(ConfigError::InvalidChairCount)
        );
    }
}
