use crate::catalog::SetCatalog;
use crate::model::DispenseMethod;
use crate::model::DispenserSource;
use crate::model::DispenserSpec;
use crate::model::RoomConfiguration;
use crate::validator::validate;
use crate::validator::ConfigError;
use dk_cards::Card;
use dk_pool::BoosterDispenser;
use dk_pool::CardPoolSelector;
use dk_pool::CustomListDispenser;
use dk_pool::Dispenser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Validates a RoomConfiguration and, if it passes, constructs one runtime
/// Dispenser per configured DispenserSpec. The returned dispensers are
/// positioned to match `config.dispensers` by index, so a round's
/// `dispenser_index` indexes directly into this vector.
pub fn build_dispensers(
    config: &RoomConfiguration,
    catalog: &dyn SetCatalog,
    mythic_rare_probability: f64,
    seed: u64,
) -> Result<Vec<Box<dyn Dispenser>>, ConfigError> {
    validate(config, catalog)?;

    let mut dispensers: Vec<Box<dyn Dispenser>> = Vec::with_capacity(config.dispensers.len());
    for (index, spec) in config.dispensers.iter().enumerate() {
        let rng = SmallRng::seed_from_u64(seed.wrapping_add(index as u64));
        dispensers.push(build_one(spec, config, catalog, mythic_rare_probability, rng)?);
    }
    Ok(dispensers)
}

fn build_one(
    spec: &DispenserSpec,
    config: &RoomConfiguration,
    catalog: &dyn SetCatalog,
    mythic_rare_probability: f64,
    rng: SmallRng,
) -> Result<Box<dyn Dispenser>, ConfigError> {
    match (&spec.source, spec.method) {
        (DispenserSource::Set(set_code), DispenseMethod::Booster) => {
            let slots = catalog
                .booster_slots(set_code)
                .ok_or(ConfigError::InvalidDispenserConfig)?
                .to_vec();
            let pool: Vec<(dk_pool::Rarity, Card)> = catalog
                .card_pool(set_code)
                .ok_or(ConfigError::InvalidDispenserConfig)?
                .to_vec();
            let selector = CardPoolSelector::new(pool, rng, mythic_rare_probability);
            Ok(Box::new(BoosterDispenser::new(set_code.clone(), slots, selector)))
        }
        (DispenserSource::CustomList(list_index), DispenseMethod::SingleRandom) => {
            let list = config
                .custom_card_lists
                .get(*list_index)
                .ok_or(ConfigError::InvalidDispenserConfig)?;
            let quantities = list
                .card_quantities
                .iter()
                .map(|cq| (Card::new(cq.name.clone(), cq.set_code.clone()), cq.quantity))
                .collect();
            Ok(Box::new(CustomListDispenser::new(quantities, rng)))
        }
        _ => Err(ConfigError::InvalidDispenserConfig),
    }
}

/// Build the default three-round booster configuration: CW/CCW/CW, one
/// dispenser per set, 60-second selections.
pub fn default_three_booster_config(set_codes: &[&str], chair_count: usize) -> RoomConfiguration {
    use crate::model::*;

    let dispensers: Vec<DispenserSpec> = set_codes
        .iter()
        .map(|code| DispenserSpec {
            source: DispenserSource::Set((*code).to_string()),
            method: DispenseMethod::Booster,
            replacement: Replacement::Always,
        })
        .collect();

    let all_chairs: Vec<usize> = (0..chair_count).collect();
    let directions = [PassDirection::Cw, PassDirection::Ccw, PassDirection::Cw];

    let rounds = directions
        .into_iter()
        .enumerate()
        .map(|(i, direction)| {
            RoundSpec::Booster(BoosterRoundSpec {
                pass_direction: direction,
                selection_seconds: 60,
                dispensations: vec![Dispensation {
                    dispenser_index: i % dispensers.len().max(1),
                    chairs: all_chairs.clone(),
                    quantity: Quantity::Fixed(1),
                }],
            })
        })
        .collect();

    RoomConfiguration {
        name: "booster draft".into(),
        password: None,
        bot_count: 0,
        chair_count,
        dispensers,
        custom_card_lists: vec![],
        rounds,
    }
}

/// Build the default sealed configuration: one round, six dispensations
/// split across whatever booster dispensers are configured.
pub fn default_sealed_config(set_codes: &[&str], chair_count: usize) -> RoomConfiguration {
    use crate::model::*;

    let dispensers: Vec<DispenserSpec> = set_codes
        .iter()
        .map(|code| DispenserSpec {
            source: DispenserSource::Set((*code).to_string()),
            method: DispenseMethod::Booster,
            replacement: Replacement::Always,
        })
        .collect();

    let all_chairs: Vec<usize> = (0..chair_count).collect();
    let dispensations = (0..6)
        .map(|i| Dispensation {
            dispenser_index: i % dispensers.len().max(1),
            chairs: all_chairs.clone(),
            quantity: Quantity::Fixed(1),
        })
        .collect();

    RoomConfiguration {
        name: "sealed".into(),
        password: None,
        bot_count: 0,
        chair_count,
        dispensers,
        custom_card_lists: vec![],
        rounds: vec![RoundSpec::Sealed(SealedRoundSpec { dispensations })],
    }
}

/// Build the default grid configuration: eighteen rounds (9 positions x 2
/// plies each), dispenser index 0, 5-second post-round delay, alternating
/// starting chair.
pub fn default_grid_config(set_code: &str) -> RoomConfiguration {
    use crate::model::*;

    let rounds = (0..18)
        .map(|i| {
            let initial = if i % 2 == 0 { InitialChair::Zero } else { InitialChair::One };
            RoundSpec::Grid(GridRoundSpec {
                initial_chair: initial,
                selection_seconds: 30,
                dispenser_index: 0,
                post_round_seconds: 5,
            })
        })
        .collect();

    RoomConfiguration {
        name: "grid".into(),
        password: None,
        bot_count: 0,
        chair_count: dk_core::GRID_CHAIR_COUNT,
        dispensers: vec![DispenserSpec {
            source: DispenserSource::Set(set_code.to_string()),
            method: DispenseMethod::Booster,
            replacement: Replacement::Always,
        }],
        custom_card_lists: vec![],
        rounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use dk_pool::Rarity;
    use dk_pool::Slot;

    fn catalog() -> InMemoryCatalog {
        let mut c = InMemoryCatalog::new();
        c.add_set(
            "ICE",
            vec![Slot::Common, Slot::Common, Slot::Rare],
            vec![
                (Rarity::Common, Card::unresolved("C1")),
                (Rarity::Common, Card::unresolved("C2")),
                (Rarity::Rare, Card::unresolved("R1")),
            ],
        );
        c
    }

    #[test]
    fn builds_one_dispenser_per_spec() {
        let config = default_three_booster_config(&["ICE"], 2);
        let dispensers = build_dispensers(&config, &catalog(), 0.125, 42).unwrap();
        assert_eq!(dispensers.len(), 1);
    }

    #[test]
    fn invalid_config_fails_before_building() {
        let mut config = default_three_booster_config(&["ICE"], 2);
        config.chair_count = 1;
        assert!(build_dispensers(&config, &catalog(), 0.125, 42).is_err());
    }

    #[test]
    fn grid_default_has_two_chairs() {
        let config = default_grid_config("ICE");
        assert_eq!(config.chair_count, 2);
        assert_eq!(config.rounds.len(), 18);
    }
}
