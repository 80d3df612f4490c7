use crate::chair::ChairState;
use crate::event::AutoSelectionKind;
use crate::event::Event;
use crate::grid::available_lines;
use crate::timer::Timer;
use dk_cards::Card;
use dk_cards::Pack;
use dk_cards::SelectedBy;
use dk_config::InitialChair;
use dk_config::PassDirection;
use dk_config::Quantity;
use dk_config::RoomConfiguration;
use dk_config::RoundSpec;
use dk_core::Chair;
use dk_core::Millis;
use dk_core::RoundIndex;
use dk_core::Unique;
use dk_core::ID;
use dk_pool::Dispenser;
use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Dispensing,
    Selecting,
    PostRound,
    Complete,
}

/// Commands accepted by the reducer. `TimerTick` carries the current
/// logical time explicitly so tests can drive it deterministically.
pub enum DraftCommand {
    AdminStart,
    PlayerPick { chair: Chair, pack_id: ID<Pack>, card: Card },
    PlayerSelectLine { chair: Chair, slice_index: usize },
    TimerTick { now: Millis },
    PlayerDisconnect { chair: Chair },
    PlayerReconnect { chair: Chair },
}

struct GridState {
    cards: Vec<Card>,
    taken: BTreeSet<usize>,
    active_chair: Chair,
}

/// The pure-reducer draft state machine. Owns no transport and no async
/// runtime dependency; the hosting layer feeds it commands from a single
/// queue and fans the returned events back out.
pub struct Draft {
    rounds: Vec<RoundSpec>,
    dispensers: Vec<Box<dyn Dispenser>>,
    round_index: RoundIndex,
    phase: RoundPhase,
    chairs: Vec<ChairState>,
    timers: Vec<Timer>,
    post_round_timer: Timer,
    grid: Option<GridState>,
    rng: SmallRng,
    /// Logical clock, advanced only by `TimerTick`. Timers are started
    /// relative to this, never to a hardcoded origin, so a round that opens
    /// long after draft start still gets a full selection window.
    now: Millis,
}

impl Draft {
    pub fn new(config: &RoomConfiguration, dispensers: Vec<Box<dyn Dispenser>>, rng: SmallRng) -> Self {
        let chairs = (0..config.chair_count).map(|_| ChairState::new()).collect();
        let timers = vec![Timer::cleared(); config.chair_count];
        Self {
            rounds: config.rounds.clone(),
            dispensers,
            round_index: -1,
            phase: RoundPhase::Complete,
            chairs,
            timers,
            post_round_timer: Timer::cleared(),
            grid: None,
            rng,
            now: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round_index(&self) -> RoundIndex {
        self.round_index
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RoundPhase::Complete && self.round_index >= 0
    }

    pub fn apply(&mut self, cmd: DraftCommand) -> Vec<Event> {
        match cmd {
            DraftCommand::AdminStart => self.start(),
            DraftCommand::PlayerPick { chair, pack_id, card } => self.player_pick(chair, pack_id, card),
            DraftCommand::PlayerSelectLine { chair, slice_index } => self.player_select_line(chair, slice_index),
            DraftCommand::TimerTick { now } => self.timer_tick(now),
            DraftCommand::PlayerDisconnect { chair } => {
                // The seat's timer keeps running; nothing else changes.
                log::debug!("chair {chair} disconnected");
                vec![]
            }
            DraftCommand::PlayerReconnect { chair } => self.resync(chair),
        }
    }

    fn start(&mut self) -> Vec<Event> {
        if self.round_index >= 0 {
            return vec![];
        }
        self.round_index = 0;
        self.dispense_round(0)
    }

    fn current_round(&self) -> Option<&RoundSpec> {
        self.rounds.get(self.round_index as usize)
    }

    fn dispense_round(&mut self, index: RoundIndex) -> Vec<Event> {
        self.phase = RoundPhase::Dispensing;
        let round = match self.rounds.get(index as usize) {
            Some(r) => r.clone(),
            None => return self.complete(),
        };
        for chair in &mut self.chairs {
            chair.pick_index = 0;
        }

        let mut events = Vec::new();
        match round {
            RoundSpec::Booster(booster) => {
                for d in &booster.dispensations {
                    let quantity = match d.quantity {
                        Quantity::Fixed(q) => q as usize,
                        Quantity::All => 1,
                    };
                    for &chair in &d.chairs {
                        let dispenser = &mut self.dispensers[d.dispenser_index];
                        let cards = match d.quantity {
                            Quantity::All => dispenser.dispense_all(),
                            Quantity::Fixed(_) => dispenser.dispense(quantity),
                        };
                        let cards = match cards {
                            Ok(c) => c,
                            Err(e) => return self.abort(e.to_string()),
                        };
                        self.chairs[chair].enqueue(Pack::new(cards));
                        events.push(Event::PackQueued {
                            chair,
                            queue_size: self.chairs[chair].queue.len(),
                        });
                    }
                }
                self.phase = RoundPhase::Selecting;
                events.extend(self.promote_all(booster.selection_seconds as Millis));
            }
            RoundSpec::Sealed(sealed) => {
                for d in &sealed.dispensations {
                    let quantity = match d.quantity {
                        Quantity::Fixed(q) => q as usize,
                        Quantity::All => 1,
                    };
                    for &chair in &d.chairs {
                        let dispenser = &mut self.dispensers[d.dispenser_index];
                        let cards = match d.quantity {
                            Quantity::All => dispenser.dispense_all(),
                            Quantity::Fixed(_) => dispenser.dispense(quantity),
                        };
                        let cards = match cards {
                            Ok(c) => c,
                            Err(e) => return self.abort(e.to_string()),
                        };
                        events.push(Event::SealedCardsDispensed { chair, cards });
                    }
                }
                events.extend(self.close_round());
            }
            RoundSpec::Grid(grid) => {
                let dispenser = &mut self.dispensers[grid.dispenser_index];
                let cards = match dispenser.dispense(9) {
                    Ok(c) => c,
                    Err(e) => return self.abort(e.to_string()),
                };
                let active_chair = match grid.initial_chair {
                    InitialChair::Zero => 0,
                    InitialChair::One => 1,
                };
                self.grid = Some(GridState {
                    cards,
                    taken: BTreeSet::new(),
                    active_chair,
                });
                self.phase = RoundPhase::Selecting;
            }
        }
        events
    }

    /// For every chair with an empty current pack and a non-empty queue,
    /// promote the head of the queue and start its timer (or immediately
    /// auto-select if only one card remains).
    fn promote_all(&mut self, selection_seconds: Millis) -> Vec<Event> {
        let now = self.now;
        let mut events = Vec::new();
        for chair in 0..self.chairs.len() {
            if self.chairs[chair].promote_next() {
                let pack = self.chairs[chair].current.as_ref().unwrap();
                let pack_id = pack.id();
                if pack.unselected_count() == 1 {
                    let card = pack.unselected_cards()[0].clone();
                    events.push(Event::NewCurrentPack {
                        chair,
                        pack_id,
                        unselected: vec![card.clone()],
                    });
                    events.extend(self.auto_select(chair, pack_id, &card, AutoSelectionKind::AutoLastCard));
                } else {
                    let unselected: Vec<Card> = pack.unselected_cards().into_iter().cloned().collect();
                    events.push(Event::NewCurrentPack { chair, pack_id, unselected });
                    self.timers[chair] = Timer::start(now, selection_seconds * 1000);
                }
            }
        }
        events
    }

    fn player_pick(&mut self, chair: Chair, pack_id: ID<Pack>, card: Card) -> Vec<Event> {
        if self.phase != RoundPhase::Selecting || self.grid.is_some() {
            return vec![Event::SelectionRejected { chair, pack_id, card }];
        }
        let Some(current) = self.chairs[chair].current.as_ref() else {
            return vec![Event::SelectionRejected { chair, pack_id, card }];
        };
        if current.id() != pack_id || !current.contains_unselected(&card) {
            return vec![Event::SelectionRejected { chair, pack_id, card }];
        }
        self.timers[chair].clear();
        self.accept_pick(chair, pack_id, card, None)
    }

    fn auto_select(&mut self, chair: Chair, pack_id: ID<Pack>, card: &Card, kind: AutoSelectionKind) -> Vec<Event> {
        self.timers[chair].clear();
        self.accept_pick(chair, pack_id, card.clone(), Some(kind))
    }

    /// Mark the card as taken, pass or destroy the pack, and emit the
    /// resulting events. Assumes the caller already validated the pick.
    fn accept_pick(&mut self, chair: Chair, pack_id: ID<Pack>, card: Card, auto: Option<AutoSelectionKind>) -> Vec<Event> {
        let mut events = Vec::new();
        let round = self.round_index;
        let direction = self.current_pass_direction();

        let mut pack = self.chairs[chair].current.take().expect("validated current pack");
        let marker = SelectedBy {
            chair,
            round,
            pick: self.chairs[chair].pick_index,
        };
        pack.select(&card, marker);
        self.chairs[chair].pick_index += 1;

        events.push(Event::CardSelected { chair, pack_id, card, auto });

        if pack.is_drained() {
            // Pack is empty; nothing more to pass.
        } else {
            let next = next_seat(chair, self.chairs.len(), direction);
            self.chairs[next].enqueue(pack);
            events.push(Event::PackQueued {
                chair: next,
                queue_size: self.chairs[next].queue.len(),
            });
        }

        events.extend(self.promote_all(self.selection_seconds()));

        if self.round_fully_drained() {
            events.extend(self.close_round());
        }

        events
    }

    fn current_pass_direction(&self) -> PassDirection {
        match self.current_round() {
            Some(RoundSpec::Booster(b)) => b.pass_direction,
            _ => PassDirection::Cw,
        }
    }

    fn selection_seconds(&self) -> Millis {
        match self.current_round() {
            Some(RoundSpec::Booster(b)) => b.selection_seconds as Millis,
            _ => 0,
        }
    }

    fn round_fully_drained(&self) -> bool {
        self.chairs.iter().all(|c| c.current.is_none() && c.queue.is_empty())
    }

    fn player_select_line(&mut self, chair: Chair, slice_index: usize) -> Vec<Event> {
        if self.phase != RoundPhase::Selecting {
            return vec![Event::LineSelectionRejected { chair, slice_index }];
        }
        let Some(grid) = self.grid.as_mut() else {
            return vec![Event::LineSelectionRejected { chair, slice_index }];
        };
        if chair != grid.active_chair {
            return vec![Event::LineSelectionRejected { chair, slice_index }];
        }
        let lines = available_lines(&grid.taken);
        let Some((_, positions)) = lines.iter().find(|(idx, _)| *idx == slice_index) else {
            return vec![Event::LineSelectionRejected { chair, slice_index }];
        };
        let positions = positions.clone();
        let cards: Vec<Card> = positions.iter().map(|&p| grid.cards[p].clone()).collect();
        grid.taken.extend(positions.iter().copied());

        let mut events = vec![Event::LineSelected { chair, slice_index, cards }];

        if grid.taken.len() == grid.cards.len() {
            self.grid = None;
            events.extend(self.close_round());
        } else {
            grid.active_chair = 1 - grid.active_chair;
        }
        events
    }

    fn timer_tick(&mut self, now: Millis) -> Vec<Event> {
        self.now = now;
        let mut events = Vec::new();
        for chair in 0..self.chairs.len() {
            if self.chairs[chair].current.is_some() && self.timers[chair].expired(now) {
                let pack = self.chairs[chair].current.as_ref().unwrap();
                let unselected = pack.unselected_cards();
                if unselected.is_empty() {
                    // Stale expiry against an already-drained pack: no-op.
                    continue;
                }
                let index = self.rng.random_range(0..unselected.len());
                let card = unselected[index].clone();
                let pack_id = pack.id();
                events.extend(self.auto_select(chair, pack_id, &card, AutoSelectionKind::AutoTimedOut));
            }
        }
        events
    }

    fn resync(&mut self, chair: Chair) -> Vec<Event> {
        if let Some(pack) = self.chairs[chair].current.as_ref() {
            let unselected: Vec<Card> = pack.unselected_cards().into_iter().cloned().collect();
            vec![Event::NewCurrentPack {
                chair,
                pack_id: pack.id(),
                unselected,
            }]
        } else {
            vec![]
        }
    }

    fn close_round(&mut self) -> Vec<Event> {
        self.phase = RoundPhase::PostRound;
        let mut events = vec![Event::RoundStage {
            round: self.round_index,
            complete: false,
        }];
        // TODO: honor post_round_seconds by holding PostRound open for a
        // deferred TimerTick instead of advancing immediately.
        let next_index = self.round_index + 1;
        self.round_index = next_index;
        events.extend(self.dispense_round(next_index));
        events
    }

    fn complete(&mut self) -> Vec<Event> {
        self.phase = RoundPhase::Complete;
        vec![Event::RoundStage { round: -1, complete: true }]
    }

    fn abort(&mut self, reason: String) -> Vec<Event> {
        self.phase = RoundPhase::Complete;
        vec![Event::DraftAborted { reason }]
    }
}

fn next_seat(chair: Chair, chair_count: usize, direction: PassDirection) -> Chair {
    match direction {
        PassDirection::Cw => (chair + 1) % chair_count,
        PassDirection::Ccw => (chair + chair_count - 1) % chair_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_cards::Card;
    use dk_config::BoosterRoundSpec;
    use dk_config::DispenseMethod;
    use dk_config::DispenserSource;
    use dk_config::DispenserSpec;
    use dk_config::Dispensation;
    use dk_config::PassDirection;
    use dk_config::Replacement;
    use dk_pool::BoosterDispenser;
    use dk_pool::CardPoolSelector;
    use dk_pool::Rarity;
    use dk_pool::Slot;
    use rand::SeedableRng;

    fn one_card_booster_config(rounds: usize, chair_count: usize) -> RoomConfiguration {
        let directions = [PassDirection::Cw, PassDirection::Ccw, PassDirection::Cw];
        let round_specs = (0..rounds)
            .map(|i| {
                RoundSpec::Booster(BoosterRoundSpec {
                    pass_direction: directions[i % 3],
                    selection_seconds: 60,
                    dispensations: vec![Dispensation {
                        dispenser_index: 0,
                        chairs: (0..chair_count).collect(),
                        quantity: Quantity::Fixed(1),
                    }],
                })
            })
            .collect();
        RoomConfiguration {
            name: "t".into(),
            password: None,
            bot_count: 0,
            chair_count,
            dispensers: vec![DispenserSpec {
                source: DispenserSource::Set("ICE".into()),
                method: DispenseMethod::Booster,
                replacement: Replacement::Always,
            }],
            custom_card_lists: vec![],
            rounds: round_specs,
        }
    }

    fn single_card_dispenser() -> Box<dyn Dispenser> {
        let selector = CardPoolSelector::new(
            vec![(Rarity::Common, Card::unresolved("X"))],
            SmallRng::seed_from_u64(7),
            0.125,
        );
        Box::new(BoosterDispenser::new("ICE", vec![Slot::Common], selector))
    }

    #[test]
    fn three_round_one_card_packs_auto_last_card() {
        let config = one_card_booster_config(3, 2);
        let mut draft = Draft::new(&config, vec![single_card_dispenser()], SmallRng::seed_from_u64(0));
        let events = draft.apply(DraftCommand::AdminStart);
        // Single-card packs trigger AutoLastCard immediately, so the draft
        // should drive itself to completion in one AdminStart call.
        let completed = events.iter().any(|e| matches!(e, Event::RoundStage { complete: true, .. }));
        assert!(completed, "expected draft to auto-complete: {:?}", events.iter().map(|e| e.to_string()).collect::<Vec<_>>());
        assert!(draft.is_complete());
    }

    #[test]
    fn invalid_pick_then_valid_pick() {
        let selector = CardPoolSelector::new(
            vec![
                (Rarity::Common, Card::unresolved("X")),
                (Rarity::Common, Card::unresolved("Y")),
            ],
            SmallRng::seed_from_u64(3),
            0.125,
        );
        let dispenser: Box<dyn Dispenser> = Box::new(BoosterDispenser::new("ICE", vec![Slot::Common, Slot::Common], selector));
        let config = {
            let mut c = one_card_booster_config(1, 2);
            c.rounds = vec![RoundSpec::Booster(BoosterRoundSpec {
                pass_direction: PassDirection::Cw,
                selection_seconds: 60,
                dispensations: vec![Dispensation {
                    dispenser_index: 0,
                    chairs: vec![0, 1],
                    quantity: Quantity::Fixed(1),
                }],
            })];
            c
        };
        let mut draft = Draft::new(&config, vec![dispenser], SmallRng::seed_from_u64(0));
        draft.apply(DraftCommand::AdminStart);
        let pack_id = draft.chairs[0].current.as_ref().unwrap().id();
        let bogus = Card::unresolved("Z");
        let rejected = draft.apply(DraftCommand::PlayerPick {
            chair: 0,
            pack_id,
            card: bogus.clone(),
        });
        assert!(matches!(rejected[0], Event::SelectionRejected { .. }));
        assert!(draft.chairs[0].current.is_some());

        let real_card = draft.chairs[0].current.as_ref().unwrap().unselected_cards()[0].clone();
        let accepted = draft.apply(DraftCommand::PlayerPick {
            chair: 0,
            pack_id,
            card: real_card,
        });
        assert!(accepted.iter().any(|e| matches!(e, Event::CardSelected { auto: None, .. })));
    }

    #[test]
    fn timeout_auto_pick_is_deterministic_for_seed() {
        let selector = CardPoolSelector::new(
            vec![
                (Rarity::Common, Card::unresolved("A")),
                (Rarity::Common, Card::unresolved("B")),
                (Rarity::Common, Card::unresolved("C")),
            ],
            SmallRng::seed_from_u64(5),
            0.125,
        );
        let dispenser: Box<dyn Dispenser> = Box::new(BoosterDispenser::new("ICE", vec![Slot::Common, Slot::Common, Slot::Common], selector));
        let mut config = one_card_booster_config(1, 2);
        config.rounds = vec![RoundSpec::Booster(BoosterRoundSpec {
            pass_direction: PassDirection::Cw,
            selection_seconds: 1,
            dispensations: vec![Dispensation {
                dispenser_index: 0,
                chairs: vec![0, 1],
                quantity: Quantity::Fixed(1),
            }],
        })];
        let mut draft = Draft::new(&config, vec![dispenser], SmallRng::seed_from_u64(0));
        draft.apply(DraftCommand::AdminStart);
        let events = draft.apply(DraftCommand::TimerTick { now: 1000 });
        assert!(events.iter().any(|e| matches!(
            e,
            Event::CardSelected {
                auto: Some(AutoSelectionKind::AutoTimedOut),
                ..
            }
        )));
    }
}
