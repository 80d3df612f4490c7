use crate::adapter::PlayerAdapter;
use crate::error::ProtocolError;
use crate::message::encode_event;
use crate::message::ClientMessage;
use crate::message::ServerMessage;
use dk_config::RoomConfiguration;
use dk_core::Chair;
use dk_core::Millis;
use dk_core::Unique;
use dk_core::ID;
use dk_draft::Draft;
use dk_draft::DraftCommand;
use dk_draft::Event;
use dk_pool::Dispenser;
use rand::rngs::SmallRng;
use tokio::sync::mpsc::UnboundedSender;

/// Live draft room. Imperative shell around the pure `Draft` reducer: owns
/// chair occupancy, per-chair inventories, and fans reducer events back out
/// to whichever chairs are allowed to see them.
pub struct Room {
    id: ID<Room>,
    name: String,
    password: Option<String>,
    bot_count: usize,
    chairs: Vec<PlayerAdapter>,
    draft: Draft,
}

impl Room {
    pub fn new(id: ID<Room>, config: &RoomConfiguration, dispensers: Vec<Box<dyn Dispenser>>, rng: SmallRng) -> Self {
        let chairs = (0..config.chair_count).map(PlayerAdapter::empty).collect();
        Self {
            id,
            name: config.name.clone(),
            password: config.password.clone(),
            bot_count: config.bot_count,
            chairs,
            draft: Draft::new(config, dispensers, rng),
        }
    }

    pub fn chair_count(&self) -> usize {
        self.chairs.len()
    }

    fn check_password(&self, password: Option<&str>) -> Result<(), ProtocolError> {
        match &self.password {
            Some(expected) if password != Some(expected.as_str()) => Err(ProtocolError::PasswordMismatch),
            _ => Ok(()),
        }
    }

    /// Seat the next open chair. Returns its index once occupied.
    pub fn join(&mut self, name: String, password: Option<&str>, tx: UnboundedSender<String>) -> Result<Chair, ProtocolError> {
        self.check_password(password)?;
        let chair = self
            .chairs
            .iter()
            .position(|c| !c.is_occupied())
            .ok_or(ProtocolError::RoomFull)?;
        self.chairs[chair].occupy(name, tx);
        self.chairs[chair].send(&ServerMessage::connected(&self.name, chair));
        self.maybe_start();
        Ok(chair)
    }

    pub fn disconnect(&mut self, chair: Chair) -> Result<(), ProtocolError> {
        self.chair_mut(chair)?.disconnect();
        let events = self.draft.apply(DraftCommand::PlayerDisconnect { chair });
        self.route(events);
        Ok(())
    }

    pub fn reconnect(
        &mut self,
        chair: Chair,
        password: Option<&str>,
        tx: UnboundedSender<String>,
    ) -> Result<(), ProtocolError> {
        self.check_password(password)?;
        let name = self.chair_mut(chair)?.name().unwrap_or("").to_string();
        self.chair_mut(chair)?.occupy(name, tx);
        self.chairs[chair].send(&ServerMessage::connected(&self.name, chair));
        let events = self.draft.apply(DraftCommand::PlayerReconnect { chair });
        self.route(events);
        self.chairs[chair].send(&self.chairs[chair].snapshot());
        Ok(())
    }

    /// Fire `AdminStart` once the draft hasn't already started and enough
    /// chairs are ready: every occupied chair is ready and together with
    /// `bot_count` they fill the room, or the room is entirely bots.
    fn maybe_start(&mut self) {
        if self.draft.round_index() >= 0 {
            return;
        }
        let required = self.chairs.len().saturating_sub(self.bot_count);
        let occupied: Vec<&PlayerAdapter> = self.chairs.iter().filter(|c| c.is_occupied()).collect();
        let everyone_ready = required == 0 || (occupied.len() >= required && occupied.iter().all(|c| c.is_ready()));
        if everyone_ready {
            let events = self.draft.apply(DraftCommand::AdminStart);
            self.route(events);
        }
    }

    /// Drive the draft's logical clock forward and auto-select any chairs
    /// whose selection timer has expired.
    pub fn tick(&mut self, now: Millis) {
        let events = self.draft.apply(DraftCommand::TimerTick { now });
        self.route(events);
    }

    /// True once the draft has completed or aborted. The lobby tears the
    /// room down once this turns true rather than ticking it forever.
    pub fn is_terminal(&self) -> bool {
        self.draft.is_complete()
    }

    pub fn handle(&mut self, chair: Chair, message: ClientMessage) -> Result<(), ProtocolError> {
        self.chair_mut(chair)?;
        match message {
            ClientMessage::Join { .. } => {
                // Already seated by the time a message reaches here; no-op.
            }
            ClientMessage::Ready { ready } => {
                self.chair_mut(chair)?.set_ready(ready);
                self.maybe_start();
            }
            ClientMessage::InventoryUpdate { moves, basic_adjustments } => {
                let adapter = self.chair_mut(chair)?;
                if !adapter.apply_inventory_update(&moves, &basic_adjustments) {
                    adapter.send(&adapter.snapshot());
                }
            }
            ClientMessage::Pick { pack_id, card } => {
                let events = self.draft.apply(DraftCommand::PlayerPick {
                    chair,
                    pack_id: pack_id.cast(),
                    card,
                });
                self.route(events);
            }
            ClientMessage::SelectLine { slice_index } => {
                let events = self.draft.apply(DraftCommand::PlayerSelectLine { chair, slice_index });
                self.route(events);
            }
            ClientMessage::Chat { text } => {
                self.broadcast(&ServerMessage::Chat { chair, text });
            }
        }
        Ok(())
    }

    fn chair_mut(&mut self, chair: Chair) -> Result<&mut PlayerAdapter, ProtocolError> {
        self.chairs.get_mut(chair).ok_or(ProtocolError::UnknownChair { chair })
    }

    /// Fan reducer events out to the right audience: events that reveal a
    /// chair's own unseen cards are unicast to that chair only, everything
    /// else (shared round/grid state) is broadcast to the whole room.
    fn route(&mut self, events: Vec<Event>) {
        for event in &events {
            for adapter in &mut self.chairs {
                adapter.apply(event);
            }
            let msg = encode_event(event);
            match event {
                Event::NewCurrentPack { chair, .. }
                | Event::CardSelected { chair, .. }
                | Event::LineSelectionRejected { chair, .. }
                | Event::SealedCardsDispensed { chair, .. }
                | Event::SelectionRejected { chair, .. } => {
                    if let Some(adapter) = self.chairs.get(*chair) {
                        adapter.send(&msg);
                    }
                }
                Event::PackQueued { .. }
                | Event::LineSelected { .. }
                | Event::RoundStage { .. }
                | Event::DraftAborted { .. } => self.broadcast(&msg),
            }
        }
    }

    fn broadcast(&self, msg: &ServerMessage) {
        for adapter in &self.chairs {
            adapter.send(msg);
        }
    }
}

impl Unique<Room> for Room {
    fn id(&self) -> ID<Room> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_cards::Card;
    use dk_config::default_three_booster_config;
    use dk_config::InMemoryCatalog;
    use dk_pool::Rarity;
    use dk_pool::Slot;
    use rand::SeedableRng;
    use tokio::sync::mpsc::unbounded_channel;

    fn room() -> Room {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_set(
            "ICE",
            vec![Slot::Common],
            vec![(Rarity::Common, Card::unresolved("X"))],
        );
        let config = default_three_booster_config(&["ICE"], 2);
        let dispensers = dk_config::build_dispensers(&config, &catalog, 0.125, 0).unwrap();
        Room::new(ID::default(), &config, dispensers, SmallRng::seed_from_u64(0))
    }

    #[test]
    fn join_occupies_first_open_chair() {
        let mut room = room();
        let (tx, _rx) = unbounded_channel();
        let chair = room.join("alice".into(), None, tx).unwrap();
        assert_eq!(chair, 0);
    }

    #[test]
    fn room_fills_up_and_rejects_extra_joins() {
        let mut room = room();
        let (tx1, _r1) = unbounded_channel();
        let (tx2, _r2) = unbounded_channel();
        let (tx3, _r3) = unbounded_channel();
        room.join("a".into(), None, tx1).unwrap();
        room.join("b".into(), None, tx2).unwrap();
        assert!(room.join("c".into(), None, tx3).is_err());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_set(
            "ICE",
            vec![Slot::Common],
            vec![(Rarity::Common, Card::unresolved("X"))],
        );
        let mut config = default_three_booster_config(&["ICE"], 2);
        config.password = Some("hunter2".to_string());
        let dispensers = dk_config::build_dispensers(&config, &catalog, 0.125, 0).unwrap();
        let mut room = Room::new(ID::default(), &config, dispensers, SmallRng::seed_from_u64(0));
        let (tx, _rx) = unbounded_channel();
        assert!(matches!(
            room.join("alice".into(), Some("wrong"), tx),
            Err(ProtocolError::PasswordMismatch)
        ));
    }

    #[test]
    fn ready_gating_starts_once_every_chair_is_ready() {
        let mut room = room();
        let (tx1, mut r1) = unbounded_channel();
        let (tx2, mut r2) = unbounded_channel();
        room.join("a".into(), None, tx1).unwrap();
        room.join("b".into(), None, tx2).unwrap();
        // Connected messages only so far; draft must not have started.
        let _connected = r1.try_recv().unwrap();
        assert!(r1.try_recv().is_err());
        room.handle(0, ClientMessage::Ready { ready: true }).unwrap();
        assert!(r1.try_recv().is_err());
        room.handle(1, ClientMessage::Ready { ready: true }).unwrap();
        // Connected message, then at least one NewCurrentPack unicast.
        let _connected = r2.try_recv().unwrap();
        assert!(r1.try_recv().is_ok());
        assert!(r2.try_recv().is_ok());
    }
}
