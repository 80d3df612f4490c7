use crate::message::BasicAdjustment;
use crate::message::BasicCount;
use crate::message::CardMove;
use crate::message::ServerMessage;
use dk_cards::Inventory;
use dk_cards::Zone;
use dk_core::Chair;
use dk_draft::Event;
use tokio::sync::mpsc::UnboundedSender;

/// One seated chair's link to the outside world: the channel back to its
/// bridged WebSocket, and the Inventory that accumulates everything the
/// draft reducer hands it. The adapter never talks to the draft directly;
/// `Room` feeds it events after every `Draft::apply`.
pub struct PlayerAdapter {
    chair: Chair,
    name: Option<String>,
    tx: Option<UnboundedSender<String>>,
    inventory: Inventory,
    ready: bool,
}

impl PlayerAdapter {
    pub fn empty(chair: Chair) -> Self {
        Self {
            chair,
            name: None,
            tx: None,
            inventory: Inventory::new(),
            ready: false,
        }
    }

    pub fn chair(&self) -> Chair {
        self.chair
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_occupied(&self) -> bool {
        self.tx.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Seat a connection at this chair, replacing any previous one
    /// (reconnect).
    pub fn occupy(&mut self, name: String, tx: UnboundedSender<String>) {
        self.name = Some(name);
        self.tx = Some(tx);
    }

    pub fn disconnect(&mut self) {
        self.tx = None;
        self.ready = false;
    }

    /// Apply every requested move and basic-land adjustment in order.
    /// Returns false the moment any one of them is rejected by the
    /// Inventory's own invariants; earlier, already-applied operations in
    /// the same batch are not rolled back.
    pub fn apply_inventory_update(&mut self, moves: &[CardMove], basic_adjustments: &[BasicAdjustment]) -> bool {
        let mut ok = true;
        for mv in moves {
            if self.inventory.move_card(mv.from, mv.to, &mv.card).is_err() {
                ok = false;
            }
        }
        for adj in basic_adjustments {
            if self.inventory.adjust_basic(adj.zone, adj.basic, adj.delta).is_err() {
                ok = false;
            }
        }
        ok
    }

    /// Full inventory snapshot, sent to resynchronize a client after a
    /// rejected move or a reconnect.
    pub fn snapshot(&self) -> ServerMessage {
        let basics = [Zone::Main, Zone::Sideboard, Zone::Junk, Zone::Auto]
            .into_iter()
            .flat_map(|zone| {
                self.inventory
                    .all_basics(zone)
                    .into_iter()
                    .map(move |(basic, count)| BasicCount { zone, basic, count })
            })
            .collect();
        ServerMessage::InventorySnapshot {
            main: self.inventory.zone(Zone::Main).to_vec(),
            sideboard: self.inventory.zone(Zone::Sideboard).to_vec(),
            junk: self.inventory.zone(Zone::Junk).to_vec(),
            auto: self.inventory.zone(Zone::Auto).to_vec(),
            basics,
        }
    }

    /// Deliver a wire message to this chair's bridged client, if connected.
    /// Silently drops the message if the client is disconnected or its
    /// receiver has gone away.
    pub fn send(&self, msg: &ServerMessage) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(msg.to_json());
        }
    }

    /// Apply an event addressed to this chair into the owned Inventory.
    /// Cards the draft hands out with no interactive choice involved
    /// (auto-picks, sealed dispensations) land in the Auto zone for the
    /// player to sort afterward; a chair's own pick — a manual booster
    /// selection or a grid line it chose — goes straight to Main.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::CardSelected { chair, card, auto, .. } if *chair == self.chair => {
                let zone = if auto.is_some() { Zone::Auto } else { Zone::Main };
                self.inventory.add(zone, card.clone());
            }
            Event::LineSelected { chair, cards, .. } if *chair == self.chair => {
                for card in cards {
                    self.inventory.add(Zone::Main, card.clone());
                }
            }
            Event::SealedCardsDispensed { chair, cards } if *chair == self.chair => {
                for card in cards {
                    self.inventory.add(Zone::Auto, card.clone());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_cards::Card;

    #[test]
    fn manual_pick_lands_in_main() {
        let mut adapter = PlayerAdapter::empty(0);
        adapter.apply(&Event::CardSelected {
            chair: 0,
            pack_id: dk_core::ID::default(),
            card: Card::unresolved("Plains"),
            auto: None,
        });
        assert_eq!(adapter.inventory().size(Zone::Main), 1);
        assert_eq!(adapter.inventory().size(Zone::Auto), 0);
    }

    #[test]
    fn auto_pick_lands_in_auto_zone() {
        let mut adapter = PlayerAdapter::empty(0);
        adapter.apply(&Event::CardSelected {
            chair: 0,
            pack_id: dk_core::ID::default(),
            card: Card::unresolved("Plains"),
            auto: Some(dk_draft::AutoSelectionKind::AutoTimedOut),
        });
        assert_eq!(adapter.inventory().size(Zone::Auto), 1);
    }

    #[test]
    fn line_pick_lands_in_main() {
        let mut adapter = PlayerAdapter::empty(0);
        adapter.apply(&Event::LineSelected {
            chair: 0,
            slice_index: 0,
            cards: vec![Card::unresolved("A"), Card::unresolved("B"), Card::unresolved("C")],
        });
        assert_eq!(adapter.inventory().size(Zone::Main), 3);
        assert_eq!(adapter.inventory().size(Zone::Auto), 0);
    }

    #[test]
    fn events_for_other_chairs_are_ignored() {
        let mut adapter = PlayerAdapter::empty(0);
        adapter.apply(&Event::SealedCardsDispensed {
            chair: 1,
            cards: vec![Card::unresolved("Island")],
        });
        assert_eq!(adapter.inventory().size(Zone::Auto), 0);
    }

    #[test]
    fn inventory_update_moves_a_present_card() {
        let mut adapter = PlayerAdapter::empty(0);
        let card = Card::unresolved("Plains");
        adapter.apply(&Event::CardSelected {
            chair: 0,
            pack_id: dk_core::ID::default(),
            card: card.clone(),
            auto: None,
        });
        let ok = adapter.apply_inventory_update(
            &[CardMove { card, from: Zone::Main, to: Zone::Sideboard }],
            &[],
        );
        assert!(ok);
        assert_eq!(adapter.inventory().size(Zone::Main), 0);
        assert_eq!(adapter.inventory().size(Zone::Sideboard), 1);
    }

    #[test]
    fn inventory_update_rejects_move_of_absent_card() {
        let mut adapter = PlayerAdapter::empty(0);
        let ok = adapter.apply_inventory_update(
            &[CardMove {
                card: Card::unresolved("Plains"),
                from: Zone::Main,
                to: Zone::Sideboard,
            }],
            &[],
        );
        assert!(!ok);
    }
}
