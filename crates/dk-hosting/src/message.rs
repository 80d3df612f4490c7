use dk_cards::BasicLand;
use dk_cards::Card;
use dk_cards::Zone;
use dk_core::Chair;
use dk_core::Millis;
use dk_core::RoundIndex;
use dk_core::ID;
use dk_draft::AutoSelectionKind;
use dk_draft::Event;
use serde::Deserialize;
use serde::Serialize;

/// One requested card move in a `ClientMessage::InventoryUpdate`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CardMove {
    pub card: Card,
    pub from: Zone,
    pub to: Zone,
}

/// One requested basic-land counter adjustment.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BasicAdjustment {
    pub basic: BasicLand,
    pub zone: Zone,
    pub delta: i32,
}

/// One non-empty basic-land counter in an inventory snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct BasicCount {
    pub zone: Zone,
    pub basic: BasicLand,
    pub count: u32,
}

/// Messages a client sends to a room over the WebSocket bridge. Joining
/// itself happens out of band at connection setup (matching the way the
/// HTTP layer already carries room id, name, and password); `Join` is
/// carried for wire-shape completeness but is a no-op once a session has
/// reached the message loop.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Join {
        name: String,
        #[serde(default)]
        password: Option<String>,
    },
    /// Marks this chair ready (or not) to start. The draft starts on its own
    /// once every occupied chair is ready.
    Ready { ready: bool },
    /// Take a card out of the chair's current pack.
    Pick { pack_id: ID<()>, card: Card },
    /// Take a grid line (row, column, or diagonal) by its slice index.
    SelectLine { slice_index: usize },
    /// Move cards between zones and/or adjust basic-land counts.
    InventoryUpdate {
        #[serde(default)]
        moves: Vec<CardMove>,
        #[serde(default)]
        basic_adjustments: Vec<BasicAdjustment>,
    },
    /// Free-text chat relayed to every other chair in the room.
    Chat { text: String },
}

/// Messages a room sends back to clients. One variant per `dk_draft::Event`
/// plus the room-level bookkeeping events the draft reducer never sees.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Connected { room: String, chair: Chair },
    PackQueued { chair: Chair, queue_size: usize },
    NewCurrentPack { chair: Chair, pack_id: ID<()>, unselected: Vec<Card> },
    CardSelected { chair: Chair, pack_id: ID<()>, card: Card, auto: Option<String> },
    LineSelected { chair: Chair, slice_index: usize, cards: Vec<Card> },
    LineSelectionRejected { chair: Chair, slice_index: usize },
    SealedCardsDispensed { chair: Chair, cards: Vec<Card> },
    SelectionRejected { chair: Chair, pack_id: ID<()>, card: Card },
    RoundStage { round: RoundIndex, complete: bool },
    DraftAborted { reason: String },
    /// Full inventory snapshot, used to resynchronize a client after a
    /// rejected inventory move or a reconnect.
    InventorySnapshot {
        main: Vec<Card>,
        sideboard: Vec<Card>,
        junk: Vec<Card>,
        auto: Vec<Card>,
        basics: Vec<BasicCount>,
    },
    Chat { chair: Chair, text: String },
    Pong { now: Millis },
    Error { message: String },
}

impl ServerMessage {
    pub fn connected(room: &str, chair: Chair) -> Self {
        Self::Connected { room: room.to_string(), chair }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

fn auto_label(auto: Option<AutoSelectionKind>) -> Option<String> {
    match auto {
        Some(AutoSelectionKind::AutoLastCard) => Some("last_card".to_string()),
        Some(AutoSelectionKind::AutoTimedOut) => Some("timed_out".to_string()),
        None => None,
    }
}

/// Convert one draft-reducer `Event` into its wire representation. Every
/// `Event` variant has exactly one `ServerMessage` counterpart.
pub fn encode_event(event: &Event) -> ServerMessage {
    match event.clone() {
        Event::PackQueued { chair, queue_size } => ServerMessage::PackQueued { chair, queue_size },
        Event::NewCurrentPack { chair, pack_id, unselected } => ServerMessage::NewCurrentPack {
            chair,
            pack_id: pack_id.cast(),
            unselected,
        },
        Event::CardSelected { chair, pack_id, card, auto } => ServerMessage::CardSelected {
            chair,
            pack_id: pack_id.cast(),
            card,
            auto: auto_label(auto),
        },
        Event::LineSelected { chair, slice_index, cards } => {
            ServerMessage::LineSelected { chair, slice_index, cards }
        }
        Event::LineSelectionRejected { chair, slice_index } => {
            ServerMessage::LineSelectionRejected { chair, slice_index }
        }
        Event::SealedCardsDispensed { chair, cards } => ServerMessage::SealedCardsDispensed { chair, cards },
        Event::SelectionRejected { chair, pack_id, card } => ServerMessage::SelectionRejected {
            chair,
            pack_id: pack_id.cast(),
            card,
        },
        Event::RoundStage { round, complete } => ServerMessage::RoundStage { round, complete },
        Event::DraftAborted { reason } => ServerMessage::DraftAborted { reason },
    }
}
