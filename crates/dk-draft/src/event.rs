use dk_cards::Card;
use dk_core::Chair;
use dk_core::RoundIndex;
use dk_core::ID;
use dk_cards::Pack;

/// How an automatic selection was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSelectionKind {
    /// The pack reached the seat with exactly one unselected card left.
    AutoLastCard,
    /// The seat's selection timer expired.
    AutoTimedOut,
}

/// Events emitted by the Draft reducer after processing a command. Player
/// Adapters translate these into wire `ServerMessage`s; the reducer itself
/// never touches a transport.
#[derive(Debug, Clone)]
pub enum Event {
    /// A chair's pack queue grew; `queue_size` is the new total.
    PackQueued { chair: Chair, queue_size: usize },
    /// A new pack became the chair's current pack.
    NewCurrentPack {
        chair: Chair,
        pack_id: ID<Pack>,
        unselected: Vec<Card>,
    },
    /// A pick was accepted, manually or automatically.
    CardSelected {
        chair: Chair,
        pack_id: ID<Pack>,
        card: Card,
        auto: Option<AutoSelectionKind>,
    },
    /// A grid line was taken by a chair; `cards` are the line's contents in
    /// slice order.
    LineSelected {
        chair: Chair,
        slice_index: usize,
        cards: Vec<Card>,
    },
    /// A submitted grid line choice was rejected (wrong turn, unavailable
    /// slice, or not currently in a grid round).
    LineSelectionRejected { chair: Chair, slice_index: usize },
    /// A sealed dispensation placed cards directly into a chair's inventory,
    /// with no interactive selection.
    SealedCardsDispensed { chair: Chair, cards: Vec<Card> },
    /// A submitted pick was rejected; draft state is unchanged.
    SelectionRejected {
        chair: Chair,
        pack_id: ID<Pack>,
        card: Card,
    },
    /// A round or the whole draft reached a boundary.
    RoundStage { round: RoundIndex, complete: bool },
    /// The draft aborted and released all resources.
    DraftAborted { reason: String },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::PackQueued { chair, queue_size } => {
                write!(f, "chair {chair}: queue now {queue_size}")
            }
            Event::NewCurrentPack { chair, unselected, .. } => {
                write!(f, "chair {chair}: new pack ({} cards)", unselected.len())
            }
            Event::CardSelected { chair, card, auto, .. } => match auto {
                Some(AutoSelectionKind::AutoLastCard) => write!(f, "chair {chair}: auto-took {card} (last card)"),
                Some(AutoSelectionKind::AutoTimedOut) => write!(f, "chair {chair}: auto-took {card} (timeout)"),
                None => write!(f, "chair {chair}: took {card}"),
            },
            Event::SelectionRejected { chair, card, .. } => {
                write!(f, "chair {chair}: rejected pick of {card}")
            }
            Event::LineSelected { chair, slice_index, .. } => {
                write!(f, "chair {chair}: took grid line {slice_index}")
            }
            Event::LineSelectionRejected { chair, slice_index } => {
                write!(f, "chair {chair}: rejected grid line {slice_index}")
            }
            Event::SealedCardsDispensed { chair, cards } => {
                write!(f, "chair {chair}: received {} sealed cards", cards.len())
            }
            Event::RoundStage { round, complete } if *complete => {
                write!(f, "draft complete (round {round})")
            }
            Event::RoundStage { round, .. } => write!(f, "round {round} stage change"),
            Event::DraftAborted { reason } => write!(f, "draft aborted: {reason}"),
        }
    }
}
