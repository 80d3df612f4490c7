use dk_cards::Card;
use dk_core::Chair;
use dk_core::ID;
use dk_cards::Pack;
use std::fmt;

/// Why a submitted pick was rejected. The draft's state is unaffected by a
/// `SelectionError`; it is reported to the offending client only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    NotCurrentPack { chair: Chair, pack_id: ID<Pack> },
    CardNotAvailable { card: Card },
    NotInSelectingPhase,
    NotAGridRound,
    UnknownSlice { slice_index: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCurrentPack { chair, pack_id } => {
                write!(f, "chair {chair} does not hold pack {pack_id}")
            }
            Self::CardNotAvailable { card } => write!(f, "card {card} is not available to select"),
            Self::NotInSelectingPhase => write!(f, "draft is not in a selecting phase"),
            Self::NotAGridRound => write!(f, "current round is not a grid round"),
            Self::UnknownSlice { slice_index } => write!(f, "slice {slice_index} is not available"),
        }
    }
}

impl std::error::Error for SelectionError {}
