use dk_cards::Pack;
use dk_core::PickIndex;
use std::collections::VecDeque;

/// Per-seat state: a FIFO of packs awaiting selection, the pack currently
/// exposed to the player, and the seat's pick counter for the active round.
#[derive(Debug, Default)]
pub struct ChairState {
    pub queue: VecDeque<Pack>,
    pub current: Option<Pack>,
    pub pick_index: PickIndex,
}

impl ChairState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_work(&self) -> bool {
        self.current.is_some() || !self.queue.is_empty()
    }

    /// Promote the head of the queue to `current` if there is no current
    /// pack already. Returns true if a promotion happened.
    pub fn promote_next(&mut self) -> bool {
        if self.current.is_none() {
            if let Some(pack) = self.queue.pop_front() {
                self.current = Some(pack);
                return true;
            }
        }
        false
    }

    pub fn enqueue(&mut self, pack: Pack) {
        self.queue.push_back(pack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_cards::Card;

    #[test]
    fn promote_next_only_when_current_empty() {
        let mut chair = ChairState::new();
        chair.enqueue(Pack::new(vec![Card::unresolved("A")]));
        assert!(chair.promote_next());
        assert!(chair.current.is_some());
        chair.enqueue(Pack::new(vec![Card::unresolved("B")]));
        assert!(!chair.promote_next());
        assert_eq!(chair.queue.len(), 1);
    }
}
