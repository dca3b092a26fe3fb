//! Tickets for in-flight advice requests.
//!
//! A wizard issues a ticket when it starts waiting for advice text and only
//! accepts the answer that carries the latest ticket. Answers for a step the
//! user already left are dropped.

use uuid::Uuid;

/// Handle for one pending advice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdviceTicket {
    owner: Uuid,
    seq: u64,
}

/// Advice text slot owned by a wizard.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AdviceSlot {
    owner: Uuid,
    issued: u64,
    state: SlotState,
}

#[derive(Debug, Clone, PartialEq)]
enum SlotState {
    Idle,
    Pending(u64),
    Ready(String),
}

impl AdviceSlot {
    pub(crate) fn new(owner: Uuid) -> Self {
        Self {
            owner,
            issued: 0,
            state: SlotState::Idle,
        }
    }

    /// Starts waiting, superseding any earlier ticket.
    pub(crate) fn issue(&mut self) -> AdviceTicket {
        self.issued += 1;
        self.state = SlotState::Pending(self.issued);
        AdviceTicket {
            owner: self.owner,
            seq: self.issued,
        }
    }

    /// Stores `text` if `ticket` is the one currently awaited.
    pub(crate) fn resolve(&mut self, ticket: AdviceTicket, text: String) -> bool {
        match self.state {
            SlotState::Pending(seq) if ticket.owner == self.owner && ticket.seq == seq => {
                self.state = SlotState::Ready(text);
                true
            }
            _ => false,
        }
    }

    /// Forgets any pending request or stored text.
    pub(crate) fn clear(&mut self) {
        self.state = SlotState::Idle;
    }

    pub(crate) fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending(_))
    }

    pub(crate) fn text(&self) -> Option<&str> {
        match &self.state {
            SlotState::Ready(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let mut slot = AdviceSlot::new(Uuid::new_v4());
        let first = slot.issue();
        let second = slot.issue();

        assert!(!slot.resolve(first, "old".to_string()));
        assert!(slot.is_pending());
        assert!(slot.resolve(second, "new".to_string()));
        assert_eq!(slot.text(), Some("new"));
    }

    #[test]
    fn cleared_slot_rejects_ticket() {
        let mut slot = AdviceSlot::new(Uuid::new_v4());
        let ticket = slot.issue();
        slot.clear();
        assert!(!slot.resolve(ticket, "late".to_string()));
        assert_eq!(slot.text(), None);
    }

    #[test]
    fn ticket_from_other_owner_is_rejected() {
        let mut mine = AdviceSlot::new(Uuid::new_v4());
        let mut theirs = AdviceSlot::new(Uuid::new_v4());
        mine.issue();
        let foreign = theirs.issue();
        assert!(!mine.resolve(foreign, "x".to_string()));
    }

    #[test]
    fn resolved_ticket_cannot_be_reused() {
        let mut slot = AdviceSlot::new(Uuid::new_v4());
        let ticket = slot.issue();
        assert!(slot.resolve(ticket, "one".to_string()));
        assert!(!slot.resolve(ticket, "two".to_string()));
        assert_eq!(slot.text(), Some("one"));
    }
}
