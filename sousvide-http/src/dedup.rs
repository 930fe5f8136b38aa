//! Retransmission suppression by transport sequence number
//!
//! Only the most recent sequence number is remembered. A request that
//! arrives between two copies of another is therefore routed again when
//! the second copy shows up; that matches the observable behavior clients
//! have been relying on and is kept as is.

/// Outcome of observing a sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Disposition {
    /// Same number as the previous packet; answer with a bare ack
    Duplicate,
    /// New number; route the request
    Fresh,
}

/// Single-entry sequence number history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceDedup {
    previous: Option<u32>,
}

impl SequenceDedup {
    /// Empty history; the first packet is always fresh
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// Classify `sequence` and remember it
    pub fn observe(&mut self, sequence: u32) -> Disposition {
        if self.previous == Some(sequence) {
            Disposition::Duplicate
        } else {
            self.previous = Some(sequence);
            Disposition::Fresh
        }
    }

    /// Last sequence number seen
    pub fn previous(&self) -> Option<u32> {
        self.previous
    }
}
