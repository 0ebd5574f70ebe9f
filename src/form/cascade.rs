//! Cascade Tickets
//!
//! Each upstream commit issues a ticket for its source field. A dependent
//! load may only land while its ticket is still the latest for that source.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeTicket {
    source: String,
    seq: u64,
}

#[derive(Default)]
pub struct CascadeTracker {
    latest: HashMap<String, u64>,
}

impl CascadeTracker {
    pub fn issue(&mut self, source: &str) -> CascadeTicket {
        let seq = self.latest.entry(source.to_string()).or_default();
        *seq += 1;
        CascadeTicket {
            source: source.to_string(),
            seq: *seq,
        }
    }

    /// Outstanding tickets of `source` go stale, e.g. when the source field
    /// itself was reset by its own upstream.
    pub fn invalidate(&mut self, source: &str) {
        if let Some(seq) = self.latest.get_mut(source) {
            *seq += 1;
        }
    }

    pub fn is_current(&self, ticket: &CascadeTicket) -> bool {
        self.latest.get(&ticket.source) == Some(&ticket.seq)
    }
}
