//! Structured logging for destination resolution
//!
//! Every resolution step is emitted as a `tracing` event and kept in a bounded
//! in-memory log, so failed lookups stay distinguishable from unregistered
//! names even though both publish an absent destination.

use crate::StrategyKind;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info, warn};

/// Default number of events retained
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 256;

/// Collaborator call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    /// Native name service
    NativeDomain,
    /// TLD registry
    ForeignTld,
    /// Token account fetch
    TokenAccount,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupStage::NativeDomain => "native_domain",
            LookupStage::ForeignTld => "foreign_tld",
            LookupStage::TokenAccount => "token_account",
        };
        f.write_str(name)
    }
}

/// Resolution event
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionEvent {
    /// Quiet-period timer armed
    Scheduled { seq: u64, input: String },
    /// Resolution attempt started
    Started {
        seq: u64,
        input: String,
        strategy: StrategyKind,
    },
    /// Resolution attempt finished and was published
    Resolved {
        seq: u64,
        input: String,
        found: bool,
        token_account: bool,
    },
    /// Collaborator failed, mapped to absence
    LookupFailed {
        stage: LookupStage,
        input: String,
        error: String,
    },
    /// Attempt finished after its input was superseded
    StaleDiscarded { seq: u64, current_seq: u64 },
    /// Empty input cleared the published result
    Cleared { seq: u64 },
    /// Caller replaced the published key directly
    Overridden { key: Option<String> },
}

/// Event with its timestamp
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    /// When the event was recorded
    pub at: DateTime<Utc>,
    /// The event
    pub event: ResolutionEvent,
}

/// Bounded resolution event log
pub struct ResolutionLog {
    capacity: usize,
    events: Mutex<VecDeque<RecordedEvent>>,
}

impl ResolutionLog {
    /// Create a log keeping at most `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Record a scheduled attempt
    pub fn log_scheduled(&self, seq: u64, input: &str) {
        debug!(
            event = "destination_scheduled",
            seq = seq,
            input = %input,
            "Destination resolution scheduled"
        );
        self.push(ResolutionEvent::Scheduled {
            seq,
            input: input.to_string(),
        });
    }

    /// Record an attempt starting its lookups
    pub fn log_started(&self, seq: u64, input: &str, strategy: StrategyKind) {
        debug!(
            event = "destination_resolving",
            seq = seq,
            input = %input,
            strategy = %strategy,
            "Destination resolution started"
        );
        self.push(ResolutionEvent::Started {
            seq,
            input: input.to_string(),
            strategy,
        });
    }

    /// Record a published result
    pub fn log_resolved(&self, seq: u64, input: &str, found: bool, token_account: bool) {
        info!(
            event = "destination_resolved",
            seq = seq,
            input = %input,
            found = found,
            token_account = token_account,
            "Destination resolved"
        );
        self.push(ResolutionEvent::Resolved {
            seq,
            input: input.to_string(),
            found,
            token_account,
        });
    }

    /// Record a collaborator failure
    pub fn log_lookup_failed(&self, stage: LookupStage, input: &str, error: &str) {
        warn!(
            event = "destination_lookup_failed",
            stage = %stage,
            input = %input,
            error = %error,
            "Error resolving destination"
        );
        self.push(ResolutionEvent::LookupFailed {
            stage,
            input: input.to_string(),
            error: error.to_string(),
        });
    }

    /// Record a superseded result
    pub fn log_stale_discarded(&self, seq: u64, current_seq: u64) {
        debug!(
            event = "destination_stale",
            seq = seq,
            current_seq = current_seq,
            "Discarding superseded destination result"
        );
        self.push(ResolutionEvent::StaleDiscarded { seq, current_seq });
    }

    /// Record a clear on empty input
    pub fn log_cleared(&self, seq: u64) {
        debug!(event = "destination_cleared", seq = seq, "Destination cleared");
        self.push(ResolutionEvent::Cleared { seq });
    }

    /// Record a direct key override
    pub fn log_overridden(&self, key: Option<String>) {
        info!(
            event = "destination_overridden",
            key = ?key,
            "Destination key set directly"
        );
        self.push(ResolutionEvent::Overridden { key });
    }

    /// Snapshot of retained events, oldest first
    pub fn events(&self) -> Vec<ResolutionEvent> {
        self.events.lock().iter().map(|e| e.event.clone()).collect()
    }

    /// Retained lookup failures with their timestamps
    pub fn failures(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e.event, ResolutionEvent::LookupFailed { .. }))
            .cloned()
            .collect()
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// No retained events
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all retained events
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn push(&self, event: ResolutionEvent) {
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(RecordedEvent {
            at: Utc::now(),
            event,
        });
    }
}

impl Default for ResolutionLog {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_LOG_CAPACITY)
    }
}
