//! Debounced destination resolution
//!
//! Owns the current input, waits for a quiet period after the last change,
//! resolves the latest value and publishes the result. Every input change
//! bumps a request sequence; an attempt only publishes if its sequence is
//! still current when it completes, so late completions for superseded
//! inputs are dropped without cancelling the network calls behind them.

use crate::cancel::CancelToken;
use crate::{DestinationPipeline, ResolverConfig, Result};
use parking_lot::Mutex;
use sendto_core::{classify, PublicKey, ResolutionLog, ResolutionResult, TokenAccountRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// No pending work
    Idle,
    /// Quiet-period timer running
    Scheduled,
    /// Lookups in flight for the current input
    Resolving,
    /// Latest result published for the latest input
    Settled,
}

/// Published result with the input it was resolved from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationUpdate {
    /// Input the result belongs to, empty after a clear
    pub input: String,
    /// Published destination
    pub result: ResolutionResult,
}

struct ControllerState {
    input: String,
    seq: u64,
    phase: ControllerPhase,
    timer: Option<JoinHandle<()>>,
    torn_down: bool,
}

struct Inner {
    pipeline: Arc<DestinationPipeline>,
    quiet_period: Duration,
    state: Mutex<ControllerState>,
    output: watch::Sender<DestinationUpdate>,
    shutdown: CancelToken,
}

impl Inner {
    fn log(&self) -> &ResolutionLog {
        self.pipeline.log()
    }

    async fn run_attempt(self: Arc<Self>, seq: u64) {
        tokio::time::sleep(self.quiet_period).await;

        let snapshot = {
            let mut state = self.state.lock();
            if state.torn_down || state.seq != seq {
                return;
            }
            // from here on, input changes must not abort this attempt
            state.timer = None;
            state.phase = ControllerPhase::Resolving;
            state.input.clone()
        };

        let strategy = classify(&snapshot);
        self.log().log_started(seq, &snapshot, strategy.kind());

        let result = tokio::select! {
            _ = self.shutdown.cancelled() => return,
            result = self.pipeline.resolve_classified(&strategy, &snapshot) => result,
        };

        let mut state = self.state.lock();
        if state.torn_down {
            return;
        }
        if state.seq != seq {
            self.log().log_stale_discarded(seq, state.seq);
            return;
        }

        self.log().log_resolved(
            seq,
            &snapshot,
            result.public_key.is_some(),
            result.token_account.is_some(),
        );
        state.phase = ControllerPhase::Settled;
        self.output.send_replace(DestinationUpdate {
            input: snapshot,
            result,
        });
    }
}

/// Debounced resolution controller
///
/// Must be driven from within a tokio runtime. Dropping the controller shuts
/// it down.
pub struct DestinationController {
    inner: Arc<Inner>,
}

impl DestinationController {
    /// Create controller over a pipeline
    pub fn new(pipeline: Arc<DestinationPipeline>, quiet_period: Duration) -> Self {
        let (output, _) = watch::channel(DestinationUpdate::default());

        Self {
            inner: Arc::new(Inner {
                pipeline,
                quiet_period,
                state: Mutex::new(ControllerState {
                    input: String::new(),
                    seq: 0,
                    phase: ControllerPhase::Idle,
                    timer: None,
                    torn_down: false,
                }),
                output,
                shutdown: CancelToken::new(),
            }),
        }
    }

    /// Create controller with network-backed collaborators
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        let pipeline = DestinationPipeline::from_config(config)?;
        Ok(Self::new(Arc::new(pipeline), config.quiet_period()))
    }

    /// Update the destination input
    ///
    /// An empty input clears the published result immediately. Any other
    /// change (re)starts the quiet-period timer; a resolution already in
    /// flight keeps running but will not publish.
    pub fn set_input(&self, input: impl Into<String>) {
        let input = input.into();
        let mut state = self.inner.state.lock();

        if state.torn_down {
            debug!("Ignoring input after shutdown");
            return;
        }
        if !input.is_empty() && input == state.input {
            return;
        }

        state.seq += 1;
        let seq = state.seq;
        state.input = input;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }

        if state.input.is_empty() {
            state.phase = ControllerPhase::Idle;
            self.inner.output.send_replace(DestinationUpdate::default());
            self.inner.log().log_cleared(seq);
            return;
        }

        state.phase = ControllerPhase::Scheduled;
        self.inner.log().log_scheduled(seq, &state.input);

        let inner = Arc::clone(&self.inner);
        state.timer = Some(tokio::spawn(inner.run_attempt(seq)));
    }

    /// Set the destination key directly, bypassing resolution
    ///
    /// The token account field is left as is.
    pub fn set_destination_address(&self, key: Option<PublicKey>) {
        let state = self.inner.state.lock();
        if state.torn_down {
            return;
        }

        self.inner.output.send_modify(|update| update.result.public_key = key);
        self.inner.log().log_overridden(key.map(|k| k.to_string()));
    }

    /// Published destination key
    pub fn destination_address(&self) -> Option<PublicKey> {
        self.inner.output.borrow().result.public_key
    }

    /// Published token account
    pub fn destination_account(&self) -> Option<TokenAccountRecord> {
        self.inner.output.borrow().result.token_account.clone()
    }

    /// Published result
    pub fn result(&self) -> ResolutionResult {
        self.inner.output.borrow().result.clone()
    }

    /// Current input
    pub fn input(&self) -> String {
        self.inner.state.lock().input.clone()
    }

    /// Current phase
    pub fn phase(&self) -> ControllerPhase {
        self.inner.state.lock().phase
    }

    /// Watch published results
    pub fn subscribe(&self) -> watch::Receiver<DestinationUpdate> {
        self.inner.output.subscribe()
    }

    /// Wait for the next published result
    ///
    /// Returns `None` once the controller is shut down, since nothing will
    /// publish again.
    pub async fn settled(&self) -> Option<ResolutionResult> {
        let mut rx = self.subscribe();

        tokio::select! {
            biased;
            changed = rx.changed() => {
                changed.ok()?;
                let result = rx.borrow().result.clone();
                Some(result)
            }
            _ = self.inner.shutdown.cancelled() => None,
        }
    }

    /// Resolution event log
    pub fn log(&self) -> Arc<ResolutionLog> {
        self.inner.pipeline.log().clone()
    }

    /// Stop timers and ignore late completions
    pub fn shutdown(&self) {
        {
            let mut state = self.inner.state.lock();
            if state.torn_down {
                return;
            }
            state.torn_down = true;
            state.phase = ControllerPhase::Idle;
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
        }
        self.inner.shutdown.cancel();
        debug!("Destination controller shut down");
    }

    /// Controller has been shut down
    pub fn is_shut_down(&self) -> bool {
        self.inner.state.lock().torn_down
    }
}

impl Drop for DestinationController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
