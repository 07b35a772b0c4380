//! Remote-first move oracle with offline fallback.

use super::breaker::{BreakerState, CooldownBreaker};
use super::environment::{AlwaysOnline, Clock, Connectivity, TokioClock};
use super::error::{ResolverError, ResolverErrorKind};
use super::resolver::{MoveResolver, validate_reply};
use crate::config::OracleConfig;
use crate::engine::{SkillProfile, choose_move};
use crate::games::tictactoe::rules::{empty_cells, is_full};
use crate::games::tictactoe::{Board, Side};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Asks a remote move source first and falls back to the heuristic engine.
///
/// `request_move` and `request_hint` never fail: remote failures are logged
/// and answered by the offline engine. Clones share the cooldown breaker and
/// random source.
#[derive(Debug, Clone)]
pub struct MoveOracle {
    engine_side: Side,
    breaker: Arc<CooldownBreaker>,
    clock: Arc<dyn Clock>,
    connectivity: Arc<dyn Connectivity>,
    rng: Arc<Mutex<SmallRng>>,
}

impl MoveOracle {
    /// Creates an oracle playing `engine_side`, with the tokio clock, no
    /// connectivity checks, a 60 second cooldown and an entropy-seeded
    /// random source.
    #[instrument]
    pub fn new(engine_side: Side) -> Self {
        Self {
            engine_side,
            breaker: Arc::new(CooldownBreaker::default()),
            clock: Arc::new(TokioClock),
            connectivity: Arc::new(AlwaysOnline),
            rng: Arc::new(Mutex::new(SmallRng::from_entropy())),
        }
    }

    /// Creates an oracle from configuration.
    #[instrument(skip(config))]
    pub fn from_config(config: &OracleConfig) -> Self {
        Self::new(*config.engine_side()).with_cooldown(config.cooldown())
    }

    /// Replaces the cooldown window. Starts a fresh, closed breaker.
    pub fn with_cooldown(mut self, window: Duration) -> Self {
        self.breaker = Arc::new(CooldownBreaker::new(window));
        self
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the connectivity check.
    pub fn with_connectivity(mut self, connectivity: Arc<dyn Connectivity>) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Seeds the fallback engine's random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(SmallRng::seed_from_u64(seed)));
        self
    }

    /// The side the engine plays; the human plays the other.
    pub fn engine_side(&self) -> Side {
        self.engine_side
    }

    /// Breaker state right now.
    pub fn breaker_state(&self) -> BreakerState {
        self.breaker.state(self.clock.now())
    }

    /// Move for `side` on `board`.
    ///
    /// Tries `resolver` unless the cooldown is active or the network is
    /// down, waiting at most `timeout`. Any failure, or a reply that is not
    /// an empty square, falls back to the heuristic engine. A rate-limited
    /// failure also opens the cooldown.
    #[instrument(
        skip(self, board, resolver),
        fields(board = %board, resolver = resolver.name())
    )]
    pub async fn request_move(
        &self,
        board: &Board,
        side: Side,
        skill: SkillProfile,
        resolver: Arc<dyn MoveResolver>,
        timeout: Duration,
    ) -> usize {
        if is_full(board) {
            error!("Move requested on a full board");
            return self.fallback(board, side, skill);
        }

        if let BreakerState::Open { until } = self.breaker.state(self.clock.now()) {
            let remaining = until.saturating_duration_since(self.clock.now());
            warn!(
                remaining_ms = remaining.as_millis() as u64,
                "Remote move source cooling down, using offline engine"
            );
            return self.fallback(board, side, skill);
        }

        if !self.connectivity.is_online() {
            warn!("Network unavailable, using offline engine");
            return self.fallback(board, side, skill);
        }

        match self.ask_remote(board, side, skill, resolver, timeout).await {
            Ok(pos) => {
                self.breaker.record_success(self.clock.now());
                info!(pos, "Remote move accepted");
                pos
            }
            Err(err) => {
                warn!(error = %err, "Remote move failed, using offline engine");
                if err.is_rate_limited() {
                    self.breaker.trip(self.clock.now());
                }
                self.fallback(board, side, skill)
            }
        }
    }

    /// Best move for the human (the side opposite [`Self::engine_side`]).
    ///
    /// The board is relabeled so the human's marks read as the engine's,
    /// then the engine's perfect move is requested. Positions do not change
    /// under relabeling, so the index applies to `board` directly.
    #[instrument(skip(self, board, resolver), fields(board = %board))]
    pub async fn request_hint(
        &self,
        board: &Board,
        resolver: Arc<dyn MoveResolver>,
        timeout: Duration,
    ) -> usize {
        let relabeled = board.relabeled();
        self.request_move(
            &relabeled,
            self.engine_side,
            SkillProfile::Perfect,
            resolver,
            timeout,
        )
        .await
    }

    /// Races the resolver against `timeout`.
    ///
    /// The resolver runs in its own task. On timeout the task is detached,
    /// not cancelled, and whatever it eventually returns is dropped.
    async fn ask_remote(
        &self,
        board: &Board,
        side: Side,
        skill: SkillProfile,
        resolver: Arc<dyn MoveResolver>,
        timeout: Duration,
    ) -> Result<usize, ResolverError> {
        let snapshot = *board;
        let task = tokio::spawn(async move { resolver.resolve(snapshot, side, skill).await });

        let raw = match tokio::time::timeout(timeout, task).await {
            Ok(Ok(reply)) => reply?,
            Ok(Err(join_err)) => {
                return Err(ResolverError::new(ResolverErrorKind::Network(format!(
                    "resolver task failed: {join_err}"
                ))));
            }
            Err(_) => {
                return Err(ResolverError::new(ResolverErrorKind::Timeout(
                    timeout.as_millis() as u64,
                )));
            }
        };
        validate_reply(board, raw)
    }

    /// Offline engine move. A full board is a caller bug; it is logged and
    /// answered with square 0 rather than propagated.
    fn fallback(&self, board: &Board, side: Side, skill: SkillProfile) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        match choose_move(board, side, skill, &mut *rng) {
            Ok(pos) => pos,
            Err(err) => {
                error!(error = %err, "Offline engine has no move");
                empty_cells(board).first().copied().unwrap_or(0)
            }
        }
    }
}
