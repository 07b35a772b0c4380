//! Move oracle: remote move source with timeout, cooldown and offline
//! fallback.

mod adapter;
mod breaker;
mod environment;
mod error;
mod resolver;

pub use adapter::MoveOracle;
pub use breaker::{BreakerState, CooldownBreaker, DEFAULT_COOLDOWN};
pub use environment::{AlwaysOnline, Clock, Connectivity, ConnectivityFlag, TokioClock};
pub use error::{RATE_LIMIT_SIGNATURES, ResolverError, ResolverErrorKind, has_rate_limit_signature};
pub use resolver::{MoveResolver, NoRemote, validate_reply};
