//! Runtime configuration, loaded from environment variables with defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub actors: ActorConfig,
    pub checkout: CheckoutConfig,
    pub logging: LoggingConfig,
}

/// Store actor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Mailbox size of each store actor
    pub buffer_size: usize,
}

/// Checkout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Upper bound on one payment authorization call, in milliseconds.
    /// Exceeding it counts as a provider error.
    pub payment_timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actors: ActorConfig { buffer_size: 100 },
            checkout: CheckoutConfig { payment_timeout_ms: 5_000 },
            logging: LoggingConfig { level: "info".to_string() },
        }
    }
}

impl CheckoutConfig {
    pub fn payment_timeout(&self) -> Duration {
        Duration::from_millis(self.payment_timeout_ms)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to [`Config::default`].
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            actors: ActorConfig {
                buffer_size: env::var("TICKETING_ACTOR_BUFFER")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|size| *size > 0)
                    .unwrap_or(defaults.actors.buffer_size),
            },
            checkout: CheckoutConfig {
                payment_timeout_ms: env::var("TICKETING_PAYMENT_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.checkout.payment_timeout_ms),
            },
            logging: LoggingConfig {
                level: env::var("TICKETING_LOG_LEVEL").unwrap_or(defaults.logging.level),
            },
        }
    }
}
