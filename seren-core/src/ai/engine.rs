//! Reply resolution engine
//!
//! Holds the one strategy resolved at construction time and guarantees the
//! caller always receives a usable reply: hosted failures are logged,
//! flagged on the reply, and answered by the rule-based responder instead.

use crate::config::Config;
use crate::types::ChatMessage;

use super::hosted::HostedResponder;
use super::rules::RuleResponder;

/// Which strategy produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Hosted,
    Rules,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Hosted => "hosted",
            ReplySource::Rules => "rules",
        }
    }
}

/// A resolved reply.
///
/// `degraded` is the side-channel advisory: true when the hosted strategy
/// failed and the text came from the local fallback instead. The text
/// itself is always conversationally valid.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
    pub degraded: bool,
}

enum Strategy {
    /// Hosted primary with its own per-call rule fallback
    Hosted {
        hosted: HostedResponder,
        fallback: RuleResponder,
    },
    /// Rules only (no credential configured)
    Rules(RuleResponder),
}

/// Engine resolving replies through the configured strategy.
pub struct ReplyEngine {
    strategy: Strategy,
}

impl ReplyEngine {
    /// Resolve the strategy from configuration, once, at startup.
    ///
    /// The hosted strategy is selected only when an API credential is
    /// configured; a credential that fails client construction degrades to
    /// rules-only with a warning rather than an error.
    pub fn from_config(config: &Config) -> Self {
        if let Some(ai) = config.ai.as_ref().filter(|ai| ai.is_ready()) {
            match HostedResponder::new(ai) {
                Ok(hosted) => {
                    tracing::info!(model = %ai.model, "Reply engine using hosted strategy");
                    return Self {
                        strategy: Strategy::Hosted {
                            hosted,
                            fallback: RuleResponder::new(),
                        },
                    };
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Hosted strategy unavailable, using rules");
                }
            }
        } else {
            tracing::info!("No AI credential configured, reply engine using rules");
        }
        Self::rules_only()
    }

    /// Build a rules-only engine.
    pub fn rules_only() -> Self {
        Self::with_rules(RuleResponder::new())
    }

    /// Build a rules-only engine around a specific responder (seeded in
    /// tests).
    pub fn with_rules(rules: RuleResponder) -> Self {
        Self {
            strategy: Strategy::Rules(rules),
        }
    }

    /// Whether the hosted strategy was selected at construction.
    pub fn is_hosted(&self) -> bool {
        matches!(self.strategy, Strategy::Hosted { .. })
    }

    /// Resolve a reply. Never fails: any internal error is absorbed and
    /// converted into a rule-based reply.
    pub async fn generate(&self, message: &str, history: &[ChatMessage]) -> Reply {
        match &self.strategy {
            Strategy::Hosted { hosted, fallback } => {
                match hosted.generate(message, history).await {
                    Ok(text) => Reply {
                        text,
                        source: ReplySource::Hosted,
                        degraded: false,
                    },
                    Err(e) => {
                        tracing::warn!(error = %e, "Hosted reply failed, using rule fallback");
                        Reply {
                            text: fallback.reply(message),
                            source: ReplySource::Rules,
                            degraded: true,
                        }
                    }
                }
            }
            Strategy::Rules(rules) => Reply {
                text: rules.reply(message),
                source: ReplySource::Rules,
                degraded: false,
            },
        }
    }
}
