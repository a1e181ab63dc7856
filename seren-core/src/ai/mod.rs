//! Reply resolution for the chat companion
//!
//! Two interchangeable strategies sit behind one contract: generate a
//! supportive reply from a user message and a bounded history tail. The
//! hosted strategy calls an OpenAI-compatible API; the rule-based strategy
//! matches ordered regex categories locally. [`ReplyEngine`] resolves one
//! strategy at construction time and never surfaces a failure to the
//! caller — any hosted failure degrades to a rule-based reply for that
//! call.

pub mod engine;
pub mod hosted;
pub mod rules;
pub mod session;

pub use engine::{Reply, ReplyEngine, ReplySource};
pub use hosted::HostedResponder;
pub use rules::RuleResponder;
pub use session::{ChatSession, CHAT_KEY, HISTORY_CAP};
