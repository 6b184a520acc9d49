//! Local CLI command handlers.

pub mod config;
pub mod form;
pub mod replay;
pub mod submit;
pub mod validate;

pub use config::{ConfigFormat, run_config_check, run_config_show};
pub use form::FormArgs;
pub use replay::{EventArg, run_replay};
pub use submit::run_submit;
pub use validate::run_validate;

use reservation_infra::SubmitOutcome;

/// JSON view of a submit decision.
pub(crate) fn outcome_json(outcome: &SubmitOutcome) -> serde_json::Value {
    match outcome {
        SubmitOutcome::Rejected { rules, messages } => serde_json::json!({
            "decision": "rejected",
            "rules": rules,
            "messages": messages,
        }),
        SubmitOutcome::Confirmed { view } => serde_json::json!({
            "decision": "confirmed",
            "view": view,
        }),
    }
}

/// Text lines for a list of messages.
pub(crate) fn push_message_lines(out: &mut String, messages: &[&str]) {
    out.push_str("messages:\n");
    for message in messages {
        out.push_str("- ");
        out.push_str(message);
        out.push('\n');
    }
}
