//! Action domain.
//!
//! - `types`: the [`Action`] descriptor (actor + kind + target)
//! - `result`: [`Resolution`] events produced by execution
//! - `cover`: cover redirection for single-target physical hits
//! - `execute`: the resolution pipeline and benefactor target filtering

pub mod cover;
pub mod execute;
pub mod result;
pub mod types;

pub use execute::{ATTACK_CUE, ExecContext, ITEM_CUE, default_cue, execute, sanitize_targets};
pub use result::{Resolution, ResolutionEvent, SkipReason};
pub use types::{Action, ActionKind, Target};
