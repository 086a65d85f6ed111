//! Pure game math for Tianming.
//!
//! Everything here is synchronous, deterministic given its inputs, and free
//! of I/O: the progression curve, the experience ledger with its grade-up
//! loop, probabilistic option outcomes (the roll is injected, never drawn
//! here), and stat requirement gating.

pub mod curve;
pub mod error;
pub mod gating;
pub mod ledger;
pub mod outcome;

pub use curve::{EP_BASE, GRADE_POWER, experience_required};
pub use error::{LedgerError, LedgerResult};
pub use gating::{UnmetRequirement, first_unmet_requirement};
pub use ledger::{GradeReport, apply_experience, experience_gain};
pub use outcome::{build_result, roll_success};
