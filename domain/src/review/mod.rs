//! Independent review domain.
//!
//! A linguist scores a translation on its fidelity to the annotated face
//! act; a critic checks the argument against two fixed rubric rules. This
//! module holds the structured reply types, their parsing, and the
//! [`ReviewResult`] row produced for each (linguist, task) pair.

mod parsing;
mod result;
mod schema;

pub use parsing::{ReviewOutcome, extract_score, parse_critic_review, parse_linguist_review};
pub use result::ReviewResult;
pub use schema::{CriticReview, LinguistReview};
