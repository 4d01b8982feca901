//! Judging outcomes.
//!
//! - [`label::WinnerLabel`] / [`label::VerdictDomain`]: the labels a judge may name
//! - [`entities::Verdict`] / [`entities::VerdictTally`]: one judge's decision and the panel count
//! - [`parsing::parse_verdict`]: total parser from free-form judge output

pub mod entities;
pub mod label;
pub mod parsing;

pub use entities::{Verdict, VerdictTally};
pub use label::{VerdictDomain, WinnerLabel};
pub use parsing::{MAX_FALLBACK_REASONING_CHARS, ParseSource, ParsedVerdict, parse_verdict};
