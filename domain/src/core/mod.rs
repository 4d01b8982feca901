//! Core domain concepts shared across all subdomains.
//!
//! - [`participant::Participant`] - the LLM vendors that debate, discuss and judge
//! - [`topic::Topic`] - a validated topic to pose to the participants
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod participant;
pub mod string;
pub mod topic;
