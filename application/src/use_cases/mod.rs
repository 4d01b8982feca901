//! Use cases (application services)

pub mod run_debate;
pub mod run_discussion;
pub mod run_judges;
pub mod session_runner;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
