//! Domain string hygiene: normalization and syntax checking.
//!
//! Both functions are pure and never touch the network; the pipeline runs
//! them before any DNS lookup so garbage input fails fast.

mod normalize;
mod syntax;

pub use normalize::normalize_domain;
pub use syntax::is_valid_syntax;
