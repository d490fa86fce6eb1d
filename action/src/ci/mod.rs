//! GitHub Actions runtime surface

pub mod env;
pub mod output;
