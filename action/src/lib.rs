//! vercel-await library
//!
//! Finds the Vercel deployment built for a commit and waits for it to
//! become ready.

pub mod app;
pub mod ci;
pub mod cli;
pub mod deploy;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod utils;
