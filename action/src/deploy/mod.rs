//! Deployment discovery and readiness polling

pub mod finder;
pub mod poller;
