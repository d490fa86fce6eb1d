pub mod client;
pub mod github;
pub mod vercel;
