pub mod commit;
pub mod deployment;
