//! Command implementations for the nwalign CLI

pub mod align;
pub mod batch;
pub mod init_config;
pub mod validate;
