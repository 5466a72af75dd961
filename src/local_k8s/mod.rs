pub mod cluster;
pub mod error;
pub mod restart;
pub mod session;
