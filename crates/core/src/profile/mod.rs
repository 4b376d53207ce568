//! Business profile persistence and orchestration

pub mod ports;
pub mod service;

pub use ports::ProfileWrite;
pub use service::ProfileService;
