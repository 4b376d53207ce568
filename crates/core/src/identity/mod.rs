//! Caller identification

pub mod ports;
