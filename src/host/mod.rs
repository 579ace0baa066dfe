//! Host-facing wire contract and stdio bridge.

pub mod contract;
pub mod stdio;
