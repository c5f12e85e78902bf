//! パケット構築機能

pub mod core;
pub mod debug;
pub mod types;
