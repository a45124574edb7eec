//! Infrastructure implementations.
//!
//! Port traits and the adapters behind them: storage, dice and environment config.

pub mod clock;
pub mod config;
pub mod dice_service;
pub mod local_dice;
pub mod memory_store;
pub mod ports;
