//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Sheet storage (in-memory today, any record store later)
//! - The dice capability (remote service or local RNG)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{SheetRecord, SheetRepo};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::DiceRollerPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockDiceRollerPort;

#[cfg(test)]
pub use repos::MockSheetRepo;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{DiceError, RepoError};
