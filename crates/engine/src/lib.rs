//! Sheetkeep Engine library.
//!
//! The application layer over the pure derivation engine in `sheetkeep-domain`.
//!
//! ## Structure
//!
//! - `use_cases/` - Sheet creation, edit sessions, saves and bulk rolls
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition
//! - `cli` - The `sheetkeep` command-line surface

pub mod app;
pub mod cli;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
