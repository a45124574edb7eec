//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    memory_store::InMemorySheetRepo,
    ports::{ClockPort, DiceRollerPort, SheetRepo},
};
use crate::use_cases;

/// Main application state.
///
/// Holds the injected ports and the use cases built over them.
pub struct App {
    pub config: EngineConfig,
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub sheet: Arc<dyn SheetRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub character_sheet: use_cases::CharacterSheetUseCases,
}

impl App {
    pub fn new(
        config: EngineConfig,
        sheet_repo: Arc<dyn SheetRepo>,
        dice: Arc<dyn DiceRollerPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let use_cases = UseCases {
            character_sheet: use_cases::CharacterSheetUseCases::new(
                sheet_repo.clone(),
                dice,
                clock,
            ),
        };

        Self {
            config,
            repositories: Repositories { sheet: sheet_repo },
            use_cases,
        }
    }

    /// Compose the default adapters: in-memory storage, system clock and the
    /// dice roller the configuration selects.
    pub fn from_config(config: EngineConfig) -> Self {
        let dice = config.dice_roller();
        Self::new(
            config,
            Arc::new(InMemorySheetRepo::new()),
            dice,
            Arc::new(SystemClock::new()),
        )
    }
}
