//! In-process dice roller used when no dice service is configured.

use std::sync::Arc;

use async_trait::async_trait;
use sheetkeep_domain::{DiceFormula, DiceRollResult};

use crate::infrastructure::clock::SystemRandom;
use crate::infrastructure::ports::{DiceError, DiceRollerPort, RandomPort};

pub struct LocalDiceRoller {
    random: Arc<dyn RandomPort>,
}

impl LocalDiceRoller {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }
}

impl Default for LocalDiceRoller {
    fn default() -> Self {
        Self::new(Arc::new(SystemRandom::new()))
    }
}

#[async_trait]
impl DiceRollerPort for LocalDiceRoller {
    async fn roll(&self, formula: &DiceFormula) -> Result<DiceRollResult, DiceError> {
        Ok(formula.roll_with(|sides| self.random.gen_range(1, i32::from(sides))))
    }
}
