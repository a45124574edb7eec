//! HTTP client for the remote dice service.
//!
//! The service only understands `NdM`; the flat modifier of a formula is
//! added locally to the returned total.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sheetkeep_domain::{DiceFormula, DiceRollResult};
use std::time::Duration;

use crate::infrastructure::config::DEFAULT_DICE_TIMEOUT_SECS;
use crate::infrastructure::ports::{DiceError, DiceRollerPort};

/// Client for `POST {base}/api/dice/roll`.
#[derive(Clone)]
pub struct DiceServiceClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct RollRequest {
    formula: String,
}

#[derive(Debug, Deserialize)]
struct RollResponse {
    rolls: Vec<i32>,
    total: i32,
}

impl DiceServiceClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_DICE_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    timeout_secs,
                    "Failed to build dice HTTP client, falling back to defaults without timeout"
                );
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn roll_url(&self) -> String {
        format!("{}/api/dice/roll", self.base_url)
    }
}

#[async_trait]
impl DiceRollerPort for DiceServiceClient {
    async fn roll(&self, formula: &DiceFormula) -> Result<DiceRollResult, DiceError> {
        let request = RollRequest {
            formula: formula.dice_notation(),
        };

        let response = self
            .client
            .post(self.roll_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    DiceError::Unavailable
                } else {
                    DiceError::request_failed(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(DiceError::request_failed)?;
            return Err(DiceError::request_failed(format!("{}: {}", status, error_text)));
        }

        let body: RollResponse = response
            .json()
            .await
            .map_err(DiceError::invalid_response)?;

        into_result(formula, body)
    }
}

/// Check the service answered the formula it was asked, then apply the modifier.
fn into_result(formula: &DiceFormula, body: RollResponse) -> Result<DiceRollResult, DiceError> {
    if body.rolls.len() != usize::from(formula.dice_count()) {
        return Err(DiceError::invalid_response(format!(
            "expected {} dice, got {}",
            formula.dice_count(),
            body.rolls.len()
        )));
    }
    let sides = i32::from(formula.die_size());
    if body.rolls.iter().any(|r| !(1..=sides).contains(r)) {
        return Err(DiceError::invalid_response("die face out of range"));
    }
    let result = DiceRollResult::from_rolls(body.rolls, formula.modifier());
    if result.total.saturating_sub(formula.modifier()) != body.total {
        tracing::debug!(
            reported = body.total,
            computed = result.total,
            "Dice service total disagrees with faces; using faces"
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let client = DiceServiceClient::new("http://dice.local/");
        assert_eq!(client.roll_url(), "http://dice.local/api/dice/roll");
    }

    #[test]
    fn modifier_is_added_locally() {
        let formula = DiceFormula::parse("3d6+3").unwrap();
        let body = RollResponse {
            rolls: vec![2, 5, 6],
            total: 13,
        };
        let result = into_result(&formula, body).unwrap();
        assert_eq!(result.rolls, vec![2, 5, 6]);
        assert_eq!(result.total, 16);
    }

    #[test]
    fn wrong_dice_count_is_invalid() {
        let formula = DiceFormula::parse("2d6").unwrap();
        let body = RollResponse {
            rolls: vec![3],
            total: 3,
        };
        assert!(matches!(
            into_result(&formula, body),
            Err(DiceError::InvalidResponse(_))
        ));
    }

    #[test]
    fn face_out_of_range_is_invalid() {
        let formula = DiceFormula::parse("1d6").unwrap();
        let body = RollResponse {
            rolls: vec![7],
            total: 7,
        };
        assert!(into_result(&formula, body).is_err());
    }

    #[test]
    fn request_body_uses_bare_dice_notation() {
        let formula = DiceFormula::parse("2d6+6").unwrap();
        let body = serde_json::to_value(RollRequest {
            formula: formula.dice_notation(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "formula": "2d6" }));
    }
}
