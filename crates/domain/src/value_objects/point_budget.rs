//! Job/interest skill-point budgets.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Points spent from the two budgeted pools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointUsage {
    pub job_total: i32,
    pub interest_total: i32,
}

impl PointUsage {
    /// Sum job and interest points over any number of skill entries.
    pub fn sum<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        entries
            .into_iter()
            .fold(Self::default(), |acc, (job, interest)| Self {
                job_total: acc.job_total.saturating_add(job),
                interest_total: acc.interest_total.saturating_add(interest),
            })
    }
}

/// Budget ceilings derived from the governing attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLimits {
    pub job_limit: i32,
    pub interest_limit: i32,
}

impl PointLimits {
    /// `attribute * multiplier` for each pool.
    pub fn from_attributes(
        job_attribute: i32,
        job_multiplier: i32,
        interest_attribute: i32,
        interest_multiplier: i32,
    ) -> Self {
        Self {
            job_limit: job_attribute.saturating_mul(job_multiplier),
            interest_limit: interest_attribute.saturating_mul(interest_multiplier),
        }
    }
}

/// Usage checked against limits. This is also the save-time error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointBudget {
    pub job_total: i32,
    pub job_limit: i32,
    pub interest_total: i32,
    pub interest_limit: i32,
}

impl PointBudget {
    pub fn new(usage: PointUsage, limits: PointLimits) -> Self {
        Self {
            job_total: usage.job_total,
            job_limit: limits.job_limit,
            interest_total: usage.interest_total,
            interest_limit: limits.interest_limit,
        }
    }

    pub fn is_job_over(&self) -> bool {
        self.job_total > self.job_limit
    }

    pub fn is_interest_over(&self) -> bool {
        self.interest_total > self.interest_limit
    }

    /// Advisory while editing, fatal when saving.
    pub fn is_over_budget(&self) -> bool {
        self.is_job_over() || self.is_interest_over()
    }

    pub fn job_remaining(&self) -> i32 {
        self.job_limit.saturating_sub(self.job_total)
    }

    pub fn interest_remaining(&self) -> i32 {
        self.interest_limit.saturating_sub(self.interest_total)
    }

    /// Hard check used on submission.
    pub fn ensure_within(&self) -> Result<(), DomainError> {
        if self.is_over_budget() {
            return Err(DomainError::PointBudgetExceeded(self.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_sums_both_pools() {
        let skills = [(10, 5), (20, 0), (0, 7)];
        let usage = PointUsage::sum(skills.iter().map(|(j, i)| (*j, *i)));
        assert_eq!(usage.job_total, 30);
        assert_eq!(usage.interest_total, 12);
    }

    #[test]
    fn limit_is_attribute_times_multiplier() {
        let limits = PointLimits::from_attributes(10, 20, 12, 10);
        assert_eq!(limits.job_limit, 200);
        assert_eq!(limits.interest_limit, 120);
    }

    #[test]
    fn exactly_at_limit_is_within_budget() {
        let budget = PointBudget::new(
            PointUsage {
                job_total: 200,
                interest_total: 120,
            },
            PointLimits::from_attributes(10, 20, 12, 10),
        );
        assert!(!budget.is_over_budget());
        assert!(budget.ensure_within().is_ok());
        assert_eq!(budget.job_remaining(), 0);
    }

    #[test]
    fn one_point_over_is_rejected_with_all_numbers() {
        let budget = PointBudget::new(
            PointUsage {
                job_total: 201,
                interest_total: 0,
            },
            PointLimits::from_attributes(10, 20, 10, 10),
        );
        assert!(budget.is_job_over());
        assert!(!budget.is_interest_over());

        let err = budget.ensure_within().unwrap_err();
        let reported = err.point_budget().unwrap();
        assert_eq!(reported.job_total, 201);
        assert_eq!(reported.job_limit, 200);
        assert_eq!(reported.interest_total, 0);
        assert_eq!(reported.interest_limit, 100);
    }

    #[test]
    fn serializes_camel_case_payload() {
        let budget = PointBudget {
            job_total: 201,
            job_limit: 200,
            interest_total: 3,
            interest_limit: 100,
        };
        assert_eq!(
            serde_json::to_value(&budget).unwrap(),
            serde_json::json!({
                "jobTotal": 201,
                "jobLimit": 200,
                "interestTotal": 3,
                "interestLimit": 100,
            })
        );
    }
}
