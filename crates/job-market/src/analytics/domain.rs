use crate::listings::SalaryPeriod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annualized pay range expressed in the reference currency (GBP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedSalary {
    pub min_annual: Decimal,
    pub max_annual: Decimal,
    pub avg_annual: Decimal,
    pub source_period: SalaryPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentMode {
    Permanent,
    Contract,
}

impl EmploymentMode {
    pub const fn ordered() -> [Self; 2] {
        [Self::Permanent, Self::Contract]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Permanent => "Permanent",
            Self::Contract => "Contract",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceTier {
    Senior,
    Mid,
    Junior,
}

impl ExperienceTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Senior, Self::Mid, Self::Junior]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Senior => "Senior",
            Self::Mid => "Mid",
            Self::Junior => "Junior",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_contract: bool,
    pub experience_tier: ExperienceTier,
}

impl Classification {
    pub const fn mode(&self) -> EmploymentMode {
        if self.is_contract {
            EmploymentMode::Contract
        } else {
            EmploymentMode::Permanent
        }
    }
}
