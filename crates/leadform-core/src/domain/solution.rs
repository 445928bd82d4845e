//! The closed set of product solutions a lead can ask about.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LeadFormError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSolution {
    CrmSolution,
    EthioTradeConnect,
    GreenGrowthEthiopia,
    Multiple,
    NotSure,
}

impl ProductSolution {
    pub const ALL: [ProductSolution; 5] = [
        ProductSolution::CrmSolution,
        ProductSolution::EthioTradeConnect,
        ProductSolution::GreenGrowthEthiopia,
        ProductSolution::Multiple,
        ProductSolution::NotSure,
    ];

    /// Value submitted by the form's select control.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSolution::CrmSolution => "crm-solution",
            ProductSolution::EthioTradeConnect => "ethio-trade-connect",
            ProductSolution::GreenGrowthEthiopia => "green-growth-ethiopia",
            ProductSolution::Multiple => "multiple",
            ProductSolution::NotSure => "not-sure",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            ProductSolution::CrmSolution => "CRM Solution - Customer Management System",
            ProductSolution::EthioTradeConnect => "Ethio-Trade Connect - Export & Trade Platform",
            ProductSolution::GreenGrowthEthiopia => {
                "Green Growth Ethiopia - Agriculture Technology"
            }
            ProductSolution::Multiple => "Multiple Solutions",
            ProductSolution::NotSure => "Not Sure - Need Consultation",
        }
    }
}

impl std::fmt::Display for ProductSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductSolution {
    type Err = LeadFormError;

    /// Exact match only; no trimming or case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductSolution::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| LeadFormError::UnknownSolution(s.to_string()))
    }
}
