use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticChargeRequest {
    pub pix_key_id: String,
    pub amount: i64,
    pub additional_information: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmediateChargeRequest {
    pub pix_key_id: String,
    pub amount: i64,
    pub additional_information: Vec<AdditionalInfo>,
    pub debtor: Debtor,
    pub payer_question: String,
    pub expiration: Expiration,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdditionalInfo {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Debtor {
    pub name: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Expiration {
    pub value: i64,
    pub unit: ExpirationUnit,
}

impl Expiration {
    pub fn minutes(value: i64) -> Self {
        Self {
            value,
            unit: ExpirationUnit::Minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationUnit {
    Minutes,
}
