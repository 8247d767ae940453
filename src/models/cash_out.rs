use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Current account.
    #[default]
    Cacc,
    /// Payment account.
    Tran,
    /// Salary account.
    Slry,
    /// Savings account.
    Svgs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmvType {
    #[default]
    StaticQrcode,
    ImmediateQrcode,
    DuedateQrcode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    /// Random key.
    #[default]
    Evp,
    Cpf,
    Cnpj,
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerType {
    #[default]
    NaturalPerson,
    LegalPerson,
}

#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayout {
    pub account: String,
    pub branch: String,
    /// ISPB of the destination bank.
    pub bank: String,
    pub amount: i64,
    pub tax_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub description: String,
    pub password: String,
}

impl fmt::Debug for AccountPayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPayout")
            .field("account", &self.account)
            .field("branch", &self.branch)
            .field("bank", &self.bank)
            .field("amount", &self.amount)
            .field("tax_id", &self.tax_id)
            .field("name", &self.name)
            .field("account_type", &self.account_type)
            .field("description", &self.description)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmvPayout {
    #[serde(rename = "type")]
    pub emv_type: EmvType,
    pub end_to_end_id: String,
    pub amount: EmvAmount,
    pub receiver: EmvReceiver,
}

/// Both values in cents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmvAmount {
    pub original: i64,
    #[serde(rename = "final")]
    pub final_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmvReceiver {
    pub name: String,
    pub participant: String,
    pub document_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPayout {
    pub key: String,
    pub key_type: KeyType,
    #[serde(rename = "endtoEndId")]
    pub end_to_end_id: String,
    pub account: KeyAccount,
    pub owner: KeyOwner,
}

/// Destination account of a key payout. The account type is always `CACC`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyAccount {
    pub participant: String,
    account_type: AccountType,
    pub branch: String,
    pub account: String,
}

impl KeyAccount {
    pub fn new(participant: String, branch: String, account: String) -> Self {
        Self {
            participant,
            account_type: AccountType::Cacc,
            branch,
            account,
        }
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyOwner {
    pub name: String,
    #[serde(rename = "type")]
    pub owner_type: OwnerType,
    pub trade_name: String,
    pub document_number: String,
}
