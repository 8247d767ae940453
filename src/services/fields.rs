//! Form field declarations for the host presentation layer.
//!
//! The dispatcher never consults this table; it only drives which inputs the
//! host shows for a given resource/operation.

use serde::Serialize;

use crate::models::cash_out::{AccountType, EmvType, KeyType, OwnerType};
use crate::models::params::ParameterOption;
use crate::models::selector::{Operation, Resource};
use crate::services::translator::DEFAULT_EXPIRATION_MINUTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Options,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldDefault {
    Text(&'static str),
    Number(i64),
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
    /// Empty means every resource.
    pub resources: &'static [Resource],
    /// Empty means every operation.
    pub operations: &'static [Operation],
}

fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

impl FieldSpec {
    pub fn is_shown_for(&self, resource: Resource, operation: Operation) -> bool {
        (self.resources.is_empty() || self.resources.contains(&resource))
            && (self.operations.is_empty() || self.operations.contains(&operation))
    }
}

const ANY: &[Resource] = &[];
const CASH_IN: &[Resource] = &[Resource::PixCashIn];
const CASH_OUT: &[Resource] = &[Resource::PixCashOut];

const CHARGES: &[Operation] = &[
    Operation::CreateStaticCharge,
    Operation::CreateDynamicImmediateCharge,
];
const AMOUNT: &[Operation] = &[
    Operation::CreateStaticCharge,
    Operation::CreateDynamicImmediateCharge,
    Operation::PayByAccount,
];
const STATIC: &[Operation] = &[Operation::CreateStaticCharge];
const DYNAMIC: &[Operation] = &[Operation::CreateDynamicImmediateCharge];
const STATUS: &[Operation] = &[Operation::GetChargeStatus];
const ACCOUNT: &[Operation] = &[Operation::PayByAccount];
const EMV: &[Operation] = &[Operation::PayByEmv];
const KEY: &[Operation] = &[Operation::PayByKey];

const fn text(
    name: &'static str,
    display_name: &'static str,
    resources: &'static [Resource],
    operations: &'static [Operation],
) -> FieldSpec {
    FieldSpec {
        name,
        display_name,
        kind: FieldKind::String,
        default: FieldDefault::Text(""),
        options: &[],
        resources,
        operations,
    }
}

const fn number(
    name: &'static str,
    display_name: &'static str,
    default: i64,
    resources: &'static [Resource],
    operations: &'static [Operation],
) -> FieldSpec {
    FieldSpec {
        name,
        display_name,
        kind: FieldKind::Number,
        default: FieldDefault::Number(default),
        options: &[],
        resources,
        operations,
    }
}

const fn options(
    name: &'static str,
    display_name: &'static str,
    options: &'static [&'static str],
    resources: &'static [Resource],
    operations: &'static [Operation],
) -> FieldSpec {
    FieldSpec {
        name,
        display_name,
        kind: FieldKind::Options,
        default: FieldDefault::Text(options[0]),
        options,
        resources,
        operations,
    }
}

static FIELDS: &[FieldSpec] = &[
    options("resource", "Resource", &["pixCashIn", "pixCashOut"], &[], &[]),
    options(
        "operation",
        "Operation",
        &[
            "createStaticCharge",
            "createDynamicImmediateCharge",
            "getChargeStatus",
            "payByAccount",
            "payByEmv",
            "payByKey",
        ],
        &[Resource::PixCashIn, Resource::PixCashOut],
        &[],
    ),
    text("pixKeyId", "Pix Key ID", CASH_IN, CHARGES),
    number("amount", "Amount", 0, ANY, AMOUNT),
    text("additionalInformation", "Additional Information", CASH_IN, STATIC),
    text("payerQuestion", "Payer Question", CASH_IN, DYNAMIC),
    number(
        "expirationMinutes",
        "Expiration Minutes",
        DEFAULT_EXPIRATION_MINUTES,
        CASH_IN,
        DYNAMIC,
    ),
    text("debtorName", "Debtor Name", CASH_IN, DYNAMIC),
    text("debtorTaxId", "Debtor Tax ID", CASH_IN, DYNAMIC),
    text("txId", "Transaction ID", CASH_IN, STATUS),
    text("account", "Account", CASH_OUT, ACCOUNT),
    text("branch", "Branch", CASH_OUT, ACCOUNT),
    text("bank", "Bank (ISPB)", CASH_OUT, ACCOUNT),
    text("taxId", "Tax ID", CASH_OUT, ACCOUNT),
    text("name", "Name", CASH_OUT, ACCOUNT),
    options("accountType", "Account Type", AccountType::OPTIONS, CASH_OUT, ACCOUNT),
    text("description", "Description", CASH_OUT, ACCOUNT),
    FieldSpec {
        kind: FieldKind::Password,
        ..text("password", "Password", CASH_OUT, ACCOUNT)
    },
    options("emvType", "EMV Type", EmvType::OPTIONS, CASH_OUT, EMV),
    text("endToEndId", "End To End ID", CASH_OUT, EMV),
    number("amountOriginal", "Amount Original (cents)", 0, CASH_OUT, EMV),
    number("amountFinal", "Amount Final (cents)", 0, CASH_OUT, EMV),
    text("receiverName", "Receiver Name", CASH_OUT, EMV),
    text("receiverParticipant", "Receiver Participant", CASH_OUT, EMV),
    text("receiverDocumentNumber", "Receiver Document", CASH_OUT, EMV),
    text("key", "Key", CASH_OUT, KEY),
    options("keyType", "Key Type", KeyType::OPTIONS, CASH_OUT, KEY),
    text("keyEndToEndId", "End To End ID", CASH_OUT, KEY),
    text("accountParticipant", "Account Participant", CASH_OUT, KEY),
    text("accountBranch", "Account Branch", CASH_OUT, KEY),
    text("accountNumber", "Account Number", CASH_OUT, KEY),
    text("ownerName", "Owner Name", CASH_OUT, KEY),
    options("ownerType", "Owner Type", OwnerType::OPTIONS, CASH_OUT, KEY),
    text("ownerTradeName", "Owner Trade Name", CASH_OUT, KEY),
    text("ownerDocumentNumber", "Owner Document", CASH_OUT, KEY),
];

pub fn fields() -> &'static [FieldSpec] {
    FIELDS
}

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Names of the fields shown for the pair, in declaration order.
pub fn applicable_fields(resource: Resource, operation: Operation) -> Vec<&'static str> {
    FIELDS
        .iter()
        .filter(|f| f.is_shown_for(resource, operation))
        .map(|f| f.name)
        .collect()
}

pub fn is_applicable(name: &str, resource: Resource, operation: Operation) -> bool {
    field(name).is_some_and(|f| f.is_shown_for(resource, operation))
}
