//! Flat item parameters to gateway payloads.

use serde_json::Value;

use crate::models::cash_in::{Debtor, Expiration, ImmediateChargeRequest, StaticChargeRequest};
use crate::models::cash_out::{
    AccountPayout, EmvAmount, EmvPayout, EmvReceiver, KeyAccount, KeyOwner, KeyPayout,
};
use crate::models::params::ItemParameters;
use crate::models::records::OperationalError;
use crate::models::selector::Operation;
use crate::repositories::{GatewayError, PaymentGateway};

pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60;

/// A fully built request for exactly one gateway method.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    CreateStaticCharge(StaticChargeRequest),
    CreateImmediateCharge(ImmediateChargeRequest),
    PayByAccount(AccountPayout),
    PayByEmv(EmvPayout),
    PayByKey(KeyPayout),
}

impl GatewayCall {
    pub fn operation(&self) -> Operation {
        match self {
            GatewayCall::CreateStaticCharge(_) => Operation::CreateStaticCharge,
            GatewayCall::CreateImmediateCharge(_) => Operation::CreateDynamicImmediateCharge,
            GatewayCall::PayByAccount(_) => Operation::PayByAccount,
            GatewayCall::PayByEmv(_) => Operation::PayByEmv,
            GatewayCall::PayByKey(_) => Operation::PayByKey,
        }
    }

    /// Values that must never leave the process in an error message.
    pub fn secrets(&self) -> Vec<&str> {
        match self {
            GatewayCall::PayByAccount(payout) if !payout.password.is_empty() => {
                vec![payout.password.as_str()]
            }
            _ => Vec::new(),
        }
    }

    pub async fn invoke<G>(&self, gateway: &G) -> Result<Value, GatewayError>
    where
        G: PaymentGateway + ?Sized,
    {
        match self {
            GatewayCall::CreateStaticCharge(r) => gateway.create_static_charge(r).await,
            GatewayCall::CreateImmediateCharge(r) => gateway.create_immediate_charge(r).await,
            GatewayCall::PayByAccount(r) => gateway.pay_by_account(r).await,
            GatewayCall::PayByEmv(r) => gateway.pay_by_emv(r).await,
            GatewayCall::PayByKey(r) => gateway.pay_by_key(r).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Call(GatewayCall),
    /// Recognized operation with no gateway counterpart in this version.
    NotImplemented { operation: Operation, tx_id: String },
}

/// Builds the request for one item. Only the fields of the selected branch are read.
pub fn translate(params: &ItemParameters) -> Result<Translation, OperationalError> {
    let selector = params.selector()?;
    let (_, operation) = selector
        .resolve()
        .ok_or_else(|| OperationalError::Unsupported {
            resource: selector.resource.clone(),
            operation: selector.operation.clone(),
        })?;

    let call = match operation {
        Operation::CreateStaticCharge => GatewayCall::CreateStaticCharge(StaticChargeRequest {
            pix_key_id: params.string("pixKeyId")?,
            amount: params.integer("amount", 0)?,
            additional_information: params.string("additionalInformation")?,
        }),
        Operation::CreateDynamicImmediateCharge => {
            GatewayCall::CreateImmediateCharge(ImmediateChargeRequest {
                pix_key_id: params.string("pixKeyId")?,
                amount: params.integer("amount", 0)?,
                additional_information: Vec::new(),
                debtor: Debtor {
                    name: params.string("debtorName")?,
                    tax_id: params.string("debtorTaxId")?,
                },
                payer_question: params.string("payerQuestion")?,
                expiration: Expiration::minutes(
                    params.integer("expirationMinutes", DEFAULT_EXPIRATION_MINUTES)?,
                ),
            })
        }
        Operation::GetChargeStatus => {
            return Ok(Translation::NotImplemented {
                operation,
                tx_id: params.text("txId"),
            });
        }
        Operation::PayByAccount => GatewayCall::PayByAccount(AccountPayout {
            account: params.string("account")?,
            branch: params.string("branch")?,
            bank: params.string("bank")?,
            amount: params.integer("amount", 0)?,
            tax_id: params.string("taxId")?,
            name: params.string("name")?,
            account_type: params.option("accountType")?,
            description: params.string("description")?,
            password: params.string("password")?,
        }),
        Operation::PayByEmv => GatewayCall::PayByEmv(EmvPayout {
            emv_type: params.option("emvType")?,
            end_to_end_id: params.string("endToEndId")?,
            amount: EmvAmount {
                original: params.integer("amountOriginal", 0)?,
                final_amount: params.integer("amountFinal", 0)?,
            },
            receiver: EmvReceiver {
                name: params.string("receiverName")?,
                participant: params.string("receiverParticipant")?,
                document_number: params.string("receiverDocumentNumber")?,
            },
        }),
        Operation::PayByKey => GatewayCall::PayByKey(KeyPayout {
            key: params.string("key")?,
            key_type: params.option("keyType")?,
            end_to_end_id: params.string("keyEndToEndId")?,
            account: KeyAccount::new(
                params.string("accountParticipant")?,
                params.string("accountBranch")?,
                params.string("accountNumber")?,
            ),
            owner: KeyOwner {
                name: params.string("ownerName")?,
                owner_type: params.option("ownerType")?,
                trade_name: params.string("ownerTradeName")?,
                document_number: params.string("ownerDocumentNumber")?,
            },
        }),
    };

    Ok(Translation::Call(call))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cash_out::{AccountType, KeyType, OwnerType};
    use rstest::rstest;
    use serde_json::json;

    fn payload(params: ItemParameters) -> Value {
        match translate(&params).unwrap() {
            Translation::Call(GatewayCall::CreateStaticCharge(r)) => serde_json::to_value(r),
            Translation::Call(GatewayCall::CreateImmediateCharge(r)) => serde_json::to_value(r),
            Translation::Call(GatewayCall::PayByAccount(r)) => serde_json::to_value(r),
            Translation::Call(GatewayCall::PayByEmv(r)) => serde_json::to_value(r),
            Translation::Call(GatewayCall::PayByKey(r)) => serde_json::to_value(r),
            other => panic!("expected a gateway call, got {:?}", other),
        }
        .unwrap()
    }

    #[test]
    fn static_charge_carries_exactly_three_fields() {
        let params = ItemParameters::new()
            .with("resource", "pixCashIn")
            .with("operation", "createStaticCharge")
            .with("pixKeyId", "abc")
            .with("amount", 500)
            .with("additionalInformation", "order#1")
            .with("debtorName", "ignored");

        assert_eq!(
            payload(params),
            json!({"pixKeyId": "abc", "amount": 500, "additionalInformation": "order#1"})
        );
    }

    #[test]
    fn immediate_charge_is_nested() {
        let params = ItemParameters::new()
            .with("resource", "pixCashIn")
            .with("operation", "createDynamicImmediateCharge")
            .with("pixKeyId", "key-1")
            .with("amount", 1990)
            .with("expirationMinutes", 15)
            .with("debtorName", "Ana")
            .with("debtorTaxId", "12345678909")
            .with("payerQuestion", "Pedido 77");

        assert_eq!(
            payload(params),
            json!({
                "pixKeyId": "key-1",
                "amount": 1990,
                "additionalInformation": [],
                "debtor": {"name": "Ana", "taxId": "12345678909"},
                "payerQuestion": "Pedido 77",
                "expiration": {"value": 15, "unit": "minutes"}
            })
        );
    }

    #[test]
    fn immediate_charge_defaults_to_one_hour() {
        let params = ItemParameters::new()
            .with("resource", "pixCashIn")
            .with("operation", "createDynamicImmediateCharge");

        assert_eq!(payload(params)["expiration"]["value"], 60);
    }

    #[rstest]
    #[case("CACC", AccountType::Cacc)]
    #[case("TRAN", AccountType::Tran)]
    #[case("SLRY", AccountType::Slry)]
    #[case("SVGS", AccountType::Svgs)]
    fn pay_by_account_passes_account_type_through(
        #[case] raw: &str,
        #[case] expected: AccountType,
    ) {
        let params = ItemParameters::new()
            .with("resource", "pixCashOut")
            .with("operation", "payByAccount")
            .with("accountType", raw);

        match translate(&params).unwrap() {
            Translation::Call(GatewayCall::PayByAccount(payout)) => {
                assert_eq!(payout.account_type, expected)
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn pay_by_account_has_all_nine_fields() {
        let params = ItemParameters::new()
            .with("resource", "pixCashOut")
            .with("operation", "payByAccount")
            .with("account", "98765")
            .with("branch", "0001")
            .with("bank", "18236120")
            .with("amount", 2500)
            .with("taxId", "11122233344")
            .with("name", "Carlos")
            .with("accountType", "TRAN")
            .with("description", "aluguel")
            .with("password", "1234");

        assert_eq!(
            payload(params),
            json!({
                "account": "98765",
                "branch": "0001",
                "bank": "18236120",
                "amount": 2500,
                "taxId": "11122233344",
                "name": "Carlos",
                "accountType": "TRAN",
                "description": "aluguel",
                "password": "1234"
            })
        );
    }

    #[test]
    fn pay_by_emv_is_nested() {
        let params = ItemParameters::new()
            .with("resource", "pixCashOut")
            .with("operation", "payByEmv")
            .with("emvType", "IMMEDIATE_QRCODE")
            .with("endToEndId", "E2E-1")
            .with("amountOriginal", 1000)
            .with("amountFinal", 950)
            .with("receiverName", "Loja")
            .with("receiverParticipant", "60701190")
            .with("receiverDocumentNumber", "12345678000199");

        assert_eq!(
            payload(params),
            json!({
                "type": "IMMEDIATE_QRCODE",
                "endToEndId": "E2E-1",
                "amount": {"original": 1000, "final": 950},
                "receiver": {
                    "name": "Loja",
                    "participant": "60701190",
                    "documentNumber": "12345678000199"
                }
            })
        );
    }

    #[test]
    fn pay_by_key_forces_current_account() {
        let params = ItemParameters::new()
            .with("resource", "pixCashOut")
            .with("operation", "payByKey")
            .with("key", "x@y.com")
            .with("keyType", "EMAIL")
            .with("keyEndToEndId", "E1")
            .with("accountParticipant", "1")
            .with("accountBranch", "0001")
            .with("accountNumber", "123")
            .with("accountType", "SVGS")
            .with("ownerName", "Bob")
            .with("ownerType", "NATURAL_PERSON")
            .with("ownerTradeName", "")
            .with("ownerDocumentNumber", "000");

        assert_eq!(
            payload(params),
            json!({
                "key": "x@y.com",
                "keyType": "EMAIL",
                "endtoEndId": "E1",
                "account": {
                    "participant": "1",
                    "accountType": "CACC",
                    "branch": "0001",
                    "account": "123"
                },
                "owner": {
                    "name": "Bob",
                    "type": "NATURAL_PERSON",
                    "tradeName": "",
                    "documentNumber": "000"
                }
            })
        );
    }

    #[test]
    fn pay_by_key_option_defaults() {
        let params = ItemParameters::new()
            .with("resource", "pixCashOut")
            .with("operation", "payByKey");

        match translate(&params).unwrap() {
            Translation::Call(GatewayCall::PayByKey(payout)) => {
                assert_eq!(payout.key_type, KeyType::Evp);
                assert_eq!(payout.owner.owner_type, OwnerType::NaturalPerson);
                assert_eq!(payout.account.account_type(), AccountType::Cacc);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[rstest]
    #[case("")]
    #[case("tx-123")]
    #[case("E00000000202401011200abcdef")]
    fn charge_status_is_not_implemented(#[case] tx_id: &str) {
        let params = ItemParameters::new()
            .with("resource", "pixCashIn")
            .with("operation", "getChargeStatus")
            .with("txId", tx_id);

        assert_eq!(
            translate(&params).unwrap(),
            Translation::NotImplemented {
                operation: Operation::GetChargeStatus,
                tx_id: tx_id.to_string(),
            }
        );
    }

    #[rstest]
    #[case(json!(12345), "12345")]
    #[case(json!(12.5), "12.5")]
    #[case(json!(null), "")]
    fn charge_status_accepts_non_text_tx_id(#[case] raw: Value, #[case] expected: &str) {
        let params = ItemParameters::new()
            .with("resource", "pixCashIn")
            .with("operation", "getChargeStatus")
            .with("txId", raw);

        assert_eq!(
            translate(&params).unwrap(),
            Translation::NotImplemented {
                operation: Operation::GetChargeStatus,
                tx_id: expected.to_string(),
            }
        );
    }

    #[rstest]
    #[case("pixCashOut", "createStaticCharge")]
    #[case("pixCashOut", "getChargeStatus")]
    #[case("pixCashIn", "payByKey")]
    #[case("boleto", "payByKey")]
    #[case("pixCashIn", "refund")]
    fn mismatched_pairs_are_unsupported(#[case] resource: &str, #[case] operation: &str) {
        let params = ItemParameters::new()
            .with("resource", resource)
            .with("operation", operation);

        assert_eq!(
            translate(&params),
            Err(OperationalError::Unsupported {
                resource: resource.to_string(),
                operation: operation.to_string(),
            })
        );
    }

    #[test]
    fn only_password_is_secret() {
        let params = ItemParameters::new()
            .with("resource", "pixCashOut")
            .with("operation", "payByAccount")
            .with("password", "9876");

        match translate(&params).unwrap() {
            Translation::Call(call) => assert_eq!(call.secrets(), vec!["9876"]),
            other => panic!("unexpected: {:?}", other),
        }

        let params = ItemParameters::new().with("pixKeyId", "abc");
        match translate(&params).unwrap() {
            Translation::Call(call) => assert!(call.secrets().is_empty()),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
