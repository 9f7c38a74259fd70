//! Transaction variants and their hashes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TxHashError;
use crate::felt::{const_expect, Felt};
use crate::hash::{
    calculate_transaction_hash_common, compute_hash_on_elements, precompute_address,
};

pub const INVOKE_PREFIX: Felt = const_expect!(
    Felt::from_short_string("invoke"),
    "prefix is a short string"
);
pub const DECLARE_PREFIX: Felt = const_expect!(
    Felt::from_short_string("declare"),
    "prefix is a short string"
);
pub const DEPLOY_ACCOUNT_PREFIX: Felt = const_expect!(
    Felt::from_short_string("deploy_account"),
    "prefix is a short string"
);

/// Chain id of StarkNet mainnet.
pub const SN_MAIN: Felt = const_expect!(
    Felt::from_short_string("SN_MAIN"),
    "chain id is a short string"
);
/// Chain id of the Goerli testnet.
pub const SN_GOERLI: Felt = const_expect!(
    Felt::from_short_string("SN_GOERLI"),
    "chain id is a short string"
);

/// Fields left unset are reported as [`TxHashError::MissingField`] when hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeTxnV0 {
    pub version: Option<Felt>,
    pub max_fee: Option<Felt>,
    pub contract_address: Option<Felt>,
    pub entry_point_selector: Option<Felt>,
    #[serde(default)]
    pub calldata: Vec<Felt>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeTxnV1 {
    pub version: Option<Felt>,
    pub max_fee: Option<Felt>,
    pub nonce: Option<Felt>,
    pub sender_address: Option<Felt>,
    #[serde(default)]
    pub calldata: Vec<Felt>,
}

/// Version 0 declarations are carried for completeness; their hash is not computed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareTxnV0 {
    pub version: Option<Felt>,
    pub max_fee: Option<Felt>,
    pub sender_address: Option<Felt>,
    pub class_hash: Option<Felt>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareTxnV1 {
    pub version: Option<Felt>,
    pub max_fee: Option<Felt>,
    pub nonce: Option<Felt>,
    pub sender_address: Option<Felt>,
    pub class_hash: Option<Felt>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareTxnV2 {
    pub version: Option<Felt>,
    pub max_fee: Option<Felt>,
    pub nonce: Option<Felt>,
    pub sender_address: Option<Felt>,
    pub class_hash: Option<Felt>,
    pub compiled_class_hash: Option<Felt>,
}

/// Deploys an account contract at an address derived from its own class,
/// salt and constructor arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployAccountTxn {
    pub version: Option<Felt>,
    pub max_fee: Option<Felt>,
    pub nonce: Option<Felt>,
    pub class_hash: Option<Felt>,
    pub contract_address_salt: Option<Felt>,
    #[serde(default)]
    pub constructor_calldata: Vec<Felt>,
    /// Precomputed with deployer address zero when absent.
    #[serde(default)]
    pub contract_address: Option<Felt>,
}

/// Any transaction this crate knows how to hash, tagged by `type` in JSON.
///
/// Unknown tags deserialize to [`Transaction::Unsupported`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Transaction {
    #[serde(rename = "INVOKE_V0")]
    InvokeV0(InvokeTxnV0),
    #[serde(rename = "INVOKE_V1")]
    InvokeV1(InvokeTxnV1),
    #[serde(rename = "DECLARE_V0")]
    DeclareV0(DeclareTxnV0),
    #[serde(rename = "DECLARE_V1")]
    DeclareV1(DeclareTxnV1),
    #[serde(rename = "DECLARE_V2")]
    DeclareV2(DeclareTxnV2),
    #[serde(rename = "DEPLOY_ACCOUNT")]
    DeployAccount(DeployAccountTxn),
    #[serde(other)]
    Unsupported,
}

fn required(value: Option<Felt>, name: &'static str) -> Result<Felt, TxHashError> {
    value.ok_or(TxHashError::MissingField(name))
}

fn required_calldata(calldata: &[Felt]) -> Result<(), TxHashError> {
    if calldata.is_empty() {
        return Err(TxHashError::MissingField("calldata"));
    }
    Ok(())
}

/// Computes transaction hashes for one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionHasher {
    chain_id: Felt,
}

impl TransactionHasher {
    pub const fn new(chain_id: Felt) -> Self {
        Self { chain_id }
    }

    pub const fn mainnet() -> Self {
        Self::new(SN_MAIN)
    }

    pub const fn goerli() -> Self {
        Self::new(SN_GOERLI)
    }

    pub const fn chain_id(&self) -> Felt {
        self.chain_id
    }

    /// Hashes any supported transaction variant.
    pub fn hash(&self, tx: &Transaction) -> Result<Felt, TxHashError> {
        match tx {
            Transaction::InvokeV0(tx) => self.invoke_v0(tx),
            Transaction::InvokeV1(tx) => self.invoke_v1(tx),
            Transaction::DeclareV0(tx) => self.declare_v0(tx),
            Transaction::DeclareV1(tx) => self.declare_v1(tx),
            Transaction::DeclareV2(tx) => self.declare_v2(tx),
            Transaction::DeployAccount(tx) => self.deploy_account(tx),
            Transaction::Unsupported => Err(TxHashError::UnsupportedTransactionType),
        }
    }

    pub fn invoke_v0(&self, tx: &InvokeTxnV0) -> Result<Felt, TxHashError> {
        let version = required(tx.version, "version")?;
        required_calldata(&tx.calldata)?;
        let max_fee = required(tx.max_fee, "max_fee")?;
        let selector = required(tx.entry_point_selector, "entry_point_selector")?;
        let contract_address = required(tx.contract_address, "contract_address")?;

        let calldata_hash = compute_hash_on_elements(&tx.calldata)?;
        let hash = calculate_transaction_hash_common(
            INVOKE_PREFIX,
            version,
            contract_address,
            selector,
            calldata_hash,
            max_fee,
            self.chain_id,
            &[],
        )?;
        debug!(%hash, "computed invoke v0 transaction hash");
        Ok(hash)
    }

    pub fn invoke_v1(&self, tx: &InvokeTxnV1) -> Result<Felt, TxHashError> {
        let version = required(tx.version, "version")?;
        required_calldata(&tx.calldata)?;
        let nonce = required(tx.nonce, "nonce")?;
        let max_fee = required(tx.max_fee, "max_fee")?;
        let sender_address = required(tx.sender_address, "sender_address")?;

        let calldata_hash = compute_hash_on_elements(&tx.calldata)?;
        let hash = calculate_transaction_hash_common(
            INVOKE_PREFIX,
            version,
            sender_address,
            Felt::ZERO,
            calldata_hash,
            max_fee,
            self.chain_id,
            &[nonce],
        )?;
        debug!(%hash, "computed invoke v1 transaction hash");
        Ok(hash)
    }

    /// Version 0 declarations hash inconsistently across implementations and
    /// are always rejected.
    pub fn declare_v0(&self, tx: &DeclareTxnV0) -> Result<Felt, TxHashError> {
        Err(TxHashError::UnsupportedVersion(
            tx.version.unwrap_or(Felt::ZERO).to_string(),
        ))
    }

    pub fn declare_v1(&self, tx: &DeclareTxnV1) -> Result<Felt, TxHashError> {
        let sender_address = required(tx.sender_address, "sender_address")?;
        let version = required(tx.version, "version")?;
        let class_hash = required(tx.class_hash, "class_hash")?;
        let max_fee = required(tx.max_fee, "max_fee")?;
        let nonce = required(tx.nonce, "nonce")?;

        let hash = calculate_transaction_hash_common(
            DECLARE_PREFIX,
            version,
            sender_address,
            Felt::ZERO,
            compute_hash_on_elements(&[class_hash])?,
            max_fee,
            self.chain_id,
            &[nonce],
        )?;
        debug!(%hash, "computed declare v1 transaction hash");
        Ok(hash)
    }

    pub fn declare_v2(&self, tx: &DeclareTxnV2) -> Result<Felt, TxHashError> {
        let compiled_class_hash = required(tx.compiled_class_hash, "compiled_class_hash")?;
        let sender_address = required(tx.sender_address, "sender_address")?;
        let version = required(tx.version, "version")?;
        let class_hash = required(tx.class_hash, "class_hash")?;
        let max_fee = required(tx.max_fee, "max_fee")?;
        let nonce = required(tx.nonce, "nonce")?;

        let hash = calculate_transaction_hash_common(
            DECLARE_PREFIX,
            version,
            sender_address,
            Felt::ZERO,
            compute_hash_on_elements(&[class_hash])?,
            max_fee,
            self.chain_id,
            &[nonce, compiled_class_hash],
        )?;
        debug!(%hash, "computed declare v2 transaction hash");
        Ok(hash)
    }

    /// Only version 1 deploy-account transactions exist.
    pub fn deploy_account(&self, tx: &DeployAccountTxn) -> Result<Felt, TxHashError> {
        if tx.version != Some(Felt::ONE) {
            return Err(TxHashError::UnsupportedTransactionType);
        }
        let class_hash = required(tx.class_hash, "class_hash")?;
        let salt = required(tx.contract_address_salt, "contract_address_salt")?;
        let max_fee = required(tx.max_fee, "max_fee")?;
        let nonce = required(tx.nonce, "nonce")?;

        let contract_address = match tx.contract_address {
            Some(address) => address,
            None => precompute_address(Felt::ZERO, salt, class_hash, &tx.constructor_calldata)?,
        };

        let mut calldata = Vec::with_capacity(2 + tx.constructor_calldata.len());
        calldata.push(class_hash);
        calldata.push(salt);
        calldata.extend_from_slice(&tx.constructor_calldata);

        let hash = calculate_transaction_hash_common(
            DEPLOY_ACCOUNT_PREFIX,
            Felt::ONE,
            contract_address,
            Felt::ZERO,
            compute_hash_on_elements(&calldata)?,
            max_fee,
            self.chain_id,
            &[nonce],
        )?;
        debug!(%hash, %contract_address, "computed deploy account transaction hash");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn felt(hex: &str) -> Felt {
        Felt::from_hex_str(hex).unwrap()
    }

    fn goerli_invoke() -> InvokeTxnV1 {
        InvokeTxnV1 {
            version: Some(Felt::ONE),
            max_fee: Some(Felt::ZERO),
            nonce: Some(Felt::ZERO),
            sender_address: Some(Felt::ZERO),
            calldata: vec![Felt::ZERO],
        }
    }

    #[test]
    fn chain_ids() {
        assert_eq!(SN_MAIN, felt("0x534e5f4d41494e"));
        assert_eq!(SN_GOERLI, felt("0x534e5f474f45524c49"));
        assert_eq!(TransactionHasher::mainnet().chain_id(), SN_MAIN);
    }

    #[test]
    fn invoke_v1_zero_fields() {
        let hash = TransactionHasher::goerli().invoke_v1(&goerli_invoke()).unwrap();
        assert_eq!(
            hash,
            felt("0x135c34f53f8b7f59efd450eb689fccd9dd4cfe7f9d9dc4d09954c5653138698")
        );
    }

    #[test]
    fn invoke_v1_mainnet() {
        let tx = InvokeTxnV1 {
            version: Some(Felt::ONE),
            max_fee: Some(felt("0x2a173cd36e400")),
            nonce: Some(Felt::ONE),
            sender_address: Some(felt(
                "0x59cd166e363be0a921e42dd5cfca0049aedcf2093a707ef90b5c6e46d4555a8",
            )),
            calldata: vec![
                felt("0x1"),
                felt("0x5dbdedc203e92749e2e746e2d40a768d966bd243df04a6b712e222bc040a9af"),
                felt("0x2f0b3c5710379609eb5495f1ecd348cb28167711b73609fe565a72734550354"),
                felt("0x0"),
                felt("0x1"),
                felt("0x1"),
                felt("0x52884ee3f"),
            ],
        };

        assert_eq!(
            TransactionHasher::mainnet().invoke_v1(&tx).unwrap(),
            felt("0x3476c76a81522fe52616c41e95d062f5c3ea4eeb6c652904ad389fcd9ff4637")
        );
    }

    #[test]
    fn invoke_v0() {
        let tx = InvokeTxnV0 {
            version: Some(Felt::ZERO),
            max_fee: Some(felt("0x100")),
            contract_address: Some(felt("0x1234")),
            entry_point_selector: Some(felt(
                "0x15d40a3d6ca2ac30f4031e42be28da9b056fef9bb7357ac5e85627ee876e5ad",
            )),
            calldata: vec![Felt::from(1u64), Felt::from(2u64)],
        };

        assert_eq!(
            TransactionHasher::goerli().invoke_v0(&tx).unwrap(),
            felt("0x714b167846bd89a801b4a6edf94ba181ea5d04594fc436e6e0441085ea5c460")
        );
    }

    #[test]
    fn declare_v1_and_v2() {
        let v1 = DeclareTxnV1 {
            version: Some(Felt::ONE),
            max_fee: Some(felt("0x200")),
            nonce: Some(Felt::from(3u64)),
            sender_address: Some(felt("0x5678")),
            class_hash: Some(felt("0xabc")),
        };
        let v2 = DeclareTxnV2 {
            version: Some(Felt::from(2u64)),
            max_fee: v1.max_fee,
            nonce: v1.nonce,
            sender_address: v1.sender_address,
            class_hash: v1.class_hash,
            compiled_class_hash: Some(felt("0xdef")),
        };
        let hasher = TransactionHasher::mainnet();

        assert_eq!(
            hasher.declare_v1(&v1).unwrap(),
            felt("0x708054d2edf200a0d9ba80ec34684191b83a370d334f0a8ad89f260be5915b")
        );
        assert_eq!(
            hasher.declare_v2(&v2).unwrap(),
            felt("0x26eaeb96893660a86b18f566cbc098f9355e4587519a5eefa9c2061d3dfb324")
        );
    }

    #[test]
    fn declare_v0_is_unsupported() {
        let tx = DeclareTxnV0 {
            version: Some(Felt::ZERO),
            ..Default::default()
        };
        assert_eq!(
            TransactionHasher::mainnet().declare_v0(&tx),
            Err(TxHashError::UnsupportedVersion("0x0".to_owned()))
        );
    }

    #[test]
    fn deploy_account_precomputes_address() {
        let mut tx = DeployAccountTxn {
            version: Some(Felt::ONE),
            max_fee: Some(felt("0x300")),
            nonce: Some(Felt::ZERO),
            class_hash: Some(felt("0xabc")),
            contract_address_salt: Some(Felt::from(7u64)),
            constructor_calldata: vec![felt("0x11"), felt("0x22")],
            contract_address: None,
        };
        let hasher = TransactionHasher::goerli();
        let expected = felt("0x605f4960e8a7c5aaf1f7320895c7eb579a8cbaad633f685c429c2edae52441b");

        assert_eq!(hasher.deploy_account(&tx).unwrap(), expected);

        tx.contract_address = Some(felt(
            "0x4228b5361bf391190e46c8f03f006c4335bd9e329858d7d37c2aa5b30af91f2",
        ));
        assert_eq!(hasher.deploy_account(&tx).unwrap(), expected);
    }

    #[test]
    fn deploy_account_requires_version_one() {
        let tx = DeployAccountTxn {
            version: Some(Felt::from(3u64)),
            ..Default::default()
        };
        assert_eq!(
            TransactionHasher::goerli().deploy_account(&tx),
            Err(TxHashError::UnsupportedTransactionType)
        );
    }

    #[test]
    fn missing_fields() {
        let hasher = TransactionHasher::goerli();

        let mut tx = goerli_invoke();
        tx.nonce = None;
        assert_eq!(
            hasher.invoke_v1(&tx),
            Err(TxHashError::MissingField("nonce"))
        );

        let mut tx = goerli_invoke();
        tx.calldata.clear();
        assert_eq!(
            hasher.invoke_v1(&tx),
            Err(TxHashError::MissingField("calldata"))
        );

        let tx = DeclareTxnV2 {
            version: Some(Felt::from(2u64)),
            ..Default::default()
        };
        assert_eq!(
            hasher.declare_v2(&tx),
            Err(TxHashError::MissingField("compiled_class_hash"))
        );
    }

    #[test]
    fn dispatch_through_enum() {
        let hasher = TransactionHasher::goerli();
        let tx = Transaction::InvokeV1(goerli_invoke());

        assert_eq!(
            hasher.hash(&tx).unwrap(),
            hasher.invoke_v1(&goerli_invoke()).unwrap()
        );
        assert_eq!(
            hasher.hash(&Transaction::Unsupported),
            Err(TxHashError::UnsupportedTransactionType)
        );
    }
}
