//! StarkNet transaction, contract address and class hashing.
//!
//! Every hash in this crate is a hash-on-elements: the Pedersen hash from
//! [`stark_curve`] folded over a fixed-order list of [`Felt`] values followed
//! by the list length.
//!
//! ```
//! use stark_txhash::{Felt, InvokeTxnV1, TransactionHasher};
//!
//! let tx = InvokeTxnV1 {
//!     version: Some(Felt::ONE),
//!     max_fee: Some(Felt::ZERO),
//!     nonce: Some(Felt::ZERO),
//!     sender_address: Some(Felt::ZERO),
//!     calldata: vec![Felt::ZERO],
//! };
//! let hash = TransactionHasher::goerli().invoke_v1(&tx).unwrap();
//! assert_eq!(
//!     hash.to_string(),
//!     "0x135c34f53f8b7f59efd450eb689fccd9dd4cfe7f9d9dc4d09954c5653138698"
//! );
//! ```

mod class;
mod error;
mod felt;
mod hash;
mod transaction;

pub use class::{CasmClass, CasmEntryPoint, ContractClass, EntryPointsByType, SierraEntryPoint};
pub use error::{FeltError, TxHashError};
pub use felt::Felt;
pub use hash::{
    calculate_transaction_hash_common, compute_hash_on_elements, precompute_address,
    CONTRACT_ADDRESS_PREFIX,
};
pub use transaction::{
    DeclareTxnV0, DeclareTxnV1, DeclareTxnV2, DeployAccountTxn, InvokeTxnV0, InvokeTxnV1,
    Transaction, TransactionHasher, DECLARE_PREFIX, DEPLOY_ACCOUNT_PREFIX, INVOKE_PREFIX, SN_GOERLI,
    SN_MAIN,
};
