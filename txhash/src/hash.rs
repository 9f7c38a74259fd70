//! Hash-on-elements over [`Felt`] values and the hashing primitives built on it.

use num_bigint::BigUint;
use stark_curve::StarkCurve;

use crate::error::TxHashError;
use crate::felt::{const_expect, Felt};

/// Prefix of the contract address preimage.
pub const CONTRACT_ADDRESS_PREFIX: Felt = const_expect!(
    Felt::from_short_string("STARKNET_CONTRACT_ADDRESS"),
    "prefix is a short string"
);

/// Hash-on-elements of `elems`: Pedersen folded over the elements and their count.
pub fn compute_hash_on_elements(elems: &[Felt]) -> Result<Felt, TxHashError> {
    let values: Vec<BigUint> = elems.iter().map(Felt::to_biguint).collect();
    let hash = StarkCurve::get().compute_hash_on_elements(&values)?;
    Ok(Felt::try_from(hash)?)
}

/// Hashes the canonical transaction preimage
/// `[prefix, version, address, selector, calldata_hash, max_fee, chain_id, ...additional]`.
#[allow(clippy::too_many_arguments)]
pub fn calculate_transaction_hash_common(
    tx_hash_prefix: Felt,
    version: Felt,
    contract_address: Felt,
    entry_point_selector: Felt,
    calldata_hash: Felt,
    max_fee: Felt,
    chain_id: Felt,
    additional_data: &[Felt],
) -> Result<Felt, TxHashError> {
    let mut data = Vec::with_capacity(7 + additional_data.len());
    data.extend_from_slice(&[
        tx_hash_prefix,
        version,
        contract_address,
        entry_point_selector,
        calldata_hash,
        max_fee,
        chain_id,
    ]);
    data.extend_from_slice(additional_data);
    compute_hash_on_elements(&data)
}

/// Address a contract will be deployed at, given its deployer, salt, class
/// and constructor arguments.
pub fn precompute_address(
    deployer_address: Felt,
    salt: Felt,
    class_hash: Felt,
    constructor_calldata: &[Felt],
) -> Result<Felt, TxHashError> {
    let calldata_hash = compute_hash_on_elements(constructor_calldata)?;
    compute_hash_on_elements(&[
        CONTRACT_ADDRESS_PREFIX,
        deployer_address,
        salt,
        class_hash,
        calldata_hash,
    ])
}
