//! Typed-data hashing for the on-chain order struct.
//!
//! The order tuple and its EIP-712 encoding are fixed by the settlement
//! contract; hashing itself is delegated to the standard implementation in
//! `alloy-sol-types`.

use crate::addresses::{limit_order_protocol, AddressesError};
use alloy_primitives::{B256, U256};
use alloy_sol_types::{sol, Eip712Domain, SolStruct};

/// EIP-712 domain name of the settlement contract.
pub const TYPED_DATA_NAME: &str = "1inch Aggregation Router";

/// EIP-712 domain version of the settlement contract.
pub const TYPED_DATA_VERSION: &str = "6";

sol! {
	/// The order struct exactly as the settlement contract hashes and
	/// ABI-encodes it.
	struct Order {
		uint256 salt;
		address maker;
		address receiver;
		address makerAsset;
		address takerAsset;
		uint256 makingAmount;
		uint256 takingAmount;
		uint256 makerTraits;
	}
}

/// Builds the verifying domain for `chain_id`.
pub fn limit_order_domain(chain_id: u64) -> Result<Eip712Domain, AddressesError> {
	Ok(Eip712Domain::new(
		Some(TYPED_DATA_NAME.into()),
		Some(TYPED_DATA_VERSION.into()),
		Some(U256::from(chain_id)),
		Some(limit_order_protocol(chain_id)?),
		None,
	))
}

/// Computes the order hash the maker signs: the EIP-712 signing hash of the
/// order struct under the protocol domain for `chain_id`.
pub fn order_hash(order: &Order, chain_id: u64) -> Result<B256, AddressesError> {
	Ok(order.eip712_signing_hash(&limit_order_domain(chain_id)?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, b256, Address};

	#[test]
	fn order_hash_matches_reference_vector() {
		let order = Order {
			salt: U256::from(10u8),
			maker: address!("00000000219ab540356cbb839cbe05303d7705fa"),
			receiver: Address::ZERO,
			makerAsset: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
			takerAsset: address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
			makingAmount: U256::from(1_000_000_000_000_000_000u64),
			takingAmount: U256::from(1_420_000_000u64),
			makerTraits: U256::ZERO,
		};

		assert_eq!(
			order_hash(&order, 1).unwrap(),
			b256!("238555f8a7e8efc8af44c2959d137bb3091f2f95e0e4f9243be2cbe669b14a6f")
		);
	}

	#[test]
	fn domain_separator_matches_reference_vector() {
		let domain = limit_order_domain(1).unwrap();

		assert_eq!(
			domain.separator(),
			b256!("d999e213f11c7bfa3e796c3409e316f25e02aa3e25e5c207a92e381c7d22b6de")
		);
	}

	#[test]
	fn unsupported_chain_fails() {
		assert!(limit_order_domain(324).is_err());
	}
}
