//! Per-chain protocol deployment addresses.

use alloy_primitives::{address, Address};
use thiserror::Error;

/// The aggregation router v6 deployment shared by all supported chains.
pub const LIMIT_ORDER_PROTOCOL: Address = address!("111111125421ca6dc452d289314280a0f8842a65");

/// Chain id of zkSync Era, which uses a different deployment scheme and is
/// not served by the shared router address.
pub const ZKSYNC_CHAIN_ID: u64 = 324;

/// Errors produced by the deployment registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressesError {
	/// Error that occurs when no protocol deployment is known for a chain.
	#[error("chain {0} is not supported")]
	UnsupportedChain(u64),
}

/// Returns the limit order protocol address for `chain_id`.
pub fn limit_order_protocol(chain_id: u64) -> Result<Address, AddressesError> {
	if chain_id == ZKSYNC_CHAIN_ID {
		return Err(AddressesError::UnsupportedChain(chain_id));
	}

	Ok(LIMIT_ORDER_PROTOCOL)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_mainnet_and_rejects_zksync() {
		assert_eq!(limit_order_protocol(1).unwrap(), LIMIT_ORDER_PROTOCOL);
		assert_eq!(limit_order_protocol(137).unwrap(), LIMIT_ORDER_PROTOCOL);
		assert_eq!(
			limit_order_protocol(ZKSYNC_CHAIN_ID),
			Err(AddressesError::UnsupportedChain(324))
		);
	}
}
