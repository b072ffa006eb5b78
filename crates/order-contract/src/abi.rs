//! Solidity interface definitions for the settlement and factory
//! contracts.
//!
//! The router models addresses and trait words inside the order struct as
//! plain `uint256` slots, so the tuple here is all words; selectors depend
//! on it. Encoding is unaffected since addresses occupy a full word either
//! way.

use alloy_primitives::U256;
use alloy_sol_types::sol;
use order_types::LimitOrder;

sol! {
	/// The order tuple as the router's function signatures spell it.
	struct Order {
		uint256 salt;
		uint256 maker;
		uint256 receiver;
		uint256 makerAsset;
		uint256 takerAsset;
		uint256 makingAmount;
		uint256 takingAmount;
		uint256 makerTraits;
	}

	/// Fill entry points of the settlement router.
	interface IOrderMixin {
		function fillOrder(Order order, bytes32 r, bytes32 vs, uint256 amount, uint256 takerTraits) external payable returns (uint256, uint256, bytes32);
		function fillOrderArgs(Order order, bytes32 r, bytes32 vs, uint256 amount, uint256 takerTraits, bytes args) external payable returns (uint256, uint256, bytes32);
		function fillContractOrder(Order order, bytes signature, uint256 amount, uint256 takerTraits) external returns (uint256, uint256, bytes32);
		function fillContractOrderArgs(Order order, bytes signature, uint256 amount, uint256 takerTraits, bytes args) external returns (uint256, uint256, bytes32);
	}

	/// Factory deploying escrow proxies for native-asset orders.
	interface INativeOrderFactory {
		function create(Order order) external payable;
	}

	/// Order management on a deployed native-order proxy.
	interface INativeOrderImpl {
		function cancelOrder(Order order) external;
		function cancelExpiredOrderByResolver(Order order, uint256 rewardLimit) external;
	}
}

impl Order {
	/// Converts a domain order into the router's tuple layout.
	pub fn from_limit_order(order: &LimitOrder) -> Self {
		Self {
			salt: order.salt,
			maker: address_word(order.maker),
			receiver: address_word(order.receiver),
			makerAsset: address_word(order.maker_asset),
			takerAsset: address_word(order.taker_asset),
			makingAmount: order.making_amount,
			takingAmount: order.taking_amount,
			makerTraits: order.maker_traits.as_u256(),
		}
	}
}

fn address_word(address: alloy_primitives::Address) -> U256 {
	U256::from_be_slice(address.as_slice())
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, hex};
	use alloy_sol_types::SolCall;

	#[test]
	fn selectors_match_the_deployed_router() {
		assert_eq!(IOrderMixin::fillOrderCall::SELECTOR, hex!("9fda64bd"));
		assert_eq!(IOrderMixin::fillOrderArgsCall::SELECTOR, hex!("f497df75"));
		assert_eq!(IOrderMixin::fillContractOrderCall::SELECTOR, hex!("cc713a04"));
		assert_eq!(
			IOrderMixin::fillContractOrderArgsCall::SELECTOR,
			hex!("56a75868")
		);
	}

	#[test]
	fn address_words_are_left_padded() {
		let word = address_word(address!("ffeeddccbbaa99887766554433221100ffeeddcc"));

		assert_eq!(word >> 160, U256::ZERO);
		assert_eq!(
			word,
			U256::from_str_radix("ffeeddccbbaa99887766554433221100ffeeddcc", 16).unwrap()
		);
	}
}
