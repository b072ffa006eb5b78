//! Calls against the native-order factory and its deployed proxies.
//!
//! Native-asset orders are held by per-order escrow proxies. The factory
//! deploys one and funds it with the making amount; cancellation goes to
//! the proxy itself.

use crate::abi::{INativeOrderFactory, INativeOrderImpl, Order};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use order_types::LimitOrder;

/// A contract call ready for transaction assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInfo {
	/// Destination contract.
	pub to: Address,
	/// Native value attached to the call.
	pub value: U256,
	/// Encoded calldata.
	pub data: Bytes,
}

/// The factory deploying native-order escrow proxies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeOrdersFactory {
	/// Deployed factory address.
	pub address: Address,
}

impl NativeOrdersFactory {
	/// Creates a factory handle.
	pub fn new(address: Address) -> Self {
		Self { address }
	}

	/// Escrow-creation call for `order`, funded with its making amount.
	/// The order is created on behalf of `maker`.
	pub fn create(&self, maker: Address, order: &LimitOrder) -> CallInfo {
		let mut abi_order = Order::from_limit_order(order);
		abi_order.maker = U256::from_be_slice(maker.as_slice());

		CallInfo {
			to: self.address,
			value: order.making_amount,
			data: Bytes::from(INativeOrderFactory::createCall { order: abi_order }.abi_encode()),
		}
	}
}

/// A deployed native-order escrow proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeOrdersImpl {
	/// Deployed proxy address.
	pub address: Address,
}

impl NativeOrdersImpl {
	/// Creates a proxy handle.
	pub fn new(address: Address) -> Self {
		Self { address }
	}

	/// Cancellation call issued by the maker.
	pub fn cancel(&self, maker: Address, order: &LimitOrder) -> CallInfo {
		let mut abi_order = Order::from_limit_order(order);
		abi_order.maker = U256::from_be_slice(maker.as_slice());

		CallInfo {
			to: self.address,
			value: U256::ZERO,
			data: Bytes::from(INativeOrderImpl::cancelOrderCall { order: abi_order }.abi_encode()),
		}
	}

	/// Cancellation of an expired order by a resolver, rewarded up to
	/// `reward_limit`.
	pub fn cancel_expired_order_by_resolver(
		&self,
		maker: Address,
		order: &LimitOrder,
		reward_limit: U256,
	) -> CallInfo {
		let mut abi_order = Order::from_limit_order(order);
		abi_order.maker = U256::from_be_slice(maker.as_slice());

		CallInfo {
			to: self.address,
			value: U256::ZERO,
			data: Bytes::from(
				INativeOrderImpl::cancelExpiredOrderByResolverCall {
					order: abi_order,
					rewardLimit: reward_limit,
				}
				.abi_encode(),
			),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;
	use order_types::{Extension, MakerTraits, OrderInfo};

	fn sample_order() -> LimitOrder {
		LimitOrder::new(
			OrderInfo {
				maker_asset: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
				taker_asset: address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
				making_amount: U256::from(1_000_000_000_000_000_000u64),
				taking_amount: U256::from(1_420_000_000u64),
				maker: address!("00000000219ab540356cbb839cbe05303d7705fa"),
				..OrderInfo::default()
			},
			MakerTraits::default(),
			Extension::default(),
		)
		.unwrap()
	}

	#[test]
	fn create_funds_the_escrow_with_the_making_amount() {
		let factory =
			NativeOrdersFactory::new(address!("00000000000000000000000000000000000000fa"));
		let order = sample_order();
		let proxy_maker = address!("00000000000000000000000000000000000000ab");

		let call = factory.create(proxy_maker, &order);

		assert_eq!(call.to, factory.address);
		assert_eq!(call.value, order.making_amount);
		// The overridden maker sits in the second tuple word.
		let maker_word = &call.data[4 + 32..4 + 64];
		assert_eq!(&maker_word[12..], proxy_maker.as_slice());
	}

	#[test]
	fn cancel_carries_no_value() {
		let proxy = NativeOrdersImpl::new(address!("00000000000000000000000000000000000000ab"));
		let order = sample_order();

		let call = proxy.cancel(order.maker, &order);
		assert_eq!(call.value, U256::ZERO);
		assert_eq!(call.to, proxy.address);

		let reward_call =
			proxy.cancel_expired_order_by_resolver(order.maker, &order, U256::from(1u8));
		assert_ne!(call.data, reward_call.data);
	}
}
