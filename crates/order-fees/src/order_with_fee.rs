//! Orders carrying a fee-taker extension.

use crate::calculator::FeeCalculator;
use crate::fee_taker::{FeeTakerError, FeeTakerExtension};
use alloy_primitives::{Address, U256};
use order_types::{
	calc_making_amount, calc_taking_amount, eip712, Extension, LimitOrder, MakerTraits,
	MakerTraitsError, MathError, OrderError, OrderInfo,
};
use thiserror::Error;

/// Errors produced when assembling or reconstructing fee-bearing orders.
#[derive(Debug, Error)]
pub enum OrderWithFeeError {
	/// Error that occurs when the order receiver is not the fee hook.
	#[error("invalid order: receiver must be the fee extension address")]
	ReceiverMismatch,
	/// Error that occurs in the underlying order constructor.
	#[error(transparent)]
	Order(#[from] OrderError),
	/// Error that occurs while decoding the fee extension.
	#[error(transparent)]
	FeeTaker(#[from] FeeTakerError),
	/// Error that occurs while configuring maker traits.
	#[error(transparent)]
	Traits(#[from] MakerTraitsError),
}

/// Core fields of a fee-bearing order. The receiver is fixed to the fee
/// hook address, which forwards taker tokens onward after charging fees,
/// so it is absent here; route the surplus with
/// [`FeeTakerOptions::custom_receiver`].
///
/// [`FeeTakerOptions::custom_receiver`]: crate::fee_taker::FeeTakerOptions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderWithFeeInfo {
	/// Asset the maker is selling.
	pub maker_asset: Address,
	/// Asset the maker is buying.
	pub taker_asset: Address,
	/// Amount of the maker asset offered.
	pub making_amount: U256,
	/// Amount of the taker asset requested, before fees.
	pub taking_amount: U256,
	/// The order creator and signer.
	pub maker: Address,
	/// Explicit salt; derived when absent.
	pub salt: Option<U256>,
}

/// A limit order composed with a fee-taker extension.
///
/// Fee-dependent amount queries route through the extension's calculator;
/// everything else is the inner [`LimitOrder`].
#[derive(Debug, Clone, PartialEq)]
pub struct LimitOrderWithFee {
	order: LimitOrder,
	/// The attached fee configuration.
	pub fee_extension: FeeTakerExtension,
}

impl LimitOrderWithFee {
	/// Assembles a fee-bearing order.
	///
	/// The post-interaction flag is enabled on the given traits so the fee
	/// hook executes, and a random 40-bit nonce is assigned when the
	/// traits carry none.
	pub fn new(
		info: OrderWithFeeInfo,
		maker_traits: MakerTraits,
		fee_extension: FeeTakerExtension,
	) -> Result<Self, OrderWithFeeError> {
		let mut maker_traits = maker_traits.enable_post_interaction();

		if maker_traits.nonce_or_epoch() == 0 {
			let nonce = rand::random::<u64>() & ((1 << 40) - 1);
			maker_traits = maker_traits.with_nonce(nonce)?;
		}

		let order = LimitOrder::new(
			OrderInfo {
				maker_asset: info.maker_asset,
				taker_asset: info.taker_asset,
				making_amount: info.making_amount,
				taking_amount: info.taking_amount,
				maker: info.maker,
				salt: info.salt,
				receiver: Some(fee_extension.address),
			},
			maker_traits,
			fee_extension.build(),
		)?;

		Ok(Self {
			order,
			fee_extension,
		})
	}

	/// Rebuilds a fee-bearing order from a decoded contract-level struct
	/// and its extension.
	pub fn from_data_and_extension(
		data: eip712::Order,
		extension: Extension,
	) -> Result<Self, OrderWithFeeError> {
		let fee_extension = FeeTakerExtension::from_extension(&extension)?;

		if data.receiver != fee_extension.address {
			return Err(OrderWithFeeError::ReceiverMismatch);
		}

		let order = LimitOrder::from_data_and_extension(data, extension)?;

		Ok(Self {
			order,
			fee_extension,
		})
	}

	/// The underlying order.
	pub fn order(&self) -> &LimitOrder {
		&self.order
	}

	fn calculator(&self) -> FeeCalculator {
		self.fee_extension.calculator()
	}

	fn scaled_taking_amount(&self, making_amount: U256) -> Result<U256, MathError> {
		calc_taking_amount(
			making_amount,
			self.order.making_amount,
			self.order.taking_amount,
		)
	}

	/// The taking amount `taker` owes, fees included, for filling
	/// `making_amount` of the order.
	pub fn get_taking_amount(
		&self,
		taker: Address,
		making_amount: U256,
	) -> Result<U256, MathError> {
		let taking_amount = self.scaled_taking_amount(making_amount)?;

		self.calculator().get_taking_amount(taker, taking_amount)
	}

	/// The making amount `taker` receives for paying `taking_amount`,
	/// fees included.
	pub fn get_making_amount(
		&self,
		taker: Address,
		taking_amount: U256,
	) -> Result<U256, MathError> {
		let making_amount = calc_making_amount(
			taking_amount,
			self.order.making_amount,
			self.order.taking_amount,
		)?;

		self.calculator().get_making_amount(taker, making_amount)
	}

	/// Resolver fee for filling `making_amount` of the order.
	pub fn get_resolver_fee(
		&self,
		taker: Address,
		making_amount: U256,
	) -> Result<U256, MathError> {
		let taking_amount = self.scaled_taking_amount(making_amount)?;

		self.calculator().get_resolver_fee(taker, taking_amount)
	}

	/// Integrator fee for filling `making_amount` of the order.
	pub fn get_integrator_fee(
		&self,
		taker: Address,
		making_amount: U256,
	) -> Result<U256, MathError> {
		let taking_amount = self.scaled_taking_amount(making_amount)?;

		self.calculator().get_integrator_fee(taker, taking_amount)
	}

	/// Protocol fee for filling `making_amount` of the order.
	pub fn get_protocol_fee(
		&self,
		taker: Address,
		making_amount: U256,
	) -> Result<U256, MathError> {
		let taking_amount = self.scaled_taking_amount(making_amount)?;

		self.calculator().get_protocol_fee(taker, taking_amount)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fees::Fees;
	use crate::resolver_fee::ResolverFee;
	use alloy_primitives::address;
	use order_types::Bps;

	fn fee_extension() -> FeeTakerExtension {
		FeeTakerExtension::new(
			address!("0000000000000000000000000000000000000001"),
			Fees::resolver_fee(
				ResolverFee::new(
					address!("0000000000000000000000000000000000000003"),
					Bps::from_percent(1).unwrap(),
				)
				.unwrap(),
			),
			&[address!("0000000000000000000000000000000000000064")],
		)
		.unwrap()
	}

	fn order_info() -> OrderWithFeeInfo {
		OrderWithFeeInfo {
			maker_asset: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
			taker_asset: address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
			making_amount: U256::from(1_000_000_000_000_000_000u64),
			taking_amount: U256::from(100_000_000u64),
			maker: address!("00000000219ab540356cbb839cbe05303d7705fa"),
			salt: None,
		}
	}

	#[test]
	fn configures_traits_and_receiver() {
		let order =
			LimitOrderWithFee::new(order_info(), MakerTraits::default(), fee_extension())
				.unwrap();

		let inner = order.order();
		assert!(inner.maker_traits.has_post_interaction());
		assert!(inner.maker_traits.has_extension());
		assert_ne!(inner.maker_traits.nonce_or_epoch(), 0);
		assert_eq!(inner.receiver, fee_extension().address);
		LimitOrder::verify_salt(inner.salt, &inner.extension).unwrap();
	}

	#[test]
	fn keeps_explicit_nonce() {
		let traits = MakerTraits::default().with_nonce(42).unwrap();
		let order = LimitOrderWithFee::new(order_info(), traits, fee_extension()).unwrap();

		assert_eq!(order.order().maker_traits.nonce_or_epoch(), 42);
	}

	#[test]
	fn reconstructs_from_struct_and_extension() {
		let order =
			LimitOrderWithFee::new(order_info(), MakerTraits::default(), fee_extension())
				.unwrap();

		let rebuilt = LimitOrderWithFee::from_data_and_extension(
			order.order().to_struct(),
			order.order().extension.clone(),
		)
		.unwrap();

		assert_eq!(rebuilt, order);
	}

	#[test]
	fn rejects_foreign_receiver() {
		let order =
			LimitOrderWithFee::new(order_info(), MakerTraits::default(), fee_extension())
				.unwrap();

		let mut data = order.order().to_struct();
		data.receiver = address!("00000000000000000000000000000000000000ff");

		assert!(matches!(
			LimitOrderWithFee::from_data_and_extension(
				data,
				order.order().extension.clone(),
			),
			Err(OrderWithFeeError::ReceiverMismatch)
		));
	}

	#[test]
	fn full_fill_charges_the_resolver_fee() {
		let order =
			LimitOrderWithFee::new(order_info(), MakerTraits::default(), fee_extension())
				.unwrap();
		let taker = Address::ZERO;

		let taking = order
			.get_taking_amount(taker, order.order().making_amount)
			.unwrap();
		assert_eq!(taking, U256::from(101_000_000u64));
		assert_eq!(
			order
				.get_resolver_fee(taker, order.order().making_amount)
				.unwrap(),
			U256::from(1_000_000u64)
		);
	}

	#[test]
	fn partial_fill_scales_linearly() {
		let order =
			LimitOrderWithFee::new(order_info(), MakerTraits::default(), fee_extension())
				.unwrap();
		let half = order.order().making_amount / U256::from(2u8);

		assert_eq!(
			order.get_taking_amount(Address::ZERO, half).unwrap(),
			U256::from(50_500_000u64)
		);
	}
}
