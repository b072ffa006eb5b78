//! Gas-efficient RFQ-style orders.
//!
//! An RFQ order is a plain order locked into the cheapest fill path: one
//! fill only, invalidated through the bit invalidator, with a mandatory
//! expiration and nonce. It is expressed here as a constructor over
//! [`LimitOrder`] rather than a separate type, so everything downstream
//! (hashing, calldata, fees) works unchanged.

use crate::extension::ExtensionBuilder;
use crate::interaction::Interaction;
use crate::maker_traits::MakerTraits;
use crate::order::{LimitOrder, OrderError, OrderInfo};
use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Errors produced when building an RFQ order.
#[derive(Debug, Error)]
pub enum RfqOrderError {
	/// Error that occurs when the traits word cannot hold a value.
	#[error(transparent)]
	Traits(#[from] crate::maker_traits::MakerTraitsError),
	/// Error that occurs in the underlying order constructor.
	#[error(transparent)]
	Order(#[from] OrderError),
}

/// Core fields of an RFQ order. Salt and receiver are fixed by the RFQ
/// construction and therefore absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RfqOrderInfo {
	/// Asset the maker is selling.
	pub maker_asset: Address,
	/// Asset the maker is buying.
	pub taker_asset: Address,
	/// Amount of the maker asset offered.
	pub making_amount: U256,
	/// Amount of the taker asset requested.
	pub taking_amount: U256,
	/// The order creator and signer.
	pub maker: Address,
}

/// Quote-specific parameters of an RFQ order.
#[derive(Debug, Clone, Default)]
pub struct RfqOrderOptions {
	/// Restricts filling to one address.
	pub allowed_sender: Option<Address>,
	/// Expiration timestamp in seconds. Mandatory for RFQ quotes.
	pub expiration: u64,
	/// Unique id among the maker's orders, at most 40 bits.
	pub nonce: u64,
	/// Maker permit executed before the fill.
	pub permit: Option<Interaction>,
	/// Move maker funds through permit2.
	pub use_permit2: bool,
}

/// Builds an RFQ-configured [`LimitOrder`].
pub fn rfq_order(info: RfqOrderInfo, options: RfqOrderOptions) -> Result<LimitOrder, RfqOrderError> {
	let mut maker_traits = MakerTraits::default()
		.disable_multiple_fills()
		.allow_partial_fills()
		.with_expiration(options.expiration)?
		.with_nonce(options.nonce)?;

	if let Some(sender) = options.allowed_sender {
		maker_traits = maker_traits.with_allowed_sender(sender)?;
	}

	if options.use_permit2 {
		maker_traits = maker_traits.enable_permit2();
	}

	let mut extension = ExtensionBuilder::new();
	if let Some(permit) = &options.permit {
		extension = extension.with_maker_permit(permit.target, &permit.data);
	}

	Ok(LimitOrder::new(
		OrderInfo {
			maker_asset: info.maker_asset,
			taker_asset: info.taker_asset,
			making_amount: info.making_amount,
			taking_amount: info.taking_amount,
			maker: info.maker,
			salt: None,
			receiver: None,
		},
		maker_traits,
		extension.build(),
	)?)
}
