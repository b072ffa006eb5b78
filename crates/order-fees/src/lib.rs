//! Fee extension codec and fee math for limit orders.
//!
//! The fee hook charges resolver and integrator fees during settlement. Its
//! parameters ride inside the order extension, duplicated across the amount
//! getters and the post-interaction payload; this crate builds those
//! payloads, decodes them with strict cross-validation, and reproduces the
//! hook contract's integer fee math exactly.

use alloy_primitives::Address;
use order_types::Bps;
use thiserror::Error;

/// Fee math mirroring the settlement contract's integer arithmetic.
pub mod calculator;
/// The fee-taker extension codec.
pub mod fee_taker;
/// Combined resolver and integrator fee configuration.
pub mod fees;
/// The fee an integrator earns for originating an order.
pub mod integrator_fee;
/// Orders carrying a fee-taker extension.
pub mod order_with_fee;
/// The fee a resolver pays for filling an order.
pub mod resolver_fee;
/// Resolver whitelists keyed by address suffix.
pub mod whitelist;

/// Errors produced when constructing fee domain objects.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FeesError {
	/// Error that occurs when a fee is charged without a receiver.
	#[error("fee must be zero when its receiver is the zero address")]
	FeeWithoutReceiver,
	/// Error that occurs when a receiver is set without a fee.
	#[error("receiver must be the zero address when its fee is zero")]
	ReceiverWithoutFee,
	/// Error that occurs when a discount is set without a resolver fee.
	#[error("whitelist discount must be zero when the resolver fee is zero")]
	DiscountWithoutFee,
	/// Error that occurs when a discount is not a whole percent.
	#[error("whitelist discount {0} bps must have whole-percent precision")]
	DiscountPrecision(Bps),
	/// Error that occurs when both fees name different protocol receivers.
	#[error("resolver receiver {resolver} and integrator protocol receiver {integrator} must match")]
	ProtocolReceiverMismatch {
		/// Receiver named by the resolver fee.
		resolver: Address,
		/// Protocol receiver named by the integrator fee.
		integrator: Address,
	},
	/// Error that occurs when a whitelist exceeds the one-byte count.
	#[error("whitelist holds {0} entries, the wire format allows at most 255")]
	WhitelistTooLarge(usize),
	/// Error that occurs when a fee does not fit its two-byte wire field.
	#[error("fee of {0} bps exceeds the wire format's range")]
	FeeExceedsWireRange(Bps),
}

pub use calculator::FeeCalculator;
pub use fee_taker::{FeeTakerError, FeeTakerExtension, FeeTakerOptions};
pub use fees::Fees;
pub use integrator_fee::IntegratorFee;
pub use order_with_fee::{LimitOrderWithFee, OrderWithFeeError, OrderWithFeeInfo};
pub use resolver_fee::ResolverFee;
pub use whitelist::{address_half, AddressHalf, WhitelistHalfAddress};
