//! The fee an integrator earns for originating an order.

use crate::FeesError;
use alloy_primitives::Address;
use order_types::Bps;

/// Fee charged on behalf of the integrator who originated the order.
/// `share` of the fee goes to the `integrator` wallet, the remainder to the
/// `protocol`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegratorFee {
	/// Wallet receiving the integrator's share.
	pub integrator: Address,
	/// Receiver of the protocol's remainder.
	pub protocol: Address,
	/// Total integrator fee in basis points.
	pub fee: Bps,
	/// Integrator's share of the fee, in basis points of the fee itself.
	pub share: Bps,
}

impl IntegratorFee {
	/// No integrator fee.
	pub const ZERO: IntegratorFee = IntegratorFee {
		integrator: Address::ZERO,
		protocol: Address::ZERO,
		fee: Bps::ZERO,
		share: Bps::ZERO,
	};

	/// Creates an integrator fee.
	pub fn new(
		integrator: Address,
		protocol: Address,
		fee: Bps,
		share: Bps,
	) -> Result<Self, FeesError> {
		if fee.is_zero() {
			if !integrator.is_zero() || !protocol.is_zero() || !share.is_zero() {
				return Err(FeesError::ReceiverWithoutFee);
			}
		} else if integrator.is_zero() || protocol.is_zero() {
			return Err(FeesError::FeeWithoutReceiver);
		}

		Ok(Self {
			integrator,
			protocol,
			fee,
			share,
		})
	}

	/// Returns true when no fee is charged.
	pub fn is_zero(&self) -> bool {
		self.fee.is_zero()
	}
}
