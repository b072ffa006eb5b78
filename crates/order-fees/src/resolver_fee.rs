//! The fee a resolver pays for filling an order.

use crate::FeesError;
use alloy_primitives::Address;
use order_types::Bps;

/// Fee charged to the resolver filling the order, paid to `receiver` in the
/// taker asset. Whitelisted resolvers receive `whitelist_discount` off the
/// fee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverFee {
	/// Receiver of the fee.
	pub receiver: Address,
	/// Fee in basis points.
	pub fee: Bps,
	/// Discount for whitelisted resolvers, in whole percents.
	pub whitelist_discount: Bps,
}

impl ResolverFee {
	/// No resolver fee.
	pub const ZERO: ResolverFee = ResolverFee {
		receiver: Address::ZERO,
		fee: Bps::ZERO,
		whitelist_discount: Bps::ZERO,
	};

	/// Creates a resolver fee without a whitelist discount.
	pub fn new(receiver: Address, fee: Bps) -> Result<Self, FeesError> {
		Self::with_discount(receiver, fee, Bps::ZERO)
	}

	/// Creates a resolver fee with a whitelist discount.
	pub fn with_discount(
		receiver: Address,
		fee: Bps,
		whitelist_discount: Bps,
	) -> Result<Self, FeesError> {
		if receiver.is_zero() && !fee.is_zero() {
			return Err(FeesError::FeeWithoutReceiver);
		}

		if !receiver.is_zero() && fee.is_zero() {
			return Err(FeesError::ReceiverWithoutFee);
		}

		if fee.is_zero() && !whitelist_discount.is_zero() {
			return Err(FeesError::DiscountWithoutFee);
		}

		// The wire format stores the discount complement in a single byte
		// of percent granularity.
		if whitelist_discount.value() % 100 != 0 {
			return Err(FeesError::DiscountPrecision(whitelist_discount));
		}

		Ok(Self {
			receiver,
			fee,
			whitelist_discount,
		})
	}

	/// Returns true when no fee is charged.
	pub fn is_zero(&self) -> bool {
		self.fee.is_zero()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn accepts_matching_receiver_and_fee() {
		let receiver = address!("0000000000000000000000000000000000000003");
		let fee = ResolverFee::new(receiver, Bps::from_percent(1).unwrap()).unwrap();

		assert!(!fee.is_zero());
		assert!(ResolverFee::ZERO.is_zero());
	}

	#[test]
	fn rejects_fee_receiver_mismatches() {
		let receiver = address!("0000000000000000000000000000000000000003");
		let one_percent = Bps::from_percent(1).unwrap();

		assert_eq!(
			ResolverFee::new(Address::ZERO, one_percent),
			Err(FeesError::FeeWithoutReceiver)
		);
		assert_eq!(
			ResolverFee::new(receiver, Bps::ZERO),
			Err(FeesError::ReceiverWithoutFee)
		);
	}

	#[test]
	fn rejects_discount_without_fee() {
		assert_eq!(
			ResolverFee::with_discount(Address::ZERO, Bps::ZERO, Bps::from_percent(1).unwrap()),
			Err(FeesError::DiscountWithoutFee)
		);
	}

	#[test]
	fn rejects_sub_percent_discounts() {
		let receiver = address!("0000000000000000000000000000000000000003");
		let result = ResolverFee::with_discount(
			receiver,
			Bps::from_percent(1).unwrap(),
			Bps::new(150).unwrap(),
		);

		assert!(matches!(result, Err(FeesError::DiscountPrecision(_))));
	}
}
