//! Combined resolver and integrator fee configuration.

use crate::integrator_fee::IntegratorFee;
use crate::resolver_fee::ResolverFee;
use crate::FeesError;
use alloy_primitives::Address;

/// Fee configuration of an order: an optional resolver fee and an optional
/// integrator fee sharing one protocol receiver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fees {
	/// Fee charged to the resolver.
	pub resolver: ResolverFee,
	/// Fee credited to the integrator.
	pub integrator: IntegratorFee,
}

impl Fees {
	/// Denominator of fee fractions on the wire: 100% = 100000.
	pub const BASE_1E5: u64 = 100_000;

	/// Denominator of percentages and shares on the wire: 100% = 100.
	pub const BASE_1E2: u64 = 100;

	/// Combines a resolver and an integrator fee.
	///
	/// Both fees route their protocol part to a single receiver slot in
	/// the wire format, so when both are present the resolver receiver and
	/// the integrator's protocol receiver must agree.
	pub fn new(resolver: ResolverFee, integrator: IntegratorFee) -> Result<Self, FeesError> {
		if !resolver.is_zero()
			&& !integrator.is_zero()
			&& resolver.receiver != integrator.protocol
		{
			return Err(FeesError::ProtocolReceiverMismatch {
				resolver: resolver.receiver,
				integrator: integrator.protocol,
			});
		}

		Ok(Self {
			resolver,
			integrator,
		})
	}

	/// Fee configuration with only a resolver fee.
	pub fn resolver_fee(resolver: ResolverFee) -> Self {
		Self {
			resolver,
			integrator: IntegratorFee::ZERO,
		}
	}

	/// Fee configuration with only an integrator fee.
	pub fn integrator_fee(integrator: IntegratorFee) -> Self {
		Self {
			resolver: ResolverFee::ZERO,
			integrator,
		}
	}

	/// Receiver of the protocol's part of the fees.
	pub fn protocol_fee_recipient(&self) -> Address {
		if self.resolver.receiver.is_zero() {
			self.integrator.protocol
		} else {
			self.resolver.receiver
		}
	}

	/// Receiver of the integrator's share.
	pub fn integrator_fee_recipient(&self) -> Address {
		self.integrator.integrator
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;
	use order_types::Bps;

	#[test]
	fn shares_protocol_receiver() {
		let protocol = address!("0000000000000000000000000000000000000003");
		let fees = Fees::new(
			ResolverFee::new(protocol, Bps::from_percent(2).unwrap()).unwrap(),
			IntegratorFee::new(
				address!("0000000000000000000000000000000000000002"),
				protocol,
				Bps::from_percent(5).unwrap(),
				Bps::from_percent(50).unwrap(),
			)
			.unwrap(),
		)
		.unwrap();

		assert_eq!(fees.protocol_fee_recipient(), protocol);
		assert_eq!(
			fees.integrator_fee_recipient(),
			address!("0000000000000000000000000000000000000002")
		);
	}

	#[test]
	fn rejects_diverging_protocol_receivers() {
		let result = Fees::new(
			ResolverFee::new(
				address!("0000000000000000000000000000000000000003"),
				Bps::from_percent(2).unwrap(),
			)
			.unwrap(),
			IntegratorFee::new(
				address!("0000000000000000000000000000000000000002"),
				address!("0000000000000000000000000000000000000004"),
				Bps::from_percent(5).unwrap(),
				Bps::from_percent(50).unwrap(),
			)
			.unwrap(),
		);

		assert!(matches!(
			result,
			Err(FeesError::ProtocolReceiverMismatch { .. })
		));
	}

	#[test]
	fn resolver_only_uses_resolver_receiver() {
		let receiver = address!("0000000000000000000000000000000000000003");
		let fees = Fees::resolver_fee(
			ResolverFee::new(receiver, Bps::from_percent(1).unwrap()).unwrap(),
		);

		assert_eq!(fees.protocol_fee_recipient(), receiver);
		assert!(fees.integrator_fee_recipient().is_zero());
	}
}
