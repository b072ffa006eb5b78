//! Fee math mirroring the settlement contract's integer arithmetic.
//!
//! Every operation here reproduces the hook contract's formulas including
//! their rounding: the taking amount rounds up so the taker can never
//! underpay, everything else truncates. The asymmetry is deliberate and any
//! deviation shows up as balance mismatches during settlement.

use crate::fees::Fees;
use crate::whitelist::WhitelistHalfAddress;
use alloy_primitives::{Address, U256};
use order_types::{mul_div, MathError, Rounding};

/// Computes fill amounts and fee splits for a fee-bearing order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeCalculator {
	fees: Fees,
	whitelist: WhitelistHalfAddress,
}

impl FeeCalculator {
	/// Creates a calculator over fee parameters and a resolver whitelist.
	pub fn new(fees: Fees, whitelist: WhitelistHalfAddress) -> Self {
		Self { fees, whitelist }
	}

	/// Total amount the taker pays: the order taking amount marked up by
	/// the taker's resolver and integrator fees, rounded up.
	pub fn get_taking_amount(
		&self,
		taker: Address,
		order_taking_amount: U256,
	) -> Result<U256, MathError> {
		let (resolver_fee, integrator_fee) = self.fees_for_taker(taker);
		let base = U256::from(Fees::BASE_1E5);

		mul_div(
			order_taking_amount,
			base + resolver_fee + integrator_fee,
			base,
			Rounding::Ceil,
		)
	}

	/// Amount of the maker asset covered by a fee-inclusive payment,
	/// rounded down.
	pub fn get_making_amount(
		&self,
		taker: Address,
		making_amount: U256,
	) -> Result<U256, MathError> {
		let (resolver_fee, integrator_fee) = self.fees_for_taker(taker);
		let base = U256::from(Fees::BASE_1E5);

		mul_div(
			making_amount,
			base,
			base + resolver_fee + integrator_fee,
			Rounding::Floor,
		)
	}

	/// Fee in the taker asset paid to the resolver fee receiver.
	pub fn get_resolver_fee(
		&self,
		taker: Address,
		order_taking_amount: U256,
	) -> Result<U256, MathError> {
		let taking_amount = self.get_taking_amount(taker, order_taking_amount)?;
		let (resolver_fee, integrator_fee) = self.fees_for_taker(taker);
		let base = U256::from(Fees::BASE_1E5);

		mul_div(
			taking_amount,
			resolver_fee,
			base + resolver_fee + integrator_fee,
			Rounding::Floor,
		)
	}

	/// Fee in the taker asset credited to the integrator wallet: its share
	/// of the total integrator fee.
	pub fn get_integrator_fee(
		&self,
		taker: Address,
		order_taking_amount: U256,
	) -> Result<U256, MathError> {
		let total = self.total_integrator_fee(taker, order_taking_amount)?;

		mul_div(
			total,
			U256::from(self.fees.integrator.share.to_fraction(Fees::BASE_1E2)),
			U256::from(Fees::BASE_1E2),
			Rounding::Floor,
		)
	}

	/// The protocol's cut of the integrator fee: whatever the integrator's
	/// share leaves over.
	pub fn get_protocol_share_of_integrator_fee(
		&self,
		taker: Address,
		order_taking_amount: U256,
	) -> Result<U256, MathError> {
		let total = self.total_integrator_fee(taker, order_taking_amount)?;
		let integrator = self.get_integrator_fee(taker, order_taking_amount)?;

		Ok(total - integrator)
	}

	/// Everything the protocol receives: the resolver fee plus its share
	/// of the integrator fee.
	pub fn get_protocol_fee(
		&self,
		taker: Address,
		order_taking_amount: U256,
	) -> Result<U256, MathError> {
		let resolver = self.get_resolver_fee(taker, order_taking_amount)?;
		let integrator_part =
			self.get_protocol_share_of_integrator_fee(taker, order_taking_amount)?;

		Ok(resolver + integrator_part)
	}

	fn total_integrator_fee(
		&self,
		taker: Address,
		order_taking_amount: U256,
	) -> Result<U256, MathError> {
		let taking_amount = self.get_taking_amount(taker, order_taking_amount)?;
		let (resolver_fee, integrator_fee) = self.fees_for_taker(taker);
		let base = U256::from(Fees::BASE_1E5);

		mul_div(
			taking_amount,
			integrator_fee,
			base + resolver_fee + integrator_fee,
			Rounding::Floor,
		)
	}

	/// Effective fee numerators (1e5 scale) for `taker`: whitelisted
	/// resolvers pay the discounted resolver fee.
	fn fees_for_taker(&self, taker: Address) -> (U256, U256) {
		let discount_numerator = if self.whitelist.is_whitelisted(taker) {
			Fees::BASE_1E2
				- self
					.fees
					.resolver
					.whitelist_discount
					.to_fraction(Fees::BASE_1E2)
		} else {
			Fees::BASE_1E2
		};

		let resolver_fee = discount_numerator * self.fees.resolver.fee.to_fraction(Fees::BASE_1E5)
			/ Fees::BASE_1E2;
		let integrator_fee = self.fees.integrator.fee.to_fraction(Fees::BASE_1E5);

		(U256::from(resolver_fee), U256::from(integrator_fee))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::integrator_fee::IntegratorFee;
	use crate::resolver_fee::ResolverFee;
	use alloy_primitives::address;
	use order_types::Bps;

	fn resolver_only(fee_percent: u64, discount_percent: u64) -> FeeCalculator {
		FeeCalculator::new(
			Fees::resolver_fee(
				ResolverFee::with_discount(
					address!("0000000000000000000000000000000000000003"),
					Bps::from_percent(fee_percent).unwrap(),
					Bps::from_percent(discount_percent).unwrap(),
				)
				.unwrap(),
			),
			WhitelistHalfAddress::new(&[address!("0000000000000000000000000000000000000064")]),
		)
	}

	#[test]
	fn one_percent_resolver_fee_end_to_end() {
		let calculator = resolver_only(1, 0);
		let whitelisted = address!("0000000000000000000000000000000000000064");
		let base_amount = U256::from(100_000_000u64);

		assert_eq!(
			calculator.get_taking_amount(whitelisted, base_amount).unwrap(),
			U256::from(101_000_000u64)
		);
		assert_eq!(
			calculator.get_resolver_fee(whitelisted, base_amount).unwrap(),
			U256::from(1_000_000u64)
		);
	}

	#[test]
	fn integrator_share_split() {
		let calculator = FeeCalculator::new(
			Fees::integrator_fee(
				IntegratorFee::new(
					address!("0000000000000000000000000000000000000002"),
					address!("0000000000000000000000000000000000000003"),
					Bps::from_percent(5).unwrap(),
					Bps::new(1_000).unwrap(),
				)
				.unwrap(),
			),
			WhitelistHalfAddress::default(),
		);
		let base_amount = U256::from(100_000_000u64);

		// 10% of the 5% integrator cut.
		assert_eq!(
			calculator
				.get_integrator_fee(Address::ZERO, base_amount)
				.unwrap(),
			U256::from(500_000u64)
		);
	}

	#[test]
	fn combined_protocol_fee() {
		let protocol = address!("0000000000000000000000000000000000000003");
		let calculator = FeeCalculator::new(
			Fees::new(
				ResolverFee::new(protocol, Bps::from_percent(1).unwrap()).unwrap(),
				IntegratorFee::new(
					address!("0000000000000000000000000000000000000002"),
					protocol,
					Bps::from_percent(5).unwrap(),
					Bps::new(1_000).unwrap(),
				)
				.unwrap(),
			)
			.unwrap(),
			WhitelistHalfAddress::default(),
		);
		let base_amount = U256::from(100_000_000u64);

		assert_eq!(
			calculator.get_taking_amount(Address::ZERO, base_amount).unwrap(),
			U256::from(106_000_000u64)
		);
		// Resolver fee plus the 90% protocol share of the integrator fee.
		assert_eq!(
			calculator.get_protocol_fee(Address::ZERO, base_amount).unwrap(),
			U256::from(5_500_000u64)
		);
	}

	#[test]
	fn settled_order_protocol_fee_vector() {
		// Reproduces a settled mainnet fill: a 10 bps integrator fee with
		// a 60% share on a taking amount of 18442227.
		let calculator = FeeCalculator::new(
			Fees::integrator_fee(
				IntegratorFee::new(
					address!("8e097e5e0493de033270a01b324caf31f464dc67"),
					address!("90cbe4bdd538d6e9b379bff5fe72c3d67a521de5"),
					Bps::new(10).unwrap(),
					Bps::new(6_000).unwrap(),
				)
				.unwrap(),
			),
			WhitelistHalfAddress::new(&[address!("0000000000000000000000000000000000000001")]),
		);

		assert_eq!(
			calculator
				.get_protocol_fee(Address::ZERO, U256::from(18_442_227u64))
				.unwrap(),
			U256::from(7_377u64)
		);
	}

	#[test]
	fn whitelisted_takers_pay_less() {
		let calculator = resolver_only(1, 10);
		let whitelisted = address!("0000000000000000000000000000000000000064");
		let outsider = address!("00000000000000000000000000000000000000ff");
		let base_amount = U256::from(1_000_000_000u64);

		let discounted = calculator.get_taking_amount(whitelisted, base_amount).unwrap();
		let full = calculator.get_taking_amount(outsider, base_amount).unwrap();

		// 0.9% vs 1%.
		assert_eq!(discounted, U256::from(1_009_000_000u64));
		assert_eq!(full, U256::from(1_010_000_000u64));
		assert!(discounted < full);
	}

	#[test]
	fn taking_amount_is_monotonic() {
		let calculator = resolver_only(1, 0);
		let taker = Address::ZERO;

		let mut previous = U256::ZERO;
		for amount in [1u64, 99, 100, 101, 100_000, 100_001, 1_000_000_000] {
			let taking = calculator
				.get_taking_amount(taker, U256::from(amount))
				.unwrap();
			assert!(taking >= previous);
			previous = taking;
		}
	}

	#[test]
	fn making_amount_inverts_with_floor() {
		let calculator = resolver_only(1, 0);
		let taker = Address::ZERO;
		let base_amount = U256::from(100_000_000u64);

		let taking = calculator.get_taking_amount(taker, base_amount).unwrap();
		let making = calculator.get_making_amount(taker, taking).unwrap();

		assert_eq!(making, base_amount);
	}
}
