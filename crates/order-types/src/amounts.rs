//! Linear-proportion amount math for partial fills.

use crate::math::{mul_div, MathError, Rounding};
use alloy_primitives::U256;

/// Taking amount owed for filling `swap_maker_amount` of an order quoted at
/// `order_making_amount`/`order_taking_amount`. Rounds up so the taker can
/// never underpay.
pub fn calc_taking_amount(
	swap_maker_amount: U256,
	order_making_amount: U256,
	order_taking_amount: U256,
) -> Result<U256, MathError> {
	mul_div(
		swap_maker_amount,
		order_taking_amount,
		order_making_amount,
		Rounding::Ceil,
	)
}

/// Making amount received for paying `swap_taker_amount` of an order quoted
/// at `order_making_amount`/`order_taking_amount`. Rounds down so the maker
/// can never overpay.
pub fn calc_making_amount(
	swap_taker_amount: U256,
	order_making_amount: U256,
	order_taking_amount: U256,
) -> Result<U256, MathError> {
	mul_div(
		swap_taker_amount,
		order_making_amount,
		order_taking_amount,
		Rounding::Floor,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn taking_amount_rounds_up() {
		// 1/3 of the making amount owes a third of the taking amount,
		// rounded up.
		let taking = calc_taking_amount(U256::from(1u8), U256::from(3u8), U256::from(100u8));

		assert_eq!(taking.unwrap(), U256::from(34u8));
	}

	#[test]
	fn making_amount_rounds_down() {
		let making = calc_making_amount(U256::from(34u8), U256::from(3u8), U256::from(100u8));

		assert_eq!(making.unwrap(), U256::from(1u8));
	}

	#[test]
	fn full_fill_is_exact() {
		let making = U256::from(1_000_000_000_000_000_000u64);
		let taking = U256::from(1_420_000_000u64);

		assert_eq!(calc_taking_amount(making, making, taking).unwrap(), taking);
		assert_eq!(calc_making_amount(taking, making, taking).unwrap(), making);
	}
}
