//! Integer multiply-divide with explicit rounding.

use alloy_primitives::U256;
use thiserror::Error;

/// Errors produced by [`mul_div`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MathError {
	/// Error that occurs when the intermediate product overflows 256 bits.
	#[error("multiplication overflow")]
	MulOverflow,
	/// Error that occurs on division by zero.
	#[error("division by zero")]
	DivisionByZero,
}

/// Rounding direction for [`mul_div`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rounding {
	/// Truncate toward zero.
	#[default]
	Floor,
	/// Round away from zero when a remainder exists.
	Ceil,
}

/// Computes `a * b / denominator` with the requested rounding.
///
/// This is the only place where the ceil/floor asymmetry of the on-chain
/// amount math lives; callers pick the direction the contract uses for the
/// corresponding operation.
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256, MathError> {
	if denominator.is_zero() {
		return Err(MathError::DivisionByZero);
	}

	let product = a.checked_mul(b).ok_or(MathError::MulOverflow)?;
	let quotient = product / denominator;

	match rounding {
		Rounding::Ceil if !(product % denominator).is_zero() => Ok(quotient + U256::from(1u8)),
		_ => Ok(quotient),
	}
}
