//! Calldata for the router's four fill entry points.
//!
//! The variant is picked by two properties of the fill: whether the maker
//! is a contract (full signature bytes instead of a compact EOA signature)
//! and whether the taker traits carry args (an extension or interaction
//! blob, or a custom receiver).

use crate::abi::{IOrderMixin, Order};
use alloy_primitives::{Bytes, B256, U256};
use alloy_sol_types::SolCall;
use order_types::{BitfieldError, LimitOrder, TakerTraits};
use thiserror::Error;

/// Errors produced when assembling fill calldata.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
	/// Error that occurs when taker traits carry args but an argless fill
	/// variant was requested.
	#[error("taker traits carry args data, use the fill variant that takes args")]
	UnexpectedArgs,
	/// Error that occurs when a signature is not 65 bytes long.
	#[error("invalid signature length {0}, expected 65 bytes")]
	InvalidSignatureLength(usize),
	/// Error that occurs when a signature's recovery id is unknown.
	#[error("invalid signature recovery id {0}")]
	InvalidRecoveryId(u8),
	/// Error that occurs when a signature's s value is not canonical.
	#[error("signature s value is not in the lower half order")]
	NonCanonicalSignature,
	/// Error that occurs when the taker traits word cannot be packed.
	#[error(transparent)]
	Traits(#[from] BitfieldError),
}

/// Calldata builders for the settlement router.
pub struct LimitOrderContract;

impl LimitOrderContract {
	/// Fill an EOA-signed order without extension or taker interaction.
	pub fn fill_order_calldata(
		order: &LimitOrder,
		signature: &[u8],
		taker_traits: &TakerTraits,
		amount: U256,
	) -> Result<Bytes, ContractError> {
		let encoded = taker_traits.encode()?;
		if encoded.has_args() {
			return Err(ContractError::UnexpectedArgs);
		}

		let (r, vs) = split_signature(signature)?;

		Ok(Bytes::from(
			IOrderMixin::fillOrderCall {
				order: Order::from_limit_order(order),
				r,
				vs,
				amount,
				takerTraits: encoded.traits,
			}
			.abi_encode(),
		))
	}

	/// Fill an EOA-signed order whose taker traits carry args.
	pub fn fill_order_args_calldata(
		order: &LimitOrder,
		signature: &[u8],
		taker_traits: &TakerTraits,
		amount: U256,
	) -> Result<Bytes, ContractError> {
		let encoded = taker_traits.encode()?;
		let (r, vs) = split_signature(signature)?;

		Ok(Bytes::from(
			IOrderMixin::fillOrderArgsCall {
				order: Order::from_limit_order(order),
				r,
				vs,
				amount,
				takerTraits: encoded.traits,
				args: encoded.args,
			}
			.abi_encode(),
		))
	}

	/// Fill a contract-signed order without extension or taker
	/// interaction.
	pub fn fill_contract_order_calldata(
		order: &LimitOrder,
		signature: Bytes,
		taker_traits: &TakerTraits,
		amount: U256,
	) -> Result<Bytes, ContractError> {
		let encoded = taker_traits.encode()?;
		if encoded.has_args() {
			return Err(ContractError::UnexpectedArgs);
		}

		Ok(Bytes::from(
			IOrderMixin::fillContractOrderCall {
				order: Order::from_limit_order(order),
				signature,
				amount,
				takerTraits: encoded.traits,
			}
			.abi_encode(),
		))
	}

	/// Fill a contract-signed order whose taker traits carry args.
	pub fn fill_contract_order_args_calldata(
		order: &LimitOrder,
		signature: Bytes,
		taker_traits: &TakerTraits,
		amount: U256,
	) -> Result<Bytes, ContractError> {
		let encoded = taker_traits.encode()?;

		Ok(Bytes::from(
			IOrderMixin::fillContractOrderArgsCall {
				order: Order::from_limit_order(order),
				signature,
				amount,
				takerTraits: encoded.traits,
				args: encoded.args,
			}
			.abi_encode(),
		))
	}
}

/// Splits a 65-byte `r || s || v` signature into the compact `(r, vs)`
/// form the router consumes, with the recovery parity folded into the top
/// bit of `s`.
pub fn split_signature(signature: &[u8]) -> Result<(B256, B256), ContractError> {
	if signature.len() != 65 {
		return Err(ContractError::InvalidSignatureLength(signature.len()));
	}

	let parity = match signature[64] {
		0 | 27 => false,
		1 | 28 => true,
		v => return Err(ContractError::InvalidRecoveryId(v)),
	};

	let r = B256::from_slice(&signature[..32]);
	let mut vs = [0u8; 32];
	vs.copy_from_slice(&signature[32..64]);

	// The compact form reuses the top bit of s, so s must be canonical.
	if vs[0] & 0x80 != 0 {
		return Err(ContractError::NonCanonicalSignature);
	}
	if parity {
		vs[0] |= 0x80;
	}

	Ok((r, B256::from(vs)))
}
