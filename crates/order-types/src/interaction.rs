//! Target-prefixed interaction payloads.

use crate::cursor::{BytesReader, CursorError};
use alloy_primitives::{Address, Bytes};
use thiserror::Error;

/// Errors produced when decoding an interaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InteractionError {
	/// Error that occurs when the payload is shorter than a target address.
	#[error(transparent)]
	Truncated(#[from] CursorError),
}

/// A call to `target` with opaque `data`, executed by the protocol during a
/// fill (maker permits, pre/post interaction hooks).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
	/// Contract receiving the call.
	pub target: Address,
	/// Calldata passed through verbatim.
	pub data: Bytes,
}

impl Interaction {
	/// Creates an interaction from its parts.
	pub fn new(target: Address, data: Bytes) -> Self {
		Self { target, data }
	}

	/// Encodes as the 20-byte target followed by the raw data.
	pub fn encode(&self) -> Bytes {
		let mut out = Vec::with_capacity(20 + self.data.len());
		out.extend_from_slice(self.target.as_slice());
		out.extend_from_slice(&self.data);

		Bytes::from(out)
	}

	/// Decodes a target-prefixed payload.
	pub fn decode(bytes: &[u8]) -> Result<Self, InteractionError> {
		let mut reader = BytesReader::new(bytes);
		let target = reader.take_address()?;
		let data = Bytes::copy_from_slice(reader.rest());

		Ok(Self { target, data })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, bytes};

	#[test]
	fn encode_decode_round_trip() {
		let interaction = Interaction::new(
			address!("0000000000000000000000000000000000000539"),
			bytes!("deadbeef"),
		);

		assert_eq!(
			Interaction::decode(&interaction.encode()).unwrap(),
			interaction
		);
	}

	#[test]
	fn decode_allows_empty_data() {
		let target = address!("1111111111111111111111111111111111111111");
		let decoded = Interaction::decode(target.as_slice()).unwrap();

		assert_eq!(decoded.target, target);
		assert!(decoded.data.is_empty());
	}

	#[test]
	fn decode_rejects_short_payload() {
		assert!(Interaction::decode(&[0u8; 19]).is_err());
	}
}
