//! Sequential big-endian reading of packed byte payloads.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Errors produced when a payload runs out of bytes mid-field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
	/// Error that occurs when fewer bytes remain than a field requires.
	#[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
	UnexpectedEnd {
		/// Bytes the caller asked for.
		needed: usize,
		/// Bytes left in the payload.
		remaining: usize,
	},
}

/// A forward-only reader over a byte slice.
///
/// Every read either consumes exactly the requested width or fails; there is
/// no partial state to observe afterwards.
#[derive(Debug)]
pub struct BytesReader<'a> {
	data: &'a [u8],
	pos: usize,
}

impl<'a> BytesReader<'a> {
	/// Creates a reader positioned at the start of `data`.
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, pos: 0 }
	}

	/// Bytes not yet consumed.
	pub fn remaining(&self) -> usize {
		self.data.len() - self.pos
	}

	/// Returns true once every byte has been consumed.
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Consumes and returns the next `count` bytes.
	pub fn take(&mut self, count: usize) -> Result<&'a [u8], CursorError> {
		if count > self.remaining() {
			return Err(CursorError::UnexpectedEnd {
				needed: count,
				remaining: self.remaining(),
			});
		}

		let slice = &self.data[self.pos..self.pos + count];
		self.pos += count;

		Ok(slice)
	}

	/// Consumes the next byte.
	pub fn take_u8(&mut self) -> Result<u8, CursorError> {
		Ok(self.take(1)?[0])
	}

	/// Consumes the next two bytes as a big-endian integer.
	pub fn take_u16(&mut self) -> Result<u16, CursorError> {
		let bytes = self.take(2)?;

		Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
	}

	/// Consumes the next 20 bytes as an address.
	pub fn take_address(&mut self) -> Result<Address, CursorError> {
		Ok(Address::from_slice(self.take(20)?))
	}

	/// Consumes the next 32 bytes as a big-endian 256-bit integer.
	pub fn take_u256(&mut self) -> Result<U256, CursorError> {
		Ok(U256::from_be_slice(self.take(32)?))
	}

	/// Consumes and returns everything left in the payload.
	pub fn rest(&mut self) -> &'a [u8] {
		let slice = &self.data[self.pos..];
		self.pos = self.data.len();

		slice
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::hex;

	#[test]
	fn reads_fields_in_sequence() {
		let data = hex!(
			"00000000000000000000000000000000000000ff" // address
			"01"
			"beef"
			"cafe"
		);
		let mut reader = BytesReader::new(&data);

		assert_eq!(
			reader.take_address().unwrap(),
			Address::from_slice(&hex!("00000000000000000000000000000000000000ff"))
		);
		assert_eq!(reader.take_u8().unwrap(), 0x01);
		assert_eq!(reader.take_u16().unwrap(), 0xbeef);
		assert_eq!(reader.rest(), &hex!("cafe"));
		assert!(reader.is_empty());
	}

	#[test]
	fn fails_on_truncated_input() {
		let data = [0u8; 3];
		let mut reader = BytesReader::new(&data);

		assert_eq!(reader.take_u16().unwrap(), 0);
		assert_eq!(
			reader.take_u16(),
			Err(CursorError::UnexpectedEnd {
				needed: 2,
				remaining: 1,
			})
		);
		// The failed read consumed nothing.
		assert_eq!(reader.remaining(), 1);
	}
}
