//! Resolver whitelists keyed by address suffix.
//!
//! The wire format stores only the low 10 bytes of each whitelisted
//! address: enough entropy to disambiguate resolvers without paying for
//! full addresses on-chain.

use alloy_primitives::{Address, FixedBytes};
use order_types::{BytesReader, CursorError};

/// Low 10 bytes of an address.
pub type AddressHalf = FixedBytes<10>;

/// Returns the low 10 bytes of `address`.
pub fn address_half(address: Address) -> AddressHalf {
	AddressHalf::from_slice(&address.as_slice()[10..])
}

/// An ordered list of whitelisted resolver address suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhitelistHalfAddress {
	addresses: Vec<AddressHalf>,
}

impl WhitelistHalfAddress {
	/// Builds a whitelist from full addresses.
	pub fn new(addresses: &[Address]) -> Self {
		Self {
			addresses: addresses.iter().copied().map(address_half).collect(),
		}
	}

	/// Builds a whitelist from pre-truncated suffixes, e.g. decoded ones.
	pub fn from_halves(addresses: Vec<AddressHalf>) -> Self {
		Self { addresses }
	}

	/// Number of whitelisted resolvers.
	pub fn len(&self) -> usize {
		self.addresses.len()
	}

	/// Returns true when nobody is whitelisted.
	pub fn is_empty(&self) -> bool {
		self.addresses.is_empty()
	}

	/// Returns true when `address` matches a whitelisted suffix.
	pub fn is_whitelisted(&self, address: Address) -> bool {
		let half = address_half(address);

		self.addresses.iter().any(|entry| *entry == half)
	}

	/// Appends the count byte and the suffixes to a payload.
	pub fn encode_to(&self, out: &mut Vec<u8>) {
		out.push(self.addresses.len() as u8);
		for half in &self.addresses {
			out.extend_from_slice(half.as_slice());
		}
	}

	/// Reads a count byte and that many suffixes.
	pub fn decode_from(reader: &mut BytesReader<'_>) -> Result<Self, CursorError> {
		let count = reader.take_u8()?;
		let mut addresses = Vec::with_capacity(count as usize);
		for _ in 0..count {
			addresses.push(AddressHalf::from_slice(reader.take(10)?));
		}

		Ok(Self { addresses })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn matches_by_suffix_only() {
		let member = address!("00000000000000000000ffeeddccbbaa99887766");
		let same_suffix = address!("11111111111111111111ffeeddccbbaa99887766");
		let whitelist = WhitelistHalfAddress::new(&[member]);

		assert!(whitelist.is_whitelisted(member));
		assert!(whitelist.is_whitelisted(same_suffix));
		assert!(!whitelist.is_whitelisted(Address::ZERO));
	}

	#[test]
	fn payload_round_trip() {
		let whitelist = WhitelistHalfAddress::new(&[
			address!("0000000000000000000000000000000000000064"),
			address!("00000000000000000000ffeeddccbbaa99887766"),
		]);

		let mut payload = Vec::new();
		whitelist.encode_to(&mut payload);
		assert_eq!(payload.len(), 1 + 2 * 10);
		assert_eq!(payload[0], 2);

		let mut reader = BytesReader::new(&payload);
		let decoded = WhitelistHalfAddress::decode_from(&mut reader).unwrap();
		assert_eq!(decoded, whitelist);
		assert!(reader.is_empty());
	}

	#[test]
	fn empty_whitelist_is_a_single_zero_byte() {
		let mut payload = Vec::new();
		WhitelistHalfAddress::default().encode_to(&mut payload);

		assert_eq!(payload, vec![0]);
	}
}
