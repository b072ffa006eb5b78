//! The variable-length order extension and its offset-table codec.
//!
//! An extension is the concatenation of up to eight named byte fields plus
//! trailing custom data. The wire format carries a single 256-bit header in
//! which lane `i` (bits `[32*i, 32*i + 32)`) holds the *cumulative* byte
//! length after field `i`, letting the settlement contract slice any field
//! with O(1) offset arithmetic. Custom data is not represented in the
//! header; it is whatever remains after the last declared field.

use crate::cursor::{BytesReader, CursorError};
use crate::interaction::Interaction;
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use thiserror::Error;

/// Errors produced when decoding an extension payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtensionError {
	/// Error that occurs when the offsets header decreases between fields.
	#[error("malformed offsets header: offset of field {field} precedes the previous field")]
	NonMonotonicOffsets {
		/// Index of the offending field.
		field: usize,
	},
	/// Error that occurs when the payload ends before a declared field.
	#[error(transparent)]
	Truncated(#[from] CursorError),
}

/// Optional behavioral payload attached to an order.
///
/// Every field is raw bytes with no internal structure at this layer;
/// higher-level codecs (amount getters, fee hooks) interpret them. Equality
/// is structural and an extension is immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extension {
	/// Appended to the maker asset address for transfer-hook tokens.
	pub maker_asset_suffix: Bytes,
	/// Appended to the taker asset address for transfer-hook tokens.
	pub taker_asset_suffix: Bytes,
	/// Amount getter called to derive the making amount.
	pub making_amount_data: Bytes,
	/// Amount getter called to derive the taking amount.
	pub taking_amount_data: Bytes,
	/// Predicate that must hold for the order to be fillable.
	pub predicate: Bytes,
	/// Maker permit, target-prefixed.
	pub maker_permit: Bytes,
	/// Hook executed before the maker asset transfer.
	pub pre_interaction: Bytes,
	/// Hook executed after the taker asset transfer.
	pub post_interaction: Bytes,
	/// Opaque trailing data, not covered by the offsets header.
	pub custom_data: Bytes,
}

impl Extension {
	const FIELD_COUNT: usize = 8;

	/// The declared fields in wire order, excluding custom data.
	fn fields(&self) -> [&Bytes; Self::FIELD_COUNT] {
		[
			&self.maker_asset_suffix,
			&self.taker_asset_suffix,
			&self.making_amount_data,
			&self.taking_amount_data,
			&self.predicate,
			&self.maker_permit,
			&self.pre_interaction,
			&self.post_interaction,
		]
	}

	/// Returns true when no field and no custom data is set.
	pub fn is_empty(&self) -> bool {
		self.fields().iter().all(|f| f.is_empty()) && self.custom_data.is_empty()
	}

	/// Returns true when a fill predicate is attached.
	pub fn has_predicate(&self) -> bool {
		!self.predicate.is_empty()
	}

	/// Returns true when a maker permit is attached.
	pub fn has_maker_permit(&self) -> bool {
		!self.maker_permit.is_empty()
	}

	/// Serializes to the offset-table wire format.
	///
	/// An empty extension encodes to the empty byte string, without header.
	pub fn encode(&self) -> Bytes {
		let fields = self.fields();
		let total: usize = fields.iter().map(|f| f.len()).sum::<usize>() + self.custom_data.len();

		if total == 0 {
			return Bytes::new();
		}

		let mut offsets = U256::ZERO;
		let mut cumulative = 0usize;
		for (i, field) in fields.iter().enumerate() {
			cumulative += field.len();
			offsets |= U256::from(cumulative) << (32 * i);
		}

		let mut out = Vec::with_capacity(32 + total);
		out.extend_from_slice(&offsets.to_be_bytes::<32>());
		for field in fields {
			out.extend_from_slice(field);
		}
		out.extend_from_slice(&self.custom_data);

		Bytes::from(out)
	}

	/// Decodes the offset-table wire format.
	pub fn decode(bytes: &[u8]) -> Result<Self, ExtensionError> {
		if bytes.is_empty() {
			return Ok(Self::default());
		}

		let mut reader = BytesReader::new(bytes);
		let offsets = reader.take_u256()?;

		let mut fields: [Bytes; Self::FIELD_COUNT] = Default::default();
		let mut consumed = 0usize;
		for (i, slot) in fields.iter_mut().enumerate() {
			let offset = ((offsets >> (32 * i)) & U256::from(u32::MAX)).to::<usize>();
			let length = offset
				.checked_sub(consumed)
				.ok_or(ExtensionError::NonMonotonicOffsets { field: i })?;

			*slot = Bytes::copy_from_slice(reader.take(length)?);
			consumed = offset;
		}

		let [maker_asset_suffix, taker_asset_suffix, making_amount_data, taking_amount_data, predicate, maker_permit, pre_interaction, post_interaction] =
			fields;

		Ok(Self {
			maker_asset_suffix,
			taker_asset_suffix,
			making_amount_data,
			taking_amount_data,
			predicate,
			maker_permit,
			pre_interaction,
			post_interaction,
			custom_data: Bytes::copy_from_slice(reader.rest()),
		})
	}

	/// Keccak-256 of the encoded extension, used to bind it into the order
	/// salt.
	pub fn keccak256(&self) -> B256 {
		keccak256(self.encode())
	}
}

/// Fluent construction of an [`Extension`], consumed by [`build`].
///
/// [`build`]: ExtensionBuilder::build
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
	extension: Extension,
}

impl ExtensionBuilder {
	/// Creates a builder with every field empty.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the maker asset suffix.
	pub fn with_maker_asset_suffix(mut self, suffix: Bytes) -> Self {
		self.extension.maker_asset_suffix = suffix;
		self
	}

	/// Sets the taker asset suffix.
	pub fn with_taker_asset_suffix(mut self, suffix: Bytes) -> Self {
		self.extension.taker_asset_suffix = suffix;
		self
	}

	/// Sets the making amount getter as its contract address followed by
	/// the getter payload.
	pub fn with_making_amount_data(mut self, address: Address, data: &[u8]) -> Self {
		self.extension.making_amount_data = prefix_with_address(address, data);
		self
	}

	/// Sets the taking amount getter as its contract address followed by
	/// the getter payload.
	pub fn with_taking_amount_data(mut self, address: Address, data: &[u8]) -> Self {
		self.extension.taking_amount_data = prefix_with_address(address, data);
		self
	}

	/// Sets the fill predicate.
	pub fn with_predicate(mut self, predicate: Bytes) -> Self {
		self.extension.predicate = predicate;
		self
	}

	/// Sets the maker permit as the permit target followed by the permit
	/// calldata.
	pub fn with_maker_permit(mut self, target: Address, data: &[u8]) -> Self {
		self.extension.maker_permit = prefix_with_address(target, data);
		self
	}

	/// Sets the pre-interaction hook.
	pub fn with_pre_interaction(mut self, interaction: &Interaction) -> Self {
		self.extension.pre_interaction = interaction.encode();
		self
	}

	/// Sets the post-interaction hook.
	pub fn with_post_interaction(mut self, interaction: &Interaction) -> Self {
		self.extension.post_interaction = interaction.encode();
		self
	}

	/// Sets the trailing custom data.
	pub fn with_custom_data(mut self, data: Bytes) -> Self {
		self.extension.custom_data = data;
		self
	}

	/// Finishes construction.
	pub fn build(self) -> Extension {
		self.extension
	}
}

fn prefix_with_address(address: Address, data: &[u8]) -> Bytes {
	let mut out = Vec::with_capacity(20 + data.len());
	out.extend_from_slice(address.as_slice());
	out.extend_from_slice(data);

	Bytes::from(out)
}
