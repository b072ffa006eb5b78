//! The fee-taker extension codec.
//!
//! The fee hook consumes two payloads inside an order extension:
//!
//! Amount getter (`making_amount_data` and `taking_amount_data`, identical
//! by protocol convention, each prefixed with the 20-byte extension
//! address):
//!
//! ```text
//! u16  integrator fee        (1e5 scale)
//! u8   integrator share      (1e2 scale)
//! u16  resolver fee          (1e5 scale)
//! u8   100 - whitelist discount (1e2 scale)
//! u8   whitelist size N
//! N * bytes10 whitelisted address suffixes
//! ```
//!
//! Post-interaction (`post_interaction`, also address-prefixed):
//!
//! ```text
//! u8       flags, bit 0 = custom receiver present
//! bytes20  integrator fee recipient
//! bytes20  protocol fee recipient
//! [bytes20 custom receiver of taker tokens]
//! ...      the amount getter payload again, byte for byte
//! [bytes20 ++ bytes  extra interaction]
//! ```
//!
//! Decoding validates the duplication instead of trusting either copy: one
//! extension address everywhere, identical amount getters, and identical
//! fee/whitelist parameters in both payloads. Nothing is silently repaired.

use crate::calculator::FeeCalculator;
use crate::fees::Fees;
use crate::integrator_fee::IntegratorFee;
use crate::resolver_fee::ResolverFee;
use crate::whitelist::WhitelistHalfAddress;
use crate::FeesError;
use alloy_primitives::{Address, Bytes};
use order_types::{
	Bps, BpsError, BytesReader, CursorError, Extension, ExtensionBuilder, ExtensionError,
	Interaction, InteractionError, MathError,
};
use thiserror::Error;
use tracing::debug;

/// Errors produced by the fee-taker codec.
#[derive(Debug, Error)]
pub enum FeeTakerError {
	/// Error that occurs when the three payloads reference different
	/// extension addresses.
	#[error("invalid extension: amount getters and post-interaction must target one extension address")]
	AddressMismatch,
	/// Error that occurs when the two amount getter payloads differ.
	#[error("invalid extension: taking amount data must equal making amount data")]
	AmountDataMismatch,
	/// Error that occurs when fee parameters differ between payload copies.
	#[error("invalid extension: fee parameters differ between amount data and post-interaction data")]
	FeeMismatch,
	/// Error that occurs when the whitelist differs between payload copies.
	#[error("invalid extension: whitelist differs between amount data and post-interaction data")]
	WhitelistMismatch,
	/// Error that occurs when bytes remain after the amount getter payload.
	#[error("invalid extension: unexpected trailing bytes after the amount getter payload")]
	TrailingAmountData,
	/// Error that occurs when the stored discount complement exceeds 100.
	#[error("invalid extension: whitelist discount complement {0} exceeds 100")]
	DiscountComplementOutOfRange(u8),
	/// Error that occurs when integrator data is present without a fee.
	#[error("invalid extension: integrator recipient or share present without an integrator fee")]
	OrphanIntegratorData,
	/// Error that occurs when a payload ends mid-field.
	#[error(transparent)]
	Truncated(#[from] CursorError),
	/// Error that occurs when the outer extension cannot be decoded.
	#[error(transparent)]
	Extension(#[from] ExtensionError),
	/// Error that occurs when an embedded interaction cannot be decoded.
	#[error(transparent)]
	Interaction(#[from] InteractionError),
	/// Error that occurs when decoded values violate a fee invariant.
	#[error(transparent)]
	Fees(#[from] FeesError),
	/// Error that occurs when a decoded fraction is out of range.
	#[error(transparent)]
	Bps(#[from] BpsError),
}

/// Optional parts of a fee-taker extension.
#[derive(Debug, Clone, Default)]
pub struct FeeTakerOptions {
	/// Receiver of the taker tokens when it is not the maker.
	pub custom_receiver: Option<Address>,
	/// Maker permit carried alongside the fee payloads.
	pub maker_permit: Option<Interaction>,
	/// Interaction executed after the fee hook.
	pub extra_interaction: Option<Interaction>,
}

/// A fully specified fee-taker extension.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeTakerExtension {
	/// Address of the fee hook contract.
	pub address: Address,
	/// Fee configuration.
	pub fees: Fees,
	/// Whitelisted resolver suffixes eligible for the discount.
	pub whitelist: WhitelistHalfAddress,
	/// Receiver of the taker tokens when it is not the maker.
	pub custom_receiver: Option<Address>,
	/// Maker permit carried alongside the fee payloads.
	pub maker_permit: Option<Interaction>,
	/// Interaction executed after the fee hook.
	pub extra_interaction: Option<Interaction>,
}

impl FeeTakerExtension {
	/// Creates a fee-taker extension without optional parts.
	pub fn new(
		address: Address,
		fees: Fees,
		whitelist: &[Address],
	) -> Result<Self, FeesError> {
		Self::with_options(address, fees, whitelist, FeeTakerOptions::default())
	}

	/// Creates a fee-taker extension with optional parts.
	pub fn with_options(
		address: Address,
		fees: Fees,
		whitelist: &[Address],
		options: FeeTakerOptions,
	) -> Result<Self, FeesError> {
		if whitelist.len() > u8::MAX as usize {
			return Err(FeesError::WhitelistTooLarge(whitelist.len()));
		}

		// The wire format gives fee fractions two bytes each.
		for fee in [fees.resolver.fee, fees.integrator.fee] {
			if fee.to_fraction(Fees::BASE_1E5) > u16::MAX as u64 {
				return Err(FeesError::FeeExceedsWireRange(fee));
			}
		}

		Ok(Self {
			address,
			fees,
			whitelist: WhitelistHalfAddress::new(whitelist),
			custom_receiver: options.custom_receiver,
			maker_permit: options.maker_permit,
			extra_interaction: options.extra_interaction,
		})
	}

	/// Assembles the order extension carrying the fee payloads.
	pub fn build(&self) -> Extension {
		let amount_data = self.fees_payload();

		let mut post = Vec::new();
		let mut flags = 0u8;
		if self.custom_receiver.is_some() {
			flags |= 1;
		}
		post.push(flags);
		post.extend_from_slice(self.fees.integrator_fee_recipient().as_slice());
		post.extend_from_slice(self.fees.protocol_fee_recipient().as_slice());
		if let Some(receiver) = self.custom_receiver {
			post.extend_from_slice(receiver.as_slice());
		}
		post.extend_from_slice(&amount_data);
		if let Some(extra) = &self.extra_interaction {
			post.extend_from_slice(&extra.encode());
		}

		let mut builder = ExtensionBuilder::new()
			.with_making_amount_data(self.address, &amount_data)
			.with_taking_amount_data(self.address, &amount_data)
			.with_post_interaction(&Interaction::new(self.address, Bytes::from(post)));

		if let Some(permit) = &self.maker_permit {
			builder = builder.with_maker_permit(permit.target, &permit.data);
		}

		builder.build()
	}

	/// Decodes a fee-taker extension from encoded extension bytes.
	pub fn decode(bytes: &[u8]) -> Result<Self, FeeTakerError> {
		Self::from_extension(&Extension::decode(bytes)?)
	}

	/// Reconstructs a fee-taker extension from a decoded [`Extension`],
	/// cross-checking every duplicated field.
	pub fn from_extension(extension: &Extension) -> Result<Self, FeeTakerError> {
		let mut amount_reader = BytesReader::new(&extension.making_amount_data);
		let address = amount_reader.take_address()?;

		let mut taking_reader = BytesReader::new(&extension.taking_amount_data);
		let mut post_reader = BytesReader::new(&extension.post_interaction);
		if taking_reader.take_address()? != address || post_reader.take_address()? != address {
			return Err(FeeTakerError::AddressMismatch);
		}

		if extension.taking_amount_data != extension.making_amount_data {
			return Err(FeeTakerError::AmountDataMismatch);
		}

		let flags = post_reader.take_u8()?;
		let integrator_fee_recipient = post_reader.take_address()?;
		let protocol_fee_recipient = post_reader.take_address()?;
		let custom_receiver = if flags & 1 == 1 {
			Some(post_reader.take_address()?)
		} else {
			None
		};

		let post_payload = FeesPayload::decode_from(&mut post_reader)?;
		let extra_interaction = if post_reader.is_empty() {
			None
		} else {
			Some(Interaction::decode(post_reader.rest())?)
		};

		let amount_payload = FeesPayload::decode_from(&mut amount_reader)?;
		if !amount_reader.is_empty() {
			return Err(FeeTakerError::TrailingAmountData);
		}

		// Compare the raw wire values, so even sub-bps divergence between
		// the duplicated payloads is caught.
		if amount_payload.integrator_fee != post_payload.integrator_fee
			|| amount_payload.integrator_share != post_payload.integrator_share
			|| amount_payload.resolver_fee != post_payload.resolver_fee
			|| amount_payload.discount_complement != post_payload.discount_complement
		{
			return Err(FeeTakerError::FeeMismatch);
		}
		if amount_payload.whitelist != post_payload.whitelist {
			return Err(FeeTakerError::WhitelistMismatch);
		}

		let maker_permit = if extension.has_maker_permit() {
			Some(Interaction::decode(&extension.maker_permit)?)
		} else {
			None
		};

		let resolver = if post_payload.resolver_fee == 0 {
			if post_payload.discount_complement as u64 != Fees::BASE_1E2 {
				return Err(FeesError::DiscountWithoutFee.into());
			}
			ResolverFee::ZERO
		} else {
			ResolverFee::with_discount(
				protocol_fee_recipient,
				Bps::from_fraction(post_payload.resolver_fee as u64, Fees::BASE_1E5)?,
				post_payload.whitelist_discount()?,
			)?
		};

		let integrator = if post_payload.integrator_fee == 0 {
			if !integrator_fee_recipient.is_zero() || post_payload.integrator_share != 0 {
				return Err(FeeTakerError::OrphanIntegratorData);
			}
			IntegratorFee::ZERO
		} else {
			IntegratorFee::new(
				integrator_fee_recipient,
				protocol_fee_recipient,
				Bps::from_fraction(post_payload.integrator_fee as u64, Fees::BASE_1E5)?,
				Bps::from_fraction(post_payload.integrator_share as u64, Fees::BASE_1E2)?,
			)?
		};

		debug!(
			whitelist = post_payload.whitelist.len(),
			"decoded fee-taker extension"
		);

		Ok(Self {
			address,
			fees: Fees::new(resolver, integrator)?,
			whitelist: post_payload.whitelist,
			custom_receiver,
			maker_permit,
			extra_interaction,
		})
	}

	/// Returns true when `address` is eligible for the whitelist discount.
	pub fn is_whitelisted(&self, address: Address) -> bool {
		self.whitelist.is_whitelisted(address)
	}

	/// A calculator over this extension's fee parameters.
	pub fn calculator(&self) -> FeeCalculator {
		FeeCalculator::new(self.fees, self.whitelist.clone())
	}

	/// Taking amount including fees for `taker`. See
	/// [`FeeCalculator::get_taking_amount`].
	pub fn get_taking_amount(
		&self,
		taker: Address,
		order_taking_amount: alloy_primitives::U256,
	) -> Result<alloy_primitives::U256, MathError> {
		self.calculator().get_taking_amount(taker, order_taking_amount)
	}

	/// The shared fee/whitelist payload carried by both amount getters and
	/// the post-interaction.
	fn fees_payload(&self) -> Vec<u8> {
		let integrator_fee = self.fees.integrator.fee.to_fraction(Fees::BASE_1E5) as u16;
		let integrator_share = self.fees.integrator.share.to_fraction(Fees::BASE_1E2) as u8;
		let resolver_fee = self.fees.resolver.fee.to_fraction(Fees::BASE_1E5) as u16;
		// The contract stores the complement of the discount.
		let discount_numerator = (Fees::BASE_1E2
			- self
				.fees
				.resolver
				.whitelist_discount
				.to_fraction(Fees::BASE_1E2)) as u8;

		let mut out = Vec::new();
		out.extend_from_slice(&integrator_fee.to_be_bytes());
		out.push(integrator_share);
		out.extend_from_slice(&resolver_fee.to_be_bytes());
		out.push(discount_numerator);
		self.whitelist.encode_to(&mut out);

		out
	}
}

/// The shared fee/whitelist payload in its raw wire representation.
#[derive(Debug, PartialEq, Eq)]
struct FeesPayload {
	integrator_fee: u16,
	integrator_share: u8,
	resolver_fee: u16,
	discount_complement: u8,
	whitelist: WhitelistHalfAddress,
}

impl FeesPayload {
	fn decode_from(reader: &mut BytesReader<'_>) -> Result<Self, FeeTakerError> {
		let integrator_fee = reader.take_u16()?;
		let integrator_share = reader.take_u8()?;
		let resolver_fee = reader.take_u16()?;

		let discount_complement = reader.take_u8()?;
		if discount_complement as u64 > Fees::BASE_1E2 {
			return Err(FeeTakerError::DiscountComplementOutOfRange(
				discount_complement,
			));
		}

		let whitelist = WhitelistHalfAddress::decode_from(reader)?;

		Ok(Self {
			integrator_fee,
			integrator_share,
			resolver_fee,
			discount_complement,
			whitelist,
		})
	}

	fn whitelist_discount(&self) -> Result<Bps, BpsError> {
		Bps::from_fraction(
			Fees::BASE_1E2 - self.discount_complement as u64,
			Fees::BASE_1E2,
		)
	}
}
