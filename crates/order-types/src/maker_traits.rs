//! The maker's 256-bit order configuration word.
//!
//! Layout, with bit 0 the least significant:
//!
//! | bits    | meaning                                                   |
//! |---------|-----------------------------------------------------------|
//! | 0-79    | allowed sender, low 80 bits of an address (0 = anyone)    |
//! | 80-119  | expiration timestamp in seconds (0 = none)                |
//! | 120-159 | nonce, or epoch when the epoch manager check is enabled   |
//! | 160-199 | series, the epoch sub-group                               |
//! | 247     | unwrap wrapped native token before paying the maker       |
//! | 248     | transfer maker funds through permit2                      |
//! | 249     | order carries an extension                                |
//! | 250     | check the epoch manager on fill                           |
//! | 251     | run the maker post-interaction                            |
//! | 252     | run the maker pre-interaction                             |
//! | 254     | multiple fills permitted                                  |
//! | 255     | partial fills forbidden                                   |
//!
//! Bit 253 is unused.

use crate::bitfield::{BitMask, Bitfield, BitfieldError};
use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Errors produced when configuring maker traits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MakerTraitsError {
	/// Error that occurs when a packed field value exceeds its width.
	#[error(transparent)]
	FieldOverflow(#[from] BitfieldError),
	/// Error that occurs when the allowed sender is the zero address.
	#[error("allowed sender cannot be the zero address, use with_any_sender to clear the check")]
	ZeroAllowedSender,
	/// Error that occurs when epoch mode is requested while the order
	/// invalidates through the bit invalidator.
	#[error("epoch manager requires both partial fills and multiple fills to be allowed")]
	EpochWithBitInvalidator,
}

const ALLOWED_SENDER_MASK: BitMask = BitMask::new(0, 80);
const EXPIRATION_MASK: BitMask = BitMask::new(80, 120);
const NONCE_OR_EPOCH_MASK: BitMask = BitMask::new(120, 160);
const SERIES_MASK: BitMask = BitMask::new(160, 200);

const UNWRAP_NATIVE_FLAG: usize = 247;
const USE_PERMIT2_FLAG: usize = 248;
const HAS_EXTENSION_FLAG: usize = 249;
const NEED_CHECK_EPOCH_MANAGER_FLAG: usize = 250;
const POST_INTERACTION_CALL_FLAG: usize = 251;
const PRE_INTERACTION_CALL_FLAG: usize = 252;
const ALLOW_MULTIPLE_FILLS_FLAG: usize = 254;
const NO_PARTIAL_FILLS_FLAG: usize = 255;

/// Packed maker-side fill configuration.
///
/// Setters consume and return the value so configurations compose fluently;
/// two traits are equal exactly when their backing words are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MakerTraits(Bitfield);

impl MakerTraits {
	/// Wraps a raw traits word, e.g. one decoded from an on-chain order.
	pub const fn new(value: U256) -> Self {
		Self(Bitfield::new(value))
	}

	/// The raw 256-bit word.
	pub fn as_u256(&self) -> U256 {
		self.0.value()
	}

	/// Low 10 bytes of the only address allowed to fill, all zero when the
	/// order is public.
	pub fn allowed_sender(&self) -> [u8; 10] {
		let bytes = self.0.get_mask(ALLOWED_SENDER_MASK).to_be_bytes::<32>();
		let mut suffix = [0u8; 10];
		suffix.copy_from_slice(&bytes[22..32]);

		suffix
	}

	/// Returns true when only a specific sender may fill the order.
	pub fn is_private(&self) -> bool {
		!self.0.get_mask(ALLOWED_SENDER_MASK).is_zero()
	}

	/// Restricts filling to `sender`, matched by the low 80 bits of its
	/// address.
	pub fn with_allowed_sender(mut self, sender: Address) -> Result<Self, MakerTraitsError> {
		if sender.is_zero() {
			return Err(MakerTraitsError::ZeroAllowedSender);
		}

		let low = U256::from_be_slice(&sender.as_slice()[10..]);
		self.0 = self.0.set_mask(ALLOWED_SENDER_MASK, low)?;

		Ok(self)
	}

	/// Removes the sender restriction.
	pub fn with_any_sender(mut self) -> Self {
		self.0 = self.0.clear_mask(ALLOWED_SENDER_MASK);
		self
	}

	/// Expiration timestamp in seconds, `None` when the order never
	/// expires.
	pub fn expiration(&self) -> Option<u64> {
		let timestamp = self.0.get_mask(EXPIRATION_MASK);

		if timestamp.is_zero() {
			None
		} else {
			Some(timestamp.to::<u64>())
		}
	}

	/// Sets the expiration timestamp in seconds. The field is 40 bits
	/// wide.
	pub fn with_expiration(mut self, timestamp: u64) -> Result<Self, MakerTraitsError> {
		self.0 = self.0.set_mask(EXPIRATION_MASK, U256::from(timestamp))?;

		Ok(self)
	}

	/// The nonce, or the epoch when the epoch manager check is enabled.
	pub fn nonce_or_epoch(&self) -> u64 {
		self.0.get_mask(NONCE_OR_EPOCH_MASK).to::<u64>()
	}

	/// Sets the nonce. Fails for values wider than 40 bits.
	///
	/// The nonce and the epoch share a field, so they cannot both be set.
	pub fn with_nonce(mut self, nonce: u64) -> Result<Self, MakerTraitsError> {
		self.0 = self.0.set_mask(NONCE_OR_EPOCH_MASK, U256::from(nonce))?;

		Ok(self)
	}

	/// Enables the epoch manager check and stores `series`/`epoch`.
	///
	/// The epoch manager can only be used when partial fills and multiple
	/// fills are both allowed, since the order then invalidates through the
	/// remaining-amount invalidator rather than the bit invalidator.
	pub fn with_epoch(self, series: u64, epoch: u64) -> Result<Self, MakerTraitsError> {
		if self.is_bit_invalidator_mode() {
			return Err(MakerTraitsError::EpochWithBitInvalidator);
		}

		let mut updated = self;
		updated.0 = updated.0.set_mask(SERIES_MASK, U256::from(series))?;
		updated.0 = updated.0.set_bit(NEED_CHECK_EPOCH_MANAGER_FLAG, true);

		updated.with_nonce(epoch)
	}

	/// The epoch sub-group.
	pub fn series(&self) -> u64 {
		self.0.get_mask(SERIES_MASK).to::<u64>()
	}

	/// Returns true when the order carries an extension.
	pub fn has_extension(&self) -> bool {
		self.0.get_bit(HAS_EXTENSION_FLAG)
	}

	/// Marks the order as carrying an extension.
	pub fn with_extension(mut self) -> Self {
		self.0 = self.0.set_bit(HAS_EXTENSION_FLAG, true);
		self
	}

	/// Returns true when partial fills are permitted.
	pub fn is_partial_fill_allowed(&self) -> bool {
		!self.0.get_bit(NO_PARTIAL_FILLS_FLAG)
	}

	/// Forbids partial fills.
	pub fn disable_partial_fills(mut self) -> Self {
		self.0 = self.0.set_bit(NO_PARTIAL_FILLS_FLAG, true);
		self
	}

	/// Permits partial fills.
	pub fn allow_partial_fills(mut self) -> Self {
		self.0 = self.0.set_bit(NO_PARTIAL_FILLS_FLAG, false);
		self
	}

	/// Returns true when the order may be filled more than once.
	pub fn is_multiple_fills_allowed(&self) -> bool {
		self.0.get_bit(ALLOW_MULTIPLE_FILLS_FLAG)
	}

	/// Permits multiple fills.
	pub fn allow_multiple_fills(mut self) -> Self {
		self.0 = self.0.set_bit(ALLOW_MULTIPLE_FILLS_FLAG, true);
		self
	}

	/// Restricts the order to a single fill.
	pub fn disable_multiple_fills(mut self) -> Self {
		self.0 = self.0.set_bit(ALLOW_MULTIPLE_FILLS_FLAG, false);
		self
	}

	/// Returns true when the maker pre-interaction hook runs on fill.
	pub fn has_pre_interaction(&self) -> bool {
		self.0.get_bit(PRE_INTERACTION_CALL_FLAG)
	}

	/// Enables the maker pre-interaction hook.
	pub fn enable_pre_interaction(mut self) -> Self {
		self.0 = self.0.set_bit(PRE_INTERACTION_CALL_FLAG, true);
		self
	}

	/// Disables the maker pre-interaction hook.
	pub fn disable_pre_interaction(mut self) -> Self {
		self.0 = self.0.set_bit(PRE_INTERACTION_CALL_FLAG, false);
		self
	}

	/// Returns true when the maker post-interaction hook runs on fill.
	pub fn has_post_interaction(&self) -> bool {
		self.0.get_bit(POST_INTERACTION_CALL_FLAG)
	}

	/// Enables the maker post-interaction hook.
	pub fn enable_post_interaction(mut self) -> Self {
		self.0 = self.0.set_bit(POST_INTERACTION_CALL_FLAG, true);
		self
	}

	/// Disables the maker post-interaction hook.
	pub fn disable_post_interaction(mut self) -> Self {
		self.0 = self.0.set_bit(POST_INTERACTION_CALL_FLAG, false);
		self
	}

	/// Returns true when the epoch manager check is enabled.
	pub fn is_epoch_manager_enabled(&self) -> bool {
		self.0.get_bit(NEED_CHECK_EPOCH_MANAGER_FLAG)
	}

	/// Returns true when maker funds move through permit2.
	pub fn is_permit2(&self) -> bool {
		self.0.get_bit(USE_PERMIT2_FLAG)
	}

	/// Transfers maker funds through permit2.
	pub fn enable_permit2(mut self) -> Self {
		self.0 = self.0.set_bit(USE_PERMIT2_FLAG, true);
		self
	}

	/// Transfers maker funds with a plain approval.
	pub fn disable_permit2(mut self) -> Self {
		self.0 = self.0.set_bit(USE_PERMIT2_FLAG, false);
		self
	}

	/// Returns true when the wrapped native token is unwrapped before
	/// paying the maker.
	pub fn is_native_unwrap_enabled(&self) -> bool {
		self.0.get_bit(UNWRAP_NATIVE_FLAG)
	}

	/// Unwraps the wrapped native token before paying the maker.
	pub fn enable_native_unwrap(mut self) -> Self {
		self.0 = self.0.set_bit(UNWRAP_NATIVE_FLAG, true);
		self
	}

	/// Pays the maker in the wrapped native token.
	pub fn disable_native_unwrap(mut self) -> Self {
		self.0 = self.0.set_bit(UNWRAP_NATIVE_FLAG, false);
		self
	}

	/// Returns true when the order is invalidated through the bit
	/// invalidator, which the contract uses whenever partial fills or
	/// multiple fills are disabled. Epoch mode is unavailable while this
	/// holds.
	pub fn is_bit_invalidator_mode(&self) -> bool {
		!self.is_partial_fill_allowed() || !self.is_multiple_fills_allowed()
	}
}
