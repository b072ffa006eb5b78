//! The taker's 256-bit fill configuration word and its args blob.
//!
//! Layout, with bit 0 the least significant:
//!
//! | bits    | meaning                                                    |
//! |---------|------------------------------------------------------------|
//! | 0-184   | threshold amount for the fill                              |
//! | 200-223 | byte length of the interaction carried in args             |
//! | 224-247 | byte length of the extension carried in args               |
//! | 251     | args start with a 20-byte receiver of the maker asset      |
//! | 252     | taker funds move through permit2                           |
//! | 253     | skip the maker permit carried by the order                 |
//! | 254     | unwrap wrapped native token before paying the taker        |
//! | 255     | the fill amount is a making amount                         |
//!
//! The args blob passed alongside the word is `receiver? ++ extension ++
//! interaction`; the contract recovers each slice from the lengths packed
//! above.

use crate::bitfield::{BitMask, Bitfield, BitfieldError};
use crate::extension::Extension;
use crate::interaction::Interaction;
use alloy_primitives::{Address, Bytes, U256};

const THRESHOLD_MASK: BitMask = BitMask::new(0, 185);
const ARGS_INTERACTION_LENGTH_MASK: BitMask = BitMask::new(200, 224);
const ARGS_EXTENSION_LENGTH_MASK: BitMask = BitMask::new(224, 248);

const ARGS_HAS_RECEIVER_FLAG: usize = 251;
const USE_PERMIT2_FLAG: usize = 252;
const SKIP_ORDER_PERMIT_FLAG: usize = 253;
const UNWRAP_NATIVE_FLAG: usize = 254;
const MAKER_AMOUNT_FLAG: usize = 255;

/// Whether the fill amount the taker supplies is denominated in the maker
/// or the taker asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmountMode {
	/// The amount is a taking amount.
	#[default]
	Taker,
	/// The amount is a making amount.
	Maker,
}

/// The encoded form of [`TakerTraits`]: the packed word plus the args blob
/// referenced by its length fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTakerTraits {
	/// The packed 256-bit configuration word.
	pub traits: U256,
	/// Receiver, extension and interaction bytes, concatenated.
	pub args: Bytes,
}

impl EncodedTakerTraits {
	/// Returns true when no args accompany the word, which selects the
	/// fill entry points without an args parameter.
	pub fn has_args(&self) -> bool {
		!self.args.is_empty()
	}
}

/// Taker-side fill configuration.
///
/// Collects the pieces that end up in the args blob as owned values and
/// packs them on [`encode`].
///
/// [`encode`]: TakerTraits::encode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TakerTraits {
	flags: Bitfield,
	receiver: Option<Address>,
	extension: Option<Extension>,
	interaction: Option<Interaction>,
}

impl TakerTraits {
	/// Taker-asset amount mode, no args, no threshold.
	pub fn new() -> Self {
		Self::default()
	}

	/// Selects how the fill amount is denominated.
	pub fn with_amount_mode(mut self, mode: AmountMode) -> Self {
		self.flags = self.flags.set_bit(MAKER_AMOUNT_FLAG, mode == AmountMode::Maker);
		self
	}

	/// Sets the worst acceptable counter-amount for the fill. The field is
	/// 185 bits wide.
	pub fn with_amount_threshold(mut self, threshold: U256) -> Result<Self, BitfieldError> {
		self.flags = self.flags.set_mask(THRESHOLD_MASK, threshold)?;

		Ok(self)
	}

	/// Unwraps the wrapped native token before paying the taker.
	pub fn with_native_unwrap(mut self) -> Self {
		self.flags = self.flags.set_bit(UNWRAP_NATIVE_FLAG, true);
		self
	}

	/// Skips the maker permit carried by the order, e.g. when it is known
	/// to have been consumed already.
	pub fn skip_order_permit(mut self) -> Self {
		self.flags = self.flags.set_bit(SKIP_ORDER_PERMIT_FLAG, true);
		self
	}

	/// Moves taker funds through permit2.
	pub fn with_permit2(mut self) -> Self {
		self.flags = self.flags.set_bit(USE_PERMIT2_FLAG, true);
		self
	}

	/// Routes the maker asset to `receiver` instead of the taker.
	pub fn with_receiver(mut self, receiver: Address) -> Self {
		self.receiver = Some(receiver);
		self
	}

	/// Attaches the order extension, required when filling an order whose
	/// salt binds one.
	pub fn with_extension(mut self, extension: Extension) -> Self {
		self.extension = Some(extension);
		self
	}

	/// Attaches a taker interaction executed during the fill.
	pub fn with_interaction(mut self, interaction: Interaction) -> Self {
		self.interaction = Some(interaction);
		self
	}

	/// Packs the configuration into the trait word and args blob.
	pub fn encode(&self) -> Result<EncodedTakerTraits, BitfieldError> {
		let extension_bytes = self
			.extension
			.as_ref()
			.map(Extension::encode)
			.unwrap_or_default();
		let interaction_bytes = self
			.interaction
			.as_ref()
			.map(Interaction::encode)
			.unwrap_or_default();

		let mut word = self
			.flags
			.set_mask(
				ARGS_EXTENSION_LENGTH_MASK,
				U256::from(extension_bytes.len()),
			)?
			.set_mask(
				ARGS_INTERACTION_LENGTH_MASK,
				U256::from(interaction_bytes.len()),
			)?;
		word = word.set_bit(ARGS_HAS_RECEIVER_FLAG, self.receiver.is_some());

		let mut args =
			Vec::with_capacity(20 + extension_bytes.len() + interaction_bytes.len());
		if let Some(receiver) = self.receiver {
			args.extend_from_slice(receiver.as_slice());
		}
		args.extend_from_slice(&extension_bytes);
		args.extend_from_slice(&interaction_bytes);

		Ok(EncodedTakerTraits {
			traits: word.value(),
			args: Bytes::from(args),
		})
	}
}
