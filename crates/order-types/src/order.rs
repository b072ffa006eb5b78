//! Order construction, salt binding and the ABI round trip.

use crate::addresses::AddressesError;
use crate::eip712;
use crate::extension::Extension;
use crate::maker_traits::MakerTraits;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use thiserror::Error;
use tracing::debug;

/// Errors produced when constructing or decoding orders.
#[derive(Debug, Error)]
pub enum OrderError {
	/// Error that occurs when a salt does not commit to the attached
	/// extension.
	#[error("invalid salt: the low 160 bits must equal the extension hash")]
	SaltExtensionMismatch,
	/// Error that occurs when a caller-supplied base salt exceeds 96 bits.
	#[error("base salt 0x{0:x} does not fit into 96 bits")]
	BaseSaltTooLarge(U256),
	/// Error that occurs when maker traits claim an extension that was not
	/// provided.
	#[error("maker traits indicate an extension but none was provided")]
	MissingExtension,
	/// Error that occurs when order calldata cannot be decoded.
	#[error("invalid order calldata: {0}")]
	InvalidCalldata(#[from] alloy_sol_types::Error),
	/// Error that occurs when hashing for an unsupported chain.
	#[error(transparent)]
	UnsupportedChain(#[from] AddressesError),
}

/// Caller-supplied order parameters.
///
/// `salt` and `receiver` are optional: an absent salt is derived (and bound
/// to the extension when one is present), an absent receiver means the
/// maker receives the taker asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderInfo {
	/// Asset the maker is selling.
	pub maker_asset: Address,
	/// Asset the maker is buying.
	pub taker_asset: Address,
	/// Amount of the maker asset offered.
	pub making_amount: U256,
	/// Amount of the taker asset requested.
	pub taking_amount: U256,
	/// The order creator and signer.
	pub maker: Address,
	/// Explicit salt; derived when absent.
	pub salt: Option<U256>,
	/// Receiver of the taker asset; the maker when absent.
	pub receiver: Option<Address>,
}

/// A fully formed order, ready for hashing, signing and ABI encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrder {
	/// Per-order entropy; commits to the extension when one is attached.
	pub salt: U256,
	/// The order creator and signer.
	pub maker: Address,
	/// Receiver of the taker asset, zero when the maker receives.
	pub receiver: Address,
	/// Asset the maker is selling.
	pub maker_asset: Address,
	/// Asset the maker is buying.
	pub taker_asset: Address,
	/// Amount of the maker asset offered.
	pub making_amount: U256,
	/// Amount of the taker asset requested.
	pub taking_amount: U256,
	/// Packed maker-side fill configuration.
	pub maker_traits: MakerTraits,
	/// Attached behavioral payload, empty for plain orders.
	pub extension: Extension,
}

fn uint160_max() -> U256 {
	(U256::from(1u8) << 160) - U256::from(1u8)
}

const BASE_SALT_BITS: usize = 96;

impl LimitOrder {
	/// Assembles an order from its parts.
	///
	/// When `extension` is non-empty the has-extension flag is set on the
	/// returned order's traits, and a caller-supplied salt must already
	/// commit to the extension hash. Passing traits that claim an
	/// extension together with an empty one is an error.
	pub fn new(
		info: OrderInfo,
		maker_traits: MakerTraits,
		extension: Extension,
	) -> Result<Self, OrderError> {
		let receiver = match info.receiver {
			Some(receiver) if receiver == info.maker => Address::ZERO,
			Some(receiver) => receiver,
			None => Address::ZERO,
		};

		let salt = match info.salt {
			Some(salt) => {
				Self::verify_salt(salt, &extension)?;
				salt
			},
			None => {
				let salt = Self::build_salt(&extension);
				debug!(%salt, "derived order salt");
				salt
			},
		};

		let maker_traits = if extension.is_empty() {
			if maker_traits.has_extension() {
				return Err(OrderError::MissingExtension);
			}
			maker_traits
		} else {
			maker_traits.with_extension()
		};

		Ok(Self {
			salt,
			maker: info.maker,
			receiver,
			maker_asset: info.maker_asset,
			taker_asset: info.taker_asset,
			making_amount: info.making_amount,
			taking_amount: info.taking_amount,
			maker_traits,
			extension,
		})
	}

	/// Derives a salt from a fresh random 96-bit base.
	///
	/// Orders with an extension must commit to it through the salt or they
	/// will never fill, so the extension hash occupies the low 160 bits.
	pub fn build_salt(extension: &Extension) -> U256 {
		let base = U256::from(rand::random::<u128>() >> (128 - BASE_SALT_BITS));

		if extension.is_empty() {
			return base;
		}

		let hash = U256::from_be_bytes(extension.keccak256().0);

		(base << 160) | (hash & uint160_max())
	}

	/// Derives a salt from an explicit base, which must fit in 96 bits.
	pub fn build_salt_with_base(
		extension: &Extension,
		base_salt: U256,
	) -> Result<U256, OrderError> {
		if base_salt >> BASE_SALT_BITS != U256::ZERO {
			return Err(OrderError::BaseSaltTooLarge(base_salt));
		}

		if extension.is_empty() {
			return Ok(base_salt);
		}

		let hash = U256::from_be_bytes(extension.keccak256().0);

		Ok((base_salt << 160) | (hash & uint160_max()))
	}

	/// Checks that `salt` commits to `extension`. Trivially true for an
	/// empty extension.
	pub fn verify_salt(salt: U256, extension: &Extension) -> Result<(), OrderError> {
		if extension.is_empty() {
			return Ok(());
		}

		let hash = U256::from_be_bytes(extension.keccak256().0);

		if salt & uint160_max() == hash & uint160_max() {
			Ok(())
		} else {
			Err(OrderError::SaltExtensionMismatch)
		}
	}

	/// The order as the contract-level struct.
	pub fn to_struct(&self) -> eip712::Order {
		eip712::Order {
			salt: self.salt,
			maker: self.maker,
			receiver: self.receiver,
			makerAsset: self.maker_asset,
			takerAsset: self.taker_asset,
			makingAmount: self.making_amount,
			takingAmount: self.taking_amount,
			makerTraits: self.maker_traits.as_u256(),
		}
	}

	/// ABI-encodes the order tuple.
	pub fn to_calldata(&self) -> Bytes {
		Bytes::from(self.to_struct().abi_encode())
	}

	/// Decodes an ABI-encoded order tuple without an extension.
	///
	/// Orders whose traits claim an extension cannot be reconstructed from
	/// the tuple alone; use [`from_data_and_extension`] for those.
	///
	/// [`from_data_and_extension`]: LimitOrder::from_data_and_extension
	pub fn from_calldata(data: &[u8]) -> Result<Self, OrderError> {
		let decoded = eip712::Order::abi_decode(data)?;

		Self::from_data_and_extension(decoded, Extension::default())
	}

	/// Rebuilds an order from a decoded contract-level struct and its
	/// extension, re-checking the salt commitment.
	pub fn from_data_and_extension(
		data: eip712::Order,
		extension: Extension,
	) -> Result<Self, OrderError> {
		Self::new(
			OrderInfo {
				maker_asset: data.makerAsset,
				taker_asset: data.takerAsset,
				making_amount: data.makingAmount,
				taking_amount: data.takingAmount,
				maker: data.maker,
				salt: Some(data.salt),
				receiver: Some(data.receiver),
			},
			MakerTraits::new(data.makerTraits),
			extension,
		)
	}

	/// The hash the maker signs for `chain_id`.
	pub fn order_hash(&self, chain_id: u64) -> Result<B256, AddressesError> {
		eip712::order_hash(&self.to_struct(), chain_id)
	}

	/// Returns true when only a specific address may fill the order.
	pub fn is_private(&self) -> bool {
		self.maker_traits.is_private()
	}
}
