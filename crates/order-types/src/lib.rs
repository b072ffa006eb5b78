//! Core types for building and verifying limit orders.
//!
//! This crate is the pure, synchronous layer between domain objects and the
//! byte layouts a fixed settlement-contract ABI expects: the extension
//! codec with its cumulative-offset header, the packed maker and taker
//! trait words, salt/extension binding, and the order struct with its
//! EIP-712 surface. Everything here is deterministic value manipulation;
//! signing, transport and chain access live with the caller.

/// Per-chain protocol deployment addresses.
pub mod addresses;
/// Linear-proportion amount math for partial fills.
pub mod amounts;
/// Data transfer types for the remote order-book service.
pub mod api;
/// Bit-level access to 256-bit configuration words.
pub mod bitfield;
/// Basis-point quantities.
pub mod bps;
/// Sequential reading of packed byte payloads.
pub mod cursor;
/// Typed-data hashing for the on-chain order struct.
pub mod eip712;
/// The variable-length order extension and its offset-table codec.
pub mod extension;
/// Target-prefixed interaction payloads.
pub mod interaction;
/// The maker's 256-bit order configuration word.
pub mod maker_traits;
/// Integer multiply-divide with explicit rounding.
pub mod math;
/// Order construction, salt binding and the ABI round trip.
pub mod order;
/// Gas-efficient RFQ-style orders.
pub mod rfq;
/// The taker's 256-bit fill configuration word and its args blob.
pub mod taker_traits;

pub use addresses::{limit_order_protocol, AddressesError, LIMIT_ORDER_PROTOCOL, ZKSYNC_CHAIN_ID};
pub use amounts::{calc_making_amount, calc_taking_amount};
pub use bitfield::{BitMask, Bitfield, BitfieldError};
pub use bps::{Bps, BpsError};
pub use cursor::{BytesReader, CursorError};
pub use extension::{Extension, ExtensionBuilder, ExtensionError};
pub use interaction::{Interaction, InteractionError};
pub use maker_traits::{MakerTraits, MakerTraitsError};
pub use math::{mul_div, MathError, Rounding};
pub use order::{LimitOrder, OrderError, OrderInfo};
pub use rfq::{rfq_order, RfqOrderError, RfqOrderInfo, RfqOrderOptions};
pub use taker_traits::{AmountMode, EncodedTakerTraits, TakerTraits};
