//! Data transfer types for the remote order-book service.
//!
//! Only the shapes are defined here; the HTTP transport lives with the
//! caller. Integer fields travel as decimal strings and byte fields as
//! 0x-prefixed hex, matching the service's JSON wire format.

use crate::order::LimitOrder;
use alloy_primitives::hex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The order struct as the order-book service serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
	pub salt: String,
	pub maker: String,
	pub receiver: String,
	pub maker_asset: String,
	pub taker_asset: String,
	pub making_amount: String,
	pub taking_amount: String,
	pub maker_traits: String,
}

impl From<&LimitOrder> for OrderData {
	fn from(order: &LimitOrder) -> Self {
		Self {
			salt: order.salt.to_string(),
			maker: hex_address(order.maker),
			receiver: hex_address(order.receiver),
			maker_asset: hex_address(order.maker_asset),
			taker_asset: hex_address(order.taker_asset),
			making_amount: order.making_amount.to_string(),
			taking_amount: order.taking_amount.to_string(),
			maker_traits: order.maker_traits.as_u256().to_string(),
		}
	}
}

/// Order struct plus its extension encoding, as submitted and fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDataWithExtension {
	#[serde(flatten)]
	pub order: OrderData,
	pub extension: String,
}

impl From<&LimitOrder> for OrderDataWithExtension {
	fn from(order: &LimitOrder) -> Self {
		Self {
			order: OrderData::from(order),
			extension: order.extension.encode().to_string(),
		}
	}
}

/// Body of an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
	pub order_hash: String,
	pub signature: String,
	pub data: OrderDataWithExtension,
}

/// One order record from the order-book service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
	pub signature: String,
	pub order_hash: String,
	pub create_date_time: String,
	pub remaining_maker_amount: String,
	pub maker_balance: String,
	pub maker_allowance: String,
	pub data: OrderDataWithExtension,
	pub maker_rate: String,
	pub taker_rate: String,
	pub is_maker_contract: bool,
	pub order_invalid_reason: Option<Vec<String>>,
}

/// Fee parameters the service quotes for a prospective order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeParams {
	/// Whitelisted resolver addresses, keyed by promoter.
	pub whitelist: HashMap<String, String>,
	pub fee_bps: u64,
	pub whitelist_discount_percent: u64,
	pub protocol_fee_receiver: String,
	pub extension_address: String,
}

/// Validity buckets of fetched orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
	Valid,
	TemporarilyInvalid,
	Invalid,
}

impl OrderStatus {
	/// Numeric form used in query parameters.
	pub fn as_u8(self) -> u8 {
		match self {
			OrderStatus::Valid => 1,
			OrderStatus::TemporarilyInvalid => 2,
			OrderStatus::Invalid => 3,
		}
	}
}

/// Cursor-based pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPager {
	pub limit: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cursor: Option<String>,
}

impl Default for CursorPager {
	fn default() -> Self {
		Self {
			limit: 100,
			cursor: None,
		}
	}
}

fn hex_address(address: alloy_primitives::Address) -> String {
	format!("0x{}", hex::encode(address))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::maker_traits::MakerTraits;
	use crate::order::OrderInfo;
	use crate::Extension;
	use alloy_primitives::{address, U256};

	fn sample_order() -> LimitOrder {
		LimitOrder::new(
			OrderInfo {
				maker_asset: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
				taker_asset: address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
				making_amount: U256::from(1_000_000_000_000_000_000u64),
				taking_amount: U256::from(1_420_000_000u64),
				maker: address!("00000000219ab540356cbb839cbe05303d7705fa"),
				salt: Some(U256::from(10u8)),
				receiver: None,
			},
			MakerTraits::default(),
			Extension::default(),
		)
		.unwrap()
	}

	#[test]
	fn order_data_uses_wire_encodings() {
		let data = OrderData::from(&sample_order());

		assert_eq!(data.salt, "10");
		assert_eq!(data.maker, "0x00000000219ab540356cbb839cbe05303d7705fa");
		assert_eq!(data.receiver, "0x0000000000000000000000000000000000000000");
		assert_eq!(data.making_amount, "1000000000000000000");
		assert_eq!(data.maker_traits, "0");
	}

	#[test]
	fn submit_request_serializes_camel_case_with_flattened_data() {
		let order = sample_order();
		let request = SubmitOrderRequest {
			order_hash: format!("{}", order.order_hash(1).unwrap()),
			signature: "0x00".to_string(),
			data: OrderDataWithExtension::from(&order),
		};

		let json = serde_json::to_value(&request).unwrap();

		assert!(json.get("orderHash").is_some());
		assert_eq!(json["data"]["makerAsset"], "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
		assert_eq!(json["data"]["extension"], "0x");

		let back: SubmitOrderRequest = serde_json::from_value(json).unwrap();
		assert_eq!(back, request);
	}

	#[test]
	fn pager_defaults_to_first_page() {
		let pager = CursorPager::default();

		assert_eq!(pager.limit, 100);
		assert!(pager.cursor.is_none());
	}
}
