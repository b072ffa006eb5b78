//! Deterministic escrow proxy addresses.
//!
//! The factory deploys minimal proxies with CREATE2, so the proxy address
//! for a salt is known before deployment. zkSync Era derives create2
//! addresses differently: its hash includes a fixed prefix, the factory
//! padded to a word, and a bytecode hash that does not depend on the
//! implementation, with the implementation entering through the
//! constructor-input hash instead.

use alloy_primitives::{b256, hex, keccak256, Address, B256};
use alloy_sol_types::SolValue;
use order_types::ZKSYNC_CHAIN_ID;

/// CREATE2 address derivation over the EIP-1167 minimal proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Create2ProxyFactory {
	/// The deploying factory.
	pub factory: Address,
	/// Implementation behind each proxy.
	pub implementation: Address,
}

impl Create2ProxyFactory {
	/// Creates a derivation handle.
	pub fn new(factory: Address, implementation: Address) -> Self {
		Self {
			factory,
			implementation,
		}
	}

	/// Minimal proxy init code for the implementation.
	fn init_code(&self) -> Vec<u8> {
		let mut code = Vec::with_capacity(55);
		code.extend_from_slice(&hex!("3d602d80600a3d3981f3363d3d373d3d3d363d73"));
		code.extend_from_slice(self.implementation.as_slice());
		code.extend_from_slice(&hex!("5af43d82803e903d91602b57fd5bf3"));

		code
	}

	/// The proxy address the factory will deploy for `salt`.
	pub fn proxy_address(&self, salt: B256) -> Address {
		let init_code_hash = keccak256(self.init_code());

		let mut data = Vec::with_capacity(1 + 20 + 32 + 32);
		data.push(0xff);
		data.extend_from_slice(self.factory.as_slice());
		data.extend_from_slice(salt.as_slice());
		data.extend_from_slice(init_code_hash.as_slice());

		Address::from_slice(&keccak256(data)[12..])
	}
}

/// zkSync Era's create2 derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZkSyncProxyFactory {
	/// The deploying factory.
	pub factory: Address,
	/// Implementation behind each proxy.
	pub implementation: Address,
}

impl ZkSyncProxyFactory {
	/// keccak256("zksyncCreate2"), the domain prefix of the derivation.
	const CREATE2_PREFIX: B256 =
		b256!("2020dba91b30cc0006188af794c2fb30dd8520db7e2c088b7fc7c103c00ca494");

	/// Hash of the proxy bytecode. Constant because the zkSync proxy reads
	/// the implementation from constructor input rather than embedding it
	/// in code.
	const PROXY_BYTECODE_HASH: B256 =
		b256!("01000035492ceb24a47d861a8fd7e65b117f2eb5bf6453e191ba770c70ca7f43");

	/// Creates a derivation handle.
	pub fn new(factory: Address, implementation: Address) -> Self {
		Self {
			factory,
			implementation,
		}
	}

	/// The proxy address the factory will deploy for `salt`.
	pub fn proxy_address(&self, salt: B256) -> Address {
		let input_hash = keccak256(self.implementation.abi_encode());

		let mut data = Vec::with_capacity(5 * 32);
		data.extend_from_slice(Self::CREATE2_PREFIX.as_slice());
		data.extend_from_slice(B256::left_padding_from(self.factory.as_slice()).as_slice());
		data.extend_from_slice(salt.as_slice());
		data.extend_from_slice(Self::PROXY_BYTECODE_HASH.as_slice());
		data.extend_from_slice(input_hash.as_slice());

		Address::from_slice(&keccak256(data)[12..])
	}
}

/// Chain-aware proxy address derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyFactory {
	/// Standard CREATE2 chains.
	Create2(Create2ProxyFactory),
	/// zkSync Era.
	ZkSync(ZkSyncProxyFactory),
}

impl ProxyFactory {
	/// Picks the derivation variant for `chain_id`.
	pub fn for_chain(chain_id: u64, factory: Address, implementation: Address) -> Self {
		if chain_id == ZKSYNC_CHAIN_ID {
			Self::ZkSync(ZkSyncProxyFactory::new(factory, implementation))
		} else {
			Self::Create2(Create2ProxyFactory::new(factory, implementation))
		}
	}

	/// The proxy address the factory will deploy for `salt`.
	pub fn proxy_address(&self, salt: B256) -> Address {
		match self {
			Self::Create2(factory) => factory.proxy_address(salt),
			Self::ZkSync(factory) => factory.proxy_address(salt),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn derives_known_mainnet_proxy_addresses() {
		let factory = Create2ProxyFactory::new(
			address!("4bc5a9d205adf1091d596bc2e1aa0d6b9dc3b12c"),
			address!("fbc2d33fc6c7fadb155974b847dc04f39010caa9"),
		);
		let salt = b256!("3fccfe0035a1010d48c1573e1fc78290082e778619ddb01429af83b5f3faf29c");

		assert_eq!(
			factory.proxy_address(salt),
			address!("762bef5aa97185121b080f6cacb58901fe1e7751")
		);

		let factory = Create2ProxyFactory::new(
			address!("584aEaB186D81dbB52a8a14820c573480c3d4773"),
			address!("ddc60c7babfc55d8030f51910b157e179f7a41fc"),
		);
		let salt = b256!("7d1798e1fe1eef8c94c50886f476477781a4d56f4126ae8a3a88f5546649d153");

		assert_eq!(
			factory.proxy_address(salt),
			address!("f81af95bb417a82923e5fa001b1e052034026e64")
		);
	}

	#[test]
	fn zksync_derivation_is_deterministic_and_distinct() {
		let factory = address!("4bc5a9d205adf1091d596bc2e1aa0d6b9dc3b12c");
		let implementation = address!("fbc2d33fc6c7fadb155974b847dc04f39010caa9");
		let salt = b256!("3fccfe0035a1010d48c1573e1fc78290082e778619ddb01429af83b5f3faf29c");

		let zksync = ZkSyncProxyFactory::new(factory, implementation);
		let standard = Create2ProxyFactory::new(factory, implementation);

		assert_eq!(zksync.proxy_address(salt), zksync.proxy_address(salt));
		assert_ne!(zksync.proxy_address(salt), standard.proxy_address(salt));
	}

	#[test]
	fn facade_selects_variant_by_chain() {
		let factory = address!("4bc5a9d205adf1091d596bc2e1aa0d6b9dc3b12c");
		let implementation = address!("fbc2d33fc6c7fadb155974b847dc04f39010caa9");
		let salt = b256!("3fccfe0035a1010d48c1573e1fc78290082e778619ddb01429af83b5f3faf29c");

		let mainnet = ProxyFactory::for_chain(1, factory, implementation);
		let zksync = ProxyFactory::for_chain(ZKSYNC_CHAIN_ID, factory, implementation);

		assert_eq!(
			mainnet.proxy_address(salt),
			Create2ProxyFactory::new(factory, implementation).proxy_address(salt)
		);
		assert_eq!(
			zksync.proxy_address(salt),
			ZkSyncProxyFactory::new(factory, implementation).proxy_address(salt)
		);
	}
}
