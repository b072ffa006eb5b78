//! Contract-facing surface of the limit order toolkit: fill calldata for
//! the settlement router, native-order factory calls, and deterministic
//! proxy address derivation.

/// Solidity interface definitions shared by the builders.
pub mod abi;
/// Calldata for the router's four fill entry points.
pub mod contract;
/// Calls against the native-order factory and its deployed proxies.
pub mod native_orders;
/// Deterministic escrow proxy addresses.
pub mod proxy_factory;

pub use contract::{split_signature, ContractError, LimitOrderContract};
pub use native_orders::{CallInfo, NativeOrdersFactory, NativeOrdersImpl};
pub use proxy_factory::{Create2ProxyFactory, ProxyFactory, ZkSyncProxyFactory};
