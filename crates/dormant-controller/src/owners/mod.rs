//! 所有者链模块
//!
//! 该模块负责为给定对象（通常是 Pod）找出拥有它的祖先链，供空闲子系统挑选可以
//! 暂停/恢复的对象。包含 API 资源缓存、候选所有者选择和逐跳解析器。

mod api_resource_cache;
mod candidate;
mod owner_fetcher;

#[cfg(test)]
pub(crate) mod testing;

pub use api_resource_cache::{ApiResourceCache, DiscoveryClient};
pub use candidate::OwnerPriority;
pub use owner_fetcher::{OwnerChain, OwnerFetcher, ResourceAccessor, DEFAULT_MAX_DEPTH};
