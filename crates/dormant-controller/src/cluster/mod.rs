//! 集群适配模块
//!
//! 该模块用 kube-rs 实现发现接口和通用资源访问接口，并提供 kube 类型到通用对象的转换。

mod accessor;
mod convert;
mod discovery;

pub use accessor::KubeResourceAccessor;
pub use convert::{api_resource, from_dynamic, from_resource};
pub use discovery::KubeDiscovery;

use kube::Client;
use serde::Serialize;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::context::ResolveContext;
use crate::owners::{OwnerChain, OwnerFetcher};
use crate::scale::ScaleTargetRegistry;

/// 创建使用 kube 客户端的所有者链解析器
pub fn kube_owner_fetcher(client: Client, config: &ResolverConfig, registry: &ScaleTargetRegistry) -> OwnerFetcher {
    OwnerFetcher::from_config(
        Arc::new(KubeDiscovery::new(client.clone())),
        Arc::new(KubeResourceAccessor::new(client)),
        config,
        registry,
    )
}

/// 解析带类型资源（如 Pod）的所有者链
///
/// 转换失败时返回空链和错误。
pub async fn resolve_owners<K: Serialize>(
    fetcher: &OwnerFetcher,
    ctx: &ResolveContext,
    resource: &K,
) -> OwnerChain {
    match from_resource(resource) {
        Ok(object) => fetcher.get_owners(ctx, &object).await,
        Err(err) => OwnerChain {
            owners: Vec::new(),
            error: Some(err),
        },
    }
}
