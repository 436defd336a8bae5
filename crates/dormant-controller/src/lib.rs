//! Dormant 控制器
//!
//! 该模块实现空闲工作负载的所有者链解析：从一个 Pod 出发沿所有者引用向上攀爬，
//! 找到可以被暂停的工作负载。使用 kube-rs 框架与 Kubernetes API 交互。

pub mod cluster;
pub mod config;
pub mod context;
pub mod owners;
pub mod scale;

pub use config::ResolverConfig;
pub use context::ResolveContext;
pub use owners::{
    ApiResourceCache, DiscoveryClient, OwnerChain, OwnerFetcher, OwnerPriority, ResourceAccessor,
    DEFAULT_MAX_DEPTH,
};
pub use scale::{ScaleStrategy, ScaleTarget, ScaleTargetRegistry};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// 控制器初始化函数
///
/// 加载配置（未提供路径时使用默认配置），连接集群并创建所有者链解析器。
pub async fn init(config_path: Option<&Path>) -> Result<(OwnerFetcher, ScaleTargetRegistry)> {
    info!("初始化 Dormant 控制器");

    let config = match config_path {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };
    let registry = config.scale_registry();
    info!("可暂停类型注册表包含 {} 个类型", registry.len());

    let client = kube::Client::try_default()
        .await
        .context("无法创建 Kubernetes 客户端")?;
    let fetcher = cluster::kube_owner_fetcher(client, &config, &registry);

    info!("Dormant 控制器初始化完成，最大攀爬深度 {}", config.max_depth);
    Ok((fetcher, registry))
}
