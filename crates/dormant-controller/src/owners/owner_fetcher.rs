//! 所有者链解析模块
//!
//! 从给定对象出发，逐跳沿所有者引用向上攀爬：每一跳先通过 API 资源缓存把所有者类型
//! 翻译为资源坐标，再通过通用资源访问接口读取所有者对象。结果按由近及远排列。
//!
//! 任意一跳失败时，已经解析出的前缀与错误一起返回，调用方仍可使用截断的链。

use async_trait::async_trait;
use dormant_common::{BoxError, Error, GenericObject, OwnerEntry, OwnerReference, ResolvedKind, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::api_resource_cache::{ApiResourceCache, DiscoveryClient};
use super::candidate::OwnerPriority;
use crate::config::ResolverConfig;
use crate::context::ResolveContext;
use crate::scale::ScaleTargetRegistry;

/// 默认最大攀爬深度
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// 通用资源访问接口
#[async_trait]
pub trait ResourceAccessor: Send + Sync {
    /// 按资源坐标读取对象，不存在时返回 `Ok(None)`
    async fn get(
        &self,
        kind: &ResolvedKind,
        namespace: Option<&str>,
        name: &str,
    ) -> std::result::Result<Option<GenericObject>, BoxError>;
}

/// 解析结果：已解析的前缀加可选的错误
#[derive(Debug, Default)]
pub struct OwnerChain {
    /// 祖先列表，下标 0 为最近的祖先
    pub owners: Vec<OwnerEntry>,
    /// 终止攀爬的错误
    pub error: Option<Error>,
}

impl OwnerChain {
    fn complete(owners: Vec<OwnerEntry>) -> Self {
        Self { owners, error: None }
    }

    fn partial(owners: Vec<OwnerEntry>, error: Error) -> Self {
        Self {
            owners,
            error: Some(error),
        }
    }

    /// 是否完整解析
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// 祖先名称，由近及远
    pub fn names(&self) -> Vec<&str> {
        self.owners.iter().map(OwnerEntry::name).collect()
    }

    /// 转换为全有或全无的结果，丢弃部分前缀
    pub fn into_result(self) -> Result<Vec<OwnerEntry>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.owners),
        }
    }
}

/// 所有者链解析器
pub struct OwnerFetcher {
    /// 发现结果缓存，归本实例独占
    resources: ApiResourceCache,
    /// 通用资源访问
    accessor: Arc<dyn ResourceAccessor>,
    /// 候选所有者优先级
    priority: OwnerPriority,
    /// 最大攀爬深度
    max_depth: usize,
    /// 单次读取的超时
    hop_timeout: Option<Duration>,
}

impl OwnerFetcher {
    /// 使用默认优先级和深度创建
    pub fn new(discovery: Arc<dyn DiscoveryClient>, accessor: Arc<dyn ResourceAccessor>) -> Self {
        Self {
            resources: ApiResourceCache::new(discovery),
            accessor,
            priority: OwnerPriority::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            hop_timeout: None,
        }
    }

    /// 按配置创建
    ///
    /// 注册表中的类型和配置中的中间类型都会加入候选优先级。
    pub fn from_config(
        discovery: Arc<dyn DiscoveryClient>,
        accessor: Arc<dyn ResourceAccessor>,
        config: &ResolverConfig,
        registry: &ScaleTargetRegistry,
    ) -> Self {
        let extra = registry
            .group_kinds()
            .into_iter()
            .chain(config.intermediate_kinds.iter().cloned());
        let hop_timeout = config.hop_timeout();

        Self {
            resources: ApiResourceCache::new(discovery).with_call_timeout(hop_timeout),
            accessor,
            priority: OwnerPriority::with_extra_kinds(extra),
            max_depth: config.max_depth,
            hop_timeout,
        }
    }

    /// 设置最大攀爬深度
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 设置候选优先级
    pub fn with_priority(mut self, priority: OwnerPriority) -> Self {
        self.priority = priority;
        self
    }

    /// API 资源缓存
    pub fn api_resources(&self) -> &ApiResourceCache {
        &self.resources
    }

    /// 候选优先级
    pub fn priority(&self) -> &OwnerPriority {
        &self.priority
    }

    /// 解析对象的所有者链
    pub async fn get_owners(&self, ctx: &ResolveContext, object: &GenericObject) -> OwnerChain {
        let mut owners: Vec<OwnerEntry> = Vec::new();

        loop {
            let current = owners.last().map(|e| &e.object).unwrap_or(object);

            if current.owner_references.is_empty() {
                debug!("{} {} 没有所有者，链长度 {}", current.gvk.kind, current.key(), owners.len());
                return OwnerChain::complete(owners);
            }

            let Some(reference) = self.priority.select(&current.owner_references).cloned() else {
                debug!("{} {} 没有可识别的所有者引用", current.gvk.kind, current.key());
                return OwnerChain::complete(owners);
            };

            if owners.len() >= self.max_depth {
                warn!("{} 的所有者链超过最大深度 {}", object.key(), self.max_depth);
                return OwnerChain::partial(owners, Error::ChainTooDeep { max_depth: self.max_depth });
            }

            let namespace = current.namespace.clone();
            match self.fetch_owner(ctx, namespace.as_deref(), &reference).await {
                Ok(entry) => {
                    debug!("解析到所有者 {} {}", entry.gvk().kind, entry.object.key());
                    owners.push(entry);
                }
                Err(err) => {
                    info!(
                        "解析 {} 的所有者 {} {} 失败（已解析 {} 个）: {}",
                        object.key(),
                        reference.kind,
                        reference.name,
                        owners.len(),
                        err
                    );
                    return OwnerChain::partial(owners, err);
                }
            }
        }
    }

    /// 读取单个所有者
    async fn fetch_owner(
        &self,
        ctx: &ResolveContext,
        namespace: Option<&str>,
        reference: &OwnerReference,
    ) -> Result<OwnerEntry> {
        let kind = self.resources.resolve(ctx, &reference.gvk()).await?;
        let namespace = if kind.namespaced { namespace } else { None };

        let fetched = ctx
            .run(self.hop_timeout, async {
                self.accessor
                    .get(&kind, namespace, &reference.name)
                    .await
                    .map_err(Error::Fetch)
            })
            .await?;

        match fetched {
            Some(object) => Ok(OwnerEntry {
                object,
                resource: kind,
            }),
            None => Err(Error::NotFound {
                resource: kind.resource.group_resource(),
                name: reference.name.clone(),
            }),
        }
    }
}
