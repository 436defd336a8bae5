//! API 资源缓存模块
//!
//! 将 GVK 映射为通用寻址所需的（资源复数名, 是否命名空间级）。映射来自一次集群发现调用：
//! 首次成功后缓存即被视为权威快照，之后不再调用发现接口；首次失败不会被记住，
//! 下一次调用会重新发现。

use async_trait::async_trait;
use dormant_common::{ApiResourceList, BoxError, Error, GroupVersionKind, ResolvedKind, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::context::ResolveContext;

/// 集群发现接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    /// 列出集群当前提供的全部 API 资源（每个组取首选版本）
    async fn server_preferred_resources(&self) -> std::result::Result<Vec<ApiResourceList>, BoxError>;
}

/// GVK 到可寻址资源的索引
type ResourceIndex = HashMap<GroupVersionKind, ResolvedKind>;

/// API 资源缓存
pub struct ApiResourceCache {
    /// 发现客户端
    discovery: Arc<dyn DiscoveryClient>,
    /// 一次性填充的索引
    index: OnceCell<ResourceIndex>,
    /// 单次发现调用的超时
    call_timeout: Option<Duration>,
}

impl ApiResourceCache {
    /// 创建新的空缓存
    pub fn new(discovery: Arc<dyn DiscoveryClient>) -> Self {
        Self {
            discovery,
            index: OnceCell::new(),
            call_timeout: None,
        }
    }

    /// 设置单次发现调用的超时
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// 缓存是否已填充
    pub fn is_populated(&self) -> bool {
        self.index.initialized()
    }

    /// 已缓存的类型数量
    pub fn len(&self) -> usize {
        self.index.get().map(HashMap::len).unwrap_or(0)
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 将 GVK 解析为资源坐标
    pub async fn resolve(&self, ctx: &ResolveContext, gvk: &GroupVersionKind) -> Result<ResolvedKind> {
        let index = self.snapshot(ctx).await?;

        index.get(gvk).cloned().ok_or_else(|| {
            debug!("发现结果中没有类型 {}", gvk);
            Error::UnknownKind {
                kind: gvk.kind.clone(),
                group_version: gvk.group_version(),
            }
        })
    }

    /// 获取索引，必要时执行发现
    ///
    /// 并发的首次调用由 OnceCell 串行化，成功后所有读者无锁读取。
    /// 等待他人发现的过程同样受本调用方上下文约束。
    async fn snapshot(&self, ctx: &ResolveContext) -> Result<&ResourceIndex> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }

        let init = self.index.get_or_try_init(|| async {
            debug!("执行集群 API 发现");
            let lists = ctx
                .run(self.call_timeout, async {
                    self.discovery
                        .server_preferred_resources()
                        .await
                        .map_err(Error::Discovery)
                })
                .await
                .map_err(|e| {
                    warn!("集群 API 发现失败: {}", e);
                    e
                })?;

            let index = build_index(&lists);
            info!("集群 API 发现完成，共缓存 {} 种类型", index.len());
            Ok::<_, Error>(index)
        });
        ctx.run(None, init).await
    }
}

/// 由发现结果构建索引，子资源被跳过，重复的 GVK 以先出现者为准
fn build_index(lists: &[ApiResourceList]) -> ResourceIndex {
    let mut index = ResourceIndex::new();
    for list in lists {
        for (gvk, resource, namespaced) in list.entries() {
            index.entry(gvk.clone()).or_insert(ResolvedKind {
                gvk,
                resource,
                namespaced,
            });
        }
    }
    index
}
