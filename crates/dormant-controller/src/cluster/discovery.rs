//! 基于 kube 的集群发现

use async_trait::async_trait;
use dormant_common::{ApiResourceInfo, ApiResourceList, BoxError};
use kube::discovery::{Discovery, Scope};
use kube::Client;
use tracing::debug;

use crate::owners::DiscoveryClient;

/// 通过 kube 发现 API 列出集群提供的资源
#[derive(Clone)]
pub struct KubeDiscovery {
    client: Client,
}

impl KubeDiscovery {
    /// 创建新的发现客户端
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DiscoveryClient for KubeDiscovery {
    async fn server_preferred_resources(&self) -> Result<Vec<ApiResourceList>, BoxError> {
        let discovery = Discovery::new(self.client.clone()).run().await?;

        let mut lists: Vec<ApiResourceList> = Vec::new();
        for group in discovery.groups() {
            for (ar, caps) in group.recommended_resources() {
                let info = ApiResourceInfo {
                    name: ar.plural.clone(),
                    kind: ar.kind.clone(),
                    namespaced: matches!(caps.scope, Scope::Namespaced),
                };
                match lists.iter_mut().find(|l| l.group_version == ar.api_version) {
                    Some(list) => list.resources.push(info),
                    None => lists.push(ApiResourceList::new(&ar.api_version, vec![info])),
                }
            }
        }

        debug!("kube 发现返回 {} 个组/版本", lists.len());
        Ok(lists)
    }
}
