//! 基于 kube 动态 API 的通用资源访问

use async_trait::async_trait;
use dormant_common::{BoxError, GenericObject, ResolvedKind};
use kube::api::Api;
use kube::core::DynamicObject;
use kube::Client;
use tracing::debug;

use super::convert::{api_resource, from_dynamic};
use crate::owners::ResourceAccessor;

/// 通过 `Api<DynamicObject>` 读取任意资源
#[derive(Clone)]
pub struct KubeResourceAccessor {
    client: Client,
}

impl KubeResourceAccessor {
    /// 创建新的访问器
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceAccessor for KubeResourceAccessor {
    async fn get(
        &self,
        kind: &ResolvedKind,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<GenericObject>, BoxError> {
        let ar = api_resource(kind);
        let api: Api<DynamicObject> = match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &ar),
            None => Api::all_with(self.client.clone(), &ar),
        };

        debug!("读取 {} {:?}/{}", kind.resource.group_resource(), namespace, name);
        match api.get_opt(name).await? {
            Some(object) => Ok(Some(from_dynamic(object, kind)?)),
            None => Ok(None),
        }
    }
}
