//! 发现结果模型
//!
//! 集群发现接口按组/版本返回当前提供的资源列表。

use serde::{Deserialize, Serialize};

use super::gvk::{split_api_version, GroupVersionKind, GroupVersionResource};

/// 某个组/版本下提供的资源列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
    /// 组/版本，如 `apps/v1`
    pub group_version: String,
    /// 资源列表
    #[serde(default)]
    pub resources: Vec<ApiResourceInfo>,
}

/// 单个资源的描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResourceInfo {
    /// 资源复数名；子资源形如 `deployments/scale`
    pub name: String,
    /// 类型名称
    pub kind: String,
    /// 是否为命名空间级资源
    pub namespaced: bool,
}

impl ApiResourceInfo {
    /// 命名空间级资源
    pub fn namespaced(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            namespaced: true,
        }
    }

    /// 集群级资源
    pub fn cluster_scoped(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            namespaced: false,
        }
    }

    /// 是否为子资源
    pub fn is_subresource(&self) -> bool {
        self.name.contains('/')
    }
}

impl ApiResourceList {
    /// 创建新的资源列表
    pub fn new(group_version: &str, resources: Vec<ApiResourceInfo>) -> Self {
        Self {
            group_version: group_version.to_string(),
            resources,
        }
    }

    /// 组与版本
    pub fn group_and_version(&self) -> (&str, &str) {
        split_api_version(&self.group_version)
    }

    /// 列出非子资源的 (GVK, GVR, 是否命名空间级)
    pub fn entries(&self) -> impl Iterator<Item = (GroupVersionKind, GroupVersionResource, bool)> + '_ {
        let (group, version) = self.group_and_version();
        self.resources
            .iter()
            .filter(|r| !r.is_subresource())
            .map(move |r| {
                (
                    GroupVersionKind::gvk(group, version, &r.kind),
                    GroupVersionResource::gvr(group, version, &r.name),
                    r.namespaced,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_skip_subresources() {
        let list = ApiResourceList::new(
            "apps/v1",
            vec![
                ApiResourceInfo::namespaced("deployments", "Deployment"),
                ApiResourceInfo::namespaced("deployments/scale", "Scale"),
            ],
        );

        let entries: Vec<_> = list.entries().collect();
        assert_eq!(entries.len(), 1);
        let (gvk, gvr, namespaced) = &entries[0];
        assert_eq!(gvk, &GroupVersionKind::gvk("apps", "v1", "Deployment"));
        assert_eq!(gvr.resource, "deployments");
        assert!(*namespaced);
    }

    #[test]
    fn test_deserialize_discovery_payload() {
        let list: ApiResourceList = serde_json::from_value(serde_json::json!({
            "groupVersion": "v1",
            "resources": [{"name": "namespaces", "kind": "Namespace", "namespaced": false}]
        }))
        .unwrap();

        assert_eq!(list.group_and_version(), ("", "v1"));
        assert!(!list.resources[0].namespaced);
    }
}
