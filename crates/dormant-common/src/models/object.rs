//! 通用对象模型
//!
//! 所有者链可能跨越内置类型和任意自定义资源，因此这里不依赖静态模式，
//! 而是使用一个通用对象句柄：类型标识、命名空间、名称、标签、所有者引用，
//! 外加完整的 JSON 负载。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::gvk::{GroupVersionKind, GroupVersionResource};
use crate::error::{Error, Result};

/// 所有者引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    /// 所有者的 apiVersion
    pub api_version: String,
    /// 所有者的类型
    pub kind: String,
    /// 所有者名称，命名空间与被拥有对象相同
    pub name: String,
    /// 所有者 UID
    #[serde(default)]
    pub uid: String,
    /// 是否为控制者引用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<bool>,
    /// 是否阻止所有者删除
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_owner_deletion: Option<bool>,
}

impl OwnerReference {
    /// 指向给定对象的所有者引用
    pub fn for_object(owner: &GenericObject, controller: bool) -> Self {
        Self {
            api_version: owner.api_version(),
            kind: owner.gvk.kind.clone(),
            name: owner.name.clone(),
            uid: owner.uid().unwrap_or_default().to_string(),
            controller: controller.then_some(true),
            block_owner_deletion: controller.then_some(true),
        }
    }

    /// 所有者的 GVK
    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::from_api_version(&self.api_version, &self.kind)
    }

    /// 是否为控制者引用
    pub fn is_controller(&self) -> bool {
        self.controller.unwrap_or(false)
    }

    fn same_owner(&self, other: &OwnerReference) -> bool {
        self.gvk().group_kind() == other.gvk().group_kind() && self.name == other.name
    }
}

/// 通用对象句柄
#[derive(Debug, Clone, PartialEq)]
pub struct GenericObject {
    /// 对象类型
    pub gvk: GroupVersionKind,
    /// 命名空间，集群级对象为 None
    pub namespace: Option<String>,
    /// 对象名称
    pub name: String,
    /// 对象标签
    pub labels: BTreeMap<String, String>,
    /// 所有者引用
    pub owner_references: Vec<OwnerReference>,
    /// 完整负载
    pub payload: Value,
}

/// 解析时只关心的外层字段
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    api_version: String,
    kind: String,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    name: Option<String>,
    namespace: Option<String>,
    #[serde(default)]
    labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    owner_references: Option<Vec<OwnerReference>>,
}

impl GenericObject {
    /// 创建只有元数据的对象
    pub fn new(api_version: &str, kind: &str, namespace: Option<&str>, name: &str) -> Self {
        let mut metadata = Map::new();
        metadata.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(ns) = namespace {
            metadata.insert("namespace".to_string(), Value::String(ns.to_string()));
        }

        let mut payload = Map::new();
        payload.insert("apiVersion".to_string(), Value::String(api_version.to_string()));
        payload.insert("kind".to_string(), Value::String(kind.to_string()));
        payload.insert("metadata".to_string(), Value::Object(metadata));

        Self {
            gvk: GroupVersionKind::from_api_version(api_version, kind),
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            labels: BTreeMap::new(),
            owner_references: Vec::new(),
            payload: Value::Object(payload),
        }
    }

    /// 从 JSON 清单解析
    pub fn from_value(payload: Value) -> Result<Self> {
        let envelope: Envelope = serde_json::from_value(payload.clone())?;
        let name = envelope
            .metadata
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                Error::Serialization(format!("{} 对象缺少 metadata.name", envelope.kind))
            })?;

        Ok(Self {
            gvk: GroupVersionKind::from_api_version(&envelope.api_version, &envelope.kind),
            namespace: envelope.metadata.namespace.filter(|ns| !ns.is_empty()),
            name,
            labels: envelope.metadata.labels.unwrap_or_default(),
            owner_references: envelope.metadata.owner_references.unwrap_or_default(),
            payload,
        })
    }

    /// apiVersion 字符串
    pub fn api_version(&self) -> String {
        self.gvk.group_version()
    }

    /// 对象 UID
    pub fn uid(&self) -> Option<&str> {
        self.payload
            .pointer("/metadata/uid")
            .and_then(Value::as_str)
    }

    /// `namespace/name` 形式的键，集群级对象只有名称
    pub fn key(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// 控制者引用（最多一个）
    pub fn controller_reference(&self) -> Option<&OwnerReference> {
        self.owner_references.iter().find(|r| r.is_controller())
    }

    /// 设置所有者引用
    ///
    /// 已存在指向同一所有者的引用时替换它；设置控制者引用会清除其他引用上的控制者标记，
    /// 保证对象最多只有一个控制者。
    pub fn set_owner_reference(&mut self, owner: &GenericObject, controller: bool) -> Result<()> {
        let reference = OwnerReference::for_object(owner, controller);

        if controller {
            for existing in self.owner_references.iter_mut() {
                existing.controller = None;
            }
        }

        match self
            .owner_references
            .iter_mut()
            .find(|r| r.same_owner(&reference))
        {
            Some(existing) => *existing = reference,
            None => self.owner_references.push(reference),
        }

        self.sync_owner_references()
    }

    fn sync_owner_references(&mut self) -> Result<()> {
        let references = serde_json::to_value(&self.owner_references)?;
        self.metadata_mut()?
            .insert("ownerReferences".to_string(), references);
        Ok(())
    }

    fn metadata_mut(&mut self) -> Result<&mut Map<String, Value>> {
        let payload = self
            .payload
            .as_object_mut()
            .ok_or_else(|| Error::Serialization("对象负载不是 JSON 对象".to_string()))?;
        payload
            .entry("metadata")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| Error::Serialization("metadata 不是 JSON 对象".to_string()))
    }
}

/// 通过发现解析出的可寻址类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKind {
    /// 对象类型
    pub gvk: GroupVersionKind,
    /// 资源坐标
    pub resource: GroupVersionResource,
    /// 是否为命名空间级资源
    pub namespaced: bool,
}

/// 所有者链中的一个条目，下标 0 为最近的祖先
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerEntry {
    /// 解析到的祖先对象
    pub object: GenericObject,
    /// 读取该对象时使用的资源坐标
    pub resource: ResolvedKind,
}

impl OwnerEntry {
    /// 祖先对象的类型
    pub fn gvk(&self) -> &GroupVersionKind {
        &self.object.gvk
    }

    /// 祖先对象名称
    pub fn name(&self) -> &str {
        &self.object.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let obj = GenericObject::from_value(json!({
            "apiVersion": "apps/v1",
            "kind": "ReplicaSet",
            "metadata": {
                "name": "test-replica",
                "namespace": "test-namespace",
                "uid": "1234",
                "labels": {"app": "web"},
                "ownerReferences": [{
                    "apiVersion": "apps/v1",
                    "kind": "Deployment",
                    "name": "test-deployment",
                    "uid": "5678",
                    "controller": true
                }]
            },
            "spec": {"replicas": 3}
        }))
        .unwrap();

        assert_eq!(obj.gvk, GroupVersionKind::gvk("apps", "v1", "ReplicaSet"));
        assert_eq!(obj.key(), "test-namespace/test-replica");
        assert_eq!(obj.uid(), Some("1234"));
        assert_eq!(obj.labels.get("app").map(String::as_str), Some("web"));
        assert_eq!(obj.controller_reference().unwrap().name, "test-deployment");
        assert_eq!(obj.payload["spec"]["replicas"], 3);
    }

    #[test]
    fn test_from_value_requires_name() {
        let err = GenericObject::from_value(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"namespace": "test-namespace"}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));

        let err = GenericObject::from_value(json!({"kind": "Pod"})).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_set_owner_reference_keeps_single_controller() {
        let mut pod = GenericObject::new("v1", "Pod", Some("test-namespace"), "test-pod");
        let replica = GenericObject::new("apps/v1", "ReplicaSet", Some("test-namespace"), "rs");
        let daemon = GenericObject::new("apps/v1", "DaemonSet", Some("test-namespace"), "ds");

        pod.set_owner_reference(&daemon, true).unwrap();
        pod.set_owner_reference(&replica, true).unwrap();
        pod.set_owner_reference(&replica, true).unwrap();

        assert_eq!(pod.owner_references.len(), 2);
        assert_eq!(pod.controller_reference().unwrap().kind, "ReplicaSet");
        assert_eq!(
            pod.owner_references.iter().filter(|r| r.is_controller()).count(),
            1
        );

        // 负载与结构化字段保持一致
        let reparsed = GenericObject::from_value(pod.payload.clone()).unwrap();
        assert_eq!(reparsed.owner_references, pod.owner_references);
    }

    #[test]
    fn test_owner_reference_gvk() {
        let owner = GenericObject::new("kubevirt.io/v1", "VirtualMachine", Some("ns"), "vm");
        let reference = OwnerReference::for_object(&owner, false);
        assert_eq!(reference.gvk(), GroupVersionKind::gvk("kubevirt.io", "v1", "VirtualMachine"));
        assert!(!reference.is_controller());
    }
}
