//! 类型标识模型
//!
//! GroupVersionKind 描述对象的模式类型（来自对象自身的 apiVersion/kind 或所有者引用），
//! GroupVersionResource 描述可寻址的资源集合（由发现结果推导，不存储在对象上）。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 组/版本/类型
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersionKind {
    /// API 组，核心组为空字符串
    #[serde(default)]
    pub group: String,
    /// API 版本
    pub version: String,
    /// 类型名称
    pub kind: String,
}

impl GroupVersionKind {
    /// 创建新的 GVK
    pub fn gvk(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// 从 apiVersion 与 kind 解析
    ///
    /// `apps/v1` 解析为组 `apps`、版本 `v1`；`v1` 解析为核心组。
    pub fn from_api_version(api_version: &str, kind: &str) -> Self {
        let (group, version) = split_api_version(api_version);
        Self::gvk(group, version, kind)
    }

    /// 组/版本字符串，如 `apps/v1` 或 `v1`
    pub fn group_version(&self) -> String {
        join_group_version(&self.group, &self.version)
    }

    /// 对应的组/类型，忽略版本
    pub fn group_kind(&self) -> GroupKind {
        GroupKind::new(&self.group, &self.kind)
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.group_version(), self.kind)
    }
}

/// 组/版本/资源
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionResource {
    /// API 组
    #[serde(default)]
    pub group: String,
    /// API 版本
    pub version: String,
    /// 资源复数名，如 replicasets
    pub resource: String,
}

impl GroupVersionResource {
    /// 创建新的 GVR
    pub fn gvr(group: &str, version: &str, resource: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
        }
    }

    /// 组/版本字符串
    pub fn group_version(&self) -> String {
        join_group_version(&self.group, &self.version)
    }

    /// 带组后缀的资源名，如 `replicasets.apps`；核心组只有复数名
    pub fn group_resource(&self) -> String {
        if self.group.is_empty() {
            self.resource.clone()
        } else {
            format!("{}.{}", self.resource, self.group)
        }
    }
}

impl fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Resource={}", self.group_version(), self.resource)
    }
}

/// 组/类型，用于与版本无关的匹配
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKind {
    /// API 组
    #[serde(default)]
    pub group: String,
    /// 类型名称
    pub kind: String,
}

impl GroupKind {
    /// 创建新的组/类型
    pub fn new(group: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            kind: kind.to_string(),
        }
    }

    /// 是否与给定 GVK 匹配（忽略版本）
    pub fn matches(&self, gvk: &GroupVersionKind) -> bool {
        self.group == gvk.group && self.kind == gvk.kind
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// 拆分 apiVersion 为 (组, 版本)
pub fn split_api_version(api_version: &str) -> (&str, &str) {
    match api_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => ("", api_version),
    }
}

fn join_group_version(group: &str, version: &str) -> String {
    if group.is_empty() {
        version.to_string()
    } else {
        format!("{group}/{version}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_version() {
        let gvk = GroupVersionKind::from_api_version("apps/v1", "ReplicaSet");
        assert_eq!(gvk.group, "apps");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.group_version(), "apps/v1");

        // 核心组
        let gvk = GroupVersionKind::from_api_version("v1", "Pod");
        assert_eq!(gvk.group, "");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.group_version(), "v1");
    }

    #[test]
    fn test_group_resource() {
        let gvr = GroupVersionResource::gvr("kubevirt.io", "v1", "virtualmachines");
        assert_eq!(gvr.group_resource(), "virtualmachines.kubevirt.io");

        let gvr = GroupVersionResource::gvr("", "v1", "replicationcontrollers");
        assert_eq!(gvr.group_resource(), "replicationcontrollers");
    }

    #[test]
    fn test_group_kind_ignores_version() {
        let gk = GroupKind::new("kubevirt.io", "VirtualMachine");
        assert!(gk.matches(&GroupVersionKind::gvk("kubevirt.io", "v1", "VirtualMachine")));
        assert!(gk.matches(&GroupVersionKind::gvk("kubevirt.io", "v1alpha3", "VirtualMachine")));
        assert!(!gk.matches(&GroupVersionKind::gvk("kubevirt.io", "v1", "VirtualMachineInstance")));
    }
}
