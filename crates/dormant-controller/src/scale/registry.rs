//! 可暂停类型注册表
//!
//! 空闲子系统能够暂停/恢复的类型的固定表，构造后不再修改。
//! 扩展空闲支持到新的工作负载类型只需在这里增加一条记录；
//! 如果是自定义资源，还需要集群提供该资源，发现才能解析它。

use dormant_common::{GroupKind, GroupVersionKind, GroupVersionResource, OwnerEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::strategy::ScaleStrategy;

/// 注册表中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleTarget {
    /// 组，核心组为空
    #[serde(default)]
    pub group: String,
    /// 版本
    pub version: String,
    /// 类型
    pub kind: String,
    /// 资源复数名
    pub resource: String,
    /// 暂停策略
    pub strategy: ScaleStrategy,
}

impl ScaleTarget {
    /// 创建新的记录
    pub fn new(group: &str, version: &str, kind: &str, resource: &str, strategy: ScaleStrategy) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
            resource: resource.to_string(),
            strategy,
        }
    }

    /// 类型标识
    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.group, &self.version, &self.kind)
    }

    /// 资源坐标
    pub fn gvr(&self) -> GroupVersionResource {
        GroupVersionResource::gvr(&self.group, &self.version, &self.resource)
    }
}

/// 内置的可暂停类型
pub fn builtin_scale_targets() -> Vec<ScaleTarget> {
    use ScaleStrategy::*;

    vec![
        ScaleTarget::new("apps", "v1", "Deployment", "deployments", Replicas),
        ScaleTarget::new("apps", "v1", "ReplicaSet", "replicasets", Replicas),
        ScaleTarget::new("apps", "v1", "DaemonSet", "daemonsets", NodeSelector),
        ScaleTarget::new("apps", "v1", "StatefulSet", "statefulsets", Replicas),
        ScaleTarget::new("batch", "v1", "Job", "jobs", Suspend),
        ScaleTarget::new("apps.openshift.io", "v1", "DeploymentConfig", "deploymentconfigs", Replicas),
        ScaleTarget::new("", "v1", "ReplicationController", "replicationcontrollers", Replicas),
        ScaleTarget::new("kubevirt.io", "v1", "VirtualMachine", "virtualmachines", RunStrategy),
        ScaleTarget::new("kubevirt.io", "v1", "VirtualMachineInstance", "virtualmachineinstances", RunStrategy),
        ScaleTarget::new("aap.ansible.com", "v1alpha1", "AnsibleAutomationPlatform", "ansibleautomationplatforms", Idle),
        ScaleTarget::new(
            "aap.ansible.com",
            "v1alpha1",
            "AnsibleAutomationPlatformBackup",
            "ansibleautomationplatformbackups",
            Idle,
        ),
    ]
}

/// 可暂停类型注册表
#[derive(Debug, Clone)]
pub struct ScaleTargetRegistry {
    /// 注册顺序
    targets: Vec<ScaleTarget>,
    /// GVK 到记录下标
    by_gvk: HashMap<GroupVersionKind, usize>,
}

impl Default for ScaleTargetRegistry {
    fn default() -> Self {
        Self::new(builtin_scale_targets())
    }
}

impl ScaleTargetRegistry {
    /// 由记录列表构建，同一 GVK 以先出现者为准
    pub fn new<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = ScaleTarget>,
    {
        let mut registry = Self {
            targets: Vec::new(),
            by_gvk: HashMap::new(),
        };
        for target in targets {
            let gvk = target.gvk();
            if registry.by_gvk.contains_key(&gvk) {
                debug!("忽略重复的可暂停类型 {}", gvk);
                continue;
            }
            registry.by_gvk.insert(gvk, registry.targets.len());
            registry.targets.push(target);
        }
        registry
    }

    /// 内置记录加额外记录
    pub fn with_extra_targets<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = ScaleTarget>,
    {
        Self::new(builtin_scale_targets().into_iter().chain(extra))
    }

    /// 是否为可暂停类型
    pub fn is_scale_target(&self, gvk: &GroupVersionKind) -> bool {
        self.by_gvk.contains_key(gvk)
    }

    /// 类型的资源坐标
    pub fn coordinates_for(&self, gvk: &GroupVersionKind) -> Option<GroupVersionResource> {
        self.get(gvk).map(ScaleTarget::gvr)
    }

    /// 类型的暂停策略
    pub fn strategy_for(&self, gvk: &GroupVersionKind) -> Option<ScaleStrategy> {
        self.get(gvk).map(|t| t.strategy)
    }

    /// 查找记录
    pub fn get(&self, gvk: &GroupVersionKind) -> Option<&ScaleTarget> {
        self.by_gvk.get(gvk).map(|&i| &self.targets[i])
    }

    /// 注册的组/类型，按注册顺序去重
    pub fn group_kinds(&self) -> Vec<GroupKind> {
        let mut kinds: Vec<GroupKind> = Vec::new();
        for target in &self.targets {
            let gk = GroupKind::new(&target.group, &target.kind);
            if !kinds.contains(&gk) {
                kinds.push(gk);
            }
        }
        kinds
    }

    /// 链中离起点最近的可暂停祖先
    pub fn nearest_target<'a>(&self, chain: &'a [OwnerEntry]) -> Option<&'a OwnerEntry> {
        chain.iter().find(|e| self.is_scale_target(e.gvk()))
    }

    /// 链中离起点最远的可暂停祖先
    pub fn topmost_target<'a>(&self, chain: &'a [OwnerEntry]) -> Option<&'a OwnerEntry> {
        chain.iter().rev().find(|e| self.is_scale_target(e.gvk()))
    }

    /// 记录数量
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
