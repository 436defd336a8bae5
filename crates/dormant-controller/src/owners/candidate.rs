//! 候选所有者选择
//!
//! 一个对象可能带有多个所有者引用。控制者引用（最多一个）无条件优先；
//! 否则按固定的类型优先级在非控制者引用中选择，同一类型取排在前面的引用。
//!
//! 默认优先级（由高到低）：ReplicaSet、ReplicationController、Deployment、
//! DeploymentConfig、StatefulSet、Job、VirtualMachineInstance、VirtualMachine、
//! AnsibleAutomationPlatform、AnsibleAutomationPlatformBackup，随后是配置追加的类型，
//! DaemonSet 永远排在最后。匹配只看组和类型，不看版本。

use dormant_common::{GroupKind, GroupVersionKind, OwnerReference};

/// 高优先级的内置类型，按顺序排列
const PRIMARY_KINDS: &[(&str, &str)] = &[
    ("apps", "ReplicaSet"),
    ("", "ReplicationController"),
    ("apps", "Deployment"),
    ("apps.openshift.io", "DeploymentConfig"),
    ("apps", "StatefulSet"),
    ("batch", "Job"),
    ("kubevirt.io", "VirtualMachineInstance"),
    ("kubevirt.io", "VirtualMachine"),
    ("aap.ansible.com", "AnsibleAutomationPlatform"),
    ("aap.ansible.com", "AnsibleAutomationPlatformBackup"),
];

/// 低优先级类型，排在所有其他已识别类型之后
const LOW_PRIORITY_KINDS: &[(&str, &str)] = &[("apps", "DaemonSet")];

/// 所有者类型优先级
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerPriority {
    order: Vec<GroupKind>,
}

impl Default for OwnerPriority {
    fn default() -> Self {
        Self::with_extra_kinds(std::iter::empty())
    }
}

impl OwnerPriority {
    /// 在内置顺序中插入额外类型（位于高优先级类型之后、低优先级类型之前）
    pub fn with_extra_kinds<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = GroupKind>,
    {
        let primary = PRIMARY_KINDS.iter().map(|(g, k)| GroupKind::new(g, k));
        let low = LOW_PRIORITY_KINDS.iter().map(|(g, k)| GroupKind::new(g, k));

        let mut priority = Self { order: Vec::new() };
        for kind in primary {
            priority.push_unique(kind);
        }
        for kind in extra {
            let is_low = LOW_PRIORITY_KINDS
                .iter()
                .any(|(g, k)| kind.group == *g && kind.kind == *k);
            if !is_low {
                priority.push_unique(kind);
            }
        }
        for kind in low {
            priority.push_unique(kind);
        }
        priority
    }

    fn push_unique(&mut self, kind: GroupKind) {
        if !self.order.contains(&kind) {
            self.order.push(kind);
        }
    }

    /// 类型的排名，越小越优先；未识别的类型返回 None
    pub fn rank(&self, gvk: &GroupVersionKind) -> Option<usize> {
        self.order.iter().position(|gk| gk.matches(gvk))
    }

    /// 已识别类型，按优先级排列
    pub fn kinds(&self) -> &[GroupKind] {
        &self.order
    }

    /// 从所有者引用中选出唯一的候选
    pub fn select<'a>(&self, references: &'a [OwnerReference]) -> Option<&'a OwnerReference> {
        if let Some(controller) = references.iter().find(|r| r.is_controller()) {
            return Some(controller);
        }

        references
            .iter()
            .filter_map(|r| self.rank(&r.gvk()).map(|rank| (rank, r)))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, r)| r)
    }
}
