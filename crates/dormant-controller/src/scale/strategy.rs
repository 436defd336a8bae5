//! 暂停策略
//!
//! 描述外部暂停/恢复逻辑对某种类型应采用的变更方式。这里只做描述，不修改集群。

use serde::{Deserialize, Serialize};

/// 暂停策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleStrategy {
    /// 将副本数缩到 0
    Replicas,
    /// 设置 Job 的 suspend 标记
    Suspend,
    /// 通过不可满足的节点选择器让 DaemonSet 不再调度
    NodeSelector,
    /// 将虚拟机的运行策略设为停止
    RunStrategy,
    /// 设置 AAP 的 idle 标记
    Idle,
}

impl ScaleStrategy {
    /// 该策略涉及字段的 JSON Pointer
    pub fn field_path(&self) -> &'static str {
        match self {
            ScaleStrategy::Replicas => "/spec/replicas",
            ScaleStrategy::Suspend => "/spec/suspend",
            ScaleStrategy::NodeSelector => "/spec/template/spec/nodeSelector",
            ScaleStrategy::RunStrategy => "/spec/runStrategy",
            ScaleStrategy::Idle => "/spec/idle_aap",
        }
    }

    /// 是否为调整副本数的策略
    pub fn is_replica_based(&self) -> bool {
        matches!(self, ScaleStrategy::Replicas)
    }
}
