//! 错误处理模块
//!
//! 该模块提供 Dormant 项目的统一错误处理机制。所有者链解析过程中的每一种失败
//! （发现失败、未知类型、祖先不存在、读取失败、链过深、取消）都对应一个错误变体，
//! 调用方可以据此区分处理。

use thiserror::Error;

/// 外部协作方（发现接口、资源访问接口）返回的原始错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dormant 统一错误类型
#[derive(Error, Debug)]
pub enum Error {
    /// 首次发现调用失败，原样透出底层错误
    #[error(transparent)]
    Discovery(BoxError),

    /// 已填充的缓存中没有该类型
    #[error("no resource found for kind {kind} in {group_version}")]
    UnknownKind {
        /// 类型名称
        kind: String,
        /// 组/版本，如 apps/v1
        group_version: String,
    },

    /// 祖先对象在集群中不存在
    #[error("{resource} \"{name}\" not found")]
    NotFound {
        /// 资源复数名（带组后缀），如 replicasets.apps
        resource: String,
        /// 对象名称
        name: String,
    },

    /// 读取祖先对象时的其他错误，原样透出
    #[error(transparent)]
    Fetch(BoxError),

    /// 所有者链超过最大深度
    #[error("owner chain exceeds max depth {max_depth}")]
    ChainTooDeep {
        /// 允许的最大深度
        max_depth: usize,
    },

    /// 调用方取消了解析
    #[error("owner resolution cancelled")]
    Cancelled,

    /// 调用超过截止时间
    #[error("owner resolution deadline exceeded")]
    DeadlineExceeded,

    /// 配置错误
    #[error("invalid configuration: {0}")]
    Config(String),

    /// 序列化/反序列化错误
    #[error("serialization error: {0}")]
    Serialization(String),

    /// JSON 错误
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 是否为“对象不存在”错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// 是否由调用方的取消或截止时间引起
    pub fn is_context_error(&self) -> bool {
        matches!(self, Error::Cancelled | Error::DeadlineExceeded)
    }
}

/// Dormant 结果类型别名
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_errors_keep_message() {
        let err = Error::Discovery("some error".into());
        assert_eq!(err.to_string(), "some error");

        let err = Error::Fetch("forbidden".into());
        assert_eq!(err.to_string(), "forbidden");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unknown_kind_message() {
        let err = Error::UnknownKind {
            kind: "AnsibleAutomationPlatform".to_string(),
            group_version: "aap.ansible.com/v1alpha1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no resource found for kind AnsibleAutomationPlatform in aap.ansible.com/v1alpha1"
        );
    }

    #[test]
    fn test_not_found_classification() {
        let err = Error::NotFound {
            resource: "replicasets.apps".to_string(),
            name: "test-replica".to_string(),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("replicasets"));
        assert!(err.to_string().contains("test-replica"));
        assert!(Error::Cancelled.is_context_error());
    }

    #[test]
    fn test_depth_and_context_messages() {
        let err = Error::ChainTooDeep { max_depth: 10 };
        assert_eq!(err.to_string(), "owner chain exceeds max depth 10");
        assert!(!err.is_context_error());

        assert_eq!(Error::Cancelled.to_string(), "owner resolution cancelled");
        assert_eq!(Error::DeadlineExceeded.to_string(), "owner resolution deadline exceeded");
        assert!(Error::DeadlineExceeded.is_context_error());
    }
}
