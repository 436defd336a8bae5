//! 可暂停类型模块
//!
//! 该模块维护空闲子系统可以暂停/恢复的类型表，以及每种类型对应的暂停策略。

mod registry;
mod strategy;

pub use registry::{builtin_scale_targets, ScaleTarget, ScaleTargetRegistry};
pub use strategy::ScaleStrategy;
