//! 数据模型模块
//!
//! 该模块定义了 Dormant 项目中使用的核心数据模型，包括类型标识、通用对象句柄
//! 和发现结果，并提供序列化/反序列化功能。

pub mod discovery;
pub mod gvk;
pub mod object;
