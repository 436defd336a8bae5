//! Dormant Common - 跨模块共享的数据结构与错误处理
//!
//! 该模块提供所有者链解析所需的核心数据模型：GVK/GVR 类型标识、所有者引用、
//! 通用对象句柄以及发现接口返回的资源列表，并提供统一的错误类型。

pub mod models;
pub mod error;

/// 重新导出常用类型，方便使用
pub use error::{BoxError, Error, Result};
pub use models::discovery::*;
pub use models::gvk::*;
pub use models::object::*;
