//! kube 类型与通用对象之间的转换

use dormant_common::{GenericObject, ResolvedKind, Result};
use kube::core::{ApiResource, DynamicObject, TypeMeta};
use serde::Serialize;

/// 将任意带类型的资源（如 k8s-openapi 的 Pod）转换为通用对象
pub fn from_resource<K: Serialize>(resource: &K) -> Result<GenericObject> {
    GenericObject::from_value(serde_json::to_value(resource)?)
}

/// 将动态对象转换为通用对象
///
/// get 响应里通常带有 apiVersion/kind，缺失时用解析出的类型补齐。
pub fn from_dynamic(mut object: DynamicObject, kind: &ResolvedKind) -> Result<GenericObject> {
    if object.types.is_none() {
        object.types = Some(TypeMeta {
            api_version: kind.gvk.group_version(),
            kind: kind.gvk.kind.clone(),
        });
    }
    GenericObject::from_value(serde_json::to_value(&object)?)
}

/// 由解析出的类型构建 kube 的 ApiResource
pub fn api_resource(kind: &ResolvedKind) -> ApiResource {
    ApiResource {
        group: kind.gvk.group.clone(),
        version: kind.gvk.version.clone(),
        api_version: kind.gvk.group_version(),
        kind: kind.gvk.kind.clone(),
        plural: kind.resource.resource.clone(),
    }
}
