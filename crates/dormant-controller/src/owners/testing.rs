//! 测试用的内存集群与发现实现

use async_trait::async_trait;
use dormant_common::{ApiResourceInfo, ApiResourceList, BoxError, GenericObject, ResolvedKind};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::api_resource_cache::DiscoveryClient;
use super::owner_fetcher::ResourceAccessor;
use crate::scale::builtin_scale_targets;

/// 测试集群提供的资源列表，`with_aap` 控制是否包含 AAP 组
pub fn resource_lists(with_aap: bool) -> Vec<ApiResourceList> {
    let mut by_group_version: Vec<ApiResourceList> = vec![
        ApiResourceList::new(
            "v1",
            vec![
                ApiResourceInfo::namespaced("pods", "Pod"),
                ApiResourceInfo::namespaced("pods/log", "Pod"),
                ApiResourceInfo::cluster_scoped("nodes", "Node"),
            ],
        ),
        ApiResourceList::new(
            "toolchain.dev.openshift.com/v1alpha1",
            vec![ApiResourceInfo::namespaced("idlers", "Idler")],
        ),
    ];

    for target in builtin_scale_targets() {
        if !with_aap && target.group == "aap.ansible.com" {
            continue;
        }
        let group_version = target.gvk().group_version();
        let info = ApiResourceInfo::namespaced(&target.resource, &target.kind);
        match by_group_version.iter_mut().find(|l| l.group_version == group_version) {
            Some(list) => list.resources.push(info),
            None => by_group_version.push(ApiResourceList::new(&group_version, vec![info])),
        }
    }
    by_group_version
}

/// 可切换失败的发现实现
pub struct FakeDiscovery {
    lists: Vec<ApiResourceList>,
    failure: Mutex<Option<String>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeDiscovery {
    pub fn new(lists: Vec<ApiResourceList>) -> Self {
        Self {
            lists,
            failure: Mutex::new(None),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiscoveryClient for FakeDiscovery {
    async fn server_preferred_resources(&self) -> Result<Vec<ApiResourceList>, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failure.lock().unwrap().clone();
        match failure {
            Some(message) => Err(message.into()),
            None => Ok(self.lists.clone()),
        }
    }
}

type ObjectKey = (String, String, Option<String>, String);

/// 内存中的对象存储
#[derive(Default)]
pub struct FakeCluster {
    objects: Mutex<HashMap<ObjectKey, GenericObject>>,
    failures: Mutex<HashMap<String, String>>,
    delays: Mutex<HashMap<String, Duration>>,
    gets: AtomicUsize,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, object: GenericObject) {
        let key = (
            object.gvk.group.clone(),
            object.gvk.kind.clone(),
            object.namespace.clone(),
            object.name.clone(),
        );
        self.objects.lock().unwrap().insert(key, object);
    }

    /// 读取该资源时返回给定错误
    pub fn fail_resource(&self, resource: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(resource.to_string(), message.to_string());
    }

    /// 读取该资源前等待
    pub fn delay_resource(&self, resource: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(resource.to_string(), delay);
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceAccessor for FakeCluster {
    async fn get(
        &self,
        kind: &ResolvedKind,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<GenericObject>, BoxError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let resource = &kind.resource.resource;

        let delay = self.delays.lock().unwrap().get(resource).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.failures.lock().unwrap().get(resource) {
            return Err(message.clone().into());
        }

        let key = (
            kind.gvk.group.clone(),
            kind.gvk.kind.clone(),
            namespace.map(str::to_string),
            name.to_string(),
        );
        Ok(self.objects.lock().unwrap().get(&key).cloned())
    }
}
