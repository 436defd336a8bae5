//! 配置管理模块
//!
//! 该模块负责加载解析器配置，支持 YAML/JSON 格式。配置文件缺失的字段使用默认值。
//! 配置键使用 snake_case，config 会把文件中的键统一转为小写。

use anyhow::{anyhow, Context};
use config::{Config, File, FileFormat};
use dormant_common::{Error, GroupKind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::owners::DEFAULT_MAX_DEPTH;
use crate::scale::{ScaleTarget, ScaleTargetRegistry};

/// 解析器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// 最大攀爬深度
    pub max_depth: usize,
    /// 单次网络调用的超时（秒）
    pub hop_timeout_secs: Option<u64>,
    /// 额外的可暂停类型
    pub extra_scale_targets: Vec<ScaleTarget>,
    /// 额外的中间所有者类型
    pub intermediate_kinds: Vec<GroupKind>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            hop_timeout_secs: None,
            extra_scale_targets: Vec::new(),
            intermediate_kinds: Vec::new(),
        }
    }
}

impl ResolverConfig {
    /// 从文件加载配置
    pub fn load(path: &Path) -> Result<Self> {
        let config = load_config(path).map_err(|e| Error::Config(format!("{e:#}")))?;
        config.validate()?;
        info!("从 {:?} 加载解析器配置", path);
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::Config("max_depth 必须大于 0".to_string()));
        }
        if self.hop_timeout_secs == Some(0) {
            return Err(Error::Config("hop_timeout_secs 必须大于 0".to_string()));
        }
        for target in &self.extra_scale_targets {
            if target.kind.is_empty() || target.version.is_empty() || target.resource.is_empty() {
                return Err(Error::Config(format!("可暂停类型配置不完整: {:?}", target)));
            }
        }
        Ok(())
    }

    /// 单次网络调用的超时
    pub fn hop_timeout(&self) -> Option<Duration> {
        self.hop_timeout_secs.map(Duration::from_secs)
    }

    /// 按配置构建可暂停类型注册表
    pub fn scale_registry(&self) -> ScaleTargetRegistry {
        ScaleTargetRegistry::with_extra_targets(self.extra_scale_targets.iter().cloned())
    }
}

/// 读取并反序列化配置文件
fn load_config(path: &Path) -> anyhow::Result<ResolverConfig> {
    let config_file = path.to_str().ok_or_else(|| anyhow!("配置路径无效"))?;

    // 确定配置文件格式
    let format = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        Some("json") => FileFormat::Json,
        _ => return Err(anyhow!("不支持的配置文件格式，仅支持 YAML 或 JSON")),
    };

    let config = Config::builder()
        .add_source(File::new(config_file, format))
        .build()
        .with_context(|| format!("无法加载配置文件: {:?}", path))?;

    debug!("解析配置文件 {:?}", path);
    config
        .try_deserialize::<ResolverConfig>()
        .context("配置格式错误")
}
