// ==========================================
// 多渠道采购单跟踪系统 - 渠道配置
// ==========================================
// 职责: 渠道起订金额等参数的加载与查询
// 红线: 配置缺失一律回退默认值,查询永不失败;
//       引擎只读,不提供运行时写入
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

// ==========================================
// ChannelConfig - 单渠道配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub channel: String,          // 渠道名
    pub min_order_threshold: f64, // 起订金额（低于此值可标记 BELOW_THRESHOLD）
}

// 渠道名比较不区分大小写与空白
fn normalize_channel(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// 配置文件结构
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    default_threshold: f64,
    #[serde(default)]
    channels: Vec<ChannelConfig>,
}

// ==========================================
// ChannelRegistry - 渠道配置注册表
// ==========================================
// 查询语义: 未配置的渠道按默认起订金额返回
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    configs: HashMap<String, ChannelConfig>,
    default_threshold: f64,
}

impl ChannelRegistry {
    pub fn new(default_threshold: f64) -> Self {
        Self {
            configs: HashMap::new(),
            default_threshold,
        }
    }

    pub fn insert(&mut self, config: ChannelConfig) {
        self.configs.insert(normalize_channel(&config.channel), config);
    }

    /// 从 JSON 文件加载
    ///
    /// 文件格式:
    /// ```json
    /// {
    ///   "default_threshold": 0,
    ///   "channels": [
    ///     { "channel": "Blinkit", "min_order_threshold": 5000.0 }
    ///   ]
    /// }
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("读取渠道配置失败: {}", path.display()))?;
        let file: RegistryFile = serde_json::from_str(&raw)
            .with_context(|| format!("渠道配置格式错误: {}", path.display()))?;

        let mut registry = Self::new(file.default_threshold);
        for config in file.channels {
            registry.insert(config);
        }
        debug!(channels = registry.configs.len(), "渠道配置加载完成");
        Ok(registry)
    }

    /// 查询渠道配置（未配置按默认起订金额）
    pub fn get(&self, channel: &str) -> ChannelConfig {
        match self.configs.get(&normalize_channel(channel)) {
            Some(config) => config.clone(),
            None => {
                debug!(channel, "渠道未配置起订金额, 使用默认值");
                ChannelConfig {
                    channel: channel.to_string(),
                    min_order_threshold: self.default_threshold,
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
