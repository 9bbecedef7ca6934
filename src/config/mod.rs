// ==========================================
// 多渠道采购单跟踪系统 - 配置层
// ==========================================
// 职责: 渠道参数配置的加载与查询
// 红线: 查询只读;缺失回退默认,永不报错
// ==========================================

pub mod channel_config;

pub use channel_config::{ChannelConfig, ChannelRegistry};
