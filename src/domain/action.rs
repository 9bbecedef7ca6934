// ==========================================
// 多渠道采购单跟踪系统 - 动作领域模型
// ==========================================
// 职责: 主动作判定结果 + 远端动作审计日志
// 红线: 所有远端提交必须记录;判定结果必须携带理由
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

// ==========================================
// PrimaryAction - 主动作
// ==========================================
// 用途: 每张采购单解析出唯一主动作（跟踪页按钮）
// CANCELLED / BELOW_THRESHOLD 为禁用态,按钮仅显示状态文案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryAction {
    Push,           // 推送到履约系统
    Track,          // 查看物流跟踪
    SyncContact,    // 同步开票联系人
    MapCustomer,    // 映射履约客户
    View,           // 查看详情
    Cancelled,      // 已取消（禁用）
    BelowThreshold, // 低于起订额（禁用）
}

impl PrimaryAction {
    /// 按钮文案的 i18n 键
    pub fn label_key(&self) -> &'static str {
        match self {
            PrimaryAction::Push => "action.push",
            PrimaryAction::Track => "action.track",
            PrimaryAction::SyncContact => "action.sync_contact",
            PrimaryAction::MapCustomer => "action.map_customer",
            PrimaryAction::View => "action.view",
            PrimaryAction::Cancelled => "action.cancelled",
            PrimaryAction::BelowThreshold => "action.below_threshold",
        }
    }
}

// ==========================================
// ActionEligibility - 动作判定结果
// ==========================================
// 用途: engine::eligibility 输出;reasons 记录命中规则,可解释
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEligibility {
    pub primary: PrimaryAction,   // 主动作
    pub enabled: bool,            // 主动作按钮是否可用
    pub label: String,            // 本地化按钮文案
    pub reasons: Vec<String>,     // 判定理由（命中规则描述）
    pub can_mark_below_threshold: bool, // 可标记低于起订额
    pub can_cancel: bool,         // 可取消
    pub can_confirm: bool,        // 可确认
}

// ==========================================
// ActionKind - 远端动作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    PushToEasyEcom,     // 推送采购单到履约系统
    MarkBelowThreshold, // 标记低于起订额
    UpdatePoStatus,     // 更新采购单工作流状态
    CancelLineItem,     // 取消行项目
    CreateZohoInvoice,  // 创建开票系统发票
    PushToNimbus,       // 推送到物流聚合商
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::PushToEasyEcom => "PushToEasyEcom",
            ActionKind::MarkBelowThreshold => "MarkBelowThreshold",
            ActionKind::UpdatePoStatus => "UpdatePoStatus",
            ActionKind::CancelLineItem => "CancelLineItem",
            ActionKind::CreateZohoInvoice => "CreateZohoInvoice",
            ActionKind::PushToNimbus => "PushToNimbus",
        }
    }
}

// ==========================================
// ActionLog - 远端动作审计日志
// ==========================================
// 红线: 提交一次记一条,成功失败都记
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub log_id: String,            // 日志ID（UUID）
    pub kind: ActionKind,          // 动作类型
    pub target: String,            // 目标（采购单号或履约参考码）
    pub success: bool,             // 远端是否受理
    pub message: String,           // 远端回执消息
    pub payload_json: Option<JsonValue>, // 提交载荷（JSON）
    pub logged_at: DateTime<Utc>,  // 记录时间
}

impl ActionLog {
    /// 创建新的审计日志（未定结果,提交后用 succeeded/failed 收尾）
    pub fn new(kind: ActionKind, target: &str) -> Self {
        Self {
            log_id: Uuid::new_v4().to_string(),
            kind,
            target: target.to_string(),
            success: false,
            message: String::new(),
            payload_json: None,
            logged_at: Utc::now(),
        }
    }

    /// 附加提交载荷（转 JSON）
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Self {
        self.payload_json = serde_json::to_value(payload).ok();
        self
    }

    /// 标记提交成功
    pub fn succeeded(mut self, message: &str) -> Self {
        self.success = true;
        self.message = message.to_string();
        self
    }

    /// 标记提交失败
    pub fn failed(mut self, message: &str) -> Self {
        self.success = false;
        self.message = message.to_string();
        self
    }
}
