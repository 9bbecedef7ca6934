// ==========================================
// 多渠道采购单跟踪系统 - 远端动作载荷
// ==========================================
// 职责: 动作请求/应答的线格式（JSON,action 判别字段）
// 红线: 线格式字段名与远端脚本一致（camelCase）,
//       应答未知字段一律保留在 extra,不丢弃
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

// ==========================================
// PushItemPayload - 推送行项目载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushItemPayload {
    pub article_code: String,
    pub qty: i64,
    pub unit_cost: f64,
}

// ==========================================
// ActionRequest - 动作请求
// ==========================================
// JSON 判别字段 "action",变体名即远端动作名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ActionRequest {
    #[serde(rename = "pushToEasyEcom", rename_all = "camelCase")]
    PushToEasyEcom {
        po_number: String,
        items: Vec<PushItemPayload>,
        is_partial: bool,
    },
    #[serde(rename = "updatePOStatus", rename_all = "camelCase")]
    UpdatePoStatus { po_number: String, status: String },
    #[serde(rename = "cancelLineItem", rename_all = "camelCase")]
    CancelLineItem {
        po_number: String,
        article_code: String,
    },
    #[serde(rename = "createZohoInvoice", rename_all = "camelCase")]
    CreateZohoInvoice { ee_reference_code: String },
    #[serde(rename = "pushToNimbus", rename_all = "camelCase")]
    PushToNimbus { ee_reference_code: String },
}

impl ActionRequest {
    /// 动作目标标识（审计日志用: 采购单号或履约参考码）
    pub fn target(&self) -> &str {
        match self {
            ActionRequest::PushToEasyEcom { po_number, .. } => po_number,
            ActionRequest::UpdatePoStatus { po_number, .. } => po_number,
            ActionRequest::CancelLineItem { po_number, .. } => po_number,
            ActionRequest::CreateZohoInvoice { ee_reference_code } => ee_reference_code,
            ActionRequest::PushToNimbus { ee_reference_code } => ee_reference_code,
        }
    }
}

// ==========================================
// ActionResponse - 动作应答
// ==========================================
// 线格式: { "status": "success"|"error", "message"?, ...extra }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    // 动作相关附加字段（如 pushToNimbus 回带 awb）
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}

impl ActionResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn message_text(&self) -> String {
        self.message.clone().unwrap_or_default()
    }

    /// 应答附带的运单号（pushToNimbus）
    pub fn awb(&self) -> Option<&str> {
        self.extra.get("awb").and_then(|v| v.as_str())
    }
}
