// ==========================================
// 多渠道采购单跟踪系统 - 领域类型定义
// ==========================================
// 职责: 采购单/销售单状态枚举与状态文本标准化
// 红线: 展示状态一律由解析引擎重算,上游状态文本仅作输入信号
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// 状态文本标准化
// ==========================================
// 上游工作流状态为自由文本（大小写/空白不稳定）,
// 所有文本比较前先经过此函数。
pub fn normalize_status_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ==========================================
// 采购单状态 (PO Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与远端行存储一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoStatus {
    NewPo,                  // 新建采购单
    WaitingForConfirmation, // 等待确认
    ConfirmedToSend,        // 已确认待推送
    PartiallyProcessed,     // 部分已推送
    Pushed,                 // 全部已推送
    BelowThreshold,         // 低于渠道起订金额
    Cancelled,              // 已取消
}

impl fmt::Display for PoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoStatus::NewPo => write!(f, "NEW_PO"),
            PoStatus::WaitingForConfirmation => write!(f, "WAITING_FOR_CONFIRMATION"),
            PoStatus::ConfirmedToSend => write!(f, "CONFIRMED_TO_SEND"),
            PoStatus::PartiallyProcessed => write!(f, "PARTIALLY_PROCESSED"),
            PoStatus::Pushed => write!(f, "PUSHED"),
            PoStatus::BelowThreshold => write!(f, "BELOW_THRESHOLD"),
            PoStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl PoStatus {
    /// 从上游工作流状态文本解析（仅识别文本可表达的状态）
    ///
    /// PUSHED / PARTIALLY_PROCESSED 由行项目推送完成度派生,
    /// 不存在对应的上游文本,故返回 None。
    pub fn from_raw_text(raw: &str) -> Option<Self> {
        match normalize_status_text(raw).as_str() {
            "new" | "new po" => Some(PoStatus::NewPo),
            "waiting for confirmation" => Some(PoStatus::WaitingForConfirmation),
            "confirmed" | "confirmed to send" => Some(PoStatus::ConfirmedToSend),
            "below threshold" => Some(PoStatus::BelowThreshold),
            "cancelled" => Some(PoStatus::Cancelled),
            _ => None,
        }
    }

    /// 转换为上游行存储使用的状态文本（updatePOStatus 载荷用）
    pub fn to_wire_str(&self) -> &'static str {
        match self {
            PoStatus::NewPo => "New",
            PoStatus::WaitingForConfirmation => "Waiting for Confirmation",
            PoStatus::ConfirmedToSend => "Confirmed",
            PoStatus::PartiallyProcessed => "Partially Processed",
            PoStatus::Pushed => "Pushed",
            PoStatus::BelowThreshold => "Below Threshold",
            PoStatus::Cancelled => "Cancelled",
        }
    }

    /// 是否属于"开放/新建"工作流状态（推送前的可编辑区间）
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PoStatus::NewPo | PoStatus::WaitingForConfirmation | PoStatus::ConfirmedToSend
        )
    }
}

// ==========================================
// 销售单状态 (Sales Order Status)
// ==========================================
// 红线: 等级制——组状态取组内行项目的最高等级,只进不退
// 等级表: RETURNED(10) > CLOSED(8) > SHIPPED(7) > LABEL_GENERATED(6)
//        > BOX_DATA_PENDING(5) > INVOICED(4) > BATCH_CREATED(3)
//        > CONFIRMED(2) > PROCESSING(1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoStatus {
    Processing,     // 处理中（兜底）
    Confirmed,      // 已确认/开放
    BatchCreated,   // 拣配批次已创建
    Invoiced,       // 已开票
    BoxDataPending, // 已开票但缺箱数
    LabelGenerated, // 面单已生成（AWB 已分配）
    Shipped,        // 已发货
    Closed,         // 已关闭
    Returned,       // 已退回（RTO）
}

impl SoStatus {
    /// 管线等级（数值越大越靠后;9 预留,历史原因空缺）
    pub fn rank(&self) -> u8 {
        match self {
            SoStatus::Processing => 1,
            SoStatus::Confirmed => 2,
            SoStatus::BatchCreated => 3,
            SoStatus::Invoiced => 4,
            SoStatus::BoxDataPending => 5,
            SoStatus::LabelGenerated => 6,
            SoStatus::Shipped => 7,
            SoStatus::Closed => 8,
            SoStatus::Returned => 10,
        }
    }
}

// 按等级比较,而非声明顺序
impl PartialOrd for SoStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SoStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for SoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoStatus::Processing => write!(f, "PROCESSING"),
            SoStatus::Confirmed => write!(f, "CONFIRMED"),
            SoStatus::BatchCreated => write!(f, "BATCH_CREATED"),
            SoStatus::Invoiced => write!(f, "INVOICED"),
            SoStatus::BoxDataPending => write!(f, "BOX_DATA_PENDING"),
            SoStatus::LabelGenerated => write!(f, "LABEL_GENERATED"),
            SoStatus::Shipped => write!(f, "SHIPPED"),
            SoStatus::Closed => write!(f, "CLOSED"),
            SoStatus::Returned => write!(f, "RETURNED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_status_text() {
        assert_eq!(normalize_status_text("  Below   Threshold "), "below threshold");
        assert_eq!(normalize_status_text("CANCELLED"), "cancelled");
        assert_eq!(normalize_status_text(""), "");
    }

    #[test]
    fn test_po_status_from_raw_text() {
        assert_eq!(PoStatus::from_raw_text("New"), Some(PoStatus::NewPo));
        assert_eq!(
            PoStatus::from_raw_text(" waiting  for confirmation "),
            Some(PoStatus::WaitingForConfirmation)
        );
        assert_eq!(
            PoStatus::from_raw_text("Confirmed to Send"),
            Some(PoStatus::ConfirmedToSend)
        );
        // 推送完成度状态无上游文本
        assert_eq!(PoStatus::from_raw_text("Pushed"), None);
    }

    #[test]
    fn test_so_status_rank_order() {
        assert!(SoStatus::Returned > SoStatus::Closed);
        assert!(SoStatus::Shipped > SoStatus::Confirmed);
        assert!(SoStatus::BoxDataPending > SoStatus::Invoiced);
        assert_eq!(SoStatus::Returned.rank(), 10); // 9 空缺
    }
}
