// ==========================================
// 多渠道采购单跟踪系统 - 销售单管线状态信号表
// ==========================================
// 职责: 单个行项目的履约信号 → 管线状态
// 红线: 信号表顺序即优先级（越靠前越接近终态）,
//       首个命中即返回;兜底 PROCESSING
// ==========================================

use crate::domain::item::OrderItem;
use crate::domain::types::{normalize_status_text, SoStatus};

// 文本信号统一在履约侧状态与物流状态上匹配
fn state_text(item: &OrderItem) -> String {
    normalize_status_text(&format!(
        "{} {}",
        item.external_order_status, item.tracking_status
    ))
}

// ==========================================
// 信号表（数据,不是控制流）
// ==========================================
struct StatusSignal {
    status: SoStatus,
    matched: fn(&OrderItem, &str) -> bool,
}

const SIGNALS: &[StatusSignal] = &[
    // 退回: RTO 字段非空,或状态文本出现退回字样
    StatusSignal {
        status: SoStatus::Returned,
        matched: |item, text| {
            !item.rto_status.trim().is_empty() || text.contains("return") || text.contains("rto")
        },
    },
    // 关闭: 履约侧完结
    StatusSignal {
        status: SoStatus::Closed,
        matched: |_, text| text.contains("closed") || text.contains("complete"),
    },
    // 发货: 状态文本或交接清单日期
    StatusSignal {
        status: SoStatus::Shipped,
        matched: |item, text| text.contains("shipped") || item.manifest_date.is_some(),
    },
    // 面单: 运单号已分配
    StatusSignal {
        status: SoStatus::LabelGenerated,
        matched: |item, _| !item.awb.trim().is_empty(),
    },
    // 已开票但缺箱数（装箱数据未回传,面单无法生成）
    StatusSignal {
        status: SoStatus::BoxDataPending,
        matched: |item, _| !item.invoice_number.trim().is_empty() && item.box_count == 0,
    },
    StatusSignal {
        status: SoStatus::Invoiced,
        matched: |item, _| !item.invoice_number.trim().is_empty(),
    },
    // 拣配批次: 批次时间戳或拣货中字样
    StatusSignal {
        status: SoStatus::BatchCreated,
        matched: |item, text| {
            item.external_batch_created_at.is_some()
                || text.contains("picking")
                || text.contains("batched")
        },
    },
    StatusSignal {
        status: SoStatus::Confirmed,
        matched: |_, text| text.contains("confirmed") || text.contains("open"),
    },
];

/// 行项目管线状态
///
/// # 规则
/// 按信号表顺序检查,首个命中即返回;均未命中按 PROCESSING。
pub fn item_pipeline_status(item: &OrderItem) -> SoStatus {
    let text = state_text(item);
    for signal in SIGNALS {
        if (signal.matched)(item, &text) {
            return signal.status;
        }
    }
    SoStatus::Processing
}
