// ==========================================
// 多渠道采购单跟踪系统 - 动作可用性判定
// ==========================================
// 职责: 采购单（已重算状态）+ 渠道配置 → 主动作与操作开关
// 红线: 关联未补齐前绝不给出推送动作;
//       已推送后绝不给出破坏性动作;规则顺序即优先级
// ==========================================

use crate::config::channel_config::ChannelConfig;
use crate::domain::action::{ActionEligibility, PrimaryAction};
use crate::domain::purchase_order::PurchaseOrder;
use crate::domain::types::PoStatus;

// ==========================================
// 主动作规则表（数据,不是控制流）
// ==========================================
struct ActionRule {
    action: PrimaryAction,
    enabled: bool,
    check: fn(&PurchaseOrder) -> Option<String>,
}

const PRIMARY_RULES: &[ActionRule] = &[
    // 终态: 按钮禁用,仅显示状态
    ActionRule {
        action: PrimaryAction::Cancelled,
        enabled: false,
        check: |po| (po.status == PoStatus::Cancelled).then(|| "采购单已取消".to_string()),
    },
    ActionRule {
        action: PrimaryAction::BelowThreshold,
        enabled: false,
        check: |po| (po.status == PoStatus::BelowThreshold).then(|| "低于渠道起订金额".to_string()),
    },
    ActionRule {
        action: PrimaryAction::Track,
        enabled: true,
        check: |po| (po.status == PoStatus::Pushed).then(|| "已全部推送, 可跟踪".to_string()),
    },
    // 身份关联检查先于推送: 关联缺失时推送必然失败
    ActionRule {
        action: PrimaryAction::SyncContact,
        enabled: true,
        check: |po| (!po.has_contact_linkage()).then(|| "开票联系人未同步".to_string()),
    },
    ActionRule {
        action: PrimaryAction::MapCustomer,
        enabled: true,
        check: |po| (!po.has_customer_linkage()).then(|| "履约客户未映射".to_string()),
    },
    ActionRule {
        action: PrimaryAction::Push,
        enabled: true,
        check: |po| po.status.is_open().then(|| format!("状态 {} 可推送", po.status)),
    },
    // 兜底: 只读查看（含 PARTIALLY_PROCESSED）
    ActionRule {
        action: PrimaryAction::View,
        enabled: true,
        check: |_| Some("无可执行动作, 仅查看".to_string()),
    },
];

/// 判定采购单动作可用性
///
/// # 参数
/// - po: 已重算状态的采购单
/// - config: 该单渠道的配置
/// - has_staged_items: 是否有行项目已勾选待推送（调用方 UI 状态）
pub fn evaluate(
    po: &PurchaseOrder,
    config: &ChannelConfig,
    has_staged_items: bool,
) -> ActionEligibility {
    let mut reasons = Vec::new();

    let can_mark_below_threshold =
        po.status == PoStatus::NewPo && po.amount < config.min_order_threshold;

    let cancellable_status = matches!(
        po.status,
        PoStatus::NewPo | PoStatus::BelowThreshold | PoStatus::WaitingForConfirmation
    );
    let can_cancel = cancellable_status && !has_staged_items;
    if cancellable_status && has_staged_items {
        reasons.push("取消不可用: 已有行项目勾选待推送".to_string());
    }

    let can_confirm = matches!(
        po.status,
        PoStatus::NewPo | PoStatus::WaitingForConfirmation
    );

    let (primary, enabled) = resolve_primary(po, &mut reasons);

    ActionEligibility {
        primary,
        enabled,
        label: crate::i18n::t(primary.label_key()),
        reasons,
        can_mark_below_threshold,
        can_cancel,
        can_confirm,
    }
}

fn resolve_primary(po: &PurchaseOrder, reasons: &mut Vec<String>) -> (PrimaryAction, bool) {
    for rule in PRIMARY_RULES {
        if let Some(detail) = (rule.check)(po) {
            reasons.push(format!("{:?}: {}", rule.action, detail));
            return (rule.action, rule.enabled);
        }
    }
    // 表尾规则无条件命中,此处不可达
    (PrimaryAction::View, true)
}
