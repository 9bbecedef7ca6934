// ==========================================
// 多渠道采购单跟踪系统 - 采购单状态规则表
// ==========================================
// 职责: 原始工作流状态 + 行项目画像 → 展示状态
// 红线: 无状态、无副作用、无 I/O;规则顺序即优先级,
//       首个命中即返回;每次判定必须产出理由
// ==========================================

use crate::domain::item::OrderItem;
use crate::domain::types::{normalize_status_text, PoStatus};

// ==========================================
// ItemProfile - 行项目画像
// ==========================================
// 规则判定只需要计数口径,整单扫描一次预计算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemProfile {
    pub item_count: usize,          // 行项目总数
    pub active_count: usize,        // 活跃行数（未取消）
    pub pushed_active_count: usize, // 已推送的活跃行数
}

impl ItemProfile {
    pub fn of(items: &[OrderItem]) -> Self {
        let mut profile = Self {
            item_count: items.len(),
            active_count: 0,
            pushed_active_count: 0,
        };
        for item in items {
            if item.is_cancelled() {
                continue;
            }
            profile.active_count += 1;
            if item.is_pushed() {
                profile.pushed_active_count += 1;
            }
        }
        profile
    }
}

// ==========================================
// 规则表（数据,不是控制流）
// ==========================================
// 谓词命中返回理由明细,未命中返回 None
type RuleCheck = fn(&str, &ItemProfile) -> Option<String>;

struct StatusRule {
    status: PoStatus,
    check: RuleCheck,
}

// 规则顺序承载优先级,调整顺序即调整语义
const RULES: &[StatusRule] = &[
    StatusRule { status: PoStatus::Cancelled, check: rule_cancelled },
    StatusRule { status: PoStatus::BelowThreshold, check: rule_below_threshold },
    StatusRule { status: PoStatus::Pushed, check: rule_pushed },
    StatusRule { status: PoStatus::PartiallyProcessed, check: rule_partially_processed },
    StatusRule { status: PoStatus::ConfirmedToSend, check: rule_confirmed },
    StatusRule { status: PoStatus::WaitingForConfirmation, check: rule_waiting },
    StatusRule { status: PoStatus::NewPo, check: rule_default_new },
];

fn rule_cancelled(raw: &str, profile: &ItemProfile) -> Option<String> {
    if raw == "cancelled" {
        return Some("原始状态为 cancelled".to_string());
    }
    if profile.item_count > 0 && profile.active_count == 0 {
        return Some("行项目全部已取消".to_string());
    }
    None
}

fn rule_below_threshold(raw: &str, _profile: &ItemProfile) -> Option<String> {
    (raw == "below threshold").then(|| "原始状态为 below threshold".to_string())
}

fn rule_pushed(_raw: &str, profile: &ItemProfile) -> Option<String> {
    (profile.active_count >= 1 && profile.pushed_active_count == profile.active_count).then(|| {
        format!(
            "活跃行 {}/{} 已推送",
            profile.pushed_active_count, profile.active_count
        )
    })
}

fn rule_partially_processed(_raw: &str, profile: &ItemProfile) -> Option<String> {
    // 前一条规则未命中,此处必然 pushed < active
    (profile.active_count >= 1 && profile.pushed_active_count >= 1).then(|| {
        format!(
            "活跃行 {}/{} 已推送",
            profile.pushed_active_count, profile.active_count
        )
    })
}

fn rule_confirmed(raw: &str, _profile: &ItemProfile) -> Option<String> {
    (raw == "confirmed" || raw == "confirmed to send")
        .then(|| format!("原始状态为 {}", raw))
}

fn rule_waiting(raw: &str, _profile: &ItemProfile) -> Option<String> {
    (raw == "waiting for confirmation").then(|| "原始状态为 waiting for confirmation".to_string())
}

fn rule_default_new(_raw: &str, _profile: &ItemProfile) -> Option<String> {
    Some("无规则命中, 默认新建".to_string())
}

/// 解析采购单展示状态
///
/// # 规则
/// 按规则表顺序逐条检查,首个命中即返回。
/// 同一快照输入必得同一输出（幂等,无时钟无随机）。
///
/// # 返回
/// - (PoStatus, Vec<String>): 状态 + 判定理由
pub fn resolve_status(raw_status: &str, items: &[OrderItem]) -> (PoStatus, Vec<String>) {
    let normalized = normalize_status_text(raw_status);
    let profile = ItemProfile::of(items);

    for rule in RULES {
        if let Some(detail) = (rule.check)(&normalized, &profile) {
            let reasons = vec![format!("{}: {}", rule.status, detail)];
            return (rule.status, reasons);
        }
    }
    // 表尾规则无条件命中,此处不可达
    (PoStatus::NewPo, vec!["NEW_PO: 兜底".to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: i64, status: &str, pushed: bool) -> OrderItem {
        let mut it = OrderItem::default();
        it.article_code = format!("ART-{}", qty);
        it.qty = qty;
        it.item_status = status.to_string();
        if pushed {
            it.external_reference_code = "EE-1".to_string();
        }
        it
    }

    #[test]
    fn test_cancelled_by_raw_text() {
        let items = vec![item(5, "New", true)];
        let (status, reasons) = resolve_status(" Cancelled ", &items);
        assert_eq!(status, PoStatus::Cancelled);
        assert!(reasons[0].starts_with("CANCELLED:"));
    }

    #[test]
    fn test_cancelled_by_all_items_cancelled() {
        let items = vec![item(5, "Cancelled", false), item(3, "cancelled", true)];
        let (status, _) = resolve_status("New", &items);
        assert_eq!(status, PoStatus::Cancelled);
    }

    #[test]
    fn test_empty_item_list_not_cancelled() {
        // 空行项目列表不触发"全部取消"
        let (status, _) = resolve_status("New", &[]);
        assert_eq!(status, PoStatus::NewPo);
    }

    #[test]
    fn test_below_threshold() {
        let (status, _) = resolve_status("Below  Threshold", &[item(1, "New", false)]);
        assert_eq!(status, PoStatus::BelowThreshold);
    }

    #[test]
    fn test_pushed_all_active() {
        let items = vec![item(5, "New", true), item(3, "New", true)];
        let (status, reasons) = resolve_status("New", &items);
        assert_eq!(status, PoStatus::Pushed);
        assert!(reasons[0].contains("2/2"));
    }

    #[test]
    fn test_pushed_precedes_confirmed() {
        // 全部已推送时,即使原始状态是 Confirmed 也判 PUSHED
        let items = vec![item(5, "Confirmed", true), item(3, "Confirmed", true)];
        let (status, _) = resolve_status("Confirmed", &items);
        assert_eq!(status, PoStatus::Pushed);
    }

    #[test]
    fn test_cancelled_item_excluded_from_push_check() {
        // 取消行不参与推送完成度;活跃行均未推送 → NEW_PO
        let items = vec![item(10, "New", false), item(5, "Cancelled", false)];
        let (status, _) = resolve_status("New", &items);
        assert_eq!(status, PoStatus::NewPo);
    }

    #[test]
    fn test_partially_processed() {
        let items = vec![item(5, "New", true), item(3, "New", false)];
        let (status, reasons) = resolve_status("New", &items);
        assert_eq!(status, PoStatus::PartiallyProcessed);
        assert!(reasons[0].contains("1/2"));
    }

    #[test]
    fn test_confirmed_variants() {
        let items = vec![item(5, "Confirmed", false)];
        let (a, _) = resolve_status("Confirmed", &items);
        let (b, _) = resolve_status("confirmed to send", &items);
        assert_eq!(a, PoStatus::ConfirmedToSend);
        assert_eq!(b, PoStatus::ConfirmedToSend);
    }

    #[test]
    fn test_waiting_for_confirmation() {
        let (status, _) = resolve_status("Waiting for Confirmation", &[item(1, "", false)]);
        assert_eq!(status, PoStatus::WaitingForConfirmation);
    }

    #[test]
    fn test_unknown_raw_defaults_new() {
        let (status, _) = resolve_status("随便什么", &[item(1, "", false)]);
        assert_eq!(status, PoStatus::NewPo);
    }

    #[test]
    fn test_idempotent() {
        let items = vec![item(5, "New", true), item(3, "Cancelled", false)];
        let first = resolve_status("Confirmed", &items);
        let second = resolve_status("Confirmed", &items);
        assert_eq!(first, second);
    }

    #[test]
    fn test_item_order_irrelevant() {
        let a = vec![item(5, "New", true), item(3, "New", false)];
        let b = vec![item(3, "New", false), item(5, "New", true)];
        assert_eq!(resolve_status("New", &a).0, resolve_status("New", &b).0);
    }

    #[test]
    fn test_profile_counts() {
        let items = vec![
            item(5, "New", true),
            item(3, "Cancelled", true),
            item(2, "Confirmed", false),
        ];
        let profile = ItemProfile::of(&items);
        assert_eq!(profile.item_count, 3);
        assert_eq!(profile.active_count, 2);
        assert_eq!(profile.pushed_active_count, 1);
    }
}
