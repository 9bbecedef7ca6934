// ==========================================
// 多渠道采购单跟踪系统 - 缺货领域模型
// ==========================================
// 职责: 未推送需求与库存对比的缺口记录
// 红线: shortfall 永不为负;缺口为 0 的 SKU 不产出记录
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 库存水平表（master_sku → 可用库存,精确匹配）
pub type StockLevels = HashMap<String, i64>;

// ==========================================
// ShortfallRecord - 缺货记录
// ==========================================
// 用途: 备货页展示;engine::shortfall 按 SKU 汇总未推送需求后产出
// channel_demand 用有序映射,序列化输出按渠道名稳定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortfallRecord {
    pub master_sku: String,                  // 主 SKU
    pub total_required: i64,                 // 未推送需求合计
    pub channel_demand: BTreeMap<String, i64>, // 分渠道需求
    pub stock: i64,                          // 当前库存（缺记录按 0）
    pub shortfall: i64,                      // 缺口 = max(0, 需求 − 库存)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_demand_serializes_sorted() {
        let mut demand = BTreeMap::new();
        demand.insert("Zepto".to_string(), 15);
        demand.insert("Blinkit".to_string(), 10);
        let rec = ShortfallRecord {
            master_sku: "SKU-1".to_string(),
            total_required: 25,
            channel_demand: demand,
            stock: 12,
            shortfall: 13,
        };
        let json = serde_json::to_string(&rec).unwrap();
        // BTreeMap 按键序输出,Blinkit 在 Zepto 前
        let blinkit = json.find("Blinkit").unwrap();
        let zepto = json.find("Zepto").unwrap();
        assert!(blinkit < zepto);
    }
}
