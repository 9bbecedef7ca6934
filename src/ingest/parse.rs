// ==========================================
// 多渠道采购单跟踪系统 - 单元格解析函数
// ==========================================
// 职责: 快照单元格文本 → 类型值
// 红线: 永不返回 Err;解析失败按缺失处理（数值 0,日期 None）,
//       失败与否的告警由行映射器负责记录
// ==========================================

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// 数值文本预清洗（去千分位逗号与货币前缀）
///
/// 快照导出里金额单元格形如 "₹1,234.50" / "Rs. 980" / "1,200"。
fn clean_numeric(raw: &str) -> String {
    let mut s = raw.trim().replace(',', "");
    for prefix in ["₹", "Rs.", "rs.", "RS.", "Rs", "INR"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim_start().to_string();
            break;
        }
    }
    s
}

/// 解析整数数量
///
/// # 规则
/// - 接受千分位逗号（"1,200" → 1200）
/// - 接受整数值的小数写法（"10.0" → 10;"10.5" 视为坏值）
/// - 解析失败返回 None,调用方决定默认值与告警
pub fn parse_i64(raw: &str) -> Option<i64> {
    let cleaned = clean_numeric(raw);
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(v) = cleaned.parse::<i64>() {
        return Some(v);
    }
    // 表格导出常把整数写成 "10.0"
    match cleaned.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.abs() < 9e18 => Some(f as i64),
        _ => None,
    }
}

/// 解析金额/单价
pub fn parse_f64(raw: &str) -> Option<f64> {
    let cleaned = clean_numeric(raw);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// 日期格式按出现频率排列,先命中先返回
const DATE_FORMATS: &[&str] = &[
    "%d %b %y", // 5 Jan 24
    "%d %b %Y", // 5 Jan 2024
    "%Y-%m-%d", // 2024-01-05 (ISO)
    "%d/%m/%Y", // 05/01/2024
    "%d-%m-%Y", // 05-01-2024
];

/// 解析日期
///
/// # 规则
/// - 至少接受 "D MMM YY" / "D MMM YYYY" / ISO-8601
/// - 带时间的 ISO 串取日期部分
/// - 失败返回 None（None 即"未知"哨兵,绝不抛错）
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    // ISO 日期时间（"2024-01-05T10:30:00Z" / "2024-01-05 10:30:00"）
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// 解析时间戳（批次创建时间等）
///
/// 仅有日期部分时按当日零点 UTC 处理。
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%d %b %Y %H:%M", "%d %b %y %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc));
        }
    }
    parse_date(trimmed)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
}
