//! 원가표 보고용 데이터(구분별 비중, 항목 순위)와 텍스트/CSV 출력.

use std::fmt::Write;

use serde::Serialize;

use crate::costing::{CostBreakdown, CostEstimate, LineItem, LineKind};

/// 원가 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CostCategory {
    Fabric,
    Submaterials,
    Processing,
    Other,
}

impl CostCategory {
    pub fn label(self) -> &'static str {
        match self {
            CostCategory::Fabric => "원단",
            CostCategory::Submaterials => "원부자재",
            CostCategory::Processing => "임가공비",
            CostCategory::Other => "기타비용",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: CostCategory,
    pub amount: f64,
    /// 총원가 대비 비율(0~1)
    pub ratio: f64,
}

/// 총원가를 구분별로 나눈다. 기타비용은 0이면 빠진다.
pub fn category_shares(estimate: &CostEstimate) -> Vec<CategoryShare> {
    let total = estimate.total_cost;
    let mut parts = vec![
        (CostCategory::Fabric, estimate.fabric_cost_total),
        (CostCategory::Submaterials, estimate.submaterials_total),
        (CostCategory::Processing, estimate.processing_total),
    ];
    if estimate.other_total > 0.0 {
        parts.push((CostCategory::Other, estimate.other_total));
    }
    parts
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            ratio: if total > 0.0 { amount / total } else { 0.0 },
        })
        .collect()
}

/// 개별 원가 항목을 금액 내림차순으로 정렬한다. 같은 금액은 원래 순서를 유지한다.
pub fn ranked_line_items(breakdown: &CostBreakdown) -> Vec<&LineItem> {
    let mut items: Vec<&LineItem> = breakdown.iter().filter(|l| l.kind.is_cost_item()).collect();
    items.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    items
}

const BAR_WIDTH: usize = 30;

fn bar(amount: f64, max: f64) -> String {
    let len = if max > 0.0 {
        ((amount / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "█".repeat(len.min(BAR_WIDTH))
}

/// 원가표와 구분별 비중, 항목 막대그래프를 텍스트로 만든다.
pub fn render_text(estimate: &CostEstimate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== 원가 계산 결과 ==");
    for line in estimate.breakdown.iter() {
        let marker = match line.kind {
            LineKind::TotalCost | LineKind::FinalPrice => "* ",
            _ => "  ",
        };
        let _ = writeln!(out, "{marker}{}: {:.2} 원", line.label, line.amount);
    }
    let _ = writeln!(out, "\n== 구분별 비중 ==");
    for share in category_shares(estimate) {
        let _ = writeln!(
            out,
            "  {:<8} {:>10.2} 원 ({:>5.1}%)",
            share.category.label(),
            share.amount,
            share.ratio * 100.0
        );
    }
    let _ = writeln!(out, "\n== 항목별 원가 ==");
    let ranked = ranked_line_items(&estimate.breakdown);
    let max = ranked.first().map(|l| l.amount).unwrap_or(0.0);
    for item in ranked {
        let _ = writeln!(out, "  {:>10.2} {} {}", item.amount, bar(item.amount, max), item.label);
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// 원가표를 `항목,금액` CSV로 내보낸다.
pub fn to_csv(estimate: &CostEstimate) -> String {
    let mut out = String::from("항목,금액\n");
    for line in estimate.breakdown.iter() {
        let _ = writeln!(out, "{},{:.2}", csv_field(&line.label), line.amount);
    }
    out
}
