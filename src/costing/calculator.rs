use std::collections::HashSet;

use thiserror::Error;

use super::labels;
use super::model::*;
use super::rounding::{round2, round_to_tens};

/// 원단 손실률 (5%)
pub const FABRIC_LOSS_RATE: f64 = 0.05;
/// 기타비용 최대 개수
pub const MAX_OTHER_COSTS: usize = 3;

/// 원가 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    /// 입력값 오류
    #[error("입력 오류: {0}")]
    InvalidInput(String),
    /// 원가 표 설정 오류
    #[error("원가 표 설정 오류: {0}")]
    Configuration(String),
}

fn require_positive(name: &str, value: f64) -> Result<(), CostError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CostError::InvalidInput(format!(
            "{name}은(는) 0보다 커야 합니다 (입력값 {value})"
        )));
    }
    Ok(())
}

fn require_non_negative(name: &str, value: f64) -> Result<(), CostError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CostError::InvalidInput(format!(
            "{name}은(는) 0 이상이어야 합니다 (입력값 {value})"
        )));
    }
    Ok(())
}

/// 원가 표를 검증한다. `seen`에는 앞서 검증한 표의 라벨이 쌓인다.
fn validate_table<'a>(
    name: &str,
    lines: &'a [CostLine],
    seen: &mut HashSet<&'a str>,
) -> Result<(), CostError> {
    if lines.is_empty() {
        return Err(CostError::Configuration(format!("{name} 표가 비어 있습니다")));
    }
    for line in lines {
        let label = line.label.trim();
        if label.is_empty() {
            return Err(CostError::Configuration(format!(
                "{name} 표에 이름 없는 항목이 있습니다"
            )));
        }
        if labels::is_reserved(label) {
            return Err(CostError::Configuration(format!(
                "{name} 표의 '{label}'은(는) 예약된 이름입니다"
            )));
        }
        if !seen.insert(label) {
            return Err(CostError::Configuration(format!(
                "{name} 표의 '{label}' 항목이 다른 항목과 중복됩니다"
            )));
        }
        require_non_negative(&format!("{name} '{label}'"), line.amount)?;
    }
    Ok(())
}

/// 빈 양식 줄(이름 없음, 금액 0)을 걸러낸 기타비용 목록을 만든다.
/// 원가 표 라벨이나 예약된 이름과 겹치는 이름은 받지 않는다.
fn collect_other_costs(
    entries: &[CostLine],
    table_labels: &HashSet<&str>,
) -> Result<Vec<CostLine>, CostError> {
    let mut out = Vec::new();
    for entry in entries {
        let label = entry.label.trim();
        require_non_negative("기타비용 금액", entry.amount)?;
        if label.is_empty() {
            if entry.amount == 0.0 {
                continue;
            }
            return Err(CostError::InvalidInput(format!(
                "이름 없는 기타비용({})이 있습니다",
                entry.amount
            )));
        }
        if labels::is_reserved(label) {
            return Err(CostError::InvalidInput(format!(
                "기타비용 이름 '{label}'은(는) 예약된 이름입니다"
            )));
        }
        if table_labels.contains(label) || out.iter().any(|l: &CostLine| l.label == label) {
            return Err(CostError::InvalidInput(format!(
                "기타비용 이름 '{label}'이(가) 다른 항목과 중복됩니다"
            )));
        }
        out.push(CostLine::new(label, entry.amount));
    }
    if out.len() > MAX_OTHER_COSTS {
        return Err(CostError::InvalidInput(format!(
            "기타비용은 최대 {MAX_OTHER_COSTS}개까지 입력할 수 있습니다 ({}개 입력)",
            out.len()
        )));
    }
    Ok(out)
}

fn validate_scalars(input: &CostInputs) -> Result<(), CostError> {
    require_positive("가로 길이", input.width_mm)?;
    require_positive("세로 길이", input.height_mm)?;
    require_positive("평량", input.basis_weight_gsm)?;
    require_positive("팩당 매수", input.sheets_per_unit)?;
    require_non_negative("원단 단가", input.fabric_usd_per_kg)?;
    require_non_negative("환율", input.exchange_rate)?;
    require_non_negative("관세율", input.tariff_pct)?;
    require_non_negative("마진율", input.margin_rate)?;
    require_non_negative("기업이윤", input.corporate_profit)?;
    Ok(())
}

/// 기본 정책(관세 % 가산, 기업이윤 포함)으로 원가를 계산한다.
pub fn compute_cost_default(input: &CostInputs) -> Result<CostEstimate, CostError> {
    compute_cost(input, &CostPolicy::default())
}

/// 원가를 계산한다.
///
/// 모든 검증은 계산 전에 끝나며, 검증을 통과한 입력에 대해서는 실패하지 않는다.
/// 소계와 합계는 반올림 전 누적값에서 한 번만 반올림한다.
pub fn compute_cost(input: &CostInputs, policy: &CostPolicy) -> Result<CostEstimate, CostError> {
    validate_scalars(input)?;
    let submaterials = input.tables.resolved_submaterials();
    let processing = input.tables.resolved_processing();
    let mut seen = HashSet::new();
    validate_table("원부자재", &submaterials, &mut seen)?;
    validate_table("임가공비", &processing, &mut seen)?;
    let others = collect_other_costs(&input.other_costs, &seen)?;

    // 원단비
    let area_m2 = (input.width_mm / 1000.0) * (input.height_mm / 1000.0);
    let tariff_factor = policy.tariff_mode.factor(input.tariff_pct);
    let applied_usd = input.fabric_usd_per_kg * tariff_factor;
    let price_per_gram = applied_usd * input.exchange_rate / 1000.0;
    let gsm_price = price_per_gram * input.basis_weight_gsm;
    let applied_unit_price = gsm_price * (1.0 + FABRIC_LOSS_RATE);
    let fabric_cost_per_sheet = area_m2 * applied_unit_price;
    let fabric_cost_total = fabric_cost_per_sheet * input.sheets_per_unit;
    let base_unit_price = input.fabric_usd_per_kg * input.exchange_rate * tariff_factor;

    let submaterials_total: f64 = submaterials.iter().map(|l| l.amount).sum();
    let processing_total: f64 = processing.iter().map(|l| l.amount).sum();
    let other_total: f64 = others.iter().map(|l| l.amount).sum();

    let total_cost = fabric_cost_total + submaterials_total + processing_total + other_total;
    let margin = total_cost * input.margin_rate;
    let (corporate_profit, final_price) = match policy.pricing_mode {
        PricingMode::CorporateProfit => (
            input.corporate_profit,
            round2(total_cost + margin + input.corporate_profit),
        ),
        PricingMode::RoundToTens => (0.0, round_to_tens(total_cost + margin)),
    };

    let mut breakdown = CostBreakdown::default();
    breakdown.push(labels::FABRIC, LineKind::Fabric, round2(fabric_cost_total));
    breakdown.push(
        labels::BASE_UNIT_PRICE,
        LineKind::BaseUnitPrice,
        round2(base_unit_price),
    );
    for line in &submaterials {
        breakdown.push(line.label.trim(), LineKind::Submaterial, line.amount);
    }
    breakdown.push(
        labels::SUBMATERIAL_SUBTOTAL,
        LineKind::SubmaterialSubtotal,
        round2(submaterials_total),
    );
    for line in &processing {
        breakdown.push(line.label.trim(), LineKind::Processing, line.amount);
    }
    breakdown.push(
        labels::PROCESSING_SUBTOTAL,
        LineKind::ProcessingSubtotal,
        round2(processing_total),
    );
    for line in &others {
        breakdown.push(line.label.as_str(), LineKind::Other, line.amount);
    }
    breakdown.push(labels::OTHER_SUBTOTAL, LineKind::OtherSubtotal, round2(other_total));
    breakdown.push(labels::TOTAL_COST, LineKind::TotalCost, round2(total_cost));
    breakdown.push(labels::margin(input.margin_rate), LineKind::Margin, round2(margin));
    breakdown.push(
        labels::CORPORATE_PROFIT,
        LineKind::CorporateProfit,
        round2(corporate_profit),
    );
    breakdown.push(labels::FINAL_PRICE, LineKind::FinalPrice, final_price);

    Ok(CostEstimate {
        breakdown,
        area_m2,
        applied_unit_price,
        fabric_cost_per_sheet,
        fabric_cost_total,
        base_unit_price,
        submaterials_total,
        processing_total,
        other_total,
        total_cost,
        margin,
        final_price,
    })
}
