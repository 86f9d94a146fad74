//! 계산 입력과 원가표를 평면 행으로 펼치고, 저장된 행에서 입력을 되살린다.

use thiserror::Error;

use crate::costing::{
    CostEstimate, CostInputs, CostLine, CostPolicy, PricingMode, TariffMode, MAX_OTHER_COSTS,
};
use crate::store::RowRecord;

pub use crate::costing::labels::columns;

/// 저장된 행을 해석할 때 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    /// 행 값 해석 오류
    #[error("저장된 행 해석 오류: {0}")]
    InvalidInput(String),
}

fn fmt_num(value: f64) -> String {
    format!("{value}")
}

fn tariff_mode_name(mode: TariffMode) -> &'static str {
    match mode {
        TariffMode::Percent => "Percent",
        TariffMode::Ratio => "Ratio",
    }
}

fn pricing_mode_name(mode: PricingMode) -> &'static str {
    match mode {
        PricingMode::CorporateProfit => "CorporateProfit",
        PricingMode::RoundToTens => "RoundToTens",
    }
}

/// 입력값, 계산 정책, 원가표를 (헤더, 값) 한 행으로 펼친다.
pub fn to_row(
    name: &str,
    input: &CostInputs,
    policy: &CostPolicy,
    estimate: &CostEstimate,
) -> (Vec<String>, Vec<String>) {
    let mut headers: Vec<String> = Vec::new();
    let mut values: Vec<String> = Vec::new();
    let mut put = |h: String, v: String| {
        headers.push(h);
        values.push(v);
    };

    put(columns::PRODUCT_NAME.into(), name.trim().to_string());
    put(
        columns::SIZE.into(),
        format!("{}x{}", fmt_num(input.width_mm), fmt_num(input.height_mm)),
    );
    put(columns::BASIS_WEIGHT.into(), fmt_num(input.basis_weight_gsm));
    put(columns::SHEETS.into(), fmt_num(input.sheets_per_unit));
    put(columns::FABRIC_USD_PER_KG.into(), fmt_num(input.fabric_usd_per_kg));
    put(columns::EXCHANGE_RATE.into(), fmt_num(input.exchange_rate));
    put(columns::TARIFF_PCT.into(), fmt_num(input.tariff_pct));
    put(columns::MARGIN_RATE.into(), fmt_num(input.margin_rate));
    put(columns::CORPORATE_PROFIT.into(), fmt_num(input.corporate_profit));
    put(
        columns::TARIFF_MODE.into(),
        tariff_mode_name(policy.tariff_mode).into(),
    );
    put(
        columns::PRICING_MODE.into(),
        pricing_mode_name(policy.pricing_mode).into(),
    );
    for idx in 1..=MAX_OTHER_COSTS {
        let (label, amount) = input
            .other_costs
            .get(idx - 1)
            .map(|l| (l.label.trim().to_string(), fmt_num(l.amount)))
            .unwrap_or_default();
        put(columns::other_label(idx), label);
        put(columns::other_amount(idx), amount);
    }
    for line in estimate.breakdown.iter() {
        // 기업이윤 줄은 같은 이름의 입력 열로 이미 기록되어 있다.
        if columns::INPUTS.contains(&line.label.as_str()) {
            continue;
        }
        put(line.label.clone(), fmt_num(line.amount));
    }
    (headers, values)
}

/// `150x195` 형태의 규격 문자열을 (가로, 세로)[mm]로 해석한다.
pub fn parse_size_token(token: &str) -> Result<(f64, f64), SnapshotError> {
    let normalized = token.trim().replace(['X', '×', '*'], "x");
    let mut parts = normalized.split('x');
    let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SnapshotError::InvalidInput(format!(
            "규격 '{token}'은(는) 가로x세로 형식이어야 합니다"
        )));
    };
    let width = parse_number(columns::SIZE, w)?;
    let height = parse_number(columns::SIZE, h)?;
    Ok((width, height))
}

fn parse_number(column: &str, raw: &str) -> Result<f64, SnapshotError> {
    let cleaned = raw.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            SnapshotError::InvalidInput(format!(
                "{column} 값 '{raw}'을(를) 숫자로 읽을 수 없습니다"
            ))
        })
}

fn read_number(record: &RowRecord, column: &str, fallback: f64) -> Result<f64, SnapshotError> {
    match record.get(column) {
        Some(raw) if !raw.trim().is_empty() => parse_number(column, raw),
        _ => Ok(fallback),
    }
}

/// 저장된 행의 제품명.
pub fn product_name(record: &RowRecord) -> &str {
    record.get(columns::PRODUCT_NAME).unwrap_or("")
}

fn read_policy(record: &RowRecord, fallback: &CostPolicy) -> Result<CostPolicy, SnapshotError> {
    let mut policy = *fallback;
    match record.get(columns::TARIFF_MODE).map(str::trim) {
        None | Some("") => {}
        Some("Percent") => policy.tariff_mode = TariffMode::Percent,
        Some("Ratio") => policy.tariff_mode = TariffMode::Ratio,
        Some(other) => {
            return Err(SnapshotError::InvalidInput(format!(
                "알 수 없는 관세방식 '{other}'"
            )))
        }
    }
    match record.get(columns::PRICING_MODE).map(str::trim) {
        None | Some("") => {}
        Some("CorporateProfit") => policy.pricing_mode = PricingMode::CorporateProfit,
        Some("RoundToTens") => policy.pricing_mode = PricingMode::RoundToTens,
        Some(other) => {
            return Err(SnapshotError::InvalidInput(format!(
                "알 수 없는 제안가방식 '{other}'"
            )))
        }
    }
    Ok(policy)
}

/// 저장된 행에서 계산 입력과 정책을 되살린다.
///
/// 없는 열은 `baseline`과 `policy` 값을 쓰고 모르는 열은 무시한다.
/// 원부자재/임가공비 표는 행이 아닌 `baseline`을 따른다.
pub fn inputs_from_record(
    record: &RowRecord,
    baseline: &CostInputs,
    policy: &CostPolicy,
) -> Result<(CostInputs, CostPolicy), SnapshotError> {
    let policy = read_policy(record, policy)?;
    let mut input = baseline.clone();
    if let Some(raw) = record.get(columns::SIZE).filter(|s| !s.trim().is_empty()) {
        let (w, h) = parse_size_token(raw)?;
        input.width_mm = w;
        input.height_mm = h;
    }
    input.basis_weight_gsm =
        read_number(record, columns::BASIS_WEIGHT, baseline.basis_weight_gsm)?;
    input.sheets_per_unit = read_number(record, columns::SHEETS, baseline.sheets_per_unit)?;
    input.fabric_usd_per_kg =
        read_number(record, columns::FABRIC_USD_PER_KG, baseline.fabric_usd_per_kg)?;
    input.exchange_rate = read_number(record, columns::EXCHANGE_RATE, baseline.exchange_rate)?;
    input.tariff_pct = read_number(record, columns::TARIFF_PCT, baseline.tariff_pct)?;
    input.margin_rate = read_number(record, columns::MARGIN_RATE, baseline.margin_rate)?;
    input.corporate_profit =
        read_number(record, columns::CORPORATE_PROFIT, baseline.corporate_profit)?;

    let has_other_columns = (1..=MAX_OTHER_COSTS).any(|i| {
        record.get(&columns::other_label(i)).is_some()
            || record.get(&columns::other_amount(i)).is_some()
    });
    if has_other_columns {
        let mut others = Vec::new();
        for idx in 1..=MAX_OTHER_COSTS {
            let label = record.get(&columns::other_label(idx)).unwrap_or("").trim();
            let amount = read_number(record, &columns::other_amount(idx), 0.0)?;
            if label.is_empty() && amount == 0.0 {
                continue;
            }
            others.push(CostLine::new(label, amount));
        }
        input.other_costs = others;
    }
    Ok((input, policy))
}
