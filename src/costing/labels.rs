//! 원가표 고정 라벨과 이력 행 열 이름.
//! 사용자가 붙이는 항목 이름은 여기 있는 이름과 겹칠 수 없다.

use super::calculator::MAX_OTHER_COSTS;

pub const FABRIC: &str = "Sateri(원단)";
pub const BASE_UNIT_PRICE: &str = "원단 기준단가";
pub const SUBMATERIAL_SUBTOTAL: &str = "-- 원부자재 소계";
pub const PROCESSING_SUBTOTAL: &str = "-- 임가공비 소계";
pub const OTHER_SUBTOTAL: &str = "-- 기타비용 소계";
pub const TOTAL_COST: &str = "총원가";
pub const CORPORATE_PROFIT: &str = "기업이윤";
pub const FINAL_PRICE: &str = "제안가(판매가)";

const MARGIN_PREFIX: &str = "마진(";

/// `마진(10%)` 형태의 라벨을 만든다.
pub fn margin(margin_rate: f64) -> String {
    let pct = margin_rate * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{MARGIN_PREFIX}{}%)", pct.round() as i64)
    } else {
        format!("{MARGIN_PREFIX}{pct:.1}%)")
    }
}

/// 이력 행 열 이름.
pub mod columns {
    pub const PRODUCT_NAME: &str = "제품명";
    pub const SIZE: &str = "규격";
    pub const BASIS_WEIGHT: &str = "평량";
    pub const SHEETS: &str = "매수";
    pub const FABRIC_USD_PER_KG: &str = "원단단가(USD/kg)";
    pub const EXCHANGE_RATE: &str = "환율";
    pub const TARIFF_PCT: &str = "관세율(%)";
    pub const MARGIN_RATE: &str = "마진율";
    pub const CORPORATE_PROFIT: &str = "기업이윤";
    pub const TARIFF_MODE: &str = "관세방식";
    pub const PRICING_MODE: &str = "제안가방식";

    /// 입력값을 담는 열. 원가표 줄보다 먼저 기록된다.
    pub const INPUTS: &[&str] = &[
        PRODUCT_NAME,
        SIZE,
        BASIS_WEIGHT,
        SHEETS,
        FABRIC_USD_PER_KG,
        EXCHANGE_RATE,
        TARIFF_PCT,
        MARGIN_RATE,
        CORPORATE_PROFIT,
        TARIFF_MODE,
        PRICING_MODE,
    ];

    pub fn other_label(index: usize) -> String {
        format!("기타비용{index}명")
    }

    pub fn other_amount(index: usize) -> String {
        format!("기타비용{index}")
    }
}

const FIXED: &[&str] = &[
    FABRIC,
    BASE_UNIT_PRICE,
    SUBMATERIAL_SUBTOTAL,
    PROCESSING_SUBTOTAL,
    OTHER_SUBTOTAL,
    TOTAL_COST,
    CORPORATE_PROFIT,
    FINAL_PRICE,
];

/// 고정 라벨, 마진 라벨, 이력 입력 열 이름과 겹치는지 확인한다.
pub fn is_reserved(label: &str) -> bool {
    FIXED.contains(&label)
        || label.starts_with(MARGIN_PREFIX)
        || columns::INPUTS.contains(&label)
        || (1..=MAX_OTHER_COSTS)
            .any(|i| label == columns::other_label(i) || label == columns::other_amount(i))
}
