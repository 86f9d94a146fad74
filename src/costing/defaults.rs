//! 기본 원부자재/임가공비 표.
//! 팩(120매) 1개 기준 단가이며, 설정 파일에서 표 단위로 교체할 수 있다.

use super::model::CostLine;

/// 원부자재 기본 단가 [원/팩]
pub const SUBMATERIALS: &[(&str, f64)] = &[
    ("정제수", 1.20),
    ("명진 메인", 15.41),
    ("명진 소듐", 7.40),
    ("명진 인산", 1.39),
    ("SPC팩(파우치)", 56.24),
    ("영신피엔엘(캡스티커)", 19.16),
    ("나우텍(캡)", 33.33),
    ("영신피엔엘(이너스티커)", 18.54),
    ("지피엠(박스)", 77.77),
];

/// 임가공비 기본 단가 [원/팩]
pub const PROCESSING: &[(&str, f64)] = &[
    ("물류비", 28.57),
    ("노무비", 23.42),
    ("4대보험+퇴직금", 4.17),
    ("제조경비", 21.26),
    ("이자비용", 17.01),
    ("창고료", 5.00),
];

fn to_lines(table: &[(&str, f64)]) -> Vec<CostLine> {
    table
        .iter()
        .map(|(label, amount)| CostLine::new(*label, *amount))
        .collect()
}

pub fn baseline_submaterials() -> Vec<CostLine> {
    to_lines(SUBMATERIALS)
}

pub fn baseline_processing() -> Vec<CostLine> {
    to_lines(PROCESSING)
}
