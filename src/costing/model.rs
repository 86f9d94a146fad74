use serde::{Deserialize, Serialize};

use super::defaults;

/// 이름이 붙은 원가 항목 하나. [원/팩]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub label: String,
    pub amount: f64,
}

impl CostLine {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// 원부자재/임가공비 표 교체 설정.
///
/// `None`이면 기본 표를 쓰고, 값이 있으면 표 전체를 교체한다.
/// 항목 단위 병합은 하지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostTables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submaterials: Option<Vec<CostLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing: Option<Vec<CostLine>>,
}

impl CostTables {
    /// 실제 계산에 쓰일 원부자재 표를 돌려준다.
    pub fn resolved_submaterials(&self) -> Vec<CostLine> {
        self.submaterials
            .clone()
            .unwrap_or_else(defaults::baseline_submaterials)
    }

    /// 실제 계산에 쓰일 임가공비 표를 돌려준다.
    pub fn resolved_processing(&self) -> Vec<CostLine> {
        self.processing
            .clone()
            .unwrap_or_else(defaults::baseline_processing)
    }
}

/// 원가 계산 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostInputs {
    /// 원단 가로 [mm]
    pub width_mm: f64,
    /// 원단 세로 [mm]
    pub height_mm: f64,
    /// 평량 [g/㎡]
    pub basis_weight_gsm: f64,
    /// 팩당 매수
    pub sheets_per_unit: f64,
    /// 원단 단가 [USD/kg]
    pub fabric_usd_per_kg: f64,
    /// 환율 [원/USD]
    pub exchange_rate: f64,
    /// 관세율. `TariffMode::Percent`면 %(20 = 20%), `Ratio`면 배율(1.2)
    pub tariff_pct: f64,
    /// 마진율(소수). 화면에서는 0~0.5로 제한하지만 계산식은 제한하지 않는다.
    pub margin_rate: f64,
    /// 기업이윤 [원/팩]
    pub corporate_profit: f64,
    /// 기타비용 (최대 3개)
    pub other_costs: Vec<CostLine>,
    /// 원부자재/임가공비 표 교체 설정
    pub tables: CostTables,
}

impl Default for CostInputs {
    fn default() -> Self {
        Self {
            width_mm: 150.0,
            height_mm: 195.0,
            basis_weight_gsm: 40.0,
            sheets_per_unit: 120.0,
            fabric_usd_per_kg: 1.46,
            exchange_rate: 1500.0,
            tariff_pct: 8.0,
            margin_rate: 0.10,
            corporate_profit: 0.0,
            other_costs: Vec::new(),
            tables: CostTables::default(),
        }
    }
}

/// 관세 적용 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TariffMode {
    /// 가산 퍼센트: 단가 × (1 + 관세율/100)
    #[default]
    Percent,
    /// 배율 직접 곱: 단가 × 관세율 (예: 1.2)
    Ratio,
}

impl TariffMode {
    /// 관세 반영 배율을 구한다.
    pub fn factor(self, tariff: f64) -> f64 {
        match self {
            TariffMode::Percent => 1.0 + tariff / 100.0,
            TariffMode::Ratio => tariff,
        }
    }
}

/// 제안가 산정 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PricingMode {
    /// 총원가 + 마진 + 기업이윤, 소수 둘째 자리 반올림
    #[default]
    CorporateProfit,
    /// 총원가 + 마진을 10원 단위로 반올림. 기업이윤은 0으로 표시된다.
    RoundToTens,
}

/// 계산 정책 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostPolicy {
    #[serde(default)]
    pub tariff_mode: TariffMode,
    #[serde(default)]
    pub pricing_mode: PricingMode,
}

/// 원가표 각 줄의 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Fabric,
    BaseUnitPrice,
    Submaterial,
    SubmaterialSubtotal,
    Processing,
    ProcessingSubtotal,
    Other,
    OtherSubtotal,
    TotalCost,
    Margin,
    CorporateProfit,
    FinalPrice,
}

impl LineKind {
    /// 개별 원가 항목(소계/합계가 아닌 줄)인지 여부.
    pub fn is_cost_item(self) -> bool {
        matches!(
            self,
            LineKind::Fabric | LineKind::Submaterial | LineKind::Processing | LineKind::Other
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub kind: LineKind,
    pub amount: f64,
}

/// 순서가 보존되는 원가표.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    lines: Vec<LineItem>,
}

impl CostBreakdown {
    pub(crate) fn push(&mut self, label: impl Into<String>, kind: LineKind, amount: f64) {
        self.lines.push(LineItem {
            label: label.into(),
            kind,
            amount,
        });
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 라벨로 첫 번째 줄의 금액을 찾는다.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.amount)
    }

    /// 종류로 첫 번째 줄의 금액을 찾는다.
    pub fn amount_of(&self, kind: LineKind) -> Option<f64> {
        self.lines.iter().find(|l| l.kind == kind).map(|l| l.amount)
    }

    pub fn lines_of(&self, kind: LineKind) -> impl Iterator<Item = &LineItem> {
        self.lines.iter().filter(move |l| l.kind == kind)
    }
}

/// 원가 계산 결과. 원가표와 호출자가 자주 쓰는 파생값을 함께 담는다.
///
/// 파생값은 반올림 전 값이고, 원가표의 소계/합계 줄은 반올림된 값이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub breakdown: CostBreakdown,
    /// 원단 면적 [㎡/매]
    pub area_m2: f64,
    /// 손실률 반영 원단 단가 [원/㎡]
    pub applied_unit_price: f64,
    /// 매당 원단비 [원]
    pub fabric_cost_per_sheet: f64,
    /// 팩당 원단비 [원]
    pub fabric_cost_total: f64,
    /// 원단 기준단가 [원/kg]
    pub base_unit_price: f64,
    pub submaterials_total: f64,
    pub processing_total: f64,
    pub other_total: f64,
    pub total_cost: f64,
    pub margin: f64,
    /// 제안가(판매가). 정책에 따라 반올림이 끝난 값.
    pub final_price: f64,
}
