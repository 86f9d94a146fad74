//! 명령행 인자 정의.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::costing::{CostInputs, CostLine, CostPolicy, PricingMode, TariffMode};
use crate::snapshot::columns;
use crate::store::RowFilter;

/// 화면에서 허용하는 최대 마진율
pub const MAX_MARGIN_RATE: f64 = 0.5;

#[derive(Debug, Parser)]
#[command(name = "wetwipe_cost", version, about = "물티슈 원가계산기")]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// 접속 비밀번호 (설정된 경우)
    #[arg(long, global = true)]
    pub password: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 인자로 받은 값으로 원가를 계산한다
    Estimate(EstimateArgs),
    /// 메뉴 방식으로 입력받아 계산한다
    Interactive,
    /// 저장된 계산 이력을 조회한다
    History(HistoryArgs),
    /// 저장된 이력을 현재 원가 표로 다시 계산한다
    Restore(RestoreArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TariffModeArg {
    Percent,
    Ratio,
}

impl From<TariffModeArg> for TariffMode {
    fn from(value: TariffModeArg) -> Self {
        match value {
            TariffModeArg::Percent => TariffMode::Percent,
            TariffModeArg::Ratio => TariffMode::Ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PricingArg {
    Profit,
    Tens,
}

impl From<PricingArg> for PricingMode {
    fn from(value: PricingArg) -> Self {
        match value {
            PricingArg::Profit => PricingMode::CorporateProfit,
            PricingArg::Tens => PricingMode::RoundToTens,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct EstimateArgs {
    /// 가로 길이 [mm]
    #[arg(long)]
    pub width: Option<f64>,
    /// 세로 길이 [mm]
    #[arg(long)]
    pub height: Option<f64>,
    /// 평량 [g/㎡]
    #[arg(long)]
    pub gsm: Option<f64>,
    /// 팩당 매수
    #[arg(long)]
    pub sheets: Option<f64>,
    /// 원단 단가 [USD/kg]
    #[arg(long)]
    pub usd_per_kg: Option<f64>,
    /// 환율 [원/USD]
    #[arg(long)]
    pub exchange_rate: Option<f64>,
    /// 관세율 [%] (ratio 방식이면 배율)
    #[arg(long)]
    pub tariff: Option<f64>,
    /// 마진율 (0~0.5)
    #[arg(long, value_parser = parse_margin_rate)]
    pub margin_rate: Option<f64>,
    /// 기업이윤 [원]
    #[arg(long)]
    pub profit: Option<f64>,
    /// 기타비용 `이름=금액` (최대 3개, 여러 번 지정)
    #[arg(long = "other", value_parser = parse_other_cost)]
    pub other: Vec<CostLine>,
    /// 관세 적용 방식
    #[arg(long, value_enum)]
    pub tariff_mode: Option<TariffModeArg>,
    /// 제안가 산정 방식
    #[arg(long, value_enum)]
    pub pricing: Option<PricingArg>,
    /// 계산 결과를 이력에 저장
    #[arg(long)]
    pub save: bool,
    /// 저장할 제품명
    #[arg(long, default_value = "")]
    pub name: String,
    /// 원가표 CSV 파일 경로
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl EstimateArgs {
    /// 인자로 받은 값을 기본 입력 위에 덮어쓴다.
    pub fn apply(&self, baseline: &CostInputs) -> CostInputs {
        let mut input = baseline.clone();
        input.width_mm = self.width.unwrap_or(input.width_mm);
        input.height_mm = self.height.unwrap_or(input.height_mm);
        input.basis_weight_gsm = self.gsm.unwrap_or(input.basis_weight_gsm);
        input.sheets_per_unit = self.sheets.unwrap_or(input.sheets_per_unit);
        input.fabric_usd_per_kg = self.usd_per_kg.unwrap_or(input.fabric_usd_per_kg);
        input.exchange_rate = self.exchange_rate.unwrap_or(input.exchange_rate);
        input.tariff_pct = self.tariff.unwrap_or(input.tariff_pct);
        input.margin_rate = self.margin_rate.unwrap_or(input.margin_rate);
        input.corporate_profit = self.profit.unwrap_or(input.corporate_profit);
        if !self.other.is_empty() {
            input.other_costs = self.other.clone();
        }
        input
    }

    pub fn policy(&self, base: CostPolicy) -> CostPolicy {
        CostPolicy {
            tariff_mode: self.tariff_mode.map(Into::into).unwrap_or(base.tariff_mode),
            pricing_mode: self.pricing.map(Into::into).unwrap_or(base.pricing_mode),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct HistoryArgs {
    /// 필터 대상 열 (기본: 제품명)
    #[arg(long)]
    pub column: Option<String>,
    /// 값이 정확히 일치하는 행만
    #[arg(long, conflicts_with = "contains")]
    pub equals: Option<String>,
    /// 값에 문자열이 포함된 행만
    #[arg(long)]
    pub contains: Option<String>,
}

impl HistoryArgs {
    pub fn filter(&self) -> Option<RowFilter> {
        let column = self
            .column
            .clone()
            .unwrap_or_else(|| columns::PRODUCT_NAME.to_string());
        if let Some(v) = &self.equals {
            return Some(RowFilter::exact(column, v.clone()));
        }
        self.contains
            .as_ref()
            .map(|v| RowFilter::contains(column, v.clone()))
    }
}

#[derive(Debug, Clone, Args)]
pub struct RestoreArgs {
    /// 이력 번호 (history 출력의 번호)
    pub index: usize,
}

pub fn parse_margin_rate(raw: &str) -> Result<f64, String> {
    let v: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("숫자가 아닙니다: {raw}"))?;
    if !(0.0..=MAX_MARGIN_RATE).contains(&v) {
        return Err(format!("마진율은 0~{MAX_MARGIN_RATE} 범위여야 합니다"));
    }
    Ok(v)
}

pub fn parse_other_cost(raw: &str) -> Result<CostLine, String> {
    let (label, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("`이름=금액` 형식이어야 합니다: {raw}"))?;
    let amount: f64 = amount
        .trim()
        .replace(',', "")
        .parse()
        .map_err(|_| format!("금액이 숫자가 아닙니다: {raw}"))?;
    if label.trim().is_empty() {
        return Err(format!("기타비용 이름이 비어 있습니다: {raw}"));
    }
    Ok(CostLine::new(label.trim(), amount))
}
