use std::io::{self, Write};

use crate::app::{self, AppError};
use crate::cli::MAX_MARGIN_RATE;
use crate::config::Config;
use crate::costing::{
    self, CostEstimate, CostInputs, CostLine, CostPolicy, PricingMode, TariffMode, MAX_OTHER_COSTS,
};
use crate::report;
use crate::snapshot::{self, columns};
use crate::store::{self, RowFilter, RowRecord, RowStore};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    History,
    Restore,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== 물티슈 원가계산기 ===");
    println!("1) 원가 계산");
    println!("2) 계산 이력");
    println!("3) 이력 불러오기");
    println!("4) 설정");
    println!("0) 종료");
    loop {
        let sel = read_line("메뉴 선택: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::History),
            "3" => return Ok(MenuChoice::Restore),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

/// 원가 계산 입력 양식을 처리한다.
pub fn handle_estimate(cfg: &Config, store: &mut dyn RowStore) -> Result<(), AppError> {
    println!("\n-- 기본 입력값 (엔터 = 기본값) --");
    let input = read_inputs(&cfg.baseline)?;
    let estimate = match costing::compute_cost(&input, &cfg.policy) {
        Ok(e) => e,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };
    print!("{}", report::render_text(&estimate));

    let save = read_line("이력에 저장할까요? (y/N): ")?;
    if save.trim().eq_ignore_ascii_case("y") {
        let name = read_line("제품명: ")?;
        save_and_report(store, name.trim(), &input, &cfg.policy, &estimate);
    }
    let csv = read_line("CSV로 내보낼 경로 (없으면 엔터): ")?;
    if !csv.trim().is_empty() {
        match app::export_csv(std::path::Path::new(csv.trim()), &estimate) {
            Ok(()) => println!("CSV 저장: {}", csv.trim()),
            Err(e) => println!("CSV 저장 실패: {e}"),
        }
    }
    Ok(())
}

/// 이력 저장을 시도하고 결과를 화면에 알린다. 실패해도 메뉴는 계속된다.
pub fn save_and_report(
    store: &mut dyn RowStore,
    name: &str,
    input: &CostInputs,
    policy: &CostPolicy,
    estimate: &CostEstimate,
) -> bool {
    match app::save_estimate(store, name, input, policy, estimate) {
        Ok(()) => {
            println!("저장했습니다.");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "계산 이력 저장 실패");
            println!("이력 저장 실패: {e}");
            false
        }
    }
}

fn read_inputs(baseline: &CostInputs) -> Result<CostInputs, AppError> {
    let mut input = baseline.clone();
    input.width_mm = read_f64_or("가로 길이 (mm)", baseline.width_mm)?;
    input.height_mm = read_f64_or("세로 길이 (mm)", baseline.height_mm)?;
    input.basis_weight_gsm = read_f64_or("평량 (g/㎡)", baseline.basis_weight_gsm)?;
    input.sheets_per_unit = read_f64_or("팩당 매수", baseline.sheets_per_unit)?;
    input.fabric_usd_per_kg = read_f64_or("원단 단가 (USD/kg)", baseline.fabric_usd_per_kg)?;
    input.exchange_rate = read_f64_or("환율 (₩/$)", baseline.exchange_rate)?;
    input.tariff_pct = read_f64_or("관세율 (%)", baseline.tariff_pct)?;
    input.margin_rate = loop {
        let pct = read_f64_or("마진율 (%) 0~50", baseline.margin_rate * 100.0)?;
        let rate = pct / 100.0;
        if (0.0..=MAX_MARGIN_RATE).contains(&rate) {
            break rate;
        }
        println!("마진율은 0~50% 범위여야 합니다.");
    };
    input.corporate_profit = read_f64_or("기업이윤 (원)", baseline.corporate_profit)?;

    println!("기타비용 (최대 {MAX_OTHER_COSTS}개, 이름을 비우면 종료)");
    let mut others = Vec::new();
    for idx in 1..=MAX_OTHER_COSTS {
        let label = read_line(&format!("기타비용{idx} 이름: "))?;
        if label.trim().is_empty() {
            break;
        }
        let amount = read_f64(&format!("기타비용{idx} 금액 (원): "))?;
        others.push(CostLine::new(label.trim(), amount));
    }
    input.other_costs = others;
    Ok(input)
}

/// 계산 이력 조회 메뉴를 처리한다.
pub fn handle_history(store: &dyn RowStore) -> Result<(), AppError> {
    println!("\n-- 계산 이력 --");
    let rows = store.list_rows()?;
    let column = read_line(&format!("검색할 열 (엔터 = {}): ", columns::PRODUCT_NAME))?;
    let column = if column.trim().is_empty() {
        columns::PRODUCT_NAME.to_string()
    } else {
        column.trim().to_string()
    };
    let needle = read_line("검색어 (엔터 = 전체): ")?;
    let filter = if needle.trim().is_empty() {
        None
    } else {
        let exact = read_line("일치 방식 1=정확히 2=포함 (기본 2): ")?;
        Some(match exact.trim() {
            "1" => RowFilter::exact(column, needle.trim()),
            _ => RowFilter::contains(column, needle.trim()),
        })
    };
    print_history(&store::filter_rows(&rows, filter.as_ref()));
    Ok(())
}

/// 이력 불러오기 메뉴를 처리한다.
pub fn handle_restore(cfg: &Config, store: &dyn RowStore) -> Result<(), AppError> {
    println!("\n-- 이력 불러오기 --");
    let idx = read_f64("이력 번호: ")?;
    if idx < 0.0 || idx.fract() != 0.0 {
        println!("이력 번호는 0 이상의 정수여야 합니다.");
        return Ok(());
    }
    match app::restore_estimate(store, idx as usize, &cfg.baseline, &cfg.policy) {
        Ok((_, policy, estimate)) => {
            println!(
                "관세 방식 {:?}, 제안가 방식 {:?}",
                policy.tariff_mode, policy.pricing_mode
            );
            print!("{}", report::render_text(&estimate));
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- 설정 --");
    println!(
        "현재 관세 방식: {:?}, 제안가 방식: {:?}",
        cfg.policy.tariff_mode, cfg.policy.pricing_mode
    );
    println!("관세 방식: 1) 퍼센트 가산  2) 배율 직접 곱");
    let sel = read_line("변경할 번호(취소하려면 엔터): ")?;
    match sel.trim() {
        "" => {}
        "1" => cfg.policy.tariff_mode = TariffMode::Percent,
        "2" => cfg.policy.tariff_mode = TariffMode::Ratio,
        _ => println!("잘못된 입력이므로 변경하지 않습니다."),
    }
    println!("제안가 방식: 1) 기업이윤 포함  2) 10원 단위 반올림");
    let sel = read_line("변경할 번호(취소하려면 엔터): ")?;
    match sel.trim() {
        "" => {}
        "1" => cfg.policy.pricing_mode = PricingMode::CorporateProfit,
        "2" => cfg.policy.pricing_mode = PricingMode::RoundToTens,
        _ => println!("잘못된 입력이므로 변경하지 않습니다."),
    }
    println!(
        "관세 방식 {:?}, 제안가 방식 {:?} 로 설정되었습니다.",
        cfg.policy.tariff_mode, cfg.policy.pricing_mode
    );
    Ok(())
}

/// 이력 목록을 출력한다.
pub fn print_history(rows: &[(usize, &RowRecord)]) {
    if rows.is_empty() {
        println!("저장된 이력이 없습니다.");
        return;
    }
    for (idx, row) in rows {
        let name = snapshot::product_name(row);
        let size = row.get(columns::SIZE).unwrap_or("-");
        let price = row.get(costing::labels::FINAL_PRICE).unwrap_or("-");
        println!("[{idx}] {name} {size} 제안가 {price} 원");
    }
}

/// 접속 비밀번호를 입력받는다.
pub fn read_password() -> Result<String, AppError> {
    read_line("접속 비밀번호를 입력하세요: ")
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "입력이 끝났습니다",
        )));
    }
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().replace(',', "").parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_f64_or(label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        let s = s.trim().replace(',', "");
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}
