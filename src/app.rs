use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::access::{AccessError, AccessGate};
use crate::cli::{Cli, Command, EstimateArgs, HistoryArgs};
use crate::config::{self, Config};
use crate::costing::{self, CostEstimate, CostInputs, CostPolicy};
use crate::report;
use crate::snapshot::{self, SnapshotError};
use crate::store::{self, JsonlRowStore, RowStore, StoreError};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] config::ConfigError),
    /// 원가 계산 오류
    #[error("원가 계산 오류: {0}")]
    Cost(#[from] costing::CostError),
    /// 이력 행 해석 오류
    #[error("이력 복원 오류: {0}")]
    Snapshot(#[from] SnapshotError),
    /// 이력 저장소 오류
    #[error("이력 저장소 오류: {0}")]
    Store(#[from] StoreError),
    /// 접속 거부
    #[error("접속 거부: {0}")]
    Access(#[from] AccessError),
    /// 없는 이력 번호
    #[error("{0}번 이력이 없습니다")]
    RowNotFound(usize),
}

/// 명령행 인자에 따라 애플리케이션을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    let gate = AccessGate::new(cfg.access_password.clone());
    check_access(&gate, cli.password.as_deref(), ui_cli::read_password)?;
    let mut store = JsonlRowStore::new(&cfg.store_path);

    match cli.command {
        Command::Estimate(args) => run_estimate(&cfg, &mut store, &args),
        Command::Interactive => run_interactive(&mut cfg, &cli.config, &mut store),
        Command::History(args) => run_history(&store, &args),
        Command::Restore(args) => {
            let (_, _, estimate) =
                restore_estimate(&store, args.index, &cfg.baseline, &cfg.policy)?;
            print!("{}", report::render_text(&estimate));
            Ok(())
        }
    }
}

/// 입력 수집 전에 비밀번호를 확인한다.
///
/// 인자로 받지 못하면 `prompt`로 입력을 요청한다. 열린 게이트는 묻지 않는다.
pub fn check_access<F>(
    gate: &AccessGate,
    password: Option<&str>,
    prompt: F,
) -> Result<(), AppError>
where
    F: FnOnce() -> Result<String, AppError>,
{
    if gate.is_open() {
        return Ok(());
    }
    let attempt = match password {
        Some(p) => p.to_string(),
        None => prompt()?,
    };
    gate.verify(attempt.trim()).inspect_err(|_| {
        tracing::warn!("비밀번호 불일치로 접속 거부");
    })?;
    Ok(())
}

fn run_estimate(
    cfg: &Config,
    store: &mut dyn RowStore,
    args: &EstimateArgs,
) -> Result<(), AppError> {
    let input = args.apply(&cfg.baseline);
    let policy = args.policy(cfg.policy);
    let estimate = costing::compute_cost(&input, &policy)?;
    print!("{}", report::render_text(&estimate));
    if let Some(path) = &args.csv {
        export_csv(path, &estimate)?;
        println!("CSV 저장: {}", path.display());
    }
    if args.save {
        save_estimate(store, &args.name, &input, &policy, &estimate)?;
        println!("이력에 저장했습니다.");
    }
    Ok(())
}

fn run_history(store: &dyn RowStore, args: &HistoryArgs) -> Result<(), AppError> {
    let rows = store.list_rows()?;
    let filter = args.filter();
    ui_cli::print_history(&store::filter_rows(&rows, filter.as_ref()));
    Ok(())
}

fn run_interactive(
    cfg: &mut Config,
    config_path: &Path,
    store: &mut dyn RowStore,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu()? {
            MenuChoice::Estimate => ui_cli::handle_estimate(cfg, store)?,
            MenuChoice::History => ui_cli::handle_history(store)?,
            MenuChoice::Restore => ui_cli::handle_restore(cfg, store)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(cfg)?;
                cfg.save(config_path)?;
            }
            MenuChoice::Exit => {
                cfg.save(config_path)?;
                println!("종료합니다.");
                break;
            }
        }
    }
    Ok(())
}

/// 원가표를 CSV 파일로 내보낸다. 실패해도 계산 결과는 그대로 남는다.
pub fn export_csv(path: &Path, estimate: &CostEstimate) -> Result<(), AppError> {
    fs::write(path, report::to_csv(estimate))?;
    Ok(())
}

/// 계산 입력, 정책, 결과를 이력 한 행으로 저장한다.
pub fn save_estimate(
    store: &mut dyn RowStore,
    name: &str,
    input: &CostInputs,
    policy: &CostPolicy,
    estimate: &CostEstimate,
) -> Result<(), AppError> {
    let (headers, values) = snapshot::to_row(name, input, policy, estimate);
    store.append_row(&headers, &values)?;
    tracing::debug!(name, final_price = estimate.final_price, "계산 이력 저장");
    Ok(())
}

/// `index`번 이력을 저장 당시 정책과 현재 원가 표로 다시 계산한다.
///
/// 정책 열이 없는 행은 `policy`를 쓴다.
pub fn restore_estimate(
    store: &dyn RowStore,
    index: usize,
    baseline: &CostInputs,
    policy: &CostPolicy,
) -> Result<(CostInputs, CostPolicy, CostEstimate), AppError> {
    let rows = store.list_rows()?;
    let record = rows.get(index).ok_or(AppError::RowNotFound(index))?;
    let (input, policy) = snapshot::inputs_from_record(record, baseline, policy)?;
    let estimate = costing::compute_cost(&input, &policy)?;
    Ok((input, policy, estimate))
}
