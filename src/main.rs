use std::process::ExitCode;

use clap::Parser;
use wetwipe_cost_calculator::{app, cli::Cli, logging};

/// 프로그램의 엔트리 포인트. 로그를 초기화한 뒤 명령을 실행한다.
fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();
    match app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}
