use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 로그 구독자를 초기화한다. `RUST_LOG`가 없으면 warn 이상만 stderr로 출력한다.
///
/// 프로세스당 한 번만 호출해야 한다.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
