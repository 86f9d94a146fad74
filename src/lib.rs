//! 물티슈 원가 계산 로직을 라이브러리로 분리하여 CLI 외의 화면에서도 재사용할 수 있게 한다.

pub mod access;
pub mod app;
pub mod cli;
pub mod config;
pub mod costing;
pub mod logging;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod ui_cli;
