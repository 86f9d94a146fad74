//! 물티슈 원가 계산 모듈 모음.
//! 입력 모델, 기본 원부자재/임가공비 표, 반올림 규칙, 원가 계산 함수로 구성한다.

pub mod calculator;
pub mod defaults;
pub mod labels;
pub mod model;
pub mod rounding;

pub use calculator::*;
pub use model::*;
