/// 소수 둘째 자리로 반올림한다.
/// 100배한 값에서 동률을 짝수 쪽으로 보내므로, 이진수로 정확히 표현되지 않는 값은
/// 십진 표기상의 동률과 결과가 다를 수 있다.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// 10원 단위로 반올림한다. 10으로 나눈 값에서 동률을 짝수 쪽으로 보낸다.
pub fn round_to_tens(value: f64) -> f64 {
    (value / 10.0).round_ties_even() * 10.0
}
