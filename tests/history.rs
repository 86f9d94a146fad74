//! 이력 행 변환과 저장소 테스트.
use std::fs;

use wetwipe_cost_calculator::app::{restore_estimate, save_estimate, AppError};
use wetwipe_cost_calculator::costing::{
    compute_cost, compute_cost_default, labels, CostInputs, CostLine, CostPolicy, PricingMode,
    TariffMode,
};
use wetwipe_cost_calculator::snapshot::{
    self, columns, inputs_from_record, parse_size_token, SnapshotError,
};
use wetwipe_cost_calculator::store::{
    filter_rows, JsonlRowStore, MemoryRowStore, RowFilter, RowRecord, RowStore, StoreError,
};
use wetwipe_cost_calculator::ui_cli::save_and_report;

fn record(pairs: &[(&str, &str)]) -> RowRecord {
    RowRecord::new(
        pairs.iter().map(|(h, _)| h.to_string()).collect(),
        pairs.iter().map(|(_, v)| v.to_string()).collect(),
    )
    .expect("row shape")
}

fn sample_inputs() -> CostInputs {
    CostInputs {
        width_mm: 160.0,
        height_mm: 200.0,
        tariff_pct: 20.0,
        corporate_profit: 30.0,
        other_costs: vec![CostLine::new("디자인비", 15.0)],
        ..CostInputs::default()
    }
}

#[test]
fn row_contains_inputs_and_breakdown() {
    let input = sample_inputs();
    let est = compute_cost_default(&input).unwrap();
    let (headers, values) =
        snapshot::to_row("수분 물티슈 120매", &input, &CostPolicy::default(), &est);
    let row = RowRecord::new(headers, values).unwrap();
    assert_eq!(row.get(columns::PRODUCT_NAME), Some("수분 물티슈 120매"));
    assert_eq!(row.get(columns::SIZE), Some("160x200"));
    assert_eq!(row.get(columns::TARIFF_PCT), Some("20"));
    assert_eq!(row.get("기타비용1명"), Some("디자인비"));
    assert_eq!(row.get("기타비용2명"), Some(""));
    assert_eq!(row.get(columns::TARIFF_MODE), Some("Percent"));
    assert_eq!(row.get(columns::PRICING_MODE), Some("CorporateProfit"));
    let total = est.breakdown.get(labels::TOTAL_COST).unwrap().to_string();
    assert_eq!(row.get(labels::TOTAL_COST), Some(total.as_str()));
    let profit_columns = row
        .headers
        .iter()
        .filter(|h| h.as_str() == columns::CORPORATE_PROFIT)
        .count();
    assert_eq!(profit_columns, 1);
}

#[test]
fn save_then_restore_reproduces_estimate() {
    let mut store = MemoryRowStore::new();
    let input = sample_inputs();
    let est = compute_cost_default(&input).unwrap();
    save_estimate(&mut store, "A", &input, &CostPolicy::default(), &est).unwrap();

    let (restored, policy, again) =
        restore_estimate(&store, 0, &CostInputs::default(), &CostPolicy::default()).unwrap();
    assert_eq!(restored, input);
    assert_eq!(policy, CostPolicy::default());
    assert_eq!(again, est);
}

#[test]
fn restore_uses_policy_saved_with_the_row() {
    let saved_policy = CostPolicy {
        tariff_mode: TariffMode::Ratio,
        pricing_mode: PricingMode::RoundToTens,
    };
    let input = CostInputs {
        tariff_pct: 1.2,
        ..CostInputs::default()
    };
    let est = compute_cost(&input, &saved_policy).unwrap();
    assert_eq!(est.final_price, 790.0);

    let mut store = MemoryRowStore::new();
    save_estimate(&mut store, "배율", &input, &saved_policy, &est).unwrap();

    let (_, policy, again) =
        restore_estimate(&store, 0, &CostInputs::default(), &CostPolicy::default()).unwrap();
    assert_eq!(policy, saved_policy);
    assert_eq!(again.final_price, 790.0);
    assert!((again.fabric_cost_total - 387.41976).abs() < 1e-8);
    assert_eq!(again, est);
}

#[test]
fn rows_without_policy_columns_use_current_policy() {
    let current = CostPolicy {
        tariff_mode: TariffMode::Percent,
        pricing_mode: PricingMode::RoundToTens,
    };
    let row = record(&[(columns::TARIFF_PCT, "20")]);
    let (_, policy) = inputs_from_record(&row, &CostInputs::default(), &current).unwrap();
    assert_eq!(policy, current);

    let partial = record(&[(columns::TARIFF_MODE, "Ratio")]);
    let (_, policy) = inputs_from_record(&partial, &CostInputs::default(), &current).unwrap();
    assert_eq!(policy.tariff_mode, TariffMode::Ratio);
    assert_eq!(policy.pricing_mode, PricingMode::RoundToTens);
}

#[test]
fn unknown_policy_value_is_rejected() {
    let row = record(&[(columns::PRICING_MODE, "Round")]);
    assert!(matches!(
        inputs_from_record(&row, &CostInputs::default(), &CostPolicy::default()),
        Err(SnapshotError::InvalidInput(_))
    ));
}

#[test]
fn restore_unknown_index_fails() {
    let store = MemoryRowStore::new();
    let err = restore_estimate(&store, 3, &CostInputs::default(), &CostPolicy::default())
        .expect_err("no rows");
    assert!(matches!(err, AppError::RowNotFound(3)));
}

#[test]
fn size_token_variants() {
    assert_eq!(parse_size_token("150x195").unwrap(), (150.0, 195.0));
    assert_eq!(parse_size_token(" 150 X 195 ").unwrap(), (150.0, 195.0));
    assert_eq!(parse_size_token("150×195").unwrap(), (150.0, 195.0));
    assert_eq!(parse_size_token("150*195.5").unwrap(), (150.0, 195.5));
    for bad in ["150", "150x", "x195", "150x195x10", "abcxdef"] {
        assert!(
            matches!(parse_size_token(bad), Err(SnapshotError::InvalidInput(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn restore_falls_back_to_baseline_for_missing_columns() {
    let row = record(&[(columns::SIZE, "180x210"), ("알수없는열", "?")]);
    let baseline = CostInputs::default();
    let (input, _) = inputs_from_record(&row, &baseline, &CostPolicy::default()).unwrap();
    assert_eq!(input.width_mm, 180.0);
    assert_eq!(input.height_mm, 210.0);
    assert_eq!(input.basis_weight_gsm, baseline.basis_weight_gsm);
    assert_eq!(input.exchange_rate, baseline.exchange_rate);
}

#[test]
fn restore_rejects_malformed_values() {
    let baseline = CostInputs::default();
    let policy = CostPolicy::default();
    let bad_size = record(&[(columns::SIZE, "150by195")]);
    assert!(matches!(
        inputs_from_record(&bad_size, &baseline, &policy),
        Err(SnapshotError::InvalidInput(_))
    ));
    let bad_rate = record(&[(columns::EXCHANGE_RATE, "천오백")]);
    assert!(matches!(
        inputs_from_record(&bad_rate, &baseline, &policy),
        Err(SnapshotError::InvalidInput(_))
    ));
    let thousands = record(&[(columns::EXCHANGE_RATE, "1,350")]);
    let (input, _) = inputs_from_record(&thousands, &baseline, &policy).unwrap();
    assert_eq!(input.exchange_rate, 1350.0);
}

#[test]
fn jsonl_store_appends_and_lists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history").join("rows.jsonl");
    let mut store = JsonlRowStore::new(&path);
    assert!(store.list_rows().unwrap().is_empty());

    let headers = vec![columns::PRODUCT_NAME.to_string(), "값".to_string()];
    store.append_row(&headers, &["수분 120매".into(), "1".into()]).unwrap();
    store.append_row(&headers, &["아기 물티슈 80매".into(), "2".into()]).unwrap();
    store.append_row(&[columns::PRODUCT_NAME.to_string()], &["수분 80매".into()]).unwrap();

    let rows = store.list_rows().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].get("값"), Some("2"));
    assert_eq!(rows[2].get("값"), None);

    let contains = RowFilter::contains(columns::PRODUCT_NAME, "수분");
    let hits: Vec<usize> = filter_rows(&rows, Some(&contains)).iter().map(|(i, _)| *i).collect();
    assert_eq!(hits, vec![0, 2]);

    let exact = RowFilter::exact(columns::PRODUCT_NAME, "수분 80매");
    let hits: Vec<usize> = filter_rows(&rows, Some(&exact)).iter().map(|(i, _)| *i).collect();
    assert_eq!(hits, vec![2]);

    let missing_column = RowFilter::exact("값", "1");
    assert_eq!(filter_rows(&rows, Some(&missing_column)).len(), 1);
    assert_eq!(filter_rows(&rows, None).len(), 3);
}

#[test]
fn jsonl_store_skips_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.jsonl");
    let lines = [
        r#"{"headers":["제품명"],"values":["A"]}"#,
        "not json",
        "",
        r#"{"headers":["a","b"],"values":["1"]}"#,
        r#"{"headers":["제품명"],"values":["B"]}"#,
    ];
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    let store = JsonlRowStore::new(&path);
    let rows = store.list_rows().unwrap();
    let names: Vec<&str> = rows.iter().map(snapshot::product_name).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn mismatched_row_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.jsonl");
    let mut store = JsonlRowStore::new(&path);
    let err = store
        .append_row(&["a".into(), "b".into()], &["1".into()])
        .expect_err("shape mismatch");
    assert!(matches!(err, StoreError::ShapeMismatch { headers: 2, values: 1 }));
    assert!(!path.exists());
}

#[test]
fn failed_history_save_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_inputs();
    let est = compute_cost_default(&input).unwrap();
    let policy = CostPolicy::default();

    // 디렉터리에는 행을 덧붙일 수 없다.
    let mut broken = JsonlRowStore::new(dir.path());
    assert!(!save_and_report(&mut broken, "A", &input, &policy, &est));

    let mut store = MemoryRowStore::new();
    assert!(save_and_report(&mut store, "A", &input, &policy, &est));
    assert_eq!(store.list_rows().unwrap().len(), 1);
}
