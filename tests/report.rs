//! 보고서 데이터와 출력 테스트.
use wetwipe_cost_calculator::costing::{compute_cost_default, CostInputs, CostLine, LineKind};
use wetwipe_cost_calculator::report::{
    category_shares, ranked_line_items, render_text, to_csv, CostCategory,
};

#[test]
fn shares_cover_total_cost() {
    let est = compute_cost_default(&CostInputs::default()).unwrap();
    let shares = category_shares(&est);
    let categories: Vec<CostCategory> = shares.iter().map(|s| s.category).collect();
    assert_eq!(
        categories,
        vec![CostCategory::Fabric, CostCategory::Submaterials, CostCategory::Processing]
    );
    let ratio_sum: f64 = shares.iter().map(|s| s.ratio).sum();
    assert!((ratio_sum - 1.0).abs() < 1e-9);
}

#[test]
fn other_costs_get_their_own_share() {
    let est = compute_cost_default(&CostInputs {
        other_costs: vec![CostLine::new("인증비", 20.0)],
        ..CostInputs::default()
    })
    .unwrap();
    let shares = category_shares(&est);
    assert_eq!(shares.last().map(|s| s.category), Some(CostCategory::Other));
    assert_eq!(shares.last().map(|s| s.amount), Some(20.0));
}

#[test]
fn ranked_items_are_descending_cost_lines() {
    let est = compute_cost_default(&CostInputs::default()).unwrap();
    let ranked = ranked_line_items(&est.breakdown);
    assert_eq!(ranked.len(), 1 + 9 + 6);
    assert_eq!(ranked[0].kind, LineKind::Fabric);
    assert_eq!(ranked[1].label, "지피엠(박스)");
    assert!(ranked.windows(2).all(|w| w[0].amount >= w[1].amount));
    assert!(ranked.iter().all(|l| l.kind.is_cost_item()));
}

#[test]
fn text_report_lists_every_line() {
    let est = compute_cost_default(&CostInputs::default()).unwrap();
    let text = render_text(&est);
    for line in est.breakdown.iter() {
        assert!(text.contains(&line.label), "missing {}", line.label);
    }
    assert!(text.contains("구분별 비중"));
    assert!(text.contains('█'));
}

#[test]
fn csv_export_quotes_commas() {
    let est = compute_cost_default(&CostInputs {
        other_costs: vec![CostLine::new("샘플, 시험비", 7.0)],
        ..CostInputs::default()
    })
    .unwrap();
    let csv = to_csv(&est);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("항목,금액"));
    assert!(csv.contains("\"샘플, 시험비\",7.00"));
    assert!(csv.contains("총원가,"));
    assert_eq!(csv.lines().count(), est.breakdown.len() + 1);
}
