//! 원가 계산식의 성질 테스트.
use proptest::prelude::*;
use wetwipe_cost_calculator::costing::{
    compute_cost_default, labels, rounding::round2, CostInputs, CostLine, CostTables, LineKind,
};

#[allow(clippy::too_many_arguments)]
fn inputs(
    width: f64,
    height: f64,
    gsm: f64,
    sheets: f64,
    usd: f64,
    tariff: f64,
    margin: f64,
    profit: f64,
) -> CostInputs {
    CostInputs {
        width_mm: width,
        height_mm: height,
        basis_weight_gsm: gsm,
        sheets_per_unit: sheets,
        fabric_usd_per_kg: usd,
        tariff_pct: tariff,
        margin_rate: margin,
        corporate_profit: profit,
        ..CostInputs::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn fabric_cost_is_linear_in_sheets_and_gsm(
        width in 10.0f64..400.0,
        height in 10.0f64..400.0,
        gsm in 10.0f64..120.0,
        sheets in 1u32..300,
        usd in 0.1f64..10.0,
        tariff in 0.0f64..50.0,
    ) {
        let sheets = sheets as f64;
        let run = |gsm: f64, sheets: f64| {
            let input = inputs(width, height, gsm, sheets, usd, tariff, 0.1, 0.0);
            compute_cost_default(&input).unwrap()
        };
        let base = run(gsm, sheets);
        let double_sheets = run(gsm, 2.0 * sheets);
        let double_gsm = run(2.0 * gsm, sheets);
        prop_assert!(base.fabric_cost_total >= 0.0);
        prop_assert!(close(double_sheets.fabric_cost_total, 2.0 * base.fabric_cost_total));
        prop_assert!(close(double_gsm.fabric_cost_total, 2.0 * base.fabric_cost_total));
        let expected = base.area_m2 * base.applied_unit_price * sheets;
        prop_assert!(close(base.fabric_cost_total, expected));
    }

    #[test]
    fn total_is_exact_category_sum(
        gsm in 10.0f64..120.0,
        other in 0.0f64..500.0,
        margin in 0.0f64..0.5,
    ) {
        let mut input = inputs(150.0, 195.0, gsm, 120.0, 1.46, 8.0, margin, 0.0);
        input.other_costs = vec![CostLine::new("기타", other)];
        let est = compute_cost_default(&input).unwrap();
        let sum = est.fabric_cost_total
            + est.submaterials_total
            + est.processing_total
            + est.other_total;
        prop_assert_eq!(est.total_cost, sum);
        prop_assert_eq!(est.breakdown.amount_of(LineKind::TotalCost), Some(round2(sum)));
    }

    #[test]
    fn final_price_not_below_total(
        gsm in 10.0f64..120.0,
        margin in 0.0f64..0.5,
        profit in 0.0f64..1000.0,
    ) {
        let input = inputs(150.0, 195.0, gsm, 120.0, 1.46, 8.0, margin, profit);
        let est = compute_cost_default(&input).unwrap();
        let total_line = est.breakdown.amount_of(LineKind::TotalCost).unwrap();
        prop_assert!(est.final_price >= total_line);
    }

    #[test]
    fn identical_inputs_give_identical_breakdown(
        width in 10.0f64..400.0,
        gsm in 10.0f64..120.0,
        margin in 0.0f64..0.5,
    ) {
        let input = inputs(width, 195.0, gsm, 120.0, 1.46, 8.0, margin, 10.0);
        let a = compute_cost_default(&input).unwrap();
        let b = compute_cost_default(&input).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn subtotal_is_rounded_raw_sum(amounts in prop::collection::vec(0.0f64..100.0, 1..12)) {
        let lines: Vec<CostLine> = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| CostLine::new(format!("자재{i}"), *a))
            .collect();
        let input = CostInputs {
            tables: CostTables { submaterials: Some(lines), processing: None },
            ..CostInputs::default()
        };
        let est = compute_cost_default(&input).unwrap();
        let raw: f64 = amounts.iter().sum();
        prop_assert_eq!(est.breakdown.get(labels::SUBMATERIAL_SUBTOTAL), Some(round2(raw)));
    }
}

#[test]
fn empty_other_costs_do_not_change_total() {
    let without = compute_cost_default(&CostInputs::default()).unwrap();
    let with_zero = compute_cost_default(&CostInputs {
        other_costs: vec![CostLine::new("예비", 0.0)],
        ..CostInputs::default()
    })
    .unwrap();
    assert_eq!(without.total_cost, with_zero.total_cost);
    assert_eq!(without.final_price, with_zero.final_price);
}
