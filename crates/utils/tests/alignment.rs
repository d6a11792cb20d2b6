//! Alignment of daily tables spanning a full election cycle.
#![allow(missing_docs)]

use cyclealpha_primitives::{CyclePhase, Date, DrawdownCurve};
use cyclealpha_utils::{ColumnMap, align, drawdown_to_frame};
use polars::prelude::*;

fn days_since_epoch(date: Date) -> i32 {
    (date - Date::from_ymd_opt(1970, 1, 1).unwrap()).num_days() as i32
}

/// One observation on the first business day of each month, 2020 through 2023.
fn monthly_dates() -> Vec<Date> {
    (2020..=2023)
        .flat_map(|y| (1..=12).map(move |m| Date::from_ymd_opt(y, m, 2).unwrap()))
        .collect()
}

#[test]
fn aligned_frame_covers_every_phase() {
    let dates = monthly_dates();
    let n = dates.len();
    let days: Vec<i32> = dates.iter().copied().map(days_since_epoch).collect();

    let returns = df! {
        "date" => &days,
        "asset_return" => (0..n).map(|i| 0.001 * (i % 5) as f64 - 0.002).collect::<Vec<_>>(),
    }
    .unwrap()
    .lazy()
    .with_column(col("date").cast(DataType::Date));

    // Factors quoted in percent, with the last month missing.
    let factors = df! {
        "date" => &days[..n - 1],
        "mkt_rf" => vec![0.5; n - 1],
        "smb" => vec![-0.1; n - 1],
        "hml" => vec![0.2; n - 1],
        "rf" => vec![0.01; n - 1],
    }
    .unwrap()
    .lazy()
    .with_column(col("date").cast(DataType::Date));

    let columns = ColumnMap { factor_scale: 0.01, ..Default::default() };
    let frame = align(returns, factors, &columns).unwrap();

    assert_eq!(frame.len(), n - 1);
    assert_eq!(frame.first_date(), Some(dates[0]));
    assert_eq!(frame.last_date(), Some(dates[n - 2]));

    for phase in CyclePhase::ALL {
        let subset = frame.filter_phase(phase);
        assert!(!subset.is_empty(), "{phase} missing");
    }
    let (target, rest) = frame.partition_target();
    assert_eq!(target.len(), 11);
    assert_eq!(rest.len(), 36);

    let curve = DrawdownCurve {
        wealth: vec![1.0; n],
        drawdown: vec![0.0; n],
        max_drawdown: 0.0,
        peak_index: 0,
        trough_index: 0,
    };
    let exported = drawdown_to_frame(&curve, Some(frame.dates().as_slice())).unwrap();
    assert_eq!(exported.height(), n);
    assert_eq!(exported.column("date").unwrap().null_count(), 1);
}
