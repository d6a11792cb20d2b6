//! Flatten result objects into polars frames.

use chrono::Datelike;
use cyclealpha_primitives::{Date, DrawdownCurve, RollingPath};
use polars::prelude::*;

use crate::{UtilsError, align::UNIX_EPOCH_DAYS_FROM_CE};

/// One row per rolling window.
///
/// Columns: `date`, `start_date`, `defined`, then `<name>` and
/// `<name>_p_value` for every coefficient. Undefined windows hold nulls.
///
/// # Errors
/// Returns `UtilsError::Polars` if the frame cannot be assembled.
pub fn rolling_path_to_frame(path: &RollingPath) -> Result<DataFrame, UtilsError> {
    let names: Vec<String> = path
        .iter()
        .find_map(|p| p.estimate.fitted())
        .map(|r| r.coefficients.iter().map(|c| c.name.clone()).collect())
        .unwrap_or_default();

    let mut columns = vec![
        date_column("date", path.iter().map(|p| p.date))?,
        date_column("start_date", path.iter().map(|p| p.start_date))?,
        Column::new(
            "defined".into(),
            path.iter().map(|p| !p.estimate.is_undefined()).collect::<Vec<_>>(),
        ),
    ];

    for name in &names {
        let (estimates, p_values): (Vec<Option<f64>>, Vec<Option<f64>>) = path
            .iter()
            .map(|p| {
                let c = p.estimate.fitted().and_then(|r| r.get(name));
                (c.map(|c| c.estimate), c.map(|c| c.p_value))
            })
            .unzip();
        columns.push(Column::new(name.as_str().into(), estimates));
        columns.push(Column::new(format!("{name}_p_value").into(), p_values));
    }

    Ok(DataFrame::new(columns)?)
}

/// One row per wealth point: `step`, optional `date`, `wealth`, `drawdown`.
///
/// `dates` labels the returns the curve was built from, so the starting
/// point (step 0) has a null date.
///
/// # Errors
/// - `InvalidParameter` if `dates` is given with the wrong length.
/// - `Polars` if the frame cannot be assembled.
pub fn drawdown_to_frame(
    curve: &DrawdownCurve,
    dates: Option<&[Date]>,
) -> Result<DataFrame, UtilsError> {
    let steps = curve.wealth.len();
    let mut columns = vec![Column::new("step".into(), (0..steps as u32).collect::<Vec<_>>())];

    if let Some(dates) = dates {
        if dates.len() + 1 != steps {
            return Err(UtilsError::InvalidParameter(format!(
                "expected {} dates, got {}",
                steps - 1,
                dates.len()
            )));
        }
        let days: Vec<Option<i32>> = std::iter::once(None)
            .chain(dates.iter().map(|d| Some(days_since_epoch(*d))))
            .collect();
        columns.push(Column::new("date".into(), days).cast(&DataType::Date)?);
    }

    columns.push(Column::new("wealth".into(), curve.wealth.clone()));
    columns.push(Column::new("drawdown".into(), curve.drawdown.clone()));

    Ok(DataFrame::new(columns)?)
}

fn days_since_epoch(date: Date) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn date_column(name: &str, dates: impl Iterator<Item = Date>) -> Result<Column, UtilsError> {
    let days: Vec<i32> = dates.map(days_since_epoch).collect();
    Ok(Column::new(name.into(), days).cast(&DataType::Date)?)
}
