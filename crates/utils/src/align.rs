//! Alignment of return and factor tables into a tagged frame.

use cyclealpha_primitives::{Date, Observation, TimeSeriesFrame};
use polars::prelude::*;

use crate::UtilsError;

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
pub(crate) const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const DATE: &str = "date";
const ASSET_RETURN: &str = "asset_return";
const MKT_RF: &str = "mkt_rf";
const SMB: &str = "smb";
const HML: &str = "hml";
const RF: &str = "rf";

/// Source column names and units of the two input tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    /// Date column, present in both tables.
    pub date: String,
    /// Asset return column of the returns table.
    pub asset_return: String,
    /// Market excess return column of the factor table.
    pub market_excess: String,
    /// Size factor column.
    pub size: String,
    /// Value factor column.
    pub value: String,
    /// Risk-free rate column.
    pub risk_free: String,
    /// Multiplier applied to every factor table column, e.g. `0.01` for
    /// tables quoted in percent.
    pub factor_scale: f64,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: DATE.to_string(),
            asset_return: ASSET_RETURN.to_string(),
            market_excess: MKT_RF.to_string(),
            size: SMB.to_string(),
            value: HML.to_string(),
            risk_free: RF.to_string(),
            factor_scale: 1.0,
        }
    }
}

/// Inner-join asset returns with factors on date and build a [`TimeSeriesFrame`].
///
/// Rows with a null in any used column are dropped. The result is sorted by
/// date and every row is tagged with its cycle phase.
///
/// # Errors
/// - `MissingColumn` if a mapped column is absent.
/// - `InvalidParameter` for a non-positive factor scale.
/// - `Frame` for duplicate dates or non-finite values after the join.
pub fn align(
    mut returns: LazyFrame,
    mut factors: LazyFrame,
    columns: &ColumnMap,
) -> Result<TimeSeriesFrame, UtilsError> {
    if !(columns.factor_scale.is_finite() && columns.factor_scale > 0.0) {
        return Err(UtilsError::InvalidParameter(format!(
            "factor scale must be positive, got {}",
            columns.factor_scale
        )));
    }
    require(&mut returns, &[&columns.date, &columns.asset_return])?;
    require(
        &mut factors,
        &[&columns.date, &columns.market_excess, &columns.size, &columns.value, &columns.risk_free],
    )?;

    let returns = returns.select([
        col(columns.date.as_str()).cast(DataType::Date).alias(DATE),
        col(columns.asset_return.as_str()).cast(DataType::Float64).alias(ASSET_RETURN),
    ]);
    let scaled = |name: &str, alias: &str| {
        (col(name).cast(DataType::Float64) * lit(columns.factor_scale)).alias(alias)
    };
    let factors = factors.select([
        col(columns.date.as_str()).cast(DataType::Date).alias(DATE),
        scaled(&columns.market_excess, MKT_RF),
        scaled(&columns.size, SMB),
        scaled(&columns.value, HML),
        scaled(&columns.risk_free, RF),
    ]);

    let complete = [DATE, ASSET_RETURN, MKT_RF, SMB, HML, RF]
        .into_iter()
        .fold(lit(true), |acc, name| acc.and(col(name).is_not_null()));

    let df = returns
        .join(factors, [col(DATE)], [col(DATE)], JoinArgs::new(JoinType::Inner))
        .filter(complete)
        .sort([DATE], SortMultipleOptions::default())
        .with_column(col(DATE).cast(DataType::Int32))
        .collect()?;

    let days = df.column(DATE)?.i32()?;
    let asset = df.column(ASSET_RETURN)?.f64()?;
    let mkt = df.column(MKT_RF)?.f64()?;
    let smb = df.column(SMB)?.f64()?;
    let hml = df.column(HML)?.f64()?;
    let rf = df.column(RF)?.f64()?;

    let value = |ca: &Float64Chunked, i: usize| ca.get(i).unwrap_or(f64::NAN);
    let observations = days
        .into_no_null_iter()
        .enumerate()
        .map(|(i, day)| {
            Ok(Observation::new(
                date_from_days(day)?,
                value(asset, i),
                value(rf, i),
                value(mkt, i),
                value(smb, i),
                value(hml, i),
            ))
        })
        .collect::<Result<Vec<_>, UtilsError>>()?;

    Ok(TimeSeriesFrame::new(observations)?)
}

/// Convert days since the Unix epoch to a calendar date.
pub(crate) fn date_from_days(days: i32) -> Result<Date, UtilsError> {
    Date::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
        .ok_or(UtilsError::InvalidDate(days))
}

fn require(frame: &mut LazyFrame, names: &[&String]) -> Result<(), UtilsError> {
    let schema = frame.collect_schema()?;
    match names.iter().find(|name| schema.get(name.as_str()).is_none()) {
        Some(missing) => Err(UtilsError::MissingColumn((*missing).clone())),
        None => Ok(()),
    }
}
