//! Ordinary least squares factor regression with robust inference.

use cyclealpha_math::{
    MathError, normal_two_sided_p_value, ordinary_least_squares, student_t_two_sided_p_value,
};
use cyclealpha_primitives::{Coefficient, ModelSpec, Observation, RegressionResult, TimeSeriesFrame};
use cyclealpha_traits::{EstimatorError, Regressor};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::{CovarianceKind, ModelError};

/// Reference distribution for coefficient t-statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceDistribution {
    /// Standard normal (asymptotic).
    #[default]
    Normal,
    /// Student's t with `n - k` degrees of freedom.
    StudentT,
}

/// Configuration for the OLS regressor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionConfig {
    /// Coefficient covariance estimator.
    pub covariance: CovarianceKind,
    /// Reference distribution for p-values.
    pub reference: ReferenceDistribution,
}

/// Factor regressor.
///
/// Fits `target = intercept + Σ beta_f * factor_f [+ gamma * is_target_phase]`
/// by OLS and reports HAC standard errors by default.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressor {
    config: RegressionConfig,
}

impl OlsRegressor {
    /// Create a new regressor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegressionConfig::default())
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RegressionConfig {
        &self.config
    }

    /// Fit a model over a whole frame.
    ///
    /// # Errors
    /// Returns `ModelError` wrapping the estimator error.
    pub fn fit_frame(
        &self,
        frame: &TimeSeriesFrame,
        spec: &ModelSpec,
    ) -> Result<RegressionResult, ModelError> {
        self.fit(frame.observations(), spec).map_err(ModelError::from)
    }
}

impl Regressor for OlsRegressor {
    type Config = RegressionConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn fit(
        &self,
        observations: &[Observation],
        spec: &ModelSpec,
    ) -> Result<RegressionResult, EstimatorError> {
        let names = spec.coefficient_names();
        if names.iter().enumerate().any(|(i, n)| names[..i].contains(n)) {
            return Err(EstimatorError::InvalidConfig("duplicate factor column".to_string()));
        }

        let n = observations.len();
        let k = names.len();
        let required = spec.min_observations();
        if n < required {
            return Err(EstimatorError::InsufficientData { required, actual: n });
        }

        let (y, x) = design(observations, spec);

        // A constant regressor duplicates the intercept. Name it explicitly;
        // this is the expected failure for windows without target-phase days.
        if let Some(j) = (1..k).find(|&j| is_constant(x.column(j).iter().copied())) {
            return Err(EstimatorError::SingularDesign {
                detail: format!("{} is constant over the sample", names[j]),
            });
        }

        let ols = ordinary_least_squares(&y, &x).map_err(|e| match e {
            MathError::Singular { column } => EstimatorError::SingularDesign {
                detail: format!("{} is collinear with earlier regressors", names[column]),
            },
            other => EstimatorError::LinearAlgebra(other.to_string()),
        })?;

        let cov = self.config.covariance.covariance(&x, &ols.residuals, &ols.xtx_inv)?;

        let df_resid = (n - k) as f64;
        let coefficients = names
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let estimate = ols.coefficients[j];
                let std_error = cov[[j, j]].max(0.0).sqrt();
                let t_statistic = estimate / std_error;
                let p_value = match self.config.reference {
                    ReferenceDistribution::Normal => normal_two_sided_p_value(t_statistic),
                    ReferenceDistribution::StudentT => {
                        student_t_two_sided_p_value(t_statistic, df_resid)
                    }
                }
                .map_err(|e| EstimatorError::LinearAlgebra(e.to_string()))?;
                Ok(Coefficient {
                    name: (*name).to_string(),
                    estimate,
                    std_error,
                    t_statistic,
                    p_value,
                })
            })
            .collect::<Result<Vec<_>, EstimatorError>>()?;

        let adj_r_squared = 1.0 - (1.0 - ols.r_squared) * (n - 1) as f64 / df_resid;

        Ok(RegressionResult {
            coefficients,
            n_observations: n,
            r_squared: ols.r_squared,
            adj_r_squared,
            residual_std: (ols.ssr / df_resid).sqrt(),
        })
    }
}

/// Build the regressand and the design matrix `[1 | factors | indicator]`.
fn design(observations: &[Observation], spec: &ModelSpec) -> (Array1<f64>, Array2<f64>) {
    let n = observations.len();
    let k = spec.n_regressors();

    let y: Array1<f64> = observations.iter().map(|o| o.target(spec.target)).collect();
    let x = Array2::from_shape_fn((n, k), |(i, j)| {
        let obs = &observations[i];
        match j {
            0 => 1.0,
            j if j <= spec.factors.len() => obs.factor(spec.factors[j - 1]),
            _ => obs.indicator(),
        }
    });

    (y, x)
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    values.next().is_none_or(|first| values.all(|v| v == first))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cyclealpha_primitives::{Date, FactorColumn, TargetColumn};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    /// Business-day-like dates spanning several calendar years.
    fn synthetic(n: usize, seed: u64, noise: f64) -> Vec<Observation> {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = Date::from_ymd_opt(2021, 1, 4).unwrap();
        (0..n)
            .map(|i| {
                let date = start + chrono::Duration::days(i as i64 * 2);
                let mkt = rng.gen_range(-0.02..0.02);
                let smb = rng.gen_range(-0.01..0.01);
                let hml = rng.gen_range(-0.01..0.01);
                let rf = 0.0001;
                let mut o = Observation::new(date, 0.0, rf, mkt, smb, hml);
                let e = if noise > 0.0 { rng.gen_range(-noise..noise) } else { 0.0 };
                o.asset_return =
                    rf + 0.0002 + 0.9 * mkt + 0.3 * smb - 0.2 * hml + 0.0005 * o.indicator() + e;
                o
            })
            .collect()
    }

    #[test]
    fn exact_linear_target_recovers_coefficients() {
        let obs = synthetic(800, 1, 0.0);
        let result = OlsRegressor::new().fit(&obs, &ModelSpec::default()).unwrap();

        let expected = [
            ("intercept", 0.0002),
            ("mkt_rf", 0.9),
            ("smb", 0.3),
            ("hml", -0.2),
            ("is_target_phase", 0.0005),
        ];
        for (name, value) in expected {
            let c = result.get(name).unwrap();
            assert_relative_eq!(c.estimate, value, epsilon = 1e-8);
            assert!(c.p_value < 1e-6, "{name} p-value {}", c.p_value);
        }
        assert_relative_eq!(result.r_squared, 1.0, epsilon = 1e-10);
        assert_eq!(result.n_observations, 800);
    }

    #[test]
    fn noisy_fit_is_close_and_keys_are_fixed() {
        let spec = ModelSpec::default();
        let regressor = OlsRegressor::new();

        let a = regressor.fit(&synthetic(600, 2, 0.002), &spec).unwrap();
        let b = regressor.fit(&synthetic(700, 3, 0.002), &spec).unwrap();

        assert_eq!(a.names(), b.names());
        assert_eq!(a.names(), spec.coefficient_names());
        assert_relative_eq!(a.estimate("mkt_rf").unwrap(), 0.9, epsilon = 0.05);
        assert!(a.get("mkt_rf").unwrap().p_value < 1e-10);
        for c in &a.coefficients {
            assert!(c.std_error > 0.0);
            assert!((0.0..=1.0).contains(&c.p_value));
            assert_relative_eq!(c.t_statistic, c.estimate / c.std_error);
        }
    }

    #[test]
    fn hac_differs_from_classical() {
        let obs = synthetic(400, 4, 0.003);
        let spec = ModelSpec::default();

        let hac = OlsRegressor::new().fit(&obs, &spec).unwrap();
        let classical = OlsRegressor::with_config(RegressionConfig {
            covariance: CovarianceKind::Classical,
            reference: ReferenceDistribution::StudentT,
        })
        .fit(&obs, &spec)
        .unwrap();

        // Same point estimates, different inference.
        for (h, c) in hac.coefficients.iter().zip(&classical.coefficients) {
            assert_relative_eq!(h.estimate, c.estimate, epsilon = 1e-14);
        }
        assert!(
            (hac.get("mkt_rf").unwrap().std_error - classical.get("mkt_rf").unwrap().std_error)
                .abs()
                > 0.0
        );
    }

    #[test]
    fn insufficient_data() {
        let obs = synthetic(5, 5, 0.001);
        let err = OlsRegressor::new().fit(&obs, &ModelSpec::default()).unwrap_err();
        assert_eq!(err, EstimatorError::InsufficientData { required: 6, actual: 5 });
    }

    #[test]
    fn minimum_sample_fits() {
        let obs = synthetic(6, 6, 0.001);
        let spec =
            ModelSpec::new(FactorColumn::FAMA_FRENCH.to_vec(), TargetColumn::ExcessReturn, false);
        assert!(OlsRegressor::new().fit(&obs[..5], &spec).is_ok());
    }

    #[test]
    fn no_target_days_is_singular() {
        // 2021 and 2022 only: no pre-election observations.
        let obs: Vec<_> =
            synthetic(300, 7, 0.001).into_iter().filter(|o| !o.is_target_phase).collect();
        let err = OlsRegressor::new().fit(&obs, &ModelSpec::default()).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("is_target_phase"));
    }

    #[test]
    fn all_target_days_is_singular() {
        let obs: Vec<_> =
            synthetic(900, 8, 0.001).into_iter().filter(|o| o.is_target_phase).collect();
        assert!(obs.len() > 10);
        let err = OlsRegressor::new().fit(&obs, &ModelSpec::default()).unwrap_err();
        assert!(matches!(err, EstimatorError::SingularDesign { .. }));
    }

    #[test]
    fn collinear_factors_are_singular() {
        let mut obs = synthetic(100, 9, 0.001);
        for o in &mut obs {
            o.value_factor = 2.0 * o.size_factor;
        }
        let spec =
            ModelSpec::new(FactorColumn::FAMA_FRENCH.to_vec(), TargetColumn::ExcessReturn, false);
        let err = OlsRegressor::new().fit(&obs, &spec).unwrap_err();
        assert_eq!(
            err,
            EstimatorError::SingularDesign {
                detail: "hml is collinear with earlier regressors".to_string()
            }
        );
    }

    #[test]
    fn duplicate_factor_rejected() {
        let obs = synthetic(50, 10, 0.001);
        let spec = ModelSpec::new(
            vec![FactorColumn::MarketExcess, FactorColumn::MarketExcess],
            TargetColumn::ExcessReturn,
            false,
        );
        assert!(matches!(
            OlsRegressor::new().fit(&obs, &spec),
            Err(EstimatorError::InvalidConfig(_))
        ));
    }
}
