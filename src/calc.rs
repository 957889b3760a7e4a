//! Statistical folds applied to a row range of a real column.

use crate::error::ColDataError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A calculation selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Calculation {
    Minimum,
    Maximum,
    AbsoluteMinimum,
    AbsoluteMaximum,
    Mean,
    QuadraticMean,
    CubicMean,
}

impl Calculation {
    /// Every calculation, in reporting order
    pub fn all() -> &'static [Calculation] {
        &[
            Calculation::Minimum,
            Calculation::Maximum,
            Calculation::AbsoluteMinimum,
            Calculation::AbsoluteMaximum,
            Calculation::Mean,
            Calculation::QuadraticMean,
            Calculation::CubicMean,
        ]
    }

    /// Name shown in reports
    pub fn label(&self) -> &'static str {
        match self {
            Calculation::Minimum => "minimum",
            Calculation::Maximum => "maximum",
            Calculation::AbsoluteMinimum => "absolute minimum",
            Calculation::AbsoluteMaximum => "absolute maximum",
            Calculation::Mean => "mean",
            Calculation::QuadraticMean => "quadratic mean (RMS)",
            Calculation::CubicMean => "cubic mean",
        }
    }

    /// Apply the calculation to a slice of samples.
    ///
    /// Returns `None` for an empty slice.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        let (&first, rest) = values.split_first()?;
        let count = values.len() as f64;

        let value = match self {
            Calculation::Minimum => rest.iter().fold(first, |acc, &v| acc.min(v)),
            Calculation::Maximum => rest.iter().fold(first, |acc, &v| acc.max(v)),
            Calculation::AbsoluteMinimum => rest.iter().fold(first.abs(), |acc, &v| acc.min(v.abs())),
            Calculation::AbsoluteMaximum => rest.iter().fold(first.abs(), |acc, &v| acc.max(v.abs())),
            Calculation::Mean => values.iter().sum::<f64>() / count,
            Calculation::QuadraticMean => {
                (values.iter().map(|v| v * v).sum::<f64>() / count).sqrt()
            }
            Calculation::CubicMean => {
                (values.iter().map(|v| v * v * v).sum::<f64>() / count).cbrt()
            }
        };
        Some(value)
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Calculation {
    type Err = ColDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "min" | "minimum" => Ok(Calculation::Minimum),
            "max" | "maximum" => Ok(Calculation::Maximum),
            "abs-min" | "absmin" | "absolute-minimum" => Ok(Calculation::AbsoluteMinimum),
            "abs-max" | "absmax" | "absolute-maximum" => Ok(Calculation::AbsoluteMaximum),
            "mean" | "avg" | "average" => Ok(Calculation::Mean),
            "rms" | "rms-mean" | "rms-avg" | "quadratic" | "quadratic-rms" | "quadratic-mean" => {
                Ok(Calculation::QuadraticMean)
            }
            "cubic" | "cubic-mean" | "cubic-avg" => Ok(Calculation::CubicMean),
            other => Err(ColDataError::configuration(format!(
                "Unknown calculation '{}'. Available: min, max, abs-min, abs-max, mean, rms, cubic",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 4] = [-3.0, 1.0, 2.0, -0.5];

    #[test]
    fn test_extrema() {
        assert_eq!(Calculation::Minimum.apply(&SAMPLES), Some(-3.0));
        assert_eq!(Calculation::Maximum.apply(&SAMPLES), Some(2.0));
        assert_eq!(Calculation::AbsoluteMinimum.apply(&SAMPLES), Some(0.5));
        assert_eq!(Calculation::AbsoluteMaximum.apply(&SAMPLES), Some(3.0));
    }

    #[test]
    fn test_means() {
        assert_eq!(Calculation::Mean.apply(&SAMPLES), Some(-0.125));

        let rms = Calculation::QuadraticMean.apply(&[3.0, -3.0]).unwrap();
        assert!((rms - 3.0).abs() < 1e-12);

        let cubic = Calculation::CubicMean.apply(&[2.0, 2.0]).unwrap();
        assert!((cubic - 2.0).abs() < 1e-12);
        let negative = Calculation::CubicMean.apply(&[-1.0, -1.0]).unwrap();
        assert!((negative + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_slice() {
        for calculation in Calculation::all() {
            assert_eq!(calculation.apply(&[]), None);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("min".parse::<Calculation>().unwrap(), Calculation::Minimum);
        assert_eq!("absmax".parse::<Calculation>().unwrap(), Calculation::AbsoluteMaximum);
        assert_eq!("AVG".parse::<Calculation>().unwrap(), Calculation::Mean);
        assert_eq!("rms-avg".parse::<Calculation>().unwrap(), Calculation::QuadraticMean);
        assert_eq!("cubic-mean".parse::<Calculation>().unwrap(), Calculation::CubicMean);
        assert!("median".parse::<Calculation>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Calculation::QuadraticMean.to_string(), "quadratic mean (RMS)");
        assert_eq!(Calculation::all().len(), 7);
    }
}
