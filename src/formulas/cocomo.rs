//! Basic COCOMO software effort model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Project class of the basic COCOMO model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    /// Small team, familiar problem, flexible requirements
    Organic,
    Semidetached,
    /// Tight hardware, software and operational constraints
    Embedded,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::Organic,
        ProjectType::Semidetached,
        ProjectType::Embedded,
    ];

    /// Fixed coefficients for this project class
    pub fn coefficients(&self) -> CocomoCoefficients {
        match self {
            ProjectType::Organic => CocomoCoefficients { a: 2.4, b: 1.05, c: 2.5, d: 0.38 },
            ProjectType::Semidetached => CocomoCoefficients { a: 3.0, b: 1.12, c: 2.5, d: 0.35 },
            ProjectType::Embedded => CocomoCoefficients { a: 3.6, b: 1.20, c: 2.5, d: 0.32 },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Organic => "Organic",
            ProjectType::Semidetached => "Semidetached",
            ProjectType::Embedded => "Embedded",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|pt| pt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::UnknownProjectType(s.to_string()))
    }
}

/// Effort = a * KLOC^b, development time = c * effort^d
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CocomoCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocomoEstimate {
    /// Person-months
    pub effort: f64,
    /// Calendar months
    pub development_time: f64,
}

impl CocomoEstimate {
    /// Average head count over the schedule
    pub fn average_staffing(&self) -> f64 {
        if self.development_time > 0.0 {
            self.effort / self.development_time
        } else {
            0.0
        }
    }
}

/// Estimate effort and schedule with the basic COCOMO model.
///
/// Returns a zero estimate when `kloc` is not positive.
pub fn calculate_cocomo(kloc: f64, project_type: ProjectType) -> CocomoEstimate {
    if kloc <= 0.0 {
        return CocomoEstimate::default();
    }

    let k = project_type.coefficients();
    let effort = k.a * kloc.powf(k.b);
    let development_time = k.c * effort.powf(k.d);

    CocomoEstimate {
        effort,
        development_time,
    }
}
