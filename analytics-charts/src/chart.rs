//! Chart kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chart kinds supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Line chart with point markers.
    Line,
    /// Vertical bar chart.
    Bar,
    /// Side-by-side comparison of two series.
    DoubleBar,
    /// Pie chart with legend.
    Pie,
}

impl ChartKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [Self::Line, Self::Bar, Self::DoubleBar, Self::Pie];

    /// Identifier used in responses and metric labels.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::DoubleBar => "double_bar",
            Self::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "double_bar" | "double-bar" | "doublebar" | "comparison" => Ok(Self::DoubleBar),
            "pie" => Ok(Self::Pie),
            _ => Err(format!("Unknown chart type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_from_str() {
        assert_eq!("line".parse::<ChartKind>(), Ok(ChartKind::Line));
        assert_eq!("BAR".parse::<ChartKind>(), Ok(ChartKind::Bar));
        assert_eq!("double-bar".parse::<ChartKind>(), Ok(ChartKind::DoubleBar));
        assert_eq!("pie".parse::<ChartKind>(), Ok(ChartKind::Pie));
        assert!("donut".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_chart_kind_roundtrips_through_as_str() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>(), Ok(kind));
        }
    }
}
