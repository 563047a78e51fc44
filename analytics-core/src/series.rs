//! Ordered label/value series - the input of every chart.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// One labelled value in a [`Series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// Category label (x-axis tick, bar caption, slice legend).
    pub label: String,
    /// Numeric value.
    pub value: f64,
}

/// An ordered mapping from label to value.
///
/// Order is significant: it decides x-axis, bar and slice order. Labels are not
/// required to be unique, but lookups by label return the first match.
///
/// Serializes as an array of `{label, value}` entries. Deserializes from
/// that array or from a JSON object, keeping the object's key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    entries: Vec<SeriesEntry>,
}

impl Series {
    /// Create an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.entries.push(SeriesEntry {
            label: label.into(),
            value,
        });
    }

    /// Builder-style append.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: f64) -> Self {
        self.push(label, value);
        self
    }

    /// Build a series from parallel label and value slices.
    ///
    /// Extra labels or values beyond the shorter slice are ignored.
    #[must_use]
    pub fn zip<S: AsRef<str>>(labels: &[S], values: &[f64]) -> Self {
        labels
            .iter()
            .zip(values)
            .map(|(label, value)| (label.as_ref().to_string(), *value))
            .collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the series carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &SeriesEntry> {
        self.entries.iter()
    }

    /// Iterate values in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    /// Iterate labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Value of the first entry with the given label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    /// Whether any entry carries the given label.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.label == label)
    }

    /// `(min, max)` of the values, or `None` for an empty series.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        bounds(self.values())
    }

    /// Sum of all values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values().sum()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(label, value)| SeriesEntry {
                    label: label.into(),
                    value,
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a SeriesEntry;
    type IntoIter = std::slice::Iter<'a, SeriesEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

struct SeriesVisitor;

impl<'de> Visitor<'de> for SeriesVisitor {
    type Value = Series;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of {label, value} entries or a label-to-number object")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Series, A::Error> {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(entry) = seq.next_element::<SeriesEntry>()? {
            entries.push(entry);
        }
        Ok(Series { entries })
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Series, A::Error> {
        let mut series = Series::new();
        while let Some((label, value)) = map.next_entry::<String, f64>()? {
            series.push(label, value);
        }
        Ok(series)
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SeriesVisitor)
    }
}

/// One category of a [`PairedSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedEntry {
    /// Shared category label.
    pub label: String,
    /// Value from the primary series.
    pub primary: f64,
    /// Value from the baseline series.
    pub baseline: f64,
}

/// Two series restricted to their common labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairedSeries {
    entries: Vec<PairedEntry>,
}

impl PairedSeries {
    /// Pair `primary` with `baseline` on their shared labels.
    ///
    /// Iteration follows `primary`'s order, filtered by membership in `baseline`.
    #[must_use]
    pub fn intersect(primary: &Series, baseline: &Series) -> Self {
        let entries = primary
            .iter()
            .filter_map(|entry| {
                baseline.get(&entry.label).map(|other| PairedEntry {
                    label: entry.label.clone(),
                    primary: entry.value,
                    baseline: other,
                })
            })
            .collect();
        Self { entries }
    }

    /// Number of shared categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the two series share no label.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate paired categories in order.
    pub fn iter(&self) -> impl Iterator<Item = &PairedEntry> {
        self.entries.iter()
    }

    /// `(min, max)` across both sides, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        bounds(self.entries.iter().flat_map(|e| [e.primary, e.baseline]))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_preserves_order() {
        let series = Series::new().with("b", 2.0).with("a", 1.0).with("c", 3.0);
        let labels: Vec<_> = series.labels().collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
        assert_eq!(series.bounds(), Some((1.0, 3.0)));
        assert!((series.total() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_get_returns_first_duplicate() {
        let series = Series::new().with("x", 1.0).with("x", 9.0);
        assert_eq!(series.get("x"), Some(1.0));
        assert_eq!(series.get("y"), None);
    }

    #[test]
    fn test_empty_series_has_no_bounds() {
        assert!(Series::new().bounds().is_none());
    }

    #[test]
    fn test_intersection_keeps_primary_order() {
        let a = Series::new().with("a", 1.0).with("b", 2.0);
        let b = Series::new().with("b", 3.0).with("c", 4.0);
        let paired = PairedSeries::intersect(&a, &b);

        assert_eq!(paired.len(), 1);
        let entry = paired.iter().next().expect("one entry");
        assert_eq!(entry.label, "b");
        assert!((entry.primary - 2.0).abs() < f64::EPSILON);
        assert!((entry.baseline - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_intersection_of_disjoint_series_is_empty() {
        let a = Series::new().with("a", 1.0);
        let b = Series::new().with("z", 1.0);
        assert!(PairedSeries::intersect(&a, &b).is_empty());
    }

    #[test]
    fn test_series_json_is_ordered_array() {
        let series = Series::new().with("Math", 90.0).with("Chem", 60.0);
        let json = serde_json::to_string(&series).expect("serialize");
        assert_eq!(
            json,
            r#"[{"label":"Math","value":90.0},{"label":"Chem","value":60.0}]"#
        );
        let back: Series = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, series);
    }

    #[test]
    fn test_series_from_object_keeps_key_order() {
        let series: Series =
            serde_json::from_str(r#"{"Math": 90, "Physics": 75, "Chem": 60}"#).expect("parse");
        assert_eq!(series.labels().collect::<Vec<_>>(), vec!["Math", "Physics", "Chem"]);
        assert_eq!(series.values().collect::<Vec<_>>(), vec![90.0, 75.0, 60.0]);
    }

    #[test]
    fn test_series_rejects_non_numeric_values() {
        assert!(serde_json::from_str::<Series>(r#"{"Math": "A"}"#).is_err());
        assert!(serde_json::from_str::<Series>("42").is_err());
    }
}
