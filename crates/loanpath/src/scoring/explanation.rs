use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered factor label -> signed point contribution.
///
/// Serialized as a JSON object in insertion order. Whole-number contributions are written as
/// integers so fallback breakdowns read `28` rather than `28.0`; remote SHAP values keep their
/// fractional part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Explanation {
    factors: Vec<(String, f64)>,
}

impl Explanation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a factor. Replacing keeps the original position.
    pub fn insert(&mut self, label: impl Into<String>, contribution: f64) {
        let label = label.into();
        match self.factors.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = contribution,
            None => self.factors.push((label, contribution)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.factors
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, contribution)| *contribution)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.factors
            .iter()
            .map(|(label, contribution)| (label.as_str(), *contribution))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.factors.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl FromIterator<(String, f64)> for Explanation {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut explanation = Explanation::new();
        for (label, contribution) in iter {
            explanation.insert(label, contribution);
        }
        explanation
    }
}

impl Serialize for Explanation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.factors.len()))?;
        for (label, contribution) in &self.factors {
            if contribution.fract() == 0.0 && contribution.abs() < i64::MAX as f64 {
                map.serialize_entry(label, &(*contribution as i64))?;
            } else {
                map.serialize_entry(label, contribution)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Explanation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExplanationVisitor;

        impl<'de> Visitor<'de> for ExplanationVisitor {
            type Value = Explanation;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of factor labels to numeric contributions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut explanation = Explanation::new();
                while let Some((label, contribution)) = access.next_entry::<String, f64>()? {
                    explanation.insert(label, contribution);
                }
                Ok(explanation)
            }
        }

        deserializer.deserialize_map(ExplanationVisitor)
    }
}
