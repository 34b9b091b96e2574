// src/evaluator/criteria.rs — Weighted judging criteria

use serde::{Deserialize, Serialize};

/// One named, weighted axis of evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub weight: f64,
    pub description: String,
}

impl Criterion {
    pub fn new(name: impl Into<String>, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            description: description.into(),
        }
    }
}

/// Ordered, immutable criteria table. Order drives prompt and feedback layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(Vec<Criterion>);

impl Default for Criteria {
    fn default() -> Self {
        Self(vec![
            Criterion::new("innovation", 0.25, "Novelty and creativity of the solution"),
            Criterion::new("technical", 0.30, "Technical implementation and code quality"),
            Criterion::new("impact", 0.25, "Potential social and business impact"),
            Criterion::new(
                "presentation",
                0.20,
                "Clarity of presentation and documentation",
            ),
        ])
    }
}

impl Criteria {
    /// Build a validated table.
    pub fn new(criteria: Vec<Criterion>) -> anyhow::Result<Self> {
        let table = Self(criteria);
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.0.is_empty() {
            anyhow::bail!("criteria table is empty");
        }
        for (i, c) in self.0.iter().enumerate() {
            if c.name.trim().is_empty() {
                anyhow::bail!("criterion #{} has no name", i + 1);
            }
            if !c.weight.is_finite() || c.weight < 0.0 {
                anyhow::bail!("criterion '{}' has invalid weight {}", c.name, c.weight);
            }
            if self.0[..i].iter().any(|prev| prev.name == c.name) {
                anyhow::bail!("criterion '{}' is listed twice", c.name);
            }
        }
        if self.total_weight() <= 0.0 {
            anyhow::bail!("criteria weights sum to zero");
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Criterion> {
        self.0.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.0.iter().map(|c| c.weight).sum()
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let c = Criteria::default();
        let names: Vec<&str> = c.names().collect();
        assert_eq!(names, vec!["innovation", "technical", "impact", "presentation"]);
        assert!((c.total_weight() - 1.0).abs() < 1e-9);
        assert!((c.get("technical").unwrap().weight - 0.30).abs() < 1e-9);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Criteria::new(vec![]).is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = Criteria::new(vec![
            Criterion::new("impact", 0.5, ""),
            Criterion::new("impact", 0.5, ""),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn test_rejects_negative_weight() {
        assert!(Criteria::new(vec![Criterion::new("impact", -0.1, "")]).is_err());
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        assert!(Criteria::new(vec![Criterion::new("impact", 0.0, "")]).is_err());
    }

    #[test]
    fn test_alternative_scheme() {
        let c = Criteria::new(vec![
            Criterion::new("design", 0.6, "Visual design"),
            Criterion::new("ux", 0.4, "User experience"),
        ])
        .unwrap();
        assert_eq!(c.len(), 2);
        assert!(c.get("innovation").is_none());
    }
}
