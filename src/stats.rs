//! Category counts over a finished run.
//!
//! Usually obtained through [`Analyses::with_statistics`](crate::Analyses::with_statistics).

use crate::{HybridCategory, HybridResult};
use serde::Serialize;
use std::fmt;

/// Category distribution over one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStatistics {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub error: usize,
    /// Mean lexical score over all rows, rounded to 2 decimals
    pub mean_lexical_score: f64,
}

impl RunStatistics {
    pub fn from_results(results: &[HybridResult]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.hybrid_category {
                HybridCategory::Positive => stats.positive += 1,
                HybridCategory::Negative => stats.negative += 1,
                HybridCategory::Neutral => stats.neutral += 1,
                HybridCategory::Error => stats.error += 1,
            }
        }
        if !results.is_empty() {
            let sum: f64 = results.iter().map(|r| r.lexical_score).sum();
            stats.mean_lexical_score = (sum / results.len() as f64 * 100.0).round() / 100.0;
        }
        stats
    }

    pub fn count(&self, category: HybridCategory) -> usize {
        match category {
            HybridCategory::Positive => self.positive,
            HybridCategory::Negative => self.negative,
            HybridCategory::Neutral => self.neutral,
            HybridCategory::Error => self.error,
        }
    }

    /// Share of rows in `category`, in percent.
    pub fn percentage(&self, category: HybridCategory) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(category) as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in [
            HybridCategory::Positive,
            HybridCategory::Negative,
            HybridCategory::Neutral,
            HybridCategory::Error,
        ] {
            writeln!(
                f,
                "{:<8} {:>5} ({:.1}%)",
                category.as_str(),
                self.count(category),
                self.percentage(category)
            )?;
        }
        write!(f, "total    {:>5}, mean lexical score {:+.2}", self.total, self.mean_lexical_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn row(category: HybridCategory, score: f64) -> HybridResult {
        let mut result = HybridResult::failed("x", "y");
        result.hybrid_category = category;
        result.lexical_score = score;
        result.lexical_category = category.category().unwrap_or(Category::Neutral);
        result
    }

    #[test]
    fn test_counts_and_mean() {
        let results = vec![
            row(HybridCategory::Positive, 0.5),
            row(HybridCategory::Positive, 0.3),
            row(HybridCategory::Negative, -0.4),
            row(HybridCategory::Error, 0.0),
        ];
        let stats = RunStatistics::from_results(&results);
        assert_eq!(stats.positive, 2);
        assert_eq!(stats.error, 1);
        assert_eq!(stats.mean_lexical_score, 0.1);
        assert_eq!(stats.percentage(HybridCategory::Positive), 50.0);

        insta::assert_snapshot!(stats.to_string(), @r###"
        positive     2 (50.0%)
        negative     1 (25.0%)
        neutral      0 (0.0%)
        error        1 (25.0%)
        total        4, mean lexical score +0.10
        "###);
    }

    #[test]
    fn test_empty_run() {
        let stats = RunStatistics::from_results(&[]);
        assert_eq!(stats, RunStatistics::default());
        assert_eq!(stats.percentage(HybridCategory::Neutral), 0.0);
    }
}
