//! Rule engine for multi-criteria request ordering.
//!
//! Requests are sorted once, before search. Scores are computed per
//! request up front, then compared lexicographically or as a weighted sum.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{PriorityContext, PriorityRule, RuleScore};
use crate::scheduler::Request;

/// Rule combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Lexicographic: a later rule only decides ties of the earlier ones.
    #[default]
    Sequential,
    /// One weighted sum per request.
    Weighted,
}

/// Order of requests that tie on every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Keep the incoming order (the sort is stable).
    #[default]
    InsertionOrder,
    /// Deterministic by (course, section, teacher, session).
    ById,
}

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn PriorityRule>,
    weight: f64,
}

/// Orders requests by a list of [`PriorityRule`]s.
///
/// Sorting is stable, so requests that tie
/// on every rule keep their incoming order unless [`TieBreaker::ById`] is
/// set.
///
/// # Example
/// ```
/// use u_timetable::dispatching::{EvaluationMode, RuleEngine};
/// use u_timetable::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_mode(EvaluationMode::Weighted)
///     .with_weighted_rule(rules::FewestCandidates, 1.0)
///     .with_weighted_rule(rules::BusiestTeacher, 10.0);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an engine without rules.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            tie_breaker: TieBreaker::InsertionOrder,
            epsilon: 1e-9,
        }
    }

    /// Appends a rule with weight 1.0.
    pub fn with_rule<R: PriorityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 1.0,
        });
        self
    }

    /// Appends a rule with an explicit weight.
    pub fn with_weighted_rule<R: PriorityRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Sets how rules combine.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the order of full ties.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|wr| wr.rule.name()).collect()
    }

    /// Sorts requests by priority (highest priority first).
    ///
    /// Returns indices into the request slice. Each rule is evaluated once
    /// per request.
    pub fn sort_indices(&self, requests: &[Request], context: &PriorityContext) -> Vec<usize> {
        if requests.is_empty() {
            return Vec::new();
        }

        let mut indices: Vec<usize> = (0..requests.len()).collect();

        match self.mode {
            EvaluationMode::Sequential => {
                let scores: Vec<Vec<RuleScore>> = requests
                    .iter()
                    .map(|r| {
                        self.rules
                            .iter()
                            .map(|wr| wr.rule.evaluate(r, context))
                            .collect()
                    })
                    .collect();
                indices.sort_by(|&a, &b| {
                    self.compare_sequential(&scores[a], &scores[b])
                        .then_with(|| self.final_tie(&requests[a], &requests[b]))
                });
            }
            EvaluationMode::Weighted => {
                let scores: Vec<f64> = requests
                    .iter()
                    .map(|r| self.weighted_score(r, context))
                    .collect();
                indices.sort_by(|&a, &b| {
                    let diff = scores[a] - scores[b];
                    let primary = if diff.abs() > self.epsilon {
                        scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal)
                    } else {
                        Ordering::Equal
                    };
                    primary.then_with(|| self.final_tie(&requests[a], &requests[b]))
                });
            }
        }

        indices
    }

    fn compare_sequential(&self, a: &[RuleScore], b: &[RuleScore]) -> Ordering {
        for (score_a, score_b) in a.iter().zip(b) {
            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }

    fn final_tie(&self, a: &Request, b: &Request) -> Ordering {
        match self.tie_breaker {
            TieBreaker::InsertionOrder => Ordering::Equal,
            TieBreaker::ById => a.sort_key().cmp(&b.sort_key()),
        }
    }

    fn weighted_score(&self, request: &Request, context: &PriorityContext) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(request, context) * wr.weight)
            .sum()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
