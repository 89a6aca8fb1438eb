use super::domain::{Assessment, CategoryTheme, ScoreTier, TierInterpretation};
use super::scoring::{category_score, final_score};
use super::session::AnswerMap;
use serde::Serialize;

/// Per-category outcome inside a result. `score` is `None` until at least one
/// question in the category has been answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub name: &'static str,
    pub weight: f64,
    pub theme: CategoryTheme,
    pub score: Option<f64>,
    pub tier: Option<ScoreTier>,
    pub answered: usize,
    pub questions: usize,
}

/// Derived result for an answer map at a point in time. Always recomputed
/// from the answers so it cannot drift from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub assessment_slug: &'static str,
    pub assessment_title: &'static str,
    pub category_scores: Vec<CategoryScore>,
    pub final_score: f64,
    pub tier: ScoreTier,
}

impl AssessmentResult {
    pub fn compute(assessment: &Assessment, answers: &AnswerMap) -> Self {
        let max_option_score = assessment.max_option_score();

        let category_scores = assessment
            .categories
            .iter()
            .map(|category| {
                let score = category_score(category, answers, max_option_score);
                let answered = category
                    .questions
                    .iter()
                    .filter(|question| answers.contains_key(question.id))
                    .count();

                CategoryScore {
                    name: category.name,
                    weight: category.weight,
                    theme: category.theme,
                    score,
                    tier: score.map(ScoreTier::for_score),
                    answered,
                    questions: category.questions.len(),
                }
            })
            .collect();

        let overall = final_score(assessment, answers);

        Self {
            assessment_slug: assessment.slug,
            assessment_title: assessment.title,
            category_scores,
            final_score: overall,
            tier: ScoreTier::for_score(overall),
        }
    }

    pub fn interpretation(&self) -> TierInterpretation {
        self.tier.interpretation()
    }

    /// Display-ready view with rounded scores and labels attached.
    pub fn summary(&self) -> AssessmentResultSummary {
        let categories = self
            .category_scores
            .iter()
            .map(|entry| CategoryScoreView {
                name: entry.name,
                theme: entry.theme,
                accent_hex: entry.theme.accent_hex(),
                weight_pct: (entry.weight * 100.0).round() as u8,
                score: entry.score.map(|score| score.round() as u8),
                tier: entry.tier,
                tier_label: entry.tier.map(ScoreTier::label),
                answered: entry.answered,
                questions: entry.questions,
            })
            .collect();

        AssessmentResultSummary {
            assessment_slug: self.assessment_slug,
            assessment_title: self.assessment_title,
            final_score: self.final_score.round() as u8,
            tier: self.tier,
            tier_label: self.tier.label(),
            interpretation: self.tier.interpretation(),
            categories,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryScoreView {
    pub name: &'static str,
    pub theme: CategoryTheme,
    pub accent_hex: &'static str,
    pub weight_pct: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ScoreTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_label: Option<&'static str>,
    pub answered: usize,
    pub questions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResultSummary {
    pub assessment_slug: &'static str,
    pub assessment_title: &'static str,
    pub final_score: u8,
    pub tier: ScoreTier,
    pub tier_label: &'static str,
    pub interpretation: TierInterpretation,
    pub categories: Vec<CategoryScoreView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::catalog::owner_centricity;

    #[test]
    fn empty_answer_map_yields_unassessed_categories() {
        let assessment = owner_centricity();
        let result = AssessmentResult::compute(&assessment, &AnswerMap::new());

        assert_eq!(result.final_score, 0.0);
        assert_eq!(result.tier, ScoreTier::HighDependency);
        assert!(result
            .category_scores
            .iter()
            .all(|entry| entry.score.is_none() && entry.answered == 0));
    }

    #[test]
    fn summary_rounds_and_labels_scores() {
        let assessment = owner_centricity();
        let mut answers = AnswerMap::new();
        // Sales category at (4 + 3 + 3) / 3 * 25 = 83.33 -> rounds to 83, Good.
        answers.insert("customer_relationships".to_string(), 0);
        answers.insert("sales_process".to_string(), 1);
        answers.insert("new_customer_acquisition".to_string(), 1);

        let summary = AssessmentResult::compute(&assessment, &answers).summary();

        let sales = &summary.categories[0];
        assert_eq!(sales.score, Some(83));
        assert_eq!(sales.tier_label, Some("Good"));
        assert_eq!(sales.weight_pct, 25);
        assert_eq!(sales.answered, 3);

        assert_eq!(summary.final_score, 83);
        assert_eq!(summary.tier, ScoreTier::Good);
        assert_eq!(
            summary.interpretation.value_impact,
            "+10-15% above base valuation"
        );
    }
}
