use super::domain::{Assessment, Category, ScoreTier};
use super::session::AnswerMap;

/// Points-to-percentage factor: a 4-point scale maps through 25, a 5-point
/// scale through 20, so every assessment tops out at 100.
pub fn point_scale(max_option_score: u32) -> f64 {
    100.0 / f64::from(max_option_score.max(1))
}

/// Average of the answered option scores in a category, mapped onto 0-100.
/// `None` while no question in the category has been answered; the category
/// is then excluded from the weighted average rather than dragged to zero.
pub fn category_score(category: &Category, answers: &AnswerMap, max_option_score: u32) -> Option<f64> {
    let mut point_total = 0u32;
    let mut answered = 0u32;

    for question in &category.questions {
        let Some(&selected) = answers.get(question.id) else {
            continue;
        };
        if let Some(option) = question.options.get(selected) {
            point_total += option.score;
            answered += 1;
        }
    }

    if answered == 0 {
        return None;
    }

    Some(f64::from(point_total) / f64::from(answered) * point_scale(max_option_score))
}

/// Weighted average of the assessable category scores, re-normalized over the
/// weights of those categories only. A partially completed assessment
/// therefore reports a meaningful running score instead of an artificially
/// low one. Zero when nothing is answered.
pub fn final_score(assessment: &Assessment, answers: &AnswerMap) -> f64 {
    let max_option_score = assessment.max_option_score();
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for category in &assessment.categories {
        if let Some(score) = category_score(category, answers, max_option_score) {
            weighted_sum += score * category.weight;
            weight_sum += category.weight;
        }
    }

    if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        0.0
    }
}

/// Tier for a final score; boundaries resolve upward.
pub fn interpret(score: f64) -> ScoreTier {
    ScoreTier::for_score(score)
}
