use super::domain::Assessment;
use super::report::AssessmentResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Selected option index per question id. A question is answered iff its id
/// is present; the map only grows until a retake clears it.
pub type AnswerMap = BTreeMap<String, usize>;

/// Where the participant currently is in the assessment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPosition {
    AtCategory(usize),
    ShowingResults,
}

/// Outcome of an `advance` request. `NotReady` is the guarded no-op the UI
/// renders as a disabled button, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Advanced,
    Completed,
    NotReady,
}

/// Rejected answer events. These originate outside the engine (a stale UI, a
/// malformed import row), so they are typed rather than panicked on.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("question '{question}' is not part of this assessment")]
    UnknownQuestion { question: String },
    #[error("question '{question}' has {available} options, index {index} does not exist")]
    UnknownOption {
        question: String,
        index: usize,
        available: usize,
    },
}

/// One participant's pass through an assessment: the answer map plus the
/// navigation position, owned by a single caller and mutated only through
/// the methods below. Scores are always recomputed from this state, never
/// cached beside it.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    assessment: Assessment,
    answers: AnswerMap,
    position: SessionPosition,
}

impl AssessmentSession {
    pub fn new(assessment: &Assessment) -> Self {
        Self {
            assessment: assessment.clone(),
            answers: AnswerMap::new(),
            position: SessionPosition::AtCategory(0),
        }
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn position(&self) -> SessionPosition {
        self.position
    }

    /// Record a selection. Re-answering a question overwrites the previous
    /// choice; revisited categories stay editable.
    pub fn answer(&mut self, question_id: &str, option_index: usize) -> Result<(), SessionError> {
        let question =
            self.assessment
                .question(question_id)
                .ok_or_else(|| SessionError::UnknownQuestion {
                    question: question_id.to_string(),
                })?;

        if option_index >= question.options.len() {
            return Err(SessionError::UnknownOption {
                question: question_id.to_string(),
                index: option_index,
                available: question.options.len(),
            });
        }

        self.answers.insert(question_id.to_string(), option_index);
        Ok(())
    }

    pub fn is_category_complete(&self, index: usize) -> bool {
        self.assessment
            .categories
            .get(index)
            .map(|category| {
                category
                    .questions
                    .iter()
                    .all(|question| self.answers.contains_key(question.id))
            })
            .unwrap_or(false)
    }

    /// Move forward one category, or to results from the last one. Gated on
    /// every question of the current category being answered.
    pub fn advance(&mut self) -> StepOutcome {
        let SessionPosition::AtCategory(index) = self.position else {
            return StepOutcome::NotReady;
        };

        if !self.is_category_complete(index) {
            return StepOutcome::NotReady;
        }

        if index + 1 < self.assessment.categories.len() {
            self.position = SessionPosition::AtCategory(index + 1);
            StepOutcome::Advanced
        } else {
            self.position = SessionPosition::ShowingResults;
            StepOutcome::Completed
        }
    }

    /// Step back to the previous category. Never gated; earlier categories
    /// are always open for review.
    pub fn back(&mut self) -> bool {
        match self.position {
            SessionPosition::AtCategory(index) if index > 0 => {
                self.position = SessionPosition::AtCategory(index - 1);
                true
            }
            _ => false,
        }
    }

    /// From the results screen only: clear every answer and restart at the
    /// first category.
    pub fn retake(&mut self) -> bool {
        if self.position != SessionPosition::ShowingResults {
            return false;
        }

        self.answers.clear();
        self.position = SessionPosition::AtCategory(0);
        true
    }

    /// Position-based progress: the fraction of categories reached, not of
    /// questions answered, so the bar does not jitter while answering within
    /// a category.
    pub fn progress_pct(&self) -> u8 {
        match self.position {
            SessionPosition::ShowingResults => 100,
            SessionPosition::AtCategory(index) => {
                let total = self.assessment.categories.len().max(1);
                (((index + 1) as f64 / total as f64) * 100.0).round() as u8
            }
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        (0..self.assessment.categories.len()).all(|index| self.is_category_complete(index))
    }

    /// Derive the current result from the live answer map.
    pub fn result(&self) -> AssessmentResult {
        AssessmentResult::compute(&self.assessment, &self.answers)
    }
}
