use serde::{Deserialize, Serialize};

/// Qualitative bucket for a 0-100 score, carrying the advisory interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Excellent,
    Good,
    Developing,
    HighDependency,
}

impl ScoreTier {
    /// Boundary scores belong to the higher tier (70 is Good, 85 is Excellent).
    pub fn for_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::Excellent
        } else if score >= 70.0 {
            Self::Good
        } else if score >= 55.0 {
            Self::Developing
        } else {
            Self::HighDependency
        }
    }

    pub const fn ordered() -> [Self; 4] {
        [
            Self::Excellent,
            Self::Good,
            Self::Developing,
            Self::HighDependency,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Developing => "Developing",
            Self::HighDependency => "High Dependency",
        }
    }

    pub const fn interpretation(self) -> TierInterpretation {
        match self {
            Self::Excellent => TierInterpretation {
                description: "Your business demonstrates exceptional independence from owner involvement. This significantly enhances business value.",
                value_impact: "+20-25% above base valuation",
                readiness: "Ready for immediate exit consideration",
            },
            Self::Good => TierInterpretation {
                description: "Strong management systems with some areas for improvement. Moderate positive impact on value.",
                value_impact: "+10-15% above base valuation",
                readiness: "Ready for exit planning with minor improvements",
            },
            Self::Developing => TierInterpretation {
                description: "Moderate owner dependency that should be addressed before exit. Some impact on valuation.",
                value_impact: "Neutral to +5% above base valuation",
                readiness: "Needs 12-18 months of improvement before exit",
            },
            Self::HighDependency => TierInterpretation {
                description: "High owner dependency significantly impacts business value and exit options.",
                value_impact: "-15-25% below base valuation",
                readiness: "Requires 2-3 years of systematic improvement",
            },
        }
    }
}

/// Valuation guidance attached to a tier. The adjustment itself is applied by
/// the valuation collaborator, not computed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierInterpretation {
    pub description: &'static str,
    pub value_impact: &'static str,
    pub readiness: &'static str,
}

/// Visual identity for a category, resolved once at definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTheme {
    Blue,
    Green,
    Purple,
    Teal,
    Orange,
}

impl CategoryTheme {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Purple => "Purple",
            Self::Teal => "Teal",
            Self::Orange => "Orange",
        }
    }

    pub const fn accent_hex(self) -> &'static str {
        match self {
            Self::Blue => "#3b82f6",
            Self::Green => "#22c55e",
            Self::Purple => "#a855f7",
            Self::Teal => "#14b8a6",
            Self::Orange => "#f97316",
        }
    }
}

/// One selectable answer. Scores are comparable within a question (higher is
/// better) and normalized against the assessment-wide maximum at scoring time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub text: &'static str,
    pub score: u32,
    pub explanation: &'static str,
}

/// A single prompt with its ordered options. The id is the stable key into
/// the session's answer map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: Vec<AnswerOption>,
}

/// A weighted group of questions. Weights are fractions of 1.0 across the
/// assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub weight: f64,
    pub theme: CategoryTheme,
    pub description: &'static str,
    pub questions: Vec<Question>,
}

/// Immutable assessment definition, validated once at load time and never
/// mutated while sessions run against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub slug: &'static str,
    pub title: &'static str,
    pub categories: Vec<Category>,
}

impl Assessment {
    /// Load-time validation. Malformed definitions are configuration errors
    /// for the operator; scoring itself never fails at runtime.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.categories.is_empty() {
            return Err(DefinitionError::EmptyAssessment {
                slug: self.slug.to_string(),
            });
        }

        let mut seen_ids = std::collections::HashSet::new();
        for category in &self.categories {
            if category.questions.is_empty() {
                return Err(DefinitionError::EmptyCategory {
                    category: category.name.to_string(),
                });
            }
            if !(0.0..=1.0).contains(&category.weight) {
                return Err(DefinitionError::InvalidWeight {
                    category: category.name.to_string(),
                    weight: category.weight,
                });
            }
            for question in &category.questions {
                if question.options.len() < 2 {
                    return Err(DefinitionError::TooFewOptions {
                        question: question.id.to_string(),
                        count: question.options.len(),
                    });
                }
                if question.options.iter().any(|option| option.score == 0) {
                    return Err(DefinitionError::ZeroScoreOption {
                        question: question.id.to_string(),
                    });
                }
                if !seen_ids.insert(question.id) {
                    return Err(DefinitionError::DuplicateQuestionId {
                        question: question.id.to_string(),
                    });
                }
            }
        }

        let weight_sum: f64 = self.categories.iter().map(|category| category.weight).sum();
        if (weight_sum - 1.0).abs() > 0.01 {
            // Soft invariant: the source data tolerates uneven weights, so we
            // flag rather than refuse.
            tracing::warn!(
                assessment = self.slug,
                weight_sum,
                "category weights do not sum to 1.0"
            );
        }

        Ok(())
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.categories
            .iter()
            .flat_map(|category| category.questions.iter())
            .find(|question| question.id == question_id)
    }

    pub fn question_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.questions.len())
            .sum()
    }

    /// Highest option score anywhere in the definition. Anchors the 0-100
    /// normalization so a 4-point and a 5-point assessment both top out at 100.
    pub fn max_option_score(&self) -> u32 {
        self.categories
            .iter()
            .flat_map(|category| category.questions.iter())
            .flat_map(|question| question.options.iter())
            .map(|option| option.score)
            .max()
            .unwrap_or(1)
    }
}

/// Definition-load failures. Fatal for the operator, invisible to end users.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("assessment '{slug}' has no categories")]
    EmptyAssessment { slug: String },
    #[error("category '{category}' has no questions")]
    EmptyCategory { category: String },
    #[error("category '{category}' has weight {weight}, expected a fraction in 0..=1")]
    InvalidWeight { category: String, weight: f64 },
    #[error("question '{question}' has {count} option(s), at least 2 required")]
    TooFewOptions { question: String, count: usize },
    #[error("question '{question}' has an option with score 0")]
    ZeroScoreOption { question: String },
    #[error("question id '{question}' appears more than once")]
    DuplicateQuestionId { question: String },
}
