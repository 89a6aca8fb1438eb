use super::domain::Assessment;
use super::session::{AssessmentSession, SessionError};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Failures while hydrating a session from an exported answer sheet.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read answer sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer sheet CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not apply answer sheet to the session: {0}")]
    Session(#[from] SessionError),
    #[error("answer '{answer}' does not match any option of question '{question}'")]
    UnresolvedAnswer { question: String, answer: String },
}

/// Hydrates an assessment session from a `Question ID,Answer` CSV export.
/// Answers may be a 1-based option position or the option text (matched
/// case-insensitively with collapsed whitespace). Rows for unknown question
/// ids are ignored; the first row for a question wins.
pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        assessment: &Assessment,
    ) -> Result<AssessmentSession, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, assessment)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        assessment: &Assessment,
    ) -> Result<AssessmentSession, ImportError> {
        let mut session = AssessmentSession::new(assessment);
        let mut applied: HashSet<String> = HashSet::new();

        for row in parse_rows(reader)? {
            let question_id = row.question_id.trim();
            let Some(question) = assessment.question(question_id) else {
                continue;
            };
            if applied.contains(question_id) {
                continue;
            }

            let option_index = resolve_choice(&row.answer, question).ok_or_else(|| {
                ImportError::UnresolvedAnswer {
                    question: question_id.to_string(),
                    answer: row.answer.clone(),
                }
            })?;

            session.answer(question_id, option_index)?;
            applied.insert(question_id.to_string());
        }

        Ok(session)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(rename = "Question ID")]
    question_id: String,
    #[serde(rename = "Answer", default)]
    answer: String,
}

fn parse_rows<R: Read>(reader: R) -> Result<Vec<AnswerRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<AnswerRow>().collect()
}

fn resolve_choice(raw: &str, question: &super::domain::Question) -> Option<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // A bare number selects by 1-based position, as printed on the sheet.
    if let Ok(position) = trimmed.parse::<usize>() {
        if position >= 1 && position <= question.options.len() {
            return Some(position - 1);
        }
        return None;
    }

    let wanted = normalize_choice(trimmed);
    question
        .options
        .iter()
        .position(|option| normalize_choice(option.text) == wanted)
}

fn normalize_choice(value: &str) -> String {
    value
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::catalog::owner_centricity;
    use std::io::Cursor;

    #[test]
    fn hydrates_answers_by_position_and_text() {
        let assessment = owner_centricity();
        let csv = "Question ID,Answer\n\
customer_relationships,1\n\
sales_process,good documentation with minor gaps\n";

        let session = AnswerSheetImporter::from_reader(Cursor::new(csv), &assessment)
            .expect("import succeeds");

        assert_eq!(session.answers().get("customer_relationships"), Some(&0));
        assert_eq!(session.answers().get("sales_process"), Some(&1));
    }

    #[test]
    fn first_row_wins_on_duplicates() {
        let assessment = owner_centricity();
        let csv = "Question ID,Answer\n\
customer_relationships,2\n\
customer_relationships,4\n";

        let session = AnswerSheetImporter::from_reader(Cursor::new(csv), &assessment)
            .expect("import succeeds");

        assert_eq!(session.answers().get("customer_relationships"), Some(&1));
    }

    #[test]
    fn unknown_question_rows_are_ignored() {
        let assessment = owner_centricity();
        let csv = "Question ID,Answer\nnot_in_this_assessment,1\n";

        let session = AnswerSheetImporter::from_reader(Cursor::new(csv), &assessment)
            .expect("import succeeds");

        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn unresolvable_answers_for_known_questions_fail() {
        let assessment = owner_centricity();
        let csv = "Question ID,Answer\ncustomer_relationships,nonsense choice\n";

        let error = AnswerSheetImporter::from_reader(Cursor::new(csv), &assessment)
            .expect_err("unresolvable answer rejected");
        assert!(matches!(error, ImportError::UnresolvedAnswer { .. }));
    }

    #[test]
    fn out_of_range_positions_fail() {
        let assessment = owner_centricity();
        let csv = "Question ID,Answer\ncustomer_relationships,9\n";

        let error = AnswerSheetImporter::from_reader(Cursor::new(csv), &assessment)
            .expect_err("position beyond the option list rejected");
        assert!(matches!(error, ImportError::UnresolvedAnswer { .. }));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let assessment = owner_centricity();
        let error = AnswerSheetImporter::from_path("./does-not-exist.csv", &assessment)
            .expect_err("expected io error");
        assert!(matches!(error, ImportError::Io(_)));
    }
}
