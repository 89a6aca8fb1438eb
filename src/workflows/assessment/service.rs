use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::catalog::AssessmentCatalog;
use super::repository::{AssessmentRecord, RepositoryError, ResultId, ResultRepository};
use super::session::AssessmentSession;
use chrono::Utc;

static RESULT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_result_id() -> ResultId {
    let id = RESULT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResultId(format!("res-{id:06}"))
}

/// Service composing the assessment catalog with the result repository: the
/// stable contract the application shell talks to.
pub struct AssessmentService<R> {
    catalog: AssessmentCatalog,
    repository: Arc<R>,
}

impl<R> AssessmentService<R>
where
    R: ResultRepository + 'static,
{
    pub fn new(catalog: AssessmentCatalog, repository: Arc<R>) -> Self {
        Self {
            catalog,
            repository,
        }
    }

    pub fn catalog(&self) -> &AssessmentCatalog {
        &self.catalog
    }

    /// Start a fresh session for a cataloged assessment. The caller owns the
    /// session; the service sees it again only at completion.
    pub fn begin(&self, slug: &str) -> Result<AssessmentSession, ServiceError> {
        let assessment = self
            .catalog
            .get(slug)
            .ok_or_else(|| ServiceError::UnknownAssessment(slug.to_string()))?;

        Ok(AssessmentSession::new(assessment))
    }

    /// Record a finished session's result. Guarded on every question being
    /// answered; the derived result is computed here, immediately before the
    /// hand-off, so it cannot be stale.
    pub fn complete(
        &self,
        session: &AssessmentSession,
    ) -> Result<AssessmentRecord, ServiceError> {
        if !session.is_complete() {
            return Err(ServiceError::Unfinished {
                answered: session.answered_count(),
                questions: session.assessment().question_count(),
            });
        }

        let record = AssessmentRecord {
            result_id: next_result_id(),
            assessment_slug: session.assessment().slug,
            result: session.result(),
            recorded_at: Utc::now(),
        };

        let stored = self.repository.save(record)?;
        Ok(stored)
    }

    /// Recent hand-offs, newest first, for report screens.
    pub fn recent_results(
        &self,
        limit: usize,
    ) -> Result<Vec<super::repository::RecordOverview>, ServiceError> {
        Ok(self.repository.recent(limit)?)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no assessment named '{0}' in the catalog")]
    UnknownAssessment(String),
    #[error("assessment unfinished: {answered} of {questions} questions answered")]
    Unfinished { answered: usize, questions: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::repository::InMemoryResultRepository;
    use crate::workflows::assessment::ScoreTier;

    fn service() -> AssessmentService<InMemoryResultRepository> {
        let catalog = AssessmentCatalog::standard().expect("catalog builds");
        AssessmentService::new(catalog, Arc::new(InMemoryResultRepository::new()))
    }

    #[test]
    fn begin_rejects_unknown_slugs() {
        let error = service().begin("not-a-thing").expect_err("unknown slug");
        assert!(matches!(error, ServiceError::UnknownAssessment(_)));
    }

    #[test]
    fn complete_guards_on_unanswered_questions() {
        let service = service();
        let mut session = service.begin("owner-centricity").expect("session starts");
        session
            .answer("customer_relationships", 0)
            .expect("valid answer");

        let error = service.complete(&session).expect_err("unfinished rejected");
        assert!(matches!(error, ServiceError::Unfinished { .. }));
    }

    #[test]
    fn complete_records_the_derived_result() {
        let service = service();
        let mut session = service.begin("owner-centricity").expect("session starts");

        let ids: Vec<&'static str> = session
            .assessment()
            .categories
            .iter()
            .flat_map(|category| category.questions.iter())
            .map(|question| question.id)
            .collect();
        for id in ids {
            session.answer(id, 0).expect("valid answer");
        }

        let record = service.complete(&session).expect("result recorded");
        assert_eq!(record.assessment_slug, "owner-centricity");
        assert_eq!(record.result.tier, ScoreTier::Excellent);
        assert!(record.result_id.0.starts_with("res-"));
    }
}
