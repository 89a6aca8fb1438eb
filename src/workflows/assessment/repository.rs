use super::report::AssessmentResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Identifier wrapper for recorded assessment results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResultId(pub String);

/// A completed assessment handed to the save/report collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRecord {
    pub result_id: ResultId,
    pub assessment_slug: &'static str,
    pub result: AssessmentResult,
    pub recorded_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn overview(&self) -> RecordOverview {
        RecordOverview {
            result_id: self.result_id.clone(),
            assessment_slug: self.assessment_slug,
            final_score: self.result.final_score.round() as u8,
            tier_label: self.result.tier.label(),
            recorded_at: self.recorded_at,
        }
    }
}

/// Condensed listing entry for report screens.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOverview {
    pub result_id: ResultId,
    pub assessment_slug: &'static str,
    pub final_score: u8,
    pub tier_label: &'static str,
    pub recorded_at: DateTime<Utc>,
}

/// Storage abstraction so the engine can hand results off without knowing
/// where they land. The engine itself never persists anything.
pub trait ResultRepository: Send + Sync {
    fn save(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &ResultId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<RecordOverview>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("result already recorded")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Session-lifetime store backing the demo deployment.
#[derive(Debug, Default)]
pub struct InMemoryResultRepository {
    records: Mutex<BTreeMap<ResultId, AssessmentRecord>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultRepository for InMemoryResultRepository {
    fn save(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("results store poisoned".to_string()))?;

        if records.contains_key(&record.result_id) {
            return Err(RepositoryError::Conflict);
        }

        records.insert(record.result_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ResultId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let records = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("results store poisoned".to_string()))?;

        Ok(records.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<RecordOverview>, RepositoryError> {
        let records = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("results store poisoned".to_string()))?;

        let mut overviews: Vec<RecordOverview> = records
            .values()
            .map(AssessmentRecord::overview)
            .collect();
        overviews.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        overviews.truncate(limit);

        Ok(overviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::catalog::owner_centricity;
    use crate::workflows::assessment::report::AssessmentResult;
    use crate::workflows::assessment::session::AnswerMap;

    fn record(id: &str) -> AssessmentRecord {
        let assessment = owner_centricity();
        AssessmentRecord {
            result_id: ResultId(id.to_string()),
            assessment_slug: assessment.slug,
            result: AssessmentResult::compute(&assessment, &AnswerMap::new()),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn save_then_fetch_round_trips() {
        let repository = InMemoryResultRepository::new();
        let saved = repository.save(record("res-000001")).expect("saves");

        let fetched = repository
            .fetch(&saved.result_id)
            .expect("fetch succeeds")
            .expect("record present");
        assert_eq!(fetched.result_id, saved.result_id);
    }

    #[test]
    fn duplicate_ids_conflict() {
        let repository = InMemoryResultRepository::new();
        repository.save(record("res-000001")).expect("first save");

        let error = repository
            .save(record("res-000001"))
            .expect_err("duplicate rejected");
        assert!(matches!(error, RepositoryError::Conflict));
    }

    #[test]
    fn recent_lists_newest_first_up_to_limit() {
        let repository = InMemoryResultRepository::new();
        for index in 1..=3 {
            repository
                .save(record(&format!("res-{index:06}")))
                .expect("saves");
        }

        let overviews = repository.recent(2).expect("listing succeeds");
        assert_eq!(overviews.len(), 2);
    }
}
