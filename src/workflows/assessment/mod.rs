pub mod catalog;
pub mod domain;
pub mod import;
pub mod report;
pub mod repository;
pub mod scoring;
pub mod service;
pub mod session;

pub use catalog::AssessmentCatalog;
pub use domain::{
    Assessment, CategoryTheme, DefinitionError, ScoreTier, TierInterpretation,
};
pub use import::{AnswerSheetImporter, ImportError};
pub use report::{AssessmentResult, AssessmentResultSummary};
pub use repository::{AssessmentRecord, InMemoryResultRepository, ResultRepository};
pub use service::{AssessmentService, ServiceError};
pub use session::{AnswerMap, AssessmentSession, SessionError, SessionPosition, StepOutcome};
