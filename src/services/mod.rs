pub mod answer_extractor;
pub mod assembler;
pub mod auditor;
pub mod inference;
pub mod normalizer;

pub use answer_extractor::{AnswerExtractor, ExtractedAnswers};
pub use assembler::QuestionAssembler;
pub use auditor::{CorpusStats, DataQualityAuditor, DuplicateGroup, QuestionLocation};
pub use inference::CorrectnessInference;
pub use normalizer::{normalize, PlannedQuestion, PlannedTest, WritePlan};
