pub mod document;
pub mod question;

pub use document::{DocumentMetadata, QuestionDocument};
pub use question::{Answer, ChapterKey, Question, QuestionType};
