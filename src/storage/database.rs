//! 关系型存储 - 持久化层
//!
//! 四张表：chapters → tests → questions → answers，按外键依赖顺序写入。
//! 章节和测试按唯一键"先查后插"复用（upsert-by-lookup），题目和答案
//! 每次运行都新插入。整批写入在一个事务里：任何一张表失败，
//! 全部回滚，之前的状态原封不动。
//!
//! 单写者纪律：一次流水线运行持有一个 Database 值、开一个事务；
//! 事务在提交前被丢弃即自动回滚（包括错误提前返回的退出路径）

use crate::error::CrawlError;
use crate::models::ChapterKey;
use crate::services::WritePlan;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::collections::HashMap;
use tracing::info;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS chapters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS tests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    chapter_id INTEGER DEFAULT NULL REFERENCES chapters(id),
    test_number TEXT NOT NULL,
    title TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (chapter_id, test_number)
);

CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    test_id INTEGER NOT NULL REFERENCES tests(id) ON DELETE CASCADE,
    question_id TEXT NOT NULL,
    question_text TEXT NOT NULL,
    question_type TEXT NOT NULL CHECK (question_type IN ('radio', 'checkbox')),
    explanation TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_question_id ON questions(question_id);

CREATE TABLE IF NOT EXISTS answers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id INTEGER NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
    answer_id TEXT NOT NULL,
    answer_text TEXT NOT NULL,
    is_correct BOOLEAN NOT NULL DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_answer_id ON answers(answer_id);
";

/// 一次写入的统计
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PersistStats {
    pub chapters_inserted: usize,
    pub chapters_reused: usize,
    pub tests_inserted: usize,
    pub tests_reused: usize,
    pub questions_inserted: usize,
    pub answers_inserted: usize,
}

/// 各表行数（用于数据库侧审计）
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub chapters: i64,
    pub tests: i64,
    pub questions: i64,
    pub answers: i64,
}

/// 关系型存储
pub struct Database {
    conn: Connection,
}

impl Database {
    /// 打开（或创建）数据库文件
    pub fn open(path: &str) -> Result<Self, CrawlError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// 打开内存数据库（测试用）
    pub fn open_in_memory() -> Result<Self, CrawlError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// 初始化表结构（幂等）
    pub fn init_schema(&self) -> Result<(), CrawlError> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// 执行写入计划
    ///
    /// 固定顺序：所有章节 → 所有测试 → 所有题目 → 所有答案。
    /// 任意一步失败时整个事务回滚并向上返回错误
    pub fn persist(&mut self, plan: &WritePlan) -> Result<PersistStats, CrawlError> {
        let tx = self.conn.transaction()?;
        let mut stats = PersistStats::default();

        // ========== 章节 ==========
        let mut chapter_ids: HashMap<&str, i64> = HashMap::new();
        for name in &plan.chapters {
            let (id, reused) = upsert_chapter(&tx, name)?;
            if reused {
                stats.chapters_reused += 1;
            } else {
                stats.chapters_inserted += 1;
            }
            chapter_ids.insert(name.as_str(), id);
        }

        // ========== 测试 ==========
        let mut test_ids: Vec<i64> = Vec::with_capacity(plan.tests.len());
        for test in &plan.tests {
            let chapter_id = match &test.chapter {
                ChapterKey::Comprehensive => None,
                ChapterKey::Named(name) => {
                    let id = chapter_ids.get(name.as_str()).copied().ok_or_else(|| {
                        CrawlError::WritePlan(format!("测试引用了计划外的章节: {}", name))
                    })?;
                    Some(id)
                }
            };
            let (id, reused) = upsert_test(&tx, chapter_id, &test.test_number, &test.title)?;
            if reused {
                stats.tests_reused += 1;
            } else {
                stats.tests_inserted += 1;
            }
            test_ids.push(id);
        }

        // ========== 题目 ==========
        let mut question_db_ids: Vec<i64> = Vec::with_capacity(plan.questions.len());
        for planned in &plan.questions {
            let test_id = test_ids.get(planned.test_index).copied().ok_or_else(|| {
                CrawlError::WritePlan(format!("题目引用了计划外的测试下标: {}", planned.test_index))
            })?;
            let question = &planned.question;
            tx.execute(
                "INSERT INTO questions (test_id, question_id, question_text, question_type, explanation)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    test_id,
                    question.id,
                    question.question_text,
                    question.question_type.as_db_str(),
                    question.explanation,
                ],
            )?;
            question_db_ids.push(tx.last_insert_rowid());
            stats.questions_inserted += 1;
        }

        // ========== 答案 ==========
        for (planned, question_db_id) in plan.questions.iter().zip(&question_db_ids) {
            for answer in &planned.question.answers {
                tx.execute(
                    "INSERT INTO answers (question_id, answer_id, answer_text, is_correct)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![question_db_id, answer.id, answer.text, answer.is_correct],
                )?;
                stats.answers_inserted += 1;
            }
        }

        tx.commit()?;

        info!(
            "💾 数据库写入完成: 章节 +{}/复用{}, 测试 +{}/复用{}, 题目 +{}, 答案 +{}",
            stats.chapters_inserted,
            stats.chapters_reused,
            stats.tests_inserted,
            stats.tests_reused,
            stats.questions_inserted,
            stats.answers_inserted
        );
        Ok(stats)
    }

    /// 各表行数
    pub fn table_counts(&self) -> Result<TableCounts, CrawlError> {
        Ok(TableCounts {
            chapters: self.count_rows("chapters")?,
            tests: self.count_rows("tests")?,
            questions: self.count_rows("questions")?,
            answers: self.count_rows("answers")?,
        })
    }

    /// 没有任何正确答案行的题目数量（数据库侧审计）
    pub fn unresolved_question_count(&self) -> Result<i64, CrawlError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM questions q
             WHERE NOT EXISTS (
                 SELECT 1 FROM answers a
                 WHERE a.question_id = q.id AND a.is_correct = 1
             )",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn count_rows(&self, table: &str) -> Result<i64, CrawlError> {
        // 表名只来自本模块内部的固定集合
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }
}

/// 章节 upsert-by-lookup：存在即复用，否则插入
fn upsert_chapter(tx: &Transaction<'_>, name: &str) -> Result<(i64, bool), CrawlError> {
    if let Some(id) = tx
        .query_row(
            "SELECT id FROM chapters WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?
    {
        return Ok((id, true));
    }

    tx.execute("INSERT INTO chapters (name) VALUES (?1)", params![name])?;
    Ok((tx.last_insert_rowid(), false))
}

/// 测试 upsert-by-lookup
///
/// SQLite 的 UNIQUE 约束把 NULL 视为彼此不同，综合测试（chapter_id 为
/// NULL）必须靠 `IS ?1` 查找去重，不能依赖约束本身
fn upsert_test(
    tx: &Transaction<'_>,
    chapter_id: Option<i64>,
    test_number: &str,
    title: &str,
) -> Result<(i64, bool), CrawlError> {
    if let Some(id) = tx
        .query_row(
            "SELECT id FROM tests WHERE chapter_id IS ?1 AND test_number = ?2",
            params![chapter_id, test_number],
            |row| row.get(0),
        )
        .optional()?
    {
        return Ok((id, true));
    }

    tx.execute(
        "INSERT INTO tests (chapter_id, test_number, title) VALUES (?1, ?2, ?3)",
        params![chapter_id, test_number, title],
    )?;
    Ok((tx.last_insert_rowid(), false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, ChapterKey, Question, QuestionType};
    use crate::services::normalize;

    fn sample_questions() -> Vec<Question> {
        vec![
            Question {
                id: "q-1".to_string(),
                chapter: ChapterKey::Comprehensive,
                test_number: "3".to_string(),
                question_text: "What is the capital?".to_string(),
                question_type: QuestionType::Single,
                answers: vec![
                    Answer {
                        id: "a1".to_string(),
                        text: "London".to_string(),
                        is_correct: true,
                    },
                    Answer::new("a2", "Leeds"),
                ],
                explanation: "The correct answer is London.".to_string(),
                correct_answers: vec!["a1".to_string()],
            },
            Question {
                id: "q-2".to_string(),
                chapter: ChapterKey::Named("chapter_1".to_string()),
                test_number: "1".to_string(),
                question_text: "Unresolved question?".to_string(),
                question_type: QuestionType::Multi,
                answers: vec![Answer::new("b1", "A"), Answer::new("b2", "B")],
                explanation: String::new(),
                correct_answers: vec![],
            },
        ]
    }

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.init_schema().unwrap();
        db
    }

    #[test]
    fn persists_full_write_plan() {
        let mut db = setup();
        let (_, plan) = normalize(sample_questions(), "test");

        let stats = db.persist(&plan).unwrap();

        assert_eq!(stats.chapters_inserted, 1);
        assert_eq!(stats.tests_inserted, 2);
        assert_eq!(stats.questions_inserted, 2);
        assert_eq!(stats.answers_inserted, 4);

        let counts = db.table_counts().unwrap();
        assert_eq!(
            counts,
            TableCounts {
                chapters: 1,
                tests: 2,
                questions: 2,
                answers: 4
            }
        );
    }

    #[test]
    fn second_run_reuses_chapters_and_tests_but_not_questions() {
        let mut db = setup();
        let (_, plan) = normalize(sample_questions(), "test");

        db.persist(&plan).unwrap();
        let stats = db.persist(&plan).unwrap();

        // 章节和测试按唯一键复用
        assert_eq!(stats.chapters_inserted, 0);
        assert_eq!(stats.chapters_reused, 1);
        assert_eq!(stats.tests_inserted, 0);
        assert_eq!(stats.tests_reused, 2);
        // 题目和答案不去重，每次运行都新插入
        assert_eq!(stats.questions_inserted, 2);

        let counts = db.table_counts().unwrap();
        assert_eq!(counts.chapters, 1);
        assert_eq!(counts.tests, 2);
        assert_eq!(counts.questions, 4);
        assert_eq!(counts.answers, 8);
    }

    #[test]
    fn comprehensive_tests_dedupe_under_null_chapter() {
        let mut db = setup();
        let questions = vec![sample_questions().remove(0)];
        let (_, plan) = normalize(questions, "test");

        db.persist(&plan).unwrap();
        let stats = db.persist(&plan).unwrap();

        // NULL chapter_id 的测试也必须被查找复用，而不是靠 UNIQUE 约束
        assert_eq!(stats.tests_reused, 1);
        assert_eq!(db.table_counts().unwrap().tests, 1);
    }

    #[test]
    fn failure_mid_batch_rolls_back_everything() {
        let mut db = setup();
        let (_, plan) = normalize(sample_questions(), "test");

        // 人为制造答案表写入失败
        db.conn.execute_batch("DROP TABLE answers;").unwrap();
        assert!(db.persist(&plan).is_err());

        // 同批的章节/测试/题目不得残留
        let chapters: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM chapters", [], |r| r.get(0))
            .unwrap();
        let tests: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM tests", [], |r| r.get(0))
            .unwrap();
        let questions: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM questions", [], |r| r.get(0))
            .unwrap();
        assert_eq!((chapters, tests, questions), (0, 0, 0));
    }

    #[test]
    fn unresolved_count_reflects_is_correct_rows() {
        let mut db = setup();
        let (_, plan) = normalize(sample_questions(), "test");
        db.persist(&plan).unwrap();

        // q-2 没有任何 is_correct = 1 的答案
        assert_eq!(db.unresolved_question_count().unwrap(), 1);
    }

    #[test]
    fn question_rows_carry_db_enum_values() {
        let mut db = setup();
        let (_, plan) = normalize(sample_questions(), "test");
        db.persist(&plan).unwrap();

        let question_type: String = db
            .conn
            .query_row(
                "SELECT question_type FROM questions WHERE question_id = 'q-2'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(question_type, "checkbox");
    }
}
