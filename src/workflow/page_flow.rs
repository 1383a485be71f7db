//! 页面处理流程 - 流程层
//!
//! 核心职责：定义"一个测试页面"的完整处理流程
//!
//! 流程顺序：
//! 1. 解析文档树，找出所有题目块
//! 2. 每块：提取答案 → 推断正确答案 → 组装校验
//! 3. 不合格的题目记录跳过原因后继续，单题失败绝不中断整页

use crate::error::{CrawlError, SkipReason};
use crate::parser::PageDocument;
use crate::services::{AnswerExtractor, CorrectnessInference, QuestionAssembler};
use crate::utils::logging::truncate_text;
use crate::workflow::page_ctx::PageCtx;
use crate::models::Question;
use tracing::{debug, warn};

/// 被跳过的题目记录
#[derive(Debug, Clone)]
pub struct SkippedQuestion {
    pub question_id: String,
    pub reason: SkipReason,
}

/// 一个页面的处理报告
#[derive(Debug, Default)]
pub struct PageReport {
    pub questions: Vec<Question>,
    pub skipped: Vec<SkippedQuestion>,
}

/// 页面处理流程
///
/// - 编排单个页面的完整提取流程
/// - 不持有任何资源（HTTP 客户端）
/// - 只依赖业务能力（services）
pub struct PageFlow {
    extractor: AnswerExtractor,
    inference: CorrectnessInference,
}

impl PageFlow {
    /// 创建新的页面处理流程
    pub fn new() -> Result<Self, CrawlError> {
        Ok(Self {
            extractor: AnswerExtractor::new(),
            inference: CorrectnessInference::new()?,
        })
    }

    /// 处理一个页面的原始 HTML
    ///
    /// # 返回
    /// 页面报告：组装成功的题目 + 跳过记录。
    /// 畸形或空白页面产出空报告，不报错
    pub fn run(&self, raw_html: &str, ctx: &PageCtx) -> Result<PageReport, CrawlError> {
        let document = PageDocument::parse(raw_html)?;
        let mut report = PageReport::default();

        for block in document.question_blocks() {
            let question_id = block.question_id().unwrap_or_default().to_string();

            // 答案列表缺失 → 跳过该题
            let Some(extracted) = self.extractor.extract(&block) else {
                self.record_skip(&mut report, ctx, question_id, SkipReason::MissingAnswerList);
                continue;
            };

            // 题干缺失 → 跳过该题
            let Some(question_text) = block.question_text() else {
                self.record_skip(&mut report, ctx, question_id, SkipReason::EmptyQuestionText);
                continue;
            };

            // 解释块（可选）：全文 + 强调片段
            let (explanation, emphasized) = match block.explanation() {
                Some(exp) => (exp.text(), exp.emphasized_fragments()),
                None => (String::new(), Vec::new()),
            };

            // 推断正确答案（命中的答案被置为 is_correct）
            let mut answers = extracted.answers;
            let correct_answers = self.inference.infer(&emphasized, &explanation, &mut answers);

            match QuestionAssembler::assemble(
                question_id.clone(),
                ctx.chapter.clone(),
                ctx.test_number.clone(),
                question_text,
                answers,
                extracted.question_type,
                explanation,
                correct_answers,
            ) {
                Ok(question) => {
                    debug!(
                        "[页面 {}] 题目 {} 组装成功: {}",
                        ctx.page_index,
                        question.id,
                        truncate_text(&question.question_text, 80)
                    );
                    report.questions.push(question);
                }
                Err(reason) => {
                    self.record_skip(&mut report, ctx, question_id, reason);
                }
            }
        }

        Ok(report)
    }

    fn record_skip(
        &self,
        report: &mut PageReport,
        ctx: &PageCtx,
        question_id: String,
        reason: SkipReason,
    ) {
        warn!(
            "[页面 {}] ⚠️ 跳过题目 {}: {}",
            ctx.page_index,
            if question_id.is_empty() { "<无ID>" } else { &question_id },
            reason
        );
        report.skipped.push(SkippedQuestion {
            question_id,
            reason,
        });
    }
}
