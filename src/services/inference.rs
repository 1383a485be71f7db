//! 正确答案推断服务 - 业务能力层
//!
//! 源页面没有任何显式的正确答案标记，只能从自由文本的解释中推断。
//! 两遍启发式，第一遍命中即停：
//!
//! 1. **强调标签遍**：解释块中每个 `strong` 片段与每个答案文本做
//!    大小写不敏感的双向包含比较（片段含答案 或 答案含片段）
//! 2. **正则模板遍**（仅当第一遍空手而归）：对小写化的解释全文套用
//!    一组有序的"correct answer is X / X is the correct answer"模板，
//!    捕获片段再做同样的双向包含比较
//!
//! 这是尽力而为的启发式：可能漏报也可能误报，失败由审计器上报，
//! 本服务永不报错

use crate::error::CrawlError;
use crate::models::Answer;
use regex::Regex;

/// 解释文本中的常见表述模板（按优先顺序）
const CORRECT_ANSWER_PATTERNS: &[&str] = &[
    r"correct answer[s]?[:\s]*([^.]+)",
    r"answer[s]?[:\s]*([^.]+)\s+is correct",
    r"([^.]+)\s+is the correct answer",
];

/// 正确答案推断服务
pub struct CorrectnessInference {
    patterns: Vec<Regex>,
}

impl CorrectnessInference {
    /// 创建推断服务（模板只编译一次）
    pub fn new() -> Result<Self, CrawlError> {
        let patterns = CORRECT_ANSWER_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// 推断正确答案
    ///
    /// # 参数
    /// - `emphasized`: 解释块中的强调片段（来自标记层）
    /// - `explanation`: 解释全文
    /// - `answers`: 答案候选，命中的条目会被置为 `is_correct = true`
    ///
    /// # 返回
    /// 命中的答案 id，按首次出现顺序、无重复；
    /// 空解释或两遍都未命中时返回空集合（题目保留，可审计）
    pub fn infer(
        &self,
        emphasized: &[String],
        explanation: &str,
        answers: &mut [Answer],
    ) -> Vec<String> {
        let mut correct_ids = Vec::new();

        // ========== 第一遍：强调标签 ==========
        for fragment in emphasized {
            let fragment = fragment.trim().to_lowercase();
            // 空片段会与一切文本互相包含，必须跳过
            if fragment.is_empty() {
                continue;
            }
            Self::mark_matches(&fragment, answers, &mut correct_ids);
        }

        if !correct_ids.is_empty() {
            return correct_ids;
        }

        // ========== 第二遍：正则模板 ==========
        let explanation_lower = explanation.to_lowercase();
        for pattern in &self.patterns {
            for captures in pattern.captures_iter(&explanation_lower) {
                let Some(span) = captures.get(1) else {
                    continue;
                };
                let span = span.as_str().trim();
                if span.is_empty() {
                    continue;
                }
                Self::mark_matches(span, answers, &mut correct_ids);
            }
        }

        correct_ids
    }

    /// 双向包含匹配：片段含答案文本 或 答案文本含片段
    fn mark_matches(fragment_lower: &str, answers: &mut [Answer], correct_ids: &mut Vec<String>) {
        for answer in answers.iter_mut() {
            let text = answer.text.trim().to_lowercase();
            if text.is_empty() {
                continue;
            }
            if fragment_lower.contains(&text) || text.contains(fragment_lower) {
                answer.is_correct = true;
                if !correct_ids.contains(&answer.id) {
                    correct_ids.push(answer.id.clone());
                }
            }
        }
    }
}
