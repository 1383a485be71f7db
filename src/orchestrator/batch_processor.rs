//! 批量页面处理器 - 编排层
//!
//! ## 核心功能
//!
//! 1. **页面计划**：综合测试 1..=N + 各章节测试，路径来自站点 URL 约定
//! 2. **抓取节奏**：顺序抓取，两次请求之间固定礼貌延迟
//!    （瓶颈在源站而不是 CPU，解析和推断都是纯内存操作）
//! 3. **部分失败隔离**：单页失败计为零题并继续
//! 4. **双出口持久化**：JSON 文档快照 + 单事务关系型写入
//! 5. **审计报告**：运行结束后输出数据质量报告（只读）

use crate::config::Config;
use crate::infrastructure::PageFetcher;
use crate::models::ChapterKey;
use crate::services::{normalize, DataQualityAuditor};
use crate::storage::{save_document, Database};
use crate::workflow::{PageCtx, PageFlow};
use anyhow::Result;
use std::time::Duration;
use tracing::{error, info, warn};

/// 页面计划：抓哪个路径、属于哪个测试
#[derive(Debug, Clone)]
pub struct PagePlan {
    pub path: String,
    pub chapter: ChapterKey,
    pub test_number: String,
}

/// 采集统计
#[derive(Debug, Default)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub questions_extracted: usize,
    pub questions_skipped: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    fetcher: PageFetcher,
    flow: PageFlow,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let fetcher = PageFetcher::new(&config)?;
        let flow = PageFlow::new()?;

        Ok(Self {
            config,
            fetcher,
            flow,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        log_startup(&self.config);

        let pages = build_page_plan(&self.config);
        info!("📋 页面计划: 共 {} 个测试页面", pages.len());

        // ========== 抓取 + 提取 ==========
        let (questions, stats) = self.crawl_all_pages(&pages).await;

        if questions.is_empty() {
            warn!("⚠️ 没有提取到任何题目，跳过持久化");
            log_crawl_stats(&stats);
            return Ok(());
        }

        // ========== 归一化 ==========
        let (document, plan) = normalize(questions, &self.config.base_url);

        // ========== 持久化（两个独立出口） ==========
        save_document(&document, &self.config.json_output_file)?;

        let mut db = Database::open(&self.config.db_path)?;
        db.init_schema()?;
        match db.persist(&plan) {
            Ok(_) => {}
            Err(e) => {
                // 事务已整体回滚，之前的状态原封不动
                error!("❌ 关系型写入失败（已回滚）: {}", e);
                return Err(e.into());
            }
        }

        // ========== 审计（只读） ==========
        self.log_audit_report(&document, &db)?;

        log_crawl_stats(&stats);
        Ok(())
    }

    /// 顺序抓取所有页面，带礼貌延迟
    async fn crawl_all_pages(
        &self,
        pages: &[PagePlan],
    ) -> (Vec<crate::models::Question>, CrawlStats) {
        let mut questions = Vec::new();
        let mut stats = CrawlStats::default();
        let delay = Duration::from_millis(self.config.request_delay_ms);

        for (index, page) in pages.iter().enumerate() {
            let page_index = index + 1;
            let ctx = PageCtx::new(page.chapter.clone(), page.test_number.clone(), page_index);

            info!(
                "[页面 {}/{}] 🔍 抓取 {} {}",
                page_index,
                pages.len(),
                page.path,
                ctx
            );

            match self.fetcher.fetch_page(&page.path).await {
                Ok(html) => match self.flow.run(&html, &ctx) {
                    Ok(report) => {
                        info!(
                            "[页面 {}] ✓ 提取 {} 道题目，跳过 {}",
                            page_index,
                            report.questions.len(),
                            report.skipped.len()
                        );
                        stats.pages_fetched += 1;
                        stats.questions_extracted += report.questions.len();
                        stats.questions_skipped += report.skipped.len();
                        questions.extend(report.questions);
                    }
                    Err(e) => {
                        // 选择器构建失败属于程序缺陷而不是页面问题，但仍按零题处理
                        error!("[页面 {}] ❌ 解析失败: {}", page_index, e);
                        stats.pages_failed += 1;
                    }
                },
                Err(e) => {
                    // 网络错误：该页计为零题，继续下一页
                    error!("[页面 {}] ❌ 抓取失败: {}", page_index, e);
                    stats.pages_failed += 1;
                }
            }

            // 对源站保持礼貌
            if page_index < pages.len() {
                tokio::time::sleep(delay).await;
            }
        }

        (questions, stats)
    }

    /// 输出审计报告（文档侧 + 数据库侧）
    fn log_audit_report(
        &self,
        document: &crate::models::QuestionDocument,
        db: &Database,
    ) -> Result<()> {
        let auditor = DataQualityAuditor::new(document);

        info!("\n{}", "=".repeat(60));
        info!("📊 数据质量审计报告");
        info!("{}", "=".repeat(60));

        let stats = auditor.stats();
        info!("题目总数: {}", stats.total_questions);
        info!("  🔘 单选: {} | ☑️ 多选: {}", stats.single_choice, stats.multi_choice);
        info!(
            "  综合测试题: {} | 章节测试题: {}",
            stats.comprehensive_questions, stats.chapter_questions
        );
        info!(
            "  有解释: {}/{} | 已推断正确答案: {}/{}",
            stats.with_explanation,
            stats.total_questions,
            stats.with_correct_answers,
            stats.total_questions
        );
        if stats.empty_answer_texts > 0 {
            warn!("  ⚠️ 空答案文本: {}", stats.empty_answer_texts);
        }

        let missing = auditor.missing_correct_answers();
        if !missing.is_empty() {
            warn!("⚠️ {} 道题目未能推断出正确答案", missing.len());
            if self.config.verbose_logging {
                for loc in &missing {
                    warn!(
                        "  章节 {} / 测试 {} / 题目 {}",
                        loc.chapter, loc.test_number, loc.question_id
                    );
                }
            }
        }

        let duplicates = auditor.duplicate_questions();
        if !duplicates.is_empty() {
            warn!("⚠️ 发现 {} 组重复题干", duplicates.len());
        }

        let gaps = auditor.comprehensive_coverage(self.config.comprehensive_test_count);
        if gaps.is_empty() {
            info!("✓ 综合测试 1..={} 全部覆盖", self.config.comprehensive_test_count);
        } else {
            warn!(
                "⚠️ 综合测试缺失编号: {}",
                gaps.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")
            );
        }

        // 数据库侧核对
        let counts = db.table_counts()?;
        info!(
            "数据库行数: 章节 {} | 测试 {} | 题目 {} | 答案 {}",
            counts.chapters, counts.tests, counts.questions, counts.answers
        );
        info!("数据库侧未解决题目: {}", db.unresolved_question_count()?);
        info!("{}", "=".repeat(60));

        Ok(())
    }
}

/// 构建页面计划：先综合测试，再各章节测试
///
/// URL 约定来自目标站点：综合测试 `british-citizenship-test-{n}`，
/// 章节测试 `test-{c}-{n}`
pub fn build_page_plan(config: &Config) -> Vec<PagePlan> {
    let mut pages = Vec::new();

    for n in 1..=config.comprehensive_test_count {
        pages.push(PagePlan {
            path: format!("british-citizenship-test-{}", n),
            chapter: ChapterKey::Comprehensive,
            test_number: n.to_string(),
        });
    }

    for c in 1..=config.chapter_count {
        for n in 1..=config.tests_per_chapter {
            pages.push(PagePlan {
                path: format!("test-{}-{}", c, n),
                chapter: ChapterKey::Named(format!("chapter_{}", c)),
                test_number: n.to_string(),
            });
        }
    }

    pages
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - UK 入籍考试题目采集");
    info!("🌐 目标站点: {}", config.base_url);
    info!("⏱️ 请求间隔: {} ms", config.request_delay_ms);
    info!("{}", "=".repeat(60));
}

fn log_crawl_stats(stats: &CrawlStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 采集完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功页面: {} | ❌ 失败页面: {}", stats.pages_fetched, stats.pages_failed);
    info!(
        "✅ 提取题目: {} | ⚠️ 跳过题目: {}",
        stats.questions_extracted, stats.questions_skipped
    );
    info!("{}", "=".repeat(60));
}
