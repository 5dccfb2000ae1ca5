use crate::model::{LlmResponse, QuestionResult, Strategy, StrategyReport, NO_ERROR};
use crate::providers::llm::LlmClient;
use crate::sanitize::extract_sql;
use crate::storage::store::{render_rows, Store};
use crate::strategies::{friendly_prompt, QUESTIONS};
use anyhow::Context;
use std::sync::Arc;
use tokio::time::{timeout, Duration};

#[derive(Debug, Clone, Default)]
pub struct RunPolicy {
    /// Upper bound per completion call. `None` waits as long as the service does.
    pub timeout: Option<Duration>,
}

pub struct Runner<'a> {
    pub store: &'a Store,
    pub client: Arc<dyn LlmClient>,
    pub policy: RunPolicy,
    pub questions: Vec<String>,
}

/// Values produced so far for one question; fresh for every question.
#[derive(Default)]
struct Progress {
    sql: Option<String>,
    query_raw_response: Option<String>,
    friendly_response: Option<String>,
}

impl<'a> Runner<'a> {
    pub fn new(store: &'a Store, client: Arc<dyn LlmClient>) -> Self {
        Self {
            store,
            client,
            policy: RunPolicy::default(),
            questions: QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }

    pub fn with_policy(mut self, policy: RunPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_questions<I, S>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.questions = questions.into_iter().map(Into::into).collect();
        self
    }

    /// Runs every strategy in order, handing each report to `on_report` as
    /// soon as it is complete. An `on_report` failure stops the run.
    pub async fn run_all<F>(
        &self,
        strategies: &[Strategy],
        mut on_report: F,
    ) -> anyhow::Result<Vec<StrategyReport>>
    where
        F: FnMut(&StrategyReport) -> anyhow::Result<()>,
    {
        let mut reports = Vec::with_capacity(strategies.len());
        for strategy in strategies {
            let report = self.run_strategy(strategy).await;
            on_report(&report)?;
            reports.push(report);
        }
        Ok(reports)
    }

    /// One result per question, in question order. Never fails: per-question
    /// errors are recorded in the result.
    pub async fn run_strategy(&self, strategy: &Strategy) -> StrategyReport {
        tracing::info!(
            event = "strategy_start",
            strategy = %strategy.name,
            questions = self.questions.len()
        );

        let mut question_results = Vec::with_capacity(self.questions.len());
        for question in &self.questions {
            question_results.push(self.run_question(strategy, question).await);
        }

        StrategyReport {
            strategy: strategy.name.clone(),
            prompt_prefix: strategy.prompt_prefix.clone(),
            question_results,
        }
    }

    async fn run_question(&self, strategy: &Strategy, question: &str) -> QuestionResult {
        println!("{}", question);

        let mut progress = Progress::default();
        let error = match self.answer(strategy, question, &mut progress).await {
            Ok(()) => NO_ERROR.to_string(),
            Err(e) => {
                let msg = format!("{:#}", e);
                println!("{}", msg);
                tracing::warn!(
                    event = "question_failed",
                    strategy = %strategy.name,
                    question,
                    error = %msg
                );
                msg
            }
        };

        QuestionResult {
            question: question.to_string(),
            sql: progress.sql,
            query_raw_response: progress.query_raw_response,
            friendly_response: progress.friendly_response,
            error,
        }
    }

    async fn answer(
        &self,
        strategy: &Strategy,
        question: &str,
        progress: &mut Progress,
    ) -> anyhow::Result<()> {
        let reply = self
            .complete(&strategy.question_prompt(question))
            .await
            .context("SQL completion failed")?;
        let sql = progress.sql.insert(extract_sql(&reply.text));
        println!("{}", sql);

        let rows = self.store.execute(sql)?;
        let raw = progress.query_raw_response.insert(render_rows(&rows));
        println!("{}", raw);

        let friendly = self
            .complete(&friendly_prompt(question, raw))
            .await
            .context("friendly completion failed")?;
        println!("{}", friendly.text);
        progress.friendly_response = Some(friendly.text);

        Ok(())
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let fut = self.client.complete(prompt);
        match self.policy.timeout {
            Some(t) => timeout(t, fut)
                .await
                .map_err(|_| anyhow::anyhow!("timed out after {:?}", t))?,
            None => fut.await,
        }
    }
}
