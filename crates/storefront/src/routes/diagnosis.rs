//! お酒診断 page.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use sakaya_core::Category;

use super::{Route, write_header};
use crate::error::Result;
use crate::models::{DiagnosisRecord, NewDiagnosisRecord, Product};
use crate::services::diagnosis::{QUESTIONS, Question, Scores, tally};
use crate::services::ensure_seeded;
use crate::state::AppState;

/// Maximum number of products recommended with a result.
pub const RECOMMENDATION_LIMIT: usize = 3;

/// The question sheet.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionsView {
    pub questions: &'static [Question],
}

/// Outcome of a completed diagnosis.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisResultView {
    pub result: Category,
    pub scores: Scores,
    pub record: DiagnosisRecord,
    pub recommended: Vec<Product>,
}

/// Past diagnosis results, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisHistoryView {
    pub records: Vec<DiagnosisRecord>,
}

/// Display the questions and their options.
#[must_use]
pub const fn questions() -> QuestionsView {
    QuestionsView {
        questions: &QUESTIONS,
    }
}

/// Score a full set of answers, record the result and recommend products.
///
/// Answers are the option values (`dry`, `medium`, ...) in question order.
/// Up to three catalog products of the winning category are recommended.
///
/// # Errors
///
/// Returns `AppError::Diagnosis` for a wrong number of answers or an
/// unknown option; nothing is recorded in that case. Returns
/// `AppError::Database` if the store fails.
#[instrument(skip(state))]
pub async fn answer(state: &AppState, answers: Vec<String>) -> Result<DiagnosisResultView> {
    let scores = tally(&answers)?;
    let result = scores.winner();

    ensure_seeded(state.store()).await?;
    let mut recommended = state
        .store()
        .products()
        .await?
        .get_by_category(result)
        .await?;
    recommended.truncate(RECOMMENDATION_LIMIT);

    let record = state
        .store()
        .diagnosis()
        .await?
        .save(NewDiagnosisRecord {
            answers,
            result,
            timestamp: state.clock().now_millis(),
        })
        .await?;

    tracing::info!(result = %result, record_id = %record.id, "Diagnosis completed");
    Ok(DiagnosisResultView {
        result,
        scores,
        record,
        recommended,
    })
}

/// List every recorded diagnosis.
///
/// # Errors
///
/// Returns `AppError::Database` if the history cannot be read.
#[instrument(skip(state))]
pub async fn history(state: &AppState) -> Result<DiagnosisHistoryView> {
    let records = state.store().diagnosis().await?.history().await?;
    Ok(DiagnosisHistoryView { records })
}

impl fmt::Display for QuestionsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, Route::Diagnosis.title())?;
        writeln!(
            f,
            "いくつかの質問にお答えいただくと、あなたにぴったりのお酒をおすすめします！"
        )?;
        for (index, question) in self.questions.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "質問 {} / {}: {}", index + 1, self.questions.len(), question.prompt)?;
            for option in question.options {
                writeln!(f, "  {:<8} {}", option.value, option.label)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DiagnosisResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, "診断結果")?;
        writeln!(
            f,
            "あなたにおすすめなのは {} {} です！",
            self.result.icon(),
            self.result.display_name()
        )?;
        for (category, total) in self.scores.entries() {
            writeln!(f, "  {:<6} {total}", category.display_name())?;
        }
        writeln!(f)?;
        writeln!(f, "おすすめ商品")?;
        if self.recommended.is_empty() {
            return writeln!(f, "  該当する商品がありません");
        }
        for product in &self.recommended {
            writeln!(f, "  [{}] {} {}", product.id, product.name, product.price)?;
        }
        Ok(())
    }
}

impl fmt::Display for DiagnosisHistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, "診断履歴")?;
        if self.records.is_empty() {
            return writeln!(f, "診断履歴はありません");
        }
        for record in &self.records {
            writeln!(
                f,
                "#{} {} {} ({})",
                record.id,
                record.result.icon(),
                record.result.display_name(),
                record.answers.join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn answers(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_owned()).collect()
    }

    #[tokio::test]
    async fn test_answer_records_and_recommends() {
        let state = AppState::in_memory();

        let view = answer(&state, answers(&["dry", "medium", "special", "warm"]))
            .await
            .unwrap();

        assert_eq!(view.result, Category::Sake);
        assert_eq!(view.scores.sake, 12);
        assert_eq!(view.recommended.len(), 1);
        assert!(view.recommended.iter().all(|p| p.category == Category::Sake));

        let history = history(&state).await.unwrap();
        assert_eq!(history.records, vec![view.record]);
    }

    #[tokio::test]
    async fn test_recommendations_are_capped() {
        let state = AppState::in_memory();
        let view = answer(&state, answers(&["sour", "medium", "special", "room"]))
            .await
            .unwrap();
        assert_eq!(view.result, Category::Wine);
        assert!(view.recommended.len() <= RECOMMENDATION_LIMIT);
    }

    #[tokio::test]
    async fn test_invalid_answers_are_not_recorded() {
        let state = AppState::in_memory();

        let err = answer(&state, answers(&["dry", "medium"])).await.unwrap_err();
        assert!(matches!(err, AppError::Diagnosis(_)));
        let err = answer(&state, answers(&["dry", "medium", "special", "hot"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Diagnosis(_)));

        assert!(history(&state).await.unwrap().records.is_empty());
    }

    #[test]
    fn test_questions_render() {
        let text = questions().to_string();
        assert!(text.contains("質問 1 / 4"));
        assert!(text.contains("温度の好みは？"));
    }
}
