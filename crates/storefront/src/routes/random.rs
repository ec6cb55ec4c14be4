//! ランダム提案 page.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use sakaya_core::SuggestionId;

use super::{Route, write_header};
use crate::error::{AppError, Result};
use crate::models::Suggestion;
use crate::services::random::{RandomPicker, suggestion_catalog};
use crate::state::AppState;

/// Number of persisted draws read back to rebuild the picker.
const RESUME_WINDOW: u32 = 50;

/// Session flag holding the id of the suggestion on display.
pub const CURRENT_KEY: &str = "randomCurrent";

/// Random page view.
#[derive(Debug, Clone, Serialize)]
pub struct RandomView {
    pub current: Option<Suggestion>,
    pub history: Vec<Suggestion>,
}

impl From<&RandomPicker> for RandomView {
    fn from(picker: &RandomPicker) -> Self {
        Self {
            current: picker.current().cloned(),
            history: picker.history().to_vec(),
        }
    }
}

async fn resume(state: &AppState) -> Result<RandomPicker> {
    let recent = state
        .store()
        .random_history()
        .await?
        .latest(RESUME_WINDOW)
        .await?;
    let mut picker = RandomPicker::resume(
        suggestion_catalog(),
        recent.into_iter().map(|entry| entry.suggestion),
    );

    // A revisited entry stays on display until the next draw.
    let displayed = state.store().session_flags().await?.get(CURRENT_KEY).await?;
    if let Some(id) = displayed.and_then(|raw| raw.parse::<i64>().ok()) {
        picker.revisit(SuggestionId::new(id));
    }
    Ok(picker)
}

async fn remember_current(state: &AppState, picker: &RandomPicker) -> Result<()> {
    let flags = state.store().session_flags().await?;
    match picker.current() {
        Some(current) => flags.set(CURRENT_KEY, &current.id.as_i64().to_string()).await?,
        None => flags.remove(CURRENT_KEY).await?,
    }
    Ok(())
}

/// Show the current suggestion and history without drawing.
///
/// # Errors
///
/// Returns `AppError::Database` if the history cannot be read.
#[instrument(skip(state))]
pub async fn show(state: &AppState) -> Result<RandomView> {
    Ok(RandomView::from(&resume(state).await?))
}

/// Draw `draws` suggestions in a row and persist each one.
///
/// # Errors
///
/// Returns `AppError::Database` if the history cannot be read or written.
#[instrument(skip(state))]
pub async fn draw(state: &AppState, draws: u32) -> Result<RandomView> {
    let mut picker = resume(state).await?;

    let picked: Vec<Suggestion> = {
        let mut rng = rand::rng();
        (0..draws)
            .filter_map(|_| picker.draw(&mut rng).cloned())
            .collect()
    };

    let history = state.store().random_history().await?;
    for suggestion in &picked {
        history
            .save(suggestion, state.clock().now_millis())
            .await?;
        tracing::debug!(suggestion_id = %suggestion.id, "Random suggestion drawn");
    }
    remember_current(state, &picker).await?;

    Ok(RandomView::from(&picker))
}

/// Show a suggestion from the history again. The history is not changed.
///
/// The revisited entry counts as the displayed item, so the next draw
/// excludes it.
///
/// # Errors
///
/// Returns `AppError::NotFound` if `id` is not in the history and
/// `AppError::Database` if the history cannot be read.
#[instrument(skip(state))]
pub async fn revisit(state: &AppState, id: SuggestionId) -> Result<RandomView> {
    let mut picker = resume(state).await?;
    picker
        .revisit(id)
        .ok_or_else(|| AppError::NotFound(format!("suggestion {id} in history")))?;
    remember_current(state, &picker).await?;
    Ok(RandomView::from(&picker))
}

impl fmt::Display for RandomView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, Route::Random.title())?;
        match &self.current {
            Some(current) => {
                writeln!(
                    f,
                    "{} {}  {}",
                    current.category.icon(),
                    current.name,
                    current.price
                )?;
                writeln!(
                    f,
                    "   {} / {}%",
                    current.category.display_name(),
                    current.alcohol_percent
                )?;
                writeln!(f, "   {}", current.description)?;
                writeln!(f, "   #{}", current.tags.join(" #"))?;
                writeln!(f, "   おすすめの組み合わせ: {}", current.pairing.join("、"))?;
            }
            None => writeln!(f, "運命の一本を見つけよう！")?,
        }

        if !self.history.is_empty() {
            writeln!(f)?;
            writeln!(f, "最近の提案")?;
            for suggestion in &self.history {
                writeln!(
                    f,
                    "  [{}] {} {}",
                    suggestion.id,
                    suggestion.category.icon(),
                    suggestion.name
                )?;
            }
        }
        Ok(())
    }
}
