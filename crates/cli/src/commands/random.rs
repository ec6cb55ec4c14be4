//! ランダム提案 commands.

use sakaya_core::SuggestionId;
use sakaya_storefront::routes::random;

use super::{CliError, open_state, render};

pub async fn draw(json: bool, draws: u32) -> Result<(), CliError> {
    if draws == 0 {
        return Err(CliError::Input("--draws must be at least 1".to_owned()));
    }
    let state = open_state()?;
    render(&random::draw(&state, draws).await?, json)
}

pub async fn history(json: bool) -> Result<(), CliError> {
    let state = open_state()?;
    render(&random::show(&state).await?, json)
}

pub async fn revisit(json: bool, id: i64) -> Result<(), CliError> {
    let state = open_state()?;
    render(&random::revisit(&state, SuggestionId::new(id)).await?, json)
}
