//! お酒診断 commands.

use sakaya_storefront::routes::diagnosis;

use super::{CliError, open_state, render};

pub fn questions(json: bool) -> Result<(), CliError> {
    render(&diagnosis::questions(), json)
}

pub async fn answer(json: bool, answers: Vec<String>) -> Result<(), CliError> {
    let state = open_state()?;
    render(&diagnosis::answer(&state, answers).await?, json)
}

pub async fn history(json: bool) -> Result<(), CliError> {
    let state = open_state()?;
    render(&diagnosis::history(&state).await?, json)
}
