//! お酒診断 and random suggestion flows.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use sakaya_core::{Category, SuggestionId};
use sakaya_integration_tests::{TempDatabase, TestContext};
use sakaya_storefront::error::AppError;
use sakaya_storefront::routes::{diagnosis, random};

fn answers(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

// ============================================================================
// Diagnosis
// ============================================================================

#[tokio::test]
async fn test_diagnosis_recommends_sake() {
    let ctx = TestContext::new().unwrap();

    let view = diagnosis::answer(&ctx.state, answers(&["dry", "medium", "special", "warm"]))
        .await
        .unwrap();

    assert_eq!(view.result, Category::Sake);
    assert_eq!(
        (view.scores.sake, view.scores.wine, view.scores.beer, view.scores.shochu),
        (12, 9, 4, 9)
    );
    assert!(!view.recommended.is_empty());
    assert!(view.recommended.len() <= diagnosis::RECOMMENDATION_LIMIT);
    assert!(view.recommended.iter().all(|p| p.category == Category::Sake));
}

#[tokio::test]
async fn test_diagnosis_history_keeps_every_result() {
    let ctx = TestContext::new().unwrap();
    let first = diagnosis::answer(&ctx.state, answers(&["sweet", "low", "daily", "cold"]))
        .await
        .unwrap();
    let second = diagnosis::answer(&ctx.state, answers(&["dry", "high", "daily", "room"]))
        .await
        .unwrap();

    let history = diagnosis::history(&ctx.state).await.unwrap();

    assert_eq!(history.records, vec![first.record, second.record]);
}

#[tokio::test]
async fn test_diagnosis_rejects_bad_answers() {
    let ctx = TestContext::new().unwrap();

    let short = diagnosis::answer(&ctx.state, answers(&["dry", "medium"])).await;
    let unknown = diagnosis::answer(&ctx.state, answers(&["dry", "medium", "special", "hot"])).await;

    assert!(matches!(short, Err(AppError::Diagnosis(_))));
    assert!(matches!(unknown, Err(AppError::Diagnosis(_))));
    assert!(diagnosis::history(&ctx.state).await.unwrap().records.is_empty());
}

// ============================================================================
// Random suggestions
// ============================================================================

#[tokio::test]
async fn test_draws_never_repeat_back_to_back() {
    let ctx = TestContext::new().unwrap();

    let view = random::draw(&ctx.state, 20).await.unwrap();

    let current = view.current.unwrap();
    let history_ids: Vec<SuggestionId> = view.history.iter().map(|s| s.id).collect();
    assert!(history_ids.len() <= 5);
    assert_eq!(history_ids.first(), Some(&current.id));

    let distinct: HashSet<_> = history_ids.iter().collect();
    assert_eq!(distinct.len(), history_ids.len());
    assert!(
        history_ids
            .windows(2)
            .all(|pair| pair.first() != pair.get(1))
    );
}

#[tokio::test]
async fn test_random_history_resumes_from_store() {
    let db = TempDatabase::new();
    let drawn = {
        let ctx = TestContext::with_file(&db).unwrap();
        random::draw(&ctx.state, 3).await.unwrap()
    };

    let ctx = TestContext::with_file(&db).unwrap();
    let resumed = random::show(&ctx.state).await.unwrap();

    assert_eq!(resumed.current, drawn.current);
    assert_eq!(resumed.history, drawn.history);
}

#[tokio::test]
async fn test_revisit_shows_history_entry() {
    let ctx = TestContext::new().unwrap();
    let drawn = random::draw(&ctx.state, 4).await.unwrap();
    let target = drawn.history.last().unwrap().clone();

    let view = random::revisit(&ctx.state, target.id).await.unwrap();
    assert_eq!(view.current, Some(target));

    let missing = random::revisit(&ctx.state, SuggestionId::new(999)).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
