use chrono::Duration;
use quiz_core::Clock;
use quiz_core::leaderboard::rank;
use quiz_core::model::{NewScore, PlayerName};
use quiz_core::time::fixed_now;
use storage::repository::{ScoreRepository, Storage};
use storage::sort::{SortField, SortKey};
use storage::sqlite::SqliteRepository;

fn new_score(name: &str, score: u32) -> NewScore {
    NewScore::new(PlayerName::parse(name).unwrap(), score, 12).unwrap()
}

async fn repo(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_create_then_list_round_trips_fields() {
    let repo = repo("memdb_scores_roundtrip")
        .await
        .with_clock(Clock::fixed(fixed_now()));

    let created = repo.create(&new_score("Ada", 7)).await.unwrap();
    assert_eq!(created.created_at(), fixed_now());

    let listed = repo.list(&SortKey::leaderboard(), 50).await.unwrap();
    assert_eq!(listed.len(), 1);
    let stored = &listed[0];
    assert_eq!(stored.id(), created.id());
    assert_eq!(stored.player_name().as_str(), "Ada");
    assert_eq!(stored.score(), 7);
    assert_eq!(stored.total_questions(), 12);
    assert_eq!(stored.percentage().value(), 58);
    assert_eq!(stored.created_at(), fixed_now());
}

#[tokio::test]
async fn sqlite_list_orders_and_limits() {
    let base = repo("memdb_scores_order").await;
    let mut clock = Clock::fixed(fixed_now());
    for (name, score) in [("low", 2), ("high", 11), ("mid", 6), ("high-later", 11)] {
        base.clone().with_clock(clock).create(&new_score(name, score)).await.unwrap();
        clock.advance(Duration::minutes(1));
    }

    let top = base.list(&SortKey::leaderboard(), 3).await.unwrap();
    let names: Vec<_> = top.iter().map(|r| r.player_name().as_str()).collect();
    // equal percentages come back in insertion order
    assert_eq!(names, vec!["high", "high-later", "mid"]);

    let newest = base
        .list(&SortKey::descending(SortField::CreatedAt), 1)
        .await
        .unwrap();
    assert_eq!(newest[0].player_name().as_str(), "high-later");

    // the ranker re-applies its own recency tie-break
    let ranked = rank(&top, None);
    assert_eq!(ranked[0].record.player_name().as_str(), "high-later");
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = repo("memdb_scores_migrate").await;
    repo.migrate().await.expect("second migrate");
    let listed = repo.list(&SortKey::leaderboard(), 10).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn storage_sqlite_exposes_score_repository() {
    let storage = Storage::sqlite(
        "sqlite:file:memdb_scores_storage?mode=memory&cache=shared",
        Clock::fixed(fixed_now()),
    )
    .await
    .expect("storage");

    storage.scores.create(&new_score("Bo", 12)).await.unwrap();
    let listed = storage.scores.list(&SortKey::leaderboard(), 10).await.unwrap();
    assert_eq!(listed[0].percentage().value(), 100);
}
