//! Download runner tests against a mocked fetcher

mod common;

use async_trait::async_trait;
use common::song;
use mockall::{mock, predicate::eq, Sequence};
use spindle_core::{SongFetcher, SongId, SpindleError};
use spindle_playback::{download_all, DownloadCoordinator, DownloadResult};

mock! {
    Fetcher {}

    #[async_trait]
    impl SongFetcher for Fetcher {
        async fn fetch_song(&self, id: &SongId) -> spindle_core::Result<()>;
    }
}

#[tokio::test]
async fn downloads_in_playlist_order_skipping_cached() {
    let songs = vec![song("a", true), song("b", false), song("c", false)];
    let mut fetcher = MockFetcher::new();
    let mut seq = Sequence::new();

    fetcher
        .expect_fetch_song()
        .with(eq(SongId::new("b")))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    fetcher
        .expect_fetch_song()
        .with(eq(SongId::new("c")))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let outcomes = download_all(&fetcher, &songs, |_| {}).await;

    let ids: Vec<&str> = outcomes.iter().map(|o| o.song_id.as_str()).collect();
    assert_eq!(ids, ["b", "c"]);
    assert!(outcomes.iter().all(|o| o.is_success()));
}

#[tokio::test]
async fn failure_does_not_stop_the_queue() {
    let songs = vec![song("a", false), song("b", false)];
    let mut fetcher = MockFetcher::new();

    fetcher
        .expect_fetch_song()
        .with(eq(SongId::new("a")))
        .times(1)
        .returning(|id| Err(SpindleError::download(id.clone(), "connection reset")));
    fetcher
        .expect_fetch_song()
        .with(eq(SongId::new("b")))
        .times(1)
        .returning(|_| Ok(()));

    let mut seen = Vec::new();
    let outcomes = download_all(&fetcher, &songs, |outcome| seen.push(outcome.clone())).await;

    assert_eq!(seen, outcomes);
    match &outcomes[0].result {
        DownloadResult::Failed(reason) => assert!(reason.contains("connection reset")),
        DownloadResult::Fetched => panic!("expected the first download to fail"),
    }
    assert_eq!(outcomes[1].result, DownloadResult::Fetched);
}

#[tokio::test]
async fn all_cached_means_no_requests() {
    let songs = vec![song("a", true), song("b", true)];
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch_song().never();

    let outcomes = download_all(&fetcher, &songs, |_| {}).await;

    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn every_song_cached_after_pass_even_on_failure() {
    let mut songs = vec![song("a", false), song("b", true), song("c", false)];
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_song()
        .times(2)
        .returning(|id| Err(SpindleError::download(id.clone(), "404")));

    let mut coordinator = DownloadCoordinator::new();
    coordinator.catalog_arrived();
    let plan = coordinator.take_plan(&songs).unwrap();

    let outcomes = download_all(&fetcher, &plan.songs, |_| {}).await;
    for outcome in &outcomes {
        assert!(coordinator.record_attempt(plan.generation, outcome));
        songs
            .iter_mut()
            .find(|s| s.id == outcome.song_id)
            .unwrap()
            .mark_cached();
    }

    assert!(songs.iter().all(|s| s.is_cached()));
    assert!(coordinator.was_attempted(&SongId::new("a")));
    assert!(coordinator.was_attempted(&SongId::new("c")));
    assert!(coordinator.take_plan(&songs).is_none());
}
