use super::*;
use crate::test_support::{DetailReply, FakeDirectory};
use tracing_test::traced_test;

fn logins(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn no_delay(threshold: u64) -> EnrichSettings {
    EnrichSettings {
        threshold,
        delay: Duration::ZERO,
    }
}

#[test]
fn test_default_settings() {
    let settings = EnrichSettings::default();

    assert_eq!(settings.threshold, 1);
    assert_eq!(settings.delay, Duration::from_millis(500));
}

#[tokio::test]
async fn test_enrich_keeps_users_at_or_below_threshold() {
    let directory = FakeDirectory::default()
        .with_detail("bob", DetailReply::Repos(1))
        .with_detail("carol", DetailReply::Repos(5));

    let result = enrich(&directory, &logins(&["bob", "carol"]), no_delay(1), |_| {}).await;

    assert_eq!(
        result,
        vec![LowActivityRecord {
            username: "bob".to_string(),
            repo_count: 1,
        }]
    );
}

#[tokio::test]
async fn test_enrich_threshold_is_inclusive_and_configurable() {
    let directory = FakeDirectory::default()
        .with_detail("zero", DetailReply::Repos(0))
        .with_detail("two", DetailReply::Repos(2))
        .with_detail("three", DetailReply::Repos(3));
    let names = logins(&["zero", "two", "three"]);

    let result = enrich(&directory, &names, no_delay(2), |_| {}).await;

    let found: Vec<_> = result.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(found, vec!["zero", "two"]);
}

#[tokio::test]
#[traced_test]
async fn test_enrich_skips_failed_lookup_and_keeps_order() {
    let directory = FakeDirectory::default()
        .with_detail("first", DetailReply::Repos(0))
        .with_detail("second", DetailReply::Transport)
        .with_detail("third", DetailReply::Repos(1));

    let result = enrich(
        &directory,
        &logins(&["first", "second", "third"]),
        no_delay(1),
        |_| {},
    )
    .await;

    let found: Vec<_> = result.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(found, vec!["first", "third"]);
    assert_eq!(
        directory.calls(),
        vec!["details:first", "details:second", "details:third"]
    );
    assert!(logs_contain("Skipping user"));
    assert!(logs_contain("connection reset by peer"));
}

#[tokio::test]
async fn test_enrich_skips_missing_field_and_error_status() {
    let directory = FakeDirectory::default()
        .with_detail("partial", DetailReply::MissingField)
        .with_detail("gone", DetailReply::Status(404))
        .with_detail("ok", DetailReply::Repos(0));

    let result = enrich(
        &directory,
        &logins(&["partial", "gone", "ok"]),
        no_delay(1),
        |_| {},
    )
    .await;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username, "ok");
}

#[tokio::test]
async fn test_enrich_keeps_raw_case_and_duplicates() {
    let directory = FakeDirectory::default().with_detail("MixedCase", DetailReply::Repos(0));

    let result = enrich(
        &directory,
        &logins(&["MixedCase", "MixedCase"]),
        no_delay(1),
        |_| {},
    )
    .await;

    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|r| r.username == "MixedCase"));
}

#[tokio::test]
async fn test_enrich_reports_progress_for_every_login() {
    let directory = FakeDirectory::default()
        .with_detail("bob", DetailReply::Repos(1))
        .with_detail("carol", DetailReply::Repos(5));
    let mut seen = Vec::new();

    enrich(
        &directory,
        &logins(&["bob", "carol", "dave"]),
        no_delay(1),
        |progress| {
            seen.push((
                progress.index,
                progress.total,
                progress.login.to_string(),
                progress.outcome.clone(),
            ))
        },
    )
    .await;

    assert_eq!(seen.len(), 3);
    assert_eq!(
        seen[0],
        (
            1,
            3,
            "bob".to_string(),
            CheckOutcome::Checked {
                repo_count: 1,
                qualifies: true
            }
        )
    );
    assert_eq!(
        seen[1].3,
        CheckOutcome::Checked {
            repo_count: 5,
            qualifies: false
        }
    );
    assert!(matches!(seen[2].3, CheckOutcome::Skipped { .. }));
    assert_eq!(seen[2].0, 3);
}

#[tokio::test(start_paused = true)]
async fn test_enrich_pauses_between_requests_only() {
    let directory = FakeDirectory::default()
        .with_detail("a", DetailReply::Repos(0))
        .with_detail("b", DetailReply::Transport)
        .with_detail("c", DetailReply::Repos(0));
    let settings = EnrichSettings {
        threshold: 1,
        delay: Duration::from_millis(500),
    };

    let started = tokio::time::Instant::now();
    enrich(&directory, &logins(&["a", "b", "c"]), settings, |_| {}).await;

    // Three lookups, two pauses. Failed lookups still pause afterwards.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(1500), "{elapsed:?}");
}

#[tokio::test]
async fn test_enrich_empty_input() {
    let directory = FakeDirectory::default();

    let result = enrich(&directory, &[], EnrichSettings::default(), |_| {}).await;

    assert!(result.is_empty());
    assert!(directory.calls().is_empty());
}

#[tokio::test]
async fn test_fetch_following_logins_preserves_case_and_order() {
    let directory = FakeDirectory::with_lists(&[], &["Zed", "amy", "Zed"]);
    let identity = Identity::parse("octocat").unwrap();

    let result = fetch_following_logins(&directory, &identity).await.unwrap();

    assert_eq!(result, vec!["Zed", "amy", "Zed"]);
}

#[tokio::test]
async fn test_fetch_following_logins_propagates_failure() {
    let directory = FakeDirectory {
        following_error: Some(|| github_client::Error::AuthenticationFailure),
        ..FakeDirectory::default()
    };
    let identity = Identity::parse("octocat").unwrap();

    let error = fetch_following_logins(&directory, &identity)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        CoreError::Fetch {
            list: ListKind::Following,
            ..
        }
    ));
}
