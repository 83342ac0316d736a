//! Cached lookups, edits and invalidation

mod common;

use common::{state_with, write_resource, EN_DOC, UA_DOC};
use hutir::application::preload::preload;

const HUTIR_DOC: &str = r#"{"site":{"title":"Hutir"}}"#;

#[tokio::test]
async fn test_lookup_hit_and_miss() {
    let (_dir, state) = state_with(&[("ua", HUTIR_DOC)], true).await;

    assert_eq!(state.localizer.get_string("ua", "site.title").await, "Hutir");
    assert_eq!(state.localizer.get_string("ua", "site.missing").await, "site.missing");
}

#[tokio::test]
async fn test_edit_is_visible_through_warm_cache() {
    let (_dir, state) = state_with(&[("ua", HUTIR_DOC)], true).await;

    // Warm every kind of entry first
    assert_eq!(state.localizer.get_string("ua", "site.title").await, "Hutir");
    assert_eq!(state.localizer.get_all_strings("ua").await[0].value, "Hutir");

    assert!(state.editor.update_resource("ua", "site.title", "NewTitle").await);

    assert_eq!(state.localizer.get_string("ua", "site.title").await, "NewTitle");
    let all = state.localizer.get_all_strings("ua").await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, "NewTitle");
}

#[tokio::test]
async fn test_failed_edit_keeps_version() {
    let (_dir, state) = state_with(&[("ua", HUTIR_DOC)], true).await;
    let cache = state.cache.clone().unwrap();
    let version = cache.version();

    assert!(!state.editor.update_resource("ua", "footer.text", "x").await);
    assert!(!state.editor.update_resource("en", "site.title", "x").await);
    assert_eq!(cache.version(), version);
}

#[tokio::test]
async fn test_missing_key_is_not_cached() {
    let (dir, state) = state_with(&[("ua", HUTIR_DOC)], true).await;

    assert_eq!(state.localizer.get_string("ua", "site.slogan").await, "site.slogan");
    // Added behind the cache's back, and the raw document is still cached
    write_resource(dir.path(), "ua", r#"{"site":{"title":"Hutir","slogan":"Farm"}}"#);
    state.localizer.invalidate("ua").await;

    assert_eq!(state.localizer.get_string("ua", "site.slogan").await, "Farm");
}

#[tokio::test]
async fn test_invalidate_drops_all_strings_but_not_single_keys() {
    let (dir, state) = state_with(&[("ua", HUTIR_DOC)], true).await;

    assert_eq!(state.localizer.get_string("ua", "site.title").await, "Hutir");
    assert_eq!(state.localizer.get_all_strings("ua").await[0].value, "Hutir");

    write_resource(dir.path(), "ua", r#"{"site":{"title":"Changed"}}"#);
    state.localizer.invalidate("ua").await;

    assert_eq!(state.localizer.get_all_strings("ua").await[0].value, "Changed");
    // Single-key entries are only reached by a version bump
    assert_eq!(state.localizer.get_string("ua", "site.title").await, "Hutir");

    state.cache.as_ref().unwrap().bump_version();
    assert_eq!(state.localizer.get_string("ua", "site.title").await, "Changed");
}

#[tokio::test]
async fn test_cache_disabled_matches_cached_results() {
    let (_dir_cached, cached) = state_with(&[("ua", UA_DOC), ("en", EN_DOC)], true).await;
    let (_dir_plain, plain) = state_with(&[("ua", UA_DOC), ("en", EN_DOC)], false).await;
    assert!(plain.cache.is_none());

    for language in ["ua", "en", "uk", "en-GB", "de"] {
        for key in ["site.title", "nav.about", "nav", "nope"] {
            // Repeat to go through both miss and hit paths
            for _ in 0..2 {
                assert_eq!(
                    cached.localizer.get_string(language, key).await,
                    plain.localizer.get_string(language, key).await,
                    "{} {}",
                    language,
                    key
                );
            }
        }
        assert_eq!(
            cached.localizer.get_all_strings(language).await,
            plain.localizer.get_all_strings(language).await
        );
    }
}

#[tokio::test]
async fn test_formatted_lookup() {
    let (_dir, state) = state_with(&[("en", EN_DOC), ("ua", UA_DOC)], true).await;
    let args = vec!["Ann".to_string(), "4".to_string()];

    assert_eq!(
        state.localizer.get_formatted("en", "site.greeting", &args).await,
        "Welcome, Ann! You have 4 orders"
    );
    assert_eq!(
        state.localizer.get_formatted("en", "missing.{0}", &args).await,
        "missing.{0}"
    );
}

#[tokio::test]
async fn test_repeated_reads_are_stable() {
    let (_dir, state) = state_with(&[("ua", UA_DOC)], true).await;

    let first = state.localizer.get_all_strings("ua").await;
    let second = state.localizer.get_all_strings("ua").await;
    assert_eq!(first, second);
    assert_eq!(
        state.localizer.get_string("ua", "nav.home").await,
        state.localizer.get_string("ua", "nav.home").await
    );
}

#[tokio::test]
async fn test_preload_counts_available_languages() {
    let (_dir, state) = state_with(&[("ua", UA_DOC)], true).await;
    let languages = vec!["ua".to_string(), "en".to_string()];

    // en has no document and is skipped
    assert_eq!(preload(&state.localizer, &languages).await, 4);
    assert!(!state.cache.as_ref().unwrap().is_empty());
}

#[tokio::test]
async fn test_editor_view_falls_back_to_first_available() {
    let (_dir, state) = state_with(&[("en", EN_DOC)], true).await;

    let view = state.editor.view("ua").await;
    assert_eq!(view.current_language, "en");
    assert_eq!(view.available_languages, vec!["en"]);
    assert_eq!(view.categories.len(), 2);
}

#[tokio::test]
async fn test_formatting_when_value_equals_key() {
    let (_dir, state) = state_with(&[("ua", r#"{"Hi {0}":"Hi {0}"}"#)], true).await;
    let args = vec!["Ann".to_string()];

    // Twice, to cover the cached path
    for _ in 0..2 {
        assert_eq!(state.localizer.get_formatted("ua", "Hi {0}", &args).await, "Hi Ann");
    }
    assert_eq!(state.localizer.get_formatted("ua", "Bye {0}", &args).await, "Bye {0}");
}

#[tokio::test]
async fn test_byte_order_mark_through_cache() {
    let (_dir, state) = state_with(&[("ua", "\u{feff}{\"site\":{\"title\":\"Hutir\"}}")], true).await;

    assert_eq!(state.localizer.get_string("ua", "site.title").await, "Hutir");
    assert_eq!(state.localizer.get_all_strings("ua").await.len(), 1);
}
