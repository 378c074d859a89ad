// File: scriptbot-core/tests/script_store_tests.rs

use std::path::PathBuf;

use tempfile::{tempdir, TempDir};

use scriptbot_core::{Error, JsonScriptStore};

const HELLO: &str = "loadstring(print('hi'))";

async fn fresh_store() -> Result<(JsonScriptStore, TempDir, PathBuf), Error> {
    let dir = tempdir()?;
    let path = dir.path().join("scripts.json");
    let store = JsonScriptStore::load(&path).await?;
    Ok((store, dir, path))
}

#[tokio::test]
async fn test_load_creates_empty_file() -> Result<(), Error> {
    let (store, _dir, path) = fresh_store().await?;

    assert!(path.exists(), "load should create the data file");
    let raw = std::fs::read_to_string(&path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(parsed, serde_json::json!({}));
    assert!(store.snapshot().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_save_then_load_round_trips() -> Result<(), Error> {
    let (store, _dir, path) = fresh_store().await?;

    store.add("G1", "hello", HELLO, "greet").await?;
    store.add("G1", "fly", "  loadstring(fly)()  ", "fly hack").await?;
    store.add("G2", "esp", "loadstring(esp)()", "").await?;
    store.update("G1", "hello", "loadstring(print('hey'))", None).await?;

    let reloaded = JsonScriptStore::load(&path).await?;
    assert_eq!(reloaded.snapshot().await, store.snapshot().await);
    assert_eq!(reloaded.get("G1", "fly").await?, "  loadstring(fly)()  ");
    assert_eq!(reloaded.description("G2", "esp").await?, "");
    assert_eq!(
        reloaded.list_entries("G1").await,
        vec![
            ("hello".to_string(), "greet".to_string()),
            ("fly".to_string(), "fly hack".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_file_layout() -> Result<(), Error> {
    let (store, _dir, path) = fresh_store().await?;
    store.add("123", "hello", HELLO, "greet").await?;

    let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(parsed["123"]["scripts"]["hello"], HELLO);
    assert_eq!(parsed["123"]["descriptions"]["hello"], "greet");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_name_leaves_store_unchanged() -> Result<(), Error> {
    let (store, _dir, path) = fresh_store().await?;
    store.add("G1", "hello", HELLO, "greet").await?;
    let before = store.snapshot().await;
    let file_before = std::fs::read_to_string(&path)?;

    let err = store
        .add("G1", "hello", "loadstring(other)", "other")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateName(ref n) if n == "hello"));

    assert_eq!(store.snapshot().await, before);
    assert_eq!(std::fs::read_to_string(&path)?, file_before);

    // Same name in another guild, or differing only in case, is fine.
    store.add("G2", "hello", HELLO, "greet").await?;
    store.add("G1", "Hello", HELLO, "greet").await?;
    Ok(())
}

#[tokio::test]
async fn test_prefix_policy() -> Result<(), Error> {
    let (store, _dir, _path) = fresh_store().await?;

    let err = store.add("G1", "x", "not-a-loader", "d").await.unwrap_err();
    assert!(matches!(err, Error::InvalidCode(_)));
    assert!(store.list_entries("G1").await.is_empty());

    store.add("G1", "x", "  loadstring(...)", "d").await?;
    assert_eq!(store.get("G1", "x").await?, "  loadstring(...)");

    let err = store.update("G1", "x", "print('no')", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidCode(_)));
    assert_eq!(store.get("G1", "x").await?, "  loadstring(...)");
    Ok(())
}

#[tokio::test]
async fn test_blank_name_is_rejected() -> Result<(), Error> {
    let (store, _dir, _path) = fresh_store().await?;
    let err = store.add("G1", "   ", HELLO, "d").await.unwrap_err();
    assert!(matches!(err, Error::InvalidName(_)));
    Ok(())
}

#[tokio::test]
async fn test_partial_update_keeps_description() -> Result<(), Error> {
    let (store, _dir, _path) = fresh_store().await?;
    store.add("G1", "hello", HELLO, "greet").await?;

    store.update("G1", "hello", "loadstring(code2)", None).await?;
    assert_eq!(store.get("G1", "hello").await?, "loadstring(code2)");
    assert_eq!(store.description("G1", "hello").await?, "greet");

    store.update("G1", "hello", "loadstring(code3)", Some("")).await?;
    assert_eq!(store.description("G1", "hello").await?, "greet");

    store.update("G1", "hello", "loadstring(code4)", Some("new words")).await?;
    assert_eq!(store.get("G1", "hello").await?, "loadstring(code4)");
    assert_eq!(store.description("G1", "hello").await?, "new words");
    Ok(())
}

#[tokio::test]
async fn test_update_unknown_is_not_found() -> Result<(), Error> {
    let (store, _dir, _path) = fresh_store().await?;
    let err = store.update("G1", "ghost", HELLO, None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(store.list_entries("G1").await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_remove_deletes_code_and_description() -> Result<(), Error> {
    let (store, _dir, path) = fresh_store().await?;
    store.add("G1", "a", HELLO, "first").await?;
    store.add("G1", "b", HELLO, "second").await?;

    store.remove("G1", "a").await?;
    assert!(matches!(store.get("G1", "a").await, Err(Error::NotFound(_))));
    assert!(matches!(store.description("G1", "a").await, Err(Error::NotFound(_))));
    assert_eq!(
        store.list_entries("G1").await,
        vec![("b".to_string(), "second".to_string())]
    );

    let err = store.remove("G1", "a").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let reloaded = JsonScriptStore::load(&path).await?;
    assert!(matches!(reloaded.get("G1", "a").await, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_unknown_guild_lists_nothing() -> Result<(), Error> {
    let (store, _dir, _path) = fresh_store().await?;
    assert!(store.list_entries("nobody").await.is_empty());
    assert!(matches!(store.get("nobody", "x").await, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_fails_to_load() -> Result<(), Error> {
    let dir = tempdir()?;
    let path = dir.path().join("scripts.json");
    std::fs::write(&path, "{ this is not json")?;

    let result = JsonScriptStore::load(&path).await;
    assert!(matches!(result, Err(Error::Json(_))));
    // Nothing was overwritten.
    assert_eq!(std::fs::read_to_string(&path)?, "{ this is not json");
    Ok(())
}

#[tokio::test]
async fn test_mismatched_maps_fail_to_load() -> Result<(), Error> {
    let dir = tempdir()?;
    let path = dir.path().join("scripts.json");
    std::fs::write(
        &path,
        r#"{"G1": {"scripts": {"a": "loadstring(a)"}, "descriptions": {}}}"#,
    )?;

    let result = JsonScriptStore::load(&path).await;
    assert!(matches!(result, Err(Error::Parse(_))));
    Ok(())
}

#[tokio::test]
async fn test_failed_write_keeps_memory_unchanged() -> Result<(), Error> {
    let dir = tempdir()?;
    let data_dir = dir.path().join("data");
    std::fs::create_dir(&data_dir)?;
    let store = JsonScriptStore::load(data_dir.join("scripts.json")).await?;
    store.add("G1", "keep", HELLO, "kept").await?;

    // Pull the directory out from under the store so the next write fails.
    std::fs::remove_dir_all(&data_dir)?;

    let err = store.add("G1", "lost", HELLO, "never saved").await.unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
    assert!(matches!(store.get("G1", "lost").await, Err(Error::NotFound(_))));

    let err = store.remove("G1", "keep").await.unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
    assert_eq!(store.get("G1", "keep").await?, HELLO);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_adds_are_all_persisted() -> Result<(), Error> {
    let (store, _dir, path) = fresh_store().await?;
    let store = std::sync::Arc::new(store);

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let guild = format!("G{}", i % 3);
            store.add(&guild, &format!("s{i}"), HELLO, "d").await
        }));
    }
    for handle in handles {
        handle.await.expect("task panicked")?;
    }

    let reloaded = JsonScriptStore::load(&path).await?;
    let total: usize = reloaded.snapshot().await.values().map(|g| g.scripts.len()).sum();
    assert_eq!(total, 16);
    Ok(())
}
