mod support;

use lpforge_model_store::{EntityApi, ModelError, ModelResult, ModelStore, SetInput};
use serde_json::json;
use support::{input, sqlite_config};
use tempfile::tempdir;

async fn store_with(base: &std::path::Path, failpoint: &str) -> ModelResult<ModelStore> {
    let config = sqlite_config(base).with_failpoints([failpoint]);
    ModelStore::connect(&config, base).await
}

#[tokio::test]
async fn insert_failpoint_surfaces_storage_error() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = store_with(dir.path(), "before_insert").await?;
    let err = store
        .sets()
        .create(input::<SetInput>(json!({ "set_name": "Suppliers" })))
        .await
        .expect_err("failpoint");
    assert!(matches!(err, ModelError::Storage { .. }));
    assert_eq!(err.code(), "storage_error");
    assert!(store.sets().list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn validation_runs_before_storage() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = store_with(dir.path(), "before_insert").await?;
    let err = store
        .sets()
        .create(input::<SetInput>(json!({})))
        .await
        .expect_err("invalid");
    assert!(matches!(err, ModelError::Validation { .. }));
    Ok(())
}

#[tokio::test]
async fn select_failpoint_blocks_reads() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = store_with(dir.path(), "before_select").await?;
    assert!(matches!(
        store.sets().list().await,
        Err(ModelError::Storage { .. })
    ));
    assert!(matches!(
        store.parameters().get(1).await,
        Err(ModelError::Storage { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn update_and_delete_failpoints_leave_rows_intact() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let base = dir.path();
    let seeded = support::open(base).await?;
    let created = seeded
        .sets()
        .create(input::<SetInput>(json!({ "set_name": "Suppliers", "items": "A" })))
        .await?;

    let config = sqlite_config(base).with_failpoints(["before_update", "before_delete"]);
    let store = ModelStore::connect(&config, base).await?;
    assert!(matches!(
        store
            .sets()
            .update(created.id, input::<SetInput>(json!({ "set_name": "Other" })))
            .await,
        Err(ModelError::Storage { .. })
    ));
    assert!(matches!(
        store.sets().delete(created.id).await,
        Err(ModelError::Storage { .. })
    ));
    let fetched = store.sets().get(created.id).await?;
    assert_eq!(fetched.set_name, "Suppliers");
    Ok(())
}
