#![allow(dead_code)]

use std::path::Path;

use lpforge_model_store::{ModelResult, ModelStore, StoreConfig, ValidationMode};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn sqlite_config(base: &Path) -> StoreConfig {
    StoreConfig::default_sqlite(base.join("model.sqlite").to_string_lossy())
}

pub async fn open(base: &Path) -> ModelResult<ModelStore> {
    ModelStore::connect(&sqlite_config(base), base).await
}

pub async fn open_checked(base: &Path, mode: ValidationMode) -> ModelResult<ModelStore> {
    let config = sqlite_config(base).with_reference_checks(mode);
    ModelStore::connect(&config, base).await
}

pub fn input<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("input payload")
}
