mod support;

use lpforge_model_store::{
    ConstraintInput, DecisionVariableInput, EntityApi, ModelError, ModelResult,
    ObjectiveFunctionInput, ParameterInput, Sign,
};
use serde_json::json;
use support::{input, open};
use tempfile::tempdir;

#[tokio::test]
async fn parameter_accepts_zero_and_numeric_strings() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = open(dir.path()).await?;
    let parameters = store.parameters();

    let zero = parameters
        .create(input::<ParameterInput>(json!({ "name": "cost", "value": 0 })))
        .await?;
    assert_eq!(zero.value, 0.0);
    assert!(zero.relations.is_empty());

    let parsed = parameters
        .create(input::<ParameterInput>(json!({
            "name": "demand",
            "value": "12.5",
            "relations": ["Markets"]
        })))
        .await?;
    assert_eq!(parsed.value, 12.5);
    assert_eq!(parsed.relations.as_slice(), ["Markets"]);

    let fetched = parameters.get(parsed.id).await?;
    assert_eq!(fetched, parsed);
    Ok(())
}

#[tokio::test]
async fn parameter_missing_value_is_rejected() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = open(dir.path()).await?;
    let parameters = store.parameters();
    let err = parameters
        .create(input::<ParameterInput>(json!({ "name": "cost" })))
        .await
        .expect_err("missing value");
    assert!(matches!(err, ModelError::Validation { .. }));
    assert_eq!(err.message(), "Parameter value is required");

    let err = parameters
        .create(input::<ParameterInput>(json!({ "name": "cost", "value": "abc" })))
        .await
        .expect_err("bad value");
    assert_eq!(err.message(), "Parameter value must be a number");
    assert!(parameters.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn decision_variable_length_and_optional_value() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = open(dir.path()).await?;
    let variables = store.decision_variables();

    let unset = variables
        .create(input::<DecisionVariableInput>(json!({
            "name": "x",
            "relations": "Suppliers, Markets",
            "value": ""
        })))
        .await?;
    assert_eq!(unset.length, 2);
    assert_eq!(unset.value, None);

    let updated = variables
        .update(
            unset.id,
            input::<DecisionVariableInput>(json!({
                "name": "x",
                "relations": ["Suppliers"],
                "value": 3
            })),
        )
        .await?;
    assert_eq!(updated.length, 1);
    assert_eq!(updated.value, Some(3.0));
    assert_eq!(variables.get(unset.id).await?, updated);
    Ok(())
}

#[tokio::test]
async fn constraint_without_reference_lists() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = open(dir.path()).await?;
    let created = store
        .constraints()
        .create(input::<ConstraintInput>(json!({
            "name": "Cap",
            "sign": "<=",
            "rhs": 0
        })))
        .await?;
    assert_eq!(created.sign, Sign::Le);
    assert_eq!(created.rhs, 0.0);
    assert!(created.parameters_needed.is_empty());
    assert!(created.decision_needed.is_empty());
    assert_eq!(created.format, None);
    assert_eq!(store.constraints().get(created.id).await?, created);
    Ok(())
}

#[tokio::test]
async fn constraint_rejects_unknown_sign() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = open(dir.path()).await?;
    let err = store
        .constraints()
        .create(input::<ConstraintInput>(json!({
            "name": "Cap",
            "sign": "!=",
            "rhs": 1
        })))
        .await
        .expect_err("sign");
    assert!(matches!(err, ModelError::Validation { .. }));
    Ok(())
}

#[tokio::test]
async fn update_replaces_every_field() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = open(dir.path()).await?;
    let constraints = store.constraints();
    let created = constraints
        .create(input::<ConstraintInput>(json!({
            "name": "Supply",
            "parameters_needed": ["capacity"],
            "decision_needed": ["x"],
            "description": "supply limit",
            "sign": "le",
            "format": ["sum(x)", "capacity"],
            "rhs": 10
        })))
        .await?;
    assert_eq!(created.format.as_deref(), Some("sum(x), capacity"));

    let replaced = constraints
        .update(
            created.id,
            input::<ConstraintInput>(json!({
                "name": "Supply",
                "sign": "GE",
                "rhs": 5
            })),
        )
        .await?;
    assert_eq!(replaced.sign, Sign::Ge);
    assert_eq!(replaced.rhs, 5.0);
    assert!(replaced.parameters_needed.is_empty());
    assert!(replaced.decision_needed.is_empty());
    assert_eq!(replaced.description, None);
    assert_eq!(replaced.format, None);

    let reread = constraints.get(created.id).await?;
    assert_eq!(reread, replaced);
    assert_eq!(reread.id, created.id);
    assert_eq!(reread.sign, Sign::Ge);
    assert_eq!(reread.rhs, 5.0);
    assert!(reread.parameters_needed.is_empty());
    assert!(reread.decision_needed.is_empty());
    assert_eq!(reread.description, None);
    assert_eq!(reread.format, None);
    Ok(())
}

#[tokio::test]
async fn objective_function_requires_format() -> ModelResult<()> {
    let dir = tempdir().expect("tempdir");
    let store = open(dir.path()).await?;
    let objectives = store.objective_functions();
    let err = objectives
        .create(input::<ObjectiveFunctionInput>(json!({ "name": "cost" })))
        .await
        .expect_err("format");
    assert_eq!(err.message(), "Objective function format is required");

    let created = objectives
        .create(input::<ObjectiveFunctionInput>(json!({
            "name": "cost",
            "parameters_needed": "c",
            "decision_needed": "x",
            "format": "min sum(c*x)"
        })))
        .await?;
    assert_eq!(created.format, "min sum(c*x)");
    let deleted = objectives.delete(created.id).await?;
    assert_eq!(deleted, created);
    assert!(objectives.list().await?.is_empty());
    Ok(())
}
