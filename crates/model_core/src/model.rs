use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::input::{
    NumberInput, TextInput, optional_number, required_joined_text, required_number,
    required_text,
};
use crate::{Entity, EntityKind, ModelError, ModelResult, RefInput, RefList, Reference};

fn refs_or_empty(value: Option<RefInput>) -> RefList {
    value.map(RefInput::normalize).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Set
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub id: i64,
    pub set_name: String,
    pub description: Option<String>,
    pub items: RefList,
    pub length: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SetInput {
    pub set_name: Option<String>,
    pub description: Option<String>,
    pub items: Option<RefInput>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SetFields {
    pub set_name: String,
    pub description: Option<String>,
    pub items: RefList,
}

impl SetFields {
    pub fn length(&self) -> usize {
        self.items.len()
    }
}

impl Entity for Set {
    const KIND: EntityKind = EntityKind::Set;
    type Input = SetInput;
    type Fields = SetFields;

    fn validate(input: SetInput) -> ModelResult<SetFields> {
        Ok(SetFields {
            set_name: required_text(Self::KIND, "set_name", input.set_name)?,
            description: input.description,
            items: refs_or_empty(input.items),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.set_name
    }

    // Items are member labels, not references to other entities.
    fn field_refs(_fields: &SetFields) -> Vec<Reference<'_>> {
        Vec::new()
    }

    fn refs(&self) -> Vec<Reference<'_>> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Parameter
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub relations: RefList,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParameterInput {
    pub name: Option<String>,
    pub value: Option<NumberInput>,
    pub relations: Option<RefInput>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterFields {
    pub name: String,
    pub value: f64,
    pub relations: RefList,
    pub description: Option<String>,
}

impl Entity for Parameter {
    const KIND: EntityKind = EntityKind::Parameter;
    type Input = ParameterInput;
    type Fields = ParameterFields;

    fn validate(input: ParameterInput) -> ModelResult<ParameterFields> {
        Ok(ParameterFields {
            name: required_text(Self::KIND, "name", input.name)?,
            value: required_number(Self::KIND, "value", input.value)?,
            relations: refs_or_empty(input.relations),
            description: input.description,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn field_refs(fields: &ParameterFields) -> Vec<Reference<'_>> {
        vec![Reference::new("relations", EntityKind::Set, &fields.relations)]
    }

    fn refs(&self) -> Vec<Reference<'_>> {
        vec![Reference::new("relations", EntityKind::Set, &self.relations)]
    }
}

// ---------------------------------------------------------------------------
// Decision variable
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionVariable {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub relations: RefList,
    pub length: usize,
    pub value: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DecisionVariableInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub relations: Option<RefInput>,
    pub value: Option<NumberInput>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecisionVariableFields {
    pub name: String,
    pub description: Option<String>,
    pub relations: RefList,
    pub value: Option<f64>,
}

impl DecisionVariableFields {
    pub fn length(&self) -> usize {
        self.relations.len()
    }
}

impl Entity for DecisionVariable {
    const KIND: EntityKind = EntityKind::DecisionVariable;
    type Input = DecisionVariableInput;
    type Fields = DecisionVariableFields;

    fn validate(input: DecisionVariableInput) -> ModelResult<DecisionVariableFields> {
        Ok(DecisionVariableFields {
            name: required_text(Self::KIND, "name", input.name)?,
            description: input.description,
            relations: refs_or_empty(input.relations),
            value: optional_number(Self::KIND, "value", input.value)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn field_refs(fields: &DecisionVariableFields) -> Vec<Reference<'_>> {
        vec![Reference::new("relations", EntityKind::Set, &fields.relations)]
    }

    fn refs(&self) -> Vec<Reference<'_>> {
        vec![Reference::new("relations", EntityKind::Set, &self.relations)]
    }
}

// ---------------------------------------------------------------------------
// Constraint
// ---------------------------------------------------------------------------

/// Relational operator between a constraint's expression and its right-hand side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Le,
    Eq,
    Ge,
    Lt,
    Gt,
}

impl Sign {
    pub fn as_str(self) -> &'static str {
        match self {
            Sign::Le => "le",
            Sign::Eq => "eq",
            Sign::Ge => "ge",
            Sign::Lt => "lt",
            Sign::Gt => "gt",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sign {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "le" | "<=" | "≤" => Ok(Sign::Le),
            "eq" | "=" | "==" => Ok(Sign::Eq),
            "ge" | ">=" | "≥" => Ok(Sign::Ge),
            "lt" | "<" => Ok(Sign::Lt),
            "gt" | ">" => Ok(Sign::Gt),
            other => Err(ModelError::validation(format!(
                "Constraint sign '{other}' must be one of le, eq, ge, lt, gt"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub id: i64,
    pub name: String,
    pub parameters_needed: RefList,
    pub decision_needed: RefList,
    pub description: Option<String>,
    pub sign: Sign,
    pub format: Option<String>,
    pub rhs: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConstraintInput {
    pub name: Option<String>,
    pub parameters_needed: Option<RefInput>,
    pub decision_needed: Option<RefInput>,
    pub description: Option<String>,
    pub sign: Option<String>,
    pub format: Option<TextInput>,
    pub rhs: Option<NumberInput>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintFields {
    pub name: String,
    pub parameters_needed: RefList,
    pub decision_needed: RefList,
    pub description: Option<String>,
    pub sign: Sign,
    pub format: Option<String>,
    pub rhs: f64,
}

impl Entity for Constraint {
    const KIND: EntityKind = EntityKind::Constraint;
    type Input = ConstraintInput;
    type Fields = ConstraintFields;

    fn validate(input: ConstraintInput) -> ModelResult<ConstraintFields> {
        let name = required_text(Self::KIND, "name", input.name)?;
        let sign = required_text(Self::KIND, "sign", input.sign)?.parse::<Sign>()?;
        let rhs = required_number(Self::KIND, "rhs", input.rhs)?;
        Ok(ConstraintFields {
            name,
            parameters_needed: refs_or_empty(input.parameters_needed),
            decision_needed: refs_or_empty(input.decision_needed),
            description: input.description,
            sign,
            format: input.format.map(TextInput::into_text),
            rhs,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn field_refs(fields: &ConstraintFields) -> Vec<Reference<'_>> {
        needs(&fields.parameters_needed, &fields.decision_needed)
    }

    fn refs(&self) -> Vec<Reference<'_>> {
        needs(&self.parameters_needed, &self.decision_needed)
    }
}

fn needs<'a>(parameters: &'a RefList, decisions: &'a RefList) -> Vec<Reference<'a>> {
    vec![
        Reference::new("parameters_needed", EntityKind::Parameter, parameters),
        Reference::new("decision_needed", EntityKind::DecisionVariable, decisions),
    ]
}

// ---------------------------------------------------------------------------
// Objective function
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveFunction {
    pub id: i64,
    pub name: String,
    pub parameters_needed: RefList,
    pub decision_needed: RefList,
    pub description: Option<String>,
    pub format: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ObjectiveFunctionInput {
    pub name: Option<String>,
    pub parameters_needed: Option<RefInput>,
    pub decision_needed: Option<RefInput>,
    pub description: Option<String>,
    pub format: Option<TextInput>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectiveFunctionFields {
    pub name: String,
    pub parameters_needed: RefList,
    pub decision_needed: RefList,
    pub description: Option<String>,
    pub format: String,
}

impl Entity for ObjectiveFunction {
    const KIND: EntityKind = EntityKind::ObjectiveFunction;
    type Input = ObjectiveFunctionInput;
    type Fields = ObjectiveFunctionFields;

    fn validate(input: ObjectiveFunctionInput) -> ModelResult<ObjectiveFunctionFields> {
        Ok(ObjectiveFunctionFields {
            name: required_text(Self::KIND, "name", input.name)?,
            format: required_joined_text(Self::KIND, "format", input.format)?,
            parameters_needed: refs_or_empty(input.parameters_needed),
            decision_needed: refs_or_empty(input.decision_needed),
            description: input.description,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn field_refs(fields: &ObjectiveFunctionFields) -> Vec<Reference<'_>> {
        needs(&fields.parameters_needed, &fields.decision_needed)
    }

    fn refs(&self) -> Vec<Reference<'_>> {
        needs(&self.parameters_needed, &self.decision_needed)
    }
}
