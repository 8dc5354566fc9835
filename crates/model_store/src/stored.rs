//! Row codecs: how each entity kind maps onto its table.

use sea_orm::sea_query::{Iden, Value as SeaValue};
use sea_orm::{QueryResult, TryGetable};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::db::{Constraints, DecisionVariables, ObjectiveFunctions, Parameters, Sets};
use lpforge_model_core::{
    Constraint, ConstraintFields, DecisionVariable, DecisionVariableFields, Entity, ModelError,
    ModelResult, ObjectiveFunction, ObjectiveFunctionFields, Parameter, ParameterFields, RefList,
    Set, SetFields, Sign,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteKind {
    Insert,
    Update,
}

/// An [`Entity`] with a table behind it.
///
/// `write_values` never includes the identity column and always recomputes
/// derived columns from the fields being written.
pub trait StoredEntity: Entity {
    type Column: Iden + Copy + Send + Sync + 'static;

    const TABLE: Self::Column;
    const ID: Self::Column;
    /// Column holding the label other entities may reference.
    const NAME: Self::Column;

    fn write_values(
        fields: &Self::Fields,
        write: WriteKind,
        now: OffsetDateTime,
    ) -> ModelResult<Vec<(Self::Column, SeaValue)>>;

    fn from_row(row: &QueryResult) -> ModelResult<Self>;
}

pub(crate) fn col_name(column: impl Iden) -> String {
    column.to_string()
}

pub(crate) fn read<T: TryGetable>(row: &QueryResult, column: impl Iden) -> ModelResult<T> {
    Ok(row.try_get("", &col_name(column))?)
}

fn read_refs(row: &QueryResult, column: impl Iden) -> ModelResult<RefList> {
    let raw: String = read(row, column)?;
    RefList::from_json(&raw)
}

fn read_length(row: &QueryResult, column: impl Iden) -> ModelResult<usize> {
    let raw: i64 = read(row, column)?;
    usize::try_from(raw).map_err(|_| ModelError::storage(format!("invalid stored length {raw}")))
}

fn read_time(row: &QueryResult, column: impl Iden) -> ModelResult<OffsetDateTime> {
    let raw: String = read(row, column)?;
    OffsetDateTime::parse(&raw, &Rfc3339)
        .map_err(|err| ModelError::storage(format!("invalid stored timestamp '{raw}': {err}")))
}

fn time_value(value: OffsetDateTime) -> ModelResult<SeaValue> {
    let formatted = value
        .format(&Rfc3339)
        .map_err(|err| ModelError::storage(format!("format timestamp: {err}")))?;
    Ok(formatted.into())
}

fn refs_value(refs: &RefList) -> ModelResult<SeaValue> {
    Ok(refs.to_json()?.into())
}

fn length_value(length: usize) -> SeaValue {
    (length as i64).into()
}

impl StoredEntity for Set {
    type Column = Sets;

    const TABLE: Sets = Sets::Table;
    const ID: Sets = Sets::Id;
    const NAME: Sets = Sets::SetName;

    fn write_values(
        fields: &SetFields,
        write: WriteKind,
        now: OffsetDateTime,
    ) -> ModelResult<Vec<(Sets, SeaValue)>> {
        let mut values = vec![
            (Sets::SetName, fields.set_name.clone().into()),
            (Sets::Description, fields.description.clone().into()),
            (Sets::Items, refs_value(&fields.items)?),
            (Sets::Length, length_value(fields.length())),
        ];
        if write == WriteKind::Insert {
            values.push((Sets::CreatedAt, time_value(now)?));
        }
        values.push((Sets::UpdatedAt, time_value(now)?));
        Ok(values)
    }

    fn from_row(row: &QueryResult) -> ModelResult<Self> {
        Ok(Set {
            id: read(row, Sets::Id)?,
            set_name: read(row, Sets::SetName)?,
            description: read(row, Sets::Description)?,
            items: read_refs(row, Sets::Items)?,
            length: read_length(row, Sets::Length)?,
            created_at: read_time(row, Sets::CreatedAt)?,
            updated_at: read_time(row, Sets::UpdatedAt)?,
        })
    }
}

impl StoredEntity for Parameter {
    type Column = Parameters;

    const TABLE: Parameters = Parameters::Table;
    const ID: Parameters = Parameters::Id;
    const NAME: Parameters = Parameters::Name;

    fn write_values(
        fields: &ParameterFields,
        _write: WriteKind,
        _now: OffsetDateTime,
    ) -> ModelResult<Vec<(Parameters, SeaValue)>> {
        Ok(vec![
            (Parameters::Name, fields.name.clone().into()),
            (Parameters::Value, fields.value.into()),
            (Parameters::Relations, refs_value(&fields.relations)?),
            (Parameters::Description, fields.description.clone().into()),
        ])
    }

    fn from_row(row: &QueryResult) -> ModelResult<Self> {
        Ok(Parameter {
            id: read(row, Parameters::Id)?,
            name: read(row, Parameters::Name)?,
            value: read(row, Parameters::Value)?,
            relations: read_refs(row, Parameters::Relations)?,
            description: read(row, Parameters::Description)?,
        })
    }
}

impl StoredEntity for DecisionVariable {
    type Column = DecisionVariables;

    const TABLE: DecisionVariables = DecisionVariables::Table;
    const ID: DecisionVariables = DecisionVariables::Id;
    const NAME: DecisionVariables = DecisionVariables::Name;

    fn write_values(
        fields: &DecisionVariableFields,
        _write: WriteKind,
        _now: OffsetDateTime,
    ) -> ModelResult<Vec<(DecisionVariables, SeaValue)>> {
        Ok(vec![
            (DecisionVariables::Name, fields.name.clone().into()),
            (DecisionVariables::Description, fields.description.clone().into()),
            (DecisionVariables::Relations, refs_value(&fields.relations)?),
            (DecisionVariables::Length, length_value(fields.length())),
            (DecisionVariables::Value, fields.value.into()),
        ])
    }

    fn from_row(row: &QueryResult) -> ModelResult<Self> {
        Ok(DecisionVariable {
            id: read(row, DecisionVariables::Id)?,
            name: read(row, DecisionVariables::Name)?,
            description: read(row, DecisionVariables::Description)?,
            relations: read_refs(row, DecisionVariables::Relations)?,
            length: read_length(row, DecisionVariables::Length)?,
            value: read(row, DecisionVariables::Value)?,
        })
    }
}

impl StoredEntity for Constraint {
    type Column = Constraints;

    const TABLE: Constraints = Constraints::Table;
    const ID: Constraints = Constraints::Id;
    const NAME: Constraints = Constraints::Name;

    fn write_values(
        fields: &ConstraintFields,
        _write: WriteKind,
        _now: OffsetDateTime,
    ) -> ModelResult<Vec<(Constraints, SeaValue)>> {
        Ok(vec![
            (Constraints::Name, fields.name.clone().into()),
            (
                Constraints::ParametersNeeded,
                refs_value(&fields.parameters_needed)?,
            ),
            (Constraints::DecisionNeeded, refs_value(&fields.decision_needed)?),
            (Constraints::Description, fields.description.clone().into()),
            (Constraints::Sign, fields.sign.as_str().into()),
            (Constraints::Format, fields.format.clone().into()),
            (Constraints::Rhs, fields.rhs.into()),
        ])
    }

    fn from_row(row: &QueryResult) -> ModelResult<Self> {
        let sign: String = read(row, Constraints::Sign)?;
        let sign = sign
            .parse::<Sign>()
            .map_err(|err| ModelError::storage(format!("invalid stored sign: {err}")))?;
        Ok(Constraint {
            id: read(row, Constraints::Id)?,
            name: read(row, Constraints::Name)?,
            parameters_needed: read_refs(row, Constraints::ParametersNeeded)?,
            decision_needed: read_refs(row, Constraints::DecisionNeeded)?,
            description: read(row, Constraints::Description)?,
            sign,
            format: read(row, Constraints::Format)?,
            rhs: read(row, Constraints::Rhs)?,
        })
    }
}

impl StoredEntity for ObjectiveFunction {
    type Column = ObjectiveFunctions;

    const TABLE: ObjectiveFunctions = ObjectiveFunctions::Table;
    const ID: ObjectiveFunctions = ObjectiveFunctions::Id;
    const NAME: ObjectiveFunctions = ObjectiveFunctions::Name;

    fn write_values(
        fields: &ObjectiveFunctionFields,
        _write: WriteKind,
        _now: OffsetDateTime,
    ) -> ModelResult<Vec<(ObjectiveFunctions, SeaValue)>> {
        Ok(vec![
            (ObjectiveFunctions::Name, fields.name.clone().into()),
            (
                ObjectiveFunctions::ParametersNeeded,
                refs_value(&fields.parameters_needed)?,
            ),
            (
                ObjectiveFunctions::DecisionNeeded,
                refs_value(&fields.decision_needed)?,
            ),
            (
                ObjectiveFunctions::Description,
                fields.description.clone().into(),
            ),
            (ObjectiveFunctions::Format, fields.format.clone().into()),
        ])
    }

    fn from_row(row: &QueryResult) -> ModelResult<Self> {
        Ok(ObjectiveFunction {
            id: read(row, ObjectiveFunctions::Id)?,
            name: read(row, ObjectiveFunctions::Name)?,
            parameters_needed: read_refs(row, ObjectiveFunctions::ParametersNeeded)?,
            decision_needed: read_refs(row, ObjectiveFunctions::DecisionNeeded)?,
            description: read(row, ObjectiveFunctions::Description)?,
            format: read(row, ObjectiveFunctions::Format)?,
        })
    }
}
