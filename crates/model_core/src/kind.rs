use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Set,
    Parameter,
    DecisionVariable,
    Constraint,
    ObjectiveFunction,
}

impl EntityKind {
    /// Collection name used for tables and API routes.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Set => "sets",
            EntityKind::Parameter => "parameters",
            EntityKind::DecisionVariable => "decision_variables",
            EntityKind::Constraint => "constraints",
            EntityKind::ObjectiveFunction => "objective_functions",
        }
    }

    /// Capitalized singular label, e.g. `Decision variable`.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Set => "Set",
            EntityKind::Parameter => "Parameter",
            EntityKind::DecisionVariable => "Decision variable",
            EntityKind::Constraint => "Constraint",
            EntityKind::ObjectiveFunction => "Objective function",
        }
    }

    /// Lowercase singular noun, e.g. `decision variable`.
    pub fn noun(self) -> &'static str {
        match self {
            EntityKind::Set => "set",
            EntityKind::Parameter => "parameter",
            EntityKind::DecisionVariable => "decision variable",
            EntityKind::Constraint => "constraint",
            EntityKind::ObjectiveFunction => "objective function",
        }
    }

    /// Lowercase plural noun, e.g. `decision variables`.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Set => "sets",
            EntityKind::Parameter => "parameters",
            EntityKind::DecisionVariable => "decision variables",
            EntityKind::Constraint => "constraints",
            EntityKind::ObjectiveFunction => "objective functions",
        }
    }
}
