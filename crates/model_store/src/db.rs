use sea_orm::sea_query;
use sea_orm_migration::prelude::Iden;

#[derive(Iden, Clone, Copy)]
pub enum Sets {
    Table,
    Id,
    SetName,
    Description,
    Items,
    Length,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Parameters {
    Table,
    Id,
    Name,
    Value,
    Relations,
    Description,
}

#[derive(Iden, Clone, Copy)]
pub enum DecisionVariables {
    Table,
    Id,
    Name,
    Description,
    Relations,
    Length,
    Value,
}

#[derive(Iden, Clone, Copy)]
pub enum Constraints {
    Table,
    Id,
    Name,
    ParametersNeeded,
    DecisionNeeded,
    Description,
    Sign,
    Format,
    Rhs,
}

#[derive(Iden, Clone, Copy)]
pub enum ObjectiveFunctions {
    Table,
    Id,
    Name,
    ParametersNeeded,
    DecisionNeeded,
    Description,
    Format,
}
