pub mod api;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod input;
pub mod kind;
pub mod model;
pub mod refs;

pub use api::*;
pub use entity::Entity;
pub use envelope::{Action, Envelope, ErrorEnvelope};
pub use error::{ModelError, ModelResult};
pub use input::{NumberInput, TextInput};
pub use kind::EntityKind;
pub use model::*;
pub use refs::*;
