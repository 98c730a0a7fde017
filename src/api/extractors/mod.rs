//! Custom extractors.

mod entity_id;
mod validated_form;

pub use entity_id::{parse_id, EntityId};
pub use validated_form::ValidatedForm;
