use serde::Serialize;

use quarry_core::ExtractedEntities;

use crate::highlight::ActiveEntity;

/// Toggle button for one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityChip {
    pub kind: String,
    pub label: String,
    pub active: bool,
}

/// Chips for the first `limit` entity types, in the order the server sent them.
pub fn entity_chips(entities: &ExtractedEntities, limit: usize, active: &ActiveEntity) -> Vec<EntityChip> {
    entities
        .iter()
        .take(limit)
        .filter_map(|(kind, values)| {
            let first = values.first()?;
            Some(EntityChip {
                kind: kind.to_string(),
                label: format!("{kind}: {first}"),
                active: active.is(kind),
            })
        })
        .collect()
}
