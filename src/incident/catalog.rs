//! Incident catalog - registered definitions in registration order

use super::definition::IncidentDefinition;
use ahash::AHashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct IncidentCatalog {
    definitions: Vec<Rc<dyn IncidentDefinition>>,
    index: AHashMap<String, usize>,
}

impl IncidentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and keeps the existing entry) on a duplicate id
    pub fn register(&mut self, definition: Rc<dyn IncidentDefinition>) -> bool {
        if self.index.contains_key(definition.id()) {
            return false;
        }
        self.index
            .insert(definition.id().to_string(), self.definitions.len());
        self.definitions.push(definition);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Rc<dyn IncidentDefinition>> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn IncidentDefinition>> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
