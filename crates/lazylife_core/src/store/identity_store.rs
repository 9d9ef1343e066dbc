//! Identity store: bucketed identity statements, core values and traits.

use super::{Collection, DomainStore, Draft, Patch, Record};
use crate::model::identity::{
    CharacterTrait, CharacterTraitPatch, CoreValue, CoreValuePatch, IdentityItem,
    IdentityItemPatch, NewCharacterTrait, NewCoreValue, NewIdentityItem,
};
use crate::model::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityStore {
    items: Collection<IdentityItem>,
    core_values: Collection<CoreValue>,
    character_traits: Collection<CharacterTrait>,
    initialized: bool,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[IdentityItem] {
        self.items.as_slice()
    }

    pub fn core_values(&self) -> &[CoreValue] {
        self.core_values.as_slice()
    }

    pub fn character_traits(&self) -> &[CharacterTrait] {
        self.character_traits.as_slice()
    }

    /// Bucket names in first-seen order.
    pub fn buckets(&self) -> Vec<&str> {
        let mut buckets: Vec<&str> = Vec::new();
        for item in &self.items {
            if !buckets.contains(&item.bucket.as_str()) {
                buckets.push(item.bucket.as_str());
            }
        }
        buckets
    }

    pub fn items_in_bucket<'a>(
        &'a self,
        bucket: &'a str,
    ) -> impl Iterator<Item = &'a IdentityItem> + 'a {
        self.items.iter().filter(move |item| item.bucket == bucket)
    }

    pub fn add_item(&mut self, item: NewIdentityItem) -> EntityId {
        self.items.add(item)
    }

    pub fn update_item(&mut self, id: EntityId, patch: IdentityItemPatch) -> bool {
        self.items.update(id, patch)
    }

    pub fn delete_item(&mut self, id: EntityId) -> bool {
        self.items.remove(id).is_some()
    }

    pub fn add_core_value(&mut self, value: NewCoreValue) -> EntityId {
        self.core_values.add(value)
    }

    pub fn update_core_value(&mut self, id: EntityId, patch: CoreValuePatch) -> bool {
        self.core_values.update(id, patch)
    }

    pub fn delete_core_value(&mut self, id: EntityId) -> bool {
        self.core_values.remove(id).is_some()
    }

    pub fn add_character_trait(&mut self, character_trait: NewCharacterTrait) -> EntityId {
        self.character_traits.add(character_trait)
    }

    pub fn update_character_trait(&mut self, id: EntityId, patch: CharacterTraitPatch) -> bool {
        self.character_traits.update(id, patch)
    }

    pub fn delete_character_trait(&mut self, id: EntityId) -> bool {
        self.character_traits.remove(id).is_some()
    }
}

impl DomainStore for IdentityStore {
    const SLOT_KEY: &'static str = "identity-store";

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    fn seed_defaults(&mut self) {
        if self.core_values.is_empty() {
            let defaults = [
                ("Integrity", "Keep promises, especially to myself", 10),
                ("Growth", "Learn something every day", 9),
                ("Health", "Treat my body as a long-term asset", 8),
            ];
            for (value, description, importance) in defaults {
                self.core_values.add(NewCoreValue {
                    value: value.to_string(),
                    description: description.to_string(),
                    importance,
                });
            }
        }

        if self.items.is_empty() {
            let defaults = [
                ("I am", "someone who shows up every day"),
                ("I am becoming", "a calm and focused person"),
                ("I believe", "small habits compound"),
            ];
            for (bucket, text) in defaults {
                self.items.add(NewIdentityItem {
                    bucket: bucket.to_string(),
                    text: text.to_string(),
                });
            }
        }
    }
}

impl Record for IdentityItem {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewIdentityItem {
    type Record = IdentityItem;

    fn into_record(self, id: EntityId) -> IdentityItem {
        IdentityItem {
            id,
            bucket: self.bucket,
            text: self.text,
        }
    }
}

impl Patch<IdentityItem> for IdentityItemPatch {
    fn apply_to(self, target: &mut IdentityItem) {
        if let Some(bucket) = self.bucket {
            target.bucket = bucket;
        }
        if let Some(text) = self.text {
            target.text = text;
        }
    }
}

impl Record for CoreValue {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewCoreValue {
    type Record = CoreValue;

    fn into_record(self, id: EntityId) -> CoreValue {
        CoreValue {
            id,
            value: self.value,
            description: self.description,
            importance: self.importance,
        }
    }
}

impl Patch<CoreValue> for CoreValuePatch {
    fn apply_to(self, target: &mut CoreValue) {
        if let Some(value) = self.value {
            target.value = value;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(importance) = self.importance {
            target.importance = importance;
        }
    }
}

impl Record for CharacterTrait {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewCharacterTrait {
    type Record = CharacterTrait;

    fn into_record(self, id: EntityId) -> CharacterTrait {
        CharacterTrait {
            id,
            name: self.name,
            current_score: self.current_score,
            target_score: self.target_score,
        }
    }
}

impl Patch<CharacterTrait> for CharacterTraitPatch {
    fn apply_to(self, target: &mut CharacterTrait) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(current_score) = self.current_score {
            target.current_score = current_score;
        }
        if let Some(target_score) = self.target_score {
            target.target_score = target_score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IdentityStore;
    use crate::model::identity::{IdentityItemPatch, NewIdentityItem};

    fn item(bucket: &str, text: &str) -> NewIdentityItem {
        NewIdentityItem {
            bucket: bucket.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn items_group_by_bucket_in_first_seen_order() {
        let mut store = IdentityStore::new();
        store.add_item(item("I am", "patient"));
        store.add_item(item("I believe", "rest matters"));
        let moved = store.add_item(item("I am", "curious"));

        assert_eq!(store.buckets(), ["I am", "I believe"]);
        assert_eq!(store.items_in_bucket("I am").count(), 2);

        store.update_item(
            moved,
            IdentityItemPatch {
                bucket: Some("I am becoming".to_string()),
                ..IdentityItemPatch::default()
            },
        );
        assert_eq!(store.buckets(), ["I am", "I believe", "I am becoming"]);
        assert_eq!(store.items_in_bucket("I am").count(), 1);
    }
}
