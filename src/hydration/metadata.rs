//! # Metadata Cache
//!
//! Per-entity metadata built once on first hydration and reused for the
//! lifetime of the cache. Population of a missing entry happens under the
//! entry lock of a `DashMap` shard, so concurrent first accesses for the same
//! entity build exactly one entry; afterwards readers only clone an `Arc`.
//!
//! Entries are keyed by the address of the static descriptor, so two distinct
//! types sharing a display name never share metadata.

use crate::error::{HydrationError, Result};
use crate::mapping::Mapper;
use crate::models::{Capability, EntityDescriptor};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Resolved mapping metadata of one entity
#[derive(Debug)]
pub struct EntityMetadata {
    entity: &'static str,
    capability: Capability,
    mapper: Mapper,
    /// field -> origin column
    column_map: BTreeMap<String, String>,
    /// origin column -> field
    reverse_map: BTreeMap<String, String>,
    declared: Option<BTreeSet<&'static str>>,
    unset: BTreeSet<&'static str>,
    unmapped: Option<&'static str>,
}

impl EntityMetadata {
    /// Build the metadata of one entity from its descriptor
    pub fn build(descriptor: &'static EntityDescriptor) -> Result<Self> {
        let factory = descriptor
            .mapper_factory()
            .ok_or_else(|| HydrationError::mapping_not_found(descriptor.name()))?;
        let mapper = factory();

        let mut column_map = mapper.origin_column_names();
        let mut reverse_map: BTreeMap<String, String> = column_map
            .iter()
            .map(|(field, origin)| (origin.clone(), field.clone()))
            .collect();

        let instance_fields = descriptor.instance_fields();
        let declared = descriptor.declared_field_names();
        let mut unset = BTreeSet::new();

        if let Some(declared) = &declared {
            column_map.retain(|field, origin| {
                let owned = declared.contains(field.as_str());
                if !owned {
                    reverse_map.remove(origin.as_str());
                }
                owned
            });

            unset.extend(
                instance_fields
                    .iter()
                    .map(|field| field.name)
                    .filter(|name| !declared.contains(name)),
            );
        }

        let capability = descriptor.effective_capability();
        let unmapped = if capability.is_strict() {
            instance_fields
                .iter()
                .map(|field| field.name)
                .filter(|name| !unset.contains(name))
                .find(|name| !mapper.covers(name))
        } else {
            None
        };

        debug!(
            entity = descriptor.name(),
            capability = %capability,
            columns = column_map.len(),
            pruned = unset.len(),
            "Built entity metadata"
        );

        Ok(Self {
            entity: descriptor.name(),
            capability,
            mapper,
            column_map,
            reverse_map,
            declared,
            unset,
            unmapped,
        })
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn column_map(&self) -> &BTreeMap<String, String> {
        &self.column_map
    }

    pub fn reverse_map(&self) -> &BTreeMap<String, String> {
        &self.reverse_map
    }

    /// Fields owned by a declared-only entity
    pub fn declared_fields(&self) -> Option<&BTreeSet<&'static str>> {
        self.declared.as_ref()
    }

    /// Fields removed from every instance of the entity
    pub fn unset_fields(&self) -> &BTreeSet<&'static str> {
        &self.unset
    }

    pub fn is_unset(&self, field: &str) -> bool {
        self.unset.contains(field)
    }

    /// First instance field a strict entity leaves unmapped
    pub fn unmapped_field(&self) -> Option<&'static str> {
        self.unmapped
    }
}

/// Concurrent cache of entity metadata keyed by descriptor identity
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: DashMap<usize, Arc<EntityMetadata>>,
    builds: AtomicUsize,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata of the entity, building it on first use
    pub fn resolve(&self, descriptor: &'static EntityDescriptor) -> Result<Arc<EntityMetadata>> {
        let key = descriptor_key(descriptor);
        if let Some(entry) = self.entries.get(&key) {
            return Ok(Arc::clone(entry.value()));
        }

        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let metadata = Arc::new(EntityMetadata::build(descriptor)?);
                self.builds.fetch_add(1, Ordering::Relaxed);
                entry.insert(Arc::clone(&metadata));
                Ok(metadata)
            }
        }
    }

    /// Check if any cached entry was built for an entity of this name
    pub fn contains(&self, entity: &str) -> bool {
        self.entries.iter().any(|entry| entry.value().entity() == entity)
    }

    pub fn contains_descriptor(&self, descriptor: &'static EntityDescriptor) -> bool {
        self.entries.contains_key(&descriptor_key(descriptor))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries built since the cache was created
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

fn descriptor_key(descriptor: &'static EntityDescriptor) -> usize {
    std::ptr::from_ref(descriptor) as usize
}
