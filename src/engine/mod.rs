//! The response-synthesis engine.
//!
//! Turns an endpoint's compiled field schema plus a request's parameters
//! into a concrete JSON payload: field-by-field value generation, recursive
//! relationship expansion, preset-fixture overlay, filtering, projection,
//! and pagination. The engine is immutable after construction; every
//! per-request value travels in a [`CallContext`].

pub mod context;
pub mod faker;
pub mod filter;
pub mod fixtures;


use rand::Rng;
use serde_json::Value;

use crate::domain::inflect;
use crate::domain::schema::{CompiledSchema, EndpointSchema, FieldSpec};
use crate::domain::{GenerateError, Record};
use context::CallContext;
use fixtures::FixtureStore;

pub struct Engine {
    schema: CompiledSchema,
    fixtures: FixtureStore,
}

impl Engine {
    pub fn new(schema: CompiledSchema, fixtures: FixtureStore) -> Self {
        Self { schema, fixtures }
    }

    /// Generate the payload for one request.
    ///
    /// A singular endpoint name or a present `key` produces a single record;
    /// anything else produces a collection, filtered and (when the endpoint
    /// is configured for it) paginated.
    pub fn generate(
        &self,
        endpoint: &str,
        key: Option<&str>,
        ctx: CallContext<'_>,
    ) -> Result<Value, GenerateError> {
        let schema = self
            .schema
            .endpoint(endpoint)
            .ok_or_else(|| GenerateError::UnknownEndpoint(endpoint.to_string()))?;

        if inflect::is_singular(endpoint) || key.is_some() {
            let record = self.make_one(schema, ctx, None, key, &[])?;
            return Ok(Value::Object(record));
        }

        let records = self.make_many(schema, ctx, ctx.request.count, &[])?;
        let records = filter::apply(records, &ctx.request.filters);

        match schema.settings.paginate {
            Some(per_page) => Ok(filter::paginate(records, per_page, ctx.request.page)),
            None => Ok(Value::Array(
                records.into_iter().map(Value::Object).collect(),
            )),
        }
    }

    /// Build a batch of records, each seeing its index as a fixture
    /// position. Filtering and pagination belong to the caller; nested
    /// collections reach this directly and stay unfiltered.
    fn make_many<'a>(
        &'a self,
        schema: &'a EndpointSchema,
        ctx: CallContext<'_>,
        count: Option<u64>,
        ancestry: &[&'a str],
    ) -> Result<Vec<Record>, GenerateError> {
        let count = count
            .filter(|c| *c > 0)
            .unwrap_or_else(|| rand::thread_rng().gen_range(2..=12)) as usize;

        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            records.push(self.make_one(schema, ctx, Some(index), None, ancestry)?);
        }
        Ok(records)
    }

    /// Build one record in schema field order.
    ///
    /// `position` enables per-field preset overlay from the fixture store;
    /// `key` triggers the identifiable lookup/overwrite; `ancestry` is the
    /// chain of endpoints already being expanded above this one (empty for
    /// the outermost record, which is the only one that gets projection).
    fn make_one<'a>(
        &'a self,
        schema: &'a EndpointSchema,
        ctx: CallContext<'_>,
        position: Option<usize>,
        key: Option<&str>,
        ancestry: &[&'a str],
    ) -> Result<Record, GenerateError> {
        if schema.settings.auth && !ctx.authorized {
            return Err(GenerateError::Unauthorized);
        }

        let preset = position.and_then(|index| self.fixtures.by_position(&schema.name, index));

        let mut record = Record::new();
        for (name, spec) in &schema.fields {
            // Preset fields win over synthesis, field by field.
            if let Some(value) = preset.and_then(|row| row.get(name)) {
                record.insert(name.clone(), value.clone());
                continue;
            }
            match spec {
                FieldSpec::Scalar { kind, params } => {
                    record.insert(name.clone(), faker::generate(*kind, params));
                }
                FieldSpec::Relationship { target, count } => {
                    if ctx.request.no_relationships {
                        continue;
                    }
                    let value =
                        self.resolve_relationship(name, schema, target, *count, ctx, ancestry)?;
                    record.insert(name.clone(), value);
                }
            }
        }

        if let Some(key) = key {
            if let Some(fixture) =
                self.fixtures
                    .by_identifiable(&schema.name, key, &schema.settings.identifiable)
            {
                // A matching fixture replaces the whole record.
                record = fixture.clone();
            } else if let Some(slot) = record.get_mut(&schema.settings.identifiable) {
                // Otherwise the record stays addressable by the requested key.
                *slot = Value::String(key.to_string());
            }
        }

        if ancestry.is_empty() {
            Self::apply_projection(&mut record, ctx.request);
        }

        Ok(record)
    }

    /// Expand a relationship field. Cardinality comes from the field name:
    /// singular yields one nested record, plural a nested collection.
    fn resolve_relationship<'a>(
        &'a self,
        field: &str,
        current: &'a EndpointSchema,
        target: &str,
        count: Option<u64>,
        ctx: CallContext<'_>,
        ancestry: &[&'a str],
    ) -> Result<Value, GenerateError> {
        let target_schema = self
            .schema
            .endpoint(target)
            .ok_or_else(|| GenerateError::UnknownEndpoint(target.to_string()))?;

        let mut chain: Vec<&str> = Vec::with_capacity(ancestry.len() + 1);
        chain.extend_from_slice(ancestry);
        chain.push(current.name.as_str());
        if chain.contains(&target_schema.name.as_str()) {
            return Err(GenerateError::RelationshipCycle(target_schema.name.clone()));
        }

        if inflect::is_singular(field) {
            let record = self.make_one(target_schema, ctx, Some(0), None, &chain)?;
            Ok(Value::Object(record))
        } else {
            let records = self.make_many(target_schema, ctx, count, &chain)?;
            Ok(Value::Array(
                records.into_iter().map(Value::Object).collect(),
            ))
        }
    }

    /// `_only` wins exclusively over `_without`; schema order is preserved
    /// because retain keeps the map's insertion order.
    fn apply_projection(record: &mut Record, request: &context::RequestParams) {
        if let Some(only) = &request.only {
            record.retain(|name, _| only.iter().any(|field| field == name));
        } else if let Some(without) = &request.without {
            record.retain(|name, _| !without.iter().any(|field| field == name));
        }
    }
}
