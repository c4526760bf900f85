//! Compiled endpoint schemas.
//!
//! Raw endpoint configuration stores each field as a pipe-delimited directive
//! string (`paragraph|2`, `_categories|5`). Compilation parses every directive
//! exactly once, at startup, into a tagged [`FieldSpec`] and validates that
//! generator tags and relationship targets exist. A request never sees an
//! unparsed directive.

use indexmap::IndexMap;
use thiserror::Error;

use crate::config::{EndpointSettings, Settings};
use crate::engine::faker::FakerKind;

/// One positional directive parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Param {
    fn parse(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            Param::Int(i)
        } else if let Ok(f) = raw.parse::<f64>() {
            Param::Float(f)
        } else {
            Param::Str(raw.to_string())
        }
    }

    /// Integer view of a parameter, for generators with numeric knobs.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Param::Int(i) => Some(*i),
            Param::Float(f) => Some(*f as i64),
            Param::Str(_) => None,
        }
    }
}

/// A field's compiled generation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// Scalar value produced by the faker registry.
    Scalar { kind: FakerKind, params: Vec<Param> },
    /// Nested record(s) generated from another endpoint's schema.
    /// `count` is the explicit size for the many-case; `None` lets the
    /// collection synthesizer pick.
    Relationship { target: String, count: Option<u64> },
}

/// One endpoint, compiled: ordered fields plus resolved settings.
#[derive(Debug, Clone)]
pub struct EndpointSchema {
    pub name: String,
    pub settings: EndpointSettings,
    pub fields: Vec<(String, FieldSpec)>,
}

/// All endpoint schemas, compiled and cross-validated.
#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    endpoints: IndexMap<String, EndpointSchema>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("endpoint '{endpoint}', field '{field}': empty directive")]
    EmptyDirective { endpoint: String, field: String },

    #[error("endpoint '{endpoint}', field '{field}': unknown generator type '{tag}'")]
    UnknownGenerator {
        endpoint: String,
        field: String,
        tag: String,
    },

    #[error("endpoint '{endpoint}', field '{field}': unknown relationship target '{target}'")]
    UnknownTarget {
        endpoint: String,
        field: String,
        target: String,
    },

    #[error("endpoint '{endpoint}', field '{field}': relationship count '{raw}' is not a positive integer")]
    InvalidCount {
        endpoint: String,
        field: String,
        raw: String,
    },
}

impl CompiledSchema {
    /// Compile every endpoint in `settings`, collecting all errors rather
    /// than stopping at the first so startup reports the full list.
    pub fn compile(settings: &Settings) -> Result<Self, Vec<SchemaError>> {
        let mut errors = Vec::new();
        let mut endpoints = IndexMap::new();

        for (name, endpoint) in &settings.endpoints {
            let mut fields = Vec::with_capacity(endpoint.fields.len());
            for (field, directive) in &endpoint.fields {
                match parse_directive(settings, name, field, directive) {
                    Ok(spec) => fields.push((field.clone(), spec)),
                    Err(e) => errors.push(e),
                }
            }
            endpoints.insert(
                name.clone(),
                EndpointSchema {
                    name: name.clone(),
                    settings: endpoint.settings.clone(),
                    fields,
                },
            );
        }

        if errors.is_empty() {
            Ok(Self { endpoints })
        } else {
            Err(errors)
        }
    }

    pub fn endpoint(&self, name: &str) -> Option<&EndpointSchema> {
        self.endpoints.get(name)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

fn parse_directive(
    settings: &Settings,
    endpoint: &str,
    field: &str,
    directive: &str,
) -> Result<FieldSpec, SchemaError> {
    let mut parts = directive.split('|');
    let tag = parts.next().unwrap_or_default();
    if tag.is_empty() {
        return Err(SchemaError::EmptyDirective {
            endpoint: endpoint.to_string(),
            field: field.to_string(),
        });
    }

    // An underscore prefix marks a relationship to the endpoint named by the
    // rest of the tag.
    if let Some(target) = tag.strip_prefix('_') {
        if !settings.endpoints.contains_key(target) {
            return Err(SchemaError::UnknownTarget {
                endpoint: endpoint.to_string(),
                field: field.to_string(),
                target: target.to_string(),
            });
        }
        let count = match parts.next() {
            None => None,
            Some(raw) => match raw.parse::<u64>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(SchemaError::InvalidCount {
                        endpoint: endpoint.to_string(),
                        field: field.to_string(),
                        raw: raw.to_string(),
                    })
                }
            },
        };
        return Ok(FieldSpec::Relationship {
            target: target.to_string(),
            count,
        });
    }

    let kind = FakerKind::from_tag(tag).ok_or_else(|| SchemaError::UnknownGenerator {
        endpoint: endpoint.to_string(),
        field: field.to_string(),
        tag: tag.to_string(),
    })?;
    let params = parts.map(Param::parse).collect();
    Ok(FieldSpec::Scalar { kind, params })
}
