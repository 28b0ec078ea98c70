//! Form schema: ordered field specs with their compiled rules

use super::error::{FormError, SchemaError};
use super::rule::{Rule, RuleDef};
use super::value::FieldKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declarative description of one field, as written in code or JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rules: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File)
    }

    /// Append a rule; rules are evaluated in the order added
    pub fn rule(mut self, rule: RuleDef) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Top-level shape of a JSON schema file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDef {
    pub fields: Vec<FieldDef>,
}

/// A validated field: name, kind and compiled rules
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether the field carries a `required` rule
    pub fn is_required(&self) -> bool {
        self.rules
            .iter()
            .any(|r| matches!(r.def(), RuleDef::Required { .. }))
    }
}

/// Ordered set of field specs with unique names.
///
/// Construction validates the whole schema up front so that validation
/// itself can never fail: names are unique, every `equalsField` target
/// exists, every pattern compiles and every rule fits its field kind.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
    /// For each field, the fields whose rules reference it
    dependents: Vec<Vec<usize>>,
}

impl FormSchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn new(defs: Vec<FieldDef>) -> Result<Self, FormError> {
        if defs.is_empty() {
            return Err(SchemaError::Empty.into());
        }

        let mut index = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if index.insert(def.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateField(def.name.clone()).into());
            }
        }

        let mut fields = Vec::with_capacity(defs.len());
        let mut dependents = vec![Vec::new(); defs.len()];
        for (i, def) in defs.iter().enumerate() {
            let rules = def
                .rules
                .iter()
                .map(|r| r.compile(&def.name, def.kind))
                .collect::<Result<Vec<_>, _>>()?;

            for target in rules.iter().filter_map(Rule::referenced_field) {
                if target == def.name {
                    return Err(SchemaError::SelfReference(def.name.clone()).into());
                }
                let Some(&target_index) = index.get(target) else {
                    return Err(SchemaError::DanglingReference {
                        field: def.name.clone(),
                        target: target.to_string(),
                    }
                    .into());
                };
                if !dependents[target_index].contains(&i) {
                    dependents[target_index].push(i);
                }
            }

            fields.push(FieldSpec {
                name: def.name.clone(),
                kind: def.kind,
                rules,
            });
        }

        tracing::debug!(fields = fields.len(), "Form schema built");
        Ok(Self {
            fields,
            index,
            dependents,
        })
    }

    /// Parse a schema from its JSON form
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let def: SchemaDef =
            serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::new(def.fields)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Indices of fields that must be revalidated when `index` changes
    pub fn dependents_of(&self, index: usize) -> &[usize] {
        self.dependents.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Incremental construction of a [`FormSchema`]
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
}

impl SchemaBuilder {
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<FormSchema, FormError> {
        FormSchema::new(self.fields)
    }
}
