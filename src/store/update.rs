//! Declarative partial-update builder.
//!
//! A record schema is an ordered list of attribute names. Given the fields a
//! caller supplied, the builder emits one `#field = :field` clause per present
//! field, in schema order, together with the name and value bindings the
//! store needs. Placeholders keep attribute names clear of DynamoDB reserved
//! words (`name` and `locale` both are).

use serde_json::Value;
use std::collections::BTreeMap;

use super::Item;
use crate::errors::ServiceError;

/// A ready-to-apply `SET` update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdatePlan {
    fields: Vec<String>,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, Value>,
}

impl UpdatePlan {
    fn push(&mut self, field: &str, value: Value) {
        self.names.insert(name_placeholder(field), field.to_string());
        self.values.insert(value_placeholder(field), value);
        self.fields.push(field.to_string());
    }

    /// The clauses in application order, e.g. `#rating = :rating`.
    #[must_use]
    pub fn clauses(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| format!("{} = {}", name_placeholder(f), value_placeholder(f)))
            .collect()
    }

    /// Full update expression, e.g. `SET #rating = :rating, #updatedAt = :updatedAt`.
    #[must_use]
    pub fn expression(&self) -> String {
        format!("SET {}", self.clauses().join(", "))
    }

    #[must_use]
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Resolved `(attribute, value)` pairs in clause order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().filter_map(|f| {
            self.values
                .get(&value_placeholder(f))
                .map(|v| (f.as_str(), v))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builds [`UpdatePlan`]s for one record schema.
#[derive(Debug, Clone, Copy)]
pub struct UpdateBuilder {
    schema: &'static [&'static str],
}

impl UpdateBuilder {
    #[must_use]
    pub const fn new(schema: &'static [&'static str]) -> Self {
        Self { schema }
    }

    /// Builds the update for every schema field present (and non-null) in
    /// `supplied`, then appends the forced `stamp` field if given.
    ///
    /// Fails with `empty_message` when no schema field was supplied; the
    /// stamp alone never makes an update worth applying. Keys outside the
    /// schema are ignored.
    pub fn build(
        &self,
        supplied: &Item,
        stamp: Option<(&str, Value)>,
        empty_message: &str,
    ) -> Result<UpdatePlan, ServiceError> {
        let mut plan = UpdatePlan::default();

        for field in self.schema {
            match supplied.get(*field) {
                Some(Value::Null) | None => {}
                Some(value) => plan.push(field, value.clone()),
            }
        }

        if plan.is_empty() {
            return Err(ServiceError::ValidationError(empty_message.to_string()));
        }

        if let Some((field, value)) = stamp {
            plan.push(field, value);
        }

        Ok(plan)
    }
}

fn name_placeholder(field: &str) -> String {
    format!("#{field}")
}

fn value_placeholder(field: &str) -> String {
    format!(":{field}")
}
