//! Evaluation of descriptors against JSON documents

use chrono::DateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;

use super::descriptor::{Direction, Filter, Population, Predicate, Projection, SortKey};
use super::scalar::Scalar;

/// A record as returned by list operations
pub type Document = Map<String, Value>;

/// Serialize an entity into its document form
pub fn to_document<T: Serialize>(value: &T) -> Document {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Document::new(),
    }
}

fn equals(operand: &Scalar, value: Option<&Value>) -> bool {
    match value {
        None => operand.is_null(),
        Some(value) => operand.compare(value) == Some(Ordering::Equal),
    }
}

impl Predicate {
    /// Whether a (possibly missing) field value satisfies this predicate
    pub fn matches(&self, value: Option<&Value>) -> bool {
        let ordering = |operand: &Scalar| value.and_then(|v| operand.compare(v));
        match self {
            Self::Eq(operand) => equals(operand, value),
            Self::Ne(operand) => !equals(operand, value),
            Self::Gt(operand) => ordering(operand) == Some(Ordering::Greater),
            Self::Gte(operand) => matches!(
                ordering(operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::Lt(operand) => ordering(operand) == Some(Ordering::Less),
            Self::Lte(operand) => {
                matches!(ordering(operand), Some(Ordering::Less | Ordering::Equal))
            }
            Self::In(list) => list.iter().any(|operand| equals(operand, value)),
            Self::NotIn(list) => !list.iter().any(|operand| equals(operand, value)),
            Self::Exists(expected) => value.is_some_and(|v| !v.is_null()) == *expected,
        }
    }
}

impl Filter {
    pub fn matches(&self, doc: &Document) -> bool {
        self.iter()
            .all(|(field, predicates)| predicates.iter().all(|p| p.matches(doc.get(field))))
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Some(Value::String(a)), Some(Value::String(b))) => {
            match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Order two documents by the sort keys, falling back to `id` for a stable order
pub fn compare_documents(sort: &[SortKey], a: &Document, b: &Document) -> Ordering {
    sort.iter()
        .map(|key| {
            let ordering = compare_values(a.get(&key.field), b.get(&key.field));
            match key.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| compare_values(a.get("id"), b.get("id")))
}

impl Projection {
    pub fn apply(&self, doc: &mut Document) {
        match self {
            Self::All => {}
            Self::Include(fields) => doc.retain(|key, _| key == "id" || fields.contains(key)),
            Self::Exclude(fields) => doc.retain(|key, _| key == "id" || !fields.contains(key)),
        }
    }
}

impl Population {
    /// Trim a related document down to the selected fields (plus `id`)
    pub fn select_from(&self, mut related: Document) -> Document {
        if !self.select.is_empty() {
            related.retain(|key, _| key == "id" || self.select.iter().any(|s| s == key));
        }
        related
    }
}

/// Replace reference fields with their related documents.
///
/// `resolve` receives the population and the stored reference; a reference
/// that resolves to nothing becomes `null`.
pub fn populate<F>(doc: &mut Document, population: &[Population], mut resolve: F)
where
    F: FnMut(&Population, &Value) -> Option<Document>,
{
    for relation in population {
        let Some(reference) = doc.get(&relation.path).filter(|v| !v.is_null()).cloned() else {
            continue;
        };
        let resolved = resolve(relation, &reference)
            .map_or(Value::Null, |related| Value::Object(relation.select_from(related)));
        doc.insert(relation.path.clone(), resolved);
    }
}
