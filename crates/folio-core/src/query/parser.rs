//! Tolerant query-string parser
//!
//! Every fragment that cannot be understood is dropped and reported as a
//! [`QueryWarning`]; parsing itself never fails.

use std::collections::{BTreeMap, BTreeSet};

use super::descriptor::{Filter, Population, Predicate, Projection, QueryDescriptor, SortKey};
use super::scalar::{parse_datetime, Scalar};
use super::schema::CollectionSchema;

/// Pagination keys consumed by the page arithmetic, never filters
pub const RESERVED_KEYS: [&str; 4] = ["current", "pageSize", "skip", "limit"];

/// Non-fatal diagnostic produced while parsing a list query
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryWarning {
    #[error("malformed query fragment `{0}`")]
    MalformedFragment(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{0}` cannot be filtered or sorted")]
    NotFilterable(String),

    #[error("value `{value}` is not valid for field `{field}`")]
    InvalidValue { field: String, value: String },

    #[error("regular expression values are not supported (field `{0}`)")]
    UnsupportedRegex(String),

    #[error("unparseable createdSince date `{0}`")]
    InvalidDate(String),

    #[error("projection mixes include and exclude; excludes ignored")]
    MixedProjection,
}

/// Parsed descriptor plus whatever was dropped on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltQuery {
    pub descriptor: QueryDescriptor,
    pub warnings: Vec<QueryWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Exists,
    Missing,
}

/// Split a decoded fragment into key, operator and value
fn split_fragment(fragment: &str) -> Option<(&str, Operator, &str)> {
    if let Some(rest) = fragment.strip_prefix('!') {
        if !rest.contains(['=', '!', '<', '>']) {
            return Some((rest, Operator::Missing, ""));
        }
    }

    let Some(at) = fragment.find(['=', '!', '<', '>']) else {
        return Some((fragment, Operator::Exists, ""));
    };
    let (key, tail) = fragment.split_at(at);
    let (op, width) = if tail.starts_with("!=") {
        (Operator::Ne, 2)
    } else if tail.starts_with(">=") {
        (Operator::Gte, 2)
    } else if tail.starts_with("<=") {
        (Operator::Lte, 2)
    } else if tail.starts_with('=') {
        (Operator::Eq, 1)
    } else if tail.starts_with('>') {
        (Operator::Gt, 1)
    } else if tail.starts_with('<') {
        (Operator::Lt, 1)
    } else {
        return None;
    };
    Some((key, op, &tail[width..]))
}

fn is_regex(value: &str) -> bool {
    value.len() > 1 && value.starts_with('/') && value[1..].contains('/')
}

fn comma_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Default)]
struct Collector {
    filter: Filter,
    sort: Vec<SortKey>,
    includes: BTreeSet<String>,
    excludes: BTreeSet<String>,
    populate: Vec<String>,
    relation_selects: BTreeMap<String, Vec<String>>,
    warnings: Vec<QueryWarning>,
}

impl Collector {
    fn warn(&mut self, warning: QueryWarning) {
        self.warnings.push(warning);
    }

    fn predicate(&mut self, schema: &CollectionSchema, key: &str, op: Operator, value: &str) {
        let Some(spec) = schema.field(key) else {
            self.warn(QueryWarning::UnknownField(key.to_string()));
            return;
        };
        if !spec.kind.is_filterable() {
            self.warn(QueryWarning::NotFilterable(key.to_string()));
            return;
        }
        if is_regex(value) {
            self.warn(QueryWarning::UnsupportedRegex(key.to_string()));
            return;
        }

        let invalid = || QueryWarning::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
        };
        let kind = spec.kind;

        let predicate = match op {
            Operator::Exists => Some(Predicate::Exists(true)),
            Operator::Missing => Some(Predicate::Exists(false)),
            Operator::Eq | Operator::Ne if value.contains(',') => {
                let list: Option<Vec<Scalar>> = comma_list(value).map(|v| kind.coerce(v)).collect();
                match list {
                    Some(list) if !list.is_empty() && op == Operator::Eq => Some(Predicate::In(list)),
                    Some(list) if !list.is_empty() => Some(Predicate::NotIn(list)),
                    _ => None,
                }
            }
            Operator::Eq => kind.coerce(value).map(Predicate::Eq),
            Operator::Ne => kind.coerce(value).map(Predicate::Ne),
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
                match kind.coerce(value) {
                    // Ranges against null have no meaning
                    Some(Scalar::Null) | None => None,
                    Some(operand) => Some(match op {
                        Operator::Gt => Predicate::Gt(operand),
                        Operator::Gte => Predicate::Gte(operand),
                        Operator::Lt => Predicate::Lt(operand),
                        _ => Predicate::Lte(operand),
                    }),
                }
            }
        };

        match predicate {
            Some(predicate) => self.filter.push(key, predicate),
            None => self.warn(invalid()),
        }
    }

    fn sort(&mut self, schema: &CollectionSchema, value: &str) {
        for token in comma_list(value) {
            let (field, descending) = match token.strip_prefix('-') {
                Some(field) => (field, true),
                None => (token.strip_prefix('+').unwrap_or(token), false),
            };
            match schema.field(field) {
                Some(spec) if spec.kind.is_filterable() => self.sort.push(if descending {
                    SortKey::desc(field)
                } else {
                    SortKey::asc(field)
                }),
                Some(_) => self.warn(QueryWarning::NotFilterable(field.to_string())),
                None => self.warn(QueryWarning::UnknownField(field.to_string())),
            }
        }
    }

    fn fields(&mut self, schema: &CollectionSchema, value: &str) {
        for token in comma_list(value) {
            let (field, exclude) = match token.strip_prefix('-') {
                Some(field) => (field, true),
                None => (token, false),
            };

            if let Some((path, sub)) = field.split_once('.') {
                match schema.relation(path) {
                    Some(relation) if !exclude && relation.has_field(sub) => {
                        let select = self.relation_selects.entry(path.to_string()).or_default();
                        if !select.iter().any(|s| s == sub) {
                            select.push(sub.to_string());
                        }
                    }
                    _ => self.warn(QueryWarning::UnknownField(field.to_string())),
                }
                continue;
            }

            if schema.field(field).is_none() {
                self.warn(QueryWarning::UnknownField(field.to_string()));
            } else if exclude {
                self.excludes.insert(field.to_string());
            } else {
                self.includes.insert(field.to_string());
            }
        }
    }

    fn populate(&mut self, schema: &CollectionSchema, value: &str) {
        for path in comma_list(value) {
            if schema.relation(path).is_none() {
                self.warn(QueryWarning::UnknownField(path.to_string()));
            } else if !self.populate.iter().any(|p| p == path) {
                self.populate.push(path.to_string());
            }
        }
    }

    fn created_since(&mut self, schema: &CollectionSchema, value: &str) {
        if schema.field("createdAt").is_none() {
            self.warn(QueryWarning::UnknownField("createdAt".to_string()));
            return;
        }
        match parse_datetime(value) {
            Some(since) => self
                .filter
                .push("createdAt", Predicate::Gte(Scalar::DateTime(since))),
            None => self.warn(QueryWarning::InvalidDate(value.to_string())),
        }
    }

    fn finish(mut self, schema: &CollectionSchema) -> BuiltQuery {
        let mut paths = self.populate.clone();
        for path in self.relation_selects.keys() {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }

        let population: Vec<Population> = paths
            .into_iter()
            .filter_map(|path| {
                let relation = schema.relation(&path)?;
                Some(match self.relation_selects.remove(&path) {
                    Some(select) => Population::new(path, select),
                    None => relation.default_population(),
                })
            })
            .collect();

        let projection = if !self.includes.is_empty() {
            if !self.excludes.is_empty() {
                self.warnings.push(QueryWarning::MixedProjection);
            }
            let mut includes = self.includes;
            for p in &population {
                includes.insert(p.path.clone());
            }
            Projection::Include(includes)
        } else if !self.excludes.is_empty() {
            Projection::Exclude(self.excludes)
        } else {
            Projection::All
        };

        BuiltQuery {
            descriptor: QueryDescriptor {
                filter: self.filter,
                sort: self.sort,
                projection,
                population,
            },
            warnings: self.warnings,
        }
    }
}

/// Parse a raw, URL-encoded query string against a collection schema.
///
/// No scope rules are applied here; see [`super::build_query`].
pub fn parse_query(raw: &str, schema: &CollectionSchema) -> BuiltQuery {
    let mut collector = Collector::default();

    for fragment in raw.trim_start_matches('?').split('&') {
        if fragment.is_empty() {
            continue;
        }
        let decoded = match urlencoding::decode(&fragment.replace('+', " ")) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => {
                collector.warn(QueryWarning::MalformedFragment(fragment.to_string()));
                continue;
            }
        };

        let Some((key, op, value)) = split_fragment(&decoded) else {
            collector.warn(QueryWarning::MalformedFragment(decoded.clone()));
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            collector.warn(QueryWarning::MalformedFragment(decoded.clone()));
            continue;
        }
        if RESERVED_KEYS.contains(&key) {
            continue;
        }

        match (key, op) {
            ("sort", Operator::Eq) => collector.sort(schema, value),
            ("fields", Operator::Eq) => collector.fields(schema, value),
            ("populate", Operator::Eq) => collector.populate(schema, value),
            ("createdSince", Operator::Eq) => collector.created_since(schema, value),
            ("sort" | "fields" | "populate" | "createdSince", _) => {
                collector.warn(QueryWarning::MalformedFragment(decoded.clone()));
            }
            _ if key.contains('.') => {
                collector.warn(QueryWarning::UnknownField(key.to_string()));
            }
            _ => collector.predicate(schema, key, op, value),
        }
    }

    collector.finish(schema)
}

/// Read one raw query parameter (first occurrence, decoded)
pub fn query_param(raw: &str, name: &str) -> Option<String> {
    raw.trim_start_matches('?')
        .split('&')
        .filter_map(|fragment| fragment.split_once('='))
        .find(|(key, _)| urlencoding::decode(key).is_ok_and(|k| k == name))
        .and_then(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(std::borrow::Cow::into_owned)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ARTICLE_SCHEMA, REACTION_SCHEMA};
    use std::collections::BTreeSet;

    fn parse(raw: &str) -> BuiltQuery {
        parse_query(raw, &ARTICLE_SCHEMA)
    }

    #[test]
    fn test_reserved_keys_are_stripped() {
        let built = parse("current=2&pageSize=5&title=foo&skip=3&limit=9");
        let filter = &built.descriptor.filter;
        assert_eq!(filter.len(), 1);
        assert_eq!(
            filter.get("title"),
            Some(&[Predicate::Eq(Scalar::Text("foo".into()))][..])
        );
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn test_operators() {
        let built = parse("title!=draft&createdAt>=2024-01-01&createdAt<2024-02-01&thumbnail&!deletedAt");
        let filter = &built.descriptor.filter;
        assert!(matches!(filter.get("title"), Some([Predicate::Ne(_)])));
        assert!(matches!(
            filter.get("createdAt"),
            Some([Predicate::Gte(Scalar::DateTime(_)), Predicate::Lt(Scalar::DateTime(_))])
        ));
        assert_eq!(filter.get("thumbnail"), Some(&[Predicate::Exists(true)][..]));
        assert_eq!(filter.get("deletedAt"), Some(&[Predicate::Exists(false)][..]));
    }

    #[test]
    fn test_membership_lists() {
        let built = parse_query("quantity=1,-1", &REACTION_SCHEMA);
        assert_eq!(
            built.descriptor.filter.get("quantity"),
            Some(&[Predicate::In(vec![Scalar::Int(1), Scalar::Int(-1)])][..])
        );

        let built = parse("title!=a,b");
        assert!(matches!(
            built.descriptor.filter.get("title"),
            Some([Predicate::NotIn(list)]) if list.len() == 2
        ));
    }

    #[test]
    fn test_percent_decoding() {
        let built = parse("title=hello%20world&content=a+b");
        let filter = &built.descriptor.filter;
        assert_eq!(
            filter.get("title"),
            Some(&[Predicate::Eq(Scalar::Text("hello world".into()))][..])
        );
        assert_eq!(
            filter.get("content"),
            Some(&[Predicate::Eq(Scalar::Text("a b".into()))][..])
        );

        let built = parse("createdAt%3E%3D2024-01-01");
        assert!(matches!(
            built.descriptor.filter.get("createdAt"),
            Some([Predicate::Gte(_)])
        ));
    }

    #[test]
    fn test_created_since() {
        let built = parse("createdSince=2024-03-01");
        assert!(matches!(
            built.descriptor.filter.get("createdAt"),
            Some([Predicate::Gte(Scalar::DateTime(_))])
        ));
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn test_bad_created_since_is_dropped() {
        let built = parse("createdSince=not-a-date");
        assert!(!built.descriptor.filter.contains("createdAt"));
        assert_eq!(
            built.warnings,
            vec![QueryWarning::InvalidDate("not-a-date".into())]
        );
    }

    #[test]
    fn test_malformed_fragments_fail_open() {
        let built = parse("=oops&nope=1&author=not-an-id&title=/^a/i&title=ok&a!b&author.name=x");
        let filter = &built.descriptor.filter;
        assert_eq!(filter.len(), 1);
        assert!(filter.contains("title"));
        assert_eq!(built.warnings.len(), 6);
        assert!(built.warnings.contains(&QueryWarning::UnknownField("nope".into())));
        assert!(built.warnings.contains(&QueryWarning::UnsupportedRegex("title".into())));
    }

    #[test]
    fn test_embedded_fields_are_not_filterable() {
        let built = parse("createdBy=x&sort=createdBy");
        assert!(built.descriptor.filter.is_empty());
        assert!(built.descriptor.sort.is_empty());
        assert_eq!(built.warnings.len(), 2);
    }

    #[test]
    fn test_sort() {
        let built = parse("sort=-createdAt,+title,bogus");
        assert_eq!(
            built.descriptor.sort,
            vec![SortKey::desc("createdAt"), SortKey::asc("title")]
        );
        assert_eq!(built.warnings, vec![QueryWarning::UnknownField("bogus".into())]);
    }

    #[test]
    fn test_include_projection_with_relation_select() {
        let built = parse("fields=title,author.name");
        let descriptor = &built.descriptor;
        assert_eq!(
            descriptor.population,
            vec![Population::new("author", vec!["name".into()])]
        );
        assert_eq!(
            descriptor.projection,
            Projection::Include(BTreeSet::from(["title".to_string(), "author".to_string()]))
        );
    }

    #[test]
    fn test_exclude_projection() {
        let built = parse("fields=-content");
        assert_eq!(
            built.descriptor.projection,
            Projection::Exclude(BTreeSet::from(["content".to_string()]))
        );
    }

    #[test]
    fn test_mixed_projection_keeps_includes() {
        let built = parse("fields=title,-content");
        assert_eq!(
            built.descriptor.projection,
            Projection::Include(BTreeSet::from(["title".to_string()]))
        );
        assert_eq!(built.warnings, vec![QueryWarning::MixedProjection]);
    }

    #[test]
    fn test_populate_uses_default_select() {
        let built = parse_query("populate=user", &REACTION_SCHEMA);
        assert_eq!(
            built.descriptor.population,
            vec![Population::new("user", vec!["id".into(), "name".into(), "email".into()])]
        );
    }

    #[test]
    fn test_no_population_requested() {
        let built = parse("title=x");
        assert!(built.descriptor.population.is_empty());
    }

    #[test]
    fn test_query_param() {
        let raw = "?title=a&current=3&pageSize=x%20y";
        assert_eq!(query_param(raw, "current").as_deref(), Some("3"));
        assert_eq!(query_param(raw, "pageSize").as_deref(), Some("x y"));
        assert_eq!(query_param(raw, "missing"), None);
    }
}
