//! Translation of query descriptors into SQL
//!
//! Field names come from the collection schema: `camelCase` maps to
//! `snake_case`, and reference fields (record-id kind other than `id`) map to
//! their `<name>_id` column. Every value is a bind parameter.

use folio_core::query::{
    CollectionSchema, Direction, FieldKind, Filter, Predicate, Scalar, SortKey,
};
use sqlx::{Postgres, QueryBuilder};

use super::error::to_i64;

fn snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Qualified column for a schema field, or `None` if the field is not a column
pub fn column(schema: &CollectionSchema, alias: &str, field: &str) -> Option<String> {
    let spec = schema.field(field)?;
    match spec.kind {
        FieldKind::Embedded => None,
        FieldKind::Id if field != "id" => Some(format!("{alias}.{}_id", snake_case(field))),
        _ => Some(format!("{alias}.{}", snake_case(field))),
    }
}

fn push_scalar(builder: &mut QueryBuilder<'_, Postgres>, scalar: &Scalar) {
    match scalar {
        Scalar::Null => {
            builder.push("NULL");
        }
        Scalar::Bool(v) => {
            builder.push_bind(*v);
        }
        Scalar::Int(v) => {
            builder.push_bind(*v);
        }
        Scalar::Text(v) => {
            builder.push_bind(v.clone());
        }
        Scalar::DateTime(v) => {
            builder.push_bind(*v);
        }
        Scalar::Id(v) => {
            builder.push_bind(v.into_inner());
        }
    }
}

fn push_comparison(
    builder: &mut QueryBuilder<'_, Postgres>,
    col: &str,
    op: &str,
    operand: &Scalar,
) {
    builder.push(col).push(op);
    push_scalar(builder, operand);
}

fn push_equals(builder: &mut QueryBuilder<'_, Postgres>, col: &str, operand: &Scalar) {
    if operand.is_null() {
        builder.push(format!("{col} IS NULL"));
    } else {
        push_comparison(builder, col, " = ", operand);
    }
}

fn push_not_equals(builder: &mut QueryBuilder<'_, Postgres>, col: &str, operand: &Scalar) {
    if operand.is_null() {
        builder.push(format!("{col} IS NOT NULL"));
    } else {
        push_comparison(builder, col, " IS DISTINCT FROM ", operand);
    }
}

fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, col: &str, predicate: &Predicate) {
    match predicate {
        Predicate::Eq(operand) => push_equals(builder, col, operand),
        Predicate::Ne(operand) => push_not_equals(builder, col, operand),
        Predicate::Gt(operand) => push_comparison(builder, col, " > ", operand),
        Predicate::Gte(operand) => push_comparison(builder, col, " >= ", operand),
        Predicate::Lt(operand) => push_comparison(builder, col, " < ", operand),
        Predicate::Lte(operand) => push_comparison(builder, col, " <= ", operand),
        Predicate::In(list) | Predicate::NotIn(list) => {
            let negate = matches!(predicate, Predicate::NotIn(_));
            builder.push("(");
            for (i, operand) in list.iter().enumerate() {
                if i > 0 {
                    builder.push(if negate { " AND " } else { " OR " });
                }
                if negate {
                    push_not_equals(builder, col, operand);
                } else {
                    push_equals(builder, col, operand);
                }
            }
            builder.push(")");
        }
        Predicate::Exists(true) => {
            builder.push(format!("{col} IS NOT NULL"));
        }
        Predicate::Exists(false) => {
            builder.push(format!("{col} IS NULL"));
        }
    }
}

/// Append ` AND <predicate>` for every filter entry. Expects a preceding `WHERE TRUE`.
pub fn push_filter(
    builder: &mut QueryBuilder<'_, Postgres>,
    schema: &CollectionSchema,
    alias: &str,
    filter: &Filter,
) {
    for (field, predicates) in filter.iter() {
        let Some(col) = column(schema, alias, field) else {
            continue;
        };
        for predicate in predicates {
            builder.push(" AND ");
            push_predicate(builder, &col, predicate);
        }
    }
}

/// Append `ORDER BY`, always ending with the primary key for a stable order.
///
/// Nulls sort lowest in both directions.
pub fn push_order(
    builder: &mut QueryBuilder<'_, Postgres>,
    schema: &CollectionSchema,
    alias: &str,
    sort: &[SortKey],
) {
    builder.push(" ORDER BY ");
    let mut any = false;
    for key in sort {
        let Some(col) = column(schema, alias, &key.field) else {
            continue;
        };
        let direction = match key.direction {
            Direction::Asc => "ASC NULLS FIRST",
            Direction::Desc => "DESC NULLS LAST",
        };
        builder.push(format!("{col} {direction}, "));
        any = true;
    }
    if !any && schema.field("createdAt").is_some() {
        builder.push(format!("{alias}.created_at ASC, "));
    }
    builder.push(format!("{alias}.id ASC"));
}

pub fn push_page(builder: &mut QueryBuilder<'_, Postgres>, skip: u64, limit: u64) {
    builder
        .push(" LIMIT ")
        .push_bind(to_i64(limit))
        .push(" OFFSET ")
        .push_bind(to_i64(skip));
}
