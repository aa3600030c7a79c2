//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from static table definitions.
//! Identifiers come only from `TableDef`/`LinkDef`; request values are always parameters.

use super::table::{ColumnDef, LinkDef, SqlType, TableDef};
use serde_json::{Map, Value};
use uuid::Uuid;

const ALIAS: &str = "t";

/// Quote identifier for PostgreSQL (safe: only from table definitions).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }

    /// Push a parameter and return its placeholder cast to the column type.
    fn placeholder(&mut self, v: Value, sql_type: SqlType) -> String {
        let n = self.push_param(v);
        format!("${}::{}", n, sql_type.as_sql())
    }
}

/// How audit `*_by` columns are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuditView {
    /// Raw user id as text.
    UserIds,
    /// The user's full name via LEFT JOIN on `users` (list views).
    UserNames,
}

fn is_audit_user(name: &str) -> bool {
    name == "created_by" || name == "updated_by"
}

fn column_ref(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(p) => format!("{}.{}", p, quoted(name)),
        None => quoted(name),
    }
}

/// Row projection matching the response schema of a resource.
fn row_select(table: &TableDef, prefix: Option<&str>, view: AuditView) -> String {
    table
        .columns()
        .iter()
        .map(|c| {
            if !is_audit_user(c.name) {
                return column_ref(prefix, c.name);
            }
            match view {
                AuditView::UserIds => {
                    format!("{}::text AS {}", column_ref(prefix, c.name), quoted(c.name))
                }
                AuditView::UserNames => {
                    let user_alias = if c.name == "created_by" { "us1" } else { "us2" };
                    format!("{}.{} AS {}", user_alias, quoted("fullname"), quoted(c.name))
                }
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn from_aliased(table: &TableDef) -> String {
    format!("{} AS {}", quoted(table.table), ALIAS)
}

/// SELECT one row by id, audit columns as user ids.
pub fn select_by_id(table: &TableDef, id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(Value::String(id.to_string()), SqlType::Uuid);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {}.{} = {}",
        row_select(table, Some(ALIAS), AuditView::UserIds),
        from_aliased(table),
        ALIAS,
        quoted("id"),
        ph
    );
    q
}

/// SELECT all rows, audit columns resolved to user names, optional `LIKE` search on the name column.
/// `order` is a clause produced by [`order_clause`].
pub fn select_list(table: &TableDef, search: Option<&str>, order: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sql = format!(
        "SELECT {} FROM {} LEFT JOIN {} AS us1 ON us1.{} = {}.{} LEFT JOIN {} AS us2 ON us2.{} = {}.{}",
        row_select(table, Some(ALIAS), AuditView::UserNames),
        from_aliased(table),
        quoted("users"),
        quoted("id"),
        ALIAS,
        quoted("created_by"),
        quoted("users"),
        quoted("id"),
        ALIAS,
        quoted("updated_by"),
    );
    if let Some(term) = search.filter(|s| !s.is_empty()) {
        let ph = q.placeholder(Value::String(format!("%{}%", term)), SqlType::Text);
        sql.push_str(&format!(" WHERE ({}.{} LIKE {})", ALIAS, quoted(table.name_column), ph));
    }
    sql.push_str(order);
    q.sql = sql;
    q
}

/// Whitelisted ORDER BY clause. `order` is matched case-insensitively against the name column
/// and `status`; `direction` is `ASC`/`DESC`. Empty order means name ascending whatever the
/// direction; unknown combinations yield no clause.
pub fn order_clause(table: &TableDef, order: Option<&str>, direction: Option<&str>) -> String {
    let Some(order) = order.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) else {
        return format!(" ORDER BY {}.{} ASC", ALIAS, quoted(table.name_column));
    };
    let direction = direction
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty());

    let column = match order.as_str() {
        o if o == table.name_column => table.name_column,
        "status" => "is_active",
        _ => return String::new(),
    };
    let dir = match direction.as_deref() {
        None | Some("ASC") => "ASC",
        Some("DESC") => "DESC",
        Some(_) => return String::new(),
    };
    format!(" ORDER BY {}.{} {}", ALIAS, quoted(column), dir)
}

/// INSERT the columns present in `values`. Returns the inserted row (audit as user ids).
pub fn insert(table: &TableDef, values: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in table.columns() {
        let Some(v) = values.get(c.name) else { continue };
        placeholders.push(q.placeholder(v.clone(), c.sql_type));
        cols.push(quoted(c.name));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.table),
        cols.join(", "),
        placeholders.join(", "),
        row_select(table, None, AuditView::UserIds)
    );
    q
}

/// UPDATE every non-id column present in `values`. Returns the id when the row exists.
pub fn update(table: &TableDef, id: Uuid, values: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in table.columns() {
        if c.name == "id" {
            continue;
        }
        let Some(v) = values.get(c.name) else { continue };
        let ph = q.placeholder(v.clone(), c.sql_type);
        sets.push(format!("{} = {}", quoted(c.name), ph));
    }
    let id_ph = q.placeholder(Value::String(id.to_string()), SqlType::Uuid);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(table.table),
        sets.join(", "),
        quoted("id"),
        id_ph,
        quoted("id")
    );
    q
}

/// DELETE by id, returning the id.
pub fn delete(table: &TableDef, id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(Value::String(id.to_string()), SqlType::Uuid);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        quoted(table.table),
        quoted("id"),
        ph,
        quoted("id")
    );
    q
}

/// SELECT EXISTS for a row id.
pub fn exists(table: &TableDef, id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(Value::String(id.to_string()), SqlType::Uuid);
    q.sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = {})",
        quoted(table.table),
        quoted("id"),
        ph
    );
    q
}

fn link_select(link: &LinkDef) -> String {
    format!(
        "SELECT l.{id}, l.{qty}, l.{active}, l.{created_at}, i.{id} AS {item_id}, i.{item_name} AS {item_name_alias} \
         FROM {table} AS l JOIN {item_table} AS i ON i.{id} = l.{item_col}",
        id = quoted("id"),
        qty = quoted("required_quantity"),
        active = quoted("is_active"),
        created_at = quoted("created_at"),
        item_id = quoted("item_id"),
        item_name = quoted(link.item.name_column),
        item_name_alias = quoted("item_name"),
        table = quoted(link.table),
        item_table = quoted(link.item.table),
        item_col = quoted(link.item_column),
    )
}

/// SELECT the links of one owner, joined to the linked item's name, ordered by item name.
pub fn select_links(link: &LinkDef, owner_id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(Value::String(owner_id.to_string()), SqlType::Uuid);
    q.sql = format!(
        "{} WHERE l.{} = {} ORDER BY i.{} ASC",
        link_select(link),
        quoted(link.owner_column),
        ph,
        quoted(link.item.name_column)
    );
    q
}

/// SELECT one link by its own id.
pub fn select_link(link: &LinkDef, link_id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.placeholder(Value::String(link_id.to_string()), SqlType::Uuid);
    q.sql = format!("{} WHERE l.{} = {}", link_select(link), quoted("id"), ph);
    q
}

/// INSERT a link row from the columns present in `values`, returning its id.
pub fn insert_link(link: &LinkDef, values: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let columns: Vec<ColumnDef> = link.columns();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in &columns {
        let Some(v) = values.get(c.name) else { continue };
        placeholders.push(q.placeholder(v.clone(), c.sql_type));
        cols.push(quoted(c.name));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(link.table),
        cols.join(", "),
        placeholders.join(", "),
        quoted("id")
    );
    q
}

/// DELETE a link that belongs to the given owner, returning its id.
pub fn delete_link(link: &LinkDef, owner_id: Uuid, link_id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let link_ph = q.placeholder(Value::String(link_id.to_string()), SqlType::Uuid);
    let owner_ph = q.placeholder(Value::String(owner_id.to_string()), SqlType::Uuid);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} AND {} = {} RETURNING {}",
        quoted(link.table),
        quoted("id"),
        link_ph,
        quoted(link.owner_column),
        owner_ph,
        quoted("id")
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::table::ColumnDef;
    use serde_json::json;

    static WIDGET: TableDef = TableDef {
        table: "widget",
        segment: "widget",
        name_column: "widget_name",
        attributes: &[
            ColumnDef::required("widget_name", SqlType::Text).unique(),
            ColumnDef::required("count", SqlType::Integer),
        ],
    };

    static PART: TableDef = TableDef {
        table: "part",
        segment: "part",
        name_column: "part_name",
        attributes: &[ColumnDef::required("part_name", SqlType::Text).unique()],
    };

    static WIDGET_PARTS: LinkDef = LinkDef {
        table: "w_p",
        owner: &WIDGET,
        owner_column: "widget_id",
        item: &PART,
        item_column: "part_id",
        read_permission: "widget:get-widget-by-id",
        write_permission: "widget:update-widget-by-id",
    };

    #[test]
    fn order_defaults_to_name_ascending() {
        assert_eq!(
            order_clause(&WIDGET, None, None),
            " ORDER BY t.\"widget_name\" ASC"
        );
        assert_eq!(
            order_clause(&WIDGET, Some(""), Some("")),
            " ORDER BY t.\"widget_name\" ASC"
        );
    }

    #[test]
    fn empty_order_ignores_direction() {
        for direction in ["DESC", "desc", "sideways"] {
            assert_eq!(
                order_clause(&WIDGET, None, Some(direction)),
                " ORDER BY t.\"widget_name\" ASC"
            );
            assert_eq!(
                order_clause(&WIDGET, Some(" "), Some(direction)),
                " ORDER BY t.\"widget_name\" ASC"
            );
        }
    }

    #[test]
    fn order_accepts_name_and_status_in_any_case() {
        assert_eq!(
            order_clause(&WIDGET, Some("WIDGET_NAME"), Some("desc")),
            " ORDER BY t.\"widget_name\" DESC"
        );
        assert_eq!(
            order_clause(&WIDGET, Some("status"), None),
            " ORDER BY t.\"is_active\" ASC"
        );
        assert_eq!(
            order_clause(&WIDGET, Some("Status"), Some("DESC")),
            " ORDER BY t.\"is_active\" DESC"
        );
    }

    #[test]
    fn order_rejects_unknown_columns_and_directions() {
        assert_eq!(order_clause(&WIDGET, Some("count; DROP TABLE widget"), None), "");
        assert_eq!(order_clause(&WIDGET, Some("status"), Some("sideways")), "");
    }

    #[test]
    fn list_joins_users_and_binds_search() {
        let q = select_list(&WIDGET, Some("bolt"), " ORDER BY t.\"widget_name\" ASC");
        assert!(q.sql.contains("us1.\"fullname\" AS \"created_by\""));
        assert!(q.sql.contains("us2.\"fullname\" AS \"updated_by\""));
        assert!(q.sql.contains("WHERE (t.\"widget_name\" LIKE $1::text)"));
        assert!(q.sql.ends_with("ORDER BY t.\"widget_name\" ASC"));
        assert_eq!(q.params, vec![json!("%bolt%")]);
    }

    #[test]
    fn list_without_search_has_no_where() {
        let q = select_list(&WIDGET, Some(""), "");
        assert!(!q.sql.contains("WHERE"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn by_id_casts_audit_ids_to_text() {
        let id = Uuid::new_v4();
        let q = select_by_id(&WIDGET, id);
        assert!(q.sql.contains("t.\"created_by\"::text AS \"created_by\""));
        assert!(q.sql.ends_with("WHERE t.\"id\" = $1::uuid"));
        assert_eq!(q.params, vec![json!(id.to_string())]);
    }

    #[test]
    fn insert_uses_only_present_columns_in_table_order() {
        let mut values = Map::new();
        values.insert("count".into(), json!(3));
        values.insert("widget_name".into(), json!("bolt"));
        values.insert("not_a_column".into(), json!("ignored"));
        let q = insert(&WIDGET, &values);
        assert!(q
            .sql
            .starts_with("INSERT INTO \"widget\" (\"widget_name\", \"count\") VALUES ($1::text, $2::integer)"));
        assert_eq!(q.params, vec![json!("bolt"), json!(3)]);
    }

    #[test]
    fn update_skips_id_and_binds_id_last() {
        let id = Uuid::new_v4();
        let mut values = Map::new();
        values.insert("id".into(), json!(Uuid::new_v4().to_string()));
        values.insert("is_active".into(), json!(false));
        let q = update(&WIDGET, id, &values);
        assert_eq!(
            q.sql,
            "UPDATE \"widget\" SET \"is_active\" = $1::boolean WHERE \"id\" = $2::uuid RETURNING \"id\""
        );
        assert_eq!(q.params[1], json!(id.to_string()));
    }

    #[test]
    fn delete_and_exists_bind_the_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            delete(&WIDGET, id).sql,
            "DELETE FROM \"widget\" WHERE \"id\" = $1::uuid RETURNING \"id\""
        );
        assert_eq!(
            exists(&PART, id).sql,
            "SELECT EXISTS(SELECT 1 FROM \"part\" WHERE \"id\" = $1::uuid)"
        );
    }

    #[test]
    fn link_queries_join_the_item_table() {
        let owner = Uuid::new_v4();
        let q = select_links(&WIDGET_PARTS, owner);
        assert!(q.sql.contains("FROM \"w_p\" AS l JOIN \"part\" AS i ON i.\"id\" = l.\"part_id\""));
        assert!(q.sql.contains("i.\"part_name\" AS \"item_name\""));
        assert!(q.sql.contains("WHERE l.\"widget_id\" = $1::uuid"));

        let link_id = Uuid::new_v4();
        let d = delete_link(&WIDGET_PARTS, owner, link_id);
        assert_eq!(d.params, vec![json!(link_id.to_string()), json!(owner.to_string())]);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}
