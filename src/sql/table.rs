//! Static table descriptions shared by the SQL builders and the migrations.

/// Column types used by the resource tables. `as_sql` is both the DDL type and the parameter cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlType {
    Uuid,
    Text,
    Integer,
    Double,
    Boolean,
    Timestamptz,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Uuid => "uuid",
            SqlType::Text => "text",
            SqlType::Integer => "integer",
            SqlType::Double => "double precision",
            SqlType::Boolean => "boolean",
            SqlType::Timestamptz => "timestamptz",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    pub unique: bool,
    pub indexed: bool,
}

impl ColumnDef {
    pub const fn required(name: &'static str, sql_type: SqlType) -> Self {
        ColumnDef {
            name,
            sql_type,
            nullable: false,
            unique: false,
            indexed: false,
        }
    }

    pub const fn optional(name: &'static str, sql_type: SqlType) -> Self {
        ColumnDef {
            name,
            sql_type,
            nullable: true,
            unique: false,
            indexed: false,
        }
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self.indexed = true;
        self
    }

    pub const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

pub const ID_COLUMN: ColumnDef = ColumnDef::required("id", SqlType::Uuid);
pub const IS_ACTIVE_COLUMN: ColumnDef = ColumnDef::optional("is_active", SqlType::Boolean);

/// Audit columns carried by every resource and link table.
pub const AUDIT_COLUMNS: [ColumnDef; 4] = [
    ColumnDef::optional("created_by", SqlType::Uuid),
    ColumnDef::optional("created_at", SqlType::Timestamptz),
    ColumnDef::optional("updated_by", SqlType::Uuid),
    ColumnDef::optional("updated_at", SqlType::Timestamptz),
];

/// One resource table: `id`, the resource attributes, `is_active`, audit columns.
#[derive(Debug)]
pub struct TableDef {
    pub table: &'static str,
    /// URL path segment, e.g. `raw_material`.
    pub segment: &'static str,
    /// Unique human-readable name column; used for search and default ordering.
    pub name_column: &'static str,
    pub attributes: &'static [ColumnDef],
}

impl TableDef {
    /// Every stored column in DDL order.
    pub fn columns(&self) -> Vec<ColumnDef> {
        let mut cols = Vec::with_capacity(self.attributes.len() + 6);
        cols.push(ID_COLUMN);
        cols.extend_from_slice(self.attributes);
        cols.push(IS_ACTIVE_COLUMN);
        cols.extend_from_slice(&AUDIT_COLUMNS);
        cols
    }

    pub fn column(&self, name: &str) -> Option<ColumnDef> {
        self.columns().into_iter().find(|c| c.name == name)
    }
}

/// A join table linking an owner row to an item row with a required quantity.
#[derive(Debug)]
pub struct LinkDef {
    pub table: &'static str,
    pub owner: &'static TableDef,
    pub owner_column: &'static str,
    pub item: &'static TableDef,
    pub item_column: &'static str,
    /// Permission needed to list links (the owner's get-by-id permission).
    pub read_permission: &'static str,
    /// Permission needed to add or remove links (the owner's update permission).
    pub write_permission: &'static str,
}

impl LinkDef {
    /// Every stored column in DDL order.
    pub fn columns(&self) -> Vec<ColumnDef> {
        let mut cols = vec![
            ID_COLUMN,
            ColumnDef::required("required_quantity", SqlType::Integer),
            ColumnDef::optional(self.item_column, SqlType::Uuid).indexed(),
            ColumnDef::optional(self.owner_column, SqlType::Uuid).indexed(),
            IS_ACTIVE_COLUMN,
        ];
        cols.extend_from_slice(&AUDIT_COLUMNS);
        cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: TableDef = TableDef {
        table: "sample",
        segment: "sample",
        name_column: "sample_name",
        attributes: &[
            ColumnDef::required("sample_name", SqlType::Text).unique(),
            ColumnDef::optional("weight", SqlType::Double),
        ],
    };

    #[test]
    fn columns_wrap_attributes_with_id_flag_and_audit() {
        let names: Vec<_> = SAMPLE.columns().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "id",
                "sample_name",
                "weight",
                "is_active",
                "created_by",
                "created_at",
                "updated_by",
                "updated_at"
            ]
        );
    }

    #[test]
    fn unique_implies_indexed() {
        let c = SAMPLE.column("sample_name").unwrap();
        assert!(c.unique && c.indexed && !c.nullable);
        assert!(SAMPLE.column("missing").is_none());
    }
}
