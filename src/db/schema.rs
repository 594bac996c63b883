/// One column as reported by information_schema.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub table: String,
    pub name: String,
    pub column_type: String,
    pub nullable: bool,
    pub key: String,
}

/// Renders the column listing into per-table text blocks, the shape the SQL
/// generation prompt embeds verbatim.
pub fn render_schema(columns: &[ColumnInfo]) -> String {
    let mut out = String::new();
    let mut current_table: Option<&str> = None;

    for col in columns {
        if current_table != Some(col.table.as_str()) {
            if current_table.is_some() {
                out.push('\n');
            }
            out.push_str("Table ");
            out.push_str(&col.table);
            out.push_str(":\n");
            current_table = Some(col.table.as_str());
        }
        out.push_str("  ");
        out.push_str(&col.name);
        out.push(' ');
        out.push_str(&col.column_type);
        if !col.nullable {
            out.push_str(" NOT NULL");
        }
        if col.key == "PRI" {
            out.push_str(" (primary key)");
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(table: &str, name: &str, ty: &str, nullable: bool, key: &str) -> ColumnInfo {
        ColumnInfo {
            table: table.to_string(),
            name: name.to_string(),
            column_type: ty.to_string(),
            nullable,
            key: key.to_string(),
        }
    }

    #[test]
    fn groups_columns_by_table() {
        let columns = vec![
            col("Artist", "ArtistId", "int", false, "PRI"),
            col("Artist", "Name", "varchar(120)", true, ""),
            col("Track", "TrackId", "int", false, "PRI"),
        ];
        let text = render_schema(&columns);
        assert_eq!(
            text,
            "Table Artist:\n  ArtistId int NOT NULL (primary key)\n  Name varchar(120)\n\nTable Track:\n  TrackId int NOT NULL (primary key)\n"
        );
    }

    #[test]
    fn empty_listing_renders_empty() {
        assert_eq!(render_schema(&[]), "");
    }
}
