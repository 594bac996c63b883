use sqlx::mysql::MySqlRow;
use sqlx::Row;

/// Renders a result set as a plain-text table: header, rows, row count.
/// This text is what the answer stage sees, so it stays unadorned.
pub fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::new();

    if !columns.is_empty() {
        out.push_str(&columns.join(" | "));
        out.push('\n');
        out.push_str(
            &columns
                .iter()
                .map(|c| "-".repeat(c.len()))
                .collect::<Vec<_>>()
                .join("-|-"),
        );
        out.push('\n');
    }

    for row in rows {
        out.push_str(&row.join(" | "));
        out.push('\n');
    }

    out.push_str(&format!(
        "({} row{})",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" }
    ));
    out
}

/// Decodes one cell into display text. MySQL reports many wire types, so
/// this walks a fallback chain rather than trusting the declared type.
pub(crate) fn decode_value(row: &MySqlRow, idx: usize) -> String {
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.map(|n| n.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(idx) {
        return v.map(|n| n.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v.map(|n| n.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<rust_decimal::Decimal>, _>(idx) {
        return v.map(|n| n.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(idx) {
        return v.map(|b| b.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveDateTime>, _>(idx) {
        return v.map(|t| t.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveDate>, _>(idx) {
        return v.map(|t| t.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveTime>, _>(idx) {
        return v.map(|t| t.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return v
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_else(|| "NULL".to_string());
    }
    "<unsupported>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_rows_and_count() {
        let columns = vec!["Name".to_string(), "Tracks".to_string()];
        let rows = vec![
            vec!["AC/DC".to_string(), "18".to_string()],
            vec!["Accept".to_string(), "7".to_string()],
        ];
        let text = render_table(&columns, &rows);
        assert_eq!(
            text,
            "Name | Tracks\n-----|-------\nAC/DC | 18\nAccept | 7\n(2 rows)"
        );
    }

    #[test]
    fn empty_result_is_just_a_count() {
        assert_eq!(render_table(&[], &[]), "(0 rows)");
    }

    #[test]
    fn single_row_count_is_singular() {
        let columns = vec!["n".to_string()];
        let rows = vec![vec!["42".to_string()]];
        assert!(render_table(&columns, &rows).ends_with("(1 row)"));
    }
}
