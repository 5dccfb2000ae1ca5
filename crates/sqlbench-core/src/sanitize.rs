pub const SQL_FENCE_OPEN: &str = "```sql";
pub const FENCE_CLOSE: &str = "```";

/// Best-effort extraction of SQL from a model reply.
///
/// Keeps whatever sits between the first "```sql" marker and the next
/// closing fence. Text without the opening marker is returned as-is, prose
/// and stray fences included; executing it is what surfaces the problem.
pub fn extract_sql(text: &str) -> String {
    let Some(start) = text.find(SQL_FENCE_OPEN) else {
        return text.to_string();
    };
    let value = &text[start + SQL_FENCE_OPEN.len()..];
    match value.find(FENCE_CLOSE) {
        Some(end) => value[..end].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block_keeps_inner_text() {
        assert_eq!(extract_sql("```sql SELECT 1; ```"), " SELECT 1; ");
    }

    #[test]
    fn surrounding_prose_is_dropped() {
        let reply = "Here you go:\n```sql\nSELECT name FROM users;\n```\nHope it helps.";
        assert_eq!(extract_sql(reply), "\nSELECT name FROM users;\n");
    }

    #[test]
    fn unfenced_text_passes_through() {
        let reply = "SELECT user_id FROM user_groups;";
        assert_eq!(extract_sql(reply), reply);
        assert_eq!(extract_sql("I cannot answer that."), "I cannot answer that.");
    }

    #[test]
    fn idempotent_on_extracted_text() {
        let once = extract_sql("```sql\nSELECT 1;\n```");
        assert_eq!(extract_sql(&once), once);
    }

    #[test]
    fn unterminated_block_keeps_tail() {
        assert_eq!(extract_sql("```sqlSELECT 2;"), "SELECT 2;");
    }

    #[test]
    fn fences_without_sql_tag_pass_through() {
        let reply = "SELECT name FROM users; -- see ``` notes";
        assert_eq!(extract_sql(reply), reply);
        assert_eq!(extract_sql("```\nSELECT 3;\n```"), "```\nSELECT 3;\n```");
    }
}
