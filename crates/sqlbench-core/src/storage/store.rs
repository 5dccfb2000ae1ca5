use crate::storage::schema::SchemaScripts;
use anyhow::Context;
use rusqlite::types::Value;
use rusqlite::{Batch, Connection};
use std::path::Path;

pub type Row = Vec<Value>;

/// Which generated statements the store agrees to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlPolicy {
    /// Anything SQLite accepts, mutating statements included.
    #[default]
    Unrestricted,
    /// Only statements SQLite reports as read-only.
    ReadOnly,
}

impl SqlPolicy {
    pub fn from_flag(read_only: bool) -> Self {
        if read_only {
            SqlPolicy::ReadOnly
        } else {
            SqlPolicy::Unrestricted
        }
    }
}

/// The experiment database. Opened once per run and borrowed by the runner.
pub struct Store {
    conn: Connection,
    policy: SqlPolicy,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        Ok(Self {
            conn,
            policy: SqlPolicy::default(),
        })
    }

    pub fn memory() -> anyhow::Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            policy: SqlPolicy::default(),
        })
    }

    /// Deletes any database at `path` and recreates it from `scripts`.
    ///
    /// Must run at most once per run, before any query. A malformed script
    /// leaves the file partially initialized and the error is returned.
    pub fn rebuild(path: &Path, scripts: &SchemaScripts) -> anyhow::Result<Self> {
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!(event = "store_removed", path = %path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to remove database {}", path.display()))
            }
        }
        let store = Self::open(path)?;
        store.apply(scripts)?;
        Ok(store)
    }

    pub fn with_policy(mut self, policy: SqlPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> SqlPolicy {
        self.policy
    }

    pub fn apply(&self, scripts: &SchemaScripts) -> anyhow::Result<()> {
        self.conn
            .execute_batch(&scripts.schema)
            .context("schema script failed")?;
        self.conn
            .execute_batch(&scripts.seed)
            .context("seed script failed")?;
        Ok(())
    }

    /// Runs a single statement and returns every row it produces.
    ///
    /// Input that holds only whitespace or comments yields no rows.
    pub fn execute(&self, sql: &str) -> anyhow::Result<Vec<Row>> {
        let mut batch = Batch::new(&self.conn, sql);
        let Some(mut stmt) = batch.next()? else {
            return Ok(Vec::new());
        };
        if batch.next()?.is_some() {
            anyhow::bail!("only one statement can be executed at a time");
        }
        if self.policy == SqlPolicy::ReadOnly && !stmt.readonly() {
            anyhow::bail!("rejected non read-only statement");
        }

        let columns = stmt.column_count();
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns);
            for i in 0..columns {
                values.push(row.get::<_, Value>(i)?);
            }
            out.push(values);
        }
        Ok(out)
    }
}

/// Renders rows as a list of tuples: `[]`, `[(1,)]`, `[(1, 'a'), (2, None)]`.
pub fn render_rows(rows: &[Row]) -> String {
    let rendered: Vec<String> = rows.iter().map(|r| render_tuple(r)).collect();
    format!("[{}]", rendered.join(", "))
}

fn render_tuple(row: &[Value]) -> String {
    let cells: Vec<String> = row.iter().map(render_value).collect();
    if cells.len() == 1 {
        format!("({},)", cells[0])
    } else {
        format!("({})", cells.join(", "))
    }
}

fn render_value(v: &Value) -> String {
    match v {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => render_real(*f),
        Value::Text(s) => quote_text(s),
        Value::Blob(b) => quote_blob(b),
    }
}

fn render_real(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let s = if f > 0.0 { "inf" } else { "-inf" };
        s.to_string()
    } else {
        format!("{f:?}")
    }
}

fn quote_text(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn quote_blob(b: &[u8]) -> String {
    let mut out = String::from("b'");
    for &byte in b {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{byte:02x}")),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_empty_and_single_column_rows() {
        assert_eq!(render_rows(&[]), "[]");
        assert_eq!(
            render_rows(&[vec![Value::Integer(1)], vec![Value::Integer(2)]]),
            "[(1,), (2,)]"
        );
    }

    #[test]
    fn renders_mixed_cells() {
        let rows = vec![vec![
            Value::Integer(3),
            Value::Text("custom".into()),
            Value::Null,
            Value::Real(2.5),
        ]];
        assert_eq!(render_rows(&rows), "[(3, 'custom', None, 2.5)]");
    }

    #[test]
    fn quotes_text_like_a_repr() {
        assert_eq!(quote_text("it's"), "\"it's\"");
        assert_eq!(quote_text("a'b\"c"), "'a\\'b\"c'");
        assert_eq!(quote_text("line\nbreak"), "'line\\nbreak'");
        assert_eq!(render_real(1.0), "1.0");
        assert_eq!(quote_blob(&[0x61, 0x00]), "b'a\\x00'");
    }
}
