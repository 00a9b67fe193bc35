//! Small builders for the dynamic parts of SQL statements: list filters and
//! whole-row inserts and updates.

use rusqlite::types::Value;

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Accumulates `WHERE` conditions and their positional parameters.
#[derive(Debug, Default)]
pub struct Filter {
  conds:  Vec<String>,
  params: Vec<Value>,
}

impl Filter {
  pub fn new() -> Self { Self::default() }

  /// `column = value`, when a value is given.
  pub fn eq(&mut self, column: &str, value: Option<impl Into<Value>>) -> &mut Self {
    if let Some(v) = value {
      self.conds.push(format!("{column} = ?"));
      self.params.push(v.into());
    }
    self
  }

  /// `expr op value`, when a value is given.
  pub fn cmp(&mut self, expr: &str, op: &str, value: Option<impl Into<Value>>) -> &mut Self {
    if let Some(v) = value {
      self.conds.push(format!("{expr} {op} ?"));
      self.params.push(v.into());
    }
    self
  }

  /// Case-insensitive substring match against any of `columns`.
  pub fn contains_any(&mut self, columns: &[&str], text: Option<&str>) -> &mut Self {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
      return self;
    };
    let pattern = format!("%{}%", escape_like(text));
    let ors: Vec<String> = columns
      .iter()
      .map(|c| format!("{c} LIKE ? ESCAPE '\\'"))
      .collect();
    self.conds.push(format!("({})", ors.join(" OR ")));
    for _ in columns {
      self.params.push(Value::Text(pattern.clone()));
    }
    self
  }

  pub fn where_clause(&self) -> String {
    if self.conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", self.conds.join(" AND "))
    }
  }

  pub fn params(&self) -> &[Value] { &self.params }

  /// Parameters followed by `LIMIT ? OFFSET ?` values.
  pub fn paged_params(&self, limit: u32, offset: u64) -> Vec<Value> {
    let mut params = self.params.clone();
    params.push(Value::Integer(i64::from(limit)));
    params.push(Value::Integer(offset as i64));
    params
  }
}

fn escape_like(text: &str) -> String {
  text
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_")
}

// ─── Whole-row statements ────────────────────────────────────────────────────

/// `INSERT INTO table (c1, c2, ...) VALUES (?, ?, ...)`.
pub fn insert_sql(table: &str, columns: &[&str]) -> String {
  let placeholders = vec!["?"; columns.len()].join(", ");
  format!("INSERT INTO {table} ({}) VALUES ({placeholders})", columns.join(", "))
}

/// `UPDATE table SET c2 = ?, ... WHERE c1 = ?`. The first column is the key.
pub fn update_sql(table: &str, columns: &[&str]) -> String {
  let sets: Vec<String> = columns[1..].iter().map(|c| format!("{c} = ?")).collect();
  format!("UPDATE {table} SET {} WHERE {} = ?", sets.join(", "), columns[0])
}

/// Reorder row values to match [`update_sql`]: key last.
pub fn update_params(mut values: Vec<Value>) -> Vec<Value> {
  values.rotate_left(1);
  values
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn filter_skips_absent_values() {
    let mut f = Filter::new();
    f.eq("purok", Some("Purok 1".to_owned()))
      .eq("gender", None::<String>)
      .contains_any(&["first_name", "last_name"], Some("  "));
    assert_eq!(f.where_clause(), "WHERE purok = ?");
    assert_eq!(f.params().len(), 1);
  }

  #[test]
  fn contains_any_escapes_wildcards() {
    let mut f = Filter::new();
    f.contains_any(&["title", "content"], Some("50%_off"));
    assert_eq!(f.where_clause(), "WHERE (title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\')");
    assert_eq!(f.params()[0], Value::Text("%50\\%\\_off%".into()));
    assert_eq!(f.params().len(), 2);
  }

  #[test]
  fn update_statement_puts_key_last() {
    assert_eq!(
      update_sql("t", &["id", "a", "b"]),
      "UPDATE t SET a = ?, b = ? WHERE id = ?"
    );
    let p = update_params(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
    assert_eq!(p, vec![Value::Integer(2), Value::Integer(3), Value::Integer(1)]);
  }

  #[test]
  fn insert_statement_has_one_placeholder_per_column() {
    assert_eq!(insert_sql("t", &["a", "b"]), "INSERT INTO t (a, b) VALUES (?, ?)");
  }
}
