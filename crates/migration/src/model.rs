use std::fs;
use std::io;
use std::path::PathBuf;

/// A migration script descriptor. Contents are read from `path` only when the
/// script is about to be applied; a script already recorded in the ledger is
/// never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub path: PathBuf,
}

impl Script {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }

    pub fn read_sql(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::Script;
    use std::fs;

    #[test]
    fn read_sql_returns_file_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("001_init.sql");
        fs::write(&path, b"CREATE TABLE bands (id SERIAL PRIMARY KEY);").unwrap();

        let script = Script::new("001_init.sql".to_string(), path);
        let sql = script.read_sql().unwrap();
        assert_eq!(sql, "CREATE TABLE bands (id SERIAL PRIMARY KEY);");
    }

    #[test]
    fn read_sql_fails_for_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let script = Script::new(
            "001_init.sql".to_string(),
            tmp.path().join("001_init.sql"),
        );
        assert!(script.read_sql().is_err());
    }
}
