use crate::error::ScriptDiscoveryError;
use crate::model::Script;
use std::fs;
use std::path::Path;

const SCRIPT_EXTENSION: &str = "sql";

/// Enumerates migration scripts in `dir`, sorted by filename in ascending
/// lexical order. Filename order is the application order. Entries without
/// the `.sql` extension are ignored. Contents are not read here.
pub fn discover_scripts(dir: impl AsRef<Path>) -> Result<Vec<Script>, ScriptDiscoveryError> {
    let dir = dir.as_ref();
    let dir_display = dir.display().to_string();

    let entries = fs::read_dir(dir).map_err(|e| ScriptDiscoveryError::Io {
        path: dir_display.clone(),
        message: e.to_string(),
    })?;

    let mut scripts: Vec<Script> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScriptDiscoveryError::Io {
            path: dir_display.clone(),
            message: e.to_string(),
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match path.extension() {
            Some(ext) if ext == SCRIPT_EXTENSION => {}
            _ => continue,
        }

        let name = match path.file_name() {
            Some(os) => os.to_string_lossy().to_string(),
            None => continue,
        };

        scripts.push(Script::new(name, path));
    }

    scripts.sort_by(|a, b| a.name.cmp(&b.name));

    for pair in scripts.windows(2) {
        if pair[0].name == pair[1].name {
            return Err(ScriptDiscoveryError::DuplicateName {
                name: pair[0].name.clone(),
            });
        }
    }

    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::discover_scripts;
    use crate::error::ScriptDiscoveryError;
    use std::fs;

    #[test]
    fn empty_dir_yields_no_scripts() {
        let tmp = tempfile::tempdir().unwrap();
        let scripts = discover_scripts(tmp.path()).unwrap();
        assert!(scripts.is_empty());
    }

    #[test]
    fn missing_dir_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover_scripts(tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScriptDiscoveryError::Io { .. }));
    }

    #[test]
    fn ignores_entries_without_script_extension() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("001_init.sql"), b"select 1;").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"not a script").unwrap();
        fs::write(tmp.path().join("init.sql.bak"), b"select 2;").unwrap();
        fs::create_dir(tmp.path().join("archive.sql")).unwrap();

        let scripts = discover_scripts(tmp.path()).unwrap();
        let names: Vec<&str> = scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["001_init.sql"]);
    }

    #[test]
    fn sorts_by_filename_ascending() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("010_c.sql"), b"select 10;").unwrap();
        fs::write(tmp.path().join("001_a.sql"), b"select 1;").unwrap();
        fs::write(tmp.path().join("002_b.sql"), b"select 2;").unwrap();

        let scripts = discover_scripts(tmp.path()).unwrap();
        let names: Vec<&str> = scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["001_a.sql", "002_b.sql", "010_c.sql"]);
    }
}
