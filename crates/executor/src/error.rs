use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    LedgerInitFailed {
        message: String,
    },
    LedgerQueryFailed {
        operation: String,
        message: String,
    },
    ScriptReadFailed {
        script: String,
        message: String,
    },
    ConnectionAcquireFailed {
        script: String,
        message: String,
    },
    TransactionBeginFailed {
        script: String,
        message: String,
    },
    ScriptExecutionFailed {
        script: String,
        message: String,
    },
    LedgerInsertFailed {
        script: String,
        message: String,
    },
    TransactionCommitFailed {
        script: String,
        message: String,
    },
    TransactionRollbackFailed {
        script: String,
        message: String,
        original_error: String,
    },
    DryRunTransactionError {
        operation: String,
        message: String,
        original_error: Option<String>,
    },
}

impl ExecutorError {
    /// Name of the script the failure is attributed to, where one exists.
    pub fn script(&self) -> Option<&str> {
        match self {
            ExecutorError::ScriptReadFailed { script, .. }
            | ExecutorError::ConnectionAcquireFailed { script, .. }
            | ExecutorError::TransactionBeginFailed { script, .. }
            | ExecutorError::ScriptExecutionFailed { script, .. }
            | ExecutorError::LedgerInsertFailed { script, .. }
            | ExecutorError::TransactionCommitFailed { script, .. }
            | ExecutorError::TransactionRollbackFailed { script, .. } => Some(script),
            ExecutorError::LedgerInitFailed { .. }
            | ExecutorError::LedgerQueryFailed { .. }
            | ExecutorError::DryRunTransactionError { .. } => None,
        }
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutorError::LedgerInitFailed { message } => {
                write!(f, "ledger initialization failed: {message}")
            }
            ExecutorError::LedgerQueryFailed { operation, message } => {
                write!(f, "ledger query failed (op={operation}): {message}")
            }
            ExecutorError::ScriptReadFailed { script, message } => {
                write!(f, "script read failed (script={script}): {message}")
            }
            ExecutorError::ConnectionAcquireFailed { script, message } => {
                write!(f, "connection acquire failed (script={script}): {message}")
            }
            ExecutorError::TransactionBeginFailed { script, message } => {
                write!(f, "transaction begin failed (script={script}): {message}")
            }
            ExecutorError::ScriptExecutionFailed { script, message } => {
                write!(f, "script execution failed (script={script}): {message}")
            }
            ExecutorError::LedgerInsertFailed { script, message } => {
                write!(f, "ledger insert failed (script={script}): {message}")
            }
            ExecutorError::TransactionCommitFailed { script, message } => {
                write!(f, "transaction commit failed (script={script}): {message}")
            }
            ExecutorError::TransactionRollbackFailed {
                script,
                message,
                original_error,
            } => write!(
                f,
                "transaction rollback failed (script={script}): {message}; original_error={original_error}"
            ),
            ExecutorError::DryRunTransactionError {
                operation,
                message,
                original_error,
            } => {
                if let Some(original_error) = original_error {
                    write!(
                        f,
                        "dry-run transaction failed (op={operation}): {message}; original_error={original_error}"
                    )
                } else {
                    write!(f, "dry-run transaction failed (op={operation}): {message}")
                }
            }
        }
    }
}

impl std::error::Error for ExecutorError {}

#[cfg(test)]
mod tests {
    use super::ExecutorError;

    #[test]
    fn display_names_the_offending_script() {
        let err = ExecutorError::ScriptExecutionFailed {
            script: "002_add_members.sql".to_string(),
            message: "syntax error at or near \"CREAT\"".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("002_add_members.sql"));
        assert!(rendered.contains("syntax error"));
        assert_eq!(err.script(), Some("002_add_members.sql"));
    }

    #[test]
    fn rollback_failure_preserves_original_error() {
        let err = ExecutorError::TransactionRollbackFailed {
            script: "003_attendance.sql".to_string(),
            message: "connection reset".to_string(),
            original_error: "script execution failed".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("connection reset"));
        assert!(rendered.contains("original_error=script execution failed"));
    }
}
