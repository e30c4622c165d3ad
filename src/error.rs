use crate::types::ContainerKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MockError {
    #[error("ERR {0}")]
    InvalidArgument(String),

    #[error("WRONGTYPE Operation against key '{key}' holding a {actual}, expected a {expected}")]
    TypeMismatch {
        key: String,
        expected: ContainerKind,
        actual: ContainerKind,
    },

    #[error("ERR unknown command '{0}'")]
    UnimplementedCommand(String),
}

impl MockError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        MockError::InvalidArgument(msg.into())
    }

    pub fn wrong_arg_count(cmd: &str) -> Self {
        MockError::InvalidArgument(format!(
            "wrong number of arguments for '{}' command",
            cmd.to_lowercase()
        ))
    }

    pub fn not_integer() -> Self {
        MockError::invalid("value is not an integer or out of range")
    }

    pub fn syntax() -> Self {
        MockError::invalid("syntax error")
    }
}

pub type MockResult<T> = Result<T, MockError>;
