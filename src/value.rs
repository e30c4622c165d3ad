use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed command argument, as handed over by a client library.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A token typed at the debug shell. It is a string wherever a string is
    /// expected and is parsed on demand where a number is, so its text is
    /// never rewritten.
    Raw(String),
}

/// Named (keyword) arguments of a command call.
pub type Options = BTreeMap<String, Value>;

impl Value {
    pub fn raw(text: impl Into<String>) -> Self {
        Value::Raw(text.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Raw(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view for score-like parameters. Only raw tokens are parsed;
    /// a `Str` is never a number.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Raw(s) => match s.parse::<i64>() {
                Ok(n) => Some(Number::Int(n)),
                Err(_) => s.parse::<f64>().ok().map(Number::Float),
            },
            _ => None,
        }
    }

    /// Integer view: integers, and text that parses as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Str(s) | Value::Raw(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Truthiness for flag-like options such as `withscores`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) | Value::Raw(s) => !s.is_empty(),
        }
    }

    /// Case-insensitive keyword test, e.g. `WITHSCORES` or `LIMIT`.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.as_str().is_some_and(|s| s.eq_ignore_ascii_case(keyword))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Text form used when a value becomes a key or a set member.
/// Floats keep a fractional part (`1.0`) and booleans are capitalized.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) | Value::Raw(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_nan() => f.write_str("nan"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
