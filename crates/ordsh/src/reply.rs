//! Replies printed by the shell

use std::fmt;

/// Result of running one command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Command succeeded with nothing to report
    Ok,
    /// A cached value
    Value(String),
    /// Key not present
    Nil,
    /// A count
    Integer(u64),
    /// A list of keys
    List(Vec<String>),
    /// Free-form text, printed as is
    Text(String),
    /// Command failed
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value(v) => write!(f, "{:?}", v),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(i) => write!(f, "(integer) {}", i),
            Reply::List(items) if items.is_empty() => write!(f, "(empty list)"),
            Reply::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {:?}", i + 1, item)?;
                }
                Ok(())
            }
            Reply::Text(text) => write!(f, "{}", text),
            Reply::Error(e) => write!(f, "(error) {}", e),
        }
    }
}
