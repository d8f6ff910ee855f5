//! Directive registry
//!
//! Directives are named callbacks with a declared argument list, meant to be
//! invoked from configuration text as `name arg arg ...`. The registry
//! type-checks arguments against the declaration before calling the handler,
//! so a handler can destructure its arguments without checking kinds again.
//!
//! The parser does not consult the registry yet.
//!
//! Argument lists are declared with a format string, one character per
//! argument:
//!
//! | char | kind    |
//! |------|---------|
//! | `b`  | boolean |
//! | `i`  | integer |
//! | `f`  | float   |
//! | `s`  | string  |

use crate::config::{Value, ValueKind};
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Callback run by [`DirectiveRegistry::invoke`]
pub type Handler = Box<dyn Fn(&[Value]) -> Result<(), String>>;

#[derive(Debug, Error, PartialEq)]
pub enum DirectiveError {
    #[error("Unknown directive '{0}'")]
    Unknown(String),

    #[error("Invalid argument format '{format}' for directive '{name}'")]
    Format { name: String, format: String },

    #[error("Directive '{name}' takes {expected} arguments, got {found}")]
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Argument {position} of directive '{name}' must be {expected}, not {found}")]
    ArgumentType {
        name: String,
        position: usize,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Directive '{name}' failed: {message}")]
    Failed { name: String, message: String },
}

/// Kind of a declared directive argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Boolean,
    Integer,
    Float,
    String,
}

impl ArgKind {
    fn from_format_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(ArgKind::Boolean),
            'i' => Some(ArgKind::Integer),
            'f' => Some(ArgKind::Float),
            's' => Some(ArgKind::String),
            _ => None,
        }
    }

    fn value_kind(self) -> ValueKind {
        match self {
            ArgKind::Boolean => ValueKind::Boolean,
            ArgKind::Integer => ValueKind::Integer,
            ArgKind::Float => ValueKind::Float,
            ArgKind::String => ValueKind::String,
        }
    }
}

pub struct Directive {
    pub name: String,
    pub args: Vec<ArgKind>,
    handler: Handler,
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directive")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl Directive {
    /// Build a directive from its argument format string
    pub fn new(name: &str, format: &str, handler: Handler) -> Result<Self, DirectiveError> {
        let args = format
            .chars()
            .map(ArgKind::from_format_char)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| DirectiveError::Format {
                name: name.to_string(),
                format: format.to_string(),
            })?;

        Ok(Directive {
            name: name.to_string(),
            args,
            handler,
        })
    }

    fn check_args(&self, args: &[Value]) -> Result<(), DirectiveError> {
        if args.len() != self.args.len() {
            return Err(DirectiveError::ArgumentCount {
                name: self.name.clone(),
                expected: self.args.len(),
                found: args.len(),
            });
        }

        for (position, (declared, value)) in self.args.iter().zip(args).enumerate() {
            if declared.value_kind() != value.kind() {
                return Err(DirectiveError::ArgumentType {
                    name: self.name.clone(),
                    position: position + 1,
                    expected: declared.value_kind(),
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DirectiveRegistry {
    directives: FxHashMap<String, Directive>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directive, returning the one it replaces
    pub fn register(&mut self, directive: Directive) -> Option<Directive> {
        tracing::debug!(name = %directive.name, args = directive.args.len(), "directive registered");
        self.directives.insert(directive.name.clone(), directive)
    }

    pub fn get(&self, name: &str) -> Option<&Directive> {
        self.directives.get(name)
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Type-check `args` and run the named directive
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<(), DirectiveError> {
        let directive = self
            .get(name)
            .ok_or_else(|| DirectiveError::Unknown(name.to_string()))?;
        directive.check_args(args)?;

        (directive.handler)(args).map_err(|message| DirectiveError::Failed {
            name: name.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn include() -> Directive {
        Directive::new(
            "include",
            "sb",
            Box::new(|args| match args {
                [Value::String(path), Value::Boolean(_)] if path.is_empty() => {
                    Err("empty path".to_string())
                }
                _ => Ok(()),
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_format_string() {
        let directive = Directive::new("d", "bifs", Box::new(|_| Ok(()))).unwrap();
        assert_eq!(
            directive.args,
            vec![ArgKind::Boolean, ArgKind::Integer, ArgKind::Float, ArgKind::String]
        );
        assert!(matches!(
            Directive::new("d", "bx", Box::new(|_| Ok(()))),
            Err(DirectiveError::Format { .. })
        ));
    }

    #[test]
    fn test_invoke_runs_handler() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut registry = DirectiveRegistry::new();
        registry.register(
            Directive::new(
                "bump",
                "i",
                Box::new(move |args| {
                    if let [Value::Integer(n)] = args {
                        counter.set(counter.get() + *n);
                    }
                    Ok(())
                }),
            )
            .unwrap(),
        );

        registry.invoke("bump", &[Value::Integer(5)]).unwrap();
        registry.invoke("bump", &[Value::Integer(2)]).unwrap();
        assert_eq!(calls.get(), 7);
    }

    #[test]
    fn test_invoke_checks_arguments() {
        let mut registry = DirectiveRegistry::new();
        registry.register(include());

        assert_eq!(
            registry.invoke("missing", &[]),
            Err(DirectiveError::Unknown("missing".into()))
        );
        assert!(matches!(
            registry.invoke("include", &[Value::String("a".into())]),
            Err(DirectiveError::ArgumentCount { expected: 2, found: 1, .. })
        ));
        assert!(matches!(
            registry.invoke("include", &[Value::Integer(1), Value::Boolean(true)]),
            Err(DirectiveError::ArgumentType {
                position: 1,
                expected: ValueKind::String,
                found: ValueKind::Integer,
                ..
            })
        ));
        assert!(matches!(
            registry.invoke("include", &[Value::String(String::new()), Value::Boolean(true)]),
            Err(DirectiveError::Failed { .. })
        ));
        assert!(registry
            .invoke("include", &[Value::String("x.cfg".into()), Value::Boolean(false)])
            .is_ok());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = DirectiveRegistry::new();
        assert!(registry.register(include()).is_none());
        assert!(registry.register(include()).is_some());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("include").is_some());
    }
}
