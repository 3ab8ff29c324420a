use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Validation(ValidationErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    MinLength { value: String, min: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: &'static str,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Required => write!(f, "{0}: Path `{0}` is required.", self.path),
            FieldErrorKind::MinLength { value, min } => write!(
                f,
                "{0}: Path `{0}` (`{1}`) is shorter than the minimum allowed length ({2}).",
                self.path, value, min
            ),
        }
    }
}

/// Every field that failed the schema, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub model: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(model: &'static str) -> Self {
        Self { model, errors: Vec::new() }
    }

    pub fn push(&mut self, path: &'static str, kind: FieldErrorKind) {
        self.errors.push(FieldError { path, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|e| e.path)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failed: ", self.model)?;
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}
