// Common validation types and traits

#[derive(Debug)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulates per-field validation failures for a request payload
#[derive(Debug, Default)]
pub struct ValidationIssues {
    pub errors: Vec<FieldError>,
}

impl ValidationIssues {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ok when no issues were recorded, otherwise the accumulated issues
    pub fn into_result(self) -> Result<(), ValidationIssues> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationIssues;
}
