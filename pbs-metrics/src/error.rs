use thiserror::Error;

/// A string could not be parsed as a value of a restricted-domain label type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid {kind} value: {value:?}")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        ParseLabelError { kind, value: value.to_owned() }
    }

    /// Name of the label type that rejected the value.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::ParseLabelError;

    #[test]
    fn display() {
        let err = ParseLabelError::new("CacheResult", "maybe");
        assert_eq!(err.to_string(), "invalid CacheResult value: \"maybe\"");
    }
}
