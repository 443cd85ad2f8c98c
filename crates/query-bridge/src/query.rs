use crate::{BridgeError, Result, Value};
use std::collections::BTreeMap;

/// A named request with optional arguments. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    name: String,
    arguments: BTreeMap<String, Value>,
}

impl Query {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(BridgeError::EmptyQueryName);
        }
        Ok(Self {
            name,
            arguments: BTreeMap::new(),
        })
    }

    pub fn with_arguments(
        name: impl Into<String>,
        arguments: BTreeMap<String, Value>,
    ) -> Result<Self> {
        let mut query = Self::new(name)?;
        query.arguments = arguments;
        Ok(query)
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &BTreeMap<String, Value> {
        &self.arguments
    }

    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key).filter(|v| !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(Query::new(""), Err(BridgeError::EmptyQueryName)));
        assert!(Query::with_arguments("", BTreeMap::new()).is_err());
    }

    #[test]
    fn null_arguments_read_as_absent() {
        let query = Query::new("isOsVersionAtLeast")
            .unwrap()
            .with_argument("major", 14)
            .with_argument("minor", Value::Null);
        assert_eq!(query.argument("major"), Some(&Value::Int(14)));
        assert_eq!(query.argument("minor"), None);
        assert_eq!(query.arguments().len(), 2);
    }
}
