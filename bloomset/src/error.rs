// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error types for bloomset operations

use std::fmt;

/// ErrorKind is all kinds of Error of bloomset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A construction parameter is out of its allowed range.
    InvalidParameter,
}

impl ErrorKind {
    /// Convert this error kind instance into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::InvalidParameter => "InvalidParameter",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all bloomset functions.
///
/// # Examples
///
/// ```
/// # use bloomset::error::Error;
/// # use bloomset::error::ErrorKind;
/// let err = Error::new(ErrorKind::InvalidParameter, "size must be greater than 0")
///     .with_context("parameter", "size");
/// assert_eq!(err.kind(), ErrorKind::InvalidParameter);
/// assert_eq!(err.message(), "size must be greater than 0");
/// assert_eq!(err.context("parameter"), Some("size"));
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: vec![],
        }
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Return the context value recorded under `key`, if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

// Convenience constructors
impl Error {
    /// A construction parameter violated its range constraint.
    ///
    /// The offending field is recorded under the `parameter` context key and the rejected
    /// value under `value`.
    pub(crate) fn invalid_parameter(
        parameter: &'static str,
        value: impl ToString,
        requirement: &str,
    ) -> Self {
        Self::new(
            ErrorKind::InvalidParameter,
            format!("{parameter} {requirement}"),
        )
        .with_context("parameter", parameter)
        .with_context("value", value)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            return de.finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context_and_message() {
        let err = Error::invalid_parameter("size", 0, "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "InvalidParameter, context: { parameter: size, value: 0 } => size must be greater than 0"
        );
    }

    #[test]
    fn test_debug_lists_context() {
        let err = Error::invalid_parameter("false_positive_rate", 2.0, "must be in (0, 1]");
        let debug = format!("{err:?}");
        assert!(debug.starts_with("InvalidParameter => false_positive_rate must be in (0, 1]"));
        assert!(debug.contains("   parameter: false_positive_rate"));
        assert!(debug.contains("   value: 2"));
    }

    #[test]
    fn test_context_lookup() {
        let err = Error::invalid_parameter("num_hashes", 0, "must be greater than 0");
        assert_eq!(err.context("parameter"), Some("num_hashes"));
        assert_eq!(err.context("value"), Some("0"));
        assert_eq!(err.context("missing"), None);
    }
}
