//! An ordered list of classpath elements.

use std::env;
use std::ffi::OsStr;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Classpath elements in resolution order.
///
/// Duplicates and empty elements are kept as given; the encoding must
/// reproduce exactly what the upstream resolver produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classpath {
    elements: Vec<String>,
}

impl Classpath {
    /// Create a classpath from its elements.
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a platform path list (`:` on Unix, `;` on Windows).
    pub fn from_path_list(list: impl AsRef<OsStr>) -> Self {
        Self {
            elements: env::split_paths(list.as_ref())
                .map(|path| path.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// The elements in order.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.elements.iter()
    }
}

/// Joins with the platform path separator. Fails if an element contains
/// the separator itself, since the joined list could not be split back.
impl fmt::Display for Classpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = env::join_paths(&self.elements).map_err(|_| fmt::Error)?;
        write!(f, "{}", joined.to_string_lossy())
    }
}

impl<'a> IntoIterator for &'a Classpath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Classpath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
