//! The four precedence layers and their merge.

use std::fmt;

use forkprops_store::{KeyValueSource, PropertyStore};
use tracing::debug;

/// One precedence layer, in ascending order of precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Ambient system properties of the launching process.
    System,
    /// Properties configured explicitly for the run.
    Explicit,
    /// System-property variables; absent values are written as `""`.
    Variables,
    /// User overrides, e.g. `-Dkey=value` on the command line.
    User,
}

impl Layer {
    /// Every layer, lowest precedence first.
    pub const ALL: [Layer; 4] = [Layer::System, Layer::Explicit, Layer::Variables, Layer::User];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::System => "system",
            Layer::Explicit => "explicit",
            Layer::Variables => "variables",
            Layer::User => "user",
        };
        f.write_str(name)
    }
}

/// The inputs to an effective-properties merge. Any layer may be absent.
#[derive(Clone, Copy, Default)]
pub struct PropertyLayers<'a> {
    pub system: Option<&'a dyn KeyValueSource>,
    pub explicit: Option<&'a PropertyStore>,
    pub variables: Option<&'a [(String, Option<String>)]>,
    pub user: Option<&'a dyn KeyValueSource>,
}

impl<'a> PropertyLayers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, source: &'a dyn KeyValueSource) -> Self {
        self.system = Some(source);
        self
    }

    pub fn with_explicit(mut self, store: &'a PropertyStore) -> Self {
        self.explicit = Some(store);
        self
    }

    pub fn with_variables(mut self, variables: &'a [(String, Option<String>)]) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_user(mut self, source: &'a dyn KeyValueSource) -> Self {
        self.user = Some(source);
        self
    }

    /// Merge the layers into a new store.
    ///
    /// Each key sits where it was first seen scanning system, explicit,
    /// variables, user, and holds the value from the highest layer that
    /// defines it.
    pub fn merge(&self) -> PropertyStore {
        let result = PropertyStore::new();
        for layer in Layer::ALL {
            let before = result.len();
            match layer {
                Layer::System => result.copy_from(self.system),
                Layer::Explicit => {
                    result.copy_from(self.explicit.map(|s| s as &dyn KeyValueSource))
                }
                Layer::Variables => {
                    if let Some(variables) = self.variables {
                        copy_variables(&result, variables);
                    }
                }
                Layer::User => result.copy_from(self.user),
            }
            debug!(
                %layer,
                new_keys = result.len() - before,
                total = result.len(),
                "applied property layer"
            );
        }
        result
    }
}

/// Merge the four layers; see [`PropertyLayers::merge`].
pub fn calculate_effective_properties(
    system: Option<&dyn KeyValueSource>,
    explicit: Option<&PropertyStore>,
    variables: Option<&[(String, Option<String>)]>,
    user: Option<&dyn KeyValueSource>,
) -> PropertyStore {
    PropertyLayers {
        system,
        explicit,
        variables,
        user,
    }
    .merge()
}

/// Write each variable into `target`, using `""` for an absent value.
pub fn copy_variables<K, V>(target: &PropertyStore, variables: &[(K, Option<V>)])
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (key, value) in variables {
        let value = value.as_ref().map(|v| v.as_ref()).unwrap_or("");
        target.put(key.as_ref(), value);
    }
}
