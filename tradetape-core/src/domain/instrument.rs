use serde::{Deserialize, Serialize};

/// Instrument a trade was placed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// Master instrument name, e.g. `NQ`.
    pub name: String,
    /// Contract-qualified name, e.g. `NQ 06-24`.
    pub full_name: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
        }
    }
}
