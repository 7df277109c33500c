//! Account and strategy records as exposed by the host platform.

use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// A brokerage account and the strategies running on it, in host order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
}

/// One strategy instance and its trade history for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Name as shown by the host, possibly with an instance suffix like `(3)`.
    pub display_name: String,
    /// Stopped or retired strategies are terminal and never exported.
    #[serde(default)]
    pub is_terminal: bool,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategies: Vec::new(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategies.push(strategy);
        self
    }
}

impl Strategy {
    pub fn new(display_name: impl Into<String>, trades: Vec<Trade>) -> Self {
        Self {
            display_name: display_name.into(),
            is_terminal: false,
            trades,
        }
    }

    pub fn terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }
}
