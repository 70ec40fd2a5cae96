//! Configurable parameters for foraging.
//!
//! The [`ForagingConfig`] struct bundles the two numbers that govern how an
//! agent eats, so that callers (round cycle, tests) can override defaults.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Parameters for [`Agent::eat`](crate::Agent::eat).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForagingConfig {
    /// Most an agent takes from its cell in one meal (default: 10).
    #[serde(default = "default_bite_size")]
    pub bite_size: Decimal,

    /// Store level above which an agent disgorges everything it holds back
    /// into its cell (default: 100).
    #[serde(default = "default_store_cap")]
    pub store_cap: Decimal,
}

impl Default for ForagingConfig {
    fn default() -> Self {
        Self {
            bite_size: default_bite_size(),
            store_cap: default_store_cap(),
        }
    }
}

const fn default_bite_size() -> Decimal {
    Decimal::TEN
}

const fn default_store_cap() -> Decimal {
    Decimal::ONE_HUNDRED
}
