//! Card code to ability script lookup.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::setup::AbilitySetup;
use crate::core::{CardError, Result};

/// Behaviour of one card, keyed by its printed code.
pub trait CardAbilities: Send + Sync {
    /// Printed code this script belongs to.
    fn code(&self) -> &'static str;

    /// Declare the card's effects. Called once when the card is created.
    fn setup_abilities(&self, setup: &mut AbilitySetup<'_>);
}

/// Registry of ability scripts, resolved once at load time.
#[derive(Clone, Default)]
pub struct AbilityRegistry {
    scripts: FxHashMap<String, Arc<dyn CardAbilities>>,
}

impl AbilityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every bundled core set script.
    pub fn with_core_set() -> Result<Self> {
        let mut registry = Self::new();
        for script in super::core_set::scripts() {
            registry.register(script)?;
        }
        Ok(registry)
    }

    /// Add a script. A code can only be claimed once.
    pub fn register(&mut self, script: Arc<dyn CardAbilities>) -> Result<()> {
        let code = script.code();
        if self.scripts.contains_key(code) {
            return Err(CardError::DuplicateAbility(code.to_string()));
        }
        debug!(code, "ability script registered");
        self.scripts.insert(code.to_string(), script);
        Ok(())
    }

    /// Script for `code`, if the card has one. Vanilla cards have none.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Arc<dyn CardAbilities>> {
        self.scripts.get(code)
    }

    pub fn require(&self, code: &str) -> Result<&Arc<dyn CardAbilities>> {
        self.get(code)
            .ok_or_else(|| CardError::UnknownAbility(code.to_string()))
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.scripts.contains_key(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Registered codes, sorted.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<_> = self.scripts.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl std::fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityRegistry")
            .field("codes", &self.codes())
            .finish()
    }
}
