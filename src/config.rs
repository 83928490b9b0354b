//! Configuration types.

use std::time::Duration;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Assistant display name.
    pub bot_name: String,
    /// Greeting message seeded into a fresh transcript. Empty disables it.
    pub greeting: String,
    /// Lower bound of the simulated typing delay.
    pub typing_delay_min: Duration,
    /// Upper bound of the simulated typing delay.
    pub typing_delay_max: Duration,
    /// Capacity of the change-event broadcast channel.
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bot_name: "Cosmo".to_string(),
            greeting: "Hi! I'm Cosmo, your ForceShield assistant. I can help you \
                       understand cyber threats, answer security questions, and share \
                       tips for staying safe online. What would you like to know?"
                .to_string(),
            typing_delay_min: Duration::from_millis(800),
            typing_delay_max: Duration::from_millis(1800),
            event_capacity: 64,
        }
    }
}
