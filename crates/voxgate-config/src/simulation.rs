use serde::Deserialize;

/// Artificial latency for simulated worker responses
///
/// Delays keep client-side progress handling honest during local
/// development, where a real worker would take minutes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Delay before a simulated training result (e.g. "3s")
    #[serde(default = "default_train_delay")]
    pub train_delay: String,
    /// Delay before a simulated conversion result (e.g. "1s")
    #[serde(default = "default_convert_delay")]
    pub convert_delay: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            train_delay: default_train_delay(),
            convert_delay: default_convert_delay(),
        }
    }
}

fn default_train_delay() -> String {
    "3s".to_string()
}

fn default_convert_delay() -> String {
    "1s".to_string()
}
