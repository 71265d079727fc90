use narrascope_core::{ApiClient, ClientConfig, CompareQueryPanel, SearchPanel, TrendPanel};

use crate::error::CliError;

const APP_NAME: &str = "narrascope";
const CONFIG_NAME: &str = "config";

/// Holds all state for the console session.
///
/// Each command drives the same panel controllers the dashboard uses; the
/// panels persist between commands so `config` can show what was last asked.
pub struct CliContext {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub search: SearchPanel,
    pub compare_query: CompareQueryPanel,
    pub trend: TrendPanel,
}

impl CliContext {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: ApiClient::from_config(&config),
            search: SearchPanel::new(),
            compare_query: CompareQueryPanel::new(),
            trend: TrendPanel::from_config(&config),
            config,
        }
    }

    /// Load the persisted configuration, falling back to defaults.
    pub fn load() -> Self {
        let config = match load_config() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "using default configuration");
                ClientConfig::default()
            }
        };
        Self::new(config)
    }

    /// Point the console at a different analysis service and persist it.
    pub fn set_base_url(&mut self, url: &str) -> Result<(), CliError> {
        let config = self.config.clone().with_base_url(url)?;
        confy::store(APP_NAME, CONFIG_NAME, &config).map_err(CliError::Save)?;
        self.apply(config);
        Ok(())
    }

    /// Swap in a new configuration without persisting it.
    pub fn apply(&mut self, config: ClientConfig) {
        tracing::info!(base_url = %config.base_url, "analysis endpoint updated");
        self.client = ApiClient::from_config(&config);
        self.config = config;
    }
}

fn load_config() -> Result<ClientConfig, CliError> {
    let config: ClientConfig = confy::load(APP_NAME, CONFIG_NAME).map_err(CliError::Load)?;
    Ok(config.validated()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_uses_configured_trend_window() {
        let config = ClientConfig {
            trend_period_days: 60,
            trend_granularity_days: 14,
            ..ClientConfig::default()
        };
        let ctx = CliContext::new(config);

        assert_eq!(ctx.trend.time_period_days, 60);
        assert_eq!(ctx.trend.granularity_days, 14);
        assert_eq!(ctx.client.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn apply_rebuilds_client_for_new_endpoint() {
        let mut ctx = CliContext::new(ClientConfig::default());
        let config = ClientConfig::default()
            .with_base_url("https://analysis.example.org/")
            .unwrap();

        ctx.apply(config);

        assert_eq!(ctx.client.base_url(), "https://analysis.example.org");
        assert_eq!(ctx.config.base_url, "https://analysis.example.org");
    }
}
