use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::manager::DataManager;

/// Handle shared by every consumer of the store.
///
/// The manager assumes one mutation in flight at a time, so all access from
/// tasks goes through this lock. Holding the guard across several calls is
/// the only way to make them atomic.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<DataManager>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: AppConfig) -> Self {
        let store = DataManager::with_config(&config);
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
        }
    }

    /// Default configuration, no environment lookups.
    pub fn fake() -> Self {
        Self::from_config(AppConfig::default())
    }
}
