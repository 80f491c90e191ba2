use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::Config;
use crate::store::EventStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: EventStore,
}

impl AppState {
    pub fn new(config: Config, store: EventStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }
}
