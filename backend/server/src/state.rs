use std::sync::Arc;

use super::{config::Config, store::FoodStore, supabase::init_store};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn FoodStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn FoodStore>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }

    pub fn from_config(config: Config) -> anyhow::Result<Arc<Self>> {
        let store = init_store(&config.supabase_url, &config.supabase_key)?;

        Ok(Self::new(config, store))
    }
}
