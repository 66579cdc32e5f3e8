use std::sync::Arc;

use crate::config::Settings;
use crate::i18n::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub catalog: Arc<Catalog>,
}
