use std::sync::Arc;

use log::info;

use crate::config::{Settings, StoreKind};
use crate::error::TrackerError;
use crate::repository::ApplicationRepository;
use crate::sheets::memory::MemorySheetStore;
use crate::sheets::proxy::ProxySheetStore;
use crate::sheets::SheetStore;

/// Builds the store selected by `settings`.
pub fn build_store(settings: &Settings) -> Result<Arc<dyn SheetStore>, TrackerError> {
    let store: Arc<dyn SheetStore> = match settings.store {
        StoreKind::Proxy => {
            let base_url = settings.proxy_base_url.as_deref().unwrap_or_default();
            Arc::new(ProxySheetStore::new(base_url, &settings.proxy_token)?)
        }
        StoreKind::Memory => match settings.seed_csv.as_deref() {
            Some(path) => {
                info!("Seeding in-memory sheet from {}", path);
                Arc::new(MemorySheetStore::from_csv_path(path)?)
            }
            None => Arc::new(MemorySheetStore::new()),
        },
    };
    Ok(store)
}

pub fn build_repository(settings: &Settings) -> Result<ApplicationRepository, TrackerError> {
    let store = build_store(settings)?;
    Ok(ApplicationRepository::new(
        store,
        settings.sheet_name.clone(),
        settings.sheet_id,
    ))
}
