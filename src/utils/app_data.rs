//! 从 app_data 中取出启动时注入的共享组件

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::blobs::BlobStore;
use crate::config::AppConfig;
use crate::storage::Storage;
use crate::views::ViewRenderer;

pub fn get_storage(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

pub fn get_blobs(request: &HttpRequest) -> Arc<dyn BlobStore> {
    request
        .app_data::<web::Data<Arc<dyn BlobStore>>>()
        .expect("Blob store not found in app data")
        .get_ref()
        .clone()
}

pub fn get_renderer(request: &HttpRequest) -> Arc<dyn ViewRenderer> {
    request
        .app_data::<web::Data<Arc<dyn ViewRenderer>>>()
        .expect("View renderer not found in app data")
        .get_ref()
        .clone()
}

pub fn get_config(request: &HttpRequest) -> web::Data<AppConfig> {
    request
        .app_data::<web::Data<AppConfig>>()
        .expect("Config not found in app data")
        .clone()
}
