#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use snaplink::application::services::RedirectService;
use snaplink::domain::repositories::LinkStore;
use snaplink::infrastructure::persistence::MemoryLinkStore;
use snaplink::routes::router;
use snaplink::state::AppState;
use snaplink::utils::code_generator::RandomCodeGenerator;

pub fn create_test_service(store: Arc<dyn LinkStore>) -> RedirectService {
    RedirectService::new(store, Arc::new(RandomCodeGenerator::default()))
}

pub fn create_test_state() -> (AppState, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let service = create_test_service(store.clone());
    (AppState::new(Arc::new(service)), store)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryLinkStore>) {
    let (state, store) = create_test_state();
    let server = TestServer::new(router(state, "*")).unwrap();
    (server, store)
}
