//! Application state shared by the HTTP handlers

use std::sync::Arc;

use crate::domain::QueryRouter;

#[derive(Debug, Clone)]
pub struct AppState {
    pub router: Arc<QueryRouter>,
}

impl AppState {
    pub fn new(router: QueryRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}
