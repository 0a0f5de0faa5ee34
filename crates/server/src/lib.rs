use db::DBService;

pub mod error;
pub mod forms;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod views;

#[cfg(test)]
pub mod test_support;

/// Shared per-process handles; holds no request state.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
}

impl AppState {
    pub fn new(db: DBService) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }
}
