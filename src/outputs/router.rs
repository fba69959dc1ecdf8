use std::sync::Mutex;

use tracing::info;

use crate::services::Router;

/// Router for headless hosts: logs navigation and remembers the current path.
#[derive(Debug)]
pub struct LogRouter {
    current: Mutex<String>,
}

impl Default for LogRouter {
    fn default() -> Self {
        Self {
            current: Mutex::new("/".to_string()),
        }
    }
}

impl LogRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_path(&self) -> String {
        self.current
            .lock()
            .map(|p| p.clone())
            .unwrap_or_else(|_| "/".to_string())
    }
}

impl Router for LogRouter {
    fn navigate(&self, path: &str) {
        info!("[ROUTE] {}", path);
        if let Ok(mut current) = self.current.lock() {
            *current = path.to_string();
        }
    }
}
