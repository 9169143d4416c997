//! Common test utilities and fixtures for integration tests.
//!
//! Every `TestContext` owns a temporary directory holding the deck library
//! and the weight files, so tests never touch the real data directories.

pub mod fixtures;

use std::path::PathBuf;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use quiz_backend::config::Config;
use quiz_backend::{build_router, AppState};
use quiz_core::EngineConfig;

pub struct TestContext {
    pub dir: TempDir,
    pub config: Config,
    app: Router,
}

impl TestContext {
    /// Context with default engine settings and the fixture decks installed.
    pub fn new() -> Self {
        Self::with_engine(EngineConfig::default())
    }

    pub fn with_engine(engine: EngineConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            decks_dir: dir.path().join("data"),
            weights_dir: dir.path().join("user"),
            engine,
            seed: Some(42),
        };

        let state = AppState::new(config.clone()).expect("Failed to create app state");
        fixtures::install_decks(&config.decks_dir);

        Self {
            dir,
            config,
            app: build_router(state),
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.app.clone()).expect("Failed to start test server")
    }

    /// A server over the same directories but with no sessions in memory,
    /// as after a process restart.
    pub fn restarted_server(&self) -> TestServer {
        let state = AppState::new(self.config.clone()).expect("Failed to create app state");
        TestServer::new(build_router(state)).expect("Failed to start test server")
    }

    /// Weight files currently on disk.
    pub fn weight_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.config.weights_dir)
            .expect("Failed to read weights dir")
            .map(|e| e.expect("Failed to read entry").path())
            .collect();
        files.sort();
        files
    }
}
