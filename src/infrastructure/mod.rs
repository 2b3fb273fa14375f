// Infrastructure layer - External dependencies and adapters
pub mod api_client;
pub mod config;
pub mod memory_repository;
pub mod seed;
pub mod snapshot_view;
pub mod token_store;
