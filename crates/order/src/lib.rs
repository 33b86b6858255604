pub mod abstract_trait;
pub mod config;
pub mod domain;
pub mod handler;
pub mod model;
pub mod repository;
pub mod state;
