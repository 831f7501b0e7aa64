pub mod app;
pub mod classify;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod instance;
pub mod mapper;
pub mod metadb;
pub mod output;
pub mod template;
