//! Zotero MCP Server
//!
//! A Model Context Protocol (MCP) server for the Zotero Web API v3.
//! Lets LLM agents list, search, create, update and delete library items,
//! manage collections, and export bibliographies.
//!
//! # Features
//!
//! - **10 MCP Tools**: Items, collections, bibliography export
//! - **Async-first**: Built on Tokio
//! - **Stateless**: Every tool call builds its own client from the shared configuration
//!
//! # Example
//!
//! ```no_run
//! use zotero_mcp::{config::Config, library::LibraryManager};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let library = LibraryManager::new(&config)?;
//!
//!     for item in library.search_items("lovelace", "", "").await? {
//!         println!("{} {}", item.key, item.title().unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod library;
pub mod models;
pub mod server;
pub mod tools;

pub use client::ZoteroClient;
pub use config::Config;
pub use error::{ClientError, ToolError};
pub use library::LibraryManager;
