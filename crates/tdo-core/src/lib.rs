//! # tdo core library
//!
//! Everything `tdo` needs to talk to Todoist, without any terminal concerns.
//!
//! ## Core Modules
//!
//! - [`auth`]: bearer token resolution from the environment or 1Password
//! - [`client`]: the reqwest-backed Todoist REST v2 client
//! - [`gateway`]: the [`gateway::TaskGateway`] trait and task creation with subtasks
//! - [`filter`]: client-side task filters and due-date normalisation
//! - [`models`]: tasks, projects, labels and request payloads
//! - [`reset`]: the fixed Task Reset checklist
//! - [`error`]: the error taxonomy shared by all of the above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tdo_core::{
//!     auth::CredentialResolver, client::TodoistClient, filter::TaskFilter,
//!     gateway::TaskGateway, models::Priority,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (token, _source) = CredentialResolver::new(None).resolve()?;
//!     let client = TodoistClient::new(token)?;
//!
//!     let filter = TaskFilter { priority: Some(Priority::Urgent), ..Default::default() };
//!     for task in client.list_tasks(&filter).await? {
//!         println!("{} {}", task.id, task.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod reset;
