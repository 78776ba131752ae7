//! Reconciliation of GitHub organizations and repositories against a
//! declarative configuration.
//!
//! The [`Organization`] and [`Repository`] façades read the live
//! configuration (`describe`) and apply a desired one (`update`). Each
//! section is handled by a [`Reconciler`] that fetches the current state,
//! diffs it with the desired state and issues the smallest set of calls
//! needed. A section that already matches issues no write at all.
//!
//! [`changes::confirm_changes`] shows what an update would do before it
//! runs.
//!
//! ```rust,no_run
//! use github_client::{create_token_client, GitHubClient};
//! use hubconf_core::{Repository, RepositoryConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(create_token_client("TOKEN", "https://api.github.com")?);
//! let repo = Repository::new(Arc::new(client), "acme", "widgets");
//!
//! let mut config = repo.describe().await?;
//! config.collaborators = None;
//! repo.update(&config).await?;
//! # Ok(())
//! # }
//! ```

pub mod changes;
pub mod collaborators;
pub mod config;
pub mod diff;
pub mod errors;
pub mod fields;
pub mod hooks;
pub mod labels;
pub mod members;
pub mod options;
pub mod organization;
pub mod paths;
pub mod permission;
pub mod reconcile;
pub mod repository;
pub mod teams;

pub use changes::{confirm_changes, diff_configs, ChangeSink, ConfigChanges, LogSink};
pub use config::{
    AccessConfig, HookConfig, LabelConfig, MemberConfig, Options, OrganizationConfig,
    RepositoryConfig, TeamConfig,
};
pub use diff::{diff, SetDiff};
pub use errors::{HubConfError, HubConfResult, ValidationError};
pub use organization::Organization;
pub use permission::{decode_permission, Permission, PermissionFlags};
pub use reconcile::{ApiCall, ApplyReport, Plan, Reconciler, UpdateSummary};
pub use repository::Repository;
