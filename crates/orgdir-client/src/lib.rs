//! Organization directory client SDK.
//!
//! A thin typed wrapper over the directory HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use orgdir_client::DirectoryClient;
//! use orgdir_core::{ActivityId, Page};
//!
//! # async fn example() -> Result<(), orgdir_client::ClientError> {
//! let client = DirectoryClient::new("http://orgdir:8000", "your-api-key")?;
//!
//! let food = client
//!     .organizations_by_nested_activity(ActivityId::new(1), Page::default())
//!     .await?;
//!
//! for organization in food {
//!     println!("{} ({})", organization.name, organization.building_address);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;

pub use client::{ClientOptions, DirectoryClient};
pub use error::ClientError;
pub use orgdir_core::OrganizationRecord;
