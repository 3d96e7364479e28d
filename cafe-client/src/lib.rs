//! Cafe Client - typed HTTP client for the cafe REST API
//!
//! ```no_run
//! use cafe_client::CafeClient;
//! use shared::models::MenuQuery;
//!
//! # async fn run() -> cafe_client::ClientResult<()> {
//! let mut client = CafeClient::new("http://localhost:3000")?;
//! let session = client.login("barista@cafe.test", "secret123").await?;
//! let drinks = client
//!     .list_menu(&MenuQuery { category: Some("drinks".into()), search: None })
//!     .await?;
//! # let _ = (session, drinks);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;

pub use error::{ClientError, ClientResult};
pub use http::CafeClient;

// Re-export shared types for convenience
pub use shared::cart::{Cart, ClientSession};
pub use shared::client::{LoginResponse, SampleDataResult, SignupRequest, UserInfo};
