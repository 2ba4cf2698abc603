//! Notifications Domain
//!
//! Two concerns live here:
//!
//! - **Account e-mails** ([`NotificationService`]): welcome and password
//!   reset messages rendered with Handlebars and handed to an
//!   [`EmailProvider`]. Callers treat these as best-effort side effects.
//! - **In-app notifications** ([`InboxService`]): per-user records of
//!   feedback, status changes, learning paths and assessments, stored in
//!   memory or Postgres and read back only by their recipient.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ UserService     │  ← registration / password reset
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ NotificationSvc │  ← renders templates
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Email Provider  │  ← log (default) or mock (tests)
//! └─────────────────┘
//! ```

pub mod error;
pub mod inbox;
pub mod models;
pub mod postgres;
pub mod providers;
pub mod service;
pub mod templates;

pub use error::{NotificationError, NotificationResult};
pub use inbox::{InMemoryNotificationRepository, InboxService, NotificationRepository};
pub use models::{CreateNotification, Notification, NotificationKind, UnreadCount};
pub use postgres::PostgresNotificationRepository;
pub use providers::{EmailContent, EmailProvider, LogEmailProvider, MockEmailProvider, SentEmail};
pub use service::{NotificationConfig, NotificationService};
pub use templates::{RenderedEmail, TemplateEngine};
