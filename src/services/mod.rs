pub mod password;

pub mod token;
pub use token::{ResetClaims, SessionClaims, TokenError};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, ResetRequest, SessionUser};
pub use auth_service_impl::StaticAdminAuthService;

pub mod post_service;
pub mod post_service_impl;
pub use post_service::{NewPost, Post, PostError, PostService, PostSummary};
pub use post_service_impl::MdxPostService;

pub mod settings_service;
pub mod settings_service_impl;
pub use settings_service::{ContactSettings, SettingsError, SettingsService};
pub use settings_service_impl::JsonSettingsService;

pub mod mailer;
pub use mailer::{MailError, Mailer, OutgoingEmail, SmtpMailer};

pub mod quote_service;
pub use quote_service::{Quote, QuoteService};
