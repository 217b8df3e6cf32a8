pub mod mailer;
pub use mailer::{Email, HttpMailer, LogMailer, MailError, Mailer, MemoryMailer};

pub mod notifier;
pub use notifier::{Notification, Notifier};

pub mod program_service;
pub mod program_service_impl;
pub use program_service::{ProgramError, ProgramService};
pub use program_service_impl::SeaOrmProgramService;

pub mod episode_service;
pub mod episode_service_impl;
pub use episode_service::{EpisodeError, EpisodeService, ProgramChoice};
pub use episode_service_impl::SeaOrmEpisodeService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod profile_service;
pub mod profile_service_impl;
pub use profile_service::{ProfileError, ProfileOverview, ProfileService};
pub use profile_service_impl::SeaOrmProfileService;
