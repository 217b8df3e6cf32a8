//! Creation notifications.
//!
//! Renders the email body for a creation event and hands it to the
//! configured [`Mailer`]. Errors are returned to the caller untouched.

use std::sync::Arc;

use askama::Template;
use tracing::info;

use crate::config::MailerConfig;
use crate::models::episode::Episode;
use crate::models::program::Program;
use crate::services::mailer::{Email, MailError, Mailer};

#[derive(Template)]
#[template(path = "email/new_program.html")]
struct NewProgramEmail<'a> {
    title: &'a str,
    slug: &'a str,
    synopsis: &'a str,
    details: Vec<(&'static str, String)>,
}

#[derive(Template)]
#[template(path = "email/new_episode.html")]
struct NewEpisodeEmail<'a> {
    title: &'a str,
    slug: &'a str,
    number: i32,
    synopsis: &'a str,
    program_title: &'a str,
    program_slug: &'a str,
}

/// What happened, along with the records the email talks about.
pub enum Notification<'a> {
    NewProgram(&'a Program),
    NewEpisode {
        episode: &'a Episode,
        program: &'a Program,
    },
}

impl Notification<'_> {
    const fn kind(&self) -> &'static str {
        match self {
            Self::NewProgram(_) => "new_program",
            Self::NewEpisode { .. } => "new_episode",
        }
    }

    fn subject(&self) -> String {
        match self {
            Self::NewProgram(_) => "Une nouvelle série vient d'être publiée !".to_string(),
            Self::NewEpisode { program, .. } => {
                format!("Un nouvel épisode de {} vient d'être publié !", program.title)
            }
        }
    }

    fn render(&self) -> Result<String, askama::Error> {
        match self {
            Self::NewProgram(program) => {
                let mut details = Vec::new();
                if let Some(country) = &program.country {
                    details.push(("Country", country.clone()));
                }
                if let Some(year) = program.year {
                    details.push(("Year", year.to_string()));
                }
                NewProgramEmail {
                    title: &program.title,
                    slug: &program.slug,
                    synopsis: &program.synopsis,
                    details,
                }
                .render()
            }
            Self::NewEpisode { episode, program } => NewEpisodeEmail {
                title: &episode.title,
                slug: &episode.slug,
                number: episode.number,
                synopsis: &episode.synopsis,
                program_title: &program.title,
                program_slug: &program.slug,
            }
            .render(),
        }
    }
}

pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    from: String,
    recipient: String,
}

impl Notifier {
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, config: &MailerConfig) -> Self {
        Self {
            mailer,
            from: config.from.clone(),
            recipient: config.notification_recipient.clone(),
        }
    }

    /// Sends `notification` to the configured inbox.
    pub async fn notify(&self, notification: Notification<'_>) -> Result<(), MailError> {
        let email = Email {
            from: self.from.clone(),
            to: self.recipient.clone(),
            subject: notification.subject(),
            html: notification.render()?,
        };

        self.mailer.send(email).await?;
        metrics::counter!("notifications_sent_total", "kind" => notification.kind()).increment(1);
        info!(kind = notification.kind(), to = %self.recipient, "Notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mailer::MemoryMailer;

    fn program() -> Program {
        Program {
            id: 1,
            title: "Breaking <Code>".to_string(),
            slug: "breaking-code".to_string(),
            synopsis: "A chemist turns to crime.".to_string(),
            poster: None,
            country: Some("USA".to_string()),
            year: Some(2008),
            owner_id: Some(1),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_new_program_email() {
        let mailer = MemoryMailer::new();
        let notifier = Notifier::new(Arc::new(mailer.clone()), &MailerConfig::default());

        let program = program();
        notifier
            .notify(Notification::NewProgram(&program))
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "notifications@wildseries.test");
        assert_eq!(sent[0].from, "no-reply@wildseries.test");
        assert!(sent[0].html.contains("Breaking &lt;Code&gt;"));
        assert!(sent[0].html.contains("/program/breaking-code"));
        assert!(sent[0].html.contains("2008"));
    }

    #[tokio::test]
    async fn test_new_episode_email() {
        let mailer = MemoryMailer::new();
        let notifier = Notifier::new(Arc::new(mailer.clone()), &MailerConfig::default());

        let program = program();
        let episode = Episode {
            id: 3,
            program_id: 1,
            season_id: None,
            number: 1,
            title: "Pilot".to_string(),
            slug: "pilot".to_string(),
            synopsis: "It begins.".to_string(),
        };
        notifier
            .notify(Notification::NewEpisode {
                episode: &episode,
                program: &program,
            })
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains("Breaking <Code>"));
        assert!(sent[0].html.contains("/episode/pilot"));
    }

    #[tokio::test]
    async fn test_send_failure_is_returned() {
        let notifier = Notifier::new(
            Arc::new(MemoryMailer::failing()),
            &MailerConfig::default(),
        );
        let program = program();
        assert!(
            notifier
                .notify(Notification::NewProgram(&program))
                .await
                .is_err()
        );
    }
}
