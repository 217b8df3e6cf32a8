//! Demo data for local development (`wildseries seed`).

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::slugify;
use crate::entities::{episodes, programs, seasons, users};

use super::repositories::user::hash_password;

const PROGRAMS: &[(&str, &str)] = &[
    ("Walking Dead", "Le policier Rick Grimes se réveille après un long coma."),
    ("The Haunting Of Hill House", "Plusieurs frères et sœurs ont grandi dans la demeure la plus célèbre des États-Unis."),
    ("American Horror Story", "A chaque saison, son histoire."),
    ("Love Death And Robots", "Un yaourt susceptible, des soldats lycanthropes, des robots déchaînés."),
    ("Penny Dreadful", "Dans le Londres ancien, Vanessa Ives, une jeune femme puissante aux pouvoirs hypnotiques."),
    ("Fear The Walking Dead", "La série se déroule au tout début de l'épidémie relatée dans la série mère."),
];

const WORDS: &[&str] = &[
    "night", "return", "house", "fire", "silence", "road", "winter", "secret", "blood",
    "dawn", "storm", "mirror", "garden", "stranger", "promise", "harbor", "echo", "signal",
];

/// Sizes of the generated data set.
#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    pub programs: usize,
    pub seasons_per_program: usize,
    pub episodes_per_season: usize,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            programs: PROGRAMS.len(),
            seasons_per_program: 3,
            episodes_per_season: 8,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub programs: usize,
    pub seasons: usize,
    pub episodes: usize,
}

fn sentence(rng: &mut StdRng, words: usize) -> String {
    let mut out = Vec::with_capacity(words);
    for _ in 0..words {
        out.push(WORDS[rng.random_range(0..WORDS.len())]);
    }
    let text = out.join(" ");
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Inserts the demo users, programs, seasons and episodes in one transaction.
///
/// Accounts: `admin@wildseries.test` owns every program, `contributor@wildseries.test`
/// owns none. Both use the password `password`.
pub async fn seed(
    conn: &DatabaseConnection,
    options: SeedOptions,
    security: &SecurityConfig,
) -> Result<SeedReport> {
    let mut rng = StdRng::seed_from_u64(20_210_131);
    let mut report = SeedReport::default();
    let now = chrono::Utc::now().to_rfc3339();

    let password_hash = {
        let config = security.clone();
        tokio::task::spawn_blocking(move || hash_password("password", &config))
            .await
            .context("Password hashing task panicked")??
    };

    let txn = conn.begin().await.context("Failed to open seed transaction")?;

    let mut owner_id = 0;
    for email in ["admin@wildseries.test", "contributor@wildseries.test"] {
        let user = users::ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash.clone()),
            created_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .with_context(|| format!("Failed to insert user {email}"))?;
        if owner_id == 0 {
            owner_id = user.id;
        }
        report.users += 1;
    }

    for index in 0..options.programs {
        let (base_title, synopsis) = PROGRAMS[index % PROGRAMS.len()];
        let title = if index < PROGRAMS.len() {
            base_title.to_string()
        } else {
            format!("{base_title} {}", index / PROGRAMS.len() + 1)
        };

        let program = programs::ActiveModel {
            slug: Set(slugify(&title)),
            title: Set(title),
            synopsis: Set(synopsis.to_string()),
            poster: Set(None),
            country: Set(Some("USA".to_string())),
            year: Set(Some(rng.random_range(1995..=2021))),
            owner_id: Set(Some(owner_id)),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert program")?;
        report.programs += 1;

        for season_number in 1..=options.seasons_per_program {
            let number = i32::try_from(season_number)?;
            let season = seasons::ActiveModel {
                program_id: Set(program.id),
                number: Set(number),
                year: Set(program.year.map(|y| y + number - 1)),
                description: Set(sentence(&mut rng, 12)),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .context("Failed to insert season")?;
            report.seasons += 1;

            for episode_number in 1..=options.episodes_per_season {
                let episode_title = sentence(&mut rng, 3);
                episodes::ActiveModel {
                    program_id: Set(program.id),
                    season_id: Set(Some(season.id)),
                    number: Set(i32::try_from(episode_number)?),
                    slug: Set(slugify(&episode_title)),
                    title: Set(episode_title),
                    synopsis: Set(sentence(&mut rng, 20)),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .context("Failed to insert episode")?;
                report.episodes += 1;
            }
        }
    }

    txn.commit().await.context("Failed to commit seed transaction")?;

    info!(
        users = report.users,
        programs = report.programs,
        seasons = report.seasons,
        episodes = report.episodes,
        "Fixtures loaded"
    );

    Ok(report)
}
