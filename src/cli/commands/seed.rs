//! Seed command handler

use crate::config::Config;
use crate::db::Store;
use crate::db::fixtures::{self, SeedOptions};

pub async fn cmd_seed(
    config: &Config,
    programs: Option<usize>,
    seasons: Option<usize>,
    episodes: Option<usize>,
) -> anyhow::Result<()> {
    let defaults = SeedOptions::default();
    let options = SeedOptions {
        programs: programs.unwrap_or(defaults.programs),
        seasons_per_program: seasons.unwrap_or(defaults.seasons_per_program),
        episodes_per_season: episodes.unwrap_or(defaults.episodes_per_season),
    };

    let store = Store::open(&config.general).await?;
    let report = fixtures::seed(&store.conn, options, &config.security).await?;

    println!("Seeded database {}", config.general.database_path);
    println!("{:-<40}", "");
    println!("  Users:    {}", report.users);
    println!("  Programs: {}", report.programs);
    println!("  Seasons:  {}", report.seasons);
    println!("  Episodes: {}", report.episodes);
    println!();
    println!("Log in with admin@wildseries.test / password");

    Ok(())
}
