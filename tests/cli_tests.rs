mod common;

use common::test_config;
use uuid::Uuid;
use wildseries::cli;
use wildseries::db::Store;

struct TempDb(std::path::PathBuf);

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn temp_db() -> TempDb {
    TempDb(std::env::temp_dir().join(format!("wildseries-cli-{}.db", Uuid::new_v4())))
}

#[tokio::test]
async fn test_operator_commands_use_configured_database() {
    let db = temp_db();
    let mut config = test_config(&db.0);
    config.general.max_db_connections = 2;
    config.general.min_db_connections = 1;

    cli::cmd_migrate(&config).await.unwrap();
    cli::cmd_create_user(&config, "Ops@Example.com", "s3cret-pass")
        .await
        .unwrap();
    assert!(
        cli::cmd_create_user(&config, "ops@example.com", "again")
            .await
            .is_err()
    );
    cli::cmd_seed(&config, Some(2), Some(1), Some(2)).await.unwrap();

    let store = Store::open(&config.general).await.unwrap();
    assert!(
        store
            .verify_user_password("ops@example.com", "s3cret-pass")
            .await
            .unwrap()
            .is_some()
    );
    assert_eq!(store.count_programs().await.unwrap(), 2);
    assert_eq!(store.count_episodes().await.unwrap(), 4);
}

#[tokio::test]
async fn test_create_user_rejects_blank_password() {
    let db = temp_db();
    let config = test_config(&db.0);

    assert!(
        cli::cmd_create_user(&config, "ops@example.com", "")
            .await
            .is_err()
    );
}
