//! Console commands end to end over an in-memory store

use clap::Parser;
use siga_cli::config::BackendKind;
use siga_cli::{commands, App, Cli, SigaConfig};

fn memory_config() -> SigaConfig {
    let mut config = SigaConfig::default();
    config.storage.in_memory = true;
    config
}

async fn run(app: &App, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("siga").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    commands::run(app, cli.command, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn test_members_list_shows_seed_data() {
    let app = App::build(&memory_config()).await.unwrap();
    let output = run(&app, &["members", "list"]).await.unwrap();

    assert_eq!(output.lines().count(), 3);
    assert!(output.contains("María López"));

    let inactive = run(&app, &["members", "list", "--status", "inactive"])
        .await
        .unwrap();
    assert_eq!(inactive.lines().count(), 1);
    assert!(inactive.starts_with("m3\t"));
}

#[tokio::test]
async fn test_member_add_validates_form() {
    let app = App::build(&memory_config()).await.unwrap();

    let err = run(
        &app,
        &["members", "add", "--name", "Ana", "--email", "no-es-email"],
    )
    .await
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("El formato del email es inválido"));
    assert!(message.contains("El teléfono es obligatorio"));

    let output = run(
        &app,
        &[
            "members", "add", "--name", "Ana Gómez", "--email", "ana@example.com", "--phone",
            "3001234567",
        ],
    )
    .await
    .unwrap();
    assert!(output.contains("Ana Gómez <ana@example.com>"));

    let stats = run(&app, &["members", "stats"]).await.unwrap();
    assert_eq!(stats.trim(), "total 4\tactive 3\tinactive 1");
}

#[tokio::test]
async fn test_update_of_missing_member_surfaces_container_message() {
    let app = App::build(&memory_config()).await.unwrap();
    let err = run(&app, &["members", "update", "ghost", "--name", "Nadie"])
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .starts_with("Error al actualizar miembro: member not found: ghost"));
}

#[tokio::test]
async fn test_events_between_and_cancel() {
    let app = App::build(&memory_config()).await.unwrap();

    let july = run(&app, &["events", "between", "--from", "2024-07-01"])
        .await
        .unwrap();
    assert_eq!(july.lines().count(), 1);
    assert!(july.contains("Taller de formación"));

    let cancelled = run(&app, &["events", "update", "e2", "--status", "cancelled"])
        .await
        .unwrap();
    assert!(cancelled.contains("[cancelled]"));

    let removed = run(&app, &["events", "remove", "e1"]).await.unwrap();
    assert_eq!(removed.trim(), "removed e1");
    let all = run(&app, &["events", "list"]).await.unwrap();
    assert_eq!(all.lines().count(), 1);
}

#[tokio::test]
async fn test_finance_summary_and_filters() {
    let app = App::build(&memory_config()).await.unwrap();

    let summary = run(&app, &["finance", "summary"]).await.unwrap();
    assert_eq!(
        summary.trim(),
        "income 350000.00\texpenses 80000.00\tbalance 270000.00"
    );

    let may = run(&app, &["finance", "list", "--month", "2024-05"])
        .await
        .unwrap();
    assert_eq!(may.lines().count(), 2);

    run(
        &app,
        &[
            "finance", "add", "--type", "expense", "--category", "Papelería", "--amount",
            "20000", "--date", "2024-05-15",
        ],
    )
    .await
    .unwrap();

    let may = run(&app, &["finance", "summary", "--month", "2024-05"])
        .await
        .unwrap();
    assert_eq!(
        may.trim(),
        "income 150000.00\texpenses 100000.00\tbalance 50000.00"
    );
}

#[tokio::test]
async fn test_store_reset_and_export() {
    let app = App::build(&memory_config()).await.unwrap();
    run(&app, &["members", "remove", "m1"]).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");
    run(&app, &["store", "export", "--output", path.to_str().unwrap()])
        .await
        .unwrap();

    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(exported["version"], 1);
    assert_eq!(exported["members"].as_array().unwrap().len(), 2);

    let reset = run(&app, &["store", "reset"]).await.unwrap();
    assert_eq!(
        reset.trim(),
        "store reset: 3 members, 2 events, 3 transactions"
    );
}

#[tokio::test]
async fn test_store_commands_need_local_backend() {
    let mut config = memory_config();
    config.backend.kind = BackendKind::Rest;
    let app = App::build(&config).await.unwrap();

    let err = run(&app, &["store", "reset"]).await.unwrap_err();
    assert!(err.to_string().contains("rest backend"));
}

#[tokio::test]
async fn test_whoami_uses_default_role() {
    let mut config = memory_config();
    assert_eq!(
        run(&App::build(&config).await.unwrap(), &["whoami"])
            .await
            .unwrap()
            .trim(),
        "no operator configured"
    );

    config.auth.operator_email = Some("tesoreria@siga.org".to_string());
    config.auth.operator_name = Some("Tesorería".to_string());
    config.auth.default_role = "miembro".to_string();

    let app = App::build(&config).await.unwrap();
    let output = run(&app, &["whoami"]).await.unwrap();
    assert_eq!(output.trim(), "Tesorería <tesoreria@siga.org>\trole miembro");
}
