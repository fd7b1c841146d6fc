use configtree::config::{ConfigLoader, ConsoleConfig};
use configtree::snapshot::{load_tree, save_tree};
use clap::Parser;
use configtree::tooling::{Cli, CliContext, Commands};
use configtree::tree::seed::default_tree;
use configtree::{ApiError, ConfigNode};
use std::fs;
use tempfile::TempDir;

fn context() -> CliContext {
    CliContext::with_config(ConsoleConfig::default(), None).unwrap()
}

#[test]
fn show_text_lists_tree_in_order() {
    let out = context()
        .execute(&Commands::Show {
            format: "text".to_string(),
        })
        .unwrap();
    let names: Vec<&str> = out.lines().take(3).collect();
    assert!(names[0].contains("root/"));
    assert!(names[1].contains("nginx configs/"));
    assert!(names[2].contains("sites-available/"));
    assert_eq!(out.lines().count(), 18);
}

#[test]
fn show_json_has_root_and_chain() {
    let out = context()
        .execute(&Commands::Show {
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["rootConfig"]["id"], "0");
    assert_eq!(value["rootConfig"]["children"]["9"]["name"], "dae configs");
    assert_eq!(value["currentIdChain"], serde_json::json!(["0"]));
}

#[test]
fn show_rejects_unknown_format() {
    let err = context()
        .execute(&Commands::Show {
            format: "xml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn cat_and_chain() {
    let mut ctx = context();
    let body = ctx
        .execute(&Commands::Cat {
            id: "8".to_string(),
        })
        .unwrap();
    assert!(body.contains("server_name regolar.wanglei.me"));

    let chain = ctx
        .execute(&Commands::Chain {
            id: "15".to_string(),
        })
        .unwrap();
    assert_eq!(chain, "0 / 9 / 13 / 15");

    assert!(ctx
        .execute(&Commands::Cat {
            id: "1".to_string()
        })
        .is_err());
    assert!(matches!(
        ctx.execute(&Commands::Chain {
            id: "404".to_string()
        }),
        Err(ApiError::Tree(_))
    ));
}

#[test]
fn validate_and_fingerprint() {
    let mut ctx = context();
    let out = ctx
        .execute(&Commands::Validate {
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["valid"], true);
    assert_eq!(value["node_count"], 18);

    let fingerprint = ctx.execute(&Commands::Fingerprint).unwrap();
    assert_eq!(fingerprint.len(), 64);
    assert_eq!(value["fingerprint"], fingerprint);
}

#[test]
fn apply_replays_actions_and_writes_snapshot() {
    let temp = TempDir::new().unwrap();
    let actions = temp.path().join("actions.json");
    fs::write(
        &actions,
        r#"[
            {"kind":"Create","config":{"id":"100","type":"file","name":"x.conf","content":"abc","ancestorIds":["1","2"]}},
            {"kind":"Update","config":{"id":"3","type":"file","name":"test1.conf","content":"new body","ancestorIds":["1","2"]}},
            {"kind":"Delete","config":{"id":"6","ancestorIds":["1","5"]}},
            {"kind":"SetCurrentChain","idChain":["0","9","13"]}
        ]"#,
    )
    .unwrap();
    let out_path = temp.path().join("out").join("tree.yaml");

    let mut ctx = context();
    let out = ctx
        .execute(&Commands::Apply {
            actions: actions.clone(),
            checked: true,
            out: Some(out_path.clone()),
            format: "json".to_string(),
        })
        .unwrap();
    let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(summary["applied"], 4);
    assert_eq!(summary["by_kind"]["create"], 1);
    assert_eq!(summary["node_count"], 18);
    assert_eq!(summary["current_id_chain"], serde_json::json!(["0", "9", "13"]));
    assert_ne!(summary["fingerprint_before"], summary["fingerprint_after"]);

    let written = load_tree(&out_path).unwrap();
    let sites = written.children.get("1").unwrap();
    assert_eq!(
        sites.children.get("2").unwrap().children.get("3").unwrap().content,
        "new body"
    );
    assert!(!sites.children.get("5").unwrap().children.contains("6"));
}

#[test]
fn apply_checked_stops_on_bad_action() {
    let temp = TempDir::new().unwrap();
    let actions = temp.path().join("actions.yaml");
    fs::write(
        &actions,
        "- kind: Delete\n  config:\n    id: \"404\"\n    ancestorIds: [\"1\"]\n",
    )
    .unwrap();

    let mut ctx = context();
    let command = Commands::Apply {
        actions,
        checked: true,
        out: None,
        format: "text".to_string(),
    };
    assert!(matches!(ctx.execute(&command), Err(ApiError::Tree(_))));

    let Commands::Apply { actions, .. } = command else {
        unreachable!()
    };
    let out = ctx
        .execute(&Commands::Apply {
            actions,
            checked: false,
            out: None,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(out.contains("Tree changed: no"));
}

#[test]
fn loads_tree_from_snapshot_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.json");
    let tree = default_tree();
    save_tree(&path, &tree).unwrap();

    let ctx = CliContext::with_config(ConsoleConfig::default(), Some(path)).unwrap();
    assert_eq!(ctx.store().state().root().as_ref(), &tree);
}

#[test]
fn config_file_seeds_tree_and_enforces_checked_dispatch() {
    let temp = TempDir::new().unwrap();
    let snapshot = temp.path().join("seed.json");
    let tree = ConfigNode::root();
    save_tree(&snapshot, &tree).unwrap();

    let config_path = temp.path().join("configtree.toml");
    fs::write(
        &config_path,
        format!(
            "[tree]\nsnapshot = \"{}\"\nchecked_dispatch = true\n",
            snapshot.display()
        ),
    )
    .unwrap();
    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    assert!(config.tree.checked_dispatch);

    let actions = temp.path().join("actions.json");
    fs::write(
        &actions,
        r#"[{"kind":"Delete","config":{"id":"404","ancestorIds":["1"]}}]"#,
    )
    .unwrap();

    let mut ctx = CliContext::with_config(config, None).unwrap();
    assert_eq!(ctx.store().state().len(), 1);
    let result = ctx.execute(&Commands::Apply {
        actions,
        checked: false,
        out: None,
        format: "text".to_string(),
    });
    assert!(matches!(result, Err(ApiError::Tree(_))));
}

#[test]
fn log_flags_override_loaded_config() {
    let cli = Cli::try_parse_from([
        "configtree",
        "--log-file",
        "/tmp/configtree-cli.log",
        "--log-output",
        "file",
        "fingerprint",
    ])
    .unwrap();
    let mut config = ConsoleConfig::default();
    cli.apply_logging_overrides(&mut config);
    assert_eq!(
        config.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/configtree-cli.log"))
    );
    assert_eq!(config.logging.output, "file");
    assert_eq!(config.logging.level, "info");
}
