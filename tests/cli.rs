use clap::Parser;
use tempfile::TempDir;
use vtemplate::cli::{Cli, run};

const CATALOG: &str = r#"
projects:
  team-a:
    - name: isolated
      versions:
        - version: 1.0.0
          parameters:
            - variable: replicas
              type: number
              defaultValue: "1"
        - version: 1.2.0
          parameters:
            - variable: replicas
              type: number
              defaultValue: "2"
              max: 5
            - variable: ingress.enabled
              type: boolean
              defaultValue: "false"
        - version: 2.0.0-beta.1
          parameters: []
        - version: not-a-version
    - name: plain
      parameters:
        - variable: team
          label: Team
          required: true
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("catalog.yaml"), CATALOG).unwrap();
        Self { dir }
    }

    fn catalog(&self) -> String {
        self.dir.path().join("catalog.yaml").display().to_string()
    }

    fn config_dir(&self) -> String {
        self.dir.path().join("config").display().to_string()
    }

    async fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let config_dir = self.config_dir();
        let mut argv = vec!["vtemplate", "--config-dir", config_dir.as_str()];
        argv.extend_from_slice(args);

        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        run(cli, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }
}

#[tokio::test]
async fn defaults_set_then_get_round_trips() {
    let ws = Workspace::new();

    ws.run(&["defaults", "set", "project", "team-a"]).await.unwrap();
    let out = ws.run(&["defaults", "get", "project"]).await.unwrap();

    assert_eq!(out, "team-a\n");
}

#[tokio::test]
async fn defaults_set_unsupported_key_fails() {
    let ws = Workspace::new();

    let err = ws.run(&["defaults", "set", "cluster", "x"]).await.unwrap_err();

    assert!(err.to_string().contains("unsupported key 'cluster'"));
}

#[tokio::test]
async fn template_latest_prints_highest_version() {
    let ws = Workspace::new();
    let catalog = ws.catalog();

    let out = ws
        .run(&["template", "latest", "isolated", "-p", "team-a", "--catalog", catalog.as_str()])
        .await
        .unwrap();

    assert_eq!(out, "2.0.0-beta.1\n");
}

#[tokio::test]
async fn template_resolve_uses_saved_project_and_pattern() {
    let ws = Workspace::new();
    let catalog = ws.catalog();
    ws.run(&["defaults", "set", "project", "team-a"]).await.unwrap();

    let out = ws
        .run(&[
            "template",
            "resolve",
            "isolated",
            "--catalog",
            catalog.as_str(),
            "--template-version",
            "1.x.x",
            "--set",
            "replicas=4",
        ])
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_yaml_ng::from_str(&out).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({"replicas": 4, "ingress": {"enabled": false}})
    );
}

#[tokio::test]
async fn template_resolve_reports_latest_when_nothing_matches() {
    let ws = Workspace::new();
    let catalog = ws.catalog();

    let err = ws
        .run(&[
            "template",
            "resolve",
            "isolated",
            "-p",
            "team-a",
            "--catalog",
            catalog.as_str(),
            "--template-version",
            "3.x.x",
        ])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("latest available is 2.0.0-beta.1"));
}

#[tokio::test]
async fn template_resolve_validates_parameters() {
    let ws = Workspace::new();
    let catalog = ws.catalog();

    let err = ws
        .run(&[
            "template",
            "resolve",
            "isolated",
            "-p",
            "team-a",
            "--catalog",
            catalog.as_str(),
            "--template-version",
            "1.2.0",
            "--set",
            "replicas=9",
        ])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("cannot be greater than 5"));
}

#[tokio::test]
async fn template_parameters_prints_option_descriptors() {
    let ws = Workspace::new();
    let catalog = ws.catalog();

    let out = ws
        .run(&["template", "parameters", "plain", "-p", "team-a", "--catalog", catalog.as_str()])
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([{
            "name": "team",
            "description": "Team",
            "required": true,
            "type": "string"
        }])
    );
}

async fn version_parameters(
    ws: &Workspace,
    version: &str,
) -> anyhow::Result<Vec<serde_json::Value>> {
    let catalog = ws.catalog();
    let out = ws
        .run(&[
            "template",
            "parameters",
            "isolated",
            "-p",
            "team-a",
            "--catalog",
            catalog.as_str(),
            "--template-version",
            version,
        ])
        .await?;
    Ok(serde_json::from_str(&out)?)
}

#[tokio::test]
async fn template_parameters_follow_requested_version() {
    let ws = Workspace::new();

    let v1 = version_parameters(&ws, "1.0.x").await.unwrap();
    let v12 = version_parameters(&ws, "1.2.x").await.unwrap();
    let err = version_parameters(&ws, "3.x.x").await.unwrap_err();

    assert_eq!(v1.len(), 1);
    assert_eq!(v1[0]["name"], "replicas");
    assert_eq!(v12.len(), 2);
    assert!(err.to_string().contains("latest available is 2.0.0-beta.1"));
}

#[tokio::test]
async fn template_without_project_fails() {
    let ws = Workspace::new();
    let catalog = ws.catalog();

    let err = ws
        .run(&["template", "latest", "isolated", "--catalog", catalog.as_str()])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("no project given"));
}

#[tokio::test]
async fn template_catalog_falls_back_to_config_file() {
    let ws = Workspace::new();
    let config_dir = ws.dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        serde_json::json!({ "catalog": ws.catalog() }).to_string(),
    )
    .unwrap();

    let out = ws
        .run(&["template", "latest", "isolated", "-p", "team-a"])
        .await
        .unwrap();

    assert_eq!(out, "2.0.0-beta.1\n");
}
