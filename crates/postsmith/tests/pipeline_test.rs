//! End-to-end tests for the Postsmith pipeline step
//!
//! Each test builds an in-memory file mapping, runs a configured step over
//! it, and checks the resulting mapping the host would write out.

use async_trait::async_trait;
use postsmith::{
    BuildContext, Error, File, Files, Options, Plugin, PluginError, PluginRegistry, PostCss,
    ProcessOptions,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Barrier;

fn files(entries: &[(&str, &str)]) -> Files {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), File::new(*v)))
        .collect()
}

fn text(files: &Files, key: &str) -> String {
    files[key].text().into_owned()
}

/// Appends the `from`/`to` hints it was given
struct Paths;

#[async_trait]
impl Plugin for Paths {
    fn name(&self) -> &str {
        "paths"
    }

    async fn transform(&self, css: String, options: &ProcessOptions) -> Result<String, PluginError> {
        let from = options.from.as_ref().ok_or("missing from")?;
        let to = options.to.as_ref().ok_or("missing to")?;
        Ok(format!("{}/* {} -> {} */", css, from.display(), to.display()))
    }
}

/// Waits until `n` renders are in flight at once
struct Rendezvous(Arc<Barrier>);

#[async_trait]
impl Plugin for Rendezvous {
    fn name(&self) -> &str {
        "rendezvous"
    }

    async fn transform(&self, css: String, _options: &ProcessOptions) -> Result<String, PluginError> {
        self.0.wait().await;
        Ok(css)
    }
}

/// Fails for files whose source path contains the argument
struct FailOn(String);

#[async_trait]
impl Plugin for FailOn {
    fn name(&self) -> &str {
        "fail-on"
    }

    async fn transform(&self, css: String, options: &ProcessOptions) -> Result<String, PluginError> {
        if options.source_name().contains(&self.0) {
            return Err(format!("refusing {}", self.0).into());
        }
        Ok(css)
    }
}

fn registry() -> PluginRegistry {
    PluginRegistry::default()
        .with("paths", |_| Ok(Arc::new(Paths) as Arc<dyn Plugin>))
        .with("fail-on", |args: &Value| {
            let needle = args.as_str().ok_or("expected a string")?;
            Ok(Arc::new(FailOn(needle.to_string())) as Arc<dyn Plugin>)
        })
}

#[tokio::test]
async fn test_scss_is_processed_and_renamed() {
    let mut files = files(&[("index.scss", "body { margin: 0 }")]);
    let step = PostCss::new(Options::new().pattern("*.scss").setting("minify", true));

    step.process(&mut files, &BuildContext::new("/site"))
        .await
        .unwrap();

    assert!(!files.contains_key("index.scss"));
    assert_eq!(text(&files, "index.css"), "body{margin:0}");
}

#[tokio::test]
async fn test_nested_files_keep_directories() {
    let mut files = files(&[
        ("styles/site.sss", "a { color: red }"),
        ("styles/vendor/reset.styl", "b { color: red }"),
        ("styles/plain.css", "c { color: red }"),
        ("index.html", "<html></html>"),
    ]);
    let step = PostCss::new(Options::new().pattern("styles/**/*"));

    step.process(&mut files, &BuildContext::new("/site"))
        .await
        .unwrap();

    let mut keys: Vec<&str> = files.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "index.html",
            "styles/plain.css",
            "styles/site.css",
            "styles/vendor/reset.css",
        ]
    );
    assert_eq!(text(&files, "index.html"), "<html></html>");
}

#[tokio::test]
async fn test_empty_pattern_fails() {
    let mut files = files(&[("index.css", "a { color: red }")]);
    let before = files.clone();
    let step = PostCss::new(Options::new().pattern("foo.bar"));

    let err = step
        .process(&mut files, &BuildContext::new("/site"))
        .await
        .unwrap_err();

    assert!(err.is_empty_selection());
    assert!(err.to_string().contains("foo.bar"));
    assert_eq!(files, before);
}

#[tokio::test]
async fn test_config_file_plugins_and_settings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("postsmith.yaml"),
        r#"
plugins:
  replace:
    pattern: "red"
    replacement: "tomato"
  banner: "built by postsmith"
minify: false
"#,
    )
    .unwrap();

    let mut files = files(&[("index.css", "a { color: red }")]);
    let step = PostCss::new(
        Options::new()
            .pattern("index.css")
            .config("postsmith.yaml")
            .setting("minify", true),
    );

    step.process(&mut files, &BuildContext::new(dir.path()))
        .await
        .unwrap();

    assert_eq!(
        text(&files, "index.css"),
        "/*! built by postsmith */\na{color:tomato}"
    );
}

#[tokio::test]
async fn test_inline_plugin_overrides_config_plugin() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("postsmith.yaml"),
        "plugins:\n  banner: from config\n",
    )
    .unwrap();

    let mut files = files(&[("a.css", "a { color: red }")]);
    let step = PostCss::new(
        Options::new()
            .config("postsmith")
            .plugin("banner", json!({"text": "from inline"}))
            .setting("minify", true),
    );

    step.process(&mut files, &BuildContext::new(dir.path()))
        .await
        .unwrap();

    assert_eq!(text(&files, "a.css"), "/*! from inline */\na{color:red}");
}

#[tokio::test]
async fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let mut files = files(&[("a.css", "a { color: red }")]);
    let before = files.clone();
    let step = PostCss::new(Options::new().config("missing.yaml"));

    let err = step
        .process(&mut files, &BuildContext::new(dir.path()))
        .await
        .unwrap_err();

    assert!(err.is_config_load());
    assert_eq!(files, before);
}

#[tokio::test]
async fn test_plugins_receive_source_and_destination_paths() {
    let mut files = files(&[("css/a.scss", "a { color: red }")]);
    let step = PostCss::with_registry(
        Options::new()
            .pattern("**/*.scss")
            .plugin("paths", json!(null))
            .setting("minify", true),
        registry(),
    );
    let ctx = BuildContext::new("/site")
        .with_source("assets")
        .with_destination("public");

    step.process(&mut files, &ctx).await.unwrap();

    assert_eq!(
        text(&files, "css/a.css"),
        "a{color:red}/* /site/assets/css/a.scss -> /site/public/css/a.scss */"
    );
}

#[tokio::test]
async fn test_relative_build_directory_gives_absolute_paths() {
    let cwd = std::env::current_dir().unwrap();
    let mut files = files(&[("a.css", "a { color: red }")]);
    let step = PostCss::with_registry(
        Options::new()
            .plugin("paths", json!(null))
            .setting("minify", true),
        registry(),
    );

    step.process(&mut files, &BuildContext::new("./site"))
        .await
        .unwrap();

    let from = cwd.join("site").join("src").join("a.css");
    let to = cwd.join("site").join("build").join("a.css");
    assert!(from.is_absolute());
    assert_eq!(
        text(&files, "a.css"),
        format!("a{{color:red}}/* {} -> {} */", from.display(), to.display())
    );
}

#[tokio::test]
async fn test_invalid_css_fails_without_renaming() {
    let mut files = files(&[
        ("good.scss", "a { color: red }"),
        ("bad.scss", "..broken { color: red }"),
    ]);
    let step = PostCss::new(Options::new().pattern("*.scss").setting("minify", true));

    let err = step
        .process(&mut files, &BuildContext::new("/site"))
        .await
        .unwrap_err();

    assert!(err.is_transform());
    match &err {
        Error::Transform { file, .. } => assert_eq!(file, "bad.scss"),
        other => panic!("Expected Transform, got {other:?}"),
    }

    // no renames happen once a render fails
    assert!(files.contains_key("bad.scss"));
    assert!(files.contains_key("good.scss"));
    assert!(!files.contains_key("good.css"));
    assert_eq!(text(&files, "bad.scss"), "..broken { color: red }");
    // successful renders are not rolled back
    assert_eq!(text(&files, "good.scss"), "a{color:red}");
}

#[tokio::test]
async fn test_plugin_failure_is_reported_for_file() {
    let mut files = files(&[("a.css", "a { color: red }"), ("b.css", "b { color: red }")]);
    let step = PostCss::with_registry(
        Options::new().plugin("fail-on", json!("b.css")),
        registry(),
    );

    let err = step
        .process(&mut files, &BuildContext::new("/site"))
        .await
        .unwrap_err();

    assert!(err.is_transform());
    assert!(err.to_string().contains("refusing b.css"));
}

#[tokio::test]
async fn test_plugin_constructor_rejects_arguments() {
    let mut files = files(&[("a.css", "a { color: red }")]);
    let step = PostCss::with_registry(Options::new().plugin("fail-on", json!(1)), registry());

    let err = step
        .process(&mut files, &BuildContext::new("/site"))
        .await
        .unwrap_err();

    assert!(err.is_plugin_resolution());
}

#[tokio::test]
async fn test_renders_run_concurrently() {
    let keys = ["a.css", "b.css", "c.css", "d.css"];
    let mut files: Files = keys
        .iter()
        .map(|k| (k.to_string(), File::new("a { color: red }")))
        .collect();

    let barrier = Arc::new(Barrier::new(keys.len()));
    let registry = PluginRegistry::empty().with("rendezvous", move |_| {
        Ok(Arc::new(Rendezvous(barrier.clone())) as Arc<dyn Plugin>)
    });
    let step = PostCss::with_registry(
        Options::new()
            .plugin("rendezvous", json!({}))
            .setting("minify", true),
        registry,
    );

    let ctx = BuildContext::new("/site");
    tokio::time::timeout(Duration::from_secs(5), step.process(&mut files, &ctx))
        .await
        .expect("renders did not overlap")
        .unwrap();

    for key in keys {
        assert_eq!(text(&files, key), "a{color:red}");
    }
}
