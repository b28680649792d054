//! End-to-end wizard flow
//!
//! Exercises the complete pipeline against a real directory tree:
//! project detection -> content-type detection -> front-matter inference
//! -> step navigation -> finish with every tool synthesizer.

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::Value as Json;
use tempfile::TempDir;

use vault_detect::{ContentTypeDetector, FrontmatterAnalyzer, FsDocumentStore, OrganizationMode,
    ProjectDetector};
use vault_fs::{NormalizedPath, VaultLocation};
use vault_tools::{NullRegistry, SynthContext, ToolAdapter, ToolDispatcher, BASE_FILE};
use vault_wizard::{
    DraftConfig, JsonSettingsStore, SettingsStore, ToolOutcome, Transition, WizardSession,
};

/// A static-site project whose vault is the content directory itself:
/// file-organized posts and folder-organized docs.
fn setup_site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/content/posts")).unwrap();
    fs::create_dir_all(root.join("src/content/docs/getting-started")).unwrap();
    fs::write(root.join("astro.config.mjs"), "export default {};").unwrap();
    fs::write(
        root.join("src/content/posts/hello.md"),
        "---\ntitle: Hello\npubDate: 2024-03-01\nsummary: First post\ntags: [intro]\ndraft: true\n---\n\nBody\n",
    )
    .unwrap();
    fs::write(
        root.join("src/content/docs/getting-started/index.md"),
        "---\ntitle: Getting started\n---\n\nBody\n",
    )
    .unwrap();
    temp
}

/// Detect everything and assemble a draft the way the opening steps do.
fn detected_draft(vault_root: &NormalizedPath) -> DraftConfig {
    let store = FsDocumentStore::new(vault_root.clone());
    let mut draft = DraftConfig::default();
    draft.topology = ProjectDetector::new().detect(vault_root);

    draft.content_types =
        ContentTypeDetector::new(&store).detect(draft.topology.as_ref(), &[]);

    let analyzer = FrontmatterAnalyzer::new(&store);
    for ct in &draft.content_types {
        let folder = vault_root.join(&ct.folder);
        draft
            .frontmatter
            .insert(ct.id.clone(), analyzer.infer_for_folder(&folder));
    }
    draft
}

fn run_to_finish(
    draft: DraftConfig,
    settings: &JsonSettingsStore,
    dispatcher: &ToolDispatcher<'_>,
) -> vault_wizard::FinishReport {
    let mut session = WizardSession::new(draft, settings);
    loop {
        match session.advance(dispatcher).unwrap() {
            Transition::Moved(_) => continue,
            Transition::Finished(report) => return report,
            Transition::Blocked => panic!(
                "step {} blocked the flow",
                session.current_step().title()
            ),
        }
    }
}

#[test]
fn test_full_flow_from_detection_to_applied_tools() {
    let temp = setup_site();
    let vault = NormalizedPath::new(temp.path().join("src/content"));

    let mut draft = detected_draft(&vault);
    let topology = draft.topology.clone().unwrap();
    assert_eq!(topology.vault_location, VaultLocation::Content);

    // Folder names come back sorted, so Docs precedes Posts.
    let names: Vec<&str> = draft.content_types.iter().map(|ct| ct.name.as_str()).collect();
    assert_eq!(names, vec!["Docs", "Posts"]);

    // The docs folder holds one document per folder; the user flips the
    // organization mode on the content-type step.
    draft.content_types[0].organization = OrganizationMode::Folder;

    let posts_id = draft.content_types[1].id.clone();
    assert_eq!(
        draft.frontmatter[&posts_id].date_property.as_deref(),
        Some("pubDate")
    );
    assert_eq!(
        draft.frontmatter[&posts_id].description_property.as_deref(),
        Some("summary")
    );

    let settings = JsonSettingsStore::in_vault(&vault);
    let dispatcher = ToolDispatcher::new(vault.clone(), &NullRegistry);
    let report = run_to_finish(draft, &settings, &dispatcher);
    assert!(report.all_ok(), "failures: {:?}", report.failures().collect::<Vec<_>>());

    // CMS base file: one view per type plus the catch-all.
    let base: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(vault.join(BASE_FILE).to_native()).unwrap())
            .unwrap();
    let views = base["views"].as_sequence().unwrap();
    let view_names: Vec<&str> = views
        .iter()
        .filter_map(|v| v["name"].as_str())
        .collect();
    assert_eq!(view_names, vec!["Docs", "Posts", "All content"]);
    assert_eq!(
        views[1]["filters"]["and"][0].as_str().unwrap(),
        "file.folder.startsWith(\"posts\")"
    );
    assert_eq!(views[1]["sort"][0]["property"].as_str().unwrap(), "note.pubDate");
    assert_eq!(views[1]["sort"][0]["direction"].as_str().unwrap(), "DESC");
    // The catch-all spans everything: no folder filter.
    assert!(views[2].get("filters").is_none());

    // Composer: posts slot filled, vault-relative project paths.
    let composer: Json = serde_json::from_str(
        &fs::read_to_string(
            vault
                .join(".obsidian/plugins/astro-composer/data.json")
                .to_native(),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(composer["postsFolder"], Json::from("posts"));
    assert_eq!(composer["configFilePath"], Json::from("../../astro.config.mjs"));
    assert_eq!(composer["terminalProjectRootPath"], Json::from("../.."));

    // SEO: every enabled folder, comma-joined.
    let seo: Json = serde_json::from_str(
        &fs::read_to_string(vault.join(".obsidian/plugins/seo/data.json").to_native()).unwrap(),
    )
    .unwrap();
    assert_eq!(seo["scanDirectories"], Json::from("docs,posts"));

    // The wizard's own snapshot records completion.
    let saved = settings.load().unwrap().unwrap();
    assert!(saved.wizard_completed);
    assert!(saved.applied_at.is_some());
    assert_eq!(saved.content_types.len(), 2);
}

#[test]
fn test_skip_does_not_persist_but_advance_does() {
    let temp = setup_site();
    let vault = NormalizedPath::new(temp.path().join("src/content"));
    let settings = JsonSettingsStore::in_vault(&vault);
    let dispatcher = ToolDispatcher::new(vault.clone(), &NullRegistry);

    let mut session = WizardSession::new(detected_draft(&vault), &settings);
    // Welcome validates trivially; advancing flushes the first snapshot.
    assert_eq!(session.advance(&dispatcher).unwrap(), Transition::Moved(1));
    let after_advance = settings.load().unwrap().unwrap();

    // An in-memory edit followed by a skip reaches the next step without
    // touching the snapshot.
    session.draft_mut().theme = "minimal".to_string();
    assert_eq!(session.skip(), Transition::Moved(2));
    assert_eq!(session.draft().theme, "minimal");
    assert_eq!(settings.load().unwrap().unwrap(), after_advance);

    session.cancel();
    let reopened = settings.load().unwrap().unwrap();
    assert!(!reopened.wizard_completed);
    assert_eq!(reopened.theme, "");
}

#[test]
fn test_one_tool_failure_still_completes_the_wizard() {
    struct BrokenAdapter;
    impl ToolAdapter for BrokenAdapter {
        fn id(&self) -> &str {
            "broken-tool"
        }
        fn synthesize(&self, _ctx: &SynthContext<'_>) -> Option<Json> {
            None
        }
        fn apply(
            &self,
            _ctx: &SynthContext<'_>,
            _registry: &dyn vault_tools::ToolRegistry,
        ) -> vault_tools::Result<()> {
            Err(vault_tools::Error::Registry {
                tool: "broken-tool".to_string(),
                message: "host rejected the settings".to_string(),
            })
        }
    }

    let temp = setup_site();
    let vault = NormalizedPath::new(temp.path().join("src/content"));
    let settings = JsonSettingsStore::in_vault(&vault);
    let dispatcher = ToolDispatcher::with_adapters(
        vault.clone(),
        &NullRegistry,
        vec![Box::new(BrokenAdapter), Box::new(vault_tools::SeoAdapter)],
    );

    let report = run_to_finish(detected_draft(&vault), &settings, &dispatcher);

    assert!(!report.all_ok());
    let failed: Vec<&ToolOutcome> = report.failures().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].tool, "broken-tool");

    // The tool after the broken one still ran.
    assert!(vault.join(".obsidian/plugins/seo/data.json").is_file());
    // Partial success still counts as a completed wizard.
    assert!(settings.load().unwrap().unwrap().wizard_completed);
}

#[test]
fn test_nested_vault_scans_its_own_root() {
    let temp = setup_site();
    // The vault sits inside one content-type folder; the content directory
    // is outside its reach, so detection degrades to the vault root.
    let vault = NormalizedPath::new(temp.path().join("src/content/posts"));
    fs::create_dir_all(vault.join("drafts").to_native()).unwrap();

    let topology = ProjectDetector::new().detect(&vault).unwrap();
    assert_eq!(topology.vault_location, VaultLocation::NestedContent);

    let store = FsDocumentStore::new(vault.clone());
    let types = ContentTypeDetector::new(&store).detect(Some(&topology), &[]);
    let folders: Vec<&str> = types.iter().map(|ct| ct.folder.as_str()).collect();
    assert_eq!(folders, vec!["drafts"]);
}

#[test]
fn test_reopened_wizard_resumes_from_saved_snapshot() {
    let temp = setup_site();
    let vault = NormalizedPath::new(temp.path().join("src/content"));
    let settings = JsonSettingsStore::in_vault(&vault);
    let dispatcher = ToolDispatcher::new(vault.clone(), &NullRegistry);

    let mut draft = detected_draft(&vault);
    draft.theme = "minimal".to_string();
    let mut session = WizardSession::new(draft, &settings);
    assert_eq!(session.advance(&dispatcher).unwrap(), Transition::Moved(1));
    assert_eq!(session.advance(&dispatcher).unwrap(), Transition::Moved(2));
    session.cancel();

    // A new session seeds its draft from the snapshot: detection results
    // and user edits both survive the restart.
    let seeded = DraftConfig::seed(settings.load().unwrap().as_ref());
    assert_eq!(seeded.theme, "minimal");
    assert_eq!(seeded.content_types.len(), 2);
    assert!(seeded.topology.is_some());
}
