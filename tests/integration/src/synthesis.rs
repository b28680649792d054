//! Cross-tool synthesis consistency
//!
//! Re-running the whole synthesis must be idempotent where the draft is
//! unchanged, keep identifiers stable across detection runs, and hand
//! every tool the same folder coordinates for the same content type.

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::Value as Json;
use tempfile::TempDir;

use vault_detect::{ContentTypeDetector, FsDocumentStore, ProjectDetector};
use vault_fs::{NormalizedPath, VaultLocation};
use vault_tools::{NullRegistry, SynthContext, ToolDispatcher, BASE_FILE};
use vault_wizard::DraftConfig;

fn setup_vault_at_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/content/posts")).unwrap();
    fs::create_dir_all(root.join("src/content/pages")).unwrap();
    fs::write(root.join("astro.config.mjs"), "export default {};").unwrap();
    fs::write(
        root.join("src/content/posts/a.md"),
        "---\ntitle: A\ndate: 2024-01-01\n---\n",
    )
    .unwrap();
    temp
}

fn detect_draft(vault: &NormalizedPath) -> DraftConfig {
    let store = FsDocumentStore::new(vault.clone());
    let mut draft = DraftConfig::default();
    draft.topology = ProjectDetector::new().detect(vault);
    draft.content_types = ContentTypeDetector::new(&store).detect(draft.topology.as_ref(), &[]);
    for ct in &draft.content_types {
        draft
            .frontmatter
            .insert(ct.id.clone(), Default::default());
    }
    draft
}

#[test]
fn test_vault_at_project_root_uses_full_content_paths() {
    let temp = setup_vault_at_root();
    let vault = NormalizedPath::new(temp.path());

    let draft = detect_draft(&vault);
    assert_eq!(
        draft.topology.as_ref().unwrap().vault_location,
        VaultLocation::Root
    );

    let ctx = SynthContext::new(&draft, vault.clone());
    // Every tool sees the same coordinates for the same folder.
    assert_eq!(ctx.vault_folder("posts"), "src/content/posts");

    ToolDispatcher::new(vault.clone(), &NullRegistry).apply_all(&draft);

    let composer: Json = serde_json::from_str(
        &fs::read_to_string(
            vault
                .join(".obsidian/plugins/astro-composer/data.json")
                .to_native(),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(composer["postsFolder"], Json::from("src/content/posts"));
    assert_eq!(composer["pagesFolder"], Json::from("src/content/pages"));

    let base = fs::read_to_string(vault.join(BASE_FILE).to_native()).unwrap();
    assert!(base.contains("file.folder.startsWith(\"src/content/posts\")"));
}

#[test]
fn test_redetection_keeps_ids_and_user_edits() {
    let temp = setup_vault_at_root();
    let vault = NormalizedPath::new(temp.path());
    let store = FsDocumentStore::new(vault.clone());
    let topology = ProjectDetector::new().detect(&vault);

    let detector = ContentTypeDetector::new(&store);
    let mut first = detector.detect(topology.as_ref(), &[]);

    // The user renames a type and disables another, then a new folder
    // appears before the next run.
    first[0].name = "Articles".to_string();
    first[1].enabled = false;
    fs::create_dir_all(vault.join("src/content/notes").to_native()).unwrap();

    let second = detector.detect(topology.as_ref(), &first);

    assert_eq!(second.len(), 3);
    assert_eq!(second[0].id, first[0].id);
    assert_eq!(second[0].name, "Articles");
    assert!(!second[1].enabled);
    assert_eq!(second[2].folder, "notes");
}

#[test]
fn test_rerunning_synthesis_is_stable_and_keeps_foreign_settings() {
    let temp = setup_vault_at_root();
    let vault = NormalizedPath::new(temp.path());
    let draft = detect_draft(&vault);
    let dispatcher = ToolDispatcher::new(vault.clone(), &NullRegistry);

    dispatcher.apply_all(&draft);

    // The user tweaks a field we do not own, in two different tools.
    let composer_path = vault.join(".obsidian/plugins/astro-composer/data.json");
    let mut composer: Json =
        serde_json::from_str(&fs::read_to_string(composer_path.to_native()).unwrap()).unwrap();
    composer["autoRename"] = Json::from(true);
    fs::write(
        composer_path.to_native(),
        serde_json::to_string_pretty(&composer).unwrap(),
    )
    .unwrap();

    let base_path = vault.join(BASE_FILE);
    let first_base = fs::read_to_string(base_path.to_native()).unwrap();

    dispatcher.apply_all(&draft);

    let composer: Json =
        serde_json::from_str(&fs::read_to_string(composer_path.to_native()).unwrap()).unwrap();
    assert_eq!(composer["autoRename"], Json::from(true));
    assert_eq!(composer["postsFolder"], Json::from("src/content/posts"));

    // Same draft, same base file.
    assert_eq!(fs::read_to_string(base_path.to_native()).unwrap(), first_base);
}
