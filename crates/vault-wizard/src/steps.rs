//! Wizard step definitions
//!
//! Each step is a validation predicate plus a pure view projection over the
//! draft. Rendering is a projection to `StepView`; a presentation adapter
//! re-invokes it on state change, so `view` must be idempotent and free of
//! side effects.

use crate::config::DraftConfig;

/// Stable step identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Welcome,
    ProjectDetection,
    ContentTypes,
    DefaultContentType,
    FrontmatterMapping,
    Presentation,
    CmsConfig,
    ComposerConfig,
    SeoConfig,
    OptionalPlugins,
    Finalize,
}

/// Pure view model of one step over the current draft.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub title: String,
    pub description: String,
    /// Label/value pairs the presentation layer renders.
    pub fields: Vec<(String, String)>,
}

/// One step of the ordered wizard pipeline.
pub trait WizardStep {
    fn id(&self) -> StepId;
    fn title(&self) -> &str;
    fn description(&self) -> &str;

    /// Project the draft into a view model. Idempotent.
    fn view(&self, _draft: &DraftConfig) -> StepView {
        StepView {
            title: self.title().to_string(),
            description: self.description().to_string(),
            fields: Vec::new(),
        }
    }

    /// Whether the draft satisfies this step's requirements.
    fn validate(&self, draft: &DraftConfig) -> bool;
}

/// The built-in ordered step pipeline.
pub fn builtin_steps() -> Vec<Box<dyn WizardStep>> {
    vec![
        Box::new(WelcomeStep),
        Box::new(ProjectDetectionStep),
        Box::new(ContentTypeStep),
        Box::new(DefaultContentTypeStep),
        Box::new(FrontmatterMappingStep),
        Box::new(PresentationStep),
        Box::new(CmsConfigStep),
        Box::new(ComposerConfigStep),
        Box::new(SeoConfigStep),
        Box::new(OptionalPluginsStep),
        Box::new(FinalizeStep),
    ]
}

pub struct WelcomeStep;

impl WizardStep for WelcomeStep {
    fn id(&self) -> StepId {
        StepId::Welcome
    }
    fn title(&self) -> &str {
        "Welcome"
    }
    fn description(&self) -> &str {
        "Introduce the setup flow"
    }
    fn validate(&self, _draft: &DraftConfig) -> bool {
        true
    }
}

pub struct ProjectDetectionStep;

impl WizardStep for ProjectDetectionStep {
    fn id(&self) -> StepId {
        StepId::ProjectDetection
    }
    fn title(&self) -> &str {
        "Project detection"
    }
    fn description(&self) -> &str {
        "Locate the site project and its configuration file"
    }

    fn view(&self, draft: &DraftConfig) -> StepView {
        let mut fields = Vec::new();
        if let Some(topology) = &draft.topology {
            fields.push(("Project root".to_string(), topology.project_root.to_string()));
            fields.push(("Config file".to_string(), topology.config_file.to_string()));
        }
        StepView {
            title: self.title().to_string(),
            description: self.description().to_string(),
            fields,
        }
    }

    /// Detection may have failed; manual entry passes once both paths are
    /// supplied and exist on disk.
    fn validate(&self, draft: &DraftConfig) -> bool {
        match &draft.topology {
            Some(t) => t.project_root.is_dir() && t.config_file.is_file(),
            None => false,
        }
    }
}

pub struct ContentTypeStep;

impl WizardStep for ContentTypeStep {
    fn id(&self) -> StepId {
        StepId::ContentTypes
    }
    fn title(&self) -> &str {
        "Content types"
    }
    fn description(&self) -> &str {
        "Select and organize the content-type folders"
    }

    fn view(&self, draft: &DraftConfig) -> StepView {
        let fields = draft
            .content_types
            .iter()
            .map(|ct| {
                let state = if ct.enabled { "enabled" } else { "disabled" };
                (ct.name.clone(), format!("{} ({state})", ct.folder))
            })
            .collect();
        StepView {
            title: self.title().to_string(),
            description: self.description().to_string(),
            fields,
        }
    }

    fn validate(&self, draft: &DraftConfig) -> bool {
        draft.enabled_types().next().is_some()
    }
}

pub struct DefaultContentTypeStep;

impl WizardStep for DefaultContentTypeStep {
    fn id(&self) -> StepId {
        StepId::DefaultContentType
    }
    fn title(&self) -> &str {
        "Default content type"
    }
    fn description(&self) -> &str {
        "Choose where new documents land by default"
    }

    /// An explicit choice must point at an enabled type; no choice falls
    /// back to the first enabled type.
    fn validate(&self, draft: &DraftConfig) -> bool {
        match &draft.default_content_type {
            Some(id) => draft.enabled_types().any(|ct| &ct.id == id),
            None => true,
        }
    }
}

pub struct FrontmatterMappingStep;

impl WizardStep for FrontmatterMappingStep {
    fn id(&self) -> StepId {
        StepId::FrontmatterMapping
    }
    fn title(&self) -> &str {
        "Front matter"
    }
    fn description(&self) -> &str {
        "Map front-matter properties per content type"
    }

    fn view(&self, draft: &DraftConfig) -> StepView {
        let fields = draft
            .enabled_types()
            .map(|ct| {
                let mapping = draft.mapping_for(&ct.id);
                (
                    ct.name.clone(),
                    format!(
                        "title: {}, date: {}",
                        mapping.title_or_default(),
                        mapping.date_or_default()
                    ),
                )
            })
            .collect();
        StepView {
            title: self.title().to_string(),
            description: self.description().to_string(),
            fields,
        }
    }

    /// Every enabled type needs a mapping record. Unmapped title/date
    /// inside a record are valid; they resolve to the filename and
    /// creation-time fallbacks.
    fn validate(&self, draft: &DraftConfig) -> bool {
        draft
            .enabled_types()
            .all(|ct| draft.frontmatter.contains_key(&ct.id))
    }
}

pub struct PresentationStep;

impl WizardStep for PresentationStep {
    fn id(&self) -> StepId {
        StepId::Presentation
    }
    fn title(&self) -> &str {
        "Presentation"
    }
    fn description(&self) -> &str {
        "Theme and editing preferences"
    }
    fn validate(&self, _draft: &DraftConfig) -> bool {
        true
    }
}

pub struct CmsConfigStep;

impl WizardStep for CmsConfigStep {
    fn id(&self) -> StepId {
        StepId::CmsConfig
    }
    fn title(&self) -> &str {
        "CMS views"
    }
    fn description(&self) -> &str {
        "Review the generated CMS view list"
    }
    fn validate(&self, _draft: &DraftConfig) -> bool {
        true
    }
}

pub struct ComposerConfigStep;

impl WizardStep for ComposerConfigStep {
    fn id(&self) -> StepId {
        StepId::ComposerConfig
    }
    fn title(&self) -> &str {
        "Composer"
    }
    fn description(&self) -> &str {
        "Review templates and folder wiring for the composer"
    }
    fn validate(&self, _draft: &DraftConfig) -> bool {
        true
    }
}

pub struct SeoConfigStep;

impl WizardStep for SeoConfigStep {
    fn id(&self) -> StepId {
        StepId::SeoConfig
    }
    fn title(&self) -> &str {
        "SEO"
    }
    fn description(&self) -> &str {
        "Review SEO scan directories and properties"
    }
    fn validate(&self, _draft: &DraftConfig) -> bool {
        true
    }
}

pub struct OptionalPluginsStep;

impl WizardStep for OptionalPluginsStep {
    fn id(&self) -> StepId {
        StepId::OptionalPlugins
    }
    fn title(&self) -> &str {
        "Optional plugins"
    }
    fn description(&self) -> &str {
        "Pick a preset or hand-tune the plugin list"
    }
    fn validate(&self, _draft: &DraftConfig) -> bool {
        true
    }
}

pub struct FinalizeStep;

impl WizardStep for FinalizeStep {
    fn id(&self) -> StepId {
        StepId::Finalize
    }
    fn title(&self) -> &str {
        "Finalize"
    }
    fn description(&self) -> &str {
        "Review and apply the configuration"
    }

    fn view(&self, draft: &DraftConfig) -> StepView {
        StepView {
            title: self.title().to_string(),
            description: self.description().to_string(),
            fields: vec![
                ("Preset".to_string(), draft.preset.to_string()),
                (
                    "Theme".to_string(),
                    if draft.theme.is_empty() {
                        "Default".to_string()
                    } else {
                        draft.theme.clone()
                    },
                ),
                (
                    "Content types".to_string(),
                    draft.enabled_types().count().to_string(),
                ),
            ],
        }
    }

    /// The whole draft must be coherent before apply.
    fn validate(&self, draft: &DraftConfig) -> bool {
        ProjectDetectionStep.validate(draft)
            && ContentTypeStep.validate(draft)
            && DefaultContentTypeStep.validate(draft)
            && FrontmatterMappingStep.validate(draft)
    }
}
