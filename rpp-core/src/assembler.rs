use crate::augment::{augment_overview, template_overview};
use crate::domain::{AugmentedText, InputRecord, OutputDocument, PlanId};
use crate::extract::ExtractedTerms;
use crate::logging::{noop_logger, LogEvent, LogLevel, SharedEventLogger};
use crate::metrics::{InMemoryMetrics, SharedMetrics};
use crate::provider::TextGenerator;
use crate::sections;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_AUGMENT_TIMEOUT: Duration = Duration::from_secs(20);

/// Everything the assembler may reach outside the input record. Built by the
/// caller; `generator: None` selects the template-only path.
#[derive(Clone)]
pub struct AssemblyContext {
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub timeout: Duration,
    pub logger: SharedEventLogger,
    pub metrics: SharedMetrics,
    pub log_dir: Option<String>,
}

impl AssemblyContext {
    pub fn new() -> Self {
        Self {
            generator: None,
            timeout: DEFAULT_AUGMENT_TIMEOUT,
            logger: noop_logger(),
            metrics: Arc::new(InMemoryMetrics::new()),
            log_dir: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_logger(mut self, logger: SharedEventLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_metrics(mut self, metrics: SharedMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<String>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub(crate) fn log(&self, event: LogEvent) {
        let event = match &self.log_dir {
            Some(dir) => event.with_log_dir(dir.clone()),
            None => event,
        };
        self.logger.log(event);
    }
}

impl Default for AssemblyContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable label for log correlation; not part of the document. Only
/// `[a-z0-9-]` survives, so the id is safe to use as a file name.
pub fn plan_id(input: &InputRecord) -> PlanId {
    format!(
        "{}-{}-{}-p{}",
        slug(input.level.label(), "lain"),
        input.grade,
        slug(&input.subject, "umum"),
        input.session_number
    )
}

fn slug(text: &str, default: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let joined = mapped
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if joined.is_empty() {
        default.to_string()
    } else {
        joined
    }
}

pub struct Assembler {
    ctx: AssemblyContext,
}

impl Assembler {
    pub fn new(ctx: AssemblyContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &AssemblyContext {
        &self.ctx
    }

    /// Builds a complete document for any well-typed input. Field presence is
    /// not checked here; run the input validator for that.
    pub async fn assemble(&self, input: &InputRecord) -> OutputDocument {
        let plan_id = plan_id(input);
        self.ctx.log(
            LogEvent::new(LogLevel::Info, "assembler.start")
                .with_plan(plan_id.clone())
                .with_field("augment", self.ctx.generator.is_some().to_string()),
        );

        let terms = ExtractedTerms::from_input(input);
        self.ctx.log(
            LogEvent::new(LogLevel::Debug, "assembler.terms")
                .with_plan(plan_id.clone())
                .with_field("theme", terms.theme.clone())
                .with_field("sub_theme", terms.sub_theme.clone())
                .with_field("key_concepts", terms.key_concepts.clone()),
        );

        let overview = augment_overview(&self.ctx, &plan_id, input, &terms).await;
        let document = compose(input, &terms, overview);
        for (name, section) in document.sections() {
            self.ctx.log(
                LogEvent::new(LogLevel::Trace, "assembler.section")
                    .with_plan(plan_id.clone())
                    .with_section(name)
                    .with_field("blank", section.is_blank().to_string()),
            );
        }

        self.ctx.metrics.inc_documents_assembled();
        self.ctx.log(
            LogEvent::new(LogLevel::Info, "assembler.complete")
                .with_plan(plan_id)
                .with_field("objectives", document.objectives.len().to_string())
                .with_field("methods", document.methods.len().to_string()),
        );
        document
    }
}

/// Synchronous path with no generator involved. Equal to what
/// [`Assembler::assemble`] returns for a context without a generator.
pub fn assemble_template_only(input: &InputRecord) -> OutputDocument {
    let terms = ExtractedTerms::from_input(input);
    let overview = template_overview(input, &terms);
    compose(input, &terms, overview)
}

fn compose(input: &InputRecord, terms: &ExtractedTerms, overview: AugmentedText) -> OutputDocument {
    OutputDocument {
        identity: sections::build_identity(input, terms),
        core_competencies: sections::build_core_competencies(input, terms),
        competency_pair: sections::build_competency_pair(input, terms),
        indicators: sections::build_indicators(input, terms),
        objectives: sections::build_objectives(input, terms),
        materials: sections::build_materials(input, terms),
        methods: sections::build_methods(input, terms),
        media_sources: sections::build_media_sources(input, terms),
        activity_plan: sections::build_activity_plan(input, terms),
        assessment: sections::build_assessment(input, terms),
        follow_up: sections::build_follow_up(input, terms),
        learning_design: sections::build_learning_design(input, terms),
        values_integration: sections::build_values_integration(input, terms),
        overview,
    }
}
