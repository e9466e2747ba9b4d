use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub type PlanId = String;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EducationLevel {
    Sd,
    Smp,
    Sma,
    Other(String),
}

impl EducationLevel {
    /// Valid grades for the level, `None` when the level is not recognized.
    pub fn grade_range(&self) -> Option<RangeInclusive<u8>> {
        match self {
            Self::Sd => Some(1..=6),
            Self::Smp => Some(7..=9),
            Self::Sma => Some(10..=12),
            Self::Other(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Sd => "SD",
            Self::Smp => "SMP",
            Self::Sma => "SMA",
            Self::Other(name) => name.as_str(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Semester {
    Ganjil,
    Genap,
}

impl Semester {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ganjil => "Ganjil",
            Self::Genap => "Genap",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PedagogicalApproach {
    MerdekaCurriculum,
    DeepLearning,
    Curriculum2013,
}

impl PedagogicalApproach {
    /// Approaches built around the student profile expect value flags to be chosen.
    pub fn requires_values(&self) -> bool {
        matches!(self, Self::MerdekaCurriculum | Self::DeepLearning)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MerdekaCurriculum => "Kurikulum Merdeka",
            Self::DeepLearning => "Pembelajaran Mendalam",
            Self::Curriculum2013 => "Kurikulum 2013",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CurriculumValue {
    Faith,
    GlobalDiversity,
    MutualCooperation,
    Independence,
    CriticalReasoning,
    Creativity,
}

impl CurriculumValue {
    pub const ALL: [CurriculumValue; 6] = [
        Self::Faith,
        Self::GlobalDiversity,
        Self::MutualCooperation,
        Self::Independence,
        Self::CriticalReasoning,
        Self::Creativity,
    ];
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurriculumValues {
    pub faith: bool,
    pub global_diversity: bool,
    pub mutual_cooperation: bool,
    pub independence: bool,
    pub critical_reasoning: bool,
    pub creativity: bool,
}

impl CurriculumValues {
    pub fn is_set(&self, value: CurriculumValue) -> bool {
        match value {
            CurriculumValue::Faith => self.faith,
            CurriculumValue::GlobalDiversity => self.global_diversity,
            CurriculumValue::MutualCooperation => self.mutual_cooperation,
            CurriculumValue::Independence => self.independence,
            CurriculumValue::CriticalReasoning => self.critical_reasoning,
            CurriculumValue::Creativity => self.creativity,
        }
    }

    pub fn set(&mut self, value: CurriculumValue, on: bool) {
        match value {
            CurriculumValue::Faith => self.faith = on,
            CurriculumValue::GlobalDiversity => self.global_diversity = on,
            CurriculumValue::MutualCooperation => self.mutual_cooperation = on,
            CurriculumValue::Independence => self.independence = on,
            CurriculumValue::CriticalReasoning => self.critical_reasoning = on,
            CurriculumValue::Creativity => self.creativity = on,
        }
    }

    /// Set flags in declaration order.
    pub fn selected(&self) -> Vec<CurriculumValue> {
        CurriculumValue::ALL
            .into_iter()
            .filter(|v| self.is_set(*v))
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        CurriculumValue::ALL
            .iter()
            .filter(|v| self.is_set(**v))
            .count()
    }
}

/// Prose an educator may type instead of picking options.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProseFields {
    pub objectives: Option<String>,
    pub materials: Option<String>,
    pub activities: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InputRecord {
    pub institution_name: String,
    pub author_name: String,
    pub level: EducationLevel,
    pub grade: u8,
    pub semester: Semester,
    pub subject: String,
    pub theme: String,
    pub sub_theme: String,
    #[serde(default)]
    pub time_allocation: String,
    #[serde(default = "default_session")]
    pub session_number: u32,
    #[serde(default)]
    pub learning_outcomes: String,
    #[serde(default)]
    pub curriculum_values: CurriculumValues,
    pub approach: PedagogicalApproach,
    #[serde(default)]
    pub assessment_options: Vec<String>,
    #[serde(default)]
    pub method_options: Vec<String>,
    #[serde(default)]
    pub partnership_options: Vec<String>,
    #[serde(default)]
    pub environment_options: Vec<String>,
    #[serde(default)]
    pub technology_options: Vec<String>,
    #[serde(default)]
    pub prose: ProseFields,
}

fn default_session() -> u32 {
    1
}

/// Implemented by every top-level part of an [`OutputDocument`].
pub trait Section {
    fn is_blank(&self) -> bool;
}

fn all_blank(items: &[String]) -> bool {
    items.iter().all(|s| s.trim().is_empty())
}

impl Section for Vec<String> {
    fn is_blank(&self) -> bool {
        all_blank(self)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityBlock {
    pub institution_name: String,
    pub author_name: String,
    pub level: String,
    pub phase: String,
    pub grade: u8,
    pub semester: String,
    pub subject: String,
    pub theme: String,
    pub sub_theme: String,
    pub time_allocation: String,
    pub session_number: u32,
}

/// Institution and subject have no fallback, so either one missing leaves the
/// block unusable.
impl Section for IdentityBlock {
    fn is_blank(&self) -> bool {
        self.institution_name.trim().is_empty() || self.subject.trim().is_empty()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetencyPair {
    pub knowledge: String,
    pub skill: String,
}

impl Section for CompetencyPair {
    fn is_blank(&self) -> bool {
        self.knowledge.trim().is_empty() || self.skill.trim().is_empty()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Indicators {
    pub knowledge: Vec<String>,
    pub skill: Vec<String>,
}

impl Section for Indicators {
    fn is_blank(&self) -> bool {
        all_blank(&self.knowledge) || all_blank(&self.skill)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialsByType {
    pub factual: Vec<String>,
    pub conceptual: Vec<String>,
    pub procedural: Vec<String>,
    pub metacognitive: Vec<String>,
}

impl Section for MaterialsByType {
    fn is_blank(&self) -> bool {
        all_blank(&self.factual)
            || all_blank(&self.conceptual)
            || all_blank(&self.procedural)
            || all_blank(&self.metacognitive)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaSources {
    pub media: Vec<String>,
    pub sources: Vec<String>,
}

impl Section for MediaSources {
    fn is_blank(&self) -> bool {
        all_blank(&self.media) || all_blank(&self.sources)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Phase {
    pub name: String,
    pub time_budget: String,
    pub activities: Vec<String>,
}

impl Section for Phase {
    fn is_blank(&self) -> bool {
        self.time_budget.trim().is_empty() || all_blank(&self.activities)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityPlan {
    pub opening: Phase,
    pub core: Phase,
    pub closing: Phase,
}

impl ActivityPlan {
    pub fn phases(&self) -> [&Phase; 3] {
        [&self.opening, &self.core, &self.closing]
    }
}

impl Section for ActivityPlan {
    fn is_blank(&self) -> bool {
        self.phases().iter().any(|p| p.is_blank())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssessmentDomain {
    pub technique: String,
    pub instrument: String,
    pub rubric: Vec<String>,
}

impl Section for AssessmentDomain {
    fn is_blank(&self) -> bool {
        self.technique.trim().is_empty()
            || self.instrument.trim().is_empty()
            || all_blank(&self.rubric)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assessment {
    pub attitude: AssessmentDomain,
    pub knowledge: AssessmentDomain,
    pub skill: AssessmentDomain,
}

impl Section for Assessment {
    fn is_blank(&self) -> bool {
        self.attitude.is_blank() || self.knowledge.is_blank() || self.skill.is_blank()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowUp {
    pub remediation: Vec<String>,
    pub enrichment: Vec<String>,
}

impl Section for FollowUp {
    fn is_blank(&self) -> bool {
        all_blank(&self.remediation) || all_blank(&self.enrichment)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LearningDesign {
    pub approach: String,
    pub methods: Vec<String>,
    pub partnerships: Vec<String>,
    pub environments: Vec<String>,
    pub technologies: Vec<String>,
    pub assessment_focus: Vec<String>,
}

impl Section for LearningDesign {
    fn is_blank(&self) -> bool {
        self.approach.trim().is_empty()
            || all_blank(&self.methods)
            || all_blank(&self.partnerships)
            || all_blank(&self.environments)
            || all_blank(&self.technologies)
            || all_blank(&self.assessment_focus)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TextSource {
    Model,
    Template,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AugmentedText {
    pub text: String,
    pub source: TextSource,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputDocument {
    pub identity: IdentityBlock,
    pub core_competencies: Vec<String>,
    pub competency_pair: CompetencyPair,
    pub indicators: Indicators,
    pub objectives: Vec<String>,
    pub materials: MaterialsByType,
    pub methods: Vec<String>,
    pub media_sources: MediaSources,
    pub activity_plan: ActivityPlan,
    pub assessment: Assessment,
    pub follow_up: FollowUp,
    pub learning_design: LearningDesign,
    pub values_integration: Option<Vec<String>>,
    pub overview: AugmentedText,
}

impl OutputDocument {
    /// Required sections keyed by the field name validation reports against.
    pub fn sections(&self) -> Vec<(&'static str, &dyn Section)> {
        vec![
            ("identity", &self.identity),
            ("core_competencies", &self.core_competencies),
            ("competency_pair", &self.competency_pair),
            ("indicators", &self.indicators),
            ("objectives", &self.objectives),
            ("materials", &self.materials),
            ("methods", &self.methods),
            ("media_sources", &self.media_sources),
            ("activity_plan", &self.activity_plan),
            ("assessment", &self.assessment),
            ("follow_up", &self.follow_up),
            ("learning_design", &self.learning_design),
        ]
    }
}
