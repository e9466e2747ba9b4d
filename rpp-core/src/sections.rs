//! One builder per lesson-plan section.
//!
//! Builders read only the input record, the static knowledge tables and the
//! [`ExtractedTerms`] computed up front. They never fail: missing optional
//! input is replaced by a default so every list comes back non-empty.

use crate::domain::{
    ActivityPlan, Assessment, AssessmentDomain, CompetencyPair, IdentityBlock, Indicators,
    InputRecord, LearningDesign, MaterialsByType, MediaSources, Phase, FollowUp,
};
use crate::extract::ExtractedTerms;
use crate::knowledge::{
    self, lookup, AssessmentTemplate, BASE_METHODS, FALLBACK_METHOD, SUBJECT_METHODS,
};

pub(crate) fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

fn subject(input: &InputRecord) -> &str {
    non_blank_or(&input.subject, "pelajaran ini")
}

/// Keeps the non-blank options, or the single default when none remain.
fn options_or(options: &[String], default: &str) -> Vec<String> {
    let picked: Vec<String> = options
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if picked.is_empty() {
        vec![default.to_string()]
    } else {
        picked
    }
}

pub fn build_identity(input: &InputRecord, terms: &ExtractedTerms) -> IdentityBlock {
    IdentityBlock {
        institution_name: input.institution_name.trim().to_string(),
        author_name: input.author_name.trim().to_string(),
        level: input.level.label().to_string(),
        phase: knowledge::learning_phase(&input.level, input.grade).to_string(),
        grade: input.grade,
        semester: input.semester.label().to_string(),
        subject: input.subject.trim().to_string(),
        theme: non_blank_or(&input.theme, &terms.theme).to_string(),
        sub_theme: non_blank_or(&input.sub_theme, &terms.sub_theme).to_string(),
        time_allocation: non_blank_or(&input.time_allocation, knowledge::DEFAULT_TIME_ALLOCATION)
            .to_string(),
        session_number: input.session_number,
    }
}

pub fn build_core_competencies(input: &InputRecord, _terms: &ExtractedTerms) -> Vec<String> {
    knowledge::core_competencies(&input.level)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn build_competency_pair(input: &InputRecord, terms: &ExtractedTerms) -> CompetencyPair {
    CompetencyPair {
        knowledge: format!(
            "3.{} Memahami {} pada materi {}",
            input.session_number, terms.key_concepts, terms.sub_theme
        ),
        skill: format!(
            "4.{} Menyajikan hasil penerapan {} dalam pemecahan masalah {}",
            input.session_number,
            terms.key_concepts,
            subject(input)
        ),
    }
}

pub fn build_indicators(input: &InputRecord, terms: &ExtractedTerms) -> Indicators {
    let n = input.session_number;
    let key = &terms.key_concepts;
    Indicators {
        knowledge: vec![
            format!("3.{n}.1 Menjelaskan pengertian {key}"),
            format!("3.{n}.2 Mengidentifikasi contoh {key} dalam kehidupan sehari-hari"),
            format!("3.{n}.3 Menganalisis hubungan {key} dengan {}", terms.sub_theme),
        ],
        skill: vec![
            format!("4.{n}.1 Mempraktikkan langkah-langkah {key}"),
            format!("4.{n}.2 Mempresentasikan hasil kerja tentang {key}"),
        ],
    }
}

/// Three sentences from a fixed template family; never blank.
pub fn build_objectives(input: &InputRecord, terms: &ExtractedTerms) -> Vec<String> {
    let key = &terms.key_concepts;
    let subject = subject(input);
    vec![
        format!("Melalui kegiatan mengamati, peserta didik dapat menjelaskan {key} dengan tepat."),
        format!(
            "Melalui diskusi kelompok, peserta didik dapat menerapkan {key} dalam konteks {subject} secara mandiri."
        ),
        format!(
            "Melalui penugasan, peserta didik dapat menyajikan hasil pemahaman tentang {key} pada mata pelajaran {subject} dengan percaya diri."
        ),
    ]
}

pub fn build_materials(input: &InputRecord, terms: &ExtractedTerms) -> MaterialsByType {
    let key = &terms.key_concepts;
    MaterialsByType {
        factual: vec![
            format!("Contoh nyata {key} di lingkungan sekitar"),
            format!("Istilah penting pada tema {}", terms.theme),
        ],
        conceptual: vec![format!("Definisi dan ciri-ciri {key}")],
        procedural: vec![format!(
            "Langkah-langkah menerapkan {key} dalam soal {}",
            subject(input)
        )],
        metacognitive: vec![
            "Refleksi strategi belajar yang paling membantu pemahaman".to_string(),
        ],
    }
}

/// Base methods followed by the subject's own methods, or the fallback method.
pub fn build_methods(input: &InputRecord, _terms: &ExtractedTerms) -> Vec<String> {
    let specific = lookup(SUBJECT_METHODS, &input.subject, FALLBACK_METHOD);
    BASE_METHODS
        .iter()
        .chain(specific.iter())
        .map(|m| m.to_string())
        .collect()
}

pub fn build_media_sources(input: &InputRecord, terms: &ExtractedTerms) -> MediaSources {
    let mut media = vec![
        "Papan tulis dan spidol".to_string(),
        "Lembar Kerja Peserta Didik (LKPD)".to_string(),
    ];
    media.extend(
        input
            .technology_options
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    );
    let subject = subject(input);
    MediaSources {
        media,
        sources: vec![
            format!("Buku Siswa {subject} Kelas {}", input.grade),
            format!("Buku Panduan Guru {subject} Kelas {}", input.grade),
            format!("Sumber belajar daring tentang {}", terms.theme),
        ],
    }
}

/// Phase budgets are fixed literals regardless of the requested allocation.
pub fn build_activity_plan(input: &InputRecord, terms: &ExtractedTerms) -> ActivityPlan {
    let key = &terms.key_concepts;
    let mut core_activities = vec![
        format!("Mengamati: peserta didik mengamati contoh {key} yang disajikan guru"),
        format!("Menanya: peserta didik mengajukan pertanyaan tentang {key}"),
        "Mengumpulkan informasi: peserta didik berdiskusi dalam kelompok menggunakan LKPD"
            .to_string(),
        format!("Menalar: kelompok menghubungkan {key} dengan {}", terms.sub_theme),
        "Mengomunikasikan: perwakilan kelompok mempresentasikan hasil diskusi".to_string(),
    ];
    if let Some(env) = input.environment_options.iter().find(|e| !e.trim().is_empty()) {
        core_activities.push(format!("Kegiatan eksplorasi di {}", env.trim()));
    }

    ActivityPlan {
        opening: Phase {
            name: "Pendahuluan".to_string(),
            time_budget: knowledge::OPENING_BUDGET.to_string(),
            activities: vec![
                "Guru membuka pelajaran dengan salam dan doa bersama".to_string(),
                "Guru memeriksa kehadiran peserta didik".to_string(),
                format!("Apersepsi: guru mengaitkan materi sebelumnya dengan {}", terms.theme),
                "Guru menyampaikan tujuan pembelajaran".to_string(),
            ],
        },
        core: Phase {
            name: "Kegiatan Inti".to_string(),
            time_budget: knowledge::CORE_BUDGET.to_string(),
            activities: core_activities,
        },
        closing: Phase {
            name: "Penutup".to_string(),
            time_budget: knowledge::CLOSING_BUDGET.to_string(),
            activities: vec![
                "Peserta didik bersama guru menyimpulkan pembelajaran".to_string(),
                "Guru memberikan umpan balik dan refleksi".to_string(),
                "Guru menyampaikan rencana pertemuan berikutnya".to_string(),
                "Pelajaran ditutup dengan doa dan salam".to_string(),
            ],
        },
    }
}

fn assessment_domain(template: &AssessmentTemplate) -> AssessmentDomain {
    AssessmentDomain {
        technique: template.technique.to_string(),
        instrument: template.instrument.to_string(),
        rubric: template.rubric.iter().map(|s| s.to_string()).collect(),
    }
}

/// Static per domain; subject and grade do not change it.
pub fn build_assessment(_input: &InputRecord, _terms: &ExtractedTerms) -> Assessment {
    Assessment {
        attitude: assessment_domain(&knowledge::ATTITUDE_ASSESSMENT),
        knowledge: assessment_domain(&knowledge::KNOWLEDGE_ASSESSMENT),
        skill: assessment_domain(&knowledge::SKILL_ASSESSMENT),
    }
}

pub fn build_follow_up(_input: &InputRecord, terms: &ExtractedTerms) -> FollowUp {
    let key = &terms.key_concepts;
    FollowUp {
        remediation: vec![
            format!("Bimbingan individu tentang {key} bagi peserta didik yang belum tuntas"),
            "Pemberian soal latihan tambahan dengan tingkat kesulitan bertahap".to_string(),
        ],
        enrichment: vec![
            format!("Tugas proyek pengembangan {key} bagi peserta didik yang sudah tuntas"),
            format!("Membaca sumber tambahan tentang {}", terms.theme),
        ],
    }
}

pub fn build_learning_design(input: &InputRecord, _terms: &ExtractedTerms) -> LearningDesign {
    LearningDesign {
        approach: input.approach.label().to_string(),
        methods: options_or(&input.method_options, knowledge::DEFAULT_METHOD_OPTION),
        partnerships: options_or(&input.partnership_options, knowledge::DEFAULT_PARTNERSHIP),
        environments: options_or(&input.environment_options, knowledge::DEFAULT_ENVIRONMENT),
        technologies: options_or(&input.technology_options, knowledge::DEFAULT_TECHNOLOGY),
        assessment_focus: options_or(
            &input.assessment_options,
            knowledge::DEFAULT_ASSESSMENT_FOCUS,
        ),
    }
}

/// `None` when no value is selected and the approach does not ask for any.
pub fn build_values_integration(
    input: &InputRecord,
    _terms: &ExtractedTerms,
) -> Option<Vec<String>> {
    let mut selected = input.curriculum_values.selected();
    if selected.is_empty() {
        if !input.approach.requires_values() {
            return None;
        }
        selected = knowledge::DEFAULT_VALUES.to_vec();
    }
    Some(
        selected
            .into_iter()
            .map(|v| knowledge::value_description(v).to_string())
            .collect(),
    )
}
