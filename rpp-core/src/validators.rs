use crate::domain::{InputRecord, OutputDocument, Section};
use crate::validation::{Impact, ScoreCard, Severity, ValidationResult};

pub const MISSING_FIELD_PENALTY: u8 = 10;
pub const NO_VALUES_PENALTY: u8 = 20;
pub const FEW_VALUES_PENALTY: u8 = 5;
pub const PROSE_TOO_SHORT_PENALTY: u8 = 15;
pub const PROSE_TOO_LONG_PENALTY: u8 = 2;
pub const GRADE_RANGE_PENALTY: u8 = 20;
pub const APPROACH_MISMATCH_PENALTY: u8 = 5;

pub const EMPTY_SECTION_PENALTY: u8 = 15;
pub const SHORT_OBJECTIVES_PENALTY: u8 = 5;
pub const EMPTY_VALUES_PENALTY: u8 = 20;

pub const PROSE_MIN_WORDS: usize = 10;
pub const PROSE_MAX_WORDS: usize = 500;
pub const OBJECTIVES_MIN_WORDS: usize = 20;
const BROAD_VALUE_COUNT: usize = 3;
const APPROACH_VALUE_COUNT: usize = 2;

pub trait Validator<T: ?Sized>: Send + Sync {
    fn id(&self) -> &str;
    fn validate(&self, target: &T) -> ValidationResult;
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Domain rules over an input record, independent of any generated document.
#[derive(Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator<InputRecord> for InputValidator {
    fn id(&self) -> &str {
        "input"
    }

    fn validate(&self, input: &InputRecord) -> ValidationResult {
        let mut card = ScoreCard::new();

        let required = [
            ("institution_name", "Nama satuan pendidikan", &input.institution_name),
            ("author_name", "Nama penyusun", &input.author_name),
            ("subject", "Mata pelajaran", &input.subject),
            ("theme", "Tema", &input.theme),
            ("sub_theme", "Subtema", &input.sub_theme),
        ];
        for (field, label, value) in required {
            if value.trim().is_empty() {
                card.error(
                    field,
                    format!("{label} wajib diisi"),
                    Severity::Critical,
                    MISSING_FIELD_PENALTY,
                );
            }
        }

        if input.grade == 0 {
            card.error(
                "grade",
                "Kelas wajib diisi",
                Severity::Critical,
                MISSING_FIELD_PENALTY,
            );
        } else if let Some(range) = input.level.grade_range() {
            if !range.contains(&input.grade) {
                card.error(
                    "grade",
                    format!(
                        "Kelas {} tidak sesuai dengan jenjang {} (kelas {}-{})",
                        input.grade,
                        input.level.label(),
                        range.start(),
                        range.end()
                    ),
                    Severity::Critical,
                    GRADE_RANGE_PENALTY,
                );
            }
        }

        // Counted once here and shared by both value rules below.
        let selected_values = input.curriculum_values.selected_count();
        if input.approach.requires_values() {
            if selected_values == 0 {
                card.error(
                    "curriculum_values",
                    format!(
                        "Pendekatan {} memerlukan minimal satu dimensi profil pelajar",
                        input.approach.label()
                    ),
                    Severity::Major,
                    NO_VALUES_PENALTY,
                );
            } else if selected_values < BROAD_VALUE_COUNT {
                card.warning(
                    "curriculum_values",
                    format!(
                        "Baru {selected_values} dimensi profil pelajar dipilih; pertimbangkan untuk memperluas"
                    ),
                    Impact::Low,
                    FEW_VALUES_PENALTY,
                );
            }
            if selected_values < APPROACH_VALUE_COUNT {
                card.warning(
                    "approach",
                    format!(
                        "Pendekatan {} menekankan profil pelajar, tetapi kurang dari {} dimensi dipilih",
                        input.approach.label(),
                        APPROACH_VALUE_COUNT
                    ),
                    Impact::Medium,
                    APPROACH_MISMATCH_PENALTY,
                );
            }
        }

        let prose = [
            ("prose.objectives", "Tujuan pembelajaran", &input.prose.objectives),
            ("prose.materials", "Materi pembelajaran", &input.prose.materials),
            ("prose.activities", "Uraian kegiatan", &input.prose.activities),
        ];
        for (field, label, value) in prose {
            let Some(text) = value.as_deref().filter(|t| !t.trim().is_empty()) else {
                continue;
            };
            let words = word_count(text);
            if words < PROSE_MIN_WORDS {
                card.error(
                    field,
                    format!("{label} terlalu singkat ({words} kata, minimal {PROSE_MIN_WORDS})"),
                    Severity::Major,
                    PROSE_TOO_SHORT_PENALTY,
                );
            } else if words > PROSE_MAX_WORDS {
                card.warning(
                    field,
                    format!("{label} terlalu panjang ({words} kata, maksimal {PROSE_MAX_WORDS})"),
                    Impact::Low,
                    PROSE_TOO_LONG_PENALTY,
                );
            }
        }

        card.finish(input_suggestion)
    }
}

fn input_suggestion(field: &str) -> Option<&'static str> {
    Some(match field {
        "institution_name" => "Lengkapi nama satuan pendidikan sesuai data sekolah.",
        "author_name" => "Cantumkan nama guru penyusun modul ajar.",
        "subject" => "Pilih mata pelajaran yang akan diajarkan.",
        "theme" => "Tentukan tema pembelajaran agar kegiatan lebih terarah.",
        "sub_theme" => "Tentukan subtema yang menjabarkan tema pembelajaran.",
        "grade" => "Sesuaikan kelas dengan jenjang pendidikan yang dipilih.",
        "curriculum_values" => {
            "Pilih minimal tiga dimensi profil pelajar agar karakter yang dikembangkan lebih beragam."
        }
        "approach" => "Selaraskan pendekatan pembelajaran dengan dimensi profil pelajar yang dipilih.",
        "prose.objectives" => {
            "Perluas uraian tujuan pembelajaran dengan kata kerja operasional yang terukur."
        }
        "prose.materials" => "Perinci materi pembelajaran beserta contoh konkret.",
        "prose.activities" => {
            "Uraikan kegiatan pembelajaran secara runtut dari pendahuluan hingga penutup."
        }
        _ => return None,
    })
}

/// Structural audit of a generated document. Every section is checked even
/// when an earlier one has already failed.
#[derive(Default)]
pub struct OutputValidator;

impl OutputValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator<OutputDocument> for OutputValidator {
    fn id(&self) -> &str {
        "output"
    }

    fn validate(&self, document: &OutputDocument) -> ValidationResult {
        let mut card = ScoreCard::new();

        for (field, section) in document.sections() {
            if section.is_blank() {
                card.error(
                    field,
                    format!("Bagian {field} kosong"),
                    Severity::Major,
                    EMPTY_SECTION_PENALTY,
                );
            }
        }

        let objective_words: usize = document.objectives.iter().map(|o| word_count(o)).sum();
        if objective_words < OBJECTIVES_MIN_WORDS {
            card.warning(
                "objectives",
                format!(
                    "Tujuan pembelajaran hanya {objective_words} kata (disarankan minimal {OBJECTIVES_MIN_WORDS})"
                ),
                Impact::Medium,
                SHORT_OBJECTIVES_PENALTY,
            );
        }

        if let Some(values) = &document.values_integration {
            if values.is_blank() {
                card.error(
                    "values_integration",
                    "Integrasi profil pelajar tercantum tetapi kosong",
                    Severity::Critical,
                    EMPTY_VALUES_PENALTY,
                );
            }
        }

        card.finish(output_suggestion)
    }
}

fn output_suggestion(field: &str) -> Option<&'static str> {
    Some(match field {
        "identity" => "Lengkapi identitas modul: satuan pendidikan, mata pelajaran, dan tema.",
        "core_competencies" => "Cantumkan kompetensi inti sesuai jenjang.",
        "competency_pair" => "Rumuskan kompetensi dasar pengetahuan dan keterampilan.",
        "indicators" => "Tambahkan indikator pencapaian untuk pengetahuan dan keterampilan.",
        "objectives" => "Tulis tujuan pembelajaran yang lebih rinci dan terukur.",
        "materials" => "Lengkapi materi faktual, konseptual, prosedural, dan metakognitif.",
        "methods" => "Tambahkan metode pembelajaran yang sesuai dengan mata pelajaran.",
        "media_sources" => "Sebutkan media dan sumber belajar yang digunakan.",
        "activity_plan" => "Lengkapi setiap tahap kegiatan beserta alokasi waktunya.",
        "assessment" => "Lengkapi teknik, instrumen, dan rubrik penilaian.",
        "follow_up" => "Rencanakan kegiatan remedial dan pengayaan.",
        "learning_design" => "Lengkapi pilihan metode, kemitraan, lingkungan, dan teknologi pembelajaran.",
        "values_integration" => "Pilih dimensi profil pelajar yang akan diintegrasikan.",
        _ => return None,
    })
}

pub fn validate_input(input: &InputRecord) -> ValidationResult {
    InputValidator.validate(input)
}

pub fn validate_output(document: &OutputDocument) -> ValidationResult {
    OutputValidator.validate(document)
}
