//! Static curriculum knowledge keyed by education level and subject.
//!
//! Everything here is immutable data. Keyed access goes through [`lookup`],
//! which always yields a value: the entry for the key or the caller's default.

use crate::domain::{CurriculumValue, EducationLevel};

pub type Table<T> = &'static [(&'static str, T)];

/// Total keyed access: exact match on the trimmed key, else `default`.
pub fn lookup<T: Copy>(table: &[(&str, T)], key: &str, default: T) -> T {
    let key = key.trim();
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(default)
}

pub const DEFAULT_THEME: &str = "Pembelajaran Umum";

pub const SUBJECT_THEMES: Table<&str> = &[
    ("Matematika", "Bilangan dan Operasinya"),
    ("Bahasa Indonesia", "Literasi dan Komunikasi"),
    ("Bahasa Inggris", "Everyday Communication"),
    ("IPA", "Makhluk Hidup dan Lingkungannya"),
    ("IPAS", "Alam dan Lingkungan Sekitar"),
    ("IPS", "Kehidupan Sosial dan Ekonomi"),
    ("PPKn", "Pancasila dan Kewarganegaraan"),
    ("Pendidikan Pancasila", "Pancasila dalam Kehidupan Sehari-hari"),
    ("Seni Budaya", "Ekspresi Seni dan Budaya Nusantara"),
    ("PJOK", "Aktivitas Jasmani dan Kebugaran"),
    ("Informatika", "Berpikir Komputasional"),
];

pub const BASE_METHODS: [&str; 4] = [
    "Ceramah interaktif",
    "Tanya jawab",
    "Diskusi kelompok",
    "Penugasan",
];

pub const FALLBACK_METHOD: &[&str] = &["Pembelajaran kontekstual"];

pub const SUBJECT_METHODS: Table<&[&str]> = &[
    (
        "Matematika",
        &["Problem Based Learning", "Demonstrasi dengan alat peraga"],
    ),
    (
        "Bahasa Indonesia",
        &["Pembelajaran berbasis teks", "Bermain peran"],
    ),
    ("Bahasa Inggris", &["Communicative Language Teaching", "Role play"]),
    ("IPA", &["Eksperimen", "Inkuiri terbimbing"]),
    ("IPAS", &["Inkuiri terbimbing", "Observasi lingkungan"]),
    ("IPS", &["Studi kasus", "Project Based Learning"]),
    ("PPKn", &["Studi kasus", "Debat terarah"]),
    ("Pendidikan Pancasila", &["Studi kasus", "Debat terarah"]),
    ("Seni Budaya", &["Demonstrasi", "Praktik berkarya"]),
    ("PJOK", &["Demonstrasi gerak", "Latihan terbimbing"]),
    ("Informatika", &["Unplugged activity", "Project Based Learning"]),
];

static SD_COMPETENCIES: [&str; 4] = [
    "Menerima, menjalankan, dan menghargai ajaran agama yang dianutnya.",
    "Menunjukkan perilaku jujur, disiplin, tanggung jawab, santun, peduli, dan percaya diri dalam berinteraksi dengan keluarga, teman, guru, dan tetangganya.",
    "Memahami pengetahuan faktual dengan cara mengamati, menanya, dan mencoba berdasarkan rasa ingin tahu tentang dirinya, makhluk ciptaan Tuhan, serta benda-benda yang dijumpainya di rumah dan di sekolah.",
    "Menyajikan pengetahuan faktual dalam bahasa yang jelas, sistematis, dan logis, dalam karya yang estetis, serta dalam tindakan yang mencerminkan perilaku anak beriman dan berakhlak mulia.",
];

static SMP_COMPETENCIES: [&str; 4] = [
    "Menghargai dan menghayati ajaran agama yang dianutnya.",
    "Menghargai dan menghayati perilaku jujur, disiplin, tanggung jawab, peduli, santun, dan percaya diri dalam berinteraksi secara efektif dengan lingkungan sosial dan alam.",
    "Memahami pengetahuan faktual, konseptual, dan prosedural berdasarkan rasa ingin tahunya tentang ilmu pengetahuan, teknologi, seni, dan budaya terkait fenomena yang tampak mata.",
    "Mencoba, mengolah, dan menyaji dalam ranah konkret dan ranah abstrak sesuai dengan yang dipelajari di sekolah dan sumber lain yang sama dalam sudut pandang teori.",
];

static SMA_COMPETENCIES: [&str; 4] = [
    "Menghayati dan mengamalkan ajaran agama yang dianutnya.",
    "Menunjukkan perilaku jujur, disiplin, tanggung jawab, peduli, santun, responsif, dan proaktif sebagai bagian dari solusi atas berbagai permasalahan bangsa.",
    "Memahami, menerapkan, dan menganalisis pengetahuan faktual, konseptual, prosedural, dan metakognitif berdasarkan rasa ingin tahunya tentang ilmu pengetahuan, teknologi, seni, budaya, dan humaniora.",
    "Mengolah, menalar, dan menyaji dalam ranah konkret dan ranah abstrak terkait pengembangan dari yang dipelajarinya di sekolah secara mandiri, serta mampu menggunakan metode sesuai kaidah keilmuan.",
];

/// Four statements per level; unrecognized levels use the SD table.
pub fn core_competencies(level: &EducationLevel) -> &'static [&'static str; 4] {
    match level {
        EducationLevel::Sd | EducationLevel::Other(_) => &SD_COMPETENCIES,
        EducationLevel::Smp => &SMP_COMPETENCIES,
        EducationLevel::Sma => &SMA_COMPETENCIES,
    }
}

/// Learning phase ("fase") of the Merdeka curriculum for a level/grade pair.
pub fn learning_phase(level: &EducationLevel, grade: u8) -> &'static str {
    match (level, grade) {
        (EducationLevel::Sd, 1..=2) => "Fase A",
        (EducationLevel::Sd, 3..=4) => "Fase B",
        (EducationLevel::Sd, 5..=6) => "Fase C",
        (EducationLevel::Smp, _) => "Fase D",
        (EducationLevel::Sma, 10) => "Fase E",
        (EducationLevel::Sma, _) => "Fase F",
        _ => "Fase A",
    }
}

pub fn value_description(value: CurriculumValue) -> &'static str {
    match value {
        CurriculumValue::Faith => {
            "Beriman, bertakwa kepada Tuhan Yang Maha Esa, dan berakhlak mulia"
        }
        CurriculumValue::GlobalDiversity => "Berkebinekaan global",
        CurriculumValue::MutualCooperation => "Bergotong royong",
        CurriculumValue::Independence => "Mandiri",
        CurriculumValue::CriticalReasoning => "Bernalar kritis",
        CurriculumValue::Creativity => "Kreatif",
    }
}

/// Dimensions woven in when the approach expects values but none were chosen.
pub const DEFAULT_VALUES: [CurriculumValue; 2] = [
    CurriculumValue::CriticalReasoning,
    CurriculumValue::Independence,
];

pub const DEFAULT_TIME_ALLOCATION: &str = "2 x 35 menit";

pub const OPENING_BUDGET: &str = "10 menit";
pub const CORE_BUDGET: &str = "50 menit";
pub const CLOSING_BUDGET: &str = "10 menit";

pub struct AssessmentTemplate {
    pub technique: &'static str,
    pub instrument: &'static str,
    pub rubric: &'static [&'static str],
}

pub const ATTITUDE_ASSESSMENT: AssessmentTemplate = AssessmentTemplate {
    technique: "Observasi",
    instrument: "Jurnal perkembangan sikap",
    rubric: &[
        "4 = Sangat baik: selalu menunjukkan sikap yang diharapkan",
        "3 = Baik: sering menunjukkan sikap yang diharapkan",
        "2 = Cukup: kadang-kadang menunjukkan sikap yang diharapkan",
        "1 = Perlu bimbingan: belum menunjukkan sikap yang diharapkan",
    ],
};

pub const KNOWLEDGE_ASSESSMENT: AssessmentTemplate = AssessmentTemplate {
    technique: "Tes tertulis",
    instrument: "Soal pilihan ganda dan uraian",
    rubric: &[
        "Kisi-kisi: 60% soal pemahaman konsep",
        "Kisi-kisi: 40% soal penerapan dan analisis",
        "Nilai akhir = skor perolehan / skor maksimal x 100",
    ],
};

pub const SKILL_ASSESSMENT: AssessmentTemplate = AssessmentTemplate {
    technique: "Unjuk kerja dan produk",
    instrument: "Rubrik penilaian kinerja",
    rubric: &[
        "Ketepatan prosedur (skor 1-4)",
        "Kelengkapan hasil kerja (skor 1-4)",
        "Kemampuan mempresentasikan hasil (skor 1-4)",
    ],
};

pub const DEFAULT_METHOD_OPTION: &str = "Diskusi kelompok terbimbing";
pub const DEFAULT_PARTNERSHIP: &str = "Orang tua sebagai pendamping belajar di rumah";
pub const DEFAULT_ENVIRONMENT: &str = "Ruang kelas yang mendukung kerja kelompok";
pub const DEFAULT_TECHNOLOGY: &str = "Tayangan presentasi digital";
pub const DEFAULT_ASSESSMENT_FOCUS: &str = "Asesmen formatif selama proses pembelajaran";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_exact_trimmed_key() {
        assert_eq!(
            lookup(SUBJECT_THEMES, " Matematika ", DEFAULT_THEME),
            "Bilangan dan Operasinya"
        );
    }

    #[test]
    fn lookup_falls_back_for_unknown_or_differently_cased_key() {
        assert_eq!(lookup(SUBJECT_THEMES, "Astronomi", DEFAULT_THEME), DEFAULT_THEME);
        assert_eq!(lookup(SUBJECT_THEMES, "matematika", DEFAULT_THEME), DEFAULT_THEME);
        assert_eq!(lookup(SUBJECT_METHODS, "", FALLBACK_METHOD), FALLBACK_METHOD);
    }

    #[test]
    fn unknown_level_uses_sd_competencies() {
        let other = EducationLevel::Other("Paket C".to_string());
        assert_eq!(core_competencies(&other), core_competencies(&EducationLevel::Sd));
        assert_ne!(
            core_competencies(&EducationLevel::Sma),
            core_competencies(&EducationLevel::Sd)
        );
    }

    #[test]
    fn phases_follow_grade_bands() {
        assert_eq!(learning_phase(&EducationLevel::Sd, 3), "Fase B");
        assert_eq!(learning_phase(&EducationLevel::Smp, 8), "Fase D");
        assert_eq!(learning_phase(&EducationLevel::Sma, 11), "Fase F");
    }
}
