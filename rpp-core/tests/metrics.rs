use rpp_core::assembler::{AssemblyContext, Assembler};
use rpp_core::domain::{
    CurriculumValues, EducationLevel, InputRecord, PedagogicalApproach, ProseFields, Semester,
};
use rpp_core::metrics::{InMemoryMetrics, Metrics, MetricsSnapshot};
use rpp_core::provider::GenerationError;
use rpp_core::providers::{FailingGenerator, MockGenerator};
use rpp_core::validators::validate_input;
use std::sync::Arc;

fn mk_input(grade: u8) -> InputRecord {
    InputRecord {
        institution_name: "SMA Negeri 3 Yogyakarta".to_string(),
        author_name: "Agus Pratama".to_string(),
        level: EducationLevel::Sma,
        grade,
        semester: Semester::Ganjil,
        subject: "Informatika".to_string(),
        theme: "Algoritma".to_string(),
        sub_theme: "Pengurutan data".to_string(),
        time_allocation: "2 x 45 menit".to_string(),
        session_number: 3,
        learning_outcomes: "Menerapkan algoritma pengurutan sederhana pada data nyata".to_string(),
        curriculum_values: CurriculumValues {
            critical_reasoning: true,
            creativity: true,
            independence: true,
            ..Default::default()
        },
        approach: PedagogicalApproach::MerdekaCurriculum,
        assessment_options: vec![],
        method_options: vec![],
        partnership_options: vec![],
        environment_options: vec![],
        technology_options: vec![],
        prose: ProseFields::default(),
    }
}

#[test]
fn snapshot_starts_at_zero() {
    assert_eq!(InMemoryMetrics::new().snapshot(), MetricsSnapshot::default());
}

#[tokio::test]
async fn metrics_count_assembly_and_augmentation() {
    let metrics = Arc::new(InMemoryMetrics::new());

    let ok = Assembler::new(
        AssemblyContext::new()
            .with_generator(Arc::new(MockGenerator::new("mock", "Pengantar pelajaran.")))
            .with_metrics(metrics.clone()),
    );
    let failing = Assembler::new(
        AssemblyContext::new()
            .with_generator(Arc::new(FailingGenerator::new(GenerationError::Timeout)))
            .with_metrics(metrics.clone()),
    );
    let plain = Assembler::new(AssemblyContext::new().with_metrics(metrics.clone()));

    ok.assemble(&mk_input(10)).await;
    ok.assemble(&mk_input(11)).await;
    failing.assemble(&mk_input(12)).await;
    plain.assemble(&mk_input(12)).await;

    let s = metrics.snapshot();
    assert_eq!(s.documents_assembled, 4);
    assert_eq!(s.augmentation_success, 2);
    assert_eq!(s.augmentation_fallback, 1);
}

#[test]
fn metrics_record_validation_outcomes() {
    let metrics = InMemoryMetrics::new();
    for grade in [10, 11, 5] {
        metrics.record_validation(validate_input(&mk_input(grade)).is_valid);
    }
    let s = metrics.snapshot();
    assert_eq!(s.validations_passed, 2);
    assert_eq!(s.validations_failed, 1);
}
