use rpp_core::assembler::{plan_id, AssemblyContext, Assembler};
use rpp_core::domain::{
    CurriculumValues, EducationLevel, InputRecord, PedagogicalApproach, ProseFields, Semester,
};
use rpp_core::logging::{
    BufferedEventLogger, EventLogger, FanoutEventLogger, LogEvent, LogLevel, SharedEventLogger,
};
use rpp_core::provider::GenerationError;
use rpp_core::providers::FailingGenerator;
use std::sync::Arc;

fn mk_input() -> InputRecord {
    InputRecord {
        institution_name: "MI Al-Hikmah".to_string(),
        author_name: "Nur Aini".to_string(),
        level: EducationLevel::Sd,
        grade: 5,
        semester: Semester::Genap,
        subject: "Bahasa Indonesia".to_string(),
        theme: "Cerita Rakyat".to_string(),
        sub_theme: "Unsur Intrinsik".to_string(),
        time_allocation: String::new(),
        session_number: 1,
        learning_outcomes: "Mengidentifikasi tokoh dan latar dalam cerita rakyat".to_string(),
        curriculum_values: CurriculumValues {
            global_diversity: true,
            ..Default::default()
        },
        approach: PedagogicalApproach::DeepLearning,
        assessment_options: vec![],
        method_options: vec![],
        partnership_options: vec![],
        environment_options: vec![],
        technology_options: vec![],
        prose: ProseFields::default(),
    }
}

#[test]
fn buffer_is_bounded_and_tracks_sequence() {
    let logger = BufferedEventLogger::new(2, 10);
    for i in 0..3 {
        logger.log(LogEvent::new(LogLevel::Info, format!("e{i}")).with_plan("p"));
    }
    let (last, events) = logger.events_since(0);
    assert_eq!(last, 3);
    assert_eq!(
        events.iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
        vec!["e1", "e2"]
    );
    let (_, none) = logger.events_since(last);
    assert!(none.is_empty());

    let tail = logger.plan_events_tail("p", 2);
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[1].message, "e2");
    assert!(logger.plan_events_tail("other", 5).is_empty());
}

#[tokio::test]
async fn assembler_logs_fallback_and_writes_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Arc::new(BufferedEventLogger::new(100, 100));
    let ctx = AssemblyContext::new()
        .with_generator(Arc::new(FailingGenerator::new(GenerationError::Unavailable)))
        .with_logger(logger.clone())
        .with_log_dir(dir.path().to_string_lossy().to_string());

    let input = mk_input();
    Assembler::new(ctx).assemble(&input).await;

    let id = plan_id(&input);
    let events = logger.plan_events_tail(&id, 100);
    let messages: Vec<&str> = events.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages.first(), Some(&"assembler.start"));
    assert_eq!(messages.last(), Some(&"assembler.complete"));
    let fallback = events
        .iter()
        .find(|e| e.message == "augment.fallback")
        .expect("fallback event");
    assert_eq!(fallback.level, LogLevel::Warn);
    assert_eq!(
        fallback.fields.get("reason").map(String::as_str),
        Some("generator unavailable")
    );

    let written = std::fs::read_to_string(dir.path().join(format!("{id}.events.jsonl"))).unwrap();
    assert_eq!(written.lines().count(), events.len());
}

#[tokio::test]
async fn hostile_subject_stays_inside_log_dir() {
    let root = tempfile::tempdir().unwrap();
    let log_dir = root.path().join("logs");
    let logger = Arc::new(BufferedEventLogger::new(100, 100));
    let ctx = AssemblyContext::new()
        .with_logger(logger.clone())
        .with_log_dir(log_dir.to_string_lossy().to_string());

    let mut input = mk_input();
    input.subject = "/../../escaped".to_string();
    Assembler::new(ctx).assemble(&input).await;

    assert!(log_dir.join("sd-5-escaped-p1.events.jsonl").exists());
    assert!(!root.path().join("escaped-p1.events.jsonl").exists());
    let entries: Vec<_> = std::fs::read_dir(root.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn unsafe_plan_id_is_kept_in_memory_only() {
    let root = tempfile::tempdir().unwrap();
    let log_dir = root.path().join("logs");
    let logger = BufferedEventLogger::new(10, 10);
    logger.log(
        LogEvent::new(LogLevel::Info, "e")
            .with_plan("../outside")
            .with_log_dir(log_dir.to_string_lossy().to_string()),
    );
    assert_eq!(logger.plan_events_tail("../outside", 5).len(), 1);
    assert!(!root.path().join("outside.events.jsonl").exists());
    assert!(!log_dir.exists());
}

#[test]
fn fanout_reaches_every_logger() {
    let a = Arc::new(BufferedEventLogger::new(10, 10));
    let b = Arc::new(BufferedEventLogger::new(10, 10));
    let fanout = FanoutEventLogger::new(vec![
        a.clone() as SharedEventLogger,
        b.clone() as SharedEventLogger,
    ]);
    fanout.log(LogEvent::new(LogLevel::Info, "hello").with_plan("p"));
    assert_eq!(a.events_since(0).1.len(), 1);
    assert_eq!(b.plan_events_tail("p", 5)[0].message, "hello");
    FanoutEventLogger::new(vec![]).log(LogEvent::new(LogLevel::Info, "dropped"));
}

#[tokio::test]
async fn section_events_name_each_section() {
    let logger = Arc::new(BufferedEventLogger::new(200, 200));
    let ctx = AssemblyContext::new().with_logger(logger.clone());
    let input = mk_input();
    let doc = Assembler::new(ctx).assemble(&input).await;

    let sections: Vec<String> = logger
        .plan_events_tail(&plan_id(&input), 200)
        .into_iter()
        .filter(|e| e.message == "assembler.section")
        .filter_map(|e| e.section)
        .collect();
    let expected: Vec<String> = doc.sections().iter().map(|(n, _)| n.to_string()).collect();
    assert_eq!(sections, expected);
}
