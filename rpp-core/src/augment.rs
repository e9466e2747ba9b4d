use crate::assembler::AssemblyContext;
use crate::domain::{AugmentedText, InputRecord, TextSource};
use crate::extract::ExtractedTerms;
use crate::logging::{LogEvent, LogLevel};
use crate::provider::{GenerationOptions, GenerationRequest, PromptSpec};
use crate::sections::non_blank_or;

const MAX_OVERVIEW_CHARS: usize = 600;

const SYSTEM_PROMPT: &str = "Anda adalah asisten guru di Indonesia. Tulis satu paragraf singkat \
dalam bahasa Indonesia yang memperkenalkan pelajaran kepada peserta didik. \
Jangan gunakan daftar, judul, atau format markdown.";

pub fn build_prompt(input: &InputRecord, terms: &ExtractedTerms) -> PromptSpec {
    let user = format!(
        "Mata pelajaran: {}\nKelas: {} {}\nTema: {}\nFokus: {}\nCapaian pembelajaran: {}\n\
Tulis gambaran pelajaran yang memotivasi peserta didik.",
        input.subject.trim(),
        input.level.label(),
        input.grade,
        terms.theme,
        terms.key_concepts,
        input.learning_outcomes.trim(),
    );
    PromptSpec {
        system: Some(SYSTEM_PROMPT.to_string()),
        user,
    }
}

/// Deterministic overview used whenever generated text is unavailable.
pub fn template_overview(input: &InputRecord, terms: &ExtractedTerms) -> AugmentedText {
    let subject = non_blank_or(&input.subject, "ini");
    AugmentedText {
        text: format!(
            "Pada pertemuan ini peserta didik mempelajari {} dalam mata pelajaran {} \
dengan tema {}, melalui kegiatan mengamati, berdiskusi, dan menyajikan hasil belajar.",
            terms.key_concepts, subject, terms.theme
        ),
        source: TextSource::Template,
    }
}

/// Asks the configured generator for an overview, once, within the context's
/// timeout. Any failure yields the template overview.
pub async fn augment_overview(
    ctx: &AssemblyContext,
    plan_id: &str,
    input: &InputRecord,
    terms: &ExtractedTerms,
) -> AugmentedText {
    let Some(generator) = ctx.generator.as_ref() else {
        return template_overview(input, terms);
    };

    let request = GenerationRequest {
        prompt: build_prompt(input, terms),
        options: GenerationOptions::default(),
    };
    let provider_id = generator.metadata().id;

    let outcome = tokio::time::timeout(ctx.timeout, generator.generate(request)).await;
    let reason = match outcome {
        Ok(Ok(result)) => match normalize(&result.text) {
            Some(text) => {
                ctx.metrics.record_augmentation_success();
                ctx.log(
                    LogEvent::new(LogLevel::Debug, "augment.success")
                        .with_plan(plan_id)
                        .with_field("provider_id", provider_id.clone())
                        .with_field("latency_ms", result.latency.as_millis().to_string()),
                );
                return AugmentedText {
                    text,
                    source: TextSource::Model,
                };
            }
            None => "empty output".to_string(),
        },
        Ok(Err(e)) => e.to_string(),
        Err(_) => "timed out".to_string(),
    };

    ctx.metrics.record_augmentation_fallback();
    ctx.log(
        LogEvent::new(LogLevel::Warn, "augment.fallback")
            .with_plan(plan_id)
            .with_field("provider_id", provider_id)
            .with_field("reason", reason),
    );
    template_overview(input, terms)
}

/// Collapses whitespace and caps length on a char boundary. `None` when blank.
fn normalize(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    if collapsed.chars().count() <= MAX_OVERVIEW_CHARS {
        return Some(collapsed);
    }
    Some(collapsed.chars().take(MAX_OVERVIEW_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(
            normalize("  Halo\n\nsemua   peserta didik ").as_deref(),
            Some("Halo semua peserta didik")
        );
        assert_eq!(normalize(" \n\t "), None);
    }

    #[test]
    fn normalize_caps_length_on_char_boundary() {
        let long = "é".repeat(700);
        let out = normalize(&long).unwrap();
        assert_eq!(out.chars().count(), 600);
    }
}
