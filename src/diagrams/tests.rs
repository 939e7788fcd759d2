use super::*;
use crate::dom::Document;

/// Succeeds with a fixed svg, recording nothing.
struct StaticSvgCompiler;

impl DiagramCompiler for StaticSvgCompiler {
    async fn compile(&self, _language: &str, source: &str) -> Result<CompiledDiagram, DiagramError> {
        Ok(CompiledDiagram {
            svg: format!("<svg><text>{}</text></svg>", source.len()),
        })
    }

    fn bind(&self, placeholder: &mut crate::dom::Element, _diagram: &CompiledDiagram) {
        placeholder.set_attr("data-bound", "yes");
    }
}

fn placeholder_doc(id: &str) -> Document {
    Document::parse(&format!(
        r#"<div class="chatmark-md"><div id="{id}" class="overflow-auto"><pre><code>A--&gt;B</code></pre></div></div>"#
    ))
}

#[test]
fn test_job_target_id_uses_language_prefix() {
    let job = DiagramJob::new("abc".into(), "Mermaid", "A-->B".into());
    assert_eq!(job.target_element_id, "mermaid-abc");
    assert_eq!(job.status, JobStatus::Pending);
}

#[test]
fn test_uuid_ids_are_unique() {
    let generator = UuidIdGenerator;
    let a = generator.next_id();
    let b = generator.next_id();
    assert_ne!(a, b);
    assert_eq!(a.len(), 32);
}

#[test]
fn test_sequential_ids_increase() {
    let generator = SequentialIdGenerator::default();
    assert_eq!(generator.next_id(), "00000000");
    assert_eq!(generator.next_id(), "00000001");
}

#[test]
fn test_registry_matches_case_insensitively() {
    let registry = DiagramRegistry::from_tags(&["mermaid", "diagram", " "]);
    assert!(registry.is_diagram("MERMAID"));
    assert!(registry.is_diagram("diagram"));
    assert!(!registry.is_diagram("rust"));
    assert_eq!(registry.languages().len(), 2);
    assert_eq!(
        registry.find("mermaid").map(|l| l.display_name.as_str()),
        Some("Mermaid")
    );
}

#[test]
fn test_schedule_after_queue_dropped_returns_false() {
    let (scheduler, queue) = diagram_channel();
    drop(queue);
    assert!(!scheduler.schedule(DiagramJob::new("1".into(), "mermaid", String::new())));
}

#[tokio::test]
async fn test_successful_compile_replaces_placeholder() {
    let (scheduler, mut queue) = diagram_channel();
    let job = DiagramJob::new("1".into(), "mermaid", "A-->B".into());
    let target = job.target_element_id.clone();
    assert!(scheduler.schedule(job));

    let mut doc = placeholder_doc(&target);
    let reports = queue.run_tick(&StaticSvgCompiler, &mut doc).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, JobOutcome::Applied);
    assert_eq!(reports[0].job.status, JobStatus::Succeeded);
    let el = doc.find_by_id(&target).expect("placeholder");
    assert_eq!(el.children.len(), 1);
    assert_eq!(el.children[0].as_element().map(|e| e.tag.as_str()), Some("svg"));
    assert_eq!(el.attr("data-bound"), Some("yes"));
    assert_eq!(el.attr(DIAGRAM_STATE_ATTR), Some("rendered"));
}

#[tokio::test]
async fn test_failed_compile_keeps_source_display() {
    let (scheduler, mut queue) = diagram_channel();
    let job = DiagramJob::new("1".into(), "mermaid", "A-->B".into());
    let target = job.target_element_id.clone();
    scheduler.schedule(job);

    let mut doc = placeholder_doc(&target);
    let reports = queue.run_tick(&TextFallbackCompiler, &mut doc).await;

    assert!(matches!(reports[0].outcome, JobOutcome::Failed(_)));
    assert_eq!(reports[0].job.status, JobStatus::Failed);
    let el = doc.find_by_id(&target).expect("placeholder");
    assert_eq!(el.text_content(), "A-->B");
    assert_eq!(el.children[0].as_element().map(|e| e.tag.as_str()), Some("pre"));
}

#[tokio::test]
async fn test_missing_target_is_silent_noop() {
    let (scheduler, mut queue) = diagram_channel();
    scheduler.schedule(DiagramJob::new("gone".into(), "mermaid", "A-->B".into()));

    let mut doc = placeholder_doc("mermaid-other");
    let before = doc.clone();
    let reports = queue.run_tick(&StaticSvgCompiler, &mut doc).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, JobOutcome::TargetMissing);
    assert_eq!(doc, before);
}

#[tokio::test]
async fn test_tick_with_no_jobs_is_empty() {
    let (_scheduler, mut queue) = diagram_channel();
    let mut doc = Document::default();
    assert!(queue.run_tick(&StaticSvgCompiler, &mut doc).await.is_empty());
}

#[tokio::test]
async fn test_native_compiler_rejects_other_languages() {
    let result = NativeMermaidCompiler.compile("plantuml", "@startuml").await;
    assert!(matches!(result, Err(DiagramError::Unsupported(_))));
}

#[test]
fn test_engine_selection() {
    assert!(matches!(
        ConfiguredCompiler::from_engine(chatmark_config::DiagramEngine::TextFallback),
        ConfiguredCompiler::TextFallback(_)
    ));
    assert!(matches!(
        ConfiguredCompiler::from_engine(chatmark_config::DiagramEngine::Native),
        ConfiguredCompiler::Native(_)
    ));
}
