//! Diagram compilers: turn a diagram source into an SVG fragment.

use super::DiagramError;
use crate::dom::Element;
use chatmark_config::DiagramEngine;
use std::future::Future;

/// Output of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDiagram {
    /// SVG markup that replaces the placeholder's children.
    pub svg: String,
}

/// An asynchronous diagram engine.
///
/// Compilation may finish at any later time; a job whose placeholder
/// disappeared meanwhile is dropped by the queue, not by the compiler.
pub trait DiagramCompiler: Send + Sync {
    fn compile(
        &self,
        language: &str,
        source: &str,
    ) -> impl Future<Output = Result<CompiledDiagram, DiagramError>> + Send;

    /// Attach interactive behaviour to a placeholder that just received a
    /// compiled graphic. Engines without interactive output keep the default.
    fn bind(&self, _placeholder: &mut Element, _diagram: &CompiledDiagram) {}
}

/// Mermaid compiled in-process by `mermaid-rs-renderer` on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeMermaidCompiler;

impl DiagramCompiler for NativeMermaidCompiler {
    async fn compile(&self, language: &str, source: &str) -> Result<CompiledDiagram, DiagramError> {
        if !language.eq_ignore_ascii_case("mermaid") {
            return Err(DiagramError::Unsupported(language.to_string()));
        }
        render_mermaid(source).await
    }
}

#[cfg(feature = "mermaid")]
use crate::markdown::normalize::restore_diagram_source;

#[cfg(feature = "mermaid")]
async fn render_mermaid(source: &str) -> Result<CompiledDiagram, DiagramError> {
    // The job carries numeric references for grammar-sensitive punctuation;
    // the native parser reads labels literally, so decode those back first.
    let source = restore_diagram_source(source);
    let svg = tokio::task::spawn_blocking(move || {
        let opts = mermaid_rs_renderer::RenderOptions {
            theme: mermaid_rs_renderer::Theme::modern(),
            layout: mermaid_rs_renderer::LayoutConfig::default(),
        };
        mermaid_rs_renderer::render_with_options(&source, opts)
            .map_err(|e| DiagramError::Compile(e.to_string()))
    })
    .await
    .map_err(|e| DiagramError::Join(e.to_string()))??;

    crate::debug_info!("DIAGRAM", "native mermaid svg generated ({} bytes)", svg.len());
    Ok(CompiledDiagram { svg })
}

#[cfg(not(feature = "mermaid"))]
async fn render_mermaid(_source: &str) -> Result<CompiledDiagram, DiagramError> {
    Err(DiagramError::Unavailable(
        "built without the `mermaid` feature".to_string(),
    ))
}

/// Never compiles: placeholders keep showing the highlighted source.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFallbackCompiler;

impl DiagramCompiler for TextFallbackCompiler {
    async fn compile(&self, language: &str, _source: &str) -> Result<CompiledDiagram, DiagramError> {
        Err(DiagramError::Unavailable(format!(
            "text fallback engine does not compile {language}"
        )))
    }
}

/// The compiler selected by configuration.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredCompiler {
    Native(NativeMermaidCompiler),
    TextFallback(TextFallbackCompiler),
}

impl ConfiguredCompiler {
    /// `Auto` picks the native engine when it is compiled in.
    pub fn from_engine(engine: DiagramEngine) -> Self {
        match engine {
            DiagramEngine::Native => Self::Native(NativeMermaidCompiler),
            DiagramEngine::TextFallback => Self::TextFallback(TextFallbackCompiler),
            DiagramEngine::Auto if cfg!(feature = "mermaid") => Self::Native(NativeMermaidCompiler),
            DiagramEngine::Auto => Self::TextFallback(TextFallbackCompiler),
        }
    }
}

impl DiagramCompiler for ConfiguredCompiler {
    async fn compile(&self, language: &str, source: &str) -> Result<CompiledDiagram, DiagramError> {
        match self {
            Self::Native(c) => c.compile(language, source).await,
            Self::TextFallback(c) => c.compile(language, source).await,
        }
    }

    fn bind(&self, placeholder: &mut Element, diagram: &CompiledDiagram) {
        match self {
            Self::Native(c) => c.bind(placeholder, diagram),
            Self::TextFallback(c) => c.bind(placeholder, diagram),
        }
    }
}
