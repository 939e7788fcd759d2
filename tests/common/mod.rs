//! Shared integration test helpers for chatmark.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` keeps per-file unused helpers quiet.

#![allow(dead_code)]

use chatmark::diagrams::{
    CompiledDiagram, DiagramCompiler, DiagramError, DiagramQueue, SequentialIdGenerator,
    diagram_channel,
};
use chatmark::dom::Element;
use chatmark::markdown::MarkdownCompiler;
use chatmark::selection::{ControlSize, SelectionEnv, Viewport};
use parking_lot::Mutex;
use std::sync::Arc;

/// Compiles every source to the same small svg; fails on sources
/// containing `FAIL`.
pub struct FakeCompiler;

impl DiagramCompiler for FakeCompiler {
    async fn compile(&self, _language: &str, source: &str) -> Result<CompiledDiagram, DiagramError> {
        if source.contains("FAIL") {
            return Err(DiagramError::Compile("syntax error".into()));
        }
        Ok(CompiledDiagram {
            svg: "<svg viewBox=\"0 0 10 10\"><text>diagram node</text></svg>".to_string(),
        })
    }

    fn bind(&self, placeholder: &mut Element, _diagram: &CompiledDiagram) {
        placeholder.set_attr("data-bound", "true");
    }
}

/// A default compiler wired to a fresh queue with predictable ids.
pub fn compiler_with_queue() -> (MarkdownCompiler, DiagramQueue) {
    let (scheduler, queue) = diagram_channel();
    let compiler = MarkdownCompiler::default()
        .with_scheduler(scheduler)
        .with_id_generator(Arc::new(SequentialIdGenerator::default()));
    (compiler, queue)
}

/// Selection environment with a settable selection and an 800x600 viewport.
pub struct FakeSelectionEnv {
    pub selection: Mutex<String>,
}

impl FakeSelectionEnv {
    pub fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            selection: Mutex::new(text.to_string()),
        })
    }
}

impl SelectionEnv for FakeSelectionEnv {
    fn selected_text(&self) -> String {
        self.selection.lock().clone()
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: 800.0,
            height: 600.0,
        }
    }

    fn control_size(&self) -> ControlSize {
        ControlSize {
            width: 60.0,
            height: 24.0,
        }
    }
}
