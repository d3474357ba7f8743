//! Render diagnostics.
//!
//! The engine never fails a render over bad input; it degrades and
//! reports. Diagnostics flow through an injected sink so the core stays
//! side-effect-free and testable instead of writing to a global logger
//! from deep inside render functions.

/// A non-fatal event observed during rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// A slide carried a layout tag outside the recognized set; the
    /// default layout was used.
    UnknownLayout {
        /// Slide index (document order).
        slide: usize,
        /// The unrecognized tag.
        tag: String,
    },
    /// A requested font weight was substituted.
    FontWeightFallback {
        /// Font family.
        family: String,
        /// Weight the config asked for.
        requested: u16,
        /// Weight actually emitted.
        resolved: u16,
    },
    /// An image source could not be resolved; the raw path was emitted.
    UnresolvedImage {
        /// The source path as written.
        src: String,
    },
    /// A color value failed to parse and a fallback was used.
    MalformedColor {
        /// The value as written.
        value: String,
    },
}

/// Receives render diagnostics.
pub trait DiagnosticSink {
    /// Records one event. Implementations must not panic.
    fn emit(&self, event: RenderEvent);
}

/// Default sink: forwards to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, event: RenderEvent) {
        match &event {
            RenderEvent::UnknownLayout { slide, tag } => {
                log::warn!("slide {slide}: unknown layout '{tag}', using default")
            }
            RenderEvent::FontWeightFallback {
                family,
                requested,
                resolved,
            } => log::debug!("font '{family}': weight {requested} -> {resolved}"),
            RenderEvent::UnresolvedImage { src } => {
                log::debug!("image source left unresolved: {src}")
            }
            RenderEvent::MalformedColor { value } => {
                log::warn!("malformed color value '{value}', using fallback")
            }
        }
    }
}

/// Test sink that collects events into a shared list.
#[derive(Debug, Default)]
pub struct CollectSink {
    events: std::sync::Mutex<Vec<RenderEvent>>,
}

impl CollectSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the collected events.
    pub fn take(&self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events.lock().expect("diagnostics lock"))
    }
}

impl DiagnosticSink for CollectSink {
    fn emit(&self, event: RenderEvent) {
        self.events.lock().expect("diagnostics lock").push(event);
    }
}
