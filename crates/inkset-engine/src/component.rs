//! Creative text component
//!
//! Drives one piece of creative text through its lifecycle: wait for the
//! web font, lay out with the effective font, re-lay out when a tracked
//! input changes, and compose the visual description on demand.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

use inkset_font::{FontFamily, FontLoadFailed, FontRegistry, FontTicket};
use inkset_render::{compose, placeholder, to_svg, DefinitionIds, VisualDescription};
use inkset_text::{layout, padding, LayoutKey, LayoutResult, Length, Measurer, StyleConfig, MIN_WIDTH};

use crate::config::EngineConfig;

/// Instances created so far in this process
static INSTANCES: AtomicUsize = AtomicUsize::new(0);

/// Width of one character in the placeholder estimate, in ems
const PLACEHOLDER_EM_PER_CHAR: f32 = 0.6;

/// Font resolution phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontPhase {
    /// The web font has not resolved yet
    Awaiting,
    /// The web font loaded (or none is needed)
    Ready,
    /// The web font failed or timed out; the fallback is used
    Failed,
}

/// Content and style of a creative text
#[derive(Debug, Clone, PartialEq)]
pub struct Props {
    pub text: String,
    pub style: StyleConfig,
}

impl Props {
    pub fn new(text: impl Into<String>, style: StyleConfig) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Everything a layout depends on. A new layout is computed only when
/// these differ from the inputs of the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInputs {
    pub text: String,
    pub font: String,
    pub key: LayoutKey,
}

/// Notifications about font resolution
#[derive(Default)]
pub struct FontCallbacks {
    on_font_load: Option<Box<dyn FnMut()>>,
    on_font_error: Option<Box<dyn FnMut(&FontLoadFailed)>>,
}

impl FontCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per successful resolution
    pub fn on_font_load(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_font_load = Some(Box::new(f));
        self
    }

    /// Called once per failed or timed-out resolution
    pub fn on_font_error(mut self, f: impl FnMut(&FontLoadFailed) + 'static) -> Self {
        self.on_font_error = Some(Box::new(f));
        self
    }
}

struct State {
    props: Props,
    container_width: Option<f32>,
    phase: FontPhase,
    ticket: Option<FontTicket>,
    measurer: Measurer,
    current: Option<(LayoutInputs, LayoutResult)>,
    layouts: usize,
    callbacks: FontCallbacks,
}

impl State {
    fn effective_font(&self) -> String {
        match (self.phase, self.props.style.font_family) {
            (FontPhase::Ready, Some(family)) => family.as_str().to_string(),
            _ => self.props.style.fallback_font.clone(),
        }
    }

    /// The style layout runs with: a responsive text without its own max
    /// width wraps at the container width
    fn layout_style(&self) -> StyleConfig {
        let mut style = self.props.style.clone();
        if style.responsive && style.max_width.is_none() {
            if let Some(width) = self.container_width {
                style.max_width = Some(Length::Px(width));
            }
        }
        style
    }

    fn inputs(&self, style: &StyleConfig) -> LayoutInputs {
        LayoutInputs {
            text: self.props.text.clone(),
            font: self.effective_font(),
            key: style.layout_key(),
        }
    }

    /// Lay out again if any input changed. Nothing is laid out before the
    /// first font resolution.
    fn refresh(&mut self) {
        if self.phase == FontPhase::Awaiting && self.current.is_none() {
            return;
        }

        let style = self.layout_style();
        let inputs = self.inputs(&style);
        if matches!(&self.current, Some((previous, _)) if *previous == inputs) {
            tracing::trace!("Layout inputs unchanged");
            return;
        }

        let result = layout(&inputs.text, &inputs.font, &style, &mut self.measurer);
        self.layouts += 1;
        self.current = Some((inputs, result));
    }

    /// Best-known footprint before the first layout
    fn placeholder_size(&self) -> (u32, u32) {
        let style = self.layout_style();
        let font_size = style.numeric_font_size();
        let padding = padding(style.stroke_width);

        let width = match style.max_width_px() {
            Some(explicit) => explicit.max(MIN_WIDTH),
            None => {
                let estimate = self.props.text.chars().count() as f32
                    * font_size
                    * PLACEHOLDER_EM_PER_CHAR;
                (estimate + padding).max(MIN_WIDTH)
            }
        };
        let height = (font_size + padding).max(font_size * 1.5);
        (width.ceil() as u32, height.ceil() as u32)
    }
}

/// One piece of creative text
pub struct CreativeText {
    state: Rc<RefCell<State>>,
    registry: FontRegistry,
    id: String,
    ids: DefinitionIds,
}

impl CreativeText {
    pub fn new(props: Props, registry: FontRegistry, measurer: Measurer, config: &EngineConfig) -> Self {
        Self::with_callbacks(props, registry, measurer, config, FontCallbacks::default())
    }

    pub fn with_callbacks(
        props: Props,
        registry: FontRegistry,
        measurer: Measurer,
        config: &EngineConfig,
        callbacks: FontCallbacks,
    ) -> Self {
        let n = INSTANCES.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("{}-{}", config.id_prefix, n);
        tracing::debug!("Creating creative text {}", id);

        let text = Self {
            state: Rc::new(RefCell::new(State {
                props,
                container_width: None,
                phase: FontPhase::Awaiting,
                ticket: None,
                measurer,
                current: None,
                layouts: 0,
                callbacks,
            })),
            registry,
            ids: DefinitionIds::for_instance(&id),
            id,
        };
        text.request_font();
        text
    }

    /// Instance id, `<prefix>-<n>`
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn definition_ids(&self) -> &DefinitionIds {
        &self.ids
    }

    pub fn phase(&self) -> FontPhase {
        self.state.borrow().phase
    }

    /// A layout has been computed
    pub fn is_ready(&self) -> bool {
        self.state.borrow().current.is_some()
    }

    /// Family used for measuring and painting right now
    pub fn effective_font(&self) -> String {
        self.state.borrow().effective_font()
    }

    /// The current layout, if any
    pub fn layout(&self) -> Option<LayoutResult> {
        self.state
            .borrow()
            .current
            .as_ref()
            .map(|(_, result)| result.clone())
    }

    /// Number of layouts computed so far
    pub fn layout_count(&self) -> usize {
        self.state.borrow().layouts
    }

    pub fn props(&self) -> Props {
        self.state.borrow().props.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.edit(|props| props.text = text);
    }

    pub fn set_style(&self, style: StyleConfig) {
        self.edit(|props| props.style = style);
    }

    /// Replace the style with one parsed from JSON
    pub fn set_style_json(&self, json: &str) -> crate::Result<()> {
        let style = StyleConfig::from_json(json)?;
        self.set_style(style);
        Ok(())
    }

    /// Apply a batch of changes, then recompute at most once
    pub fn edit(&self, f: impl FnOnce(&mut Props)) {
        let family_changed = {
            let mut state = self.state.borrow_mut();
            let before = state.props.style.font_family;
            f(&mut state.props);
            state.props.style.font_family != before
        };

        if family_changed {
            self.request_font();
        } else {
            self.state.borrow_mut().refresh();
        }
    }

    /// The container was resized. Only responsive texts react.
    pub fn resize_container(&self, width: f32) {
        let mut state = self.state.borrow_mut();
        if state.container_width == Some(width) {
            return;
        }
        state.container_width = Some(width);
        if state.props.style.responsive {
            tracing::trace!("Container of {} resized to {}", self.id, width);
            state.refresh();
        }
    }

    /// Visual description: a placeholder until the first layout exists
    pub fn render(&self) -> VisualDescription {
        let state = self.state.borrow();
        match &state.current {
            Some((_, result)) => compose(&state.props.style, result, &self.ids, &state.props.text),
            None => {
                let (width, height) = state.placeholder_size();
                placeholder(&state.props.style, width, height, &state.props.text)
            }
        }
    }

    pub fn render_svg(&self) -> String {
        to_svg(&self.render())
    }

    /// Request the configured family, dropping any earlier registration
    fn request_font(&self) {
        let (previous, family) = {
            let mut state = self.state.borrow_mut();
            state.phase = FontPhase::Awaiting;
            (state.ticket.take(), state.props.style.font_family)
        };
        if let Some(ticket) = previous {
            tracing::debug!("{} cancelling request for {}", self.id, ticket.family());
            self.registry.cancel(&ticket);
        }

        let Some(family) = family else {
            tracing::debug!("{} needs no web font", self.id);
            let mut state = self.state.borrow_mut();
            state.phase = FontPhase::Ready;
            state.refresh();
            return;
        };

        let on_load = Rc::downgrade(&self.state);
        let on_error = Rc::downgrade(&self.state);
        let ticket = self.registry.request(
            family.as_str(),
            move || resolved(&on_load, family, Ok(())),
            move |error| resolved(&on_error, family, Err(error)),
        );

        let mut state = self.state.borrow_mut();
        if !ticket.is_settled() {
            state.ticket = Some(ticket);
        }
        // Still pending: an existing layout switches to the fallback
        if state.phase == FontPhase::Awaiting {
            state.refresh();
        }
    }
}

impl Drop for CreativeText {
    fn drop(&mut self) {
        let pending = self.state.borrow_mut().ticket.take();
        if let Some(ticket) = pending {
            tracing::trace!("{} dropped with a pending font request", self.id);
            self.registry.cancel(&ticket);
        }
    }
}

/// Font outcome for `family` arrived
fn resolved(state: &Weak<RefCell<State>>, family: FontFamily, outcome: Result<(), FontLoadFailed>) {
    let Some(state) = state.upgrade() else { return };

    {
        let mut state = state.borrow_mut();
        if state.props.style.font_family != Some(family) {
            tracing::trace!("Ignoring outcome for stale family {}", family);
            return;
        }
        state.ticket = None;
        state.phase = match &outcome {
            Ok(()) => FontPhase::Ready,
            Err(_) => FontPhase::Failed,
        };
        tracing::debug!("Font {} resolved: {:?}", family, state.phase);
        state.refresh();
    }

    // Callbacks run without the state borrowed
    match outcome {
        Ok(()) => {
            let callback = state.borrow_mut().callbacks.on_font_load.take();
            if let Some(mut callback) = callback {
                callback();
                state.borrow_mut().callbacks.on_font_load.get_or_insert(callback);
            }
        }
        Err(error) => {
            tracing::warn!("{}; using fallback font", error);
            let callback = state.borrow_mut().callbacks.on_font_error.take();
            if let Some(mut callback) = callback {
                callback(&error);
                state.borrow_mut().callbacks.on_font_error.get_or_insert(callback);
            }
        }
    }
}
