use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Style tags the show toggles on elements
pub mod tag {
    pub const NEON_BASE: &str = "neon-base";
    pub const NEON_IN: &str = "neon-in";
    pub const NEON_OUT: &str = "neon-out";
    pub const VISIBLE: &str = "visible";
    pub const SHOW: &str = "show";
    pub const HIDDEN: &str = "hidden";
    pub const DOCK: &str = "dock";
    pub const RUN: &str = "run";
    pub const PLAY: &str = "play";
    pub const PAUSED: &str = "paused";
    pub const CORRECT: &str = "correct";
    pub const WRONG: &str = "wrong";
    pub const SHAKE: &str = "shake";
}

/// Plain snapshot of an element's attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    pub id: String,
    pub tags: BTreeSet<String>,
    pub opacity: f32,
    pub aria_hidden: bool,
    pub text: String,
    /// Inline size set by autofit; wins over `base_font_px`
    pub font_px: Option<f32>,
    /// Size the stylesheet gives the element, if any
    pub base_font_px: Option<f32>,
    pub no_wrap: bool,
    pub disabled: bool,
    pub container_width: Option<f32>,
    pub children: Vec<Element>,
}

impl ElementState {
    fn new(id: String) -> Self {
        Self {
            id,
            tags: BTreeSet::new(),
            opacity: 0.0,
            aria_hidden: true,
            text: String::new(),
            font_px: None,
            base_font_px: None,
            no_wrap: false,
            disabled: false,
            container_width: None,
            children: Vec::new(),
        }
    }
}

/// Shared handle to one displayable region.
///
/// Clones point at the same state: the renderer and every running chain
/// see each other's writes immediately.
#[derive(Debug, Clone)]
pub struct Element {
    inner: Arc<Mutex<ElementState>>,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Element {
    /// A new element, transparent and hidden from assistive tech
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ElementState::new(id.into()))),
        }
    }

    /// A new element that starts perceivable (opacity 1, not aria-hidden)
    pub fn shown(id: impl Into<String>) -> Self {
        let el = Self::new(id);
        el.set_opacity(1.0);
        el.set_hidden(false);
        el
    }

    fn state(&self) -> MutexGuard<'_, ElementState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn id(&self) -> String {
        self.state().id.clone()
    }

    pub fn snapshot(&self) -> ElementState {
        self.state().clone()
    }

    pub fn add_tag(&self, tag: &str) {
        self.state().tags.insert(tag.to_string());
    }

    pub fn remove_tag(&self, tag: &str) {
        self.state().tags.remove(tag);
    }

    pub fn remove_tags(&self, tags: &[&str]) {
        let mut state = self.state();
        for tag in tags {
            state.tags.remove(*tag);
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.state().tags.contains(tag)
    }

    pub fn set_opacity(&self, opacity: f32) {
        self.state().opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn opacity(&self) -> f32 {
        self.state().opacity
    }

    /// Set the accessibility-hidden flag
    pub fn set_hidden(&self, hidden: bool) {
        self.state().aria_hidden = hidden;
    }

    pub fn is_hidden(&self) -> bool {
        self.state().aria_hidden
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.state().text = text.into();
    }

    pub fn push_text(&self, text: &str) {
        self.state().text.push_str(text);
    }

    pub fn text(&self) -> String {
        self.state().text.clone()
    }

    /// The size currently in effect: inline if set, else the stylesheet's
    pub fn font_px(&self) -> Option<f32> {
        let state = self.state();
        state.font_px.or(state.base_font_px)
    }

    pub fn set_font_px(&self, px: f32) {
        self.state().font_px = Some(px);
    }

    pub fn clear_font_px(&self) {
        self.state().font_px = None;
    }

    pub fn set_base_font_px(&self, px: Option<f32>) {
        self.state().base_font_px = px;
    }

    pub fn set_no_wrap(&self, no_wrap: bool) {
        self.state().no_wrap = no_wrap;
    }

    pub fn is_no_wrap(&self) -> bool {
        self.state().no_wrap
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.state().disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.state().disabled
    }

    pub fn set_container_width(&self, width: Option<f32>) {
        self.state().container_width = width;
    }

    pub fn container_width(&self) -> Option<f32> {
        self.state().container_width
    }

    /// Create a child, tag it, and append it after the existing children
    pub fn append_child(&self, id: impl Into<String>, tag: Option<&str>) -> Element {
        let child = Element::shown(id);
        if let Some(tag) = tag {
            child.add_tag(tag);
        }
        self.state().children.push(child.clone());
        child
    }

    pub fn children(&self) -> Vec<Element> {
        self.state().children.clone()
    }

    /// Something a viewer can see right now: on screen or mid-flicker
    pub fn is_perceivable(&self) -> bool {
        let state = self.state();
        if state.tags.contains(tag::NEON_IN) || state.tags.contains(tag::NEON_OUT) {
            return true;
        }
        state.opacity > 0.0 && !state.aria_hidden
    }
}
