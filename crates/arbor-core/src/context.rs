//! Per-request action context.

/// Layout selection for rendered views.
///
/// A named layout wraps the action's view; `Disabled` returns the view
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Wrap views in the named layout.
    Named(String),
    /// Return views without any layout wrapping.
    Disabled,
}

impl Layout {
    /// Create a named layout.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Whether layout wrapping is enabled.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::Named("default".to_string())
    }
}

/// Context for a single action execution.
///
/// Owned by one dispatcher invocation for the duration of one request.
/// Template and layout start from the dispatcher's configured defaults;
/// hooks may override them per request before the action runs.
#[derive(Debug, Clone)]
pub struct ActionContext {
    action: String,
    args: Vec<String>,
    template: String,
    layout: Layout,
}

impl ActionContext {
    /// Create a new context for the named action.
    pub fn new(
        action: impl Into<String>,
        args: Vec<String>,
        template: impl Into<String>,
        layout: Layout,
    ) -> Self {
        Self {
            action: action.into(),
            args,
            template: template.into(),
            layout,
        }
    }

    /// The resolved action name.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The ordered action arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Get an argument by position.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(|s| s.as_str())
    }

    /// The template used for layout wrapping.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The current layout selection.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Override the template for this request.
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    /// Override the layout for this request.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_accessors() {
        let ctx = ActionContext::new(
            "show",
            vec!["42".to_string()],
            "default",
            Layout::default(),
        );

        assert_eq!(ctx.action(), "show");
        assert_eq!(ctx.args(), &["42".to_string()]);
        assert_eq!(ctx.arg(0), Some("42"));
        assert_eq!(ctx.arg(1), None);
        assert_eq!(ctx.template(), "default");
        assert!(ctx.layout().is_enabled());
    }

    #[test]
    fn test_context_overrides() {
        let mut ctx = ActionContext::new("index", Vec::new(), "default", Layout::default());

        ctx.set_template("admin");
        ctx.set_layout(Layout::Disabled);

        assert_eq!(ctx.template(), "admin");
        assert!(!ctx.layout().is_enabled());
    }

    #[test]
    fn test_layout_default_is_named() {
        assert_eq!(Layout::default(), Layout::Named("default".to_string()));
    }

    #[test]
    fn test_layout_named() {
        let layout = Layout::named("print");
        assert_eq!(layout, Layout::Named("print".to_string()));
        assert!(layout.is_enabled());
    }
}
