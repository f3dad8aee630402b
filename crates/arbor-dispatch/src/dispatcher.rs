//! Action dispatch and response normalization.

use std::collections::HashMap;

use arbor_core::{ActionContext, DispatchConfig, Layout, Response};
use tracing::{debug, warn};

use crate::action::{Action, ActionOutcome, ActionRegistry};
use crate::error::DispatchError;
use crate::hook::{HookOutcome, NoopHook, RequestHook};
use crate::observe::Observer;
use crate::paths::{resolve_view_path, ViewPath};
use crate::view::{FragmentAccumulator, NoFragments, View, ViewEngine};

/// Event emitted before an action executes.
pub const EVENT_EXECUTING: &str = "dispatch.executing";

/// Dispatches a resolved action and normalizes its result into a
/// canonical [`Response`].
///
/// One dispatcher instance serves one in-flight request at a time; the
/// lifecycle per `execute` call is notify, before-hook, action,
/// after-hook, normalize.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::new(DispatchConfig::default(), engine)
///     .with_action("index", |_ctx: &ActionContext| {
///         Ok(ActionOutcome::View(View::new("home/Index")))
///     });
///
/// let response = dispatcher.execute("index", Vec::new())?;
/// ```
pub struct Dispatcher {
    template: String,
    layout: Layout,
    namespace: String,
    views: HashMap<String, String>,
    registry: ActionRegistry,
    hook: Box<dyn RequestHook>,
    observers: Vec<Box<dyn Observer>>,
    engine: Box<dyn ViewEngine>,
    fragments: Box<dyn FragmentAccumulator>,
}

impl Dispatcher {
    /// Create a dispatcher from configuration and a view engine.
    pub fn new(config: DispatchConfig, engine: impl ViewEngine + 'static) -> Self {
        Self {
            template: config.template,
            layout: config.layout,
            namespace: config.namespace,
            views: config.views,
            registry: ActionRegistry::new(),
            hook: Box::new(NoopHook),
            observers: Vec::new(),
            engine: Box::new(engine),
            fragments: Box::new(NoFragments),
        }
    }

    /// Install a lifecycle hook.
    pub fn with_hook(mut self, hook: impl RequestHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    /// Register an observer for lifecycle notifications.
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Install a legacy fragment accumulator.
    pub fn with_fragments(mut self, fragments: impl FragmentAccumulator + 'static) -> Self {
        self.fragments = Box::new(fragments);
        self
    }

    /// Register an action, builder style.
    pub fn with_action(mut self, name: impl Into<String>, action: impl Action + 'static) -> Self {
        self.registry.register(name, action);
        self
    }

    /// Register an action.
    pub fn register(&mut self, name: impl Into<String>, action: impl Action + 'static) {
        self.registry.register(name, action);
    }

    /// Resolve the default view identifier for an action.
    pub fn view_path(&self, action: &str) -> Result<ViewPath, DispatchError> {
        resolve_view_path(&self.namespace, &self.views, action)
    }

    /// Execute the named action and normalize its result.
    ///
    /// Fails with [`DispatchError::UnknownAction`] when the name is not
    /// registered and [`DispatchError::ActionFailed`] when the action
    /// returns an error; an action failure aborts before the after-hook.
    pub fn execute(&self, action: &str, args: Vec<String>) -> Result<Response, DispatchError> {
        let mut ctx = ActionContext::new(action, args, self.template.clone(), self.layout.clone());

        debug!(action, "executing action");
        self.notify_observers(EVENT_EXECUTING, &ctx);

        let outcome = match self.hook.before(&mut ctx) {
            HookOutcome::Respond(response) => {
                debug!(action, "before-hook short-circuited the action");
                ActionOutcome::Response(response)
            }
            HookOutcome::Continue => {
                let handler = self
                    .registry
                    .resolve(action)
                    .ok_or_else(|| DispatchError::UnknownAction(action.to_string()))?;
                handler.call(&ctx)?
            }
        };

        self.hook.after(&ctx, &outcome);

        self.normalize(&ctx, outcome)
    }

    fn notify_observers(&self, event: &str, ctx: &ActionContext) {
        for observer in &self.observers {
            if let Err(err) = observer.notify(event, ctx) {
                // Non-critical side channel; never blocks the request.
                warn!(event, error = %err, "observer notification failed");
            }
        }
    }

    /// Turn a raw action outcome into the canonical response.
    ///
    /// Priority chain: explicit responses pass through, views render
    /// through the layout, an empty outcome drains legacy fragments, and
    /// anything else coerces generically.
    fn normalize(
        &self,
        ctx: &ActionContext,
        outcome: ActionOutcome,
    ) -> Result<Response, DispatchError> {
        match outcome {
            ActionOutcome::Empty => self.drain_fragments(),
            ActionOutcome::View(view) => self.render_view(ctx, view),
            ActionOutcome::Response(response) => Ok(response),
            ActionOutcome::Value(value) => coerce_value(value),
        }
    }

    fn drain_fragments(&self) -> Result<Response, DispatchError> {
        let pending = self.fragments.pending();
        if pending.is_empty() {
            return Ok(Response::empty());
        }

        let mut content = String::new();
        for view in &pending {
            content.push_str(&self.render(view)?);
        }

        Ok(Response::new(
            200,
            self.fragments.pending_headers(),
            content.into_bytes(),
        ))
    }

    fn render_view(&self, ctx: &ActionContext, view: View) -> Result<Response, DispatchError> {
        let content = self.render(&view)?;

        let body = match ctx.layout() {
            Layout::Named(layout) => self
                .engine
                .wrap_in_layout(layout, ctx.template(), &content)
                .map_err(|e| DispatchError::Render(e.to_string()))?,
            Layout::Disabled => content,
        };

        Ok(Response::new(200, view.headers, body.into_bytes()))
    }

    fn render(&self, view: &View) -> Result<String, DispatchError> {
        self.engine
            .render(view)
            .map_err(|e| DispatchError::Render(e.to_string()))
    }
}

/// Generic coercion for values that are neither views nor responses.
///
/// Strings become the body verbatim; anything else is serialized as JSON.
fn coerce_value(value: serde_json::Value) -> Result<Response, DispatchError> {
    let (body, content_type) = match value {
        serde_json::Value::String(s) => (s.into_bytes(), "text/html"),
        other => (serde_json::to_vec(&other)?, "application/json"),
    };

    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), content_type.to_string());

    Ok(Response::new(200, headers, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::ObserverError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Engine that renders views and layouts with visible markers.
    struct MarkupEngine;

    impl ViewEngine for MarkupEngine {
        fn render(&self, view: &View) -> anyhow::Result<String> {
            Ok(format!("<view:{}>", view.name))
        }

        fn wrap_in_layout(
            &self,
            layout: &str,
            template: &str,
            content: &str,
        ) -> anyhow::Result<String> {
            Ok(format!("<{}:{}>{}</{}>", template, layout, content, layout))
        }
    }

    /// Engine whose render always fails.
    struct BrokenEngine;

    impl ViewEngine for BrokenEngine {
        fn render(&self, _view: &View) -> anyhow::Result<String> {
            anyhow::bail!("template missing")
        }

        fn wrap_in_layout(&self, _: &str, _: &str, _: &str) -> anyhow::Result<String> {
            anyhow::bail!("layout missing")
        }
    }

    struct QueuedFragments {
        views: Vec<View>,
        headers: HashMap<String, String>,
    }

    impl FragmentAccumulator for QueuedFragments {
        fn pending(&self) -> Vec<View> {
            self.views.clone()
        }

        fn pending_headers(&self) -> HashMap<String, String> {
            self.headers.clone()
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(DispatchConfig::default(), MarkupEngine)
    }

    // === Lifecycle Tests ===

    #[test]
    fn test_execute_renders_view_in_layout() {
        let dispatcher = dispatcher().with_action("index", |_: &ActionContext| {
            Ok(ActionOutcome::View(View::new("home/Index")))
        });

        let response = dispatcher.execute("index", Vec::new()).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(
            response.text().unwrap(),
            "<default:default><view:home/Index></default>"
        );
    }

    #[test]
    fn test_execute_layout_disabled_returns_view_verbatim() {
        let config = DispatchConfig::default().with_layout(Layout::Disabled);
        let dispatcher = Dispatcher::new(config, MarkupEngine).with_action(
            "index",
            |_: &ActionContext| Ok(ActionOutcome::View(View::new("home/Index"))),
        );

        let response = dispatcher.execute("index", Vec::new()).unwrap();
        assert_eq!(response.text().unwrap(), "<view:home/Index>");
    }

    #[test]
    fn test_execute_unknown_action() {
        let err = dispatcher().execute("missing", Vec::new()).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownAction(name) if name == "missing"));
    }

    #[test]
    fn test_execute_action_failure_propagates() {
        let after_ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&after_ran);

        struct AfterCounter(Arc<AtomicUsize>);

        impl RequestHook for AfterCounter {
            fn after(&self, _ctx: &ActionContext, _outcome: &ActionOutcome) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let dispatcher = dispatcher()
            .with_hook(AfterCounter(counter))
            .with_action("boom", |_: &ActionContext| {
                Err(anyhow::anyhow!("backend down"))
            });

        let err = dispatcher.execute("boom", Vec::new()).unwrap_err();
        assert!(matches!(err, DispatchError::ActionFailed(_)));
        // Failed is terminal: the after-hook never runs.
        assert_eq!(after_ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_execute_passes_args_to_action() {
        let dispatcher = dispatcher().with_action("show", |ctx: &ActionContext| {
            Ok(ActionOutcome::Value(serde_json::json!(format!(
                "item {}",
                ctx.arg(0).unwrap_or("?")
            ))))
        });

        let response = dispatcher
            .execute("show", vec!["42".to_string()])
            .unwrap();
        assert_eq!(response.text().unwrap(), "item 42");
    }

    // === Hook Tests ===

    #[test]
    fn test_before_hook_short_circuits_action() {
        struct DenyHook;

        impl RequestHook for DenyHook {
            fn before(&self, _ctx: &mut ActionContext) -> HookOutcome {
                HookOutcome::Respond(Response::with_status(403))
            }
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let dispatcher = dispatcher()
            .with_hook(DenyHook)
            .with_action("admin", move |_: &ActionContext| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(ActionOutcome::Empty)
            });

        let response = dispatcher.execute("admin", Vec::new()).unwrap();

        assert_eq!(response.status, 403);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_after_hook_sees_raw_outcome() {
        let seen = Arc::new(Mutex::new(None));

        struct Recorder(Arc<Mutex<Option<ActionOutcome>>>);

        impl RequestHook for Recorder {
            fn after(&self, _ctx: &ActionContext, outcome: &ActionOutcome) {
                *self.0.lock().unwrap() = Some(outcome.clone());
            }
        }

        let dispatcher = dispatcher()
            .with_hook(Recorder(Arc::clone(&seen)))
            .with_action("index", |_: &ActionContext| {
                Ok(ActionOutcome::View(View::new("home/Index")))
            });

        dispatcher.execute("index", Vec::new()).unwrap();

        // The hook receives the pre-normalization view, not the response.
        let outcome = seen.lock().unwrap().take().unwrap();
        assert_eq!(outcome, ActionOutcome::View(View::new("home/Index")));
    }

    #[test]
    fn test_after_hook_runs_on_short_circuit() {
        let after_ran = Arc::new(AtomicUsize::new(0));

        struct ShortCircuit(Arc<AtomicUsize>);

        impl RequestHook for ShortCircuit {
            fn before(&self, _ctx: &mut ActionContext) -> HookOutcome {
                HookOutcome::Respond(Response::with_status(401))
            }

            fn after(&self, _ctx: &ActionContext, _outcome: &ActionOutcome) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let dispatcher = dispatcher().with_hook(ShortCircuit(Arc::clone(&after_ran)));

        dispatcher.execute("anything", Vec::new()).unwrap();
        assert_eq!(after_ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hook_layout_override_applies_to_request() {
        struct DisableLayout;

        impl RequestHook for DisableLayout {
            fn before(&self, ctx: &mut ActionContext) -> HookOutcome {
                ctx.set_layout(Layout::Disabled);
                HookOutcome::Continue
            }
        }

        let dispatcher = dispatcher()
            .with_hook(DisableLayout)
            .with_action("index", |_: &ActionContext| {
                Ok(ActionOutcome::View(View::new("home/Index")))
            });

        let response = dispatcher.execute("index", Vec::new()).unwrap();
        assert_eq!(response.text().unwrap(), "<view:home/Index>");
    }

    // === Observer Tests ===

    #[test]
    fn test_observers_notified_before_execution() {
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);

        let dispatcher = dispatcher()
            .with_observer(move |event: &str, ctx: &ActionContext| {
                assert_eq!(event, EVENT_EXECUTING);
                assert_eq!(ctx.action(), "index");
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .with_action("index", |_: &ActionContext| Ok(ActionOutcome::Empty));

        dispatcher.execute("index", Vec::new()).unwrap();
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_observer_failure_does_not_block_request() {
        let dispatcher = dispatcher()
            .with_observer(|_: &str, _: &ActionContext| {
                Err(ObserverError("listener crashed".to_string()))
            })
            .with_action("index", |_: &ActionContext| Ok(ActionOutcome::Empty));

        let response = dispatcher.execute("index", Vec::new()).unwrap();
        assert_eq!(response.status, 200);
    }

    // === Normalization Tests ===

    #[test]
    fn test_empty_without_fragments_is_blank_200() {
        let dispatcher =
            dispatcher().with_action("index", |_: &ActionContext| Ok(ActionOutcome::Empty));

        let response = dispatcher.execute("index", Vec::new()).unwrap();

        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
        assert!(response.headers.is_empty());
    }

    #[test]
    fn test_empty_with_fragments_concatenates_in_order() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());

        let dispatcher = dispatcher()
            .with_fragments(QueuedFragments {
                views: vec![View::new("legacy/Header"), View::new("legacy/Footer")],
                headers,
            })
            .with_action("index", |_: &ActionContext| Ok(ActionOutcome::Empty));

        let response = dispatcher.execute("index", Vec::new()).unwrap();

        assert_eq!(
            response.text().unwrap(),
            "<view:legacy/Header><view:legacy/Footer>"
        );
        assert_eq!(response.header("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_response_outcome_passes_through_unchanged() {
        let dispatcher = dispatcher().with_action("teapot", |_: &ActionContext| {
            Ok(ActionOutcome::Response(
                Response::with_status(418).with_header("X-Teapot", "short and stout"),
            ))
        });

        let response = dispatcher.execute("teapot", Vec::new()).unwrap();

        assert_eq!(response.status, 418);
        assert_eq!(response.header("X-Teapot"), Some("short and stout"));
    }

    #[test]
    fn test_string_value_coerces_to_html_body() {
        let dispatcher = dispatcher().with_action("raw", |_: &ActionContext| {
            Ok(ActionOutcome::Value(serde_json::json!("<b>hi</b>")))
        });

        let response = dispatcher.execute("raw", Vec::new()).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.text().unwrap(), "<b>hi</b>");
        assert_eq!(response.header("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_structured_value_coerces_to_json_body() {
        let dispatcher = dispatcher().with_action("api", |_: &ActionContext| {
            Ok(ActionOutcome::Value(serde_json::json!({ "ok": true })))
        });

        let response = dispatcher.execute("api", Vec::new()).unwrap();

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&response.body).unwrap(),
            serde_json::json!({ "ok": true })
        );
    }

    #[test]
    fn test_view_headers_carried_onto_response() {
        let dispatcher = dispatcher().with_action("index", |_: &ActionContext| {
            Ok(ActionOutcome::View(
                View::new("home/Index").with_header("X-Robots-Tag", "noindex"),
            ))
        });

        let response = dispatcher.execute("index", Vec::new()).unwrap();
        assert_eq!(response.header("X-Robots-Tag"), Some("noindex"));
    }

    #[test]
    fn test_render_failure_surfaces() {
        let dispatcher = Dispatcher::new(DispatchConfig::default(), BrokenEngine).with_action(
            "index",
            |_: &ActionContext| Ok(ActionOutcome::View(View::new("home/Index"))),
        );

        let err = dispatcher.execute("index", Vec::new()).unwrap_err();
        assert!(matches!(err, DispatchError::Render(_)));
    }

    // === View Path Tests ===

    #[test]
    fn test_view_path_uses_dispatcher_namespace() {
        let dispatcher = Dispatcher::new(
            DispatchConfig::new("app/controllers/account"),
            MarkupEngine,
        );

        let path = dispatcher.view_path("index").unwrap();
        assert_eq!(path.view, "account/Index");
    }

    #[test]
    fn test_view_path_prefers_explicit_mapping() {
        let config =
            DispatchConfig::new("app/controllers/account").with_view("index", "account/Dashboard");
        let dispatcher = Dispatcher::new(config, MarkupEngine);

        assert_eq!(dispatcher.view_path("index").unwrap().view, "account/Dashboard");
    }
}
