//! Compose-boundary extension hooks.
//!
//! Cross-cutting side effects (analytics, host cart events) register here
//! as ordered handler lists invoked synchronously around line-item
//! emission, rather than as ambient global dispatch. Before-hooks run only
//! after commit validation has passed; after-hooks observe the emitted
//! plan.

use core::fmt;

use size_grid_core::ProductId;

use crate::selection::Selection;

use super::composer::LineItemPlan;

/// What a hook gets to see about the commit in flight.
#[derive(Debug, Clone, Copy)]
pub struct ComposeContext<'a> {
    /// The product being committed.
    pub product_id: ProductId,
    /// The validated selection.
    pub selection: &'a Selection,
    /// Whether this commit is a bundle.
    pub bundle: bool,
}

type BeforeHook = Box<dyn Fn(&ComposeContext<'_>)>;
type AfterHook = Box<dyn Fn(&ComposeContext<'_>, &LineItemPlan)>;

/// Ordered hook registrations for the compose boundary.
#[derive(Default)]
pub struct ComposeHooks {
    before: Vec<BeforeHook>,
    after: Vec<AfterHook>,
}

impl ComposeHooks {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler invoked after validation, before emission.
    pub fn on_before(&mut self, hook: impl Fn(&ComposeContext<'_>) + 'static) {
        self.before.push(Box::new(hook));
    }

    /// Register a handler invoked after emission, with the emitted plan.
    pub fn on_after(&mut self, hook: impl Fn(&ComposeContext<'_>, &LineItemPlan) + 'static) {
        self.after.push(Box::new(hook));
    }

    pub(crate) fn run_before(&self, cx: &ComposeContext<'_>) {
        for hook in &self.before {
            hook(cx);
        }
    }

    pub(crate) fn run_after(&self, cx: &ComposeContext<'_>, plan: &LineItemPlan) {
        for hook in &self.after {
            hook(cx, plan);
        }
    }
}

impl fmt::Debug for ComposeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeHooks")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}
