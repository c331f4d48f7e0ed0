//! The reversible command abstraction recorded by [`CommandHistory`](super::CommandHistory).

use std::borrow::Cow;

use crate::constants::UNNAMED_COMMAND_LABEL;

/// A reversible unit of work.
///
/// `apply` performs (or re-performs) the action, `revert` undoes it. The
/// history never inspects what a command touches; it only calls these two
/// methods in the right order. Failures are returned to whoever drove the
/// history and are never retried or rolled back.
pub trait Command {
    /// Error produced when the command can't be applied or reverted
    type Error;

    /// Perform the action (used for the initial execution and for redo)
    fn apply(&mut self) -> Result<(), Self::Error>;

    /// Undo the action
    fn revert(&mut self) -> Result<(), Self::Error>;

    /// Short human readable name, shown in undo/redo menus and logs
    fn label(&self) -> &str {
        UNNAMED_COMMAND_LABEL
    }
}

impl<C: Command + ?Sized> Command for Box<C> {
    type Error = C::Error;

    fn apply(&mut self) -> Result<(), Self::Error> {
        (**self).apply()
    }

    fn revert(&mut self) -> Result<(), Self::Error> {
        (**self).revert()
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

/// A command built from a pair of closures sharing captured state.
///
/// ```ignore
/// let value = Arc::new(AtomicI64::new(0));
/// let (a, r) = (value.clone(), value.clone());
/// let command = FnCommand::new(
///     move || { a.fetch_add(5, Ordering::SeqCst); Ok::<_, CommandError>(()) },
///     move || { r.fetch_sub(5, Ordering::SeqCst); Ok(()) },
/// )
/// .with_label("add 5");
/// ```
pub struct FnCommand<A, R> {
    label: Cow<'static, str>,
    apply: A,
    revert: R,
}

impl<A, R> FnCommand<A, R> {
    pub fn new(apply: A, revert: R) -> Self {
        Self {
            label: Cow::Borrowed(UNNAMED_COMMAND_LABEL),
            apply,
            revert,
        }
    }

    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }
}

impl<A, R, E> Command for FnCommand<A, R>
where
    A: FnMut() -> Result<(), E>,
    R: FnMut() -> Result<(), E>,
{
    type Error = E;

    fn apply(&mut self) -> Result<(), E> {
        (self.apply)()
    }

    fn revert(&mut self) -> Result<(), E> {
        (self.revert)()
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl<A, R> std::fmt::Debug for FnCommand<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCommand").field("label", &self.label).finish_non_exhaustive()
    }
}
