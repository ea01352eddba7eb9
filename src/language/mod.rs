pub mod expression;
pub mod program;
pub mod statement;

pub use expression::Term;
pub use program::Program;
pub use statement::{NoPartials, Statement};

use crate::context::Context;
use crate::error::Error;
use crate::helpers::HelperRegistry;

/// How many levels of partial inclusion a single render may nest
/// before the render is aborted as cyclic.
pub const MAX_PARTIAL_DEPTH: usize = 16;

/// The capabilities of one render call: the helper registry, the
/// partial resolver, and the current partial-inclusion depth. Carried
/// beside the context, never inside it.
pub struct RenderEnv<'a> {
    pub helpers: &'a HelperRegistry,
    pub partials: &'a dyn PartialResolver,
    pub depth: usize,
}

/// Resolves a partial inclusion to its rendered output. `None` means
/// the partial is unknown and the caller should degrade to a visible
/// placeholder instead of failing.
pub trait PartialResolver {
    fn resolve(
        &self,
        name: &str,
        context: &Context,
        env: &RenderEnv,
    ) -> Result<Option<String>, Error>;
}
