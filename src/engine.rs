//! The engine: template cache, partial registry and helper registry
//! behind one explicit instance.
//!
//! There is no global singleton; the composition root constructs an
//! [`Engine`] and hands it to whatever needs to render. Registration
//! re-parses and atomically swaps the cache entry, so a concurrent
//! render observes either the old or the new template, never a
//! half-updated one.
use crate::context::Context;
use crate::error::Error;
use crate::helpers::{HelperRegistry, Locale};
use crate::language::{PartialResolver, RenderEnv, MAX_PARTIAL_DEPTH};
use crate::lexer::{Delimiters, Value};
use crate::template::Template;

use parking_lot::RwLock;
use regex::{NoExpand, Regex};
use std::collections::HashMap;
use std::sync::Arc;

pub struct Engine {
    templates: RwLock<HashMap<String, Arc<Template>>>,
    partials: RwLock<HashMap<String, Arc<Template>>>,
    helpers: RwLock<HelperRegistry>,
    delimiters: Delimiters,
    locale: Locale,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with `{{` / `}}` delimiters and the pt-BR locale.
    pub fn new() -> Self {
        Self::with_config(Delimiters::default(), Locale::default())
    }

    pub fn with_config(delimiters: Delimiters, locale: Locale) -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
            partials: RwLock::new(HashMap::new()),
            helpers: RwLock::new(HelperRegistry::new(locale.clone())),
            delimiters,
            locale,
        }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Register a template under a name, compiling it immediately.
    ///
    /// Re-registration overwrites both the raw and the compiled form.
    /// A parse failure leaves any previously registered entry
    /// untouched.
    pub fn register(&self, name: &str, source: &str) -> Result<(), Error> {
        // Compile outside the lock; only the swap is guarded.
        let template = Template::compile(source, self.delimiters.clone())?;
        self.templates
            .write()
            .insert(name.to_string(), Arc::new(template));

        tracing::debug!(template = name, "template registered");

        Ok(())
    }

    /// Register a partial. Same contract as [`Engine::register`], in a
    /// namespace of its own: a partial is addressed only through the
    /// `{{ > name }}` inclusion form, never through `render`.
    pub fn register_partial(&self, name: &str, source: &str) -> Result<(), Error> {
        let template = Template::compile(source, self.delimiters.clone())?;
        self.partials
            .write()
            .insert(name.to_string(), Arc::new(template));

        tracing::debug!(partial = name, "partial registered");

        Ok(())
    }

    /// Register a caller-supplied helper. The built-in vocabulary is
    /// always present; registering over a built-in name replaces it.
    pub fn register_helper(
        &self,
        name: &str,
        helper: impl Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    ) {
        self.helpers.write().insert(name, helper);
    }

    /// The raw source of a registered template.
    pub fn raw(&self, name: &str) -> Option<String> {
        self.templates
            .read()
            .get(name)
            .map(|template| template.source().to_string())
    }

    /// Render a registered template against the caller's data.
    ///
    /// An unregistered name is an error. A failure *inside* the
    /// template (a helper error, bad data) is not: one broken widget
    /// must not crash the page, so the output degrades to a visible
    /// error fragment naming the template, and the cause is logged.
    pub fn render(
        &self,
        name: &str,
        context: impl TryInto<Context, Error = Error>,
    ) -> Result<String, Error> {
        let template = self
            .templates
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TemplateNotFound(name.to_string()))?;

        let context: Context = context.try_into()?;
        let helpers = self.helpers.read();
        let env = RenderEnv {
            helpers: &helpers,
            partials: self,
            depth: 0,
        };

        match template.program().evaluate(&context, &env) {
            Ok(output) => Ok(output),
            Err(err) => {
                tracing::error!(template = name, error = %err, "template rendering error");

                Ok(format!(
                    r#"<div class="template-error">Erro ao renderizar template: {}</div>"#,
                    name
                ))
            }
        }
    }

    /// Derive a new raw template from a registered base by replacing
    /// the named `{% block name %}...{% endblock %}` span with the
    /// given content. An unknown base returns the content unchanged.
    pub fn extend(&self, base: &str, block: &str, content: &str) -> String {
        let source = match self.raw(base) {
            Some(source) => source,
            None => return content.to_string(),
        };

        let pattern = format!(
            r"(?s)\{{%\s*block\s+{}\s*%\}}.*?\{{%\s*endblock\s*%\}}",
            regex::escape(block)
        );
        let marker = Regex::new(&pattern).expect("block pattern is a valid regex");

        let replacement = format!("{{% block {} %}}{}{{% endblock %}}", block, content);
        marker.replace(&source, NoExpand(&replacement)).into_owned()
    }
}

impl PartialResolver for Engine {
    fn resolve(
        &self,
        name: &str,
        context: &Context,
        env: &RenderEnv,
    ) -> Result<Option<String>, Error> {
        let partial = match self.partials.read().get(name) {
            Some(partial) => partial.clone(),
            None => return Ok(None),
        };

        if env.depth + 1 > MAX_PARTIAL_DEPTH {
            return Err(Error::PartialDepth(name.to_string()));
        }

        // Partials see the full parent context, not an isolated scope.
        let env = RenderEnv {
            helpers: env.helpers,
            partials: env.partials,
            depth: env.depth + 1,
        };

        partial.program().evaluate(context, &env).map(Some)
    }
}
