//! The template engine.
//!
//! Templates use a Jinja-compatible subset: `{{ expr }}` interpolation,
//! `{% if %}`/`{% elif %}`/`{% else %}`/`{% endif %}`,
//! `{% for %}`/`{% else %}`/`{% endfor %}` and `{# comments #}`.
//! An [`Environment`] bundles the template loader with the filter registry;
//! there is no global engine state.

pub mod ast;
mod eval;
pub mod filters;
mod lexer;
pub mod parser;

pub use ast::Template;
pub use filters::{FilterFn, Filters};
pub use parser::parse;

use crate::context::{Context, ContextBuilder};
use crate::error::Result;
use crate::loader::{EmbeddedLoader, TemplateLoader, TemplateSource};
use crate::value::Value;
use log::{debug, trace};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Errors
    /// * `Error::TemplateSyntax` if the template is malformed
    fn render(&self, template: &str, context: &Context) -> Result<String>;
}

/// Loader and filters used to render templates.
pub struct Environment {
    loader: Box<dyn TemplateLoader>,
    filters: Filters,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").field("filters", &self.filters).finish_non_exhaustive()
    }
}

impl Environment {
    /// Creates an environment over `loader` with the built-in filters.
    pub fn new(loader: Box<dyn TemplateLoader>) -> Self {
        Self { loader, filters: Filters::builtin() }
    }

    /// Environment over the templates compiled into the binary.
    pub fn embedded() -> Self {
        Self::new(Box::new(EmbeddedLoader::new()))
    }

    /// # Errors
    /// * `Error::TemplateNotFound` if a filesystem root does not exist
    pub fn from_source(source: TemplateSource) -> Result<Self> {
        debug!("Using templates from {source}");
        Ok(Self::new(source.into_loader()?))
    }

    pub fn loader(&self) -> &dyn TemplateLoader {
        self.loader.as_ref()
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Registers a filter, replacing any filter with the same name.
    pub fn add_filter<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.filters.add(name, filter);
    }

    /// Parses `source` and checks every filter it uses is registered.
    ///
    /// # Errors
    /// * `Error::TemplateSyntax` for malformed templates and unknown filters
    pub fn parse(&self, name: &str, source: &str) -> Result<Template> {
        let template = parse(name, source)?;
        if let Some((filter, offset)) =
            template.filters().into_iter().find(|(f, _)| !self.filters.contains(f))
        {
            return Err(lexer::syntax_error(
                name,
                source,
                offset,
                format!("unknown filter '{filter}'"),
            ));
        }
        Ok(template)
    }

    /// Renders template text against `context` as given.
    pub fn render_str(&self, name: &str, source: &str, context: &Context) -> Result<String> {
        let template = self.parse(name, source)?;
        trace!("Rendering '{}' with {} variables", name, context.len());
        Ok(template.render(context, &self.filters))
    }

    /// The defaults the named template declares.
    pub fn defaults_for(&self, name: &str) -> Result<Context> {
        self.loader.load_defaults(name)
    }

    /// Loads `category/template_name`, layers `context` over the template's
    /// defaults and renders it. An empty category names a root template.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the loader has no such template
    /// * `Error::TemplateSyntax` if the template is malformed
    /// * `Error::ConfigError` if its defaults sidecar is malformed
    pub fn render_template(
        &self,
        category: &str,
        template_name: &str,
        context: &Context,
    ) -> Result<String> {
        let name = if category.is_empty() {
            template_name.to_string()
        } else {
            format!("{}/{}", category.trim_end_matches('/'), template_name)
        };
        let source = self.loader.load(&name)?;
        let defaults = self.defaults_for(&name)?;
        debug!("Rendering '{}' ({} defaults)", name, defaults.len());
        let context = ContextBuilder::new(defaults).build(context);
        self.render_str(&name, &source, &context)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::embedded()
    }
}

impl TemplateRenderer for Environment {
    fn render(&self, template: &str, context: &Context) -> Result<String> {
        self.render_str("<string>", template, context)
    }
}
