//! Template rendering for skeleton paths and file contents.
//! The engine only depends on the [`TemplateRenderer`] trait; the default
//! implementation is backed by MiniJinja.
use crate::error::{Error, Result};
use cruet::Inflector;
use minijinja::{Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with strict undefined handling and the case filters.
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Missing variables are errors.
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        env.add_filter("camel_case", camel_case);
        env.add_filter("pascal_case", pascal_case);
        env.add_filter("snake_case", snake_case);
        env.add_filter("screaming_snake_case", screaming_snake_case);
        env.add_filter("kebab_case", kebab_case);
        env.add_filter("title_case", title_case);

        Self { env }
    }
}

fn camel_case(value: &str) -> String {
    value.to_camel_case()
}

fn pascal_case(value: &str) -> String {
    value.to_pascal_case()
}

fn snake_case(value: &str) -> String {
    value.to_snake_case()
}

fn screaming_snake_case(value: &str) -> String {
    value.to_screaming_snake_case()
}

fn kebab_case(value: &str) -> String {
    value.to_kebab_case()
}

fn title_case(value: &str) -> String {
    value.to_title_case()
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template does not parse or references
    ///   an undefined variable
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(Error::MinijinjaError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let engine = MiniJinjaRenderer::new();
        let result = engine.render("Hello {{ name }}!", &json!({"name": "World"})).unwrap();
        assert_eq!(result, "Hello World!");
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        let engine = MiniJinjaRenderer::new();
        let result = engine.render("a: {{ a }}\n", &json!({"a": 1})).unwrap();
        assert_eq!(result, "a: 1\n");
    }

    #[test]
    fn test_undefined_variable_fails() {
        let engine = MiniJinjaRenderer::new();
        assert!(matches!(
            engine.render("{{ missing }}", &json!({})),
            Err(Error::MinijinjaError(_))
        ));
    }

    #[test]
    fn test_case_filters() {
        let engine = MiniJinjaRenderer::new();
        let ctx = json!({"name": "hello world"});
        assert_eq!(engine.render("{{ name | snake_case }}", &ctx).unwrap(), "hello_world");
        assert_eq!(engine.render("{{ name | kebab_case }}", &ctx).unwrap(), "hello-world");
        assert_eq!(engine.render("{{ name | pascal_case }}", &ctx).unwrap(), "HelloWorld");
    }
}
