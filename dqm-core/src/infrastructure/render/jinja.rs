// dqm-core/src/infrastructure/render/jinja.rs

// Turns a report context (plain JSON) into a document. Template names drive
// auto-escaping: anything ending in `.html` is HTML-escaped.

use minijinja::Environment;

use crate::application::ports::TemplateEngine;
use crate::error::DqmError;
use crate::infrastructure::error::InfrastructureError;

pub struct JinjaRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> JinjaRenderer<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Scores are always shown with one decimal
        env.add_filter("pct", |value: f64| -> String { format!("{:.1}%", value) });

        Self { env }
    }
}

impl<'a> Default for JinjaRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TemplateEngine for JinjaRenderer<'a> {
    fn render(
        &self,
        name: &str,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, DqmError> {
        self.env
            .render_named_str(name, template, context)
            .map_err(|e| DqmError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
