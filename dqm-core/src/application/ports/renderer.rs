use crate::error::DqmError;

pub trait TemplateEngine: Send + Sync {
    /// `name` identifies the template (and its extension decides escaping).
    fn render(
        &self,
        name: &str,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, DqmError>;
}
