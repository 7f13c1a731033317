use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

/// Runtime template engine, created once and shared between requests.
pub struct TemplateRenderer {
    environment: Environment<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut environment = Environment::new();
        // templates are HTML regardless of the name they are loaded under
        environment.set_auto_escape_callback(|_| AutoEscape::Html);
        environment.set_undefined_behavior(UndefinedBehavior::Chainable);
        Self { environment }
    }

    pub fn render(&self, template: &str, context: Value) -> Result<String, minijinja::Error> {
        self.environment.render_str(template, context)
    }
}
