use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use self::renderer::TemplateRenderer;
use super::optical_code::CodeOutcome;
use crate::provider::document_converter::{ConversionError, DocumentConverter};
use crate::provider::template_store::{TemplateStore, TemplateStoreError};

pub mod renderer;


/// Display label to credential subject value, in display order.
pub type DisplayFields = IndexMap<String, serde_json::Value>;

const HEADER_FIELD_COUNT: usize = 2;
const ROW_HEIGHT: i64 = 40;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: `{0}`")]
    Template(#[from] TemplateStoreError),
    #[error("Template binding error: `{0}`")]
    Binding(String),
    #[error("Conversion error: `{0}`")]
    Conversion(#[from] ConversionError),
}

impl From<minijinja::Error> for RenderError {
    fn from(value: minijinja::Error) -> Self {
        RenderError::Binding(value.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtifactContent {
    pub display_fields: DisplayFields,
    pub text_color: String,
    pub background_color: String,
    pub title_name: String,
    pub logo_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateVariables<'a> {
    logo_url: &'a str,
    header_properties: DisplayFields,
    row_properties: DisplayFields,
    key_font_color: &'a str,
    bg_color: &'a str,
    row_properties_margin: i64,
    title_name: &'a str,
    #[serde(rename = "base64QRCode")]
    base64_qr_code: &'a str,
    qr_code_data_uri: String,
}

/// Splits fields into the header (first two) and the body (the rest).
pub fn partition_fields(mut fields: DisplayFields) -> (DisplayFields, DisplayFields) {
    let body = fields.split_off(fields.len().min(HEADER_FIELD_COUNT));
    (fields, body)
}

/// Vertical offset of the body rows. Negative for an empty body.
pub fn row_properties_margin(body_count: usize) -> i64 {
    let half = (body_count / 2) as i64;
    if body_count % 2 == 0 {
        (half - 1) * ROW_HEIGHT
    } else {
        half * ROW_HEIGHT
    }
}

#[derive(Clone)]
pub struct DocumentComposer {
    renderer: Arc<TemplateRenderer>,
    template_store: Arc<dyn TemplateStore>,
    converter: Arc<dyn DocumentConverter>,
    template_name: String,
}

impl DocumentComposer {
    pub fn new(
        renderer: Arc<TemplateRenderer>,
        template_store: Arc<dyn TemplateStore>,
        converter: Arc<dyn DocumentConverter>,
        template_name: String,
    ) -> Self {
        Self {
            renderer,
            template_store,
            converter,
            template_name,
        }
    }

    /// Binds the template without converting it.
    pub fn render_html(
        &self,
        content: &ArtifactContent,
        code: &CodeOutcome,
    ) -> Result<String, RenderError> {
        let template = self.template_store.get_template(&self.template_name)?;

        let (header_properties, row_properties) =
            partition_fields(content.display_fields.to_owned());
        let variables = TemplateVariables {
            logo_url: &content.logo_url,
            row_properties_margin: row_properties_margin(row_properties.len()),
            header_properties,
            row_properties,
            key_font_color: &content.text_color,
            bg_color: &content.background_color,
            title_name: &content.title_name,
            base64_qr_code: code.base64_png(),
            qr_code_data_uri: code.data_uri(),
        };

        Ok(self
            .renderer
            .render(&template, minijinja::Value::from_serialize(&variables))?)
    }

    pub fn compose(
        &self,
        content: &ArtifactContent,
        code: &CodeOutcome,
    ) -> Result<Vec<u8>, RenderError> {
        let html = self.render_html(content, code)?;
        let document = self.converter.convert(&html)?;

        tracing::debug!(
            template = %self.template_name,
            fields = content.display_fields.len(),
            size = document.len(),
            "Composed credential document"
        );
        Ok(document)
    }
}
