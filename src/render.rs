//! Text rendering of review summaries and receipts

use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::forms::checkout::OrderSummary;
use crate::forms::FormKind;
use crate::wizard::{FieldStore, Receipt, WizardDefinition};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const REVIEW_TEMPLATE: &str = "review.txt.tera";
const RECEIPT_TEMPLATE: &str = "receipt.txt.tera";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

#[derive(Debug, Serialize)]
struct ReviewField {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct ReviewStep {
    number: usize,
    title: String,
    fields: Vec<ReviewField>,
}

#[derive(Debug, Serialize)]
struct OrderLine {
    name: String,
    quantity: u32,
    price: String,
}

#[derive(Debug, Serialize)]
struct OrderView {
    items: Vec<OrderLine>,
    subtotal: String,
    tax: String,
    total: String,
}

impl From<&OrderSummary> for OrderView {
    fn from(order: &OrderSummary) -> Self {
        Self {
            items: order
                .items
                .iter()
                .map(|item| OrderLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: money(item.price),
                })
                .collect(),
            subtotal: money(order.subtotal),
            tax: money(order.tax),
            total: money(order.total),
        }
    }
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Renders the embedded Tera templates
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Every step with its fields and current values, masked where declared
    pub fn review(
        &self,
        definition: &WizardDefinition,
        fields: &FieldStore,
    ) -> Result<String, TemplateError> {
        let steps: Vec<ReviewStep> = definition
            .steps()
            .iter()
            .map(|step| ReviewStep {
                number: step.index() + 1,
                title: step.title.clone(),
                fields: step
                    .fields
                    .iter()
                    .filter_map(|name| {
                        let spec = definition.field(name)?;
                        let value = fields.get(name)?;
                        Some(ReviewField {
                            label: spec.label.clone(),
                            value: spec.display(value),
                        })
                    })
                    .collect(),
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("title", &definition.title);
        context.insert("total", &definition.steps().len());
        context.insert("steps", &steps);
        self.render(REVIEW_TEMPLATE, &context)
    }

    /// Confirmation printed after an accepted submission
    pub fn receipt(&self, form: FormKind, receipt: &Receipt) -> Result<String, TemplateError> {
        let definition_title = form
            .definition()
            .map(|d| d.title)
            .unwrap_or_else(|_| form.to_string());

        let mut context = tera::Context::new();
        context.insert("message", form.success_message());
        context.insert("title", &definition_title);
        context.insert("reference", &receipt.reference);
        context.insert(
            "submitted_at",
            &receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        if form == FormKind::Checkout {
            context.insert("order", &OrderView::from(&OrderSummary::sample()));
        }
        self.render(RECEIPT_TEMPLATE, &context)
    }

    fn render(&self, name: &str, context: &tera::Context) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        self.tera
            .render(name, context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardSession;
    use std::sync::Arc;

    #[test]
    fn test_templates_are_embedded() {
        let renderer = Renderer::new().unwrap();
        let names: Vec<_> = renderer.tera.get_template_names().collect();
        assert!(names.contains(&REVIEW_TEMPLATE));
        assert!(names.contains(&RECEIPT_TEMPLATE));
    }

    #[test]
    fn test_review_lists_steps_and_masks_card() {
        let def = Arc::new(FormKind::Checkout.definition().unwrap());
        let mut session = WizardSession::new(Arc::clone(&def));
        session.set_field("fullName", "Ada Lovelace".into()).unwrap();
        session.set_field("cardNumber", "4242424242421234".into()).unwrap();
        session.set_field("cvv", "123".into()).unwrap();

        let text = Renderer::new().unwrap().review(&def, session.fields()).unwrap();
        assert!(text.contains("[1/2] Personal Information"));
        assert!(text.contains("[2/2] Payment Details"));
        assert!(text.contains("Full name: Ada Lovelace"));
        assert!(text.contains("Card number: •••• 1234"));
        assert!(!text.contains("4242"));
        assert!(text.contains("CVV: ••••"));
        assert!(text.contains("Company name: -"));
    }

    #[test]
    fn test_checkout_receipt_includes_order_summary() {
        let def = FormKind::Checkout.definition().unwrap();
        let receipt = Receipt::new(&def);
        let text = Renderer::new()
            .unwrap()
            .receipt(FormKind::Checkout, &receipt)
            .unwrap();
        assert!(text.contains("Payment processed successfully!"));
        assert!(text.contains(&receipt.reference));
        assert!(text.contains("Total     $429.84"));
    }

    #[test]
    fn test_contact_receipt_has_no_order() {
        let def = FormKind::Contact.definition().unwrap();
        let receipt = Receipt::new(&def);
        let text = Renderer::new()
            .unwrap()
            .receipt(FormKind::Contact, &receipt)
            .unwrap();
        assert!(text.starts_with("Your message has been sent successfully!"));
        assert!(!text.contains("Order summary"));
    }
}
