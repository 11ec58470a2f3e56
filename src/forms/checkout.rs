//! Checkout: personal details, payment, and the order summary

use serde::Serialize;

use crate::wizard::{DefinitionError, FieldSpec, Rule, Step, WizardDefinition};

/// Sales tax applied to the subtotal
pub const TAX_RATE: f64 = 0.08;

/// A line in the order summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// Totals shown beside the checkout form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn new(items: Vec<OrderItem>) -> Self {
        let subtotal: f64 = items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        let tax = subtotal * TAX_RATE;
        Self {
            items,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// The plan bundle offered on the demo checkout
    pub fn sample() -> Self {
        Self::new(vec![
            OrderItem { name: "Enterprise Plan".to_string(), price: 299.0, quantity: 1 },
            OrderItem { name: "Premium Support".to_string(), price: 99.0, quantity: 1 },
        ])
    }
}

/// Group card digits in fours, at most 16 digits
pub fn format_card_number(value: &str) -> String {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let grouped = digits
        .chars()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
    grouped.chars().take(19).collect()
}

/// Format expiry digits as MM/YY
pub fn format_expiry(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= 2 {
        let year: String = digits.chars().skip(2).take(2).collect();
        format!("{}/{}", &digits[..2], year)
    } else {
        digits
    }
}

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    WizardDefinition::builder("checkout", "Checkout")
        .reference_prefix("BIZ")
        .field(FieldSpec::text("fullName", "Full name"))
        .field(FieldSpec::text("email", "Email address"))
        .field(FieldSpec::text("company", "Company name"))
        .field(
            FieldSpec::text("cardNumber", "Card number")
                .help("16 digits")
                .format_with(format_card_number)
                .masked(),
        )
        .field(
            FieldSpec::text("expiryDate", "Expiry date")
                .help("MM/YY")
                .format_with(format_expiry),
        )
        .field(FieldSpec::text("cvv", "CVV").masked())
        .field(FieldSpec::text("cardName", "Name on card"))
        .field(FieldSpec::flag("terms", "I agree to the terms and conditions"))
        .field(FieldSpec::flag("saveInfo", "Save payment information"))
        .step(
            Step::new("Personal Information", "Who is this order for?")
                .fields(["fullName", "email", "company"])
                .rule(Rule::required("fullName"))
                .rule(Rule::required("email"))
                .rule(Rule::email("email"))
                .rule(Rule::required("company")),
        )
        .step(
            Step::new("Payment Details", "Your payment information is encrypted and secure")
                .fields(["cardNumber", "expiryDate", "cvv", "cardName", "terms", "saveInfo"])
                .rule(Rule::required("cardNumber"))
                .rule(Rule::required("expiryDate"))
                .rule(Rule::required("cvv"))
                .rule(Rule::required("cardName"))
                .rule(Rule::accepted("terms").with_message("Please accept the terms and conditions")),
        )
        .build()
}
