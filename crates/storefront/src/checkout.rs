//! Checkout: shipping address validation and order submission.
//!
//! The storefront runs guest checkout: the shopper fills the address form,
//! the cart contents become an order record in the hosted data service,
//! and on confirmed submission (and only then) the cart is cleared. Order
//! storage is behind the [`OrderGateway`] collaborator; the cart store has
//! no visibility into submission mechanics beyond success or failure.

use std::sync::Mutex;

use kuyen_cart::{CartLineItem, CartSlot, CartStore};
use kuyen_core::{Email, EmailError, OrderId, OrderStatus, Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

/// Errors from validating a shipping address.
#[derive(Debug, Error)]
pub enum AddressError {
    /// A required field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// The email address is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    /// The phone number is not a Chilean mobile number.
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
}

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires at least one line item.
    #[error("cart is empty")]
    EmptyCart,
    /// The shipping address failed validation.
    #[error("invalid shipping address: {0}")]
    Address(#[from] AddressError),
    /// The order gateway rejected or failed the submission.
    #[error("order submission failed: {0}")]
    Submission(String),
}

/// The checkout form's shipping address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub region: String,
    pub commune: String,
    pub address: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
}

impl ShippingAddress {
    /// Validate the address the way the checkout form does.
    ///
    /// # Errors
    ///
    /// Returns the first [`AddressError`] found: a blank required field,
    /// a malformed email, or a phone number that is not a Chilean mobile.
    pub fn validate(&self) -> Result<(), AddressError> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("region", &self.region),
            ("commune", &self.commune),
            ("address", &self.address),
            ("number", &self.number),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AddressError::MissingField(name));
            }
        }

        Email::parse(&self.email)?;

        if !is_valid_chilean_mobile(&self.phone) {
            return Err(AddressError::InvalidPhone(self.phone.clone()));
        }

        Ok(())
    }
}

/// Whether `phone` is a Chilean mobile number.
///
/// Separators (spaces, parentheses, dashes) are stripped; the rest must be
/// an optional `+56` country code followed by `9` and eight digits.
#[must_use]
pub fn is_valid_chilean_mobile(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '(' | ')' | '-'))
        .collect();

    let national = cleaned.strip_prefix("+56").unwrap_or(&cleaned);
    let mut chars = national.chars();
    chars.next() == Some('9') && {
        let rest: Vec<char> = chars.collect();
        rest.len() == 8 && rest.iter().all(char::is_ascii_digit)
    }
}

/// One order line, denormalized from a cart line item.
///
/// Carries the name, price, and image copies so the order remains readable
/// in the back-office even if the product is later edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Price,
    pub quantity: u32,
    pub size: String,
    pub color: String,
    #[serde(default)]
    pub image: String,
}

impl From<&CartLineItem> for OrderLine {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product.id,
            product_name: item.product.name.clone(),
            price: item.product.price,
            quantity: item.quantity,
            size: item.selected_size.clone(),
            color: item.selected_color.clone(),
            image: item.product.images.first().cloned().unwrap_or_default(),
        }
    }
}

/// An order ready for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub is_guest: bool,
    pub status: OrderStatus,
    pub total: Price,
    pub shipping_address: ShippingAddress,
    pub items: Vec<OrderLine>,
}

/// What the gateway reports back for a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: OrderId,
    /// Human-facing order number, e.g. `KY-1001`.
    pub order_number: String,
}

/// The order submission collaborator.
pub trait OrderGateway {
    /// Persist an order, returning its identifier.
    fn submit(
        &self,
        order: NewOrder,
    ) -> impl Future<Output = Result<OrderReceipt, CheckoutError>> + Send;
}

/// Place an order from the current cart contents.
///
/// Validates the address, rejects an empty cart, submits through the
/// gateway, and clears the cart only after the gateway confirms. On any
/// failure the cart is left untouched so the shopper can retry.
///
/// # Errors
///
/// Returns [`CheckoutError`] for an empty cart, an invalid address, or a
/// failed submission.
#[instrument(skip(cart, gateway, address))]
pub async fn place_order<S, G>(
    cart: &mut CartStore<S>,
    gateway: &G,
    address: ShippingAddress,
) -> Result<OrderReceipt, CheckoutError>
where
    S: CartSlot,
    G: OrderGateway,
{
    address.validate()?;

    let state = cart.state();
    if state.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = NewOrder {
        is_guest: true,
        status: OrderStatus::Pending,
        total: state.total,
        shipping_address: address,
        items: state.items.iter().map(OrderLine::from).collect(),
    };

    let receipt = gateway.submit(order).await?;
    info!(order = %receipt.order_number, "order submitted, clearing cart");
    cart.clear();

    Ok(receipt)
}

/// An in-memory order gateway for tests.
///
/// Assigns sequential ids and `KY-` prefixed order numbers starting at
/// 1001, and keeps every submitted order for inspection.
#[derive(Debug, Default)]
pub struct InMemoryOrderGateway {
    orders: Mutex<Vec<(OrderReceipt, NewOrder)>>,
}

impl InMemoryOrderGateway {
    /// Create an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The orders submitted so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous caller panicked while holding the lock.
    #[must_use]
    pub fn submitted(&self) -> Vec<(OrderReceipt, NewOrder)> {
        self.orders
            .lock()
            .map(|orders| orders.clone())
            .unwrap_or_default()
    }
}

impl OrderGateway for InMemoryOrderGateway {
    async fn submit(&self, order: NewOrder) -> Result<OrderReceipt, CheckoutError> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| CheckoutError::Submission("gateway lock poisoned".to_string()))?;
        let seq = i64::try_from(orders.len()).unwrap_or(i64::MAX);
        let receipt = OrderReceipt {
            order_id: OrderId::new(seq + 1),
            order_number: format!("KY-{}", 1001 + seq),
        };
        orders.push((receipt.clone(), order));
        Ok(receipt)
    }
}
