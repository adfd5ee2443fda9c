//! In-memory cart state.

use rust_decimal::Decimal;

use crate::{
    api::Product,
    domain::billing::{
        errors::CartError,
        models::{CartLine, Customer},
    },
};

/// The in-progress sale: stock-constrained lines plus customer details.
///
/// Lines are unique by product id and kept in insertion order. Quantities
/// always satisfy `1 ≤ quantity ≤ max_quantity`; any mutation that would
/// break that either removes the line or fails without changing it.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    /// Customer details for the sale; validated at checkout.
    pub customer: Customer,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product` to the cart.
    ///
    /// An existing line for the product is incremented by one; otherwise a
    /// new line with quantity 1 is appended, with the product's current
    /// stock captured as the line's ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] when the product has no stock, or
    /// when incrementing would exceed the product's current stock.
    pub fn add_item(&mut self, product: &Product) -> Result<(), CartError> {
        let available = u32::try_from(product.current_quantity).unwrap_or(0);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.product_id)
        {
            if line.quantity >= available {
                return Err(CartError::OutOfStock { available });
            }

            line.quantity += 1;

            return Ok(());
        }

        if available == 0 {
            return Err(CartError::OutOfStock { available });
        }

        self.lines.push(CartLine {
            product_id: product.product_id,
            product_name: product.product_name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            unit_price: product.selling_price,
            quantity: 1,
            max_quantity: available,
        });

        Ok(())
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero removes the line. Unknown product ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InsufficientStock`] when `new_quantity` exceeds
    /// the line's stock ceiling; the line is left unchanged.
    pub fn update_quantity(&mut self, product_id: i64, new_quantity: u32) -> Result<(), CartError> {
        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        else {
            return Ok(());
        };

        if new_quantity > line.max_quantity {
            return Err(CartError::InsufficientStock {
                available: line.max_quantity,
            });
        }

        if new_quantity == 0 {
            self.remove_item(product_id);

            return Ok(());
        }

        line.quantity = new_quantity;

        Ok(())
    }

    /// Remove a line if present; no-op otherwise.
    pub fn remove_item(&mut self, product_id: i64) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Exact sum of `unit_price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The total rounded to two decimal places, for display.
    #[must_use]
    pub fn total_rounded(&self) -> Decimal {
        self.total().round_dp(2)
    }

    /// Check the cart is ready for checkout.
    ///
    /// # Errors
    ///
    /// - [`CartError::EmptyCart`] when there are no lines.
    /// - [`CartError::MissingCustomerName`] when the name is blank.
    /// - [`CartError::InvalidPhone`] when the phone is blank or shorter
    ///   than 10 characters.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        if self.customer.name.trim().is_empty() {
            return Err(CartError::MissingCustomerName);
        }

        if self.customer.phone.trim().is_empty() || self.customer.phone.chars().count() < 10 {
            return Err(CartError::InvalidPhone);
        }

        Ok(())
    }

    /// Drop all lines and customer details.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer = Customer::default();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(id: i64, price: Decimal, stock: i64) -> Product {
        Product {
            product_id: id,
            product_name: format!("Product {id}"),
            brand: "Acme".to_owned(),
            category: "Snacks".to_owned(),
            selling_price: price,
            current_quantity: stock,
        }
    }

    #[test]
    fn add_item_inserts_line_with_quantity_one() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].max_quantity, 5);

        Ok(())
    }

    #[test]
    fn add_item_twice_increments_quantity() -> TestResult {
        let mut cart = Cart::new();
        let p = product(1, Decimal::from(100), 5);

        cart.add_item(&p)?;
        cart.add_item(&p)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);

        Ok(())
    }

    #[test]
    fn add_item_out_of_stock_product_fails() {
        let mut cart = Cart::new();

        let result = cart.add_item(&product(1, Decimal::from(100), 0));

        assert!(
            matches!(result, Err(CartError::OutOfStock { available: 0 })),
            "expected OutOfStock, got {result:?}"
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn add_item_beyond_stock_fails_and_leaves_quantity() -> TestResult {
        let mut cart = Cart::new();
        let p = product(1, Decimal::from(100), 2);

        cart.add_item(&p)?;
        cart.add_item(&p)?;
        let result = cart.add_item(&p);

        assert!(
            matches!(result, Err(CartError::OutOfStock { available: 2 })),
            "expected OutOfStock, got {result:?}"
        );
        assert_eq!(cart.lines()[0].quantity, 2);

        Ok(())
    }

    #[test]
    fn negative_stock_is_treated_as_out_of_stock() {
        let mut cart = Cart::new();

        let result = cart.add_item(&product(1, Decimal::from(100), -3));

        assert!(
            matches!(result, Err(CartError::OutOfStock { available: 0 })),
            "expected OutOfStock, got {result:?}"
        );
    }

    #[test]
    fn update_quantity_sets_quantity() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;
        cart.update_quantity(1, 4)?;

        assert_eq!(cart.lines()[0].quantity, 4);

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;
        cart.update_quantity(1, 0)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_beyond_ceiling_fails_unchanged() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;
        let result = cart.update_quantity(1, 6);

        assert!(
            matches!(result, Err(CartError::InsufficientStock { available: 5 })),
            "expected InsufficientStock, got {result:?}"
        );
        assert_eq!(cart.lines()[0].quantity, 1);

        Ok(())
    }

    #[test]
    fn update_quantity_unknown_product_is_noop() -> TestResult {
        let mut cart = Cart::new();

        cart.update_quantity(99, 3)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn remove_item_unknown_product_is_noop() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;
        cart.remove_item(99);

        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn quantities_stay_within_bounds_across_mutations() -> TestResult {
        let mut cart = Cart::new();
        let a = product(1, Decimal::from(10), 3);
        let b = product(2, Decimal::from(20), 1);

        cart.add_item(&a)?;
        cart.add_item(&b)?;
        cart.add_item(&a)?;
        let _ = cart.update_quantity(1, 5);
        let _ = cart.add_item(&b);
        cart.update_quantity(2, 0)?;
        cart.update_quantity(1, 3)?;

        for line in cart.lines() {
            assert!(line.quantity >= 1, "line {} has zero quantity", line.product_id);
            assert!(
                line.quantity <= line.max_quantity,
                "line {} exceeds its ceiling",
                line.product_id
            );
        }

        Ok(())
    }

    #[test]
    fn total_is_exact_and_order_independent() -> TestResult {
        let mut forward = Cart::new();
        let mut reverse = Cart::new();
        let a = product(1, Decimal::new(1999, 2), 10);
        let b = product(2, Decimal::new(5, 2), 10);

        forward.add_item(&a)?;
        forward.add_item(&b)?;
        reverse.add_item(&b)?;
        reverse.add_item(&a)?;

        assert_eq!(forward.total(), Decimal::new(2004, 2));
        assert_eq!(forward.total(), reverse.total());

        Ok(())
    }

    #[test]
    fn total_accumulates_without_float_drift() -> TestResult {
        let mut cart = Cart::new();
        // 0.10 a hundred times is exactly 10.00 in decimal arithmetic.
        let p = product(1, Decimal::new(10, 2), 100);

        cart.add_item(&p)?;
        cart.update_quantity(1, 100)?;

        assert_eq!(cart.total(), Decimal::from(10));

        Ok(())
    }

    #[test]
    fn validate_empty_cart_fails() {
        let cart = Cart::new();

        assert!(
            matches!(cart.validate(), Err(CartError::EmptyCart)),
            "expected EmptyCart"
        );
    }

    #[test]
    fn validate_blank_name_fails() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;
        cart.customer.name = "   ".to_owned();
        cart.customer.phone = "9876543210".to_owned();

        assert!(
            matches!(cart.validate(), Err(CartError::MissingCustomerName)),
            "expected MissingCustomerName"
        );

        Ok(())
    }

    #[test]
    fn validate_short_phone_fails() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;
        cart.customer.name = "Asha".to_owned();
        cart.customer.phone = "12345".to_owned();

        assert!(
            matches!(cart.validate(), Err(CartError::InvalidPhone)),
            "expected InvalidPhone"
        );

        Ok(())
    }

    #[test]
    fn validate_ten_digit_phone_passes() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;
        cart.customer.name = "Asha".to_owned();
        cart.customer.phone = "9876543210".to_owned();

        cart.validate()?;

        Ok(())
    }

    #[test]
    fn clear_resets_lines_and_customer() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(&product(1, Decimal::from(100), 5))?;
        cart.customer.name = "Asha".to_owned();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.customer, Customer::default());

        Ok(())
    }
}
