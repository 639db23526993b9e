use super::{UpdateProductAmount, ValidationError, ValidationResult};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Smallest amount a cart line may hold
pub const MIN_CART_AMOUNT: u32 = 1;

impl Validate for UpdateProductAmount {
    fn validate(&self) -> ValidationResult<()> {
        validate_cart_amount(self.amount)
    }
}

/// Validate a requested cart amount
pub fn validate_cart_amount(amount: u32) -> ValidationResult<()> {
    if amount < MIN_CART_AMOUNT {
        return Err(ValidationError::BelowMinimum {
            field: "amount".to_string(),
            min: MIN_CART_AMOUNT,
            value: amount,
        });
    }

    Ok(())
}
