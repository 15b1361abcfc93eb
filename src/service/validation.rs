//! Boundary validation for request bodies. Runs before any service code.

use crate::error::AppError;
use crate::model::{ProductCreate, UserCreate};

pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

fn required_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

impl Validate for UserCreate {
    fn validate(&self) -> Result<(), AppError> {
        required_text("name", &self.name)?;
        required_text("email", &self.email)
    }
}

impl Validate for ProductCreate {
    fn validate(&self) -> Result<(), AppError> {
        required_text("name", &self.name)?;
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(AppError::Validation("price must be greater than 0".into()));
        }
        Ok(())
    }
}
