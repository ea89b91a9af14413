use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ids::PromotionId;
use crate::domain::value_objects::{bounded_text, MAX_CHAR_LENGTH};

/// Promotion that products can be linked to
///
/// The discount is a plain floating point figure (`DOUBLE PRECISION`);
/// how it is applied is up to pricing code outside this schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    id: PromotionId,
    description: String,
    discount: f64,
}

impl Promotion {
    pub fn new(description: impl Into<String>, discount: f64) -> StoreResult<Self> {
        Ok(Self {
            id: PromotionId::new(),
            description: bounded_text("description", description, MAX_CHAR_LENGTH)?,
            discount: Self::check_discount(discount)?,
        })
    }

    fn check_discount(discount: f64) -> StoreResult<f64> {
        if !discount.is_finite() {
            return Err(StoreError::Validation(format!(
                "discount must be a finite number (got {discount})"
            )));
        }
        Ok(discount)
    }

    pub fn set_discount(&mut self, discount: f64) -> StoreResult<()> {
        self.discount = Self::check_discount(discount)?;
        Ok(())
    }

    pub fn id(&self) -> PromotionId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub(crate) fn from_persistence(id: PromotionId, description: String, discount: f64) -> Self {
        Self {
            id,
            description,
            discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_promotion() {
        let promotion = Promotion::new("Summer sale", 0.15).unwrap();
        assert_eq!(promotion.description(), "Summer sale");
        assert!((promotion.discount() - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_discount_is_rejected() {
        assert!(Promotion::new("Broken", f64::NAN).is_err());
        assert!(Promotion::new("Broken", f64::INFINITY).is_err());
    }

    #[test]
    fn set_discount_revalidates() {
        let mut promotion = Promotion::new("Clearance", 0.5).unwrap();
        assert!(promotion.set_discount(f64::NEG_INFINITY).is_err());
        assert!((promotion.discount() - 0.5).abs() < f64::EPSILON);
    }
}
