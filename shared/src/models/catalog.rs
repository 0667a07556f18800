//! Bird type taxonomy and product presentation models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ColorToken;

/// A kind of bird handled by the business (e.g., "Pollo", "Gallina")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BirdType {
    pub id: Uuid,
    /// Unique within the catalog, compared case-insensitively
    pub name: String,
    /// Whether batches of this type track male/female counts
    pub has_sex: bool,
    /// Whether batches of this type must pick a variety
    pub has_variety: bool,
    /// Non-empty iff `has_variety`
    #[serde(default)]
    pub varieties: Vec<String>,
    pub color: ColorToken,
}

impl BirdType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            has_sex: false,
            has_variety: false,
            varieties: Vec::new(),
            color: ColorToken::default(),
        }
    }

    pub fn with_sex(mut self) -> Self {
        self.has_sex = true;
        self
    }

    pub fn with_varieties<I, S>(mut self, varieties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.has_variety = true;
        self.varieties = varieties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_color(mut self, color: ColorToken) -> Self {
        self.color = color;
        self
    }

    pub fn flags(&self) -> BirdTypeFlags {
        BirdTypeFlags {
            has_sex: self.has_sex,
            has_variety: self.has_variety,
        }
    }

    /// Whether `variety` is one of the declared varieties (exact match)
    pub fn offers_variety(&self, variety: &str) -> bool {
        self.varieties.iter().any(|v| v == variety)
    }
}

/// The two optional tracking flags of a bird type as edited in the catalog form.
///
/// The editing flow treats them as mutually exclusive: selecting one clears
/// the other. The stored model does not enforce this, so a type with both
/// flags set is still representable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BirdTypeFlags {
    pub has_sex: bool,
    pub has_variety: bool,
}

impl BirdTypeFlags {
    pub fn select_sex(self, checked: bool) -> Self {
        Self {
            has_sex: checked,
            has_variety: if checked { false } else { self.has_variety },
        }
    }

    pub fn select_variety(self, checked: bool) -> Self {
        Self {
            has_sex: if checked { false } else { self.has_sex },
            has_variety: checked,
        }
    }
}

/// A product form a bird type is sold as, with its shrinkage (merma) per bird
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresentationType {
    pub id: Uuid,
    /// Owning bird type, referenced by name
    pub bird_type: String,
    /// Unique within its bird type, compared case-insensitively
    pub name: String,
    /// Mass lost per bird in kilograms
    pub shrinkage_kg: Decimal,
    /// Shrinkage is nominal and varies in practice (e.g., live birds)
    pub variable: bool,
}

impl PresentationType {
    pub fn new(bird_type: impl Into<String>, name: impl Into<String>, shrinkage_kg: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            bird_type: bird_type.into(),
            name: name.into(),
            shrinkage_kg,
            variable: false,
        }
    }

    pub fn variable(mut self) -> Self {
        self.variable = true;
        self
    }

    pub fn belongs_to(&self, bird_type: &str) -> bool {
        self.bird_type == bird_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_sex_clears_variety() {
        let flags = BirdTypeFlags::default().select_variety(true).select_sex(true);
        assert_eq!(
            flags,
            BirdTypeFlags {
                has_sex: true,
                has_variety: false
            }
        );
    }

    #[test]
    fn test_unchecking_keeps_other_flag() {
        let flags = BirdTypeFlags {
            has_sex: false,
            has_variety: true,
        };
        assert_eq!(flags.select_sex(false), flags);
    }

    #[test]
    fn test_model_allows_both_flags() {
        let mut bird = BirdType::new("Codorniz").with_sex();
        bird.has_variety = true;
        assert!(bird.flags().has_sex && bird.flags().has_variety);
    }

    #[test]
    fn test_offers_variety_is_exact() {
        let gallina = BirdType::new("Gallina").with_varieties(["Roja", "Negra"]);
        assert!(gallina.offers_variety("Roja"));
        assert!(!gallina.offers_variety("roja"));
    }
}
