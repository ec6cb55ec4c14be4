//! Catalog product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sakaya_core::{Category, Price, ProductId};

/// Reasons a product record is refused before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidProduct {
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("price cannot be negative: {0}")]
    NegativePrice(Price),
    #[error("alcohol percent must be between 0 and 100: {0}")]
    AlcoholOutOfRange(Decimal),
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub description: String,
    /// Alcohol by volume in percent; zero for snacks.
    pub alcohol_percent: Decimal,
    pub image: String,
    pub tags: Vec<String>,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing: Option<Vec<String>>,
}

impl Product {
    /// Check the fields a catalog file or admin edit can get wrong.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidProduct`] found.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if self.name.trim().is_empty() {
            return Err(InvalidProduct::EmptyName);
        }
        if self.price < Price::ZERO {
            return Err(InvalidProduct::NegativePrice(self.price));
        }
        if self.alcohol_percent < Decimal::ZERO || self.alcohol_percent > Decimal::ONE_HUNDRED {
            return Err(InvalidProduct::AlcoholOutOfRange(self.alcohol_percent));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_alcoholic(&self) -> bool {
        self.alcohol_percent > Decimal::ZERO
    }

    /// Case-insensitive match against name, description and tags.
    ///
    /// An empty term matches everything.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ipa() -> Product {
        Product {
            id: ProductId::new(4),
            name: "クラフトビール IPA".to_owned(),
            category: Category::Beer,
            price: Price::yen(450),
            description: "ホップの苦味が効いたクラフトビール".to_owned(),
            alcohol_percent: Decimal::new(65, 1),
            image: "/images/beer1.jpg".to_owned(),
            tags: vec!["ビール".to_owned(), "Craft".to_owned()],
            stock: 20,
            pairing: None,
        }
    }

    #[test]
    fn test_matches_search_fields() {
        let product = ipa();
        assert!(product.matches_search(""));
        assert!(product.matches_search("ipa"));
        assert!(product.matches_search("苦味"));
        assert!(product.matches_search("craft"));
        assert!(!product.matches_search("ワイン"));
    }

    #[test]
    fn test_is_alcoholic() {
        let mut product = ipa();
        assert!(product.is_alcoholic());
        product.alcohol_percent = Decimal::ZERO;
        assert!(!product.is_alcoholic());
    }

    #[test]
    fn test_validate() {
        assert_eq!(ipa().validate(), Ok(()));

        let mut product = ipa();
        product.price = Price::yen(-1);
        assert_eq!(
            product.validate(),
            Err(InvalidProduct::NegativePrice(Price::yen(-1)))
        );

        let mut product = ipa();
        product.alcohol_percent = Decimal::new(-5, 1);
        assert!(matches!(
            product.validate(),
            Err(InvalidProduct::AlcoholOutOfRange(_))
        ));

        let mut product = ipa();
        product.name = "  ".to_owned();
        assert_eq!(product.validate(), Err(InvalidProduct::EmptyName));
    }
}
