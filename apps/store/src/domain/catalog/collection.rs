use crate::domain::errors::StoreResult;
use crate::domain::ids::{CollectionId, ProductId};
use crate::domain::value_objects::{bounded_text, MAX_CHAR_LENGTH};

/// Group of products
///
/// A collection may point at one featured product. That pointer is cleared
/// when the product is deleted and has no reverse accessor on `Product`.
///
/// Rows are only rebuilt from storage inside the crate; callers go through
/// the validating constructor.
///
/// ```compile_fail
/// use retrogo_store::domain::catalog::Collection;
/// use retrogo_store::domain::ids::CollectionId;
///
/// let _ = Collection::from_persistence(CollectionId::new(), String::new(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    id: CollectionId,
    title: String,
    featured_product_id: Option<ProductId>,
}

impl Collection {
    pub fn new(title: impl Into<String>) -> StoreResult<Self> {
        Ok(Self {
            id: CollectionId::new(),
            title: bounded_text("title", title, MAX_CHAR_LENGTH)?,
            featured_product_id: None,
        })
    }

    pub fn rename(&mut self, title: impl Into<String>) -> StoreResult<()> {
        self.title = bounded_text("title", title, MAX_CHAR_LENGTH)?;
        Ok(())
    }

    pub fn set_featured_product(&mut self, product_id: Option<ProductId>) {
        self.featured_product_id = product_id;
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn featured_product_id(&self) -> Option<ProductId> {
        self.featured_product_id
    }

    pub(crate) fn from_persistence(
        id: CollectionId,
        title: String,
        featured_product_id: Option<ProductId>,
    ) -> Self {
        Self {
            id,
            title,
            featured_product_id,
        }
    }
}
