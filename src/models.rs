/// Fields extracted from a product record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub image_url: String,
}
