use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Debug, Clone)]
pub struct Product {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
    // Shape differs from product to product
    #[serde(rename = "especificaciones")]
    pub specifications: Value,
    pub stock: u32,
    #[serde(rename = "en_oferta")]
    pub on_offer: bool,
    #[serde(rename = "etiquetas")]
    pub tags: Vec<String>,
}

impl Product {
    pub fn new(
        name: &str,
        price: f64,
        category: &str,
        specifications: Value,
        stock: u32,
        on_offer: bool,
        tags: &[&str],
    ) -> Self {
        Product {
            name: String::from(name),
            price,
            category: String::from(category),
            specifications,
            stock,
            on_offer,
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }
}
