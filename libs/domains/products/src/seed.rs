//! Demonstration catalog loaded at startup.

use chrono::{DateTime, Duration, Utc};

use crate::models::{ProductRecord, NEW_PRODUCT_DAYS};

/// Name, category and featured flag of each demo product, in code order
pub const DEMO_PRODUCTS: [(&str, &str, bool); 12] = [
    ("Sofá 3 Lugares Premium", "Sala de Estar", true),
    ("Mesa de Jantar Extensível", "Cozinha", false),
    ("Cama Box Queen Size", "Quarto", true),
    ("Escrivaninha Executiva", "Escritório", false),
    ("Poltrona Reclinável", "Sala de Estar", false),
    ("Guarda-Roupa 6 Portas", "Quarto", false),
    ("Cadeira de Escritório Ergonômica", "Escritório", true),
    ("Conjunto de Jardim", "Área Externa", false),
    ("Rack para TV 65\"", "Sala de Estar", false),
    ("Buffet Moderno", "Cozinha", false),
    ("Criado-Mudo com Gavetas", "Quarto", false),
    ("Estante para Livros", "Escritório", false),
];

/// Age in days of the demo product at `index`; spread over the last 60 days.
fn days_ago(index: usize) -> i64 {
    ((index * 7) % 60) as i64
}

/// Build the demo record at `index` with the given store id.
///
/// Returns `None` past the end of [`DEMO_PRODUCTS`].
pub fn demo_record(index: usize, id: u64, now: DateTime<Utc>) -> Option<ProductRecord> {
    let (name, category, featured) = DEMO_PRODUCTS.get(index).copied()?;
    let age = days_ago(index);
    let date_created = now - Duration::days(age);

    Some(ProductRecord {
        id,
        name: name.to_string(),
        code: format!("MOV-{:04}", index + 1),
        category: category.to_string(),
        primary_image: format!("/images/products/product-{}.jpg", index + 1),
        featured,
        is_new: age <= NEW_PRODUCT_DAYS,
        on_promotion: index % 3 == 1,
        discontinued: false,
        date_created,
        date_modified: date_created,
    })
}
