//! Product rules. Same shape as users without the uniqueness check; price is
//! validated at the request boundary.

use crate::error::AppError;
use crate::model::{NewProduct, ProductCreate, ProductRead};
use crate::store::Session;
use chrono::Utc;

pub struct ProductService;

impl ProductService {
    pub async fn list(session: &mut dyn Session) -> Result<Vec<ProductRead>, AppError> {
        let products = session.list_products().await?;
        tracing::debug!(count = products.len(), "listed products");
        Ok(products.into_iter().map(ProductRead::from).collect())
    }

    pub async fn get(session: &mut dyn Session, id: i32) -> Result<ProductRead, AppError> {
        let product = session
            .get_product(id)
            .await?
            .ok_or_else(AppError::product_not_found)?;
        Ok(product.into())
    }

    #[tracing::instrument(name = "Create product", skip(session, input), fields(name = %input.name))]
    pub async fn create(
        session: &mut dyn Session,
        input: ProductCreate,
    ) -> Result<ProductRead, AppError> {
        let product = session
            .insert_product(NewProduct::from_create(input, Utc::now()))
            .await?;
        tracing::info!(product_id = product.id, "product created");
        Ok(product.into())
    }

    #[tracing::instrument(name = "Update product", skip(session, input))]
    pub async fn update(
        session: &mut dyn Session,
        id: i32,
        input: ProductCreate,
    ) -> Result<ProductRead, AppError> {
        let mut product = session
            .get_product(id)
            .await?
            .ok_or_else(AppError::product_not_found)?;
        product.overwrite(input);
        session.update_product(&product).await?;
        tracing::info!(product_id = id, "product updated");
        Ok(product.into())
    }

    #[tracing::instrument(name = "Delete product", skip(session))]
    pub async fn delete(session: &mut dyn Session, id: i32) -> Result<(), AppError> {
        let product = session
            .get_product(id)
            .await?
            .ok_or_else(AppError::product_not_found)?;
        session.delete_product(product.id).await?;
        tracing::info!(product_id = id, "product deleted");
        Ok(())
    }
}
