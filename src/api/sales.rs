use super::ApiClient;
use crate::{
    errors::Result,
    models::{IdRequest, NewSale, SaleEnvelope, SaleRecord, SalesEnvelope},
};
use async_trait::async_trait;
use reqwest::Method;

/// Sales log persistence
#[async_trait]
pub trait SalesBackend: Send + Sync {
    /// Records a submitted cart.
    async fn enter_sales(&self, sale: &NewSale) -> Result<()>;

    async fn get_sales(&self) -> Result<Vec<SaleRecord>>;

    async fn get_sale_by_id(&self, id: &str) -> Result<SaleRecord>;

    async fn delete_sale(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl SalesBackend for ApiClient {
    async fn enter_sales(&self, sale: &NewSale) -> Result<()> {
        self.send_only(
            self.request(Method::POST, "/sales/enterSales").json(sale),
            "Failed to enter sales",
        )
        .await
    }

    async fn get_sales(&self) -> Result<Vec<SaleRecord>> {
        let envelope: SalesEnvelope = self
            .fetch(
                self.request(Method::GET, "/sales/getSales"),
                "Failed to load sales",
            )
            .await?;
        Ok(envelope.sales)
    }

    async fn get_sale_by_id(&self, id: &str) -> Result<SaleRecord> {
        let envelope: SaleEnvelope = self
            .fetch(
                self.request(Method::POST, "/sales/getSalesById")
                    .json(&IdRequest { id }),
                "Failed to load sale",
            )
            .await?;
        Ok(envelope.sale)
    }

    async fn delete_sale(&self, id: &str) -> Result<()> {
        self.send_only(
            self.request(Method::DELETE, "/sales/deleteSales")
                .json(&IdRequest { id }),
            "Failed to delete Sales",
        )
        .await
    }
}
