//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use storefront::session::Session;
use thiserror::Error;

use crate::{
    api::ApiClient,
    config::ApiConfig,
    domain::{
        addresses::{AddressesService, HttpAddressesService},
        carts::{CartsService, HttpCartsService},
        catalog::{CatalogService, HttpCatalogService},
        payments::{HttpPaymentsService, PaymentsService},
        wishlist::{HttpWishlistService, WishlistService},
    },
    pages::{
        address::AddressPage, cart::CartPage, catalog::CatalogPage, payment::PaymentPage,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlist: Arc<dyn WishlistService>,
    pub addresses: Arc<dyn AddressesService>,
    pub payments: Arc<dyn PaymentsService>,
    pub session: Option<Session>,
    pub page_size: u32,
    pub currency: &'static Currency,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("session", &self.session)
            .field("page_size", &self.page_size)
            .field("currency", &self.currency.iso_alpha_code)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from backend settings and an optional session.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(config: &ApiConfig, session: Option<Session>) -> Result<Self, AppInitError> {
        let client = ApiClient::new(config, session.clone()).map_err(AppInitError::Client)?;

        Ok(Self {
            catalog: Arc::new(HttpCatalogService::new(client.clone())),
            carts: Arc::new(HttpCartsService::new(client.clone())),
            wishlist: Arc::new(HttpWishlistService::new(client.clone())),
            addresses: Arc::new(HttpAddressesService::new(client.clone())),
            payments: Arc::new(HttpPaymentsService::new(client)),
            session,
            page_size: config.page_size,
            currency: config.currency.currency(),
        })
    }

    pub fn signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn catalog_page(&self) -> CatalogPage {
        CatalogPage::new(
            Arc::clone(&self.catalog),
            Arc::clone(&self.carts),
            self.page_size,
            self.signed_in(),
        )
    }

    pub fn cart_page(&self) -> CartPage {
        CartPage::new(
            Arc::clone(&self.carts),
            Arc::clone(&self.wishlist),
            self.currency,
            self.page_size,
        )
    }

    pub fn address_page(&self) -> AddressPage {
        AddressPage::new(Arc::clone(&self.addresses), self.page_size)
    }

    pub fn payment_page(&self) -> PaymentPage {
        PaymentPage::new(Arc::clone(&self.payments))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::{
        config::CurrencyCode,
        test::{api_config, session},
    };

    #[test]
    fn context_follows_configuration() -> TestResult {
        let config = ApiConfig {
            currency: CurrencyCode::Usd,
            page_size: 12,
            ..api_config("http://storefront.test")
        };

        let context = AppContext::from_config(&config, Some(session()))?;

        assert!(context.signed_in());
        assert_eq!(context.page_size, 12);
        assert_eq!(context.currency, iso::USD);

        Ok(())
    }

    #[test]
    fn anonymous_context_has_no_session() -> TestResult {
        let context = AppContext::from_config(&api_config("http://storefront.test"), None)?;

        assert!(!context.signed_in());

        Ok(())
    }
}
