//! Addresses service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Method, RequestBuilder};
use storefront::{
    models::{
        District, DistrictCode, Province, ProvinceCode, UserAddressRequest, UserAddressResponse,
        Ward,
    },
    paging::Page,
};

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct HttpAddressesService {
    client: ApiClient,
}

impl HttpAddressesService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn paged(&self, path: &str, page: u32, size: u32) -> RequestBuilder {
        self.client
            .request(Method::GET, path)
            .query(&[("page", page), ("size", size)])
    }
}

#[async_trait]
impl AddressesService for HttpAddressesService {
    async fn provinces(&self, page: u32, size: u32) -> Result<Page<Province>, ApiError> {
        self.client
            .send(self.paged("/user/provinces", page, size))
            .await
    }

    async fn districts(
        &self,
        province: ProvinceCode,
        page: u32,
        size: u32,
    ) -> Result<Page<District>, ApiError> {
        self.client
            .send(self.paged(&format!("/user/districts/{province}"), page, size))
            .await
    }

    async fn wards(
        &self,
        district: DistrictCode,
        page: u32,
        size: u32,
    ) -> Result<Page<Ward>, ApiError> {
        self.client
            .send(self.paged(&format!("/user/wards/{district}"), page, size))
            .await
    }

    async fn get_address(&self) -> Result<Option<UserAddressResponse>, ApiError> {
        self.client
            .send(self.client.request(Method::GET, "/user/address"))
            .await
    }

    async fn update_address(&self, address: UserAddressRequest) -> Result<String, ApiError> {
        self.client
            .send(self.client.request(Method::PUT, "/user/address").json(&address))
            .await
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// Retrieve one page of provinces.
    async fn provinces(&self, page: u32, size: u32) -> Result<Page<Province>, ApiError>;

    /// Retrieve one page of a province's districts.
    async fn districts(
        &self,
        province: ProvinceCode,
        page: u32,
        size: u32,
    ) -> Result<Page<District>, ApiError>;

    /// Retrieve one page of a district's wards.
    async fn wards(
        &self,
        district: DistrictCode,
        page: u32,
        size: u32,
    ) -> Result<Page<Ward>, ApiError>;

    /// Retrieve the signed-in user's saved address, if any.
    async fn get_address(&self) -> Result<Option<UserAddressResponse>, ApiError>;

    /// Save the signed-in user's address. Returns the backend's confirmation message.
    async fn update_address(&self, address: UserAddressRequest) -> Result<String, ApiError>;
}
