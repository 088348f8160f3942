//! Address page.
//!
//! Province, district and ward options are paged separately. District and
//! ward lists are keyed by their parent, so a page fetched for a parent the
//! user has since moved away from is discarded on arrival.

use std::sync::Arc;

use storefront::{
    address::{AddressDraft, CascadeError, ChildFetch, OptionList},
    models::{
        AddressKind, District, DistrictCode, Province, ProvinceCode, UserAddressResponse, Ward,
        WardCode,
    },
    paging::{MergeOutcome, PageAccumulator, PageTicket},
};
use tracing::info;

use crate::{
    domain::addresses::AddressesService,
    pages::{PageError, merge_fetch},
};

/// Administrative division listings start at page 0.
pub const FIRST_PAGE: u32 = 0;

pub struct AddressPage {
    addresses: Arc<dyn AddressesService>,
    draft: AddressDraft,
    provinces: PageAccumulator<Province, ()>,
    districts: PageAccumulator<District, Option<ProvinceCode>>,
    wards: PageAccumulator<Ward, Option<DistrictCode>>,
    page_size: u32,
}

impl std::fmt::Debug for AddressPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressPage")
            .field("draft", &self.draft)
            .field("provinces", &self.provinces.len())
            .field("districts", &self.districts.len())
            .field("wards", &self.wards.len())
            .finish_non_exhaustive()
    }
}

impl AddressPage {
    pub fn new(addresses: Arc<dyn AddressesService>, page_size: u32) -> Self {
        Self {
            addresses,
            draft: AddressDraft::default(),
            provinces: PageAccumulator::new((), FIRST_PAGE),
            districts: PageAccumulator::new(None, FIRST_PAGE),
            wards: PageAccumulator::new(None, FIRST_PAGE),
            page_size,
        }
    }

    pub fn draft(&self) -> &AddressDraft {
        &self.draft
    }

    pub fn provinces(&self) -> &[Province] {
        self.provinces.items()
    }

    pub fn districts(&self) -> &[District] {
        self.districts.items()
    }

    pub fn wards(&self) -> &[Ward] {
        self.wards.items()
    }

    pub fn province_listing(&self) -> &PageAccumulator<Province, ()> {
        &self.provinces
    }

    pub fn district_listing(&self) -> &PageAccumulator<District, Option<ProvinceCode>> {
        &self.districts
    }

    pub fn ward_listing(&self) -> &PageAccumulator<Ward, Option<DistrictCode>> {
        &self.wards
    }

    /// Fill in the free-text part of the draft.
    pub fn set_details(
        &mut self,
        receiver_name: impl Into<String>,
        phone_number: impl Into<String>,
        full_address: impl Into<String>,
        address_type: AddressKind,
    ) {
        self.draft.receiver_name = receiver_name.into();
        self.draft.phone_number = phone_number.into();
        self.draft.full_address = full_address.into();
        self.draft.address_type = address_type;
    }

    /// Fetch the saved address and copy its details into the draft.
    ///
    /// The saved address carries division names only, so the cascade is
    /// left for the user to choose again.
    pub async fn load_saved(&mut self) -> Result<Option<UserAddressResponse>, PageError> {
        let saved = self.addresses.get_address().await?;

        if let Some(saved) = &saved {
            self.draft.id.clone_from(&saved.id);
            self.set_details(
                saved.receiver_name.clone(),
                saved.phone_number.clone(),
                saved.full_address.clone(),
                saved.address_type,
            );
        }

        Ok(saved)
    }

    pub async fn load_provinces(&mut self) -> Result<MergeOutcome, PageError> {
        let ticket = self.provinces.first_request()?;

        self.fetch_provinces(ticket).await
    }

    pub async fn more_provinces(&mut self) -> Result<MergeOutcome, PageError> {
        let ticket = self.provinces.next_request()?;

        self.fetch_provinces(ticket).await
    }

    pub async fn more_districts(&mut self) -> Result<MergeOutcome, PageError> {
        let ticket = self.districts.next_request()?;

        self.fetch_districts(ticket).await
    }

    pub async fn more_wards(&mut self) -> Result<MergeOutcome, PageError> {
        let ticket = self.wards.next_request()?;

        self.fetch_wards(ticket).await
    }

    /// Choose a province and load its districts.
    ///
    /// Returns `None` when the province was already chosen.
    pub async fn select_province(
        &mut self,
        province: ProvinceCode,
    ) -> Result<Option<MergeOutcome>, PageError> {
        let step = self.draft.cascade.set_province(province);

        self.apply(&step.cleared, step.fetch).await
    }

    /// Choose a district and load its wards.
    pub async fn select_district(
        &mut self,
        district: DistrictCode,
    ) -> Result<Option<MergeOutcome>, PageError> {
        let step = self.draft.cascade.set_district(district)?;

        self.apply(&step.cleared, step.fetch).await
    }

    pub fn select_ward(&mut self, ward: WardCode) -> Result<(), PageError> {
        self.draft.cascade.set_ward(ward)?;

        Ok(())
    }

    /// Save the draft as the user's address.
    pub async fn submit(&self) -> Result<String, PageError> {
        let request = self.draft.clone().into_request()?;
        let message = self.addresses.update_address(request).await?;

        info!("saved delivery address");

        Ok(message)
    }

    /// Start over with an empty form.
    pub fn reset(&mut self) {
        self.draft = AddressDraft::default();
        self.districts.set_context(None);
        self.wards.set_context(None);
    }

    async fn apply(
        &mut self,
        cleared: &[OptionList],
        fetch: Option<ChildFetch>,
    ) -> Result<Option<MergeOutcome>, PageError> {
        for list in cleared {
            match list {
                OptionList::Districts => self.districts.set_context(None),
                OptionList::Wards => self.wards.set_context(None),
            };
        }

        let outcome = match fetch {
            Some(ChildFetch::Districts(province)) => {
                self.districts.set_context(Some(province));
                let ticket = self.districts.first_request()?;

                self.fetch_districts(ticket).await?
            }
            Some(ChildFetch::Wards(district)) => {
                self.wards.set_context(Some(district));
                let ticket = self.wards.first_request()?;

                self.fetch_wards(ticket).await?
            }
            None => return Ok(None),
        };

        Ok(Some(outcome))
    }

    async fn fetch_provinces(&mut self, ticket: PageTicket<()>) -> Result<MergeOutcome, PageError> {
        let fetch = self.addresses.provinces(ticket.page(), self.page_size);

        merge_fetch(&mut self.provinces, &ticket, fetch).await
    }

    async fn fetch_districts(
        &mut self,
        ticket: PageTicket<Option<ProvinceCode>>,
    ) -> Result<MergeOutcome, PageError> {
        let Some(province) = *ticket.context() else {
            return Err(CascadeError::NoProvince.into());
        };

        let fetch = self
            .addresses
            .districts(province, ticket.page(), self.page_size);

        merge_fetch(&mut self.districts, &ticket, fetch).await
    }

    async fn fetch_wards(
        &mut self,
        ticket: PageTicket<Option<DistrictCode>>,
    ) -> Result<MergeOutcome, PageError> {
        let Some(district) = *ticket.context() else {
            return Err(CascadeError::NoDistrict.into());
        };

        let fetch = self.addresses.wards(district, ticket.page(), self.page_size);

        merge_fetch(&mut self.wards, &ticket, fetch).await
    }
}
