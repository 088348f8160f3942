//! Filter resets and the address cascade

use storefront::{
    address::{AddressCascade, AddressDraft, ChildFetch, MissingField, AddressDraftError},
    models::{DistrictCode, Product, ProvinceCode, SortDirection, WardCode},
    paging::{Page, PageAccumulator, PagingError},
};
use testresult::TestResult;

#[derive(Debug, Clone, PartialEq)]
struct Filter {
    category: Option<&'static str>,
    direction: SortDirection,
}

fn products(ids: &[&str]) -> Result<Page<Product>, serde_json::Error> {
    let content: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "title": id, "price": 1}))
        .collect();

    serde_json::from_value(serde_json::json!({"content": content, "hasNext": true}))
}

#[test]
fn filter_change_resets_to_first_page() -> TestResult {
    let mut catalog = PageAccumulator::new(
        Filter {
            category: None,
            direction: SortDirection::Desc,
        },
        1,
    );

    let ticket = catalog.first_request()?;
    catalog.complete(&ticket, products(&["a", "b"])?)?;
    let ticket = catalog.next_request()?;
    catalog.complete(&ticket, products(&["c", "b"])?)?;

    assert_eq!(catalog.len(), 3);

    let in_flight = catalog.next_request()?;

    catalog.set_context(Filter {
        category: Some("lamps"),
        direction: SortDirection::Desc,
    });

    assert!(catalog.is_empty());
    assert_eq!(catalog.current_page(), None);
    assert_eq!(
        catalog.complete(&in_flight, products(&["x"])?),
        Err(PagingError::Stale(3))
    );

    let ticket = catalog.next_request()?;
    assert_eq!(ticket.page(), 1);
    assert_eq!(ticket.context().category, Some("lamps"));

    Ok(())
}

#[test]
fn address_flow_from_empty_to_request() -> TestResult {
    let mut draft = AddressDraft {
        receiver_name: "Hoa".to_string(),
        phone_number: "0987654321".to_string(),
        full_address: "1 Ly Thai To".to_string(),
        ..AddressDraft::default()
    };

    let step = draft.cascade.set_province(ProvinceCode(79));
    assert_eq!(step.fetch, Some(ChildFetch::Districts(ProvinceCode(79))));

    let step = draft.cascade.set_district(DistrictCode(760))?;
    assert_eq!(step.fetch, Some(ChildFetch::Wards(DistrictCode(760))));

    draft.cascade.set_ward(WardCode(26734))?;

    draft.cascade.set_province(ProvinceCode(1));
    assert_eq!(draft.cascade, AddressCascade::Province(ProvinceCode(1)));
    assert_eq!(
        draft.clone().into_request(),
        Err(AddressDraftError::Incomplete(vec![
            MissingField::District,
            MissingField::Ward
        ]))
    );

    draft.cascade.set_district(DistrictCode(1))?;
    draft.cascade.set_ward(WardCode(1))?;

    let request = draft.into_request()?;
    assert_eq!(request.province_code, ProvinceCode(1));

    Ok(())
}
