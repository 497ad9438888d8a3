//! Data source name resolution and contact list CRUD

mod support;

use std::sync::Arc;

use dialplane_core::{
    ContactListApi, ContactListDataSource, ContactListResource, DataSource, OperationContext,
    ResourceAdapter, SiteApi, SiteDataSource,
};
use dialplane_domain::constants::LIST_PAGE_SIZE;
use dialplane_domain::{EntityState, ResourceData};
use serde_json::json;
use support::contact_lists::FakeContactListApi;
use support::fast_timeouts;
use support::sites::{site, FakeSiteApi};

#[tokio::test]
async fn contact_list_lookup_requires_exact_name() {
    let api = Arc::new(
        FakeContactListApi::new()
            .with_list("cl-1", "Leads 2024 archive")
            .with_list("cl-2", "Leads 2024"),
    );
    let source = ContactListDataSource::new(Arc::clone(&api) as Arc<dyn ContactListApi>, fast_timeouts());
    let mut data = ResourceData::new().with("name", "Leads 2024");

    let diagnostics = source.read(&OperationContext::background(), &mut data).await;

    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics}");
    assert_eq!(data.id(), Some("cl-2"));
}

#[tokio::test]
async fn contact_list_lookup_waits_for_visibility() {
    let api = Arc::new(FakeContactListApi::new().with_list("cl-3", "Fresh").hidden_for(3));
    let source = ContactListDataSource::new(Arc::clone(&api) as Arc<dyn ContactListApi>, fast_timeouts());
    let mut data = ResourceData::new().with("name", "Fresh");

    let diagnostics = source.read(&OperationContext::background(), &mut data).await;

    assert!(diagnostics.is_empty());
    assert_eq!(data.id(), Some("cl-3"));
    assert!(api.list_pages.load(std::sync::atomic::Ordering::SeqCst) >= 4);
}

#[tokio::test]
async fn contact_list_lookup_gives_up_after_read_budget() {
    let api = Arc::new(FakeContactListApi::new());
    let source = ContactListDataSource::new(Arc::clone(&api) as Arc<dyn ContactListApi>, fast_timeouts());
    let mut data = ResourceData::new().with("name", "Missing");

    let diagnostics = source.read(&OperationContext::background(), &mut data).await;

    assert!(diagnostics.has_error());
    let detail = diagnostics.first_error().and_then(|d| d.detail.clone()).unwrap_or_default();
    assert!(detail.contains("no contact lists found with name Missing"), "{detail}");
    assert_eq!(data.id(), None);
}

#[tokio::test]
async fn site_lookup_skips_soft_deleted_and_respects_partition() {
    let api = Arc::new(
        FakeSiteApi::new()
            .with_site(site("s-old", "Indy", false, Some(EntityState::Deleted)))
            .with_site(site("s-managed", "Indy", true, Some(EntityState::Active)))
            .with_site(site("s-live", "Indy", false, Some(EntityState::Active))),
    );
    let source = SiteDataSource::new(Arc::clone(&api) as Arc<dyn SiteApi>, fast_timeouts());

    let mut unmanaged = ResourceData::new().with("name", "Indy");
    let diagnostics = source.read(&OperationContext::background(), &mut unmanaged).await;
    assert!(diagnostics.is_empty());
    assert_eq!(unmanaged.id(), Some("s-live"));

    let mut managed = ResourceData::new().with("name", "Indy").with("managed", true);
    let diagnostics = source.read(&OperationContext::background(), &mut managed).await;
    assert!(diagnostics.is_empty());
    assert_eq!(managed.id(), Some("s-managed"));
}

#[tokio::test]
async fn site_match_without_id_is_an_error() {
    let anonymous = dialplane_domain::Site { id: None, ..site("unused", "Anon", false, None) };
    let api = Arc::new(FakeSiteApi::new().with_site(anonymous));
    let source = SiteDataSource::new(Arc::clone(&api) as Arc<dyn SiteApi>, fast_timeouts());
    let mut data = ResourceData::new().with("name", "Anon");

    let diagnostics = source.read(&OperationContext::background(), &mut data).await;

    assert!(diagnostics.has_error());
    assert_eq!(data.id(), None);
}

#[tokio::test]
async fn lookup_without_name_is_an_error() {
    let api = Arc::new(FakeSiteApi::new());
    let source = SiteDataSource::new(Arc::clone(&api) as Arc<dyn SiteApi>, fast_timeouts());
    let mut data = ResourceData::new();

    let diagnostics = source.read(&OperationContext::background(), &mut data).await;

    assert!(diagnostics.has_error());
    assert_eq!(FakeSiteApi::count(&api.list_pages), 0);
}

fn contact_list_adapter(api: &Arc<FakeContactListApi>) -> ContactListResource {
    ContactListResource::new(Arc::clone(api) as Arc<dyn ContactListApi>, fast_timeouts(), LIST_PAGE_SIZE)
}

#[tokio::test]
async fn contact_list_round_trip() {
    let api = Arc::new(FakeContactListApi::new());
    let adapter = contact_list_adapter(&api);
    let ctx = OperationContext::background();
    let mut data = ResourceData::new()
        .with("name", "Callbacks")
        .with("column_names", json!(["first", "cell"]))
        .with("phone_columns", json!([{ "column_name": "cell", "type": "cell" }]));

    let diagnostics = adapter.create(&ctx, &mut data).await;
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics}");
    assert_eq!(data.id(), Some("list-1"));
    assert_eq!(data.get_string_list("column_names"), vec!["first".to_string(), "cell".to_string()]);

    data.set("name", "Callbacks v2");
    let diagnostics = adapter.update(&ctx, &mut data).await;
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics}");
    assert_eq!(data.get_str("name"), Some("Callbacks v2"));

    let diagnostics = adapter.delete(&ctx, &mut data).await;
    assert!(diagnostics.is_empty());
    assert_eq!(data.id(), None);

    let exported = adapter.export_all(&ctx).await.unwrap();
    assert!(exported.is_empty());
}

#[tokio::test]
async fn contact_list_rejects_unknown_phone_column() {
    let api = Arc::new(FakeContactListApi::new());
    let mut data = ResourceData::new()
        .with("name", "Broken")
        .with("column_names", json!(["first"]))
        .with("phone_columns", json!([{ "column_name": "cell", "type": "cell" }]));

    let diagnostics = contact_list_adapter(&api).create(&OperationContext::background(), &mut data).await;

    assert!(diagnostics.has_error());
    assert_eq!(api.creates.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contact_list_export_lists_every_page() {
    let mut fake = FakeContactListApi::new();
    for n in 0..5 {
        fake = fake.with_list(&format!("cl-{n}"), &format!("List {n}"));
    }
    let api = Arc::new(fake);
    let adapter = ContactListResource::new(Arc::clone(&api) as Arc<dyn ContactListApi>, fast_timeouts(), 2);

    let exported = adapter.export_all(&OperationContext::background()).await.unwrap();

    assert_eq!(exported.len(), 5);
    assert_eq!(exported["cl-3"].name, "List 3");
    // pages of 2, 2, 1 and the empty terminator
    assert_eq!(api.list_pages.load(std::sync::atomic::Ordering::SeqCst), 4);
}
