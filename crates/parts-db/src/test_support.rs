//! Shared test utilities for parts-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use parts_core::audit::AuditDraft;
    use parts_core::clock::ManualClock;
    use parts_core::entities::{Component, User};
    use parts_core::enums::{LookupKind, WebKind};

    use crate::PartsDb;
    use crate::repos::component::NewComponent;
    use crate::service::PartsService;

    /// Create an in-memory service on a manual clock.
    pub async fn test_service() -> PartsService {
        test_service_with_clock().await.0
    }

    /// Create an in-memory service and hand back its clock so tests can move time.
    pub async fn test_service_with_clock() -> (PartsService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        let db = PartsDb::open_local(":memory:").await.unwrap();
        (PartsService::from_db(db, clock.clone()), clock)
    }

    /// The reference rows every component needs.
    pub struct Fixture {
        pub user: User,
        pub type_id: i64,
        pub library_id: i64,
        pub lifecycle_state_id: i64,
        pub manufacturer_id: i64,
        pub mounting_type_id: i64,
    }

    impl Fixture {
        pub fn new_component(&self, mpn: &str) -> NewComponent {
            NewComponent::new(
                self.type_id,
                self.library_id,
                self.lifecycle_state_id,
                self.manufacturer_id,
                self.mounting_type_id,
                mpn,
            )
        }
    }

    pub async fn fixture(svc: &PartsService) -> Fixture {
        let user = svc
            .create_user("Ada Lovelace", "Ada.Lovelace@example.com", "Ada", "Lovelace")
            .await
            .unwrap();
        let lookup = |kind, name: &'static str| async move {
            svc.create_lookup(kind, name, None, None).await.unwrap().id
        };
        Fixture {
            type_id: lookup(LookupKind::Type, "Resistor").await,
            lifecycle_state_id: lookup(LookupKind::LifecycleState, "Active").await,
            mounting_type_id: lookup(LookupKind::MountingType, "SMD").await,
            library_id: svc.create_library("lib:Passives", None).await.unwrap().id,
            manufacturer_id: svc
                .create_web_entity(WebKind::Company, "Yageo", "https://www.yageo.com")
                .await
                .unwrap()
                .id,
            user,
        }
    }

    /// Create a component from `fx` as its user, timestamps from the clock.
    pub async fn component(svc: &PartsService, fx: &Fixture, mpn: &str) -> Component {
        svc.create_component(fx.user.id, fx.new_component(mpn), AuditDraft::default())
            .await
            .unwrap()
    }
}
