use super::*;
use crate::error::DashError;
use crate::page::ElementId;
use crate::sample::SampleRow;
use crate::status::Dependency;
use std::future::Future;
use std::pin::Pin;

struct FixedSource(bool);

impl StatusSource for FixedSource {
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<DependencyStatus>> + Send + 'a>> {
        let success = self.0;
        Box::pin(async move {
            Ok(DependencyStatus {
                success,
                message: None,
                dependencies: vec![Dependency {
                    name: "Git".to_string(),
                    installed: success,
                    version: None,
                }],
            })
        })
    }
}

fn full_page() -> Page {
    Page::builder()
        .search_field()
        .sample_table(vec![
            SampleRow::new("Weather Agent", "Fetches forecasts"),
            SampleRow::new("RAG Agent", "Answers questions"),
        ])
        .no_results_notice("No samples found")
        .check_control("Check Dependencies")
        .content_container()
        .build()
}

fn type_query(page: &mut Page, dashboard: &mut Dashboard, query: &str) {
    page.search_field_mut().unwrap().set_value(query);
    dashboard.handle(page, UiEvent::SearchChanged);
}

#[test]
fn install_wires_present_elements() {
    let mut page = full_page();
    let dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    assert!(dashboard.filter_installed());
    assert!(dashboard.checker_installed());
    assert!(page.has_listener(ElementId::SearchField));
    assert!(page.has_listener(ElementId::CheckControl));
}

#[test]
fn install_skips_absent_elements() {
    let mut page = Page::builder().sample_table(vec![]).build();
    let mut dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    assert!(!dashboard.filter_installed());
    assert!(!dashboard.checker_installed());
    assert_eq!(dashboard.handle(&mut page, UiEvent::CheckActivated), Effect::None);
    assert_eq!(dashboard.handle(&mut page, UiEvent::SearchChanged), Effect::None);
}

#[test]
fn search_change_filters_rows() {
    let mut page = full_page();
    let mut dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    type_query(&mut page, &mut dashboard, "weather");
    assert_eq!(page.table().unwrap().visibility(), &[true, false]);

    type_query(&mut page, &mut dashboard, "database");
    assert_eq!(page.table().unwrap().visible_count(), 0);
    assert!(page.no_results().unwrap().is_visible());
}

#[test]
fn check_activation_starts_once() {
    let mut page = full_page();
    let mut dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    assert_eq!(
        dashboard.handle(&mut page, UiEvent::CheckActivated),
        Effect::StartCheck
    );
    assert_eq!(dashboard.handle(&mut page, UiEvent::CheckActivated), Effect::None);
}

#[test]
fn complete_check_then_dismiss_dialog() {
    let mut page = full_page();
    let mut dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    dashboard.handle(&mut page, UiEvent::CheckActivated);
    let outcome = dashboard
        .complete_check(
            &mut page,
            Ok(DependencyStatus {
                success: true,
                message: None,
                dependencies: vec![],
            }),
        )
        .unwrap();
    let CheckOutcome::Dialog { id, .. } = outcome else {
        panic!("Expected Dialog");
    };

    dashboard.handle(&mut page, UiEvent::DialogDismissed(id));
    assert!(page.body().dialogs().is_empty());
}

#[test]
fn failed_check_banner_can_be_closed() {
    let mut page = full_page();
    let mut dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    dashboard.handle(&mut page, UiEvent::CheckActivated);
    let outcome = dashboard
        .complete_check(&mut page, Err(DashError::Backend("network down".to_string())))
        .unwrap();
    let CheckOutcome::Banner(Some(id)) = outcome else {
        panic!("Expected Banner");
    };

    dashboard.handle(&mut page, UiEvent::BannerClosed(id));
    assert!(page.container().unwrap().banners().is_empty());
}

#[tokio::test]
async fn activate_and_wait_runs_full_cycle() {
    let mut page = full_page();
    let mut dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    let outcome = dashboard
        .activate_and_wait(&mut page, &FixedSource(false))
        .await
        .unwrap();

    assert!(matches!(outcome, CheckOutcome::Dialog { .. }));
    assert!(!page.check_control().unwrap().is_disabled());
    assert!(!dashboard.checker().is_busy());
}

#[tokio::test]
async fn activate_and_wait_without_control() {
    let mut page = Page::builder().search_field().build();
    let mut dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    let err = dashboard
        .activate_and_wait(&mut page, &FixedSource(true))
        .await
        .unwrap_err();
    assert_eq!(err, CheckRejected::NoControl);
}

#[test]
fn teardown_unsubscribes() {
    let mut page = full_page();
    let dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    dashboard.teardown(&mut page);
    assert!(!page.has_listener(ElementId::SearchField));
    assert!(!page.has_listener(ElementId::CheckControl));
}

#[test]
fn events_after_unsubscribe_are_ignored() {
    let mut page = full_page();
    let mut dashboard = Dashboard::install(&mut page, Duration::from_secs(5));

    // 別の購読で置き換えられた場合、古い配線はイベントを処理しない
    let _other = page.subscribe_change().unwrap();
    type_query(&mut page, &mut dashboard, "weather");
    assert_eq!(page.table().unwrap().visible_count(), 2);
}
