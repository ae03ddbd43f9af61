use super::*;
use crate::checker::LOADING_LABEL;
use crate::error::DashError;

fn make_model() -> Model {
    let rows = vec![
        SampleRow::new("Weather Agent", "Fetches forecasts"),
        SampleRow::new("RAG Agent", "Answers questions"),
        SampleRow::new("BQ Data Loader", "Populates BigQuery"),
    ];
    Model::new(&DashConfig::default(), rows)
}

fn type_text(model: &mut Model, text: &str) {
    for c in text.chars() {
        update(model, Msg::SearchInput(c));
    }
}

fn ok_status() -> DependencyStatus {
    DependencyStatus {
        success: true,
        message: None,
        dependencies: vec![],
    }
}

// ============================================================================
// 検索
// ============================================================================

#[test]
fn typing_filters_on_every_keystroke() {
    let mut model = make_model();

    type_text(&mut model, "ag");
    assert_eq!(model.page.table().unwrap().visible_count(), 2);

    type_text(&mut model, "ent w");
    assert_eq!(model.page.table().unwrap().visible_count(), 0);
    assert!(model.page.no_results().unwrap().is_visible());

    update(&mut model, Msg::SearchBackspace);
    update(&mut model, Msg::SearchBackspace);
    assert_eq!(model.page.table().unwrap().visible_count(), 2);
}

#[test]
fn search_clear_restores_all_rows() {
    let mut model = make_model();
    type_text(&mut model, "zzz");

    update(&mut model, Msg::SearchClear);
    assert_eq!(model.page.search_field().unwrap().value(), "");
    assert_eq!(model.page.table().unwrap().visible_count(), 3);
    assert!(!model.page.no_results().unwrap().is_visible());
}

#[test]
fn search_keys_map_to_input() {
    let model = make_model();
    assert_eq!(model.key_to_msg(KeyCode::Char('q')), Some(Msg::SearchInput('q')));
    assert_eq!(model.key_to_msg(KeyCode::Tab), Some(Msg::FocusNext));
}

// ============================================================================
// チェック
// ============================================================================

#[test]
fn activate_requests_check_and_disables_button() {
    let mut model = make_model();
    model.focus = Focus::Button;

    let msg = model.key_to_msg(KeyCode::Enter).unwrap();
    assert_eq!(update(&mut model, msg), Effect::StartCheck);

    let control = model.page.check_control().unwrap();
    assert!(control.is_disabled());
    assert_eq!(control.label(), LOADING_LABEL);
    // 無効化中は押下イベントを発行しない
    assert_eq!(model.key_to_msg(KeyCode::Enter), None);
}

#[test]
fn repeated_activate_is_rejected() {
    let mut model = make_model();
    assert_eq!(update(&mut model, Msg::Activate), Effect::StartCheck);
    assert_eq!(update(&mut model, Msg::Activate), Effect::None);
}

#[test]
fn completed_check_opens_modal_dialog() {
    let mut model = make_model();
    update(&mut model, Msg::Activate);
    complete_check(&mut model, Ok(ok_status()));

    assert!(model.dialog_open());
    assert_eq!(model.key_to_msg(KeyCode::Char('a')), None);
    assert_eq!(model.key_to_msg(KeyCode::Esc), Some(Msg::DismissDialog));

    update(&mut model, Msg::DismissDialog);
    assert!(!model.dialog_open());
    assert!(model.page.body().dialogs().is_empty());
}

#[test]
fn failed_check_shows_closable_banner() {
    let mut model = make_model();
    update(&mut model, Msg::Activate);
    complete_check(&mut model, Err(DashError::Backend("network down".to_string())));

    assert!(!model.dialog_open());
    let banners = model.page.container().unwrap().banners();
    assert_eq!(banners.len(), 1);
    assert!(banners[0].text.contains("network down"));

    update(&mut model, Msg::CloseBanner);
    assert!(model.page.container().unwrap().banners().is_empty());
}

#[test]
fn stray_result_is_dropped() {
    let mut model = make_model();
    complete_check(&mut model, Ok(ok_status()));
    assert!(!model.dialog_open());
}

// ============================================================================
// その他
// ============================================================================

#[test]
fn focus_cycles() {
    let mut model = make_model();
    update(&mut model, Msg::FocusNext);
    assert_eq!(model.focus, Focus::Table);
    update(&mut model, Msg::FocusNext);
    assert_eq!(model.focus, Focus::Button);
    update(&mut model, Msg::FocusNext);
    assert_eq!(model.focus, Focus::Search);
}

#[test]
fn scroll_is_bounded_by_visible_rows() {
    let mut model = make_model();
    for _ in 0..10 {
        update(&mut model, Msg::ScrollDown);
    }
    assert_eq!(model.table_offset, 2);
    update(&mut model, Msg::ScrollUp);
    assert_eq!(model.table_offset, 1);
}

#[test]
fn quit_from_table() {
    let mut model = make_model();
    model.focus = Focus::Table;
    let msg = model.key_to_msg(KeyCode::Char('q')).unwrap();
    update(&mut model, msg);
    assert!(model.should_quit);
}

#[test]
fn teardown_releases_listeners() {
    let model = make_model();
    let page = model.teardown();
    assert!(!page.has_listener(crate::page::ElementId::SearchField));
    assert!(!page.has_listener(crate::page::ElementId::CheckControl));
}
