// File: tests/localization.rs
use plancraft::auth::{Alert, LoginForm};
use plancraft::i18n;
use plancraft::model::{StatKind, StatsChart, TaskStatistics};
use serial_test::serial;

#[test]
#[serial]
fn test_vietnamese_texts() {
    assert_eq!(i18n::init(Some("vi_VN.UTF-8")), "vi");

    let alert = LoginForm::new("", "").validate().unwrap_err();
    assert_eq!(alert.title, "Lỗi");
    assert_eq!(alert.message, "Vui lòng nhập đầy đủ thông tin");
    assert_eq!(Alert::success("x").title, "Thành công");

    let chart = StatsChart::from_stats(&TaskStatistics {
        completed: 1.0,
        pending: 2.0,
        overdue: 3.0,
    });
    let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Hoàn thành", "Đang chờ", "Quá hạn"]);

    i18n::init(Some("en"));
}

#[test]
#[serial]
fn test_unsupported_locale_falls_back_to_english() {
    assert_eq!(i18n::resolve_locale(Some("fr-FR"), None), "en");
    i18n::init(Some("en"));
    assert_eq!(StatKind::Overdue.label(), "Overdue");
}
