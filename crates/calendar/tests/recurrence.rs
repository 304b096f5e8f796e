use chrono::NaiveDate;
use lumpr_calendar::{
    CalendarError, DayOrDate, RecurrenceWindow, WindowEnd, compute_recurrence,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn five_years_half_season() {
    let events = compute_recurrence(
        "01/01/1900",
        DayOrDate::Offset(0),
        DayOrDate::Date(ymd(1905, 1, 1)),
        None,
        0.5,
    )
    .unwrap();
    assert_eq!(events.len(), 11);

    let days: Vec<i64> = events.iter().map(|e| e.day()).collect();
    assert_eq!(
        days,
        vec![1, 1, 182, 365, 547, 730, 912, 1095, 1277, 1460, 1643]
    );

    let flags: Vec<u8> = events.iter().map(|e| e.flag()).collect();
    assert_eq!(flags, vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0]);

    for e in &events {
        if e.active() {
            assert_eq!(e.rate(), 0.5);
        } else {
            assert_eq!(e.rate(), 0.0);
        }
    }
}

#[test]
fn events_non_decreasing() {
    let events = compute_recurrence(
        "15/03/1990",
        DayOrDate::Offset(45),
        DayOrDate::Offset(3650),
        None,
        0.3,
    )
    .unwrap();
    assert!(events.windows(2).all(|w| w[0].day() <= w[1].day()));
    assert_eq!(events.len() % 2, 1);
}

#[test]
fn leap_day_start_moves_to_march_first() {
    let window = RecurrenceWindow::new(
        DayOrDate::Date(ymd(2000, 2, 29)),
        WindowEnd::At(DayOrDate::Date(ymd(2000, 3, 31))),
    );
    let events = window
        .expand(ymd(2000, 1, 1), DayOrDate::Date(ymd(2002, 1, 2)))
        .unwrap();
    let days: Vec<i64> = events.iter().map(|e| e.day()).collect();
    assert_eq!(days, vec![1, 59, 90, 425, 455]);
}

#[test]
fn explicit_end_overrides_fraction() {
    let events = compute_recurrence(
        "01/01/2000",
        DayOrDate::Offset(10),
        DayOrDate::Offset(20),
        Some(DayOrDate::Offset(15)),
        0.9,
    )
    .unwrap();
    let days: Vec<i64> = events.iter().map(|e| e.day()).collect();
    assert_eq!(days, vec![1, 10, 15]);
}

#[test]
fn fraction_out_of_range() {
    let err = compute_recurrence(
        "01/01/2000",
        DayOrDate::Offset(0),
        DayOrDate::Offset(365),
        None,
        -0.1,
    )
    .unwrap_err();
    assert!(matches!(err, CalendarError::InvalidWindow { .. }));
}
