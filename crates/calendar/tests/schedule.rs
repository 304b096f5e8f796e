use chrono::NaiveDate;
use lumpr_calendar::{CalendarError, ScheduleSpec, compute_output_days, compute_output_days_from_dates};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn monthly_over_one_year() {
    let sched =
        compute_output_days(Some("01/01/2001"), None, Some("01/01/2002"), &ScheduleSpec::Monthly)
            .unwrap();
    assert_eq!(sched.num_days(), 365);
    assert_eq!(
        sched.days(),
        &[31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365]
    );
}

#[test]
fn monthly_offsets_land_on_first_of_month() {
    let start = ymd(1999, 11, 17);
    let sched =
        compute_output_days_from_dates(Some(start), Some(800), None, &ScheduleSpec::Monthly)
            .unwrap();
    assert!(!sched.is_empty());
    for &d in sched.days() {
        let date = start + chrono::TimeDelta::days(i64::from(d));
        assert_eq!(
            chrono::Datelike::day(&date),
            1,
            "offset {d} maps to {date}, not a first of month"
        );
    }
    assert!(sched.days().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn annual_leap_year_spacing() {
    let sched =
        compute_output_days(Some("01/01/2000"), None, Some("01/01/2003"), &ScheduleSpec::Annual)
            .unwrap();
    assert_eq!(sched.days(), &[366, 731, 1096]);
}

#[test]
fn annual_mid_year_start() {
    let sched =
        compute_output_days(Some("15/06/2000"), Some(365), None, &ScheduleSpec::Annual).unwrap();
    assert_eq!(sched.days(), &[200]);
}

#[test]
fn count_without_dates() {
    let sched = compute_output_days(None, Some(100), None, &ScheduleSpec::Count(10)).unwrap();
    assert_eq!(sched.len(), 10);
    assert_eq!(sched.days().first(), Some(&1));
    assert_eq!(sched.days().last(), Some(&100));
    assert!(sched.days().windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn count_with_end_date() {
    let sched =
        compute_output_days(Some("01/01/2000"), None, Some("11/01/2000"), &ScheduleSpec::Count(2))
            .unwrap();
    assert_eq!(sched.num_days(), 10);
    assert_eq!(sched.into_days(), vec![1, 10]);
}

#[test]
fn explicit_days_passed_through() {
    let sched =
        compute_output_days(Some("01/01/2000"), Some(30), None, &ScheduleSpec::Days(vec![1, 15, 30]))
            .unwrap();
    assert_eq!(sched.days(), &[1, 15, 30]);
}

#[test]
fn malformed_dates_rejected() {
    let err = compute_output_days(Some("2000/01/01"), Some(10), None, &ScheduleSpec::Monthly)
        .unwrap_err();
    assert!(matches!(err, CalendarError::MalformedDate { .. }));

    let err = compute_output_days(Some("01/01/2000"), None, Some("31/02/2000"), &ScheduleSpec::Monthly)
        .unwrap_err();
    assert!(matches!(err, CalendarError::MalformedDate { .. }));
}

#[test]
fn annual_without_start_rejected() {
    let err = compute_output_days(None, Some(365), None, &ScheduleSpec::Annual).unwrap_err();
    assert_eq!(err, CalendarError::CadenceNeedsStartDate { cadence: "annual" });
}
