use chrono::NaiveDate;
use lumpr_calendar::{add_years, date_sequence, day_offset, format_date, parse_date};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn leap_year_sequence_lengths() {
    let dates = date_sequence(ymd(2000, 1, 1), 367);
    assert_eq!(dates[59], ymd(2000, 2, 29));
    assert_eq!(dates[366], ymd(2001, 1, 1));

    let dates = date_sequence(ymd(1900, 1, 1), 366);
    // 1900 is not a leap year
    assert_eq!(dates[59], ymd(1900, 3, 1));
    assert_eq!(dates[365], ymd(1901, 1, 1));
}

#[test]
fn consecutive_dates_one_day_apart() {
    let dates = date_sequence(ymd(1999, 12, 1), 120);
    assert_eq!(dates.len(), 120);
    for pair in dates.windows(2) {
        assert_eq!(day_offset(pair[0], pair[1]), 1);
    }
}

#[test]
fn every_date_of_a_leap_year_formats_and_parses() {
    for date in date_sequence(ymd(2004, 1, 1), 366) {
        assert_eq!(parse_date(&format_date(date)).unwrap(), date);
    }
}

#[test]
fn repeated_year_steps_from_leap_day() {
    let mut d = ymd(2000, 2, 29);
    let mut seen = Vec::new();
    for _ in 0..4 {
        d = add_years(d, 1).unwrap();
        seen.push(d);
    }
    assert_eq!(
        seen,
        vec![
            ymd(2001, 3, 1),
            ymd(2002, 3, 1),
            ymd(2003, 3, 1),
            ymd(2004, 3, 1)
        ]
    );
}
