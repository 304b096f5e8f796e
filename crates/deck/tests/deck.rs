use chrono::NaiveDate;
use lumpr_calendar::{OutputSchedule, ScheduleSpec, compute_output_days};
use lumpr_deck::{
    Buffers, DeckError, DeckOptions, FormatVersion, OutputSeries, SeriesColumns, SolverOptions,
    TemplateSpec, read_output_days, render_deck, write_deck,
};
use lumpr_model::{FileRef, ModelConfig, SecondBucket};

fn monthly_2000() -> OutputSchedule {
    compute_output_days(Some("01/01/2000"), Some(366), None, &ScheduleSpec::Monthly).unwrap()
}

fn section<'a>(deck: &'a str, marker: &str) -> Vec<&'a str> {
    deck.lines()
        .skip_while(|l| *l != marker)
        .skip(1)
        .take_while(|l| !l.starts_with('*'))
        .collect()
}

#[test]
fn disabled_second_bucket_never_writes_zero() {
    let config = ModelConfig::builder("lr1")
        .with_maxvol(1.0)
        .with_ks(0.0)
        .build()
        .unwrap();
    let deck = render_deck(&config, &monthly_2000(), &DeckOptions::new())
        .unwrap()
        .deck;

    let earth = section(&deck, "* earth properties");
    // capacity, fraction, then three empty bucket tokens
    assert_eq!(earth[0], format!("{:<4} {:<4} {:<4} {:<4} ", "1.0", "0.5", "", ""));
    assert_eq!(earth[0].split_whitespace().count(), 2);
    // ks is a genuine zero; the bucket pair is empty
    assert_eq!(earth[2].split_whitespace().collect::<Vec<_>>(), vec!["0.0", "0.5", "0.5", "0.1"]);

    let initial = section(&deck, "* initial conditions");
    assert_eq!(initial[0].split_whitespace().collect::<Vec<_>>(), vec!["0.5"]);

    let files = section(&deck, "* data filenames");
    assert_eq!(files.last(), Some(&""));
}

#[test]
fn timing_round_trip_wrapped_and_legacy() {
    let schedule = OutputSchedule::new(
        1000,
        (1..=37).map(|i| i * 27).collect(),
    );
    let config = ModelConfig::builder("lr1").build().unwrap();
    for format in [FormatVersion::Wrapped, FormatVersion::Legacy] {
        let opts = DeckOptions::new().with_format(format);
        let deck = render_deck(&config, &schedule, &opts).unwrap().deck;
        assert_eq!(read_output_days(&deck).unwrap(), schedule, "{format:?}");
    }
}

#[test]
fn timing_round_trip_through_template() {
    let config = ModelConfig::builder("lr1").build().unwrap();
    let opts = DeckOptions::new().with_template(TemplateSpec::parse(&["maxvol"]).unwrap());
    let rendered = render_deck(&config, &monthly_2000(), &opts).unwrap();
    let tpl = rendered.template.unwrap();
    assert_eq!(read_output_days(&tpl).unwrap().days(), monthly_2000().days());
}

#[test]
fn template_maxvol_only() {
    let config = ModelConfig::builder("catchment01")
        .with_second_bucket(SecondBucket::new().with_gamma(1.0))
        .build()
        .unwrap();
    let opts = DeckOptions::new().with_template(TemplateSpec::parse(&["maxvol"]).unwrap());
    let rendered = render_deck(&config, &monthly_2000(), &opts).unwrap();
    let tpl = rendered.template.unwrap();

    let mut tpl_lines = tpl.lines();
    assert_eq!(tpl_lines.next(), Some("ptf ~"));
    let tpl_body: Vec<&str> = tpl_lines.collect();
    let deck_body: Vec<&str> = rendered.deck.lines().collect();
    assert_eq!(tpl_body.len(), deck_body.len());

    let token = format!("~{:>16}~", "maxvol_catchme");
    let mut differing = 0;
    for (plain, templ) in deck_body.iter().zip(&tpl_body) {
        if plain != templ {
            differing += 1;
            assert!(plain.starts_with("0.5 "));
            assert!(templ.starts_with(&token));
            assert_eq!(
                &templ[token.len()..],
                &plain[4..],
                "fields after maxvol must be unchanged"
            );
        }
    }
    assert_eq!(differing, 1);
}

#[test]
fn file_pair_template_tokens() {
    let config = ModelConfig::builder("lr1")
        .with_irrigfile(FileRef::with_param("2", 0.3))
        .build()
        .unwrap();
    let opts = DeckOptions::new()
        .with_template(TemplateSpec::parse(&["irrigfile"]).unwrap().with_delimiter('#'));
    let tpl = render_deck(&config, &monthly_2000(), &opts)
        .unwrap()
        .template
        .unwrap();
    assert!(tpl.starts_with("ptf #\n"));
    let files = section(&tpl, "* data filenames");
    assert_eq!(
        files[3],
        format!("#{:>16}# #{:>16}#", "irrfil1_lr1", "irrfil2_lr1")
    );
}

#[test]
fn output_series_section() {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let series = OutputSeries::from_columns(
        "series.out",
        start,
        SeriesColumns {
            columns: vec!["rchg".into()],
            sites: vec!["bore1".into()],
            scales: vec![1.0],
            offsets: vec![0.0],
            lower: vec![0.0],
            upper: vec![10.0],
        },
    )
    .unwrap();
    let config = ModelConfig::builder("lr1").build().unwrap();
    let opts = DeckOptions::new().with_output_series(series);
    let deck = render_deck(&config, &monthly_2000(), &opts).unwrap().deck;
    assert_eq!(
        section(&deck, "* output time series"),
        vec!["series.out", "01/01/2000 00:00:00", "1", "rchg\tbore1\t1.0\t0.0\t0.0\t10.0"]
    );
}

#[test]
fn buffers_and_solver() {
    let config = ModelConfig::builder("lr1").build().unwrap();
    let opts = DeckOptions::new()
        .with_buffers(Buffers::new(vec![0.1, 0.05, 0.0], vec![]))
        .with_solver(SolverOptions::default().with_nstep(4).with_mxiter(500).with_tol(0.001));
    let deck = render_deck(&config, &monthly_2000(), &opts).unwrap().deck;
    assert_eq!(
        section(&deck, "* initial conditions")[1..],
        ["3    0", "0.1 0.05 0.0", ""]
    );
    assert_eq!(section(&deck, "* solution parameters"), vec!["4    500  0.001"]);
}

#[test]
fn write_creates_workspace_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = dir.path().join("nested").join("ws");
    let config = ModelConfig::builder("lr1")
        .with_workspace(&workspace)
        .build()
        .unwrap();
    let opts = DeckOptions::new().with_template(TemplateSpec::parse(&["ks"]).unwrap());

    let files = write_deck(&config, &monthly_2000(), &opts).unwrap();
    assert_eq!(files.deck, workspace.join("lr_lr1.in"));
    assert_eq!(files.template, Some(workspace.join("lr_lr1.tpl")));

    let shorter = OutputSchedule::new(10, vec![10]);
    write_deck(&config, &shorter, &DeckOptions::new()).unwrap();
    let text = std::fs::read_to_string(&files.deck).unwrap();
    assert_eq!(read_output_days(&text).unwrap(), shorter);
}

#[test]
fn rewrite_without_template_removes_old_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = ModelConfig::builder("lr1")
        .with_workspace(dir.path())
        .build()
        .unwrap();
    let tpl = dir.path().join("lr_lr1.tpl");

    let opts = DeckOptions::new().with_template(TemplateSpec::parse(&["ks"]).unwrap());
    write_deck(&config, &monthly_2000(), &opts).unwrap();
    assert!(tpl.exists());

    let files = write_deck(&config, &monthly_2000(), &DeckOptions::new()).unwrap();
    assert_eq!(files.template, None);
    assert!(!tpl.exists());
    assert!(files.deck.exists());

    // Nothing to remove the second time.
    write_deck(&config, &monthly_2000(), &DeckOptions::new()).unwrap();
}

#[test]
fn write_reports_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "not a directory").unwrap();
    let config = ModelConfig::builder("lr1")
        .with_workspace(blocker.join("ws"))
        .build()
        .unwrap();
    let err = write_deck(&config, &monthly_2000(), &DeckOptions::new()).unwrap_err();
    assert!(matches!(err, DeckError::Io { .. }));
}
