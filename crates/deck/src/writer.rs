//! LUMPREM input deck and template rendering.

use std::fs;
use std::path::{Path, PathBuf};

use lumpr_calendar::OutputSchedule;
use lumpr_model::{Field, FileRef, ModelConfig, SecondBucket, fmt_float};
use tracing::{debug, info};

use crate::error::DeckError;
use crate::options::DeckOptions;
use crate::template::TemplateSpec;

pub(crate) const EARTH_PROPERTIES: &str = "* earth properties";
pub(crate) const VOLUME_TO_ELEVATION: &str = "* volume to elevation";
pub(crate) const TOPOGRAPHIC_SURFACE: &str = "* topographic surface";
pub(crate) const INITIAL_CONDITIONS: &str = "* initial conditions";
pub(crate) const SOLUTION_PARAMETERS: &str = "* solution parameters";
pub(crate) const TIMING_INFORMATION: &str = "* timing information";
pub(crate) const DATA_FILENAMES: &str = "* data filenames";
pub(crate) const OUTPUT_TIME_SERIES: &str = "* output time series";

/// A value on a field line, tagged with the field it came from when it can
/// be templated.
struct Slot {
    text: String,
    key: Option<(Field, usize)>,
}

impl Slot {
    fn value(field: Field, value: f64) -> Self {
        Self {
            text: fmt_float(value),
            key: Some((field, 0)),
        }
    }

    fn optional(field: Field, value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::value(field, v),
            None => Self::fixed(String::new()),
        }
    }

    fn fixed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            key: None,
        }
    }

    fn file(field: Field, file: &FileRef) -> Vec<Slot> {
        let keyed = file.is_templatable();
        file.tokens()
            .into_iter()
            .enumerate()
            .map(|(i, text)| Slot {
                text,
                key: keyed.then_some((field, i)),
            })
            .collect()
    }
}

enum Line {
    Marker(&'static str),
    Fields(Vec<Slot>),
    Text(String),
}

/// Rendered deck text, plus the template when one was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDeck {
    pub deck: String,
    pub template: Option<String>,
}

/// Paths of the files written by [`write_deck`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeckFiles {
    pub deck: PathBuf,
    pub template: Option<PathBuf>,
}

/// Renders the deck (and template) for one model without touching disk.
///
/// # Errors
///
/// Returns [`DeckError::InvalidOptions`] or [`DeckError::InvalidDelimiter`]
/// for unusable options, and [`DeckError::NotTemplatable`] if the template
/// selects a field with no value to stand in for.
pub fn render_deck(
    config: &ModelConfig,
    schedule: &OutputSchedule,
    options: &DeckOptions,
) -> Result<RenderedDeck, DeckError> {
    options.validate()?;
    if let Some(spec) = options.template() {
        check_templatable(config, spec)?;
    }

    let lines = layout(config, schedule, options);
    let deck = render(&lines, None, config.name());
    let template = options
        .template()
        .map(|spec| render(&lines, Some(spec), config.name()));
    Ok(RenderedDeck { deck, template })
}

/// Writes `lr_<name>.in` (and `lr_<name>.tpl` when a template is configured)
/// into the model's workspace, creating the directory if needed. Existing
/// files are overwritten; a template left by an earlier run is deleted when
/// none is configured.
///
/// # Errors
///
/// Every error of [`render_deck`], raised before any file is touched, and
/// [`DeckError::Io`] on write failure.
pub fn write_deck(
    config: &ModelConfig,
    schedule: &OutputSchedule,
    options: &DeckOptions,
) -> Result<DeckFiles, DeckError> {
    let rendered = render_deck(config, schedule, options)?;
    let dir = config.workspace();
    fs::create_dir_all(dir).map_err(|e| DeckError::io(dir, e))?;

    let deck = dir.join(config.deck_file_name());
    write_text(&deck, &rendered.deck)?;
    info!(model = config.name(), path = %deck.display(), "deck written");

    let template = match rendered.template {
        Some(text) => {
            let path = dir.join(config.template_file_name());
            write_text(&path, &text)?;
            info!(model = config.name(), path = %path.display(), "template written");
            Some(path)
        }
        None => {
            let stale = dir.join(config.template_file_name());
            match fs::remove_file(&stale) {
                Ok(()) => {
                    info!(model = config.name(), path = %stale.display(), "stale template removed");
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(DeckError::io(stale, e)),
            }
            None
        }
    };
    Ok(DeckFiles { deck, template })
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<(), DeckError> {
    fs::write(path, text).map_err(|e| DeckError::io(path, e))
}

fn check_templatable(config: &ModelConfig, spec: &TemplateSpec) -> Result<(), DeckError> {
    let not_templatable = |field: Field, reason: &str| DeckError::NotTemplatable {
        field: field.name().to_string(),
        reason: reason.to_string(),
    };
    for &field in spec.fields() {
        if field.is_second_bucket() {
            let Some(bucket) = config.second_bucket() else {
                return Err(not_templatable(field, "second bucket disabled"));
            };
            if bucket_value(bucket, field).is_none() {
                return Err(not_templatable(field, "value not set"));
            }
        }
        let file = match field {
            Field::Vegfile => Some(config.vegfile()),
            Field::Irrigfile => Some(config.irrigfile()),
            _ => None,
        };
        if let Some(file) = file
            && !file.is_templatable()
        {
            return Err(not_templatable(field, "a file name, not a code/parameter pair"));
        }
    }
    Ok(())
}

fn bucket_value(bucket: &SecondBucket, field: Field) -> Option<f64> {
    match field {
        Field::Maxvol2 => bucket.maxvol2(),
        Field::Vol2extra => bucket.vol2extra(),
        Field::Gamma => bucket.gamma(),
        Field::Ks2 => bucket.ks2(),
        Field::M2 => bucket.m2(),
        Field::Vol2 => bucket.vol2(),
        _ => None,
    }
}

fn layout(config: &ModelConfig, schedule: &OutputSchedule, options: &DeckOptions) -> Vec<Line> {
    use Line::{Fields, Marker, Text};

    let bucket = config.second_bucket();
    let b = |field: Field| Slot::optional(field, bucket.and_then(|bk| bucket_value(bk, field)));
    let list = |values: &[f64]| values.iter().map(|v| fmt_float(*v)).collect::<Vec<_>>().join(" ");

    let mut lines = vec![
        Marker(EARTH_PROPERTIES),
        Fields(vec![
            Slot::value(Field::Maxvol, config.maxvol()),
            Slot::value(Field::Irrigvolfrac, config.irrigvolfrac()),
            b(Field::Maxvol2),
            b(Field::Vol2extra),
            b(Field::Gamma),
        ]),
        Fields(vec![
            Slot::value(Field::Rdelay, config.rdelay()),
            Slot::value(Field::Mdelay, config.mdelay()),
        ]),
        Fields(vec![
            Slot::value(Field::Ks, config.ks()),
            Slot::value(Field::M, config.m()),
            Slot::value(Field::L, config.l()),
            Slot::value(Field::Mflowmax, config.mflowmax()),
            b(Field::Ks2),
            b(Field::M2),
        ]),
        Marker(VOLUME_TO_ELEVATION),
        Fields(vec![
            Slot::value(Field::Offset, config.offset()),
            Slot::value(Field::Factor1, config.factor1()),
            Slot::value(Field::Factor2, config.factor2()),
            Slot::value(Field::Power, config.power()),
            Slot::value(Field::Elevmin, config.elevmin()),
            Slot::value(Field::Elevmax, config.elevmax()),
        ]),
        Marker(TOPOGRAPHIC_SURFACE),
        Fields(vec![Slot::value(Field::Topsurf, config.topsurf())]),
        Marker(INITIAL_CONDITIONS),
        Fields(vec![Slot::value(Field::Vol, config.vol()), b(Field::Vol2)]),
    ];

    let buffers = options.buffers();
    lines.push(Fields(vec![
        Slot::fixed(buffers.recharge().len().to_string()),
        Slot::fixed(buffers.macropore().len().to_string()),
    ]));
    lines.push(Text(list(buffers.recharge())));
    lines.push(Text(list(buffers.macropore())));

    let solver = options.solver();
    lines.push(Marker(SOLUTION_PARAMETERS));
    lines.push(Fields(vec![
        Slot::fixed(solver.nstep().to_string()),
        Slot::fixed(solver.mxiter().to_string()),
        Slot::fixed(fmt_float(solver.tol())),
    ]));

    lines.push(Marker(TIMING_INFORMATION));
    lines.push(Fields(vec![
        Slot::fixed(schedule.num_days().to_string()),
        Slot::fixed(schedule.len().to_string()),
    ]));
    let days: Vec<String> = schedule.days().iter().map(u32::to_string).collect();
    lines.extend(options.format().list_lines(&days).into_iter().map(Text));

    lines.push(Marker(DATA_FILENAMES));
    lines.push(Fields(Slot::file(Field::Vegfile, config.vegfile())));
    lines.push(Fields(vec![Slot::fixed(config.rainfile())]));
    lines.push(Fields(vec![Slot::fixed(config.epotfile())]));
    lines.push(Fields(Slot::file(Field::Irrigfile, config.irrigfile())));
    lines.push(Fields(vec![Slot::fixed(
        bucket.and_then(SecondBucket::epotfile2).unwrap_or_default(),
    )]));

    if let Some(series) = options.output_series() {
        lines.push(Marker(OUTPUT_TIME_SERIES));
        lines.extend(series.lines().into_iter().map(Text));
    }

    debug!(model = config.name(), n_lines = lines.len(), "deck laid out");
    lines
}

fn render(lines: &[Line], template: Option<&TemplateSpec>, model: &str) -> String {
    let mut out = String::new();
    if let Some(spec) = template {
        out.push_str(&spec.header());
        out.push('\n');
    }
    for line in lines {
        match line {
            Line::Marker(marker) => out.push_str(marker),
            Line::Text(text) => out.push_str(text),
            Line::Fields(slots) => {
                let texts: Vec<String> = slots
                    .iter()
                    .map(|slot| match (template, slot.key) {
                        (Some(spec), Some((field, part))) if spec.selects(field) => {
                            spec.token(field.param_names()[part], model)
                        }
                        _ => slot.text.clone(),
                    })
                    .collect();
                out.push_str(&crate::format::field_line(&texts));
            }
        }
        out.push('\n');
    }
    out
}
