//! Pure conversion functions: TOML config structs -> crate API types.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;

use lumpr_calendar::{
    DayOrDate, OutputSchedule, RecurrenceEvent, RecurrenceWindow, ScheduleSpec, WindowEnd,
    add_days, compute_output_days, parse_date,
};
use lumpr_deck::{
    Buffers, DeckOptions, FormatVersion, LumprepInput, NdayOut, OutputSeries,
    SERIES_DATETIME_FORMAT, SeriesColumns, SolverOptions, TemplateSpec,
};
use lumpr_io::{BridgeFile, Mf6Method, ReadColumn, ResultsConfig, WriteSeries};
use lumpr_model::{FileRef, ModelConfig};

use crate::config::*;

/// Parses the simulation output cadence.
pub fn parse_schedule_spec(nday_out: &NdayOutToml) -> Result<ScheduleSpec> {
    match nday_out {
        NdayOutToml::Count(n) => Ok(ScheduleSpec::Count(*n)),
        NdayOutToml::Days(days) => Ok(ScheduleSpec::Days(days.clone())),
        NdayOutToml::Named(s) => match s.to_lowercase().as_str() {
            "monthly" => Ok(ScheduleSpec::Monthly),
            "annual" => Ok(ScheduleSpec::Annual),
            other => bail!("unknown output cadence: {other:?}"),
        },
    }
}

/// Parses the LUMPREP output interval; a day list is not supported there.
pub fn parse_lumprep_nday_out(nday_out: &NdayOutToml) -> Result<NdayOut> {
    match nday_out {
        NdayOutToml::Count(n) => {
            let n = u32::try_from(*n).context("LUMPREP nday_out too large")?;
            Ok(NdayOut::Interval(n))
        }
        NdayOutToml::Named(s) if s.eq_ignore_ascii_case("monthly") => Ok(NdayOut::Monthly),
        other => bail!("LUMPREP nday_out must be an interval or \"monthly\", got {other:?}"),
    }
}

/// Parses a deck layout name.
pub fn parse_format(s: &str) -> Result<FormatVersion> {
    match s.to_lowercase().as_str() {
        "wrapped" => Ok(FormatVersion::Wrapped),
        "legacy" => Ok(FormatVersion::Legacy),
        other => bail!("unknown deck format: {other:?}"),
    }
}

pub fn parse_day_or_date(v: &DayOrDateToml) -> Result<DayOrDate> {
    match v {
        DayOrDateToml::Offset(days) => Ok(DayOrDate::Offset(*days)),
        DayOrDateToml::Date(s) => Ok(DayOrDate::parse(s)?),
    }
}

/// Resolves the `[simulation]` table into an output schedule.
pub fn build_schedule(sim: &SimulationToml) -> Result<OutputSchedule> {
    let spec = parse_schedule_spec(&sim.nday_out)?;
    let schedule = compute_output_days(
        sim.start_date.as_deref(),
        sim.num_days,
        sim.end_date.as_deref(),
        &spec,
    )
    .context("failed to resolve output schedule")?;
    Ok(schedule)
}

/// Builds a validated [`ModelConfig`] placed in `workspace`.
pub fn build_model_config(model: &ModelToml, workspace: &Path) -> Result<ModelConfig> {
    let mut b = ModelConfig::builder(&model.name).with_workspace(workspace);
    macro_rules! apply {
        ($($field:ident => $method:ident),* $(,)?) => {
            $(
                if let Some(v) = model.$field {
                    b = b.$method(v);
                }
            )*
        };
    }
    apply! {
        maxvol => with_maxvol,
        irrigvolfrac => with_irrigvolfrac,
        rdelay => with_rdelay,
        mdelay => with_mdelay,
        ks => with_ks,
        m => with_m,
        l => with_l,
        mflowmax => with_mflowmax,
        offset => with_offset,
        factor1 => with_factor1,
        factor2 => with_factor2,
        power => with_power,
        elevmin => with_elevmin,
        elevmax => with_elevmax,
        topsurf => with_topsurf,
        vol => with_vol,
    }
    if let Some(ref f) = model.vegfile {
        b = b.with_vegfile(f.clone());
    }
    match (&model.irrigation, &model.irrigfile) {
        (Some(irrigation), None) => {
            b = b.with_irrigfile(FileRef::bare(irrigation_file_name(irrigation, &model.name)));
        }
        (Some(irrigation), Some(f)) => {
            let generated = irrigation_file_name(irrigation, &model.name);
            if *f != FileRef::bare(generated.as_str()) {
                bail!(
                    "model '{}': irrigfile '{f}' does not match the irrigation schedule file '{generated}'",
                    model.name
                );
            }
            b = b.with_irrigfile(f.clone());
        }
        (None, Some(f)) => b = b.with_irrigfile(f.clone()),
        (None, None) => {}
    }
    if let Some(ref f) = model.rainfile {
        b = b.with_rainfile(f);
    }
    if let Some(ref f) = model.epotfile {
        b = b.with_epotfile(f);
    }
    if let Some(ref bucket) = model.second_bucket {
        b = b.with_second_bucket(bucket.clone());
    }
    b.build()
        .with_context(|| format!("invalid model '{}'", model.name))
}

/// Builds the deck options of one model.
pub fn build_deck_options(model: &ModelToml, config: &LumprConfig) -> Result<DeckOptions> {
    let solver = SolverOptions::default()
        .with_nstep(config.solver.nstep)
        .with_mxiter(config.solver.mxiter)
        .with_tol(config.solver.tol);
    let mut options = DeckOptions::new()
        .with_solver(solver)
        .with_format(parse_format(&config.simulation.format)?)
        .with_buffers(Buffers::new(
            model.recharge_buffer.clone(),
            model.macropore_buffer.clone(),
        ));
    if !model.template.is_empty() {
        let spec = TemplateSpec::parse(&model.template)
            .with_context(|| format!("invalid template fields for model '{}'", model.name))?
            .with_delimiter(config.template.delimiter);
        options = options.with_template(spec);
    }
    if let Some(ref series) = model.output_series {
        options = options.with_output_series(build_output_series(series)?);
    }
    options
        .validate()
        .with_context(|| format!("invalid deck options for model '{}'", model.name))?;
    Ok(options)
}

pub fn build_output_series(series: &OutputSeriesToml) -> Result<OutputSeries> {
    let start = NaiveDateTime::parse_from_str(series.start.trim(), SERIES_DATETIME_FORMAT)
        .with_context(|| {
            format!(
                "output series start '{}' is not dd/mm/yyyy HH:MM:SS",
                series.start
            )
        })?;
    let columns = SeriesColumns {
        columns: series.columns.clone(),
        sites: series.sites.clone(),
        scales: series.scales.clone(),
        offsets: series.offsets.clone(),
        lower: series.lower.clone(),
        upper: series.upper.clone(),
    };
    Ok(OutputSeries::from_columns(&series.filename, start, columns)?)
}

/// Expands an irrigation window over the simulation.
///
/// The horizon defaults to the last simulated day.
pub fn build_irrigation(
    irrigation: &IrrigationToml,
    sim: &SimulationToml,
    schedule: &OutputSchedule,
) -> Result<Vec<RecurrenceEvent>> {
    let Some(ref start_date) = sim.start_date else {
        bail!("irrigation windows require [simulation].start_date");
    };
    let date_start = parse_date(start_date)?;
    let end = match irrigation.end {
        Some(ref at) => WindowEnd::At(parse_day_or_date(at)?),
        None => WindowEnd::FractionOfYear(irrigation.fraction_of_year),
    };
    let horizon = match irrigation.horizon {
        Some(ref h) => parse_day_or_date(h)?,
        None => DayOrDate::Offset(i64::from(schedule.num_days())),
    };
    let window = RecurrenceWindow::new(parse_day_or_date(&irrigation.start)?, end)
        .with_rate(irrigation.rate);
    Ok(window.expand(date_start, horizon)?)
}

/// Irrigation schedule file name of a model.
pub fn irrigation_file_name(irrigation: &IrrigationToml, model: &str) -> String {
    irrigation
        .file
        .clone()
        .unwrap_or_else(|| format!("irrig_{model}.dat"))
}

/// Builds LUMPREP run settings spanning the simulation.
pub fn build_lumprep_input(
    lumprep: &LumprepToml,
    sim: &SimulationToml,
    schedule: &OutputSchedule,
) -> Result<LumprepInput> {
    let Some(ref start_date) = sim.start_date else {
        bail!("LUMPREP input requires [simulation].start_date");
    };
    let start = parse_date(start_date)?;
    let end = match sim.end_date {
        Some(ref s) => parse_date(s)?,
        None => add_days(start, i64::from(schedule.num_days()))?,
    };
    let input = LumprepInput::new(start, end, &lumprep.silofile)
        .with_nday_out(parse_lumprep_nday_out(&lumprep.nday_out)?)
        .with_steps_per_day(lumprep.steps_per_day)
        .with_silo_column(&lumprep.silo_column)
        .with_batch_file(&lumprep.batch_file)
        .with_pest_control_file(&lumprep.pest_control_file);
    input.validate()?;
    Ok(input)
}

/// Builds the `lr2series` input; each read block names a configured model.
pub fn build_bridge(bridge: &BridgeToml, models: &[ModelConfig]) -> Result<BridgeFile> {
    let mut file = BridgeFile::new();
    for read in &bridge.read {
        let Some(model) = models.iter().find(|m| m.name() == read.model) else {
            bail!("bridge reads unknown model '{}'", read.model);
        };
        let columns = read
            .columns
            .iter()
            .map(|c| ReadColumn {
                my_name: c.my_name.clone(),
                lumprem_name: c.lumprem_name.clone(),
                divide_by_delta_t: c.divide_by_delta_t,
            })
            .collect();
        file = file.with_read(model.output_file_name(), columns);
    }
    for write in &bridge.write {
        let series = write
            .series
            .iter()
            .map(|s| -> Result<WriteSeries> {
                let method: Mf6Method = s.method.parse().map_err(anyhow::Error::msg)?;
                Ok(WriteSeries {
                    name: s.name.clone(),
                    scale: s.scale,
                    offset: s.offset,
                    method,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        file = file.with_write(&write.file, series);
    }
    file.validate().context("invalid [bridge] configuration")?;
    Ok(file)
}

pub fn build_results_config(results: &ResultsToml) -> ResultsConfig {
    ResultsConfig::default().with_footer_lines(results.footer_lines)
}
