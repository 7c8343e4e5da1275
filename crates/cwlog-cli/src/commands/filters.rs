use anyhow::{Context as _, Result};
use clap::Args;
use cwlog_core::time::{format_millis_local, parse_local_datetime_millis};
use cwlog_core::{
    find_preset, parse_identifier, DateRange, Diagnostic, DiagnosticSink, FilterSnapshot,
    TracingSink, DATE_PRESETS,
};
use serde::Serialize;

use crate::commands::{print_json, Context};
use crate::error::invalid_input;

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub text: String,
}

#[derive(Debug, Args)]
pub struct TridArgs {
    pub identifier: String,
}

#[derive(Debug, Args)]
pub struct PresetArgs {
    pub value: String,
}

#[derive(Debug, Args)]
pub struct BoundArgs {
    /// Local date-time; an empty value clears the bound
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FiltersDto<'a> {
    filters: &'a FilterSnapshot,
    active: bool,
    date_range: Option<DateRange>,
    pattern: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifierDto {
    identifier: String,
    timestamp: String,
    window_start: String,
    window_end: String,
}

pub fn show(ctx: &Context<'_>) -> Result<()> {
    let filters = ctx.session.filters();
    let dto = FiltersDto {
        filters: filters.snapshot(),
        active: filters.is_active(),
        date_range: filters.date_range(),
        pattern: filters.cloudwatch_pattern(),
    };

    if ctx.json {
        return print_json(&dto);
    }

    let snapshot = dto.filters;
    let preset_label = find_preset(&snapshot.date_preset)
        .map(|preset| preset.label)
        .unwrap_or("unknown preset");
    println!("search:  {}", or_dash(&snapshot.search_query));
    println!("trid:    {}", or_dash(&snapshot.trid_query));
    println!("preset:  {} ({})", snapshot.date_preset, preset_label);
    println!("start:   {}", or_dash(&snapshot.start_date));
    println!("end:     {}", or_dash(&snapshot.end_date));
    println!("case:    {}", on_off(snapshot.case_sensitive));
    println!("regex:   {}", on_off(snapshot.use_regex));
    println!("active:  {}", if dto.active { "yes" } else { "no" });
    match dto.date_range {
        Some(range) => println!(
            "range:   {} .. {}",
            format_millis_local(range.start),
            format_millis_local(range.end)
        ),
        None => println!("range:   -"),
    }
    println!("pattern: {}", dto.pattern.as_deref().unwrap_or("-"));
    Ok(())
}

pub fn list_presets(json: bool) -> Result<()> {
    if json {
        return print_json(&DATE_PRESETS);
    }
    for preset in DATE_PRESETS.iter() {
        println!("{:<7} {}", preset.value, preset.label);
    }
    Ok(())
}

pub fn search(ctx: &mut Context<'_>, args: SearchArgs) -> Result<()> {
    ctx.session.filters_mut().set_search_query(args.text);
    show(ctx)
}

pub fn trid(ctx: &mut Context<'_>, args: TridArgs) -> Result<()> {
    if !ctx.session.filters_mut().set_from_identifier(&args.identifier) {
        return Err(identifier_error(&args.identifier));
    }
    show(ctx)
}

pub fn parse_id(json: bool, args: TridArgs) -> Result<()> {
    let sink = TracingSink;
    let window = match parse_identifier(&args.identifier) {
        Ok(window) => window,
        Err(error) => {
            sink.report(Diagnostic::IdentifierRejected {
                raw: args.identifier.clone(),
                error: error.clone(),
            });
            return Err(error)
                .with_context(|| format!("invalid identifier {:?}", args.identifier));
        }
    };
    sink.report(Diagnostic::IdentifierParsed {
        raw: args.identifier.clone(),
        timestamp: window.timestamp,
        window_start: window.window_start,
        window_end: window.window_end,
    });
    let dto = IdentifierDto {
        identifier: args.identifier.trim().to_string(),
        timestamp: window.timestamp.to_rfc3339(),
        window_start: window.window_start.to_rfc3339(),
        window_end: window.window_end.to_rfc3339(),
    };

    if json {
        return print_json(&dto);
    }
    println!("timestamp: {}", dto.timestamp);
    println!("window:    {} .. {}", dto.window_start, dto.window_end);
    Ok(())
}

pub fn preset(ctx: &mut Context<'_>, args: PresetArgs) -> Result<()> {
    if find_preset(&args.value).is_none() {
        let known: Vec<&str> = DATE_PRESETS.iter().map(|preset| preset.value).collect();
        return Err(invalid_input(format!(
            "unknown preset {:?} (expected one of: {})",
            args.value,
            known.join(", ")
        )));
    }
    ctx.session.filters_mut().set_date_preset(args.value);
    show(ctx)
}

pub fn start(ctx: &mut Context<'_>, args: BoundArgs) -> Result<()> {
    validate_bound(&args.value)?;
    ctx.session.filters_mut().set_start_date(args.value);
    show(ctx)
}

pub fn end(ctx: &mut Context<'_>, args: BoundArgs) -> Result<()> {
    validate_bound(&args.value)?;
    ctx.session.filters_mut().set_end_date(args.value);
    show(ctx)
}

pub fn toggle_case(ctx: &mut Context<'_>) -> Result<()> {
    ctx.session.filters_mut().toggle_case_sensitive();
    show(ctx)
}

pub fn toggle_regex(ctx: &mut Context<'_>) -> Result<()> {
    ctx.session.filters_mut().toggle_use_regex();
    show(ctx)
}

pub fn reset(ctx: &mut Context<'_>) -> Result<()> {
    ctx.session.filters_mut().reset();
    show(ctx)
}

pub fn query(ctx: &Context<'_>) -> Result<()> {
    let query = ctx.session.filters().query();
    if ctx.json {
        return print_json(&query);
    }
    match query {
        Some(query) => {
            println!("start_time:     {}", query.start_time);
            println!("end_time:       {}", query.end_time);
            println!(
                "filter_pattern: {}",
                query.filter_pattern.as_deref().unwrap_or("-")
            );
            println!("case_sensitive: {}", query.case_sensitive);
        }
        None => println!("no time range selected"),
    }
    Ok(())
}

fn validate_bound(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    parse_local_datetime_millis(value)
        .map(|_| ())
        .with_context(|| format!("invalid date {:?}", value))
}

fn identifier_error(raw: &str) -> anyhow::Error {
    match parse_identifier(raw) {
        Err(err) => anyhow::Error::new(err).context(format!("invalid identifier {:?}", raw)),
        Ok(_) => invalid_input(format!("identifier {:?} was not applied", raw)),
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
