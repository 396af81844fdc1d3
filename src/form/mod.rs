mod format;

use clap::{Parser, ValueEnum};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::core::{
    ChartPoint, CompoundingFrequency, InvalidInputError, MAX_TERM_YEARS, ProjectionInput,
    ProjectionSeries, project, validate_input,
};

pub use format::{format_currency, headline, render_table};

pub const DEFAULT_TERM_YEARS: f64 = 5.0;
pub const DEFAULT_INTEREST_RATE_PERCENT: f64 = 5.0;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R";
pub const CONTRIBUTIONS_LABEL: &str = "Your Contributions";
pub const GROWTH_LABEL: &str = "Investment Growth";

const INITIAL_AMOUNT: &str = "initial amount";
const MONTHLY_CONTRIBUTION: &str = "monthly contribution";
const ANNUAL_INCREASE: &str = "annual increase";
const INVESTMENT_TERM: &str = "investment term";
const ANNUAL_INTEREST_RATE: &str = "annual interest rate";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("unknown compounding frequency {value:?}, expected monthly or yearly")]
    UnknownFrequency { value: String },

    #[error("invalid form payload: {0}")]
    Payload(String),

    #[error(transparent)]
    Invalid(#[from] InvalidInputError),
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Form(_) => 2,
            CliError::Io { .. } | CliError::Serialize(_) => 1,
        }
    }
}

/// Text state of one form field. Blank text means the field is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawValue")]
pub struct RawField(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawValue> for RawField {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Text(text) => RawField(text),
            RawValue::Number(number) => RawField(number.to_string()),
        }
    }
}

impl RawField {
    pub fn new(text: impl Into<String>) -> Self {
        RawField(text.into())
    }

    fn parse(&self, field: &'static str) -> Result<Option<f64>, FormError> {
        let text = self.0.trim();
        if text.is_empty() {
            return Ok(None);
        }
        match text.parse::<f64>() {
            Ok(value) if !value.is_nan() => Ok(Some(value)),
            _ => Err(FormError::NotANumber {
                field,
                value: self.0.clone(),
            }),
        }
    }
}

/// The calculator form as submitted. `FormPayload::default()` is the blank
/// (reset) form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormPayload {
    pub initial_amount: Option<RawField>,
    pub monthly_contribution: Option<RawField>,
    pub annual_increase: Option<RawField>,
    pub investment_term: Option<RawField>,
    pub annual_interest_rate: Option<RawField>,
    pub compounding_frequency: Option<String>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliCompoundingFrequency {
    Monthly,
    Yearly,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "growth",
    about = "Investment growth projection (initial deposit + escalating monthly contributions)"
)]
pub struct Cli {
    #[arg(long, allow_hyphen_values = true, help = "Initial deposit")]
    pub initial_amount: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Amount added every month")]
    pub monthly_contribution: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Annual increase in the monthly contribution in percent"
    )]
    pub annual_increase: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Investment term in whole years, defaults to 5"
    )]
    pub investment_term: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Nominal annual interest rate in percent, defaults to 5"
    )]
    pub annual_interest_rate: Option<String>,
    #[arg(long, value_enum, help = "Compounding frequency, defaults to yearly")]
    pub compounding_frequency: Option<CliCompoundingFrequency>,
    #[arg(
        long,
        help = "JSON form payload to start from, '-' for stdin; explicit flags override it"
    )]
    pub payload: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    pub currency_symbol: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    #[arg(long, help = "Include every month of the projection in JSON output")]
    pub monthly: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub compounding_frequency: CompoundingFrequency,
    pub term_years: u32,
    pub currency_symbol: String,
    pub final_value: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub headline: String,
    pub contributions_label: &'static str,
    pub growth_label: &'static str,
    pub chart_points: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_points: Option<ProjectionSeries>,
}

pub fn build_input(payload: &FormPayload) -> Result<ProjectionInput, FormError> {
    let initial_amount = required(&payload.initial_amount, INITIAL_AMOUNT)?;
    let monthly_contribution = required(&payload.monthly_contribution, MONTHLY_CONTRIBUTION)?;
    let annual_increase_percent = required(&payload.annual_increase, ANNUAL_INCREASE)?;

    let term = optional(&payload.investment_term, INVESTMENT_TERM)?.unwrap_or_else(|| {
        info!("{INVESTMENT_TERM} left blank, using {DEFAULT_TERM_YEARS} years");
        DEFAULT_TERM_YEARS
    });
    let annual_interest_rate_percent =
        optional(&payload.annual_interest_rate, ANNUAL_INTEREST_RATE)?.unwrap_or_else(|| {
            info!("{ANNUAL_INTEREST_RATE} left blank, using {DEFAULT_INTEREST_RATE_PERCENT}%");
            DEFAULT_INTEREST_RATE_PERCENT
        });
    let compounding_frequency = match payload
        .compounding_frequency
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        Some(value) => parse_frequency(value)?,
        None => {
            info!("compounding frequency left blank, using yearly");
            CompoundingFrequency::Yearly
        }
    };

    let input = ProjectionInput {
        initial_amount,
        monthly_contribution,
        annual_increase_percent,
        term_years: term_years_from(term)?,
        annual_interest_rate_percent,
        compounding_frequency,
    };
    validate_input(&input)?;
    Ok(input)
}

pub fn request_from_json(json: &str) -> Result<ProjectionInput, FormError> {
    let payload = serde_json::from_str::<FormPayload>(json)
        .map_err(|e| FormError::Payload(e.to_string()))?;
    build_input(&payload)
}

pub fn parse_frequency(value: &str) -> Result<CompoundingFrequency, FormError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "monthly" => Ok(CompoundingFrequency::Monthly),
        "yearly" => Ok(CompoundingFrequency::Yearly),
        _ => Err(FormError::UnknownFrequency {
            value: value.to_string(),
        }),
    }
}

fn required(field: &Option<RawField>, name: &'static str) -> Result<f64, FormError> {
    optional(field, name)?.ok_or(FormError::Missing { field: name })
}

fn optional(field: &Option<RawField>, name: &'static str) -> Result<Option<f64>, FormError> {
    match field {
        Some(raw) => raw.parse(name),
        None => Ok(None),
    }
}

fn term_years_from(value: f64) -> Result<u32, InvalidInputError> {
    if !value.is_finite() {
        return Err(InvalidInputError::NonFinite {
            field: INVESTMENT_TERM,
        });
    }
    if value < 0.0 {
        return Err(InvalidInputError::Negative {
            field: INVESTMENT_TERM,
            value,
        });
    }
    if value.fract() != 0.0 {
        return Err(InvalidInputError::NonIntegerTerm { value });
    }
    if value == 0.0 {
        return Err(InvalidInputError::ZeroTerm);
    }
    if value > f64::from(MAX_TERM_YEARS) {
        return Err(InvalidInputError::TermTooLong {
            years: value,
            max: MAX_TERM_YEARS,
        });
    }
    Ok(value as u32)
}

pub fn build_response(
    input: &ProjectionInput,
    series: &ProjectionSeries,
    currency_symbol: &str,
    include_monthly: bool,
) -> ProjectionResponse {
    let summary = series.summary();
    ProjectionResponse {
        compounding_frequency: input.compounding_frequency,
        term_years: input.term_years,
        currency_symbol: currency_symbol.to_string(),
        final_value: summary.final_value,
        total_contributions: summary.total_contributions,
        total_growth: summary.total_growth,
        headline: headline(summary.final_value, currency_symbol),
        contributions_label: CONTRIBUTIONS_LABEL,
        growth_label: GROWTH_LABEL,
        chart_points: series.yearly_points(),
        monthly_points: include_monthly.then(|| series.clone()),
    }
}

fn payload_from_cli(cli: &Cli) -> Result<FormPayload, CliError> {
    let mut payload = match &cli.payload {
        Some(path) => {
            let read = if path.as_os_str() == "-" {
                io::read_to_string(io::stdin())
            } else {
                fs::read_to_string(path)
            };
            let text = read.map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str::<FormPayload>(&text)
                .map_err(|e| FormError::Payload(e.to_string()))?
        }
        None => FormPayload::default(),
    };

    if let Some(v) = &cli.initial_amount {
        payload.initial_amount = Some(RawField::new(v.as_str()));
    }
    if let Some(v) = &cli.monthly_contribution {
        payload.monthly_contribution = Some(RawField::new(v.as_str()));
    }
    if let Some(v) = &cli.annual_increase {
        payload.annual_increase = Some(RawField::new(v.as_str()));
    }
    if let Some(v) = &cli.investment_term {
        payload.investment_term = Some(RawField::new(v.as_str()));
    }
    if let Some(v) = &cli.annual_interest_rate {
        payload.annual_interest_rate = Some(RawField::new(v.as_str()));
    }
    if let Some(v) = cli.compounding_frequency {
        let frequency = match v {
            CliCompoundingFrequency::Monthly => "monthly",
            CliCompoundingFrequency::Yearly => "yearly",
        };
        payload.compounding_frequency = Some(frequency.to_string());
    }

    Ok(payload)
}

/// Runs one submit of the form and returns the rendered output.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let payload = payload_from_cli(cli)?;
    let input = build_input(&payload)?;
    info!(
        "projecting {} years at {}% ({:?} compounding)",
        input.term_years, input.annual_interest_rate_percent, input.compounding_frequency
    );
    let series = project(&input).map_err(FormError::from)?;

    match cli.format {
        OutputFormat::Table => {
            let summary = series.summary();
            Ok(render_table(
                &series.yearly_points(),
                summary.final_value,
                &cli.currency_symbol,
            ))
        }
        OutputFormat::Json => {
            let response = build_response(&input, &series, &cli.currency_symbol, cli.monthly);
            Ok(format!("{}\n", serde_json::to_string(&response)?))
        }
    }
}
