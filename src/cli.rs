//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use crate::adapters::console_table;
use crate::adapters::csv_adapter::{CsvFinanceAdapter, CsvProductAdapter};
use crate::adapters::date_file_adapter::DateFileAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart::{self, SvgChartAdapter};
use crate::domain::clock::{self, DateSelector};
use crate::domain::error::ShelfError;
use crate::domain::shop::Shop;
use crate::ports::chart_port::{ChartKind, ChartPort};
use crate::ports::clock_port::ClockPort;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_CLOCK_FILE: &str = "current_date.txt";
pub const DEFAULT_PRODUCTS_FILE: &str = "products.csv";
pub const DEFAULT_FINANCIAL_FILE: &str = "financial_records.csv";
pub const DEFAULT_CHART_OUTPUT: &str = "financial_overview.svg";

#[derive(Parser, Debug)]
#[command(name = "shelfkeep", about = "Inventory tracking for a small shop")]
pub struct Cli {
    /// INI file with [storage] and [chart] settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory holding the date file and ledgers
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Advance the simulated date by a number of days (negative goes back)
    AdvanceDate {
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
    /// Display the simulated date
    ShowDate {
        #[arg(short, long)]
        verbose: bool,
    },
    /// Buy one unit and place it in stock
    Buy {
        #[arg(short = 'n', long)]
        product_name: String,
        #[arg(short, long, value_parser = parse_price)]
        price: f64,
        /// Expiration date in YYYY-MM-DD format
        #[arg(short, long, value_parser = parse_date_arg)]
        expiration_date: Option<NaiveDate>,
    },
    /// Sell one unit from stock
    Sell {
        #[arg(short = 'n', long)]
        product_name: String,
        #[arg(short, long, value_parser = parse_price)]
        price: f64,
    },
    /// Display the products currently in stock
    Inventory {
        /// Show a count per product instead of every unit
        #[arg(short, long)]
        count: bool,
    },
    /// Display sales, revenue, costs or profit for a day
    Report {
        #[arg(value_enum)]
        information: ReportKind,
        #[command(flatten)]
        day: DayArgs,
    },
    /// Record costs, revenue and profit for a day
    Record {
        #[command(flatten)]
        day: DayArgs,
    },
    /// Chart every recorded day
    Visualize {
        #[arg(short = 't', long = "type", value_enum)]
        chart_type: ChartType,
        /// SVG file to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct DayArgs {
    #[arg(short = 't', long)]
    pub today: bool,
    #[arg(short = 'y', long)]
    pub yesterday: bool,
    /// Day in YYYY-MM-DD format
    #[arg(short = 'd', long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

impl DayArgs {
    pub fn selector(&self) -> DateSelector {
        match (self.today, self.yesterday, self.date) {
            (_, _, Some(date)) => DateSelector::On(date),
            (_, true, None) => DateSelector::Yesterday,
            _ => DateSelector::Today,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sales,
    Revenue,
    Costs,
    Profit,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Bar,
    Line,
}

impl From<ChartType> for ChartKind {
    fn from(value: ChartType) -> Self {
        match value {
            ChartType::Bar => ChartKind::Bar,
            ChartType::Line => ChartKind::Line,
        }
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    clock::parse_date(value).map_err(|_| format!("invalid date {value:?} (expected YYYY-MM-DD)"))
}

fn parse_price(value: &str) -> Result<f64, String> {
    let price: f64 = value
        .parse()
        .map_err(|_| format!("invalid price {value:?}"))?;
    if !price.is_finite() || price < 0.0 {
        return Err(format!("price must be a non-negative amount, got {value}"));
    }
    Ok(price)
}

/// Resolved file locations and chart dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub clock_file: PathBuf,
    pub products_file: PathBuf,
    pub financial_file: PathBuf,
    pub chart_output: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ShelfError> {
    match path {
        None => Ok(FileConfigAdapter::empty()),
        Some(path) => FileConfigAdapter::from_file(path).map_err(|e| ShelfError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Resolve settings with precedence: CLI flag, then config, then defaults.
pub fn build_settings(
    config: &dyn ConfigPort,
    data_dir_override: Option<&Path>,
) -> Result<Settings, ShelfError> {
    let data_dir = match data_dir_override {
        Some(dir) => dir.to_path_buf(),
        None => config
            .get_string("storage", "data_dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let storage_file = |key: &str, default: &str| -> PathBuf {
        let name = config
            .get_string("storage", key)
            .unwrap_or_else(|| default.to_string());
        data_dir.join(name)
    };

    Ok(Settings {
        clock_file: storage_file("clock_file", DEFAULT_CLOCK_FILE),
        products_file: storage_file("products_file", DEFAULT_PRODUCTS_FILE),
        financial_file: storage_file("financial_file", DEFAULT_FINANCIAL_FILE),
        chart_output: config
            .get_string("chart", "output")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_OUTPUT)),
        chart_width: chart_side(config, "width", svg_chart::DEFAULT_WIDTH, svg_chart::MIN_WIDTH)?,
        chart_height: chart_side(
            config,
            "height",
            svg_chart::DEFAULT_HEIGHT,
            svg_chart::MIN_HEIGHT,
        )?,
    })
}

/// A configured chart side must leave room for the plot inside the margins.
fn chart_side(
    config: &dyn ConfigPort,
    key: &str,
    default: u32,
    min: u32,
) -> Result<u32, ShelfError> {
    let invalid = |reason: String| ShelfError::ConfigInvalid {
        section: "chart".into(),
        key: key.into(),
        reason,
    };
    match config.get_int("chart", key) {
        Ok(None) => Ok(default),
        Ok(Some(value)) if value < i64::from(min) => {
            Err(invalid(format!("must be at least {min}, got {value}")))
        }
        Ok(Some(value)) => u32::try_from(value).map_err(|_| invalid(format!("too large: {value}"))),
        Err(raw) => Err(invalid(format!("not an integer: {raw:?}"))),
    }
}

/// File-backed stores for one invocation, created on first use.
pub struct Workspace {
    pub settings: Settings,
    pub clock: DateFileAdapter,
    pub products: CsvProductAdapter,
    pub finances: CsvFinanceAdapter,
    pub chart: SvgChartAdapter,
}

impl Workspace {
    /// Open the stores, creating missing files. A new date file starts at
    /// today's real calendar date.
    pub fn open(settings: Settings) -> Result<Self, ShelfError> {
        let clock = DateFileAdapter::new(settings.clock_file.clone());
        let products = CsvProductAdapter::new(settings.products_file.clone());
        let finances = CsvFinanceAdapter::new(settings.financial_file.clone());

        clock.ensure_exists(Local::now().date_naive())?;
        products.ensure_exists()?;
        finances.ensure_exists()?;
        debug!(?settings, "opened workspace");

        let chart = SvgChartAdapter::new(settings.chart_width, settings.chart_height);
        Ok(Workspace {
            settings,
            clock,
            products,
            finances,
            chart,
        })
    }

    pub fn shop(&self) -> Result<Shop<'_>, ShelfError> {
        Ok(Shop::new(
            self.clock.current_date()?,
            &self.products,
            &self.finances,
        ))
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match execute(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Run one parsed command, writing user-facing output to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<(), ShelfError> {
    let config = load_config(cli.config.as_ref())?;
    let settings = build_settings(&config, cli.data_dir.as_deref())?;
    let workspace = Workspace::open(settings)?;

    match &cli.command {
        Command::AdvanceDate { days } => run_advance_date(&workspace, *days, out),
        Command::ShowDate { verbose } => run_show_date(&workspace, *verbose, out),
        Command::Buy {
            product_name,
            price,
            expiration_date,
        } => run_buy(&workspace, product_name, *price, *expiration_date, out),
        Command::Sell {
            product_name,
            price,
        } => run_sell(&workspace, product_name, *price, out),
        Command::Inventory { count } => run_inventory(&workspace, *count, out),
        Command::Report { information, day } => {
            run_report(&workspace, *information, day.selector(), out)
        }
        Command::Record { day } => run_record(&workspace, day.selector(), out),
        Command::Visualize { chart_type, output } => run_visualize(
            &workspace,
            (*chart_type).into(),
            output.as_deref(),
            out,
        ),
    }
}

fn run_advance_date(ws: &Workspace, days: i64, out: &mut dyn Write) -> Result<(), ShelfError> {
    let today = ws.clock.current_date()?;
    let new_date = clock::advance(today, days)?;
    ws.clock.set_current_date(new_date)?;
    writeln!(out, "OK")?;
    writeln!(out, "Current date has been set to: {new_date}")?;
    Ok(())
}

fn run_show_date(ws: &Workspace, verbose: bool, out: &mut dyn Write) -> Result<(), ShelfError> {
    let today = ws.clock.current_date()?;
    if verbose {
        writeln!(out, "Current date is: {today}")?;
    } else {
        writeln!(out, "{today}")?;
    }
    Ok(())
}

fn run_buy(
    ws: &Workspace,
    name: &str,
    price: f64,
    expiration_date: Option<NaiveDate>,
    out: &mut dyn Write,
) -> Result<(), ShelfError> {
    ws.shop()?.buy(name, price, expiration_date)?;
    writeln!(out, "OK")?;
    writeln!(out, "Added {name} to inventory.")?;
    Ok(())
}

fn run_sell(ws: &Workspace, name: &str, price: f64, out: &mut dyn Write) -> Result<(), ShelfError> {
    match ws.shop()?.sell(name, price) {
        Ok(sold) => {
            writeln!(out, "OK")?;
            writeln!(out, "Successfully sold {}.", sold.product_name)?;
            Ok(())
        }
        Err(e @ ShelfError::NotInStock { .. }) => {
            writeln!(out, "ERROR")?;
            writeln!(out, "{e}")?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn run_inventory(ws: &Workspace, count: bool, out: &mut dyn Write) -> Result<(), ShelfError> {
    let shop = ws.shop()?;
    let table = if count {
        let counts = shop.stock_counts()?;
        (!counts.is_empty()).then(|| console_table::render_inventory_counts(&counts))
    } else {
        let lines = shop.stock()?;
        (!lines.is_empty()).then(|| console_table::render_inventory(&lines))
    };

    match table {
        Some(table) => write!(out, "{table}")?,
        None => {
            writeln!(out, "ERROR")?;
            writeln!(out, "No products found in stock.")?;
        }
    }
    Ok(())
}

fn run_report(
    ws: &Workspace,
    kind: ReportKind,
    selector: DateSelector,
    out: &mut dyn Write,
) -> Result<(), ShelfError> {
    let shop = ws.shop()?;
    let date = selector.resolve(shop.today())?;

    let (subject, amount) = match kind {
        ReportKind::Sales => {
            let sold = shop.sold_products(date)?;
            if sold.is_empty() {
                writeln!(out, "ERROR")?;
                writeln!(out, "No sales data available.")?;
            } else {
                let title = selector.heading("sales");
                write!(out, "{}", console_table::render_sales(&title, &sold))?;
            }
            return Ok(());
        }
        ReportKind::Revenue => ("revenue", shop.summary(date)?.revenue),
        ReportKind::Costs => ("costs of sold products", shop.summary(date)?.costs),
        ReportKind::Profit => ("profit", shop.summary(date)?.profit),
    };

    writeln!(
        out,
        "{}: {}",
        selector.heading(subject),
        console_table::signed_money(amount)
    )?;
    Ok(())
}

fn run_record(ws: &Workspace, selector: DateSelector, out: &mut dyn Write) -> Result<(), ShelfError> {
    let shop = ws.shop()?;
    let date = selector.resolve(shop.today())?;
    shop.record(date)?;

    writeln!(out, "OK")?;
    match selector {
        DateSelector::Today => {
            writeln!(out, "Successfully recorded today's costs, revenue and profit.")?
        }
        DateSelector::Yesterday => writeln!(
            out,
            "Successfully recorded yesterday's costs, revenue and profit."
        )?,
        DateSelector::On(date) => writeln!(
            out,
            "Successfully recorded costs, revenue and profit for {date}."
        )?,
    }
    Ok(())
}

fn run_visualize(
    ws: &Workspace,
    kind: ChartKind,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), ShelfError> {
    let records = ws.shop()?.financial_history()?;
    if records.is_empty() {
        writeln!(out, "ERROR")?;
        writeln!(out, "No financial records available.")?;
        return Ok(());
    }

    let path = output.unwrap_or(ws.settings.chart_output.as_path());
    ws.chart.render(&records, kind, path)?;
    writeln!(out, "OK")?;
    writeln!(out, "Successfully created chart: {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn advance_date_accepts_negative_days() {
        let cli = Cli::try_parse_from(["shelfkeep", "advance-date", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::AdvanceDate { days: -3 }));
    }

    #[test]
    fn buy_parses_optional_expiration() {
        let cli = Cli::try_parse_from([
            "shelfkeep",
            "buy",
            "--product-name",
            "milk",
            "--price",
            "0.89",
            "--expiration-date",
            "2024-01-20",
        ])
        .unwrap();
        match cli.command {
            Command::Buy {
                product_name,
                price,
                expiration_date,
            } => {
                assert_eq!(product_name, "milk");
                assert_eq!(price, 0.89);
                assert_eq!(expiration_date, NaiveDate::from_ymd_opt(2024, 1, 20));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn malformed_date_is_usage_error() {
        let err = Cli::try_parse_from([
            "shelfkeep", "buy", "-n", "milk", "-p", "1", "-e", "20-01-2024",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn negative_price_rejected() {
        assert!(Cli::try_parse_from(["shelfkeep", "sell", "-n", "milk", "-p", "-1"]).is_err());
        assert!(parse_price("NaN").is_err());
        assert_eq!(parse_price("2.50"), Ok(2.5));
    }

    #[test]
    fn report_requires_exactly_one_day() {
        assert!(Cli::try_parse_from(["shelfkeep", "report", "revenue"]).is_err());
        assert!(
            Cli::try_parse_from(["shelfkeep", "report", "revenue", "--today", "--yesterday"])
                .is_err()
        );
        let cli =
            Cli::try_parse_from(["shelfkeep", "report", "profit", "-d", "2024-01-02"]).unwrap();
        match cli.command {
            Command::Report { information, day } => {
                assert_eq!(information, ReportKind::Profit);
                assert_eq!(
                    day.selector(),
                    DateSelector::On(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn record_yesterday_selector() {
        let cli = Cli::try_parse_from(["shelfkeep", "record", "--yesterday"]).unwrap();
        match cli.command {
            Command::Record { day } => assert_eq!(day.selector(), DateSelector::Yesterday),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn visualize_requires_type() {
        assert!(Cli::try_parse_from(["shelfkeep", "visualize"]).is_err());
        let cli = Cli::try_parse_from(["shelfkeep", "visualize", "--type", "line"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Visualize {
                chart_type: ChartType::Line,
                output: None
            }
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["shelfkeep", "show-date", "--data-dir", "/tmp/shop"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/shop")));
    }
}
