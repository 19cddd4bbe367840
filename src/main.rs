use chrono::NaiveDate;
use clap::Parser;
use log::{warn, LevelFilter};
use mortgage::app::{reduce, Action, FormState, RawInputs};
use mortgage::error::Result;
use simple_logger::SimpleLogger;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const INVALID_INPUT_MSG: &str = "Invalid input. Please enter valid numeric values.";

#[derive(Parser)]
/// Fixed-rate mortgage amortization calculator
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Total loan amount. With --years and --rate, prints one schedule and exits.
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<String>,

    /// Loan length in whole years
    #[arg(long, allow_hyphen_values = true)]
    years: Option<String>,

    /// Annual interest rate in percent (6 for 6%)
    #[arg(long, allow_hyphen_values = true)]
    rate: Option<String>,

    /// Date of the first payment, YYYY-MM-DD
    #[arg(long)]
    first_payment: Option<NaiveDate>,

    /// Skip the bar chart
    #[arg(long)]
    no_chart: bool,

    /// Width of the longest chart bar in characters
    #[arg(long, default_value_t = 40)]
    chart_width: usize,

    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
}

impl Cli {
    fn one_shot_inputs(&self) -> Option<RawInputs> {
        match (&self.amount, &self.years, &self.rate) {
            (Some(amount), Some(years), Some(rate)) => {
                let mut inputs = RawInputs::new(amount, years, rate);
                if let Some(date) = self.first_payment {
                    inputs = inputs.with_first_payment(&date.to_string());
                }
                Some(inputs)
            }
            (None, None, None) => None,
            _ => {
                warn!("--amount, --years and --rate must be given together; starting the form");
                None
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    SimpleLogger::new().with_level(cli.log_level).init()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(inputs) = cli.one_shot_inputs() {
        return match reduce(&FormState::default(), Action::Calculate(inputs)) {
            Ok(state) => {
                show(&mut out, &state, cli)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) if e.is_invalid_input() => {
                warn!("{}", e);
                eprintln!("{}", INVALID_INPUT_MSG);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e),
        };
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut state = FormState::default();

    loop {
        let Some(command) = prompt(&mut out, &mut lines, "[c]alculate, c[l]ear or [q]uit:")? else {
            break;
        };
        let action = match command.trim() {
            "c" | "calculate" => {
                let Some(inputs) = read_form(&mut out, &mut lines, cli)? else {
                    break;
                };
                Action::Calculate(inputs)
            }
            "l" | "clear" => Action::Clear,
            "q" | "quit" => break,
            "" => continue,
            other => {
                writeln!(out, "Unknown command '{}'", other)?;
                continue;
            }
        };

        match reduce(&state, action) {
            Ok(next) => {
                state = next;
                show(&mut out, &state, cli)?;
            }
            Err(e) if e.is_invalid_input() => {
                warn!("{}", e);
                eprintln!("{}", INVALID_INPUT_MSG);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn prompt<W, I>(out: &mut W, lines: &mut I, label: &str) -> Result<Option<String>>
where
    W: Write,
    I: Iterator<Item = io::Result<String>>,
{
    write!(out, "{} ", label)?;
    out.flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => {
            writeln!(out)?;
            Ok(None)
        }
    }
}

// None when input ends before the form is filled in
fn read_form<W, I>(out: &mut W, lines: &mut I, cli: &Cli) -> Result<Option<RawInputs>>
where
    W: Write,
    I: Iterator<Item = io::Result<String>>,
{
    let Some(amount) = prompt(out, lines, "Total Loan Amount:")? else {
        return Ok(None);
    };
    let Some(years) = prompt(out, lines, "Loan Length (years):")? else {
        return Ok(None);
    };
    let Some(rate) = prompt(out, lines, "Annual Interest Rate (%):")? else {
        return Ok(None);
    };

    let mut inputs = RawInputs::new(&amount, &years, &rate);
    if let Some(date) = cli.first_payment {
        inputs = inputs.with_first_payment(&date.to_string());
    }
    Ok(Some(inputs))
}

fn show<W: Write>(out: &mut W, state: &FormState, cli: &Cli) -> Result<()> {
    if state.result.is_none() {
        writeln!(out, "Form cleared.")?;
        return Ok(());
    }
    write!(out, "{}", state.text())?;
    if !cli.no_chart {
        if let Some(chart) = state.chart() {
            writeln!(out)?;
            write!(out, "{}", chart.draw(cli.chart_width))?;
        }
    }
    Ok(())
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
