use loan_toolkit::cli::{self, Command, EmiArgs, Task};
use loan_toolkit::loan::{self, BiweeklyOutcome, LoanTerms, ScheduleSummary};
use loan_toolkit::{format_currency, format_number, logger, ready};
use serde::Serialize;

#[derive(Serialize)]
struct EmiReport {
    terms: LoanTerms,
    emi: f64,
    regular: ScheduleSummary,
    annual_prepayment: f64,
    with_prepayment: Option<ScheduleSummary>,
    biweekly: BiweeklyOutcome,
}

fn main() {
    let bin_name = std::env::args()
        .next()
        .unwrap_or_else(|| "loan-toolkit".to_string());

    let command = match cli::parse_args(&bin_name, std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err.message);
            std::process::exit(err.code);
        }
    };

    let task = match command {
        Command::Help => {
            println!("{}", cli::help_text(&bin_name));
            return;
        }
        Command::Version => {
            println!("{}", cli::version_text());
            return;
        }
        Command::Run(task) => task,
    };

    dotenvy::dotenv().ok();

    let _guard = match logger::init() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("logging disabled: {err:#}");
            None
        }
    };
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        log_dir = %logger::active_log_dir().display(),
        "starting"
    );
    ready::on_ready();

    if let Err(err) = run(task) {
        tracing::error!(error = %err, "command failed");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(task: Task) -> anyhow::Result<()> {
    match task {
        Task::Currency(amount) => println!("{}", format_currency(amount)),
        Task::Number { value, decimals } => println!("{}", format_number(value, decimals)),
        Task::Emi(args) => run_emi(&args)?,
    }
    Ok(())
}

fn run_emi(args: &EmiArgs) -> anyhow::Result<()> {
    let terms = LoanTerms::new(args.principal, args.annual_rate, args.months)?;
    let regular = ScheduleSummary::of(&loan::amortization_schedule(&terms, 0.0)?);
    let with_prepayment = if args.prepay > 0.0 {
        Some(ScheduleSummary::of(&loan::amortization_schedule(
            &terms,
            args.prepay,
        )?))
    } else {
        None
    };

    let report = EmiReport {
        terms,
        emi: terms.emi(),
        regular,
        annual_prepayment: args.prepay,
        with_prepayment,
        biweekly: loan::biweekly_strategy(&terms),
    };
    tracing::debug!(
        principal = terms.principal,
        rate = terms.annual_rate,
        months = terms.months,
        "emi report computed"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Loan:            {} at {}% for {} months",
        format_currency(terms.principal),
        format_number(terms.annual_rate, 2),
        terms.months
    );
    println!("EMI:             {}", format_currency(report.emi));
    println!("Total interest:  {}", format_currency(regular.total_interest));
    println!("Total paid:      {}", format_currency(regular.total_paid));

    if let Some(prepaid) = report.with_prepayment {
        println!();
        println!(
            "With {} prepaid every year:",
            format_currency(report.annual_prepayment)
        );
        println!("  Months:         {}", prepaid.months);
        println!("  Total interest: {}", format_currency(prepaid.total_interest));
        println!(
            "  Interest saved: {}",
            format_currency(regular.total_interest - prepaid.total_interest)
        );
    }

    let biweekly = report.biweekly;
    println!();
    println!(
        "Bi-weekly ({} every two weeks):",
        format_currency(biweekly.biweekly_payment)
    );
    println!(
        "  Months:         {} ({} fewer)",
        biweekly.months, biweekly.months_saved
    );
    println!(
        "  Interest saved: {} ({}%)",
        format_currency(biweekly.savings),
        format_number(biweekly.savings_percent, 1)
    );
    Ok(())
}
