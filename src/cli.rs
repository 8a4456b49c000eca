use indoc::formatdoc;

#[derive(Clone, Debug, PartialEq)]
pub struct EmiArgs {
    pub principal: f64,
    pub annual_rate: f64,
    pub months: u32,
    pub prepay: f64,
    pub json: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    Currency(f64),
    Number { value: f64, decimals: u32 },
    Emi(EmiArgs),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Run(Task),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: i32,
    pub message: String,
}

impl ParseError {
    fn usage(bin_name: &str, problem: impl std::fmt::Display) -> Self {
        Self {
            code: 2,
            message: format!("{problem}\n\n{}", help_text(bin_name)),
        }
    }
}

#[must_use]
pub fn help_text(bin_name: &str) -> String {
    formatdoc! {"
        Home Loan Toolkit

        Usage:
          {bin_name} currency <amount>
          {bin_name} number <value> [--decimals N]
          {bin_name} emi <principal> <annual-rate> <months> [--prepay AMOUNT] [--json]

        Options:
          -h, --help       Show this help
          -V, --version    Show version
    "}
}

#[must_use]
pub fn version_text() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// A leading `-` only marks an option when the argument is not a number.
fn is_option(arg: &str) -> bool {
    arg.starts_with('-') && arg.parse::<f64>().is_err()
}

fn parse_value<T: std::str::FromStr>(
    bin_name: &str,
    what: &str,
    raw: &str,
) -> Result<T, ParseError> {
    raw.parse::<T>()
        .map_err(|_| ParseError::usage(bin_name, format!("invalid {what}: {raw}")))
}

pub fn parse_args<I, S>(bin_name: &str, args: I) -> Result<Command, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut positional = Vec::new();
    let mut decimals = None;
    let mut prepay = None;
    let mut json = false;
    let mut show_help = false;
    let mut show_version = false;

    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => show_help = true,
            "-V" | "--version" => show_version = true,
            "--json" => json = true,
            "--decimals" | "--prepay" => {
                let Some(raw) = args.next() else {
                    return Err(ParseError::usage(bin_name, format!("missing value for {arg}")));
                };
                if arg == "--decimals" {
                    decimals = Some(parse_value::<u32>(bin_name, "decimal count", &raw)?);
                } else {
                    prepay = Some(parse_value::<f64>(bin_name, "prepayment", &raw)?);
                }
            }
            _ if is_option(&arg) => {
                return Err(ParseError::usage(bin_name, format!("unknown option: {arg}")));
            }
            _ => positional.push(arg),
        }
    }

    if show_help {
        return Ok(Command::Help);
    }
    if show_version {
        return Ok(Command::Version);
    }

    let Some((command, rest)) = positional.split_first() else {
        return Err(ParseError::usage(bin_name, "missing command"));
    };

    let task = match (command.as_str(), rest) {
        ("currency", [amount]) => Task::Currency(parse_value(bin_name, "amount", amount)?),
        ("number", [value]) => Task::Number {
            value: parse_value(bin_name, "value", value)?,
            decimals: decimals.unwrap_or(0),
        },
        ("emi", [principal, rate, months]) => Task::Emi(EmiArgs {
            principal: parse_value(bin_name, "principal", principal)?,
            annual_rate: parse_value(bin_name, "annual rate", rate)?,
            months: parse_value(bin_name, "tenure in months", months)?,
            prepay: prepay.unwrap_or(0.0),
            json,
        }),
        ("currency" | "number" | "emi", _) => {
            return Err(ParseError::usage(
                bin_name,
                format!("wrong number of arguments for {command}"),
            ));
        }
        _ => {
            return Err(ParseError::usage(
                bin_name,
                format!("unknown command: {command}"),
            ));
        }
    };
    Ok(Command::Run(task))
}
