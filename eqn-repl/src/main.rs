mod error;

use eqn_convert::{lenient, Converter};
use eqn_parser::parser::parse_equation;
use error::Error;
use log::{debug, LevelFilter};
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}, process::ExitCode};

/// The notation a line of input is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Simple,
    Presentation,
    Canonical,
}

impl Notation {
    /// Guesses the notation of the line: LaTeX commands mean presentation markup, and a wrapper
    /// or `**` means canonical notation.
    fn classify(line: &str, converter: &Converter) -> Self {
        if line.contains('\\') {
            Self::Presentation
        } else if line.contains("**") || converter.unwrap_equality(line).is_some() {
            Self::Canonical
        } else {
            Self::Simple
        }
    }
}

/// Every form of a line of input.
struct Forms {
    canonical: String,
    presentation: String,
    wrapped: Option<String>,
    simple: String,
}

/// Converts the line into every notation.
fn convert(line: &str, notation: Notation, converter: &Converter) -> Forms {
    let (canonical, presentation) = match notation {
        Notation::Simple => (
            converter.simple_to_canonical(line),
            converter.simple_to_presentation(line),
        ),
        Notation::Presentation => {
            let canonical = converter.presentation_to_canonical(line);
            let presentation = converter.canonical_to_presentation(&canonical);
            (canonical, presentation)
        },
        Notation::Canonical => {
            let unwrapped = converter.unwrap_equality(line).unwrap_or_else(|| line.to_owned());
            (
                converter.simple_to_canonical(&unwrapped),
                converter.canonical_to_presentation(line),
            )
        },
    };

    Forms {
        wrapped: converter.wrap_simple(&canonical),
        simple: converter.canonical_to_simple(&canonical),
        canonical,
        presentation,
    }
}

/// Returns the error of the strict parse of the line, if any. When there is one, the lenient
/// rewrites produced the output instead.
fn strict_parse_error(line: &str, notation: Notation, converter: &Converter) -> Option<Error> {
    let source = match notation {
        Notation::Simple => line.to_owned(),
        Notation::Presentation => lenient::presentation_to_canonical(line),
        Notation::Canonical => converter.unwrap_equality(line).unwrap_or_else(|| line.to_owned()),
    };
    parse_equation(&source)
        .err()
        .map(|err| Error::Parse { source, err })
}

/// Converts the line into every notation, printing each form. Parse errors are reported to
/// stderr before the output.
fn read_convert(input: &str, converter: &Converter) {
    let line = input.trim();
    if line.is_empty() {
        return;
    }

    let notation = Notation::classify(line, converter);
    debug!("`{}` classified as {:?}", line, notation);

    if let Some(err) = strict_parse_error(line, notation, converter) {
        err.report_to_stderr(line);
    }

    let forms = convert(line, notation, converter);
    println!("canonical:    {}", forms.canonical);
    println!("presentation: {}", forms.presentation);
    if let Some(wrapped) = forms.wrapped {
        println!("wrapped:      {}", wrapped);
    }
    println!("simple:       {}", forms.simple);

    match converter.to_checker_equation(line) {
        Ok(equation) => println!("checker:      {}", equation),
        Err(err) => Error::Check(err).report_to_stderr(line),
    }
}

/// Initializes logging to stderr, at the level named by the `EQN_LOG` environment variable.
fn init_logger() {
    let level = std::env::var("EQN_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    // a second logger cannot be installed, and there is nothing else to log to
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

/// Reads all of the input, from the file if one is given, or from stdin otherwise.
fn read_all(filename: Option<String>) -> io::Result<String> {
    let mut input = String::new();
    match filename {
        Some(filename) => BufReader::new(File::open(filename)?).read_to_string(&mut input)?,
        None => io::stdin().read_to_string(&mut input)?,
    };
    Ok(input)
}

fn main() -> ExitCode {
    init_logger();

    let converter = Converter::default();
    let filename = std::env::args().nth(1);

    if filename.is_some() || !io::stdin().is_terminal() {
        // convert every line of the source file or stdin
        let input = match read_all(filename) {
            Ok(input) => input,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };

        for line in input.lines() {
            read_convert(line, &converter);
        }
        return ExitCode::SUCCESS;
    }

    // run the repl / interactive mode
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    fn process_line(rl: &mut DefaultEditor, converter: &Converter) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        read_convert(&input, converter);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &converter) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        let converter = Converter::default();
        assert_eq!(Notation::classify("\\frac{1}{x}=2", &converter), Notation::Presentation);
        assert_eq!(Notation::classify("Eq(x, 2)", &converter), Notation::Canonical);
        assert_eq!(Notation::classify("x**(2) = 4", &converter), Notation::Canonical);
        assert_eq!(Notation::classify("x^2 = 4", &converter), Notation::Simple);
    }

    #[test]
    fn every_form() {
        let converter = Converter::default();
        let forms = convert("2/x = 5", Notation::Simple, &converter);
        assert_eq!(forms.canonical, "(2)/(x) = 5");
        assert_eq!(forms.presentation, "\\frac{2}{x} = 5");
        assert_eq!(forms.wrapped.as_deref(), Some("Eq((2)/(x), 5)"));
        assert_eq!(forms.simple, "2/x = 5");

        let forms = convert("Eq((2)/(x), 5)", Notation::Canonical, &converter);
        assert_eq!(forms.canonical, "(2)/(x) = 5");
        assert_eq!(forms.presentation, "\\frac{2}{x} = 5");
    }

    #[test]
    fn strict_errors() {
        let converter = Converter::default();
        assert!(strict_parse_error("2/x = 5", Notation::Simple, &converter).is_none());
        assert!(strict_parse_error("2/(x+", Notation::Simple, &converter).is_some());
        assert!(strict_parse_error("\\frac{1}{x}", Notation::Presentation, &converter).is_none());
    }
}
