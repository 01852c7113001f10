use anyhow::{anyhow, Context, Result};
use filter_gradient::css::parser::CssParser;
use filter_gradient::css::parser_config::ParserConfig;
use filter_gradient::css::tokenizer::{TokenType, Tokenizer};
use filter_gradient::css::walker::Walker;
use filter_gradient::shared::char_stream::{CharStream, Location};
use filter_gradient::shared::errors::CssError;
use filter_gradient::{transform, TransformOptions};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::fs;

fn main() -> Result<()> {
    let matches = clap::Command::new("filter-gradient")
        .version("0.1.0")
        .about("Adds legacy gradient filters next to CSS linear gradients")
        .arg(
            clap::Arg::new("input")
                .help("The stylesheet to transform")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("output")
                .help("Write the stylesheet to this file instead of stdout")
                .short('o')
                .long("output"),
        )
        .arg(
            clap::Arg::new("config")
                .help("JSON file with transform options")
                .long("config"),
        )
        .arg(
            clap::Arg::new("no-angle-fallback")
                .help("Skip gradients whose direction can only be approximated")
                .long("no-angle-fallback")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("skip-multi-color")
                .help("Skip gradients with more than two color stops")
                .long("skip-multi-color")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("skip-warnings")
                .help("Don't report any warnings")
                .long("skip-warnings")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("tokens")
                .help("Just print the tokens")
                .long("tokens")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("ast")
                .help("Print the transformed stylesheet as a tree instead of CSS")
                .long("ast")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("ignore-errors")
                .help("Ignore parse errors")
                .long("ignore-errors")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let input = matches
        .get_one::<String>("input")
        .ok_or_else(|| anyhow!("missing input"))?
        .to_string();

    if matches.get_flag("debug") {
        SimpleLogger::new().with_level(LevelFilter::Trace).init()?;
    }

    let css = fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;

    if matches.get_flag("tokens") {
        print_tokens(&css);
        return Ok(());
    }

    let mut options = match matches.get_one::<String>("config") {
        Some(path) => TransformOptions::from_file(path).with_context(|| format!("loading {path}"))?,
        None => TransformOptions::default(),
    };
    if matches.get_flag("no-angle-fallback") {
        options.angle_fallback = false;
    }
    if matches.get_flag("skip-multi-color") {
        options.skip_multi_color = true;
    }
    if matches.get_flag("skip-warnings") {
        options.skip_warnings = true;
    }

    let config = ParserConfig {
        source: Some(input.clone()),
        ignore_errors: matches.get_flag("ignore-errors"),
        ..Default::default()
    };

    let mut stylesheet = match CssParser::parse_str(&css, config) {
        Ok(stylesheet) => stylesheet,
        Err(err) => {
            let message = err.to_string();
            display_snippet(&css, &err);
            return Err(anyhow!("{input}: {message}"));
        }
    };

    let report = transform(&mut stylesheet, &options);
    for diagnostic in &report.diagnostics {
        eprintln!("{input}:{diagnostic}");
    }
    log::info!("inserted {} filter declarations", report.applied);

    let output = if matches.get_flag("ast") {
        Walker::new(&stylesheet).walk_to_string()
    } else {
        stylesheet.to_string()
    };

    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, output).with_context(|| format!("writing {path}"))?,
        None => print!("{output}"),
    }

    Ok(())
}

/// Prints the lines around the error location with a marker below the column of the error
fn display_snippet(css: &str, err: &CssError) {
    let Some(loc) = err.location else {
        return;
    };

    let lines: Vec<&str> = css.split('\n').collect();
    let line_nr = loc.line().saturating_sub(1);
    let col_nr = loc.column().saturating_sub(2);

    if col_nr > 1000 {
        eprintln!("Error is too far to the right to display.");
        return;
    }

    eprintln!();
    for n in line_nr.saturating_sub(5)..=line_nr + 5 {
        let Some(line) = lines.get(n) else {
            continue;
        };
        eprintln!("{:<5}|{}", n + 1, line);
        if n == line_nr {
            eprintln!("   ---{}^", "-".repeat(col_nr));
        }
    }
    eprintln!();
}

fn print_tokens(css: &str) {
    let mut stream = CharStream::new(css);
    let mut tokenizer = Tokenizer::new(&mut stream, Location::default());

    loop {
        let token = tokenizer.consume();
        println!("{:?} {}", token.location, token);

        if token.token_type == TokenType::Eof {
            break;
        }
    }
}
