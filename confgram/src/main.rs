use confgram::{logging, Configuration, Grammar, Lexer, RuntimeConfig, Token, STRING};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

const DEFAULT_SOURCE: &str = "example.conf";

/// Settings collected from the sample configuration language
#[derive(Debug, Default, Serialize)]
struct ServerSettings {
    listeners: Vec<String>,
    routes: Vec<String>,
}

#[derive(Debug, PartialEq)]
struct CliOptions {
    settings: Option<PathBuf>,
    json: bool,
    help: bool,
    source: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("confgram");

    let options = match parse_args(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} [--settings <file.toml>] [--json] <file.conf>", program_name);
            std::process::exit(2);
        }
    };

    if options.help {
        print_help(program_name);
        return Ok(());
    }

    let runtime = match &options.settings {
        Some(path) => RuntimeConfig::load(path).map_err(|e| {
            logging::safe_log_error(e.error_code(), &e.to_string());
            e
        })?,
        None => RuntimeConfig::default(),
    };

    logging::init_global_logging(runtime.logging.clone())?;

    let mut config = build_configuration(runtime);
    let mut settings = ServerSettings::default();

    let report = match config.parse_file(&options.source, &mut settings) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("{}: {}", options.source.display(), error);
            std::process::exit(1);
        }
    };

    if options.json {
        let output = serde_json::json!({
            "report": report,
            "settings": settings,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for diagnostic in &report.diagnostics {
            println!("{}", diagnostic);
        }
        if !report.success() {
            eprint!("\n{}", report.format_diagnostics());
        }
    }

    if !report.success() {
        std::process::exit(1);
    }

    if !options.json {
        println!("{} parsed successfully", options.source.display());
    }

    Ok(())
}

/// Vocabulary and rules of the sample `listen on` / `match =>` language
fn build_configuration(runtime: RuntimeConfig) -> Configuration<ServerSettings> {
    let mut lexer = Lexer::with_builtin_detectors();
    for keyword in ["listen", "on", "match", "=>"] {
        lexer.register_keyword(keyword);
    }

    let mut grammar: Grammar<ServerSettings> = Grammar::new();
    grammar.register_rule(["listen", "on", STRING], |tokens: &[Token], settings| {
        settings.listeners.push(tokens[2].text().to_string());
        Ok(())
    });
    grammar.register_rule(["match", "=>", STRING], |tokens: &[Token], settings| {
        settings.routes.push(tokens[2].text().to_string());
        Ok(())
    });

    Configuration::with_preferences(lexer, grammar, runtime.driver)
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        settings: None,
        json: false,
        help: false,
        source: PathBuf::from(DEFAULT_SOURCE),
    };
    let mut source_seen = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            "--settings" => {
                let Some(path) = args.get(i + 1) else {
                    return Err("--settings requires a file path".to_string());
                };
                options.settings = Some(PathBuf::from(path));
                i += 1;
            }
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{}'", flag));
            }
            path => {
                if source_seen {
                    return Err(format!("Unexpected argument '{}'", path));
                }
                options.source = PathBuf::from(path);
                source_seen = true;
            }
        }
        i += 1;
    }

    Ok(options)
}

fn print_help(program_name: &str) {
    println!("confgram v{}", env!("CARGO_PKG_VERSION"));
    println!("Validate a configuration file against the sample grammar");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [file.conf]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    [file.conf]    Configuration to parse (default: {})", DEFAULT_SOURCE);
    println!();
    println!("OPTIONS:");
    println!("    --settings <file.toml>    Load driver and logging settings");
    println!("    --json                    Print the parse report as JSON");
    println!("    --help                    Show this help message");
    println!();
    println!("GRAMMAR:");
    println!("    listen on <address>");
    println!("    match => <pattern>");
    println!("    A trailing backslash continues a statement on the next line.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options.source, PathBuf::from(DEFAULT_SOURCE));
        assert!(!options.json);
        assert!(options.settings.is_none());
    }

    #[test]
    fn test_parse_args_all_options() {
        let options =
            parse_args(&args(&["--settings", "dev.toml", "--json", "server.conf"])).unwrap();
        assert_eq!(options.settings, Some(PathBuf::from("dev.toml")));
        assert!(options.json);
        assert_eq!(options.source, PathBuf::from("server.conf"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--settings"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["a.conf", "b.conf"])).is_err());
    }

    #[test]
    fn test_sample_grammar() {
        let mut config = build_configuration(RuntimeConfig::default());
        let mut settings = ServerSettings::default();

        let report = config
            .parse_str(
                "listen on 0.0.0.0\n\nmatch => \\\n  /api\nlisten on 8080\n",
                &mut settings,
            )
            .unwrap();

        assert_eq!(settings.listeners, vec!["0.0.0.0"]);
        assert_eq!(settings.routes, vec!["/api"]);
        assert_eq!(report.matched_lines, 2);
        assert_eq!(report.unmatched_lines, 1);
        assert_eq!(report.diagnostics[0].line, 4);
    }
}
