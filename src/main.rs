use clap::Parser;

use rowcheck::{extract_rows, page_title, Checker, ClientConfig, Error, RowClassVerifier};

/// Fetch a rendered list page and verify its positional row classes.
#[derive(Parser, Debug)]
#[command(name = "rowcheck", version, about)]
struct Args {
    /// URL of the rendered page to check
    url: String,

    /// CSS selector matching the list rows
    #[arg(short, long, default_value = ".views-row")]
    selector: String,

    /// Class prefix the rows are labeled with
    #[arg(long, default_value = rowcheck::DEFAULT_CLASS_PREFIX)]
    prefix: String,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Fail when the page contains zero rows
    #[arg(long)]
    require_rows: bool,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,

    /// Override the User-Agent header
    #[arg(long)]
    user_agent: Option<String>,
}

fn run(args: &Args) -> rowcheck::Result<bool> {
    let mut config = ClientConfig {
        timeout_ms: args.timeout_ms,
        ..Default::default()
    };
    if let Some(ua) = &args.user_agent {
        config.user_agent = ua.clone();
    }

    let checker = Checker::new(config)?;
    let resp = checker.fetch(&args.url)?;

    let output = extract_rows(&resp.body, &args.selector)?;
    let verifier = RowClassVerifier::with_prefix(&args.prefix);
    let result = if args.require_rows {
        verifier.verify_non_empty(&output)?
    } else {
        verifier.verify(&output)
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result)
                .map_err(|e| Error::Other(format!("Failed to serialize report: {}", e)))?
        );
        return Ok(result.passed());
    }

    match page_title(&resp.body) {
        Some(title) => println!("{} - {}", title, resp.url),
        None => println!("{}", resp.url),
    }

    for (index, reason) in result.malformed_rows() {
        println!("row {}: malformed: {}", index, reason);
    }
    for (index, outcome) in result.failures() {
        println!(
            "row {}: missing `{}` ({} check)",
            index,
            outcome.expected,
            outcome.check.name()
        );
    }
    println!(
        "{} rows checked: {}",
        result.len(),
        if result.passed() { "PASS" } else { "FAIL" }
    );

    Ok(result.passed())
}

fn main() {
    let args = Args::parse();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("rowcheck: {}", e);
            std::process::exit(2);
        }
    }
}
