//! knights - Knights Restaurants specials scraper

use std::io;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};

use knights::{extract_specials, fetch_page, render, specials_url, Indent, Location, Meal};

#[derive(Parser)]
#[command(name = "knights")]
#[command(version, about = "Print the daily specials from Knights Restaurants", long_about = None)]
#[command(group(ArgGroup::new("meal").required(true).multiple(false)))]
#[command(group(ArgGroup::new("location").required(true).multiple(false)))]
#[command(after_help = "EXAMPLES:
    knights --lunch --downtown            Downtown lunch specials, indented text
    knights --dinner --annarbor --json    Ann Arbor dinner specials as JSON")]
struct Cli {
    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Output as pretty JSON (implies --json)
    #[arg(long = "jsonPretty")]
    json_pretty: bool,

    /// Get the lunch special
    #[arg(long, group = "meal")]
    lunch: bool,

    /// Get the dinner special
    #[arg(long, group = "meal")]
    dinner: bool,

    /// Get the downtown special
    #[arg(long, group = "location")]
    downtown: bool,

    /// Get the Ann Arbor Dexter Rd special
    #[arg(long, group = "location")]
    annarbor: bool,

    /// Get the Jackson special
    #[arg(long, group = "location")]
    jackson: bool,
}

impl Cli {
    fn meal(&self) -> Meal {
        if self.dinner { Meal::Dinner } else { Meal::Lunch }
    }

    fn location(&self) -> Location {
        if self.annarbor {
            Location::AnnArbor
        } else if self.jackson {
            Location::Jackson
        } else {
            Location::Downtown
        }
    }

    fn json(&self) -> bool {
        self.json || self.json_pretty
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> knights::Result<()> {
    let url = specials_url(cli.meal(), cli.location());
    let body = fetch_page(&url)?;

    let indent = if cli.json() { Indent::None } else { Indent::FontSize };
    let specials = extract_specials(body, indent)?;

    if cli.json() {
        println!("{}", render::to_json(&specials, cli.json_pretty)?);
    } else {
        render::write_plain(io::stdout().lock(), &specials)?;
    }

    Ok(())
}
