use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "profilefinder")]
#[command(about = "Resolves company names to ranked candidate profile-page URLs on trade data sites")]
#[command(version)]
pub struct Cli {
    /// Create default configuration file at ./config/profilefinder.toml
    #[arg(long)]
    pub init: bool,

    /// Single company name to resolve
    #[arg(short, long)]
    pub company: Option<String>,

    /// Path to a plain-text company list, one name per line
    #[arg(short, long, value_name = "FILE", conflicts_with = "company")]
    pub input: Option<String>,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Maximum candidates reported per company (overrides config)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Verbose logging (use -v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if !self.init && self.company.is_none() && self.input.is_none() {
            return Err(
                "A company is required (use --company NAME or --input FILE for batch mode)"
                    .to_string(),
            );
        }

        if let Some(name) = &self.company {
            if name.trim().is_empty() {
                return Err("Company name cannot be empty".to_string());
            }
        }

        if self.top == Some(0) {
            return Err("Top must be greater than 0".to_string());
        }

        Ok(())
    }
}
