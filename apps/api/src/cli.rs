use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resume-match")]
#[command(about = "Match a PDF resume against a job description", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP analysis service (default)
    Serve,

    /// Upload a resume and job description to a running service and print the analysis
    Analyze {
        /// Path to the resume PDF
        #[arg(short, long, value_name = "FILE")]
        resume: PathBuf,

        /// Path to a plain-text job description
        #[arg(short, long, value_name = "FILE")]
        job: PathBuf,

        /// Maximum number of keywords to extract
        #[arg(short = 'k', long)]
        max_k: Option<usize>,

        /// Keyword to rank with the technologies even if the posting omits it (repeatable)
        #[arg(long = "keyword", value_name = "KEYWORD")]
        keywords: Vec<String>,

        /// Service base URL
        #[arg(long, env = "ANALYZER_BASE_URL")]
        base_url: Option<String>,
    },
}
