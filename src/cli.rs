use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfsplit")]
#[command(about = "Split PDFs by page ranges, fixed-size chunks, or removed pages")]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display the page count of a PDF
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Split a PDF into one new PDF, or a zip of PDFs
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Split mode: ranges, fixed_range or remove_pages
        #[arg(short, long)]
        mode: String,

        /// Pages to keep for mode "ranges" (e.g., "1,3,5-8")
        #[arg(long)]
        ranges: Option<String>,

        /// Pages per output file for mode "fixed_range"
        #[arg(long, allow_negative_numbers = true)]
        fixed_range: Option<i64>,

        /// Pages to drop for mode "remove_pages" (e.g., "2,4-6")
        #[arg(long)]
        remove_pages: Option<String>,

        /// Output directory
        #[arg(short, long, env = "PDFSPLIT_OUTPUT_DIR")]
        output_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split() {
        let cli = Cli::parse_from([
            "pdfsplit",
            "split",
            "in.pdf",
            "--mode",
            "fixed_range",
            "--fixed-range",
            "4",
            "-o",
            "out",
        ]);
        match cli.command {
            Commands::Split {
                path,
                mode,
                fixed_range,
                ranges,
                output_dir,
                ..
            } => {
                assert_eq!(path, PathBuf::from("in.pdf"));
                assert_eq!(mode, "fixed_range");
                assert_eq!(fixed_range, Some(4));
                assert_eq!(ranges, None);
                assert_eq!(output_dir, PathBuf::from("out"));
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["pdfsplit", "info", "a.pdf", "-v"]);
        assert!(cli.verbose);
    }
}
