use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use untwind_codegen::{convert_to_sass, ConvertOptions};

#[derive(Parser)]
#[command(name = "untwind")]
#[command(about = "untwind — converts Tailwind-annotated HTML to nested SASS")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an HTML file to a .scss stylesheet and a rewritten skeleton
    Convert {
        /// Input HTML file
        path: String,

        /// JSON file with conversion options
        #[arg(long)]
        config: Option<String>,

        /// Write the stylesheet to stdout instead of files
        #[arg(long)]
        print: bool,

        /// Directory for the output files (defaults to the input's directory)
        #[arg(long)]
        out_dir: Option<String>,

        /// Skip pretty-printing both outputs
        #[arg(long)]
        no_format: bool,

        /// Sort utility classes before emission
        #[arg(long)]
        order_classes: bool,
    },

    /// Check an HTML file for parse errors without converting
    Check {
        /// Input HTML file
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            path,
            config,
            print,
            out_dir,
            no_format,
            order_classes,
        } => cmd_convert(&path, config.as_deref(), print, out_dir.as_deref(), no_format, order_classes),
        Command::Check { path } => cmd_check(&path),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn read_options(config: Option<&str>) -> ConvertOptions {
    let Some(path) = config else {
        return ConvertOptions::default();
    };
    let source = read_source(path);
    match serde_json::from_str(&source) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error in config {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_convert(
    path: &str,
    config: Option<&str>,
    print: bool,
    out_dir: Option<&str>,
    no_format: bool,
    order_classes: bool,
) {
    let source = read_source(path);

    let mut options = read_options(config);
    if no_format {
        options.format_output = false;
    }
    if order_classes {
        options.order_by_tailwind_classes = true;
    }

    let output = match convert_to_sass(&source, &options) {
        Ok(Some(output)) => output,
        Ok(None) => {
            eprintln!("Error: {path} has no structural content to convert");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if print {
        println!("{}", output.sass);
        return;
    }

    // Write output files next to the source unless --out-dir says otherwise
    let stem = Path::new(path).file_stem().unwrap().to_str().unwrap();
    let dir = match out_dir {
        Some(dir) => PathBuf::from(dir),
        None => Path::new(path).parent().unwrap_or(Path::new(".")).to_path_buf(),
    };

    let sass_path = dir.join(format!("{stem}.scss"));
    let html_path = dir.join(format!("{stem}.out.html"));

    if let Err(e) = std::fs::write(&sass_path, &output.sass) {
        eprintln!("Error writing {}: {e}", sass_path.display());
        std::process::exit(1);
    }
    if let Err(e) = std::fs::write(&html_path, &output.html) {
        eprintln!("Error writing {}: {e}", html_path.display());
        std::process::exit(1);
    }

    eprintln!("Wrote: {}", sass_path.display());
    eprintln!("Wrote: {}", html_path.display());
}

fn cmd_check(path: &str) {
    let source = read_source(path);

    if let Err(e) = untwind_parser::Parser::parse(&source) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    eprintln!("OK: {path}");
}
