//! mailforge – command-line email template generator.
//!
//! Usage:
//!   mailforge <body.html> [output.html] [--legacy] [--max-width 600]
//!             [--font "Arial, sans-serif"] [--header img.png] [--footer img.png]
//!             [--config template.json] [--pdf /usr/bin/chromium]
//!   mailforge --demo <out-dir>
//!
//! If `output.html` is omitted the email is written next to the input file
//! as `<stem>-email.html` (`<stem>-email-outlook.html` in legacy mode).

use std::{env, fs, path::Path, path::PathBuf, process};

use mail_forge::config::{clamp_max_width, Dialect, EmailTemplateConfig};
use mail_forge::export::{export_file_name, write_export};
use mail_forge::import::import_file;
use mail_forge::payload::encode_image_file;
use mail_forge::pipeline::generate_email;
use mail_forge::render::{render_pdf, BrowserBackend};
use mail_forge::templates;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut legacy = false;
    let mut max_width: Option<u32> = None;
    let mut font: Option<String> = None;
    let mut header: Option<String> = None;
    let mut footer: Option<String> = None;
    let mut browser: Option<PathBuf> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--legacy" | "-l" => legacy = true,
            "--max-width" | "-w" => {
                let value = flag_value(&mut iter, arg, &args[0]);
                match value.parse::<u32>() {
                    Ok(w) => max_width = Some(w),
                    Err(_) => {
                        eprintln!("Error: --max-width expects a whole number of pixels, got '{value}'");
                        process::exit(1);
                    }
                }
            }
            "--font" | "-f" => font = Some(flag_value(&mut iter, arg, &args[0])),
            "--header" => header = Some(flag_value(&mut iter, arg, &args[0])),
            "--footer" => footer = Some(flag_value(&mut iter, arg, &args[0])),
            "--config" | "-c" => config_path = Some(PathBuf::from(flag_value(&mut iter, arg, &args[0]))),
            "--pdf" => browser = Some(PathBuf::from(flag_value(&mut iter, arg, &args[0]))),
            "--demo" => {
                let dir = PathBuf::from(flag_value(&mut iter, arg, &args[0]));
                write_demo(&dir);
                process::exit(0);
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no input file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    // Config file first, flags override.
    let mut config = match &config_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(json) => match EmailTemplateConfig::from_json(&json) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error in '{}': {e}", path.display());
                    process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error reading '{}': {e}", path.display());
                process::exit(1);
            }
        },
        None => EmailTemplateConfig::default(),
    };
    if legacy {
        config.dialect = Dialect::Legacy;
    }
    if let Some(w) = max_width {
        config.max_width = clamp_max_width(w);
    }
    if let Some(f) = font.filter(|f| !f.trim().is_empty()) {
        config.font_family = f;
    }
    if let Some(h) = header {
        config.header_image = Some(image_source(&h));
    }
    if let Some(f) = footer {
        config.footer_image = Some(image_source(&f));
    }

    let imported = match import_file(&input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    for msg in &imported.messages {
        eprintln!("warning: {msg}");
    }

    let html = generate_email(&imported.html, &config);

    let output = output_path.unwrap_or_else(|| default_output(&input, config.dialect));
    let (dir, file_name) = split_output(&output);
    let written = match write_export(&dir, &file_name, &html) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error writing '{}': {e}", output.display());
            process::exit(1);
        }
    };
    eprintln!("Wrote '{}' ({} bytes)", written.display(), html.len());

    if let Some(program) = browser {
        let backend = BrowserBackend::new(program);
        let pdf_path = written.with_extension("pdf");
        match render_pdf(&backend, &html) {
            Ok(bytes) => {
                if let Err(e) = fs::write(&pdf_path, &bytes) {
                    eprintln!("Error writing '{}': {e}", pdf_path.display());
                    process::exit(1);
                }
                eprintln!("Wrote '{}' ({} bytes)", pdf_path.display(), bytes.len());
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}

/// Write every sample body in both dialects into `dir`.
fn write_demo(dir: &Path) {
    for (name, body) in templates::all_bodies() {
        for dialect in [Dialect::Responsive, Dialect::Legacy] {
            let config = EmailTemplateConfig {
                dialect,
                ..EmailTemplateConfig::default()
            };
            let html = generate_email(body, &config);
            let file_name = export_file_name(Some(name), dialect);
            match write_export(dir, &file_name, &html) {
                Ok(path) => eprintln!("Wrote '{}' ({} bytes)", path.display(), html.len()),
                Err(e) => {
                    eprintln!("Error writing '{file_name}': {e}");
                    process::exit(1);
                }
            }
        }
    }
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str, prog: &str) -> String {
    match iter.next() {
        Some(v) => v.clone(),
        None => {
            eprintln!("Error: {flag} needs a value.");
            print_usage(prog);
            process::exit(1);
        }
    }
}

/// Data URIs and URLs are used as given; anything else is read from disk
/// and inlined.
fn image_source(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("data:") || lower.starts_with("http://") || lower.starts_with("https://") {
        return value.to_string();
    }
    match encode_image_file(Path::new(value)) {
        Ok(payload) => {
            log::info!("inlined {value} ({}x{} {})", payload.width, payload.height, payload.mime);
            payload.data_uri
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn default_output(input: &Path, dialect: Dialect) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| format!("{s}-email"));
    let name = export_file_name(stem.as_deref(), dialect);
    input.with_file_name(name)
}

fn split_output(output: &Path) -> (PathBuf, String) {
    let dir = output.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = output
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("email-template.html")
        .to_string();
    (dir, name)
}

fn print_usage(prog: &str) {
    eprintln!("mailforge – rich HTML to email-safe HTML (mail-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <body.html> [output.html] [flags]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <body.html>    HTML fragment or document to convert (.docx must be converted first)");
    eprintln!("  [output.html]  Output path  (default: <stem>-email.html, -outlook in legacy mode)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --legacy, -l       Emit the Outlook (table + MSO conditional) dialect");
    eprintln!("  --max-width, -w N  Content width in pixels, clamped to 300-1200 (default: 600)");
    eprintln!("  --font, -f F       CSS font-family (default: \"Arial, sans-serif\")");
    eprintln!("  --header IMG       Header image: file path, data URI or URL");
    eprintln!("  --footer IMG       Footer image: file path, data URI or URL");
    eprintln!("  --config, -c FILE  JSON template config; flags override its values");
    eprintln!("  --pdf BROWSER      Also print a PDF with a headless Chromium binary");
    eprintln!("  --demo DIR         Write the sample bodies in both dialects to DIR and exit");
    eprintln!("  --help             Print this message");
}
