//! Output formatting for the `list` and `files` commands.
//!
//! Everything writes to a caller supplied writer so the formatting can be
//! tested without a terminal.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use super::args::OutputFormat;
use crate::{
    core::{Discovery, ModulePosture, TypeKind, TypeListing},
    utils::relative_display,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Width of the kind column (`interface` is the longest kind).
const KIND_WIDTH: usize = 9;

pub fn print_listing(listing: &TypeListing, format: OutputFormat) -> io::Result<()> {
    listing_to(listing, format, &mut io::stdout().lock())
}

pub fn listing_to<W: Write>(
    listing: &TypeListing,
    format: OutputFormat,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, listing)?;
            writeln!(writer)
        }
        OutputFormat::Text => {
            for ty in &listing.types {
                let kind = format!("{:<KIND_WIDTH$}", ty.kind.as_str());
                let kind = match ty.kind {
                    TypeKind::Class => kind.cyan(),
                    TypeKind::Interface => kind.magenta(),
                    TypeKind::Enum => kind.yellow(),
                };
                match &ty.module {
                    Some(module) => writeln!(
                        writer,
                        "{} {} {}",
                        kind,
                        ty.full_name().bold(),
                        format!("({module})").dimmed()
                    )?,
                    None => writeln!(writer, "{} {}", kind, ty.full_name().bold())?,
                }
            }

            let posture = ModulePosture {
                has_modules: listing.has_modules,
                has_namespaces: listing.has_namespaces,
            };
            if !listing.types.is_empty() {
                writeln!(writer)?;
            }
            summary_to(listing.types.len(), "type", &posture, writer)
        }
    }
}

pub fn print_discovery(discovery: &Discovery, project_dir: &Path) -> io::Result<()> {
    discovery_to(discovery, project_dir, &mut io::stdout().lock())
}

pub fn discovery_to<W: Write>(
    discovery: &Discovery,
    project_dir: &Path,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(
        writer,
        "{} {}",
        "strategy:".bold(),
        discovery.strategy
    )?;
    for file in &discovery.files {
        writeln!(writer, "  {}", relative_display(file, project_dir))?;
    }
    writeln!(writer)?;
    summary_to(discovery.files.len(), "file", &discovery.posture, writer)
}

fn summary_to<W: Write>(
    count: usize,
    noun: &str,
    posture: &ModulePosture,
    writer: &mut W,
) -> io::Result<()> {
    let flags = format!(
        "(modules: {}, namespaces: {})",
        yes_no(posture.has_modules),
        yes_no(posture.has_namespaces)
    );
    if count == 0 {
        writeln!(
            writer,
            "{} no {}s found {}",
            FAILURE_MARK.red(),
            noun,
            flags.dimmed()
        )
    } else {
        let plural = if count == 1 { "" } else { "s" };
        writeln!(
            writer,
            "{} {} {}{} found {}",
            SUCCESS_MARK.green(),
            count,
            noun,
            plural,
            flags.dimmed()
        )
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{DiscoveryStrategy, ExternalType};

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn listing() -> TypeListing {
        let mut dialog = ExternalType::new(TypeKind::Class, "", "OrderDialog", "/p/D.ts");
        dialog.module = Some("/Modules/Orders/OrderDialog".to_string());
        TypeListing {
            has_modules: true,
            has_namespaces: false,
            types: vec![
                ExternalType::new(TypeKind::Interface, "App", "Options", "/p/O.ts"),
                dialog,
            ],
        }
    }

    fn render_listing(listing: &TypeListing, format: OutputFormat) -> String {
        let mut output = Vec::new();
        listing_to(listing, format, &mut output).unwrap();
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_text_listing() {
        assert_eq!(
            render_listing(&listing(), OutputFormat::Text),
            "interface App.Options\n\
             class     OrderDialog (/Modules/Orders/OrderDialog)\n\
             \n\
             \u{2713} 2 types found (modules: yes, namespaces: no)\n"
        );
    }

    #[test]
    fn test_empty_text_listing() {
        let empty = TypeListing {
            has_modules: false,
            has_namespaces: true,
            types: Vec::new(),
        };
        assert_eq!(
            render_listing(&empty, OutputFormat::Text),
            "\u{2718} no types found (modules: no, namespaces: yes)\n"
        );
    }

    #[test]
    fn test_json_listing() {
        let output = render_listing(&listing(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["hasModules"], true);
        assert_eq!(value["hasNamespaces"], false);
        assert_eq!(value["types"][0]["name"], "Options");
        assert_eq!(value["types"][1]["module"], "/Modules/Orders/OrderDialog");
    }

    #[test]
    fn test_discovery_output() {
        let discovery = Discovery {
            files: vec![
                PathBuf::from("/proj/Imports/Service.ts"),
                PathBuf::from("/proj/Modules/A.ts"),
            ],
            posture: ModulePosture {
                has_modules: false,
                has_namespaces: true,
            },
            strategy: DiscoveryStrategy::Legacy,
        };

        let mut output = Vec::new();
        discovery_to(&discovery, Path::new("/proj"), &mut output).unwrap();

        assert_eq!(
            strip_ansi(&String::from_utf8(output).unwrap()),
            "strategy: legacy\n  Imports/Service.ts\n  Modules/A.ts\n\n\
             \u{2713} 2 files found (modules: no, namespaces: yes)\n"
        );
    }
}
