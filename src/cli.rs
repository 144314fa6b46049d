//! CLI argument parsing with clap.

use clap::Parser;
use monogram::{keys, Options};

/// Initials avatar generator - renders initials over a flat background.
#[derive(Parser, Debug)]
#[command(name = "monogram", version, about)]
pub struct Cli {
    /// Name or text to derive initials from.
    #[arg(conflicts_with = "text_file")]
    pub text: Option<String>,

    /// Path to a file containing the text.
    #[arg(short = 'i', long, conflicts_with = "text")]
    pub text_file: Option<String>,

    /// Background color as #RGB or #RRGGBB (random palette color if omitted).
    #[arg(short, long)]
    pub background_color: Option<String>,

    /// Text color as #RGB or #RRGGBB.
    #[arg(short = 'c', long)]
    pub font_color: Option<String>,

    /// Canvas width and height in pixels.
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Path to a TrueType or OpenType font.
    #[arg(long)]
    pub font: Option<String>,

    /// Text size in pixels (half the canvas size if omitted).
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Vertical text shift in pixels, positive is down.
    #[arg(long, allow_hyphen_values = true)]
    pub vertical_offset: Option<i32>,

    /// Keep the initials' original case.
    #[arg(long)]
    pub no_upcase: bool,

    /// Encoder quality, 0-100.
    #[arg(short, long)]
    pub quality: Option<i64>,

    /// Output format: png, jpeg, webp.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Separator used to split the text into words.
    #[arg(long)]
    pub separator: Option<String>,

    /// Output file path, `-` for stdout (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the initials and exit without rendering.
    #[arg(long)]
    pub initials: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the text from either the positional argument or the file flag.
    ///
    /// # Errors
    ///
    /// Returns an error if neither text nor text-file is provided,
    /// or if the file cannot be read.
    pub fn resolve_text(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.text {
            Ok(text.clone())
        } else if let Some(ref path) = self.text_file {
            std::fs::read_to_string(path)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide a text argument or use -i/--text-file",
            ))
        }
    }

    /// Options given on the command line; flags that were not passed are absent.
    #[must_use]
    pub fn options(&self) -> Options {
        let mut options = Options::new();
        if let Some(ref color) = self.background_color {
            options.set(keys::BACKGROUND_COLOR, color.as_str());
        }
        if let Some(ref color) = self.font_color {
            options.set(keys::FONT_COLOR, color.as_str());
        }
        if let Some(size) = self.size {
            options.set(keys::SIZE, size);
        }
        if let Some(ref font) = self.font {
            options.set(keys::FONT, font.as_str());
        }
        if let Some(font_size) = self.font_size {
            options.set(keys::FONT_SIZE, font_size);
        }
        if let Some(offset) = self.vertical_offset {
            options.set(keys::VERTICAL_OFFSET, offset);
        }
        if self.no_upcase {
            options.set(keys::UPCASE, false);
        }
        if let Some(quality) = self.quality {
            options.set(keys::QUALITY, quality);
        }
        if let Some(ref format) = self.format {
            options.set(keys::FORMAT, format.as_str());
        }
        if let Some(ref separator) = self.separator {
            options.set(keys::SEPARATOR, separator.as_str());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monogram::OptionValue;

    #[test]
    fn positional_text() {
        let cli = Cli::parse_from(["monogram", "Ada Lovelace"]);
        assert_eq!(cli.text.as_deref(), Some("Ada Lovelace"));
        assert!(cli.text_file.is_none());
        assert_eq!(cli.resolve_text().unwrap(), "Ada Lovelace");
    }

    #[test]
    fn text_file_flag() {
        let dir = std::env::temp_dir().join("monogram_cli_tf_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("name.txt");
        std::fs::write(&path, "Grace Hopper\n").unwrap();

        let cli = Cli::parse_from(["monogram", "-i", path.to_str().unwrap()]);
        assert!(cli.text.is_none());
        assert_eq!(cli.resolve_text().unwrap(), "Grace Hopper\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn no_flags_means_no_options() {
        let cli = Cli::parse_from(["monogram", "x"]);
        assert!(cli.options().is_empty());
        assert!(!cli.verbose);
        assert!(!cli.initials);
        assert!(cli.output.is_none());
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "monogram",
            "-b",
            "#123456",
            "-c",
            "#fff",
            "-s",
            "128",
            "--font-size",
            "40",
            "--vertical-offset",
            "-3",
            "--no-upcase",
            "-q",
            "80",
            "-f",
            "jpeg",
            "--separator",
            "_",
            "-o",
            "out.jpg",
            "-v",
            "ada_lovelace",
        ]);
        let options = cli.options();
        assert_eq!(options.get(keys::BACKGROUND_COLOR), Some(&OptionValue::Text("#123456".into())));
        assert_eq!(options.get(keys::FONT_COLOR), Some(&OptionValue::Text("#fff".into())));
        assert_eq!(options.get(keys::SIZE), Some(&OptionValue::Int(128)));
        assert_eq!(options.get(keys::FONT_SIZE), Some(&OptionValue::Int(40)));
        assert_eq!(options.get(keys::VERTICAL_OFFSET), Some(&OptionValue::Int(-3)));
        assert_eq!(options.get(keys::UPCASE), Some(&OptionValue::Bool(false)));
        assert_eq!(options.get(keys::QUALITY), Some(&OptionValue::Int(80)));
        assert_eq!(options.get(keys::FORMAT), Some(&OptionValue::Text("jpeg".into())));
        assert_eq!(options.get(keys::SEPARATOR), Some(&OptionValue::Text("_".into())));
        assert_eq!(cli.output.as_deref(), Some("out.jpg"));
        assert!(cli.verbose);
        assert_eq!(cli.text.as_deref(), Some("ada_lovelace"));
    }

    #[test]
    fn no_text_errors() {
        let cli = Cli::parse_from(["monogram"]);
        assert!(cli.resolve_text().is_err());
    }
}
